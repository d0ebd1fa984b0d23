//! Assembly configuration resolution engine.
//!
//! An assembly is a named release definition in the `releases` document. It
//! may name a `basis.assembly` it inherits from, and contributes overrides
//! for the group config, member metadata, RHCOS and issue lists. This crate
//! folds those contributions down the basis chain:
//!
//! - [`merger`]: the deep-merge primitive with `!` / `?` key directives
//! - [`assembly_group_config`], [`assembly_metadata_config`],
//!   [`assembly_rhcos_config`], [`assembly_issues_config`] and
//!   [`assembly_basis_event`]: chain resolution entry points
//! - [`check_recursion`]: basis cycle detection, run by every entry point
//! - [`AssemblyContext`]: the per-run assembly settings
//!
//! All entry points are pure functions of their inputs.

pub mod context;
pub mod cycle;
pub mod error;
pub mod issues;
pub mod merge;
pub mod pins;
pub mod resolve;

pub use context::{AssemblyContext, AssemblySettings};
pub use cycle::{assembly_chain, check_recursion};
pub use error::{Error, Result};
pub use issues::{IssueOverrides, assembly_issue_overrides};
pub use merge::{KeyDirective, MergeKey, merger};
pub use pins::{Nvr, dependency_nvrs, pinned_nvr};
pub use resolve::{
    assembly_basis_event, assembly_config_finalize, assembly_field, assembly_group_config,
    assembly_issues_config, assembly_metadata_config, assembly_rhcos_config,
};

pub use assembly_model::{ConfigValue, MemberKind, ReleasesDocument};
