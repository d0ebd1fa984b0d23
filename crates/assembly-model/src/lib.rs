//! Config tree and releases document model for release assemblies.
//!
//! This crate provides the data layer the assembly resolution engine works on:
//!
//! - [`ConfigValue`]: a closed sum type for parsed configuration documents
//!   with permissive, never-failing lookups
//! - [`ReleasesDocument`] / [`AssemblyView`]: a typed read-only view of the
//!   `releases` document
//! - [`AssemblyName`]: assembly name validation
//!
//! Reading documents from disk or git is the caller's business; this crate
//! starts from text or an already-parsed serde value.

pub mod convert;
pub mod error;
pub mod name;
pub mod releases;
pub mod value;

pub use error::{Error, Result};
pub use name::{AssemblyName, STREAM_ASSEMBLY, TEST_ASSEMBLY};
pub use releases::{AssemblyView, MemberKind, MemberOverride, ReleasesDocument, WILDCARD_KEY};
pub use value::{ConfigValue, Mapping};
