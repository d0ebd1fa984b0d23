//! Error types for assembly-core

/// Result type for assembly-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving assembly configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The `basis.assembly` chain loops back on itself
    #[error(
        "Infinite recursion in {assembly} detected; {repeated} detected twice in chain [{}]",
        .chain.join(" -> ")
    )]
    AssemblyCycle {
        assembly: String,
        repeated: String,
        chain: Vec<String>,
    },

    /// A merged list of scalars mixes types that cannot be ordered
    #[error("Cannot sort merged list: {first} and {offending} are not comparable")]
    UnorderableSequence { first: String, offending: String },

    /// `basis.brew_event` is set but is not an integer
    #[error("Invalid basis brew event in assembly {assembly}: {value}")]
    InvalidBrewEvent { assembly: String, value: String },

    /// An assembly basis event and an explicit brew event were both requested
    #[error(
        "Cannot run with assembly basis event {basis_event} and brew event {brew_event} at the same time (assembly {assembly})"
    )]
    BrewEventConflict {
        assembly: String,
        basis_event: i64,
        brew_event: i64,
    },

    /// The same issue id is both included and excluded
    #[error("The following issues are defined in both 'include' and 'exclude': {ids:?}")]
    IssueConflict { ids: Vec<u64> },

    /// An NVR string could not be split into name, version and release
    #[error("Invalid NVR '{nvr}': {reason}")]
    InvalidNvr { nvr: String, reason: String },

    /// A pinned component is missing the field that names its build
    #[error("Pinned component {distgit_key} has no '{field}' in its 'is' stanza")]
    MissingPin { distgit_key: String, field: String },

    /// An el version is needed to read an RPM pin
    #[error("An el version is required to read the pinned RPM build of {distgit_key}")]
    MissingElVersion { distgit_key: String },

    /// Error from the config tree model
    #[error(transparent)]
    Model(#[from] assembly_model::Error),
}
