//! Error types for assembly-model

/// Result type for assembly-model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or reading a config tree
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source document contained a value the config tree cannot hold
    #[error("Unsupported config value: {kind}")]
    UnsupportedValue { kind: String },

    /// Mapping keys must be strings
    #[error("Mapping key must be a string, got {key}")]
    NonStringKey { key: String },

    /// Assembly name failed validation
    #[error("Invalid assembly name '{name}': {reason}")]
    InvalidAssemblyName { name: String, reason: String },

    /// Member kind is neither `rpm` nor `image`
    #[error("Unknown member kind: {kind}")]
    UnknownMemberKind { kind: String },

    /// YAML conversion error
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
