//! Assembly name validation

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w.]+$").unwrap());

/// The assembly that follows the latest builds of the release stream
pub const STREAM_ASSEMBLY: &str = "stream";

/// The assembly used for ad-hoc test builds
pub const TEST_ASSEMBLY: &str = "test";

/// A validated assembly name.
///
/// Names consist of Unicode word characters and dots and may not start or end with
/// a dot, since they end up embedded in build release fields
/// (`.assembly.<name>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssemblyName(String);

impl AssemblyName {
    pub fn parse(name: &str) -> Result<Self> {
        if !NAME_PATTERN.is_match(name) {
            return Err(Error::InvalidAssemblyName {
                name: name.to_string(),
                reason: "only alphanumerics, '.' and '_' are allowed".to_string(),
            });
        }
        if name.starts_with('.') || name.ends_with('.') {
            return Err(Error::InvalidAssemblyName {
                name: name.to_string(),
                reason: "must not start or end with '.'".to_string(),
            });
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `stream` and `test` are built into every group and are never pinned
    pub fn is_builtin(&self) -> bool {
        self.0 == STREAM_ASSEMBLY || self.0 == TEST_ASSEMBLY
    }
}

impl FromStr for AssemblyName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AssemblyName {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<AssemblyName> for String {
    fn from(name: AssemblyName) -> Self {
        name.0
    }
}

impl AsRef<str> for AssemblyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssemblyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
