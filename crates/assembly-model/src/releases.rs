//! Read-only view over a releases document
//!
//! A releases document maps assembly names to their definitions:
//!
//! ```yaml
//! releases:
//!   4.8.1:
//!     assembly:
//!       basis:
//!         assembly: 4.8.0      # or brew_event: 123456
//!       group: {...}           # merged into the group config
//!       members:
//!         rpms:   [{distgit_key: ..., metadata: {...}}]
//!         images: [{distgit_key: '*', metadata: {...}}]
//!       rhcos: {...}
//!       issues:
//!         include: [{id: 1}]
//!         exclude: [{id: 2}]
//! ```
//!
//! The view never fails on a missing section; absence is reported as `None`
//! or an empty iterator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::ConfigValue;

/// `distgit_key` value matching every component of a kind
pub const WILDCARD_KEY: &str = "*";

/// A parsed releases document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleasesDocument {
    root: ConfigValue,
}

impl ReleasesDocument {
    pub fn new(root: ConfigValue) -> Self {
        Self { root }
    }

    /// Parse document text that the caller has already loaded
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(Self::new(ConfigValue::from_yaml_str(source)?))
    }

    /// Only mapping-rooted documents take part in assembly resolution;
    /// anything else is treated as "no releases document".
    pub fn is_structured(&self) -> bool {
        matches!(self.root, ConfigValue::Mapping(_))
    }

    pub fn root(&self) -> &ConfigValue {
        &self.root
    }

    /// The definition of the named assembly, if the document has one
    pub fn assembly<'a>(&'a self, name: &str) -> Option<AssemblyView<'a>> {
        let (name, release) = self
            .root
            .get("releases")
            .and_then(ConfigValue::as_mapping)?
            .get_key_value(name)?;
        release
            .get("assembly")
            .map(|definition| AssemblyView { name, definition })
    }

    /// Names of all releases in the document, in key order
    pub fn assembly_names(&self) -> Vec<&str> {
        self.root
            .get("releases")
            .and_then(ConfigValue::as_mapping)
            .map(|releases| releases.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// One assembly definition inside a [`ReleasesDocument`]
#[derive(Debug, Clone, Copy)]
pub struct AssemblyView<'a> {
    name: &'a str,
    definition: &'a ConfigValue,
}

impl<'a> AssemblyView<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn definition(&self) -> &'a ConfigValue {
        self.definition
    }

    /// Parent assembly this one inherits from
    pub fn basis_assembly(&self) -> Option<&'a str> {
        self.definition
            .lookup(&["basis", "assembly"])
            .and_then(ConfigValue::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Raw `basis.brew_event` value when it is set
    pub fn basis_brew_event(&self) -> Option<&'a ConfigValue> {
        self.definition
            .lookup(&["basis", "brew_event"])
            .filter(|event| event.is_truthy())
    }

    /// Top-level field of the definition (`group`, `rhcos`, `issues`, ...)
    pub fn field(&self, name: &str) -> Option<&'a ConfigValue> {
        self.definition.get(name)
    }

    pub fn group(&self) -> Option<&'a ConfigValue> {
        self.field("group")
    }

    /// Member overrides of the given kind, in document order
    pub fn members(&self, kind: MemberKind) -> impl Iterator<Item = MemberOverride<'a>> + 'a {
        self.definition
            .lookup(&["members", kind.members_key()])
            .map(ConfigValue::items)
            .unwrap_or_default()
            .iter()
            .map(|entry| MemberOverride {
                distgit_key: entry.get("distgit_key").and_then(ConfigValue::as_str),
                metadata: entry.get("metadata"),
            })
    }
}

/// A `members.rpms[]` or `members.images[]` entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemberOverride<'a> {
    pub distgit_key: Option<&'a str>,
    pub metadata: Option<&'a ConfigValue>,
}

impl MemberOverride<'_> {
    /// Whether this override targets the given component
    pub fn applies_to(&self, distgit_key: &str) -> bool {
        matches!(self.distgit_key, Some(key) if key == WILDCARD_KEY || key == distgit_key)
    }

    pub fn is_wildcard(&self) -> bool {
        self.distgit_key == Some(WILDCARD_KEY)
    }
}

/// Kind of group member a metadata override applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Rpm,
    Image,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Rpm => "rpm",
            MemberKind::Image => "image",
        }
    }

    /// Key of the override list under `members`
    pub fn members_key(&self) -> &'static str {
        match self {
            MemberKind::Rpm => "rpms",
            MemberKind::Image => "images",
        }
    }
}

impl FromStr for MemberKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rpm" => Ok(MemberKind::Rpm),
            "image" => Ok(MemberKind::Image),
            _ => Err(Error::UnknownMemberKind {
                kind: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
