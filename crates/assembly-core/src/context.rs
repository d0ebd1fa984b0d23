//! Per-invocation assembly context
//!
//! `AssemblyContext` settles which assembly a run operates on and which Brew
//! event it is constrained to, then answers the resolution queries for that
//! assembly. It is computed once, right after the group config is loaded.

use assembly_model::{AssemblyName, ConfigValue, MemberKind, ReleasesDocument, STREAM_ASSEMBLY};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::issues::{IssueOverrides, assembly_issue_overrides};
use crate::resolve::{
    assembly_basis_event, assembly_config_finalize, assembly_group_config,
    assembly_issues_config, assembly_metadata_config, assembly_rhcos_config,
};

fn default_assembly() -> Option<String> {
    Some(STREAM_ASSEMBLY.to_string())
}

/// Assembly settings supplied by the caller (command line or config)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblySettings {
    /// Requested assembly; defaults to `stream`
    #[serde(default = "default_assembly")]
    pub assembly: Option<String>,

    /// Force assembly handling even if the group does not enable it
    #[serde(default)]
    pub enable_assemblies: bool,

    /// Explicit Brew event to constrain build lookups to
    #[serde(default)]
    pub brew_event: Option<i64>,
}

impl Default for AssemblySettings {
    fn default() -> Self {
        Self {
            assembly: default_assembly(),
            enable_assemblies: false,
            brew_event: None,
        }
    }
}

/// The assembly a run operates on, with its resolved group config and
/// effective Brew event.
#[derive(Debug, Clone)]
pub struct AssemblyContext {
    releases: ReleasesDocument,
    assembly: Option<AssemblyName>,
    group_config: ConfigValue,
    basis_event: Option<i64>,
    brew_event: Option<i64>,
}

impl AssemblyContext {
    /// Settle the assembly for a run.
    ///
    /// Assemblies only apply when the group enables them
    /// (`assemblies.enabled` in the resolved group config) or the caller
    /// forces them; otherwise the requested assembly is ignored. An enabled
    /// assembly name must be valid. When the assembly is anchored to a basis
    /// event, that event becomes the run's Brew event, and asking for a
    /// different Brew event as well is an error.
    pub fn new(
        settings: AssemblySettings,
        releases: ReleasesDocument,
        base_group_config: &ConfigValue,
    ) -> Result<Self> {
        let requested = settings.assembly.as_deref().filter(|name| !name.is_empty());

        let group_config = assembly_group_config(&releases, requested, base_group_config)?;
        let enabled = settings.enable_assemblies
            || group_config
                .lookup(&["assemblies", "enabled"])
                .is_some_and(ConfigValue::is_truthy);

        let (assembly, group_config) = if enabled {
            (requested.map(AssemblyName::parse).transpose()?, group_config)
        } else {
            if let Some(name) = requested {
                tracing::debug!(assembly = name, "Assemblies are not enabled for this group; ignoring assembly");
            }
            (None, base_group_config.clone())
        };

        let basis_event = assembly_basis_event(&releases, assembly.as_ref().map(AssemblyName::as_str))?;
        let brew_event = match (basis_event, settings.brew_event) {
            (Some(basis_event), Some(brew_event)) => {
                return Err(Error::BrewEventConflict {
                    assembly: assembly.map(String::from).unwrap_or_default(),
                    basis_event,
                    brew_event,
                });
            }
            (Some(basis_event), None) => {
                tracing::warn!(
                    assembly = ?assembly.as_ref().map(AssemblyName::as_str),
                    brew_event = basis_event,
                    "Constraining brew event to assembly basis"
                );
                Some(basis_event)
            }
            (None, brew_event) => brew_event,
        };

        Ok(Self {
            releases,
            assembly,
            group_config,
            basis_event,
            brew_event,
        })
    }

    pub fn assembly(&self) -> Option<&AssemblyName> {
        self.assembly.as_ref()
    }

    pub fn assembly_name(&self) -> Option<&str> {
        self.assembly.as_ref().map(AssemblyName::as_str)
    }

    pub fn releases(&self) -> &ReleasesDocument {
        &self.releases
    }

    /// Group config with the assembly chain applied
    pub fn group_config(&self) -> &ConfigValue {
        &self.group_config
    }

    pub fn basis_event(&self) -> Option<i64> {
        self.basis_event
    }

    /// Brew event build lookups are constrained to, if any
    pub fn brew_event(&self) -> Option<i64> {
        self.brew_event
    }

    /// Strict runs are those on a named, non-builtin assembly
    pub fn is_strict(&self) -> bool {
        self.assembly.as_ref().is_some_and(|name| !name.is_builtin())
    }

    /// Release suffix identifying builds of this assembly.
    ///
    /// Assemblies anchored to a basis event take their builds from `stream`.
    pub fn build_assembly_suffix(&self) -> Option<String> {
        let name = self.assembly_name()?;
        if self.basis_event.is_some() {
            Some(format!(".assembly.{STREAM_ASSEMBLY}"))
        } else {
            Some(format!(".assembly.{name}"))
        }
    }

    pub fn metadata_config(
        &self,
        kind: MemberKind,
        distgit_key: &str,
        meta_config: &ConfigValue,
    ) -> Result<ConfigValue> {
        assembly_metadata_config(&self.releases, self.assembly_name(), kind, distgit_key, meta_config)
    }

    pub fn rhcos_config(&self) -> Result<Option<ConfigValue>> {
        assembly_rhcos_config(&self.releases, self.assembly_name())
    }

    pub fn issues_config(&self) -> Result<Option<ConfigValue>> {
        assembly_issues_config(&self.releases, self.assembly_name())
    }

    pub fn issue_overrides(&self) -> Result<IssueOverrides> {
        assembly_issue_overrides(&self.releases, self.assembly_name())
    }

    pub fn finalize(&self) -> Result<()> {
        assembly_config_finalize(&self.releases, self.assembly_name())
    }
}
