//! Assembly chain resolution
//!
//! Every entry point follows the same recursive shape: guard against basis
//! cycles, resolve the ancestor named by `basis.assembly` first, then layer
//! the requested assembly's own contribution over the result with
//! [`merger`]. The closer an assembly is to the one requested, the more
//! dominant its layer; the caller's starting config is the weakest layer of
//! all.
//!
//! A missing assembly name, an unstructured releases document, or an
//! assembly the document does not define are not errors: the caller's
//! input comes back unchanged.

use assembly_model::{AssemblyView, ConfigValue, MemberKind, ReleasesDocument};

use crate::cycle::check_recursion;
use crate::error::{Error, Result};
use crate::merge::merger;

/// The assembly name when resolution should happen at all
fn active_assembly<'a>(releases: &ReleasesDocument, assembly: Option<&'a str>) -> Option<&'a str> {
    assembly.filter(|name| !name.is_empty() && releases.is_structured())
}

/// Compute the group config for `assembly` on top of `group_config`.
///
/// Each assembly in the chain contributes its `group` stanza. An assembly
/// with an empty or missing `group` leaves the accumulated config as is.
pub fn assembly_group_config(
    releases: &ReleasesDocument,
    assembly: Option<&str>,
    group_config: &ConfigValue,
) -> Result<ConfigValue> {
    let Some(name) = active_assembly(releases, assembly) else {
        return Ok(group_config.clone());
    };
    check_recursion(releases, name)?;
    let Some(target) = releases.assembly(name) else {
        return Ok(group_config.clone());
    };

    let accumulated = match target.basis_assembly() {
        Some(parent) => assembly_group_config(releases, Some(parent), group_config)?,
        None => group_config.clone(),
    };

    match target.group().filter(|group| group.is_truthy()) {
        Some(group) => {
            tracing::debug!(assembly = name, "Applying assembly group config");
            merger(group, &accumulated)
        }
        None => Ok(accumulated),
    }
}

/// Compute a member's metadata config for `assembly` on top of `meta_config`.
///
/// Each assembly in the chain contributes, in list order, the `metadata` of
/// every `members.<kind>s` entry whose `distgit_key` is `*` or equals
/// `distgit_key`.
pub fn assembly_metadata_config(
    releases: &ReleasesDocument,
    assembly: Option<&str>,
    kind: MemberKind,
    distgit_key: &str,
    meta_config: &ConfigValue,
) -> Result<ConfigValue> {
    let Some(name) = active_assembly(releases, assembly) else {
        return Ok(meta_config.clone());
    };
    check_recursion(releases, name)?;
    let Some(target) = releases.assembly(name) else {
        return Ok(meta_config.clone());
    };

    let mut config = match target.basis_assembly() {
        Some(parent) => {
            assembly_metadata_config(releases, Some(parent), kind, distgit_key, meta_config)?
        }
        None => meta_config.clone(),
    };

    for member in target.members(kind).filter(|member| member.applies_to(distgit_key)) {
        let Some(metadata) = member.metadata.filter(|metadata| metadata.is_truthy()) else {
            continue;
        };
        tracing::debug!(
            assembly = name,
            %kind,
            distgit_key,
            wildcard = member.is_wildcard(),
            "Applying assembly member metadata"
        );
        config = merger(metadata, &config)?;
    }
    Ok(config)
}

/// Computed `rhcos` config for `assembly`, or `None` when nothing in the
/// chain defines one.
pub fn assembly_rhcos_config(
    releases: &ReleasesDocument,
    assembly: Option<&str>,
) -> Result<Option<ConfigValue>> {
    assembly_field("rhcos", releases, assembly)
}

/// Computed `issues` config (`include` / `exclude` lists) for `assembly`,
/// or `None` when nothing in the chain defines one.
pub fn assembly_issues_config(
    releases: &ReleasesDocument,
    assembly: Option<&str>,
) -> Result<Option<ConfigValue>> {
    assembly_field("issues", releases, assembly)
}

/// Merge a top-level assembly field down the basis chain.
pub fn assembly_field(
    field: &str,
    releases: &ReleasesDocument,
    assembly: Option<&str>,
) -> Result<Option<ConfigValue>> {
    let Some(name) = active_assembly(releases, assembly) else {
        return Ok(None);
    };
    check_recursion(releases, name)?;
    let Some(target) = releases.assembly(name) else {
        return Ok(None);
    };

    let inherited = match target.basis_assembly() {
        Some(parent) => assembly_field(field, releases, Some(parent))?,
        None => None,
    };

    match (target.field(field), inherited) {
        (Some(own), Some(inherited)) => merger(own, &inherited).map(Some),
        (Some(own), None) => Ok(Some(own.clone())),
        (None, inherited) => Ok(inherited),
    }
}

/// The Brew event an assembly is anchored to.
///
/// Walks up the basis chain and returns the first `basis.brew_event`
/// found, or `None` when no assembly in the chain sets one.
pub fn assembly_basis_event(
    releases: &ReleasesDocument,
    assembly: Option<&str>,
) -> Result<Option<i64>> {
    let Some(name) = active_assembly(releases, assembly) else {
        return Ok(None);
    };
    check_recursion(releases, name)?;
    let Some(target) = releases.assembly(name) else {
        return Ok(None);
    };

    if let Some(event) = target.basis_brew_event() {
        return brew_event_value(&target, event).map(Some);
    }
    assembly_basis_event(releases, target.basis_assembly())
}

/// Hook run once all component metadata has been loaded.
///
/// Only the basis chain is validated for now; adjusting already
/// interpreted metadata is not part of this engine.
pub fn assembly_config_finalize(releases: &ReleasesDocument, assembly: Option<&str>) -> Result<()> {
    match active_assembly(releases, assembly) {
        Some(name) => check_recursion(releases, name),
        None => Ok(()),
    }
}

fn brew_event_value(target: &AssemblyView<'_>, event: &ConfigValue) -> Result<i64> {
    let parsed = match event {
        ConfigValue::Integer(i) => Some(*i),
        ConfigValue::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(*f as i64),
        ConfigValue::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse().ok()
        }
        _ => None,
    };
    parsed.ok_or_else(|| Error::InvalidBrewEvent {
        assembly: target.name().to_string(),
        value: format!("{event:?}"),
    })
}
