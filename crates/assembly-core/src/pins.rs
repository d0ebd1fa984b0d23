//! Build pins declared in resolved configs
//!
//! Assemblies pin builds in two places: `dependencies.rpms` lists (group,
//! member metadata and RHCOS configs) and the `is` stanza of a member's
//! metadata. These helpers read the pins out of an already resolved config.

use std::collections::BTreeMap;
use std::fmt;

use assembly_model::{ConfigValue, MemberKind};

use crate::error::{Error, Result};

/// A build's name-version-release, with optional epoch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nvr {
    pub name: String,
    pub version: String,
    pub release: String,
    pub epoch: Option<u64>,
}

impl Nvr {
    /// Parse `N-V-R`, `E:N-V-R`, `N-V-R:E` or `N-E:V-R`.
    ///
    /// Anything up to the last `/` is dropped first.
    ///
    /// ```
    /// use assembly_core::Nvr;
    ///
    /// let nvr = Nvr::parse("openshift-clients-4.8.0-202106.p0.el8").unwrap();
    /// assert_eq!(nvr.name, "openshift-clients");
    /// assert_eq!(nvr.version, "4.8.0");
    /// assert_eq!(nvr.release, "202106.p0.el8");
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let nvre = input.rsplit('/').next().unwrap_or(input);
        let (nvr, mut epoch) = split_epoch(nvre).ok_or_else(|| invalid(input, "more than one ':'"))?;

        let mut parts = nvr.rsplitn(3, '-');
        let (Some(release), Some(mut version), Some(name)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid(input, "expected name-version-release"));
        };

        if epoch.is_empty() {
            if let Some((e, v)) = version.split_once(':') {
                epoch = e;
                version = v;
            }
        }

        let epoch = if epoch.is_empty() {
            None
        } else {
            Some(
                epoch
                    .parse::<u64>()
                    .map_err(|_| invalid(input, &format!("invalid epoch '{epoch}'")))?,
            )
        };

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
            release: release.to_string(),
            epoch,
        })
    }
}

impl fmt::Display for Nvr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.name, self.version, self.release)
    }
}

/// Split off an epoch given as `E:` prefix or `:E` suffix.
///
/// `N-E:V-R` is left for the caller since the epoch sits inside the
/// version field. `None` when the string has more than one `:`.
fn split_epoch(nvre: &str) -> Option<(&str, &str)> {
    match nvre.matches(':').count() {
        0 => Some((nvre, "")),
        1 => {
            let (nvr, epoch) = nvre.rsplit_once(':')?;
            if !epoch.contains('-') {
                Some((nvr, epoch))
            } else if !nvr.contains('-') {
                Some((epoch, nvr))
            } else {
                Some((nvre, ""))
            }
        }
        _ => None,
    }
}

fn invalid(nvr: &str, reason: &str) -> Error {
    Error::InvalidNvr {
        nvr: nvr.to_string(),
        reason: reason.to_string(),
    }
}

/// Packages pinned for a RHEL version under `dependencies.rpms`.
///
/// Keys are package names, values the pinned NVRs. Entries without an
/// `el<N>` key are ignored; a later entry for the same package wins.
pub fn dependency_nvrs(config: &ConfigValue, el_version: u32) -> Result<BTreeMap<String, String>> {
    let el_key = format!("el{el_version}");
    let mut pins = BTreeMap::new();
    let dependencies = config.lookup(&["dependencies", "rpms"]).map(ConfigValue::items);
    for dependency in dependencies.unwrap_or_default() {
        let Some(nvr) = dependency.get(&el_key).and_then(ConfigValue::as_str) else {
            continue;
        };
        if nvr.is_empty() {
            continue;
        }
        let parsed = Nvr::parse(nvr)?;
        pins.insert(parsed.name, nvr.to_string());
    }
    Ok(pins)
}

/// The build a member is pinned to through its `is` stanza.
///
/// Images pin with `is: <nvr>` or `is: {nvr: <nvr>}`. RPMs pin per RHEL
/// version with `is: {el8: <nvr>}`, so `el_version` is required for them.
/// Returns `Ok(None)` when the member is not pinned.
pub fn pinned_nvr(
    meta_config: &ConfigValue,
    kind: MemberKind,
    distgit_key: &str,
    el_version: Option<u32>,
) -> Result<Option<String>> {
    let Some(is) = meta_config.get("is").filter(|is| is.is_truthy()) else {
        return Ok(None);
    };

    match kind {
        MemberKind::Rpm => {
            let el_version = el_version.ok_or_else(|| Error::MissingElVersion {
                distgit_key: distgit_key.to_string(),
            })?;
            Ok(is
                .get(&format!("el{el_version}"))
                .and_then(ConfigValue::as_str)
                .filter(|nvr| !nvr.is_empty())
                .map(str::to_string))
        }
        MemberKind::Image => match is {
            ConfigValue::String(nvr) => Ok(Some(nvr.clone())),
            other => other
                .get("nvr")
                .and_then(ConfigValue::as_str)
                .filter(|nvr| !nvr.is_empty())
                .map(|nvr| Some(nvr.to_string()))
                .ok_or_else(|| Error::MissingPin {
                    distgit_key: distgit_key.to_string(),
                    field: "nvr".to_string(),
                }),
        },
    }
}
