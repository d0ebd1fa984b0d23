//! Explicit issue include/exclude lists from the assembly `issues` stanza

use std::collections::BTreeSet;

use assembly_model::{ConfigValue, ReleasesDocument};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::resolve::assembly_issues_config;

/// Issue ids an assembly forces in or out of a bug sweep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueOverrides {
    include: BTreeSet<u64>,
    exclude: BTreeSet<u64>,
}

impl IssueOverrides {
    /// Read `include` and `exclude` from a resolved issues config.
    ///
    /// Only numeric ids are honoured; tracker keys such as `OCPBUGS-1` are
    /// skipped. An id listed on both sides is an error.
    pub fn from_config(config: Option<&ConfigValue>) -> Result<Self> {
        let Some(config) = config else {
            return Ok(Self::default());
        };
        let include = numeric_ids(config.get_or_missing("include"));
        let exclude = numeric_ids(config.get_or_missing("exclude"));

        let conflicts: Vec<u64> = include.intersection(&exclude).copied().collect();
        if !conflicts.is_empty() {
            return Err(Error::IssueConflict { ids: conflicts });
        }
        Ok(Self { include, exclude })
    }

    pub fn include(&self) -> &BTreeSet<u64> {
        &self.include
    }

    pub fn exclude(&self) -> &BTreeSet<u64> {
        &self.exclude
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Apply the overrides to a list of candidate ids.
    ///
    /// Excluded ids are dropped, candidate order is kept, and included ids
    /// not already present are appended in ascending order.
    pub fn apply(&self, candidates: &[u64]) -> Vec<u64> {
        let mut result: Vec<u64> = candidates
            .iter()
            .copied()
            .filter(|id| !self.exclude.contains(id))
            .collect();
        for id in &self.include {
            if !result.contains(id) {
                result.push(*id);
            }
        }
        result
    }
}

/// Resolve the issues stanza of `assembly` and extract its overrides.
pub fn assembly_issue_overrides(
    releases: &ReleasesDocument,
    assembly: Option<&str>,
) -> Result<IssueOverrides> {
    let config = assembly_issues_config(releases, assembly)?;
    let overrides = IssueOverrides::from_config(config.as_ref())?;
    if !overrides.is_empty() {
        tracing::debug!(
            assembly = ?assembly,
            include = ?overrides.include,
            exclude = ?overrides.exclude,
            "Assembly defines explicit issues"
        );
    }
    Ok(overrides)
}

fn numeric_ids(entries: &ConfigValue) -> BTreeSet<u64> {
    entries.items().iter().filter_map(issue_id).collect()
}

fn issue_id(entry: &ConfigValue) -> Option<u64> {
    match entry.get("id")? {
        ConfigValue::Integer(i) => u64::try_from(*i).ok(),
        ConfigValue::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse().ok()
        }
        _ => None,
    }
}
