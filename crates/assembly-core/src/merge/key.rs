//! Key suffix directives
//!
//! A mapping key in a dominant layer may end in a marker that changes how its
//! value is combined with the base layer:
//!
//! - `key!` replaces the base value outright
//! - `key?` only supplies a value when the base has none
//! - `key` merges recursively

/// Suffix marking a full override
pub const FULL_OVERRIDE_SUFFIX: char = '!';

/// Suffix marking a default-only value
pub const DEFAULT_ONLY_SUFFIX: char = '?';

/// How a dominant key's value is combined with the base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirective {
    Plain,
    FullOverride,
    DefaultOnly,
}

/// A mapping key split into its stored name and directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeKey<'a> {
    pub name: &'a str,
    pub directive: KeyDirective,
}

impl<'a> MergeKey<'a> {
    /// Classify a raw key. Only one trailing marker is stripped.
    pub fn parse(raw: &'a str) -> Self {
        if let Some(name) = raw.strip_suffix(FULL_OVERRIDE_SUFFIX) {
            Self {
                name,
                directive: KeyDirective::FullOverride,
            }
        } else if let Some(name) = raw.strip_suffix(DEFAULT_ONLY_SUFFIX) {
            Self {
                name,
                directive: KeyDirective::DefaultOnly,
            }
        } else {
            Self {
                name: raw,
                directive: KeyDirective::Plain,
            }
        }
    }
}
