//! Deep merge of config trees
//!
//! [`merger`] layers a dominant tree `a` over a base tree `b` and returns a
//! new tree; neither operand is modified.
//!
//! 1. A scalar in `a` wins outright, at any depth.
//! 2. A sequence in `a` is unioned onto a sequence in `b`: `b`'s elements in
//!    order, then `a`'s elements not already present. Numbers and bools
//!    compare by numeric value, so `1`, `1.0` and `true` are one element.
//!    When the result starts with a string or number it is returned sorted.
//! 3. A mapping in `a` is merged key by key onto a mapping in `b`, honouring
//!    the `!` and `?` key suffixes (see [`key`]).
//!
//! When the shapes of `a` and `b` differ, `a` is returned unchanged.

pub mod key;

use std::cmp::Ordering;

use assembly_model::ConfigValue;

use crate::error::{Error, Result};
pub use key::{KeyDirective, MergeKey};

/// Merge `a` over `b`, with `a` dominant.
///
/// ```
/// use assembly_core::merger;
/// use assembly_model::ConfigValue;
///
/// let a: ConfigValue = serde_json::json!({"r": [1, 2], "x!": {"y": 1}}).into();
/// let b: ConfigValue = serde_json::json!({"r": [1, 3, 4], "x": {"z": 2}}).into();
/// let c = merger(&a, &b).unwrap();
/// assert_eq!(c, ConfigValue::from(serde_json::json!({"r": [1, 2, 3, 4], "x": {"y": 1}})));
/// ```
pub fn merger(a: &ConfigValue, b: &ConfigValue) -> Result<ConfigValue> {
    match a {
        ConfigValue::Sequence(overlay) => {
            let ConfigValue::Sequence(base) = b else {
                return Ok(a.clone());
            };
            let mut merged = base.clone();
            for entry in overlay {
                if !merged.iter().any(|existing| values_equal(existing, entry)) {
                    merged.push(entry.clone());
                }
            }
            sort_scalar_sequence(&mut merged)?;
            Ok(ConfigValue::Sequence(merged))
        }
        ConfigValue::Mapping(overlay) => {
            let ConfigValue::Mapping(base) = b else {
                return Ok(a.clone());
            };
            let mut merged = base.clone();
            for (raw_key, value) in overlay {
                let key = MergeKey::parse(raw_key);
                match key.directive {
                    KeyDirective::FullOverride => {
                        merged.insert(key.name.to_string(), value.clone());
                    }
                    KeyDirective::DefaultOnly => {
                        if !merged.contains_key(key.name) {
                            merged.insert(key.name.to_string(), value.clone());
                        }
                    }
                    KeyDirective::Plain => {
                        let combined = match merged.get(key.name) {
                            Some(existing) => merger(value, existing)?,
                            None => value.clone(),
                        };
                        merged.insert(key.name.to_string(), combined);
                    }
                }
            }
            Ok(ConfigValue::Mapping(merged))
        }
        scalar => Ok(scalar.clone()),
    }
}

/// Sort in place when the first element is a string or a number.
///
/// Lists of structures, or lists led by a bool, null or byte-string, keep
/// their merge order.
fn sort_scalar_sequence(items: &mut [ConfigValue]) -> Result<()> {
    let Some(first) = items.first() else {
        return Ok(());
    };
    if !matches!(
        first,
        ConfigValue::String(_) | ConfigValue::Integer(_) | ConfigValue::Float(_)
    ) {
        return Ok(());
    }
    if let Some(offending) = items
        .iter()
        .find(|item| compare_scalars(first, item).is_none())
    {
        return Err(Error::UnorderableSequence {
            first: describe(first),
            offending: describe(offending),
        });
    }
    items.sort_by(|x, y| compare_scalars(x, y).unwrap_or(Ordering::Equal));
    Ok(())
}

/// Ordering between two sortable scalars; `None` when they are not comparable.
fn compare_scalars(x: &ConfigValue, y: &ConfigValue) -> Option<Ordering> {
    match (x, y) {
        (ConfigValue::String(a), ConfigValue::String(b)) => Some(a.cmp(b)),
        (ConfigValue::Integer(a), ConfigValue::Integer(b)) => Some(a.cmp(b)),
        _ => {
            let (a, b) = (as_number(x)?, as_number(y)?);
            Some(a.partial_cmp(&b).unwrap_or(Ordering::Equal))
        }
    }
}

fn as_number(value: &ConfigValue) -> Option<f64> {
    match value {
        ConfigValue::Integer(i) => Some(*i as f64),
        ConfigValue::Float(f) => Some(*f),
        ConfigValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Equality used for list union; numeric across `Integer`, `Float` and `Bool`
fn values_equal(x: &ConfigValue, y: &ConfigValue) -> bool {
    match (x, y) {
        (ConfigValue::Sequence(xs), ConfigValue::Sequence(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (ConfigValue::Mapping(xm), ConfigValue::Mapping(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(key, x)| ym.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => match (as_number(x), as_number(y)) {
            (Some(a), Some(b)) => a == b,
            _ => x == y,
        },
    }
}

fn describe(value: &ConfigValue) -> String {
    match value {
        ConfigValue::String(s) => format!("string {s:?}"),
        ConfigValue::Integer(i) => format!("integer {i}"),
        ConfigValue::Float(f) => format!("float {f}"),
        other => other.kind().to_string(),
    }
}
