//! Conversions between [`ConfigValue`] and the serde value types callers
//! usually hold after parsing a document.

use serde_yaml::Value as YamlValue;

use crate::error::{Error, Result};
use crate::value::{ConfigValue, Mapping};

impl TryFrom<YamlValue> for ConfigValue {
    type Error = Error;

    fn try_from(value: YamlValue) -> Result<Self> {
        match value {
            YamlValue::Null => Ok(ConfigValue::Null),
            YamlValue::Bool(b) => Ok(ConfigValue::Bool(b)),
            YamlValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(ConfigValue::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(ConfigValue::Float(f))
                } else {
                    Err(Error::UnsupportedValue {
                        kind: format!("number {n}"),
                    })
                }
            }
            YamlValue::String(s) => Ok(ConfigValue::String(s)),
            YamlValue::Sequence(items) => items
                .into_iter()
                .map(ConfigValue::try_from)
                .collect::<Result<Vec<_>>>()
                .map(ConfigValue::Sequence),
            YamlValue::Mapping(entries) => {
                let mut map = Mapping::new();
                for (key, value) in entries {
                    let key = match key {
                        YamlValue::String(s) => s,
                        other => {
                            return Err(Error::NonStringKey {
                                key: format!("{other:?}"),
                            });
                        }
                    };
                    map.insert(key, ConfigValue::try_from(value)?);
                }
                Ok(ConfigValue::Mapping(map))
            }
            YamlValue::Tagged(tagged) => Err(Error::UnsupportedValue {
                kind: format!("tagged value {}", tagged.tag),
            }),
        }
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ConfigValue::Null,
            serde_json::Value::Bool(b) => ConfigValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => ConfigValue::String(s),
            serde_json::Value::Array(items) => {
                ConfigValue::Sequence(items.into_iter().map(ConfigValue::from).collect())
            }
            serde_json::Value::Object(map) => ConfigValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, ConfigValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl ConfigValue {
    /// Parse a YAML string into a config tree.
    ///
    /// Convenience for callers and tests that already hold the document text;
    /// locating and reading files is left to the caller.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let value: YamlValue = serde_yaml::from_str(source)?;
        ConfigValue::try_from(value)
    }
}
