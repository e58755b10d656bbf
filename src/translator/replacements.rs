//! Replacement values for template interpolation.

use serde_json::{Map, Value};
use tracing::debug;

/// Values substituted into a template.
///
/// Positional values are addressed by 1-based tokens (`{{1}}`, `{{2}}`, …);
/// named values by their key (`{{name}}`).
#[derive(Debug, Clone, PartialEq)]
pub enum Replacements {
    Positional(Vec<Value>),
    Named(Map<String, Value>),
}

impl Replacements {
    /// Positional replacements from anything convertible to JSON values
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Named replacements from `(name, value)` pairs, in the given order
    pub fn named<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Named(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Normalize to an ordered token → value map.
    pub fn to_tokens(&self) -> Map<String, Value> {
        match self {
            Self::Positional(values) => values
                .iter()
                .enumerate()
                .map(|(index, value)| ((index + 1).to_string(), value.clone()))
                .collect(),
            Self::Named(map) => map.clone(),
        }
    }
}

impl Default for Replacements {
    fn default() -> Self {
        Self::Named(Map::new())
    }
}

/// Arrays become positional and objects named replacements. Any other value
/// is not a replacement structure and yields an empty set.
impl From<Value> for Replacements {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(values) => Self::Positional(values),
            Value::Object(map) => Self::Named(map),
            other => {
                debug!("Ignoring malformed replacements: {}", other);
                Self::default()
            }
        }
    }
}
