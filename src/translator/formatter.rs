//! Rendering of replacement values.

use serde_json::{Map, Value};
use std::sync::Arc;

/// Converts one replacement value into display text.
///
/// Arguments are the resolution language, the value being rendered, and the
/// full token → value replacement map.
pub type Formatter = Arc<dyn Fn(&str, &Value, &Map<String, Value>) -> String + Send + Sync>;

/// Largest magnitude at which every integer is exactly representable as f64
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Built-in formatter.
///
/// Strings pass through unchanged; everything else (arrays, objects,
/// numbers, booleans, null) renders as its JSON text. Integral floats render
/// without a fraction, so `1.0` becomes `1`.
pub fn default_formatter(_language: &str, value: &Value, _replacements: &Map<String, Value>) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => normalize_numbers(other).to_string(),
    }
}

fn normalize_numbers(value: &Value) -> Value {
    match value {
        Value::Number(number) => match number.as_f64() {
            Some(float)
                if number.is_f64() && float.fract() == 0.0 && float.abs() <= MAX_SAFE_INTEGER =>
            {
                Value::from(float as i64)
            }
            _ => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), normalize_numbers(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}
