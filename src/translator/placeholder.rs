//! Fallback rendering for unresolvable keys.

use serde_json::{Map, Value};
use std::sync::Arc;

/// Produces the text shown when a key cannot be resolved.
///
/// Arguments are the resolution language, the requested key and the
/// replacement map of the call.
pub type Placeholder = Arc<dyn Fn(&str, &str, &Map<String, Value>) -> String + Send + Sync>;

/// Built-in placeholder: `{ <language>.<key> }`
pub fn default_placeholder(language: &str, key: &str, _replacements: &Map<String, Value>) -> String {
    format!("{{ {}.{} }}", language, key)
}
