//! The per-language translation tree.

use crate::error::{TranslatorError, TranslatorResult};
use crate::translator::path::{lookup_path, merge_maps};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Translations keyed by language code.
///
/// Each language maps to an arbitrarily nested object whose string leaves are
/// message templates. Language order is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(Map<String, Value>);

impl Translations {
    /// Create an empty translation tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Build translations from a JSON value.
    ///
    /// # Errors
    /// Returns `InvalidTranslations` if the root is not an object.
    pub fn from_value(value: Value) -> TranslatorResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(TranslatorError::InvalidTranslations {
                found: json_kind(&other).to_string(),
            }),
        }
    }

    /// Parse translations from a JSON string.
    pub fn from_json_str(json: &str) -> TranslatorResult<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Load translations from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> TranslatorResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| TranslatorError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Language codes in insertion order
    pub fn languages(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    /// The subtree for one language, if present
    pub fn language(&self, language: &str) -> Option<&Value> {
        self.0.get(language)
    }

    /// Resolve a dotted key to a string template within one language.
    ///
    /// Returns `None` when the language or any segment is missing, or when
    /// the key points at something other than a string.
    pub fn template(&self, language: &str, key: &str) -> Option<&str> {
        self.language(language)
            .and_then(|subtree| lookup_path(subtree, key))
            .and_then(Value::as_str)
    }

    /// Return a copy with `language` replaced by `subtree`
    pub fn with_language(&self, language: &str, subtree: Value) -> Self {
        let mut next = self.clone();
        next.0.insert(language.to_string(), subtree);
        next
    }

    /// Return a deep-merged copy of `self` and `other`
    pub fn merged(&self, other: &Translations) -> Self {
        let mut next = self.clone();
        merge_maps(&mut next.0, &other.0);
        next
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert into a JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Translations {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Translations {
    type Error = TranslatorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn sample() -> Translations {
        Translations::from_value(json!({
            "en": { "foo": "bar", "nested": { "key": "value" }, "count": 3 },
            "de": { "foo": "baz" }
        }))
        .unwrap()
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = Translations::from_value(json!(["en"])).unwrap_err();
        assert!(matches!(err, TranslatorError::InvalidTranslations { ref found } if found == "array"));
    }

    #[test]
    fn test_languages_in_insertion_order() {
        assert_eq!(sample().languages(), vec!["en", "de"]);
    }

    #[test]
    fn test_template_lookup() {
        let translations = sample();
        assert_eq!(translations.template("en", "foo"), Some("bar"));
        assert_eq!(translations.template("en", "nested.key"), Some("value"));
        assert_eq!(translations.template("de", "foo"), Some("baz"));
    }

    #[test]
    fn test_template_misses() {
        let translations = sample();
        assert_eq!(translations.template("en", "nested"), None);
        assert_eq!(translations.template("en", "count"), None);
        assert_eq!(translations.template("ru", "foo"), None);
    }

    #[test]
    fn test_with_language_replaces_subtree() {
        let translations = sample().with_language("de", json!({ "ding": "dong" }));
        assert_eq!(translations.language("de"), Some(&json!({ "ding": "dong" })));
        assert_eq!(translations.template("en", "foo"), Some("bar"));
    }

    #[test]
    fn test_merged_does_not_touch_original() {
        let original = sample();
        let extra = Translations::from_value(json!({ "de": { "yolo": "swag" } })).unwrap();
        let merged = original.merged(&extra);

        assert_eq!(merged.language("de"), Some(&json!({ "foo": "baz", "yolo": "swag" })));
        assert_eq!(original, sample());
    }

    #[test]
    fn test_merged_with_empty_is_identity() {
        assert_eq!(sample().merged(&Translations::new()), sample());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "en": {{ "hello": "Hello" }} }}"#).unwrap();

        let translations = Translations::from_file(file.path()).unwrap();
        assert_eq!(translations.template("en", "hello"), Some("Hello"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Translations::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TranslatorError::Io { .. }));
    }

    #[test]
    fn test_from_json_str_invalid() {
        let err = Translations::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, TranslatorError::Json(_)));
    }

    #[test]
    fn test_serializes_transparently() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["de"]["foo"], "baz");
    }
}
