//! Translation consistency validation.
//!
//! Compares every language against a reference language to find keys that
//! are missing or extra, leaves that cannot be resolved, and templates whose
//! `{{ token }}` placeholders differ from the reference.

use crate::translator::path::{flatten_keys, lookup_path};
use crate::translator::translations::Translations;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a translation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make the tree unusable as a whole
    pub errors: Vec<String>,

    /// Per-key inconsistencies
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translation trees.
pub struct TranslationValidator;

static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate `translations` against `reference_language`.
    ///
    /// Reports an error when the reference language is absent, and warnings
    /// for missing keys, extra keys, non-string leaves and placeholder
    /// mismatches in every other language.
    pub fn validate(translations: &Translations, reference_language: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        let Some(reference) = translations.language(reference_language) else {
            report
                .errors
                .push(format!("Reference language '{}' not found", reference_language));
            return report;
        };

        for language in translations.languages() {
            let Some(subtree) = translations.language(&language) else {
                continue;
            };

            for path in Self::non_string_leaves(subtree) {
                report.warnings.push(format!(
                    "[{}] '{}' is not a string and cannot be translated",
                    language, path
                ));
            }

            if language == reference_language {
                continue;
            }

            let reference_keys: BTreeSet<String> = flatten_keys(reference).into_iter().collect();
            let keys: BTreeSet<String> = flatten_keys(subtree).into_iter().collect();

            for missing in reference_keys.difference(&keys) {
                report
                    .warnings
                    .push(format!("[{}] missing key '{}'", language, missing));
            }
            for extra in keys.difference(&reference_keys) {
                report.warnings.push(format!(
                    "[{}] key '{}' does not exist in '{}'",
                    language, extra, reference_language
                ));
            }

            for key in reference_keys.intersection(&keys) {
                let expected = Self::template_tokens(lookup_path(reference, key));
                let actual = Self::template_tokens(lookup_path(subtree, key));
                if expected != actual {
                    report.warnings.push(format!(
                        "[{}] placeholder mismatch in '{}': expected {:?}, found {:?}",
                        language, key, expected, actual
                    ));
                }
            }
        }

        report
    }

    /// Extract the `{{ token }}` names used by a template
    pub fn extract_tokens(template: &str) -> BTreeSet<String> {
        let regex = TOKEN_REGEX.get_or_init(|| {
            Regex::new(r"\{\{\s*([^{}\s]+)\s*\}\}").expect("token pattern is valid")
        });

        regex
            .captures_iter(template)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }

    fn template_tokens(value: Option<&Value>) -> BTreeSet<String> {
        value
            .and_then(Value::as_str)
            .map(Self::extract_tokens)
            .unwrap_or_default()
    }

    fn non_string_leaves(root: &Value) -> Vec<String> {
        let mut paths = Vec::new();
        Self::collect_non_string(root, String::new(), &mut paths);
        paths
    }

    fn collect_non_string(node: &Value, path: String, paths: &mut Vec<String>) {
        match node {
            Value::Object(map) => {
                for (segment, child) in map {
                    let child_path = if path.is_empty() {
                        segment.clone()
                    } else {
                        format!("{}.{}", path, segment)
                    };
                    Self::collect_non_string(child, child_path, paths);
                }
            }
            Value::String(_) => {}
            _ => paths.push(path),
        }
    }
}
