//! Error types for translator construction and translation loading.
//!
//! Resolution itself never fails: missing keys and languages are rendered
//! through the placeholder strategy. These errors only cover the inputs a
//! translator is built from.

use thiserror::Error;

/// Errors that can occur while building a translator or loading translations
#[derive(Error, Debug)]
pub enum TranslatorError {
    /// The configuration carried an empty language code
    #[error("Language must not be empty")]
    EmptyLanguage,

    /// The translations root was not a JSON object
    #[error("Translations must be a JSON object keyed by language, got {found}")]
    InvalidTranslations { found: String },

    /// Failed to read a translations file
    #[error("Failed to read translations file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse translations JSON
    #[error("Failed to parse translations JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for translator operations
pub type TranslatorResult<T> = Result<T, TranslatorError>;
