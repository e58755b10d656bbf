use crate::translator::{Configuration, DEFAULT_DEBOUNCE_MS};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Settings {
    // Languages
    pub language: String,
    pub fallback_language: Option<String>,

    // Rendering
    pub interpolate: bool,

    // Change notification
    pub debounce_changes: u64,

    // Translations source
    pub translations_file: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let language = std::env::var("TRANSLATOR_LANGUAGE").context("TRANSLATOR_LANGUAGE not set")?;
        if language.trim().is_empty() {
            bail!("TRANSLATOR_LANGUAGE must not be empty");
        }

        Ok(Self {
            language,
            fallback_language: std::env::var("TRANSLATOR_FALLBACK_LANGUAGE")
                .ok()
                .filter(|v| !v.trim().is_empty()),

            interpolate: match std::env::var("TRANSLATOR_INTERPOLATE") {
                Ok(v) => parse_bool(&v)
                    .with_context(|| format!("Invalid TRANSLATOR_INTERPOLATE: {}", v))?,
                Err(_) => true,
            },

            debounce_changes: match std::env::var("TRANSLATOR_DEBOUNCE_MS") {
                Ok(v) => v
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid TRANSLATOR_DEBOUNCE_MS: {}", v))?,
                Err(_) => DEFAULT_DEBOUNCE_MS,
            },

            translations_file: std::env::var("TRANSLATIONS_FILE").ok().map(PathBuf::from),
        })
    }

    /// Translator configuration for these settings
    pub fn configuration(&self) -> Configuration {
        let configuration = Configuration::new(self.language.clone())
            .with_interpolate(self.interpolate)
            .with_debounce_changes(self.debounce_changes);

        match &self.fallback_language {
            Some(fallback) => configuration.with_fallback_language(fallback.clone()),
            None => configuration,
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "TRANSLATOR_LANGUAGE",
        "TRANSLATOR_FALLBACK_LANGUAGE",
        "TRANSLATOR_INTERPOLATE",
        "TRANSLATOR_DEBOUNCE_MS",
        "TRANSLATIONS_FILE",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        std::env::set_var("TRANSLATOR_LANGUAGE", "en");

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.language, "en");
        assert_eq!(settings.fallback_language, None);
        assert!(settings.interpolate);
        assert_eq!(settings.debounce_changes, 10);
        assert!(settings.translations_file.is_none());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_all_fields() {
        clear_env();
        std::env::set_var("TRANSLATOR_LANGUAGE", "ru");
        std::env::set_var("TRANSLATOR_FALLBACK_LANGUAGE", "de");
        std::env::set_var("TRANSLATOR_INTERPOLATE", "off");
        std::env::set_var("TRANSLATOR_DEBOUNCE_MS", "0");
        std::env::set_var("TRANSLATIONS_FILE", "/tmp/translations.json");

        let settings = Settings::from_env().unwrap();
        let configuration = settings.configuration();
        assert_eq!(configuration.language, "ru");
        assert_eq!(configuration.fallback_language.as_deref(), Some("de"));
        assert!(!configuration.interpolate);
        assert_eq!(configuration.debounce_changes, 0);
        assert_eq!(settings.translations_file, Some(PathBuf::from("/tmp/translations.json")));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_requires_language() {
        clear_env();
        let err = Settings::from_env().unwrap_err();
        assert!(err.to_string().contains("TRANSLATOR_LANGUAGE not set"));

        std::env::set_var("TRANSLATOR_LANGUAGE", "  ");
        assert!(Settings::from_env().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_invalid_numbers() {
        clear_env();
        std::env::set_var("TRANSLATOR_LANGUAGE", "en");
        std::env::set_var("TRANSLATOR_DEBOUNCE_MS", "-5");
        assert!(Settings::from_env().is_err());
        clear_env();
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(!parse_bool(" no ").unwrap());
        assert!(parse_bool("maybe").is_err());
    }
}
