//! Translator configuration and per-call options.

use crate::translator::formatter::{default_formatter, Formatter};
use crate::translator::interpolator::{default_interpolator, Interpolator};
use crate::translator::placeholder::{default_placeholder, Placeholder};
use crate::translator::replacements::Replacements;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default debounce interval for change notifications, in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 10;

/// Translator configuration.
///
/// Treated as an immutable snapshot: the translator replaces it wholesale on
/// every change.
#[derive(Clone)]
pub struct Configuration {
    /// Current language (never empty)
    pub language: String,

    /// Language consulted when a key is missing from the current one
    pub fallback_language: Option<String>,

    /// Whether templates are interpolated
    pub interpolate: bool,

    /// Change notification debounce in milliseconds (0 disables debouncing)
    pub debounce_changes: u64,

    pub formatter: Formatter,
    pub interpolator: Interpolator,
    pub placeholder: Placeholder,
}

impl Configuration {
    /// Create a configuration for `language` with all other fields defaulted
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            fallback_language: None,
            interpolate: true,
            debounce_changes: DEFAULT_DEBOUNCE_MS,
            formatter: Arc::new(default_formatter),
            interpolator: Arc::new(default_interpolator),
            placeholder: Arc::new(default_placeholder),
        }
    }

    pub fn with_fallback_language(mut self, language: impl Into<String>) -> Self {
        self.fallback_language = Some(language.into());
        self
    }

    pub fn with_interpolate(mut self, interpolate: bool) -> Self {
        self.interpolate = interpolate;
        self
    }

    pub fn with_debounce_changes(mut self, millis: u64) -> Self {
        self.debounce_changes = millis;
        self
    }

    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    pub fn with_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Debounce interval as a `Duration`
    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_changes)
    }

    /// Apply a patch, returning the patched copy.
    ///
    /// An empty language in the patch is ignored.
    pub fn patched(&self, patch: ConfigurationPatch) -> Self {
        let mut next = self.clone();
        if let Some(language) = patch.language.filter(|language| !language.is_empty()) {
            next.language = language;
        }
        if let Some(fallback_language) = patch.fallback_language {
            next.fallback_language = Some(fallback_language);
        }
        if let Some(interpolate) = patch.interpolate {
            next.interpolate = interpolate;
        }
        if let Some(debounce_changes) = patch.debounce_changes {
            next.debounce_changes = debounce_changes;
        }
        if let Some(formatter) = patch.formatter {
            next.formatter = formatter;
        }
        if let Some(interpolator) = patch.interpolator {
            next.interpolator = interpolator;
        }
        if let Some(placeholder) = patch.placeholder {
            next.placeholder = placeholder;
        }
        next
    }
}

/// Strategies compare by identity, everything else by value.
impl PartialEq for Configuration {
    fn eq(&self, other: &Self) -> bool {
        self.language == other.language
            && self.fallback_language == other.fallback_language
            && self.interpolate == other.interpolate
            && self.debounce_changes == other.debounce_changes
            && Arc::ptr_eq(&self.formatter, &other.formatter)
            && Arc::ptr_eq(&self.interpolator, &other.interpolator)
            && Arc::ptr_eq(&self.placeholder, &other.placeholder)
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("language", &self.language)
            .field("fallback_language", &self.fallback_language)
            .field("interpolate", &self.interpolate)
            .field("debounce_changes", &self.debounce_changes)
            .finish_non_exhaustive()
    }
}

/// Partial configuration applied with `Translator::config`.
///
/// Every `Some` field overwrites the corresponding configuration field.
#[derive(Clone, Default)]
pub struct ConfigurationPatch {
    pub language: Option<String>,
    pub fallback_language: Option<String>,
    pub interpolate: Option<bool>,
    pub debounce_changes: Option<u64>,
    pub formatter: Option<Formatter>,
    pub interpolator: Option<Interpolator>,
    pub placeholder: Option<Placeholder>,
}

impl fmt::Debug for ConfigurationPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationPatch")
            .field("language", &self.language)
            .field("fallback_language", &self.fallback_language)
            .field("interpolate", &self.interpolate)
            .field("debounce_changes", &self.debounce_changes)
            .field("formatter", &self.formatter.is_some())
            .field("interpolator", &self.interpolator.is_some())
            .field("placeholder", &self.placeholder.is_some())
            .finish()
    }
}

/// Options for a single resolution.
///
/// Unset fields fall back to the next tier: per-call options, then options
/// bound by a translate function, then the translator configuration.
#[derive(Clone, Default)]
pub struct TranslateOptions {
    pub language: Option<String>,
    pub fallback_language: Option<String>,
    pub replace: Option<Replacements>,
    pub interpolate: Option<bool>,
    pub formatter: Option<Formatter>,
    pub interpolator: Option<Interpolator>,
    pub placeholder: Option<Placeholder>,
}

impl TranslateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_fallback_language(mut self, language: impl Into<String>) -> Self {
        self.fallback_language = Some(language.into());
        self
    }

    pub fn with_replace(mut self, replace: impl Into<Replacements>) -> Self {
        self.replace = Some(replace.into());
        self
    }

    pub fn with_interpolate(mut self, interpolate: bool) -> Self {
        self.interpolate = Some(interpolate);
        self
    }

    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = Some(interpolator);
        self
    }

    pub fn with_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Fill unset fields from `base`; fields set on `self` win.
    pub fn or(&self, base: &TranslateOptions) -> TranslateOptions {
        TranslateOptions {
            language: self.language.clone().or_else(|| base.language.clone()),
            fallback_language: self
                .fallback_language
                .clone()
                .or_else(|| base.fallback_language.clone()),
            replace: self.replace.clone().or_else(|| base.replace.clone()),
            interpolate: self.interpolate.or(base.interpolate),
            formatter: self.formatter.clone().or_else(|| base.formatter.clone()),
            interpolator: self.interpolator.clone().or_else(|| base.interpolator.clone()),
            placeholder: self.placeholder.clone().or_else(|| base.placeholder.clone()),
        }
    }
}

impl fmt::Debug for TranslateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslateOptions")
            .field("language", &self.language)
            .field("fallback_language", &self.fallback_language)
            .field("replace", &self.replace)
            .field("interpolate", &self.interpolate)
            .finish_non_exhaustive()
    }
}
