//! Reactive key-value translation resolver.
//!
//! A [`Translator`] owns a nested tree of per-language message templates and a
//! [`Configuration`]. It resolves dotted keys to rendered strings (with
//! fallback languages and `{{ token }}` interpolation) and notifies listeners
//! whenever the translations or the configuration change.

pub mod config;
pub mod error;
pub mod translator;

pub use error::{TranslatorError, TranslatorResult};
pub use translator::{
    create_translator, create_translator_accessor, default_formatter, default_interpolator,
    default_placeholder, ConfigurationPatch, Configuration, Formatter, Interpolator,
    ListenOptions, Listener, MetricsReport, Placeholder, Replacements, TranslateFn,
    TranslateOptions, Translations, TranslationValidator, Translator, TranslatorAccessor,
    ValidationReport,
};
