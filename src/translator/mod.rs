//! Translation resolution, strategies and change notification.
//!
//! # Architecture
//!
//! - `path`: Dotted-path lookup and deep merge over JSON trees
//! - `translations`: The per-language translation tree
//! - `replacements`: Positional/named replacement values
//! - `formatter`, `interpolator`, `placeholder`: Pluggable rendering strategies
//! - `configuration`: Translator configuration and per-call options
//! - `resolver`: Lookup → fallback → interpolation → placeholder
//! - `observable`, `debounce`: Change notification primitives
//! - `engine`: The stateful `Translator`
//! - `scoped`: Scoped translate functions (`t`)
//! - `accessor`: Structured accessor mirroring a translations subtree
//! - `metrics`: Per-translator resolution counters
//! - `validator`: Cross-language consistency checks
//!
//! # Example
//!
//! ```rust,ignore
//! use reactive_translator::{Configuration, Replacements, TranslateOptions, Translations, Translator};
//! use serde_json::json;
//!
//! let translations = Translations::from_value(json!({ "en": { "greeting": "Hello {{name}}" } }))?;
//! let translator = Translator::new(translations, Configuration::new("en"))?;
//!
//! let options = TranslateOptions::new().with_replace(Replacements::named([("name", "Ada")]));
//! assert_eq!(translator.get_with("greeting", &options), "Hello Ada");
//! ```

mod accessor;
mod configuration;
mod debounce;
mod engine;
mod formatter;
mod interpolator;
mod metrics;
mod observable;
mod path;
mod placeholder;
mod replacements;
mod resolver;
mod scoped;
mod translations;
mod validator;

pub use accessor::{create_translator_accessor, TranslatorAccessor};
pub use configuration::{Configuration, ConfigurationPatch, TranslateOptions, DEFAULT_DEBOUNCE_MS};
pub use engine::{create_translator, ListenOptions, Listener, Translator};
pub use formatter::{default_formatter, Formatter};
pub use interpolator::{default_interpolator, Interpolator};
pub use metrics::{MetricsReport, ResolutionMetrics};
pub use observable::{Observable, Subscription};
pub use path::{deep_merge, flatten_keys, lookup_path};
pub use placeholder::{default_placeholder, Placeholder};
pub use replacements::Replacements;
pub use resolver::{translate, Resolution, ResolveContext, Source};
pub use scoped::TranslateFn;
pub use translations::Translations;
pub use validator::{TranslationValidator, ValidationReport};
