//! The stateful translator.
//!
//! A [`Translator`] owns two observable snapshots, the translation tree and
//! the configuration. Every setter stores a new snapshot; listeners are
//! notified (optionally debounced) whenever either snapshot changes.

use crate::error::{TranslatorError, TranslatorResult};
use crate::translator::configuration::{Configuration, ConfigurationPatch, TranslateOptions};
use crate::translator::debounce::Debouncer;
use crate::translator::formatter::Formatter;
use crate::translator::interpolator::Interpolator;
use crate::translator::metrics::ResolutionMetrics;
use crate::translator::observable::{Observable, Subscription};
use crate::translator::placeholder::Placeholder;
use crate::translator::resolver::{translate, Resolution, ResolveContext};
use crate::translator::scoped::TranslateFn;
use crate::translator::translations::Translations;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

struct TranslatorInner {
    translations: Observable<Arc<Translations>>,
    configuration: Observable<Configuration>,
    metrics: ResolutionMetrics,
}

/// Reactive translation resolver.
///
/// Cloning a `Translator` yields another handle to the same state.
#[derive(Clone)]
pub struct Translator {
    inner: Arc<TranslatorInner>,
}

/// Options for [`Translator::listen`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ListenOptions {
    /// Invoke the callback once per observed source right away
    pub immediate: bool,
}

impl ListenOptions {
    pub fn immediate() -> Self {
        Self { immediate: true }
    }
}

/// Build a translator, see [`Translator::new`]
pub fn create_translator(
    translations: Translations,
    configuration: Configuration,
) -> TranslatorResult<Translator> {
    Translator::new(translations, configuration)
}

impl Translator {
    /// Create a translator.
    ///
    /// # Errors
    /// Returns `EmptyLanguage` if the configuration has no language.
    pub fn new(translations: Translations, configuration: Configuration) -> TranslatorResult<Self> {
        if configuration.language.is_empty() {
            return Err(TranslatorError::EmptyLanguage);
        }

        debug!(
            "Creating translator for '{}' with {} languages",
            configuration.language,
            translations.languages().len()
        );

        Ok(Self {
            inner: Arc::new(TranslatorInner {
                translations: Observable::new(Arc::new(translations)),
                configuration: Observable::new(configuration),
                metrics: ResolutionMetrics::new(),
            }),
        })
    }

    // ==================== Languages ====================

    pub fn language(&self) -> String {
        self.inner.configuration.get().language
    }

    /// Change the current language. Empty codes are ignored.
    pub fn set_language(&self, language: impl Into<String>) {
        self.config(ConfigurationPatch {
            language: Some(language.into()),
            ..Default::default()
        });
    }

    pub fn fallback_language(&self) -> Option<String> {
        self.inner.configuration.get().fallback_language
    }

    pub fn set_fallback_language(&self, language: impl Into<String>) {
        self.config(ConfigurationPatch {
            fallback_language: Some(language.into()),
            ..Default::default()
        });
    }

    pub fn clear_fallback_language(&self) {
        self.inner.configuration.update(|current| Configuration {
            fallback_language: None,
            ..current.clone()
        });
    }

    /// Language codes present in the translations, in insertion order
    pub fn languages(&self) -> Vec<String> {
        self.inner.translations.get().languages()
    }

    // ==================== Translations ====================

    /// Current translation snapshot
    pub fn translations(&self) -> Arc<Translations> {
        self.inner.translations.get()
    }

    pub fn set_translations(&self, translations: Translations) {
        self.inner.translations.set(Arc::new(translations));
    }

    /// Deep-merge `translations` into the current tree
    pub fn add_translations(&self, translations: Translations) {
        self.inner
            .translations
            .update(|current| Arc::new(current.merged(&translations)));
    }

    /// The subtree for one language, or an empty object
    pub fn translations_for_language(&self, language: &str) -> Value {
        self.inner
            .translations
            .get()
            .language(language)
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// Replace the subtree for one language
    pub fn set_translations_for_language(&self, language: &str, translations: Value) {
        self.inner
            .translations
            .update(|current| Arc::new(current.with_language(language, translations)));
    }

    /// Deep-merge into the subtree for one language
    pub fn add_translations_for_language(&self, language: &str, translations: Value) {
        let mut patch = Map::new();
        patch.insert(language.to_string(), translations);
        self.add_translations(Translations::from(patch));
    }

    // ==================== Configuration ====================

    /// Current configuration snapshot
    pub fn configuration(&self) -> Configuration {
        self.inner.configuration.get()
    }

    /// Patch several configuration fields at once
    pub fn config(&self, patch: ConfigurationPatch) {
        if patch.language.as_deref() == Some("") {
            warn!("Ignoring empty language in configuration update");
        }
        self.inner
            .configuration
            .update(|current| current.patched(patch));
    }

    pub fn formatter(&self) -> Formatter {
        self.inner.configuration.get().formatter
    }

    pub fn set_formatter(&self, formatter: Formatter) {
        self.config(ConfigurationPatch {
            formatter: Some(formatter),
            ..Default::default()
        });
    }

    pub fn interpolator(&self) -> Interpolator {
        self.inner.configuration.get().interpolator
    }

    pub fn set_interpolator(&self, interpolator: Interpolator) {
        self.config(ConfigurationPatch {
            interpolator: Some(interpolator),
            ..Default::default()
        });
    }

    pub fn placeholder(&self) -> Placeholder {
        self.inner.configuration.get().placeholder
    }

    pub fn set_placeholder(&self, placeholder: Placeholder) {
        self.config(ConfigurationPatch {
            placeholder: Some(placeholder),
            ..Default::default()
        });
    }

    // ==================== Resolution ====================

    /// Resolve `key` with the configured defaults
    pub fn get(&self, key: &str) -> String {
        self.get_with(key, &TranslateOptions::default())
    }

    /// Resolve `key`; fields set in `options` override the configuration.
    pub fn get_with(&self, key: &str, options: &TranslateOptions) -> String {
        let resolution = self.resolve(key, options);
        self.inner.metrics.record(resolution.source);
        resolution.text
    }

    /// Whether `key` resolves in the current language or its fallback
    pub fn has(&self, key: &str) -> bool {
        self.has_with(key, &TranslateOptions::default())
    }

    /// Whether `key` resolves with the given options.
    ///
    /// A key is missing when the uninterpolated result equals the placeholder
    /// generated for the same language and key. Checks are not counted in
    /// the resolution metrics.
    pub fn has_with(&self, key: &str, options: &TranslateOptions) -> bool {
        let config = self.inner.configuration.get();
        let language = options.language.as_deref().unwrap_or(&config.language);
        let placeholder = options.placeholder.as_ref().unwrap_or(&config.placeholder);
        let missing = placeholder(language, key, &Map::new());

        let probe = TranslateOptions {
            replace: None,
            interpolate: Some(false),
            ..options.clone()
        };
        self.resolve(key, &probe).text != missing
    }

    fn resolve(&self, key: &str, options: &TranslateOptions) -> Resolution {
        let config = self.inner.configuration.get();
        let translations = self.inner.translations.get();
        let replacements = options
            .replace
            .as_ref()
            .map(|replace| replace.to_tokens())
            .unwrap_or_default();

        let ctx = ResolveContext {
            language: options.language.as_deref().unwrap_or(&config.language),
            fallback_language: options
                .fallback_language
                .as_deref()
                .or(config.fallback_language.as_deref()),
            interpolate: options.interpolate.unwrap_or(config.interpolate),
            formatter: options.formatter.as_ref().unwrap_or(&config.formatter),
            interpolator: options.interpolator.as_ref().unwrap_or(&config.interpolator),
            placeholder: options.placeholder.as_ref().unwrap_or(&config.placeholder),
        };

        translate(&translations, key, &replacements, &ctx)
    }

    /// Build a translate function bound to `options`
    pub fn t(&self, options: TranslateOptions) -> TranslateFn {
        TranslateFn::new(self.clone(), None, options)
    }

    /// Build a translate function that prefixes keys with `scope`
    pub fn scope(&self, scope: impl Into<String>, options: TranslateOptions) -> TranslateFn {
        TranslateFn::new(self.clone(), Some(scope.into()), options)
    }

    /// Resolution counters for this translator
    pub fn metrics(&self) -> &ResolutionMetrics {
        &self.inner.metrics
    }

    // ==================== Change notification ====================

    /// Invoke `callback` whenever the translations or configuration change.
    ///
    /// With a non-zero `debounce_changes` (read when subscribing), bursts of
    /// changes collapse into one trailing call. Immediate calls are debounced
    /// the same way. The returned [`Listener`]
    /// unsubscribes when dropped or when [`Listener::unsubscribe`] is called.
    pub fn listen<F>(&self, callback: F, options: ListenOptions) -> Listener
    where
        F: Fn(&Translator) + Send + Sync + 'static,
    {
        let delay = self.configuration().debounce_interval();

        let notify = {
            let weak = Arc::downgrade(&self.inner);
            move || {
                if let Some(inner) = weak.upgrade() {
                    trace!("Notifying translator listener");
                    callback(&Translator { inner });
                }
            }
        };
        let debouncer = Arc::new(Debouncer::new(delay, notify));

        let on_translations = {
            let debouncer = Arc::clone(&debouncer);
            self.inner
                .translations
                .subscribe(move |_: &Arc<Translations>| debouncer.call())
        };
        let on_configuration = {
            let debouncer = Arc::clone(&debouncer);
            self.inner
                .configuration
                .subscribe(move |_: &Configuration| debouncer.call())
        };

        if options.immediate {
            // One eager call per observed source, debounced like any change
            debouncer.call();
            debouncer.call();
        }

        Listener {
            subscriptions: vec![on_translations, on_configuration],
            debouncer,
        }
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("configuration", &self.configuration())
            .field("languages", &self.languages())
            .finish()
    }
}

/// Handle for a listener registered with [`Translator::listen`].
#[must_use = "dropping a Listener unsubscribes it"]
pub struct Listener {
    subscriptions: Vec<Subscription>,
    debouncer: Arc<Debouncer>,
}

impl Listener {
    /// Detach from both sources and drop any pending notification. Idempotent.
    pub fn unsubscribe(&mut self) {
        self.subscriptions.clear();
        self.debouncer.cancel();
    }

    pub fn is_active(&self) -> bool {
        !self.subscriptions.is_empty()
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("active", &self.is_active())
            .finish()
    }
}
