//! Scoped translate functions.

use crate::translator::configuration::TranslateOptions;
use crate::translator::engine::Translator;
use crate::translator::path::join_path;
use std::fmt;

/// Marks a key as absolute, bypassing the scope
const ABSOLUTE_KEY_PREFIX: char = '~';

/// A translate function bound to a translator, an optional key scope and
/// default options.
///
/// Option precedence: per-call options, then the bound options, then the
/// translator configuration.
#[derive(Clone)]
pub struct TranslateFn {
    translator: Translator,
    scope: Option<String>,
    options: TranslateOptions,
}

impl TranslateFn {
    pub(crate) fn new(translator: Translator, scope: Option<String>, options: TranslateOptions) -> Self {
        Self {
            translator,
            scope,
            options,
        }
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Resolve `key` with the bound options
    pub fn get(&self, key: &str) -> String {
        self.translator.get_with(&self.resolve_key(key), &self.options)
    }

    /// Resolve `key`; `overrides` take precedence over the bound options
    pub fn get_with(&self, key: &str, overrides: &TranslateOptions) -> String {
        self.translator
            .get_with(&self.resolve_key(key), &overrides.or(&self.options))
    }

    /// Full key path for `key`.
    ///
    /// Keys starting with `~` are absolute; everything else is joined onto
    /// the scope.
    pub fn resolve_key(&self, key: &str) -> String {
        match key.strip_prefix(ABSOLUTE_KEY_PREFIX) {
            Some(absolute) => absolute.to_string(),
            None => join_path(self.scope.as_deref(), key),
        }
    }
}

impl fmt::Debug for TranslateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslateFn")
            .field("scope", &self.scope)
            .field("options", &self.options)
            .finish()
    }
}
