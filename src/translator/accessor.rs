//! Structured accessor mirroring the shape of a translations subtree.

use crate::translator::configuration::TranslateOptions;
use crate::translator::engine::Translator;
use crate::translator::path::join_path;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// One node of an accessor tree.
///
/// Every node knows its full dotted path and resolves it through the owning
/// translator. Nodes built from string leaves resolve to translations; other
/// nodes resolve like any non-string key (to the placeholder).
#[derive(Clone)]
pub struct TranslatorAccessor {
    translator: Translator,
    path: String,
    children: BTreeMap<String, TranslatorAccessor>,
}

/// Build an accessor for `sample`, see [`TranslatorAccessor::new`]
pub fn create_translator_accessor(translator: &Translator, sample: &Value) -> TranslatorAccessor {
    TranslatorAccessor::new(translator, sample)
}

impl TranslatorAccessor {
    /// Build an accessor tree from a sample translations subtree (typically
    /// one language's translations). Only objects and string leaves are
    /// mirrored.
    pub fn new(translator: &Translator, sample: &Value) -> Self {
        Self::build(translator, String::new(), sample)
    }

    fn build(translator: &Translator, path: String, node: &Value) -> Self {
        let children = match node {
            Value::Object(map) => map
                .iter()
                .filter(|(_, child)| child.is_object() || child.is_string())
                .map(|(segment, child)| {
                    let child_path = join_path(Some(path.as_str()), segment);
                    (segment.clone(), Self::build(translator, child_path, child))
                })
                .collect(),
            _ => BTreeMap::new(),
        };

        Self {
            translator: translator.clone(),
            path,
            children,
        }
    }

    /// Full dotted key of this node
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, segment: &str) -> Option<&TranslatorAccessor> {
        self.children.get(segment)
    }

    /// Direct child segments in sorted order
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    /// Resolve this node's key with the translator defaults
    pub fn get(&self) -> String {
        self.translator.get(&self.path)
    }

    /// Resolve this node's key with options
    pub fn get_with(&self, options: &TranslateOptions) -> String {
        self.translator.get_with(&self.path, options)
    }
}

/// # Panics
/// Panics if `segment` is not a child of this node; use
/// [`TranslatorAccessor::child`] for a fallible lookup.
impl Index<&str> for TranslatorAccessor {
    type Output = TranslatorAccessor;

    fn index(&self, segment: &str) -> &Self::Output {
        match self.child(segment) {
            Some(child) => child,
            None => panic!("No translation accessor for '{}' below '{}'", segment, self.path),
        }
    }
}

impl fmt::Debug for TranslatorAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslatorAccessor")
            .field("path", &self.path)
            .field("children", &self.children)
            .finish()
    }
}
