//! Translation trees and the locale-keyed resource store.
//!
//! A [`TranslationTree`] maps key segments to [`TranslationNode`]s. A node is
//! a text leaf, a [`PluralGroup`], or a nested tree; the shape is fixed when
//! the node is built, so a nested tree whose keys happen to be named `one` or
//! `other` is never mistaken for a plural group.

use std::collections::{BTreeMap, HashMap};

use crate::plural::PluralGroup;

/// One entry in a translation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationNode {
    /// A plain translated string.
    Text(String),
    /// Plural variants selected by count.
    Plural(PluralGroup),
    /// A nested level of keys.
    Tree(TranslationTree),
}

impl From<&str> for TranslationNode {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TranslationNode {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<PluralGroup> for TranslationNode {
    fn from(group: PluralGroup) -> Self {
        Self::Plural(group)
    }
}

impl From<TranslationTree> for TranslationNode {
    fn from(tree: TranslationTree) -> Self {
        Self::Tree(tree)
    }
}

/// Translations for a single locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTree {
    nodes: HashMap<String, TranslationNode>,
}

impl TranslationTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under `key`, replacing any previous node.
    ///
    /// `key` is a single segment; dots are not interpreted here.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<TranslationNode>) {
        self.nodes.insert(key.into(), node.into());
    }

    /// Add a text leaf.
    #[must_use]
    pub fn text(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(key, TranslationNode::Text(text.into()));
        self
    }

    /// Add a plural group.
    #[must_use]
    pub fn plural(mut self, key: impl Into<String>, group: PluralGroup) -> Self {
        self.insert(key, group);
        self
    }

    /// Add a nested tree.
    #[must_use]
    pub fn subtree(mut self, key: impl Into<String>, tree: TranslationTree) -> Self {
        self.insert(key, tree);
        self
    }

    /// Look up a direct child.
    #[must_use]
    pub fn get(&self, segment: &str) -> Option<&TranslationNode> {
        self.nodes.get(segment)
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over direct children in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TranslationNode)> {
        self.nodes.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Dotted paths of every text and plural leaf, unsorted.
    #[must_use]
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_leaf_keys(self, "", &mut keys);
        keys
    }
}

fn collect_leaf_keys(tree: &TranslationTree, prefix: &str, out: &mut Vec<String>) {
    for (segment, node) in tree.iter() {
        let path = if prefix.is_empty() {
            segment.to_string()
        } else {
            format!("{prefix}.{segment}")
        };
        match node {
            TranslationNode::Tree(child) => collect_leaf_keys(child, &path, out),
            TranslationNode::Text(_) | TranslationNode::Plural(_) => out.push(path),
        }
    }
}

impl<K: Into<String>, V: Into<TranslationNode>> FromIterator<(K, V)> for TranslationTree {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            nodes: iter
                .into_iter()
                .map(|(key, node)| (key.into(), node.into()))
                .collect(),
        }
    }
}

/// The resource store: one [`TranslationTree`] per locale code.
///
/// Locale codes iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(transparent))]
pub struct Resources {
    locales: BTreeMap<String, TranslationTree>,
}

impl Resources {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the tree for `locale`.
    pub fn insert(&mut self, locale: impl Into<String>, tree: TranslationTree) {
        self.locales.insert(locale.into(), tree);
    }

    /// Builder variant of [`insert`](Self::insert).
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>, tree: TranslationTree) -> Self {
        self.insert(locale, tree);
        self
    }

    /// The tree for `locale`, if configured.
    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&TranslationTree> {
        self.locales.get(locale)
    }

    #[must_use]
    pub fn contains(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Configured locale codes, sorted.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Locale codes with their trees, sorted by code.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TranslationTree)> {
        self.locales
            .iter()
            .map(|(locale, tree)| (locale.as_str(), tree))
    }

    /// Number of configured locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, TranslationTree)> for Resources {
    fn from_iter<I: IntoIterator<Item = (K, TranslationTree)>>(iter: I) -> Self {
        Self {
            locales: iter
                .into_iter()
                .map(|(locale, tree)| (locale.into(), tree))
                .collect(),
        }
    }
}

#[cfg(feature = "serde")]
mod de {
    use std::collections::HashMap;

    use serde::{Deserialize, Deserializer};

    use super::{TranslationNode, TranslationTree};
    use crate::plural::{PluralForm, PluralGroup};

    /// Untyped shape as it appears in the source document.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNode {
        Text(String),
        Map(HashMap<String, RawNode>),
    }

    /// A map is a plural group only when it is non-empty, every key is a
    /// plural form name, and every value is a string.
    fn as_plural_group(map: &HashMap<String, RawNode>) -> Option<PluralGroup> {
        if map.is_empty() {
            return None;
        }
        map.iter()
            .map(|(key, value)| match value {
                RawNode::Text(text) => key
                    .parse::<PluralForm>()
                    .ok()
                    .map(|form| (form, text.clone())),
                RawNode::Map(_) => None,
            })
            .collect()
    }

    fn into_node(raw: RawNode) -> TranslationNode {
        match raw {
            RawNode::Text(text) => TranslationNode::Text(text),
            RawNode::Map(map) => match as_plural_group(&map) {
                Some(group) => TranslationNode::Plural(group),
                None => TranslationNode::Tree(into_tree(map)),
            },
        }
    }

    fn into_tree(map: HashMap<String, RawNode>) -> TranslationTree {
        map.into_iter().map(|(key, raw)| (key, into_node(raw))).collect()
    }

    impl<'de> Deserialize<'de> for TranslationNode {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            RawNode::deserialize(deserializer).map(into_node)
        }
    }

    impl<'de> Deserialize<'de> for TranslationTree {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            HashMap::<String, RawNode>::deserialize(deserializer).map(into_tree)
        }
    }
}
