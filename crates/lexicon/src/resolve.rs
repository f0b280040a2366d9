//! Dotted-key resolution through a locale's translation tree.

use crate::plural::PluralGroup;
use crate::tree::{Resources, TranslationNode};

/// Outcome of resolving one key in one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// The key names a text leaf.
    Text(&'a str),
    /// The key names a plural group and plural groups were allowed.
    Plural(&'a PluralGroup),
    /// Unknown locale, unknown path, or a node of the wrong shape.
    Missing,
}

impl Resolved<'_> {
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Resolve `key` (segments separated by `.`) in `locale`.
///
/// Only nested trees are descended; there are no partial matches. A plural
/// group at the end of the path resolves only when `allow_plural` is set.
#[must_use]
pub fn resolve<'a>(
    resources: &'a Resources,
    key: &str,
    locale: &str,
    allow_plural: bool,
) -> Resolved<'a> {
    let Some(tree) = resources.get(locale) else {
        return Resolved::Missing;
    };

    let mut segments = key.split('.');
    // `split` always yields at least one segment.
    let Some(mut node) = segments.next().and_then(|first| tree.get(first)) else {
        return Resolved::Missing;
    };
    for segment in segments {
        let TranslationNode::Tree(subtree) = node else {
            return Resolved::Missing;
        };
        let Some(child) = subtree.get(segment) else {
            return Resolved::Missing;
        };
        node = child;
    }

    match node {
        TranslationNode::Text(text) => Resolved::Text(text),
        TranslationNode::Plural(group) if allow_plural => Resolved::Plural(group),
        TranslationNode::Plural(_) | TranslationNode::Tree(_) => Resolved::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TranslationTree;

    fn resources() -> Resources {
        let en = TranslationTree::new()
            .text("greeting", "Hello")
            .plural("items", PluralGroup::new().one("1 item").other("many items"))
            .subtree(
                "nested",
                TranslationTree::new()
                    .text("message", "Inner")
                    .subtree("deep", TranslationTree::new().text("value", "Deep")),
            );
        Resources::new().with_locale("en", en)
    }

    #[test]
    fn resolves_top_level_text() {
        let res = resources();
        assert_eq!(resolve(&res, "greeting", "en", false), Resolved::Text("Hello"));
    }

    #[test]
    fn resolves_nested_paths() {
        let res = resources();
        assert_eq!(resolve(&res, "nested.message", "en", false), Resolved::Text("Inner"));
        assert_eq!(resolve(&res, "nested.deep.value", "en", true), Resolved::Text("Deep"));
    }

    #[test]
    fn subtree_is_not_a_leaf() {
        let res = resources();
        assert!(resolve(&res, "nested", "en", false).is_missing());
        assert!(resolve(&res, "nested", "en", true).is_missing());
    }

    #[test]
    fn plural_group_needs_permission() {
        let res = resources();
        assert!(resolve(&res, "items", "en", false).is_missing());
        let Resolved::Plural(group) = resolve(&res, "items", "en", true) else {
            panic!("items should resolve to a plural group");
        };
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn no_partial_matches() {
        let res = resources();
        assert!(resolve(&res, "greeting.extra", "en", false).is_missing());
        assert!(resolve(&res, "nested.missing", "en", false).is_missing());
        assert!(resolve(&res, "items.one", "en", true).is_missing());
        assert!(resolve(&res, "nested.deep.value.more", "en", false).is_missing());
    }

    #[test]
    fn unknown_locale_misses() {
        let res = resources();
        assert!(resolve(&res, "greeting", "fr", false).is_missing());
        assert!(resolve(&Resources::new(), "greeting", "en", false).is_missing());
    }

    #[test]
    fn empty_segments_miss() {
        let res = resources();
        assert!(resolve(&res, "", "en", false).is_missing());
        assert!(resolve(&res, "nested..message", "en", false).is_missing());
        assert!(resolve(&res, ".greeting", "en", false).is_missing());
        assert!(resolve(&res, "greeting.", "en", false).is_missing());
    }
}
