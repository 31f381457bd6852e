//! Read-only view of a parsed page.
//!
//! The passes only need a handful of element properties, so they are written
//! against [`TreeNode`] and [`Document`] instead of a concrete parser.

use crate::error::{Result, ScraperError};
use scraper::{ElementRef, Html, Selector};

/// An element of a parsed page.
pub trait TreeNode: Sized {
    /// Lowercase local name, e.g. `"h2"`.
    fn tag(&self) -> &str;

    /// The raw `class` attribute, empty when absent.
    fn class_attr(&self) -> &str;

    /// Whitespace separated tokens of the `class` attribute.
    fn class_tokens(&self) -> Vec<&str>;

    /// Serialized children of the element.
    fn inner_html(&self) -> String;

    fn parent_element(&self) -> Option<Self>;

    /// Link target of anchors, `None` for other elements or when unset.
    fn link_target(&self) -> Option<&str>;
}

/// A page that can be queried with simple CSS patterns.
pub trait Document {
    type Node<'a>: TreeNode
    where
        Self: 'a;

    /// Matching elements in document order.
    fn select_all<'a>(&'a self, pattern: &str) -> Result<Vec<Self::Node<'a>>>;
}

/// Lenient match: `marker` anywhere in the raw class attribute, so
/// `"my-parbase-thing"` matches `"parbase"`.
pub fn class_contains_substring<N: TreeNode>(node: &N, marker: &str) -> bool {
    node.class_attr().contains(marker)
}

/// Strict match: `class` is one of the element's class tokens.
pub fn class_list_has_exact<N: TreeNode>(node: &N, class: &str) -> bool {
    node.class_tokens().iter().any(|token| *token == class)
}

/// Nearest strict ancestor carrying `class` as an exact token.
pub fn find_ancestor<N: TreeNode>(node: &N, class: &str) -> Option<N> {
    let mut current = node.parent_element();
    while let Some(element) = current {
        if class_list_has_exact(&element, class) {
            return Some(element);
        }
        current = element.parent_element();
    }
    None
}

impl<'a> TreeNode for ElementRef<'a> {
    fn tag(&self) -> &str {
        self.value().name()
    }

    fn class_attr(&self) -> &str {
        self.value().attr("class").unwrap_or("")
    }

    fn class_tokens(&self) -> Vec<&str> {
        self.class_attr().split_ascii_whitespace().collect()
    }

    fn inner_html(&self) -> String {
        ElementRef::inner_html(self)
    }

    fn parent_element(&self) -> Option<Self> {
        let node = &**self;
        node.parent().and_then(ElementRef::wrap)
    }

    fn link_target(&self) -> Option<&str> {
        match self.tag() {
            "a" | "area" => self.value().attr("href"),
            _ => None,
        }
    }
}

impl Document for Html {
    type Node<'a> = ElementRef<'a>;

    fn select_all<'a>(&'a self, pattern: &str) -> Result<Vec<ElementRef<'a>>> {
        let selector =
            Selector::parse(pattern).map_err(|e| ScraperError::SelectorError(e.to_string()))?;
        Ok(self.select(&selector).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Hand-built tree so the ancestor walk is checked without a parser.
    struct Tree {
        nodes: Vec<(&'static str, &'static str, Option<usize>)>,
    }

    #[derive(Clone, Copy)]
    struct Node<'t> {
        tree: &'t Tree,
        index: usize,
    }

    impl<'t> TreeNode for Node<'t> {
        fn tag(&self) -> &str {
            self.tree.nodes[self.index].0
        }

        fn class_attr(&self) -> &str {
            self.tree.nodes[self.index].1
        }

        fn class_tokens(&self) -> Vec<&str> {
            self.class_attr().split_ascii_whitespace().collect()
        }

        fn inner_html(&self) -> String {
            String::new()
        }

        fn parent_element(&self) -> Option<Self> {
            self.tree.nodes[self.index].2.map(|index| Node {
                tree: self.tree,
                index,
            })
        }

        fn link_target(&self) -> Option<&str> {
            None
        }
    }

    #[test]
    fn substring_match_is_lenient() {
        let html = Html::parse_fragment(
            r#"<div class="parbase"></div><div class="my-parbase-thing"></div>"#,
        );
        let divs = html.select_all("div").unwrap();
        assert!(divs.iter().all(|d| class_contains_substring(d, "parbase")));
        assert!(!class_list_has_exact(&divs[1], "parbase"));
        assert!(class_list_has_exact(&divs[0], "parbase"));
    }

    #[test]
    fn exact_match_uses_tokens() {
        let html = Html::parse_fragment(r#"<div class="vrt-teaser  vrt-teaser--large"></div>"#);
        let div = html.select_all("div").unwrap()[0];
        assert!(class_list_has_exact(&div, "vrt-teaser"));
        assert!(class_list_has_exact(&div, "vrt-teaser--large"));
        assert!(!class_list_has_exact(&div, "vrt"));
    }

    #[test]
    fn missing_class_attribute_is_empty() {
        let html = Html::parse_fragment("<p>text</p>");
        let p = html.select_all("p").unwrap()[0];
        assert_eq!(p.class_attr(), "");
        assert!(p.class_tokens().is_empty());
        assert!(!class_contains_substring(&p, "parbase"));
    }

    #[test]
    fn find_ancestor_skips_the_element_itself() {
        let tree = Tree {
            nodes: vec![
                ("a", "teaser", None),
                ("div", "wrapper", Some(0)),
                ("h2", "teaser", Some(1)),
            ],
        };
        let title = Node {
            tree: &tree,
            index: 2,
        };

        let found = find_ancestor(&title, "teaser").unwrap();
        assert_eq!(found.index, 0);
        assert_eq!(found.tag(), "a");
    }

    #[test]
    fn find_ancestor_returns_none_at_root() {
        let tree = Tree {
            nodes: vec![("div", "", None), ("h2", "title", Some(0))],
        };
        let title = Node {
            tree: &tree,
            index: 1,
        };
        assert!(find_ancestor(&title, "teaser").is_none());
    }

    #[test]
    fn link_target_only_for_anchors() {
        let html = Html::parse_fragment(
            r#"<a class="x" href="/a"><span></span></a><div href="/d"></div>"#,
        );
        assert_eq!(html.select_all("a").unwrap()[0].link_target(), Some("/a"));
        assert_eq!(html.select_all("div").unwrap()[0].link_target(), None);

        let span = html.select_all("span").unwrap()[0];
        assert_eq!(span.parent_element().unwrap().tag(), "a");
    }

    #[test]
    fn invalid_selector_is_reported() {
        let html = Html::parse_fragment("<p></p>");
        let err = html.select_all("p[").unwrap_err();
        assert!(err.to_string().contains("Selector error"));
    }
}
