use super::dom::{class_contains_substring, Document, TreeNode};
use super::sink::ContentSink;
use crate::config::MarkerConfig;
use crate::error::Result;
pub use crate::log_debug;

/// Extracts the readable text blocks of an article page.
///
/// An element qualifies when its own class attribute contains the title
/// marker, or its parent or grandparent class attribute contains the intro or
/// content marker. All three checks are substring matches on the raw
/// attribute. Qualifying elements whose html contains the boilerplate marker
/// are skipped.
pub struct ArticleScraper<'a, D: Document> {
    document: &'a D,
    markers: &'a MarkerConfig,
}

impl<'a, D: Document> ArticleScraper<'a, D> {
    pub(crate) fn new(document: &'a D, markers: &'a MarkerConfig) -> Self {
        Self { document, markers }
    }

    /// Emits `(html, "")` per qualifying element, then signals completion.
    /// Returns the number of emitted fragments.
    pub fn run<S: ContentSink + ?Sized>(&self, sink: &mut S) -> Result<usize> {
        let elements = self.document.select_all(&self.markers.article_selector)?;

        let mut emitted = 0;
        for element in &elements {
            if self.is_included(element) && !self.is_boilerplate(element) {
                sink.content(&element.inner_html(), "");
                emitted += 1;
            }
        }
        sink.finished();

        log_debug!(
            "[article] Emitted {} of {} candidate elements",
            emitted,
            elements.len()
        );
        Ok(emitted)
    }

    fn is_included<N: TreeNode>(&self, element: &N) -> bool {
        let parent = element.parent_element();
        let grandparent = parent.as_ref().and_then(|p| p.parent_element());

        let ancestor_has = |marker: &str| {
            [parent.as_ref(), grandparent.as_ref()]
                .into_iter()
                .flatten()
                .any(|ancestor| class_contains_substring(ancestor, marker))
        };

        class_contains_substring(element, &self.markers.title_class)
            || ancestor_has(&self.markers.intro_class)
            || ancestor_has(&self.markers.content_class)
    }

    fn is_boilerplate<N: TreeNode>(&self, element: &N) -> bool {
        element.inner_html().contains(&self.markers.boilerplate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::sink::testing::RecordingSink;
    use scraper::Html;

    fn scrape(page: &str) -> RecordingSink {
        let document = Html::parse_document(page);
        let markers = MarkerConfig::default();
        let mut sink = RecordingSink::default();
        ArticleScraper::new(&document, &markers)
            .run(&mut sink)
            .unwrap();
        sink
    }

    #[test]
    fn emits_matches_in_document_order() {
        let sink = scrape(
            r#"<html><body>
                <h1 class="vrt-title">Title</h1>
                <div class="article__intro"><p>Intro</p></div>
                <p>Unrelated</p>
                <div class="parbase text"><div class="inner"><p>Body one</p><h3>Sub</h3></div></div>
                <ul><li>Not in article</li></ul>
            </body></html>"#,
        );

        assert_eq!(
            sink.contents(),
            vec![
                ("Title", ""),
                ("Intro", ""),
                ("Body one", ""),
                ("Sub", ""),
            ]
        );
        assert_eq!(sink.finished_count(), 1);
        assert!(sink.finished_last());
    }

    #[test]
    fn class_markers_match_as_substrings() {
        let sink = scrape(
            r#"<body>
                <div class="parbase"><p>Exact</p></div>
                <div class="my-parbase-thing"><p>Embedded</p></div>
                <div class="article__intro--wide"><div><p>Deep intro</p></div></div>
                <h2 class="big-vrt-title-x">Loose title</h2>
            </body>"#,
        );

        assert_eq!(
            sink.contents(),
            vec![
                ("Exact", ""),
                ("Embedded", ""),
                ("Deep intro", ""),
                ("Loose title", ""),
            ]
        );
    }

    #[test]
    fn great_grandparent_marker_is_ignored() {
        let sink = scrape(
            r#"<body><div class="parbase"><div><div><p>Too deep</p></div></div></div></body>"#,
        );
        assert!(sink.contents().is_empty());
        assert_eq!(sink.finished_count(), 1);
    }

    #[test]
    fn skips_read_more_boilerplate() {
        let sink = scrape(
            r#"<body><div class="parbase"><ul>
                <li>Keep me</li>
                <li><strong>Lees verder onder</strong> de foto</li>
            </ul></div></body>"#,
        );
        assert_eq!(sink.contents(), vec![("Keep me", "")]);
    }

    #[test]
    fn keeps_inner_markup() {
        let sink = scrape(r#"<body><div class="parbase"><p>A <b>bold</b> move</p></div></body>"#);
        assert_eq!(sink.contents(), vec![("A <b>bold</b> move", "")]);
    }

    #[test]
    fn empty_page_still_finishes() {
        let sink = scrape("<html><body></body></html>");
        assert!(sink.contents().is_empty());
        assert_eq!(sink.events.len(), 1);
        assert!(sink.finished_last());
    }

    #[test]
    fn invalid_selector_aborts_without_finishing() {
        let document = Html::parse_document("<p class=\"vrt-title\">x</p>");
        let markers = MarkerConfig {
            article_selector: "p[".to_string(),
            ..MarkerConfig::default()
        };
        let mut sink = RecordingSink::default();

        assert!(ArticleScraper::new(&document, &markers)
            .run(&mut sink)
            .is_err());
        assert!(sink.events.is_empty());
    }
}
