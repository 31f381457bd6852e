use super::dom::{find_ancestor, Document, TreeNode};
use super::sink::ContentSink;
use crate::config::MarkerConfig;
use crate::error::{Result, ScraperError};
pub use crate::{log_debug, log_warn};

/// What to do with a teaser title that has no enclosing teaser container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TocPolicy {
    /// Abort the pass with [`ScraperError::MissingAncestor`]. Fragments
    /// emitted before the failure stay emitted and `finished` is not called.
    #[default]
    Strict,
    /// Emit the title with an empty url and keep going.
    Lenient,
}

impl TocPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            TocPolicy::Strict
        } else {
            TocPolicy::Lenient
        }
    }
}

/// Extracts article titles and their links from the front page.
///
/// Every teaser title is paired with the link target of its nearest enclosing
/// element whose class list holds the teaser class as an exact token.
pub struct TocScraper<'a, D: Document> {
    document: &'a D,
    markers: &'a MarkerConfig,
    policy: TocPolicy,
}

impl<'a, D: Document> TocScraper<'a, D> {
    pub(crate) fn new(document: &'a D, markers: &'a MarkerConfig) -> Self {
        Self {
            document,
            markers,
            policy: TocPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: TocPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Emits `(title html, href)` per teaser title, then signals completion.
    /// A container without a link target yields an empty url.
    pub fn run<S: ContentSink + ?Sized>(&self, sink: &mut S) -> Result<usize> {
        let titles = self
            .document
            .select_all(&self.markers.teaser_title_selector)?;

        for title in &titles {
            let url = self.resolve_link(title)?;
            sink.content(&title.inner_html(), &url);
        }
        sink.finished();

        log_debug!("[toc] Emitted {} teaser titles", titles.len());
        Ok(titles.len())
    }

    fn resolve_link<N: TreeNode>(&self, title: &N) -> Result<String> {
        match find_ancestor(title, &self.markers.teaser_class) {
            Some(teaser) => Ok(teaser.link_target().unwrap_or_default().to_string()),
            None => match self.policy {
                TocPolicy::Strict => Err(ScraperError::MissingAncestor {
                    class: self.markers.teaser_class.clone(),
                    html: title.inner_html(),
                }
                .into()),
                TocPolicy::Lenient => {
                    log_warn!(
                        "[toc] No '{}' container around title, emitting without url",
                        self.markers.teaser_class
                    );
                    Ok(String::new())
                }
            },
        }
    }
}
