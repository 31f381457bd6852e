mod article;
pub mod dom;
pub mod sink;
mod toc;

pub use article::ArticleScraper;
pub use sink::ContentSink;
pub use toc::{TocPolicy, TocScraper};

use crate::config::MarkerConfig;
use scraper::Html;

pub struct Scraper {
    document: Html,
}

impl Scraper {
    pub fn new(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    pub fn article<'a>(&'a self, markers: &'a MarkerConfig) -> ArticleScraper<'a, Html> {
        ArticleScraper::new(&self.document, markers)
    }

    pub fn toc<'a>(&'a self, markers: &'a MarkerConfig) -> TocScraper<'a, Html> {
        TocScraper::new(&self.document, markers)
    }
}
