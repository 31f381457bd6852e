use super::resource::{ResourceCollector, WebResource};
use crate::config::{Config, MarkerConfig, SiteConfig};
use crate::error::Result;
use crate::scraper::{Scraper, TocPolicy};
pub use crate::log_info;

/// Which pass a page is scraped with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    TableOfContents,
    Article,
}

/// A news site: where its front page lives and how its pages are read.
#[derive(Debug, Clone)]
pub struct NewsSite {
    site: SiteConfig,
    markers: MarkerConfig,
    toc_policy: TocPolicy,
}

impl NewsSite {
    pub fn new(site: SiteConfig, markers: MarkerConfig, toc_policy: TocPolicy) -> Self {
        Self {
            site,
            markers,
            toc_policy,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.site.clone(),
            config.markers.clone(),
            TocPolicy::from_strict(config.toc.strict),
        )
    }

    pub fn name(&self) -> &str {
        &self.site.name
    }

    pub fn locale(&self) -> &str {
        &self.site.locale
    }

    pub fn toc_url(&self) -> &str {
        &self.site.toc_url
    }

    pub fn table_of_contents(&self) -> WebResource {
        WebResource::new(self.toc_url())
    }

    /// Runs `kind` over `html` and stores the result in `resource`.
    /// On error the resource keeps its previous content.
    pub fn scrape(&self, kind: PassKind, html: &str, resource: &mut WebResource) -> Result<usize> {
        let scraper = Scraper::new(html);
        let mut collector = ResourceCollector::new(resource);

        let emitted = match kind {
            PassKind::TableOfContents => scraper
                .toc(&self.markers)
                .with_policy(self.toc_policy)
                .run(&mut collector)?,
            PassKind::Article => scraper.article(&self.markers).run(&mut collector)?,
        };

        log_info!(
            "[site] {} pass over {} emitted {} fragments",
            kind.label(),
            resource.url(),
            emitted
        );
        Ok(emitted)
    }
}

impl PassKind {
    pub fn label(&self) -> &'static str {
        match self {
            PassKind::TableOfContents => "toc",
            PassKind::Article => "article",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::resource::{Article, TableOfContents};

    const FRONT_PAGE: &str = r#"<html><body>
        <a class="vrt-teaser" href="/vrtnws/nl/2024/03/01/brand/">
            <h2 class="vrt-teaser__title">Brand in <em>Gent</em></h2>
        </a>
        <a class="vrt-teaser" href="https://www.vrt.be/vrtnws/nl/2024/03/01/weer/">
            <h2 class="vrt-teaser__title">Het weer</h2>
        </a>
    </body></html>"#;

    fn vrt() -> NewsSite {
        NewsSite::from_config(&Config::default())
    }

    #[test]
    fn exposes_site_settings() {
        let site = vrt();
        assert_eq!(site.name(), "VRT News");
        assert_eq!(site.locale(), "nl-BE");
        assert_eq!(site.table_of_contents().url(), "https://www.vrt.be/vrtnws/nl");
    }

    #[test]
    fn scrapes_front_page_into_table_of_contents() {
        let site = vrt();
        let mut resource = site.table_of_contents();

        let emitted = site
            .scrape(PassKind::TableOfContents, FRONT_PAGE, &mut resource)
            .unwrap();
        assert_eq!(emitted, 2);

        let toc = TableOfContents::from_resource(&resource);
        assert_eq!(toc.entries[0].text, "Brand in Gent");
        assert_eq!(
            toc.entries[0].url,
            "https://www.vrt.be/vrtnws/nl/2024/03/01/brand/"
        );
        assert_eq!(toc.entries[1].text, "Het weer");
    }

    #[test]
    fn scrapes_article_paragraphs() {
        let site = vrt();
        let mut resource = WebResource::new("https://www.vrt.be/vrtnws/nl/2024/03/01/brand/");
        let page = r#"<html><body>
            <h1 class="vrt-title">Brand in Gent</h1>
            <div class="article__intro"><p>Een grote brand heeft ...</p></div>
            <div class="parbase"><p>De brandweer kwam snel ter plaatse.</p></div>
            <div class="parbase"><p>Lees verder onder de foto</p></div>
        </body></html>"#;

        site.scrape(PassKind::Article, page, &mut resource).unwrap();

        assert_eq!(
            Article::from_resource(&resource).paragraphs,
            vec![
                "Brand in Gent",
                "Een grote brand heeft ...",
                "De brandweer kwam snel ter plaatse.",
            ]
        );
    }

    #[test]
    fn failed_pass_keeps_previous_content() {
        let site = vrt();
        let mut resource = site.table_of_contents();
        site.scrape(PassKind::TableOfContents, FRONT_PAGE, &mut resource)
            .unwrap();

        let broken = r#"<body><h2 class="vrt-teaser__title">Orphan</h2></body>"#;
        assert!(site
            .scrape(PassKind::TableOfContents, broken, &mut resource)
            .is_err());
        assert_eq!(resource.content().len(), 2);
    }

    #[test]
    fn lenient_site_accepts_orphan_titles() {
        let config = Config::from_toml("[toc]\nstrict = false").unwrap();
        let site = NewsSite::from_config(&config);
        let mut resource = site.table_of_contents();

        let broken = r#"<body><h2 class="vrt-teaser__title">Orphan</h2></body>"#;
        site.scrape(PassKind::TableOfContents, broken, &mut resource)
            .unwrap();

        let toc = TableOfContents::from_resource(&resource);
        assert_eq!(toc.entries[0].text, "Orphan");
        assert_eq!(toc.entries[0].url, "");
        assert!(toc.articles().is_empty());
    }
}
