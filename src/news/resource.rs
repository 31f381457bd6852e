use crate::scraper::ContentSink;
pub use crate::log_debug;
use scraper::Html;
use serde::Serialize;
use std::collections::HashMap;
use url::Url;

/// One scraped fragment: plain text and the url it links to (may be empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentEntry {
    pub text: String,
    pub url: String,
}

/// Text keyed, insertion ordered map of scraped fragments.
///
/// Inserting a text that is already present overwrites its url but keeps its
/// original position.
#[derive(Debug, Clone, Default)]
pub struct ContentMap {
    entries: Vec<ContentEntry>,
    index: HashMap<String, usize>,
}

impl ContentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, text: String, url: String) {
        match self.index.get(&text) {
            Some(&position) => self.entries[position].url = url,
            None => {
                self.index.insert(text.clone(), self.entries.len());
                self.entries.push(ContentEntry { text, url });
            }
        }
    }

    pub fn entries(&self) -> &[ContentEntry] {
        &self.entries
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A page identified by its url whose content is filled in by a scrape.
#[derive(Debug, Clone)]
pub struct WebResource {
    url: String,
    content: ContentMap,
}

impl WebResource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: ContentMap::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn content(&self) -> &ContentMap {
        &self.content
    }

    pub fn set_content(&mut self, content: ContentMap) {
        self.content = content;
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

/// Sink that turns emitted html fragments into a resource's content.
///
/// Content only replaces the resource's previous content once the pass calls
/// `finished`, so a failed pass leaves the resource untouched.
pub struct ResourceCollector<'r> {
    resource: &'r mut WebResource,
    content: ContentMap,
    finished: bool,
}

impl<'r> ResourceCollector<'r> {
    pub fn new(resource: &'r mut WebResource) -> Self {
        Self {
            resource,
            content: ContentMap::new(),
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<'r> ContentSink for ResourceCollector<'r> {
    fn content(&mut self, html: &str, url: &str) {
        let text = clean_html(html);
        if text.is_empty() {
            log_debug!("[resource] Skipping fragment without text: {}", html);
            return;
        }
        self.content.insert(text, url.to_string());
    }

    fn finished(&mut self) {
        self.resource.set_content(std::mem::take(&mut self.content));
        self.finished = true;
    }
}

/// Strips markup from an html fragment, decodes entities and collapses
/// whitespace.
pub fn clean_html(fragment: &str) -> String {
    let parsed = Html::parse_fragment(fragment);
    let text = parsed.root_element().text().collect::<String>();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A scraped article, as written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub url: String,
    pub paragraphs: Vec<String>,
}

impl Article {
    pub fn from_resource(resource: &WebResource) -> Self {
        Self {
            url: resource.url().to_string(),
            paragraphs: resource.content().texts().map(str::to_string).collect(),
        }
    }
}

/// Titles and links from the front page, with links made absolute.
#[derive(Debug, Clone, Serialize)]
pub struct TableOfContents {
    pub url: String,
    pub entries: Vec<ContentEntry>,
}

impl TableOfContents {
    pub fn from_resource(resource: &WebResource) -> Self {
        let base = Url::parse(resource.url()).ok();
        let entries = resource
            .content()
            .entries()
            .iter()
            .map(|entry| ContentEntry {
                text: entry.text.clone(),
                url: resolve_link(base.as_ref(), &entry.url),
            })
            .collect();

        Self {
            url: resource.url().to_string(),
            entries,
        }
    }

    /// Article resources for every entry that has a link.
    pub fn articles(&self) -> Vec<WebResource> {
        self.entries
            .iter()
            .filter(|entry| !entry.url.is_empty())
            .map(|entry| WebResource::new(entry.url.clone()))
            .collect()
    }
}

fn resolve_link(base: Option<&Url>, href: &str) -> String {
    if href.is_empty() {
        return String::new();
    }
    match base.and_then(|base| base.join(href).ok()) {
        Some(url) => url.to_string(),
        None => href.to_string(),
    }
}
