use super::resource::WebResource;
use super::site::{NewsSite, PassKind};
use super::stats::DownloadStats;
use crate::client::Client;
use crate::config::DownloadConfig;
use crate::error::Result;
use crate::utils;
pub use crate::{log_debug, log_error, log_info, log_warn};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

/// Source of page html.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

#[async_trait]
impl PageFetcher for Client {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.get(url).await?;
        Ok(response.content)
    }
}

#[derive(Debug)]
pub enum DownloadOutcome {
    Completed(WebResource),
    Failed {
        resource: WebResource,
        message: String,
    },
}

impl DownloadOutcome {
    pub fn resource(&self) -> &WebResource {
        match self {
            DownloadOutcome::Completed(resource) => resource,
            DownloadOutcome::Failed { resource, .. } => resource,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, DownloadOutcome::Completed(_))
    }
}

/// Downloads and scrapes resources one at a time, in scheduling order.
pub struct DownloadManager<F: PageFetcher> {
    fetcher: F,
    site: NewsSite,
    kind: PassKind,
    settings: DownloadConfig,
    snapshot_dir: Option<PathBuf>,
    queue: VecDeque<WebResource>,
    stats: DownloadStats,
}

impl<F: PageFetcher> DownloadManager<F> {
    pub fn new(fetcher: F, site: NewsSite, kind: PassKind, settings: DownloadConfig) -> Self {
        Self {
            fetcher,
            site,
            kind,
            settings,
            snapshot_dir: None,
            queue: VecDeque::new(),
            stats: DownloadStats::new(),
        }
    }

    /// Saves every downloaded page under `dir` before scraping it.
    pub fn with_snapshots(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = Some(dir.into());
        self
    }

    /// Queues `resource` for download.
    ///
    /// A resource that already has content is handed back as completed right
    /// away. A url that is already queued is not queued twice.
    pub fn schedule(&mut self, resource: WebResource) -> Option<DownloadOutcome> {
        if resource.has_content() {
            log_debug!("[download] {} already has content", resource.url());
            return Some(DownloadOutcome::Completed(resource));
        }

        if self.queue.iter().any(|queued| queued.url() == resource.url()) {
            log_debug!("[download] {} is already scheduled", resource.url());
            return None;
        }

        self.queue.push_back(resource);
        None
    }

    /// Drops a queued resource. Returns whether it was queued.
    pub fn remove(&mut self, url: &str) -> bool {
        let before = self.queue.len();
        self.queue.retain(|resource| resource.url() != url);
        before != self.queue.len()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn stats(&self) -> &DownloadStats {
        &self.stats
    }

    /// Works through the queue until it is empty.
    pub async fn run(&mut self) -> Vec<DownloadOutcome> {
        let mut outcomes = Vec::with_capacity(self.queue.len());

        while let Some(resource) = self.queue.pop_front() {
            outcomes.push(self.download(resource).await);

            if !self.queue.is_empty() && self.settings.request_delay > 0 {
                tokio::time::sleep(Duration::from_secs(self.settings.request_delay)).await;
            }
        }

        outcomes
    }

    async fn download(&mut self, mut resource: WebResource) -> DownloadOutcome {
        log_info!("[download] Fetching {}", resource.url());

        let html = match self.fetch_with_retries(resource.url()).await {
            Ok(html) => html,
            Err(e) => {
                log_error!(&e => "[download] Giving up on {}", resource.url());
                let message = e.to_string();
                self.stats
                    .record_failure(resource.url().to_string(), message.clone());
                return DownloadOutcome::Failed { resource, message };
            }
        };

        if let Some(dir) = &self.snapshot_dir {
            match utils::save_html(dir, resource.url(), &html) {
                Ok(path) => log_debug!("[download] Saved snapshot to {:?}", path),
                Err(e) => log_warn!("[download] Could not save snapshot: {}", e),
            }
        }

        match self.site.scrape(self.kind, &html, &mut resource) {
            Ok(fragments) => {
                self.stats
                    .record_success(resource.url().to_string(), fragments);
                DownloadOutcome::Completed(resource)
            }
            Err(e) => {
                log_error!(&e => "[download] Scraping {} failed", resource.url());
                let message = e.to_string();
                self.stats
                    .record_failure(resource.url().to_string(), message.clone());
                DownloadOutcome::Failed { resource, message }
            }
        }
    }

    async fn fetch_with_retries(&mut self, url: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            self.stats.record_attempt();

            match self.fetcher.fetch(url).await {
                Ok(html) => return Ok(html),
                Err(e) if attempt >= self.settings.max_retries => return Err(e),
                Err(e) => {
                    log_warn!(
                        "[download] Attempt {}/{} for {} failed: {}",
                        attempt,
                        self.settings.max_retries,
                        url,
                        e
                    );
                    tokio::time::sleep(Duration::from_secs(self.settings.retry_delay)).await;
                }
            }
        }
    }
}
