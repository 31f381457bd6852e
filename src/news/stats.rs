use std::collections::HashMap;
pub use crate::log_info;

#[derive(Debug, Default)]
pub struct DownloadStats {
    pub total_downloads: usize,
    pub successful_downloads: usize,
    pub failed_downloads: usize,
    pub fetch_attempts: usize,
    pub fragments: HashMap<String, usize>,
    pub failed_urls: Vec<(String, String)>, // (url, reason)
}

impl DownloadStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_attempt(&mut self) {
        self.fetch_attempts += 1;
    }

    pub fn record_success(&mut self, url: String, fragments: usize) {
        self.total_downloads += 1;
        self.successful_downloads += 1;
        self.fragments.insert(url, fragments);
    }

    pub fn record_failure(&mut self, url: String, reason: String) {
        self.total_downloads += 1;
        self.failed_downloads += 1;
        self.failed_urls.push((url, reason));
    }

    pub fn print_report(&self) {
        log_info!(
            "[stats] {} downloads: {} succeeded, {} failed, {} fetch attempts",
            self.total_downloads,
            self.successful_downloads,
            self.failed_downloads,
            self.fetch_attempts
        );
        for (url, reason) in &self.failed_urls {
            log_info!("[stats]   failed {}: {}", url, reason);
        }
    }
}
