use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_filename")]
    pub filename: String,
}

/// The news site being scraped.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub name: String,
    /// BCP 47 tag, used by readers to pick a voice for the text.
    #[serde(default = "default_site_locale")]
    pub locale: String,
    #[serde(default = "default_toc_url")]
    pub toc_url: String,
}

/// Class names and snippets that identify content on the site's pages.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkerConfig {
    #[serde(default = "default_article_selector")]
    pub article_selector: String,
    #[serde(default = "default_title_class")]
    pub title_class: String,
    #[serde(default = "default_intro_class")]
    pub intro_class: String,
    #[serde(default = "default_content_class")]
    pub content_class: String,
    #[serde(default = "default_boilerplate")]
    pub boilerplate: String,
    #[serde(default = "default_teaser_title_selector")]
    pub teaser_title_selector: String,
    #[serde(default = "default_teaser_class")]
    pub teaser_class: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TocConfig {
    /// Fail the table of contents pass when a title has no teaser container.
    #[serde(default = "default_toc_strict")]
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64,
    #[serde(default = "default_request_delay")]
    pub request_delay: u64,
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_html_dir")]
    pub html_dir: String,
    #[serde(default = "default_json_dir")]
    pub json_dir: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub markers: MarkerConfig,

    #[serde(default)]
    pub toc: TocConfig,

    #[serde(default)]
    pub download: DownloadConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LogConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: default_log_directory(),
            filename: default_log_filename(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            locale: default_site_locale(),
            toc_url: default_toc_url(),
        }
    }
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            article_selector: default_article_selector(),
            title_class: default_title_class(),
            intro_class: default_intro_class(),
            content_class: default_content_class(),
            boilerplate: default_boilerplate(),
            teaser_title_selector: default_teaser_title_selector(),
            teaser_class: default_teaser_class(),
        }
    }
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            strict: default_toc_strict(),
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay: default_retry_delay(),
            request_delay: default_request_delay(),
            max_articles: default_max_articles(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            html_dir: default_html_dir(),
            json_dir: default_json_dir(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::FileRead)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.site.toc_url.is_empty() {
            return Err(ConfigError::MissingField("site.toc_url".to_string()).into());
        }
        if !self.site.toc_url.starts_with("http") {
            return Err(ConfigError::InvalidValue(format!(
                "site.toc_url must start with http(s): {}",
                self.site.toc_url
            ))
            .into());
        }

        let required = [
            ("markers.article_selector", &self.markers.article_selector),
            ("markers.teaser_title_selector", &self.markers.teaser_title_selector),
            ("markers.teaser_class", &self.markers.teaser_class),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(field.to_string()).into());
            }
        }

        if self.download.max_retries == 0 {
            return Err(ConfigError::InvalidValue(
                "download.max_retries must be greater than 0".to_string(),
            )
            .into());
        }

        if self.download.retry_delay == 0 {
            return Err(ConfigError::InvalidValue(
                "download.retry_delay must be greater than 0".to_string(),
            )
            .into());
        }

        if self.download.max_articles == 0 {
            return Err(ConfigError::InvalidValue(
                "download.max_articles must be greater than 0".to_string(),
            )
            .into());
        }

        if self.output.html_dir.is_empty() || self.output.json_dir.is_empty() {
            return Err(
                ConfigError::InvalidValue("output directories cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}

fn default_site_name() -> String {
    "VRT News".to_string()
}

fn default_site_locale() -> String {
    "nl-BE".to_string()
}

fn default_toc_url() -> String {
    "https://www.vrt.be/vrtnws/nl".to_string()
}

fn default_article_selector() -> String {
    "h1, h2, h3, h4, h5, p, li".to_string()
}

fn default_title_class() -> String {
    "vrt-title".to_string()
}

fn default_intro_class() -> String {
    "article__intro".to_string()
}

fn default_content_class() -> String {
    "parbase".to_string()
}

fn default_boilerplate() -> String {
    "Lees verder onder".to_string()
}

fn default_teaser_title_selector() -> String {
    "h2.vrt-teaser__title".to_string()
}

fn default_teaser_class() -> String {
    "vrt-teaser".to_string()
}

fn default_toc_strict() -> bool {
    true
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    5
}

fn default_request_delay() -> u64 {
    2
}

fn default_max_articles() -> usize {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36".to_string()
}

fn default_html_dir() -> String {
    "local_html".to_string()
}

fn default_json_dir() -> String {
    "json_data".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_filename() -> String {
    "gazet-scraper.log".to_string()
}
