mod builder;

use crate::config::Config;
use crate::error::{ClientError, Result};
pub use builder::ClientBuilder;
use rquest::Client as RquestClient;
use url::Url;

#[derive(Debug)]
pub struct ClientResponse {
    pub status: u16,
    pub content: String,
}

pub struct Client {
    inner: RquestClient,
    base: Url,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Client for the configured site, sending its user agent and language.
    pub fn for_site(config: &Config) -> Result<Self> {
        Client::builder()
            .base_url(&config.site.toc_url)
            .user_agent(&config.download.user_agent)?
            .language(&config.site.locale)?
            .chrome_impersonation(true)
            .build()
    }

    /// Fetches `path`, which may be relative to the base url or absolute.
    pub async fn get(&self, path: &str) -> Result<ClientResponse> {
        let url = self.build_url(path)?;
        self.request(url.as_str()).await
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("Invalid path {}: {}", path, e)).into())
    }

    async fn request(&self, url: &str) -> Result<ClientResponse> {
        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let is_success = response.status().is_success();
        let content = response.text().await.map_err(|e| {
            ClientError::RequestFailed(format!("Failed to get response text: {}", e))
        })?;

        if !is_success {
            return Err(ClientError::ResponseError {
                status_code: status,
                message: format!("GET {}", url),
            }
            .into());
        }

        Ok(ClientResponse { status, content })
    }
}
