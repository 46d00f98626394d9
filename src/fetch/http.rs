// src/fetch/http.rs
// =============================================================================
// HTTP access to the refranero site.
//
// Key functionality:
// - One reqwest Client for the whole run (connection pooling)
// - Builds index URLs (one per letter) and detail URLs (one per slug)
// - Turns non-2xx responses and transport failures into CrawlError
//
// The fetcher is cloned into every worker. Cloning a reqwest Client only
// bumps a reference count, and the client is safe to use from many tasks.
// =============================================================================

use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::CrawlError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    // Base URL without a trailing slash
    base: String,
}

impl HttpFetcher {
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| CrawlError::Request {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    // Index page listing every idiom starting with `letter`
    //
    // Example: http://cvc.cervantes.es/lengua/refranero/listado.aspx?letra=A
    pub fn index_url(&self, letter: char) -> String {
        format!("{}/listado.aspx?letra={}", self.base, letter)
    }

    // Detail page of one idiom. Slugs are relative paths as found on the
    // index pages, so a leading slash is tolerated.
    pub fn detail_url(&self, slug: &str) -> String {
        format!("{}/{}", self.base, slug.trim_start_matches('/'))
    }

    // Fetches a page and returns its HTML
    pub async fn fetch_page(&self, url: &str) -> Result<String, CrawlError> {
        debug!(url, "fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| CrawlError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| CrawlError::Request {
            url: url.to_string(),
            source,
        })
    }
}
