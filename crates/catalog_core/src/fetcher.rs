use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{Artwork, Page},
    error::FetchError,
    protocol::{ApiErrorBody, ArtworksResponse, ARTWORK_FIELDS},
};
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://api.artic.edu/api/v1";

/// Source of catalog pages. One call is one request: no retries and no
/// caching.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, page_index: u32) -> Result<Page, FetchError>;
}

pub struct HttpPageFetcher {
    http: Client,
    endpoint: Url,
}

impl HttpPageFetcher {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = artworks_endpoint(base_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build http client")?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn artworks_endpoint(base_url: &str) -> Result<Url> {
    let base_url = base_url.trim().trim_end_matches('/');
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(anyhow!(
            "api base url must start with http:// or https://, got '{base_url}'"
        ));
    }
    Url::parse(&format!("{base_url}/artworks"))
        .with_context(|| format!("invalid api base url: {base_url}"))
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, page_index: u32) -> Result<Page, FetchError> {
        if page_index == 0 {
            return Err(FetchError::InvalidPage(page_index));
        }

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[
                ("page", page_index.to_string()),
                ("fields", ARTWORK_FIELDS.join(",")),
            ])
            .send()
            .await
            .map_err(|err| FetchError::transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|body| body.message())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            warn!(
                page = page_index,
                status = status.as_u16(),
                %message,
                "catalog: page request rejected"
            );
            return Err(FetchError::status(status.as_u16(), message));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::transport(err.to_string()))?;
        let decoded: ArtworksResponse =
            serde_json::from_slice(&body).map_err(|err| FetchError::malformed(err.to_string()))?;

        let records: Vec<Artwork> = decoded.data.into_iter().map(Artwork::from).collect();
        debug!(
            page = page_index,
            records = records.len(),
            total_pages = decoded.pagination.total_pages,
            "catalog: page fetched"
        );
        Ok(Page::new(
            page_index,
            records,
            decoded.pagination.total_pages,
        ))
    }
}

#[cfg(test)]
#[path = "tests/fetcher_tests.rs"]
mod tests;
