//! reqwest-backed episodes API client

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::{ClientError, EpisodeQuery, EpisodeSource, Result};
use crate::episodes::{EpisodeSummary, RawEpisode};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            request_timeout: None,
            user_agent: concat!("podcastr/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Client for the episodes REST API.
///
/// Every call is a single request/response exchange; there is no retry.
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:3333`)
    pub fn new(base_url: &str, config: &HttpConfig) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let mut builder = Client::builder().user_agent(&config.user_agent);

        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended as percent-encoded path segments
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch(&self, url: Url, query: &[(&'static str, String)]) -> Result<Bytes> {
        debug!(%url, ?query, "Fetching from episodes API");

        let response = self
            .client
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Timeout(url.to_string())
                } else {
                    ClientError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::RequestFailed(format!("Failed to read body: {}", e)))?;

        debug!(%url, size = bytes.len(), "Fetch completed");

        Ok(bytes)
    }

    fn decode<T: DeserializeOwned>(url: &Url, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl EpisodeSource for ApiClient {
    async fn list_episodes(&self, query: &EpisodeQuery) -> Result<Vec<EpisodeSummary>> {
        let url = self.endpoint(&["episodes"])?;
        let bytes = self.fetch(url.clone(), &query.to_params()).await?;
        Self::decode(&url, &bytes)
    }

    async fn get_episode(&self, id: &str) -> Result<RawEpisode> {
        let url = self.endpoint(&["episodes", id])?;
        let bytes = match self.fetch(url.clone(), &[]).await {
            Err(ClientError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                return Err(ClientError::NotFound(id.to_string()));
            }
            other => other?,
        };
        Self::decode(&url, &bytes)
    }
}
