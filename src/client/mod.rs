//! Outbound client for the episodes API
//!
//! The API exposes two endpoints:
//!
//! - `GET /episodes?_limit=N&_sort=published_at&_order=desc` - array of [`EpisodeSummary`]
//! - `GET /episodes/{id}` - a single [`RawEpisode`]
//!
//! Page handlers talk to an [`EpisodeSource`] so they can run against the real
//! [`ApiClient`] or the [`InMemorySource`] used by tests and offline builds.

mod http;
mod memory;

pub use http::{ApiClient, HttpConfig};
pub use memory::InMemorySource;

use async_trait::async_trait;
use thiserror::Error;

use crate::episodes::{EpisodeSummary, RawEpisode};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Episode not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Sort direction for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Query for `GET /episodes`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeQuery {
    pub limit: usize,
    pub sort: String,
    pub order: SortOrder,
}

impl EpisodeQuery {
    /// The `limit` most recently published episodes
    pub fn latest(limit: usize) -> Self {
        Self {
            limit,
            sort: "published_at".to_string(),
            order: SortOrder::Desc,
        }
    }

    /// Query string pairs in the order the API documents them
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("_limit", self.limit.to_string()),
            ("_sort", self.sort.clone()),
            ("_order", self.order.as_str().to_string()),
        ]
    }
}

/// Source of raw episode records
#[async_trait]
pub trait EpisodeSource: Send + Sync {
    /// Fetch a page of episodes
    async fn list_episodes(&self, query: &EpisodeQuery) -> Result<Vec<EpisodeSummary>>;

    /// Fetch a single episode by identifier
    async fn get_episode(&self, id: &str) -> Result<RawEpisode>;
}
