//! In-memory episode source for tests and offline builds

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use super::{ClientError, EpisodeQuery, EpisodeSource, Result, SortOrder};
use crate::episodes::{EpisodeSummary, RawEpisode};

/// Serves a fixed set of episodes the way the REST API would.
///
/// Every list query and every single-episode lookup is recorded so callers
/// can assert on exactly what was requested.
#[derive(Default)]
pub struct InMemorySource {
    episodes: Mutex<Vec<RawEpisode>>,
    queries: Mutex<Vec<EpisodeQuery>>,
    lookups: Mutex<Vec<String>>,
    requests: AtomicU64,
    failing: AtomicBool,
}

impl InMemorySource {
    pub fn new(episodes: Vec<RawEpisode>) -> Self {
        Self {
            episodes: Mutex::new(episodes),
            ..Self::default()
        }
    }

    /// Replace or add an episode
    pub fn upsert(&self, episode: RawEpisode) {
        let mut episodes = self.episodes.lock().unwrap_or_else(|e| e.into_inner());
        match episodes.iter_mut().find(|e| e.id == episode.id) {
            Some(existing) => *existing = episode,
            None => episodes.push(episode),
        }
    }

    /// Make every subsequent request fail with a 503
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Total number of requests served (including failed ones)
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<EpisodeQuery> {
        self.queries.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn begin_request(&self, url: String) -> Result<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ClientError::Status { status: 503, url });
        }
        Ok(())
    }
}

#[async_trait]
impl EpisodeSource for InMemorySource {
    async fn list_episodes(&self, query: &EpisodeQuery) -> Result<Vec<EpisodeSummary>> {
        self.queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(query.clone());
        self.begin_request("memory:///episodes".to_string())?;

        let mut episodes = self.episodes.lock().unwrap_or_else(|e| e.into_inner()).clone();
        if query.sort == "published_at" {
            episodes.sort_by(|a, b| a.published_at.cmp(&b.published_at));
            if query.order == SortOrder::Desc {
                episodes.reverse();
            }
        }
        episodes.truncate(query.limit);

        Ok(episodes.into_iter().map(EpisodeSummary::from).collect())
    }

    async fn get_episode(&self, id: &str) -> Result<RawEpisode> {
        self.lookups
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(id.to_string());
        self.begin_request(format!("memory:///episodes/{id}"))?;

        self.episodes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(id.to_string()))
    }
}
