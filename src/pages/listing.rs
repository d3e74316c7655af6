//! Listing page (`/`)

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{EpisodeQuery, EpisodeSource, Result};
use crate::episodes::EpisodeSummary;

/// Records exactly as the API returned them, newest first
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ListingProps {
    pub episodes: Vec<EpisodeSummary>,
}

/// Fetch the `limit` most recently published episodes.
///
/// One outbound request per call; errors propagate untouched.
pub async fn get_static_props(source: &dyn EpisodeSource, limit: usize) -> Result<ListingProps> {
    let episodes = source.list_episodes(&EpisodeQuery::latest(limit)).await?;
    debug!(count = episodes.len(), limit, "Fetched listing episodes");
    Ok(ListingProps { episodes })
}
