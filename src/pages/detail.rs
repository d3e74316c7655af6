//! Episode detail page (`/episode/{slug}`)

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Fallback, PageError};
use crate::client::{self, EpisodeQuery, EpisodeSource};
use crate::episodes::{Episode, map_episode};
use crate::humanize::Locale;

/// Route parameters of a detail page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EpisodeParams {
    pub slug: String,
}

/// Detail routes rendered ahead of time, in API order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPaths {
    pub paths: Vec<EpisodeParams>,
    pub fallback: Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeProps {
    pub episode: Episode,
}

/// One route per episode among the `count` most recently published.
pub async fn get_static_paths(
    source: &dyn EpisodeSource,
    count: usize,
    fallback: Fallback,
) -> client::Result<StaticPaths> {
    let episodes = source.list_episodes(&EpisodeQuery::latest(count)).await?;

    let paths = episodes
        .into_iter()
        .map(|episode| EpisodeParams { slug: episode.id })
        .collect::<Vec<_>>();

    debug!(count = paths.len(), ?fallback, "Resolved detail paths");

    Ok(StaticPaths { paths, fallback })
}

/// Fetch `GET /episodes/{slug}` and map it for display.
pub async fn get_static_props(
    source: &dyn EpisodeSource,
    params: &EpisodeParams,
    locale: Locale,
) -> Result<EpisodeProps, PageError> {
    let raw = source.get_episode(&params.slug).await?;
    let episode = map_episode(&raw, locale)?;
    Ok(EpisodeProps { episode })
}
