//! Page handlers
//!
//! Each page is described by the data it needs and how long a rendered copy
//! stays fresh:
//!
//! | Route | Data | Revalidate |
//! |---|---|---|
//! | `/` | [`listing::get_static_props`] | 8 hours |
//! | `/episode/{slug}` | [`detail::get_static_props`] | 24 hours |
//!
//! [`detail::get_static_paths`] lists the detail routes rendered ahead of
//! time; any other slug is handled according to its [`Fallback`] policy.
//! [`PageGenerator`] ties data fetching, mapping and rendering together into a
//! [`RenderedPage`].

pub mod detail;
pub mod listing;

pub use detail::{EpisodeParams, EpisodeProps, StaticPaths};
pub use listing::ListingProps;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::client::{ClientError, EpisodeSource};
use crate::config::PagesConfig;
use crate::episodes::MappingError;
use crate::render::{RenderError, Renderer};

#[derive(Debug, Error)]
pub enum PageError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] ClientError),
    #[error("episode mapping failed: {0}")]
    Mapping(#[from] MappingError),
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("slug cannot be used as a path: {0}")]
    UnsafeSlug(String),
}

/// How a detail route outside the pre-rendered set is served
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fallback {
    /// Generate on first request and hold the response until the page is ready
    #[default]
    Blocking,
    /// Answer with the loading page while the page generates in the background
    Placeholder,
    /// Only pre-rendered routes exist
    NotFound,
}

/// Identifies a page and doubles as its cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageKey {
    Listing,
    Episode(String),
}

impl PageKey {
    pub fn episode(slug: impl Into<String>) -> Self {
        PageKey::Episode(slug.into())
    }

    /// Route path, e.g. `/` or `/episode/{slug}`
    pub fn path(&self) -> String {
        match self {
            PageKey::Listing => "/".to_string(),
            PageKey::Episode(slug) => format!("/episode/{slug}"),
        }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// HTML for one page plus its regeneration metadata
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub key: PageKey,
    pub html: String,
    pub generated_at: DateTime<Utc>,
    pub rendered_at: Instant,
    pub revalidate: Duration,
}

impl RenderedPage {
    pub fn new(key: PageKey, html: String, revalidate: Duration) -> Self {
        Self {
            key,
            html,
            generated_at: Utc::now(),
            rendered_at: Instant::now(),
            revalidate,
        }
    }

    /// Whether the page is still within its revalidate window at `now`
    pub fn is_fresh_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.rendered_at) < self.revalidate
    }
}

/// Fetches page data and renders it
pub struct PageGenerator {
    source: Arc<dyn EpisodeSource>,
    renderer: Renderer,
    config: PagesConfig,
}

impl PageGenerator {
    pub fn new(
        source: Arc<dyn EpisodeSource>,
        config: PagesConfig,
    ) -> Result<Self, RenderError> {
        let renderer = Renderer::new(config.locale)?;
        Ok(Self {
            source,
            renderer,
            config,
        })
    }

    pub fn config(&self) -> &PagesConfig {
        &self.config
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Revalidate window for a page
    pub fn revalidate(&self, key: &PageKey) -> Duration {
        match key {
            PageKey::Listing => self.config.listing_window(),
            PageKey::Episode(_) => self.config.episode_window(),
        }
    }

    /// Detail routes to render ahead of time
    pub async fn static_paths(&self) -> Result<StaticPaths, PageError> {
        Ok(detail::get_static_paths(
            self.source.as_ref(),
            self.config.prerender_count,
            self.config.fallback,
        )
        .await?)
    }

    /// Run one generation cycle for `key`: fetch, map, render
    pub async fn generate(&self, key: &PageKey) -> Result<RenderedPage, PageError> {
        let html = match key {
            PageKey::Listing => {
                let props =
                    listing::get_static_props(self.source.as_ref(), self.config.listing_limit)
                        .await?;
                self.renderer.render_listing(&props)?
            }
            PageKey::Episode(slug) => {
                let params = EpisodeParams { slug: slug.clone() };
                let props =
                    detail::get_static_props(self.source.as_ref(), &params, self.config.locale)
                        .await?;
                self.renderer.render_episode(&props.episode)?
            }
        };

        Ok(RenderedPage::new(key.clone(), html, self.revalidate(key)))
    }
}
