//! Static generation and incremental regeneration
//!
//! [`Site`] owns the page cache and decides, per request, whether to serve a
//! cached page, regenerate it in the background, or generate it on the spot:
//!
//! 1. Fresh hit: serve the cached page.
//! 2. Stale hit: serve the cached page and regenerate it in the background.
//!    A failed regeneration keeps the stale page.
//! 3. Miss: the listing and, under [`Fallback::Blocking`], any detail page are
//!    generated while the request waits. [`Fallback::Placeholder`] answers with
//!    the loading page instead. [`Fallback::NotFound`] generates only the
//!    routes [`PageGenerator::static_paths`] lists and answers 404 otherwise.
//!
//! [`Site::prerender`] fills the cache before the first request and
//! [`Site::write_to`] dumps it as a static tree of `index.html` files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{error, info, warn};

use crate::cache::{Lookup, PageCache};
use crate::client::EpisodeSource;
use crate::config::PagesConfig;
use crate::observability::Metrics;
use crate::pages::{Fallback, PageError, PageGenerator, PageKey, RenderedPage};

/// Outcome of serving a route
#[derive(Debug, Clone)]
pub enum Served {
    Page(Arc<RenderedPage>),
    /// Loading placeholder for a page still being generated
    Loading(String),
    NotFound,
}

pub struct Site {
    generator: PageGenerator,
    cache: Arc<PageCache>,
    metrics: Arc<Metrics>,
    /// Pre-rendered detail slugs, resolved on first use
    static_slugs: OnceCell<HashSet<String>>,
}

impl Site {
    pub fn new(
        source: Arc<dyn EpisodeSource>,
        config: PagesConfig,
        metrics: Arc<Metrics>,
    ) -> Result<Self, PageError> {
        Ok(Self {
            generator: PageGenerator::new(source, config)?,
            cache: Arc::new(PageCache::new()),
            metrics,
            static_slugs: OnceCell::new(),
        })
    }

    pub fn cache(&self) -> &Arc<PageCache> {
        &self.cache
    }

    pub fn config(&self) -> &PagesConfig {
        self.generator.config()
    }

    async fn generate(&self, key: &PageKey) -> Result<RenderedPage, PageError> {
        match self.generator.generate(key).await {
            Ok(page) => {
                self.metrics.page_generated();
                info!(%key, bytes = page.html.len(), "Page generated");
                Ok(page)
            }
            Err(err) => {
                self.metrics.generation_failed();
                error!(%key, error = %err, "Page generation failed");
                Err(err)
            }
        }
    }

    /// Generate the listing page and every pre-rendered detail page.
    ///
    /// Any failure aborts the whole run, the same way a failing page fails a
    /// static build. Returns the keys generated, listing first.
    pub async fn prerender(&self) -> Result<Vec<PageKey>, PageError> {
        let mut generated = vec![PageKey::Listing];
        let listing = self.generate(&PageKey::Listing).await?;
        self.cache.insert(listing).await;

        let static_paths = self.generator.static_paths().await?;
        let slugs = static_paths.paths.iter().map(|p| p.slug.clone()).collect();
        // Already resolved by an earlier request otherwise
        let _ = self.static_slugs.set(slugs);

        for params in static_paths.paths {
            let key = PageKey::Episode(params.slug);
            let page = self.generate(&key).await?;
            self.cache.insert(page).await;
            generated.push(key);
        }

        info!(pages = generated.len(), "Static generation complete");
        Ok(generated)
    }

    /// Serve `key` from the cache, generating or regenerating as needed
    pub async fn serve(self: &Arc<Self>, key: &PageKey) -> Result<Served, PageError> {
        match self.cache.lookup(key).await {
            Lookup::Fresh(page) => {
                self.metrics.fresh_hit();
                Ok(Served::Page(page))
            }
            Lookup::Stale(page) => {
                self.metrics.stale_hit();
                self.spawn_regeneration(key.clone());
                Ok(Served::Page(page))
            }
            Lookup::Miss => {
                self.metrics.miss();
                self.serve_miss(key).await
            }
        }
    }

    async fn serve_miss(self: &Arc<Self>, key: &PageKey) -> Result<Served, PageError> {
        let fallback = match key {
            PageKey::Listing => Fallback::Blocking,
            PageKey::Episode(_) => self.config().fallback,
        };

        match fallback {
            Fallback::Blocking => self.generate_blocking(key).await,
            Fallback::Placeholder => {
                self.spawn_regeneration(key.clone());
                let html = self.generator.renderer().render_loading()?;
                Ok(Served::Loading(html))
            }
            Fallback::NotFound => {
                if self.is_static_path(key).await? {
                    self.generate_blocking(key).await
                } else {
                    Ok(Served::NotFound)
                }
            }
        }
    }

    async fn generate_blocking(&self, key: &PageKey) -> Result<Served, PageError> {
        let page = self
            .cache
            .get_or_generate(key, || self.generate(key))
            .await?;
        Ok(Served::Page(page))
    }

    /// Whether `key` is among the pre-rendered routes
    async fn is_static_path(&self, key: &PageKey) -> Result<bool, PageError> {
        let PageKey::Episode(slug) = key else {
            return Ok(true);
        };

        let slugs = self
            .static_slugs
            .get_or_try_init(|| async {
                let static_paths = self.generator.static_paths().await?;
                Ok::<_, PageError>(
                    static_paths
                        .paths
                        .into_iter()
                        .map(|p| p.slug)
                        .collect::<HashSet<_>>(),
                )
            })
            .await?;

        Ok(slugs.contains(slug))
    }

    /// Regenerate `key` in the background unless a regeneration is already running.
    ///
    /// Returns whether a new regeneration was started.
    pub fn spawn_regeneration(self: &Arc<Self>, key: PageKey) -> bool {
        let Some(guard) = self.cache.try_begin_regeneration(&key) else {
            return false;
        };

        self.metrics.regeneration_started();
        let site = Arc::clone(self);

        tokio::spawn(async move {
            match site.generate(guard.key()).await {
                Ok(page) => {
                    site.cache.insert(page).await;
                }
                Err(_) => {
                    warn!(key = %guard.key(), "Regeneration failed, keeping previous version");
                }
            }
            drop(guard);
        });

        true
    }

    /// Write every cached page under `out_dir`; returns the files written
    pub async fn write_to(&self, out_dir: &Path) -> Result<Vec<PathBuf>, PageError> {
        let mut written = Vec::new();

        for page in self.cache.snapshot().await {
            let path = output_path(out_dir, &page.key)?;
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, page.html.as_bytes()).await?;
            info!(key = %page.key, path = %path.display(), "Page written");
            written.push(path);
        }

        Ok(written)
    }

    /// Static generation followed by writing the result to `out_dir`
    pub async fn build(&self, out_dir: &Path) -> Result<Vec<PathBuf>, PageError> {
        self.prerender().await?;
        self.write_to(out_dir).await
    }
}

/// `index.html` location for a page inside the build directory
fn output_path(out_dir: &Path, key: &PageKey) -> Result<PathBuf, PageError> {
    match key {
        PageKey::Listing => Ok(out_dir.join("index.html")),
        PageKey::Episode(slug) => {
            let unsafe_slug = slug.is_empty()
                || slug == "."
                || slug == ".."
                || slug.contains(['/', '\\', '\0']);
            if unsafe_slug {
                return Err(PageError::UnsafeSlug(slug.clone()));
            }
            Ok(out_dir.join("episode").join(slug).join("index.html"))
        }
    }
}
