//! Rendered page cache with stale-while-revalidate semantics
//!
//! A cached page is *fresh* until its revalidate window elapses and *stale*
//! afterwards. Stale pages keep being served; the caller starts a background
//! regeneration, and [`PageCache::try_begin_regeneration`] makes sure only one
//! runs per page at a time. Misses that must block go through
//! [`PageCache::get_or_generate`], which lets concurrent requests for the same
//! page share a single generation.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::debug;

use crate::pages::{PageKey, RenderedPage};

/// Result of a cache lookup
#[derive(Debug, Clone)]
pub enum Lookup {
    Fresh(Arc<RenderedPage>),
    Stale(Arc<RenderedPage>),
    Miss,
}

#[derive(Default)]
pub struct PageCache {
    pages: RwLock<HashMap<PageKey, Arc<RenderedPage>>>,
    regenerating: Mutex<HashSet<PageKey>>,
    generation_locks: Mutex<HashMap<PageKey, Arc<AsyncMutex<()>>>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lookup(&self, key: &PageKey) -> Lookup {
        self.lookup_at(key, Instant::now()).await
    }

    /// Classify the cached copy of `key` as of `now`
    pub async fn lookup_at(&self, key: &PageKey, now: Instant) -> Lookup {
        match self.pages.read().await.get(key) {
            Some(page) if page.is_fresh_at(now) => Lookup::Fresh(Arc::clone(page)),
            Some(page) => Lookup::Stale(Arc::clone(page)),
            None => Lookup::Miss,
        }
    }

    /// Cached page regardless of freshness
    pub async fn get(&self, key: &PageKey) -> Option<Arc<RenderedPage>> {
        self.pages.read().await.get(key).cloned()
    }

    /// Store a page, replacing any previous version
    pub async fn insert(&self, page: RenderedPage) -> Arc<RenderedPage> {
        let page = Arc::new(page);
        let previous = self
            .pages
            .write()
            .await
            .insert(page.key.clone(), Arc::clone(&page));

        debug!(
            key = %page.key,
            replaced = previous.is_some(),
            "Page cached"
        );

        page
    }

    /// All cached pages, ordered by path
    pub async fn snapshot(&self) -> Vec<Arc<RenderedPage>> {
        let mut pages: Vec<_> = self.pages.read().await.values().cloned().collect();
        pages.sort_by_key(|page| page.key.path());
        pages
    }

    pub async fn len(&self) -> usize {
        self.pages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pages.read().await.is_empty()
    }

    /// Claim the background regeneration slot for `key`.
    ///
    /// Returns `None` while another regeneration of the same page is running.
    /// The slot is released when the guard drops.
    pub fn try_begin_regeneration(self: &Arc<Self>, key: &PageKey) -> Option<RegenerationGuard> {
        let mut regenerating = self.regenerating.lock().unwrap_or_else(|e| e.into_inner());
        if !regenerating.insert(key.clone()) {
            return None;
        }

        Some(RegenerationGuard {
            cache: Arc::clone(self),
            key: key.clone(),
        })
    }

    pub fn is_regenerating(&self, key: &PageKey) -> bool {
        self.regenerating
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(key)
    }

    /// Return the cached page for `key` (fresh or stale), or run `generate`
    /// and cache its result.
    ///
    /// Concurrent callers for the same key wait for the first generation
    /// instead of starting their own. Errors are returned to the caller that
    /// ran the generation and nothing is cached; the next waiter retries.
    pub async fn get_or_generate<F, Fut, E>(
        &self,
        key: &PageKey,
        generate: F,
    ) -> Result<Arc<RenderedPage>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<RenderedPage, E>>,
    {
        let lock = self.generation_lock(key);

        let result = {
            let _guard = lock.lock().await;
            match self.get(key).await {
                Some(page) => Ok(page),
                None => match generate().await {
                    Ok(page) => Ok(self.insert(page).await),
                    Err(err) => Err(err),
                },
            }
        };

        self.release_generation_lock(key, lock);
        result
    }

    fn generation_lock(&self, key: &PageKey) -> Arc<AsyncMutex<()>> {
        let mut locks = self.generation_locks.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(locks.entry(key.clone()).or_default())
    }

    /// Drop the per-key lock once no other caller holds it
    fn release_generation_lock(&self, key: &PageKey, lock: Arc<AsyncMutex<()>>) {
        let mut locks = self.generation_locks.lock().unwrap_or_else(|e| e.into_inner());
        // One reference in the map, one here
        let idle = Arc::strong_count(&lock) <= 2;
        drop(lock);
        if idle {
            locks.remove(key);
        }
    }
}

/// Marks a page as being regenerated until dropped
pub struct RegenerationGuard {
    cache: Arc<PageCache>,
    key: PageKey,
}

impl RegenerationGuard {
    pub fn key(&self) -> &PageKey {
        &self.key
    }
}

impl Drop for RegenerationGuard {
    fn drop(&mut self) {
        self.cache
            .regenerating
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.key);
    }
}
