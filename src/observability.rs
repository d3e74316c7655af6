//! Page generation and cache counters, plus tracing setup

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber; `RUST_LOG` overrides the `info` default
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    pages_generated: AtomicU64,
    generation_failures: AtomicU64,
    regenerations: AtomicU64,
    cache_fresh_hits: AtomicU64,
    cache_stale_hits: AtomicU64,
    cache_misses: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_generated(&self) {
        self.pages_generated.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "pages_generated", "Metric incremented");
    }

    pub fn generation_failed(&self) {
        self.generation_failures.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "generation_failures", "Metric incremented");
    }

    pub fn regeneration_started(&self) {
        self.regenerations.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "regenerations", "Metric incremented");
    }

    pub fn fresh_hit(&self) {
        self.cache_fresh_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn stale_hit(&self) {
        self.cache_stale_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            pages_generated: self.pages_generated.load(Ordering::Relaxed),
            generation_failures: self.generation_failures.load(Ordering::Relaxed),
            regenerations: self.regenerations.load(Ordering::Relaxed),
            cache_fresh_hits: self.cache_fresh_hits.load(Ordering::Relaxed),
            cache_stale_hits: self.cache_stale_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub pages_generated: u64,
    pub generation_failures: u64,
    pub regenerations: u64,
    pub cache_fresh_hits: u64,
    pub cache_stale_hits: u64,
    pub cache_misses: u64,
}
