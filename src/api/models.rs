//! JSON bodies of the operator endpoints

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cached_pages: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub pages_generated: u64,
    pub generation_failures: u64,
    pub regenerations: u64,
    pub cache_fresh_hits: u64,
    pub cache_stale_hits: u64,
    pub cache_misses: u64,
    pub cached_pages: usize,
}
