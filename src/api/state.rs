use std::sync::Arc;

use crate::client::EpisodeSource;
use crate::config::Config;
use crate::observability::Metrics;
use crate::pages::PageError;
use crate::site::Site;

/// Shared handler state; only the page settings of [`Config`] are kept
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<Site>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn EpisodeSource>) -> Result<Self, PageError> {
        let metrics = Arc::new(Metrics::new());
        let site = Site::new(source, config.pages, Arc::clone(&metrics))?;

        Ok(Self {
            site: Arc::new(site),
            metrics,
        })
    }
}
