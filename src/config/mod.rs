//! podcastr settings
//!
//! Values are layered, later layers winning:
//!
//! - struct defaults (the site works against `http://localhost:3333` out of the box)
//! - `config/podcastr.toml`, or the file named by `PODCASTR_CONFIG`
//! - `.env` entries and process environment, as `PODCASTR__<SECTION>__<KEY>`
//!
//! ```no_run
//! use podcastr::config::Config;
//!
//! let config = Config::load().expect("configuration");
//! assert_eq!(config.pages.listing_limit, 12);
//! ```
//!
//! Windows and timeouts accept plain seconds or a unit suffix, so
//! `PODCASTR__PAGES__LISTING_REVALIDATE=1h` and `PODCASTR__API__REQUEST_TIMEOUT=30s`
//! both work. Loaded values are validated before use.

mod models;
mod sources;
mod validation;

pub use crate::humanize::{Locale, Window};
pub use models::{ApiConfig, BuildConfig, Config, PagesConfig, ServerConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load from the default file location and the environment, then validate
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Same as [`Config::load`] with an explicit file path
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
