use super::models::Config;
use config::{ConfigError, Environment, File, Map};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "PODCASTR_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/podcastr.toml";
const ENV_PREFIX: &str = "PODCASTR";
const ENV_SEPARATOR: &str = "__";

/// Resolve the config file path, pull in `.env`, and load
pub fn load() -> Result<Config, ConfigError> {
    // A missing .env is not an error
    let _ = dotenvy::dotenv();

    let config_path = env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    load_from_sources(config_path)
}

/// TOML at `config_path` (optional) overlaid with `PODCASTR__*` variables
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    load_layers(config_path, None)
}

/// `env` replaces the process environment when set
fn load_layers(
    config_path: PathBuf,
    env: Option<Map<String, String>>,
) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!(path = %config_path.display(), "Reading config file");
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::warn!(
            path = %config_path.display(),
            "No config file, using defaults and PODCASTR__* overrides"
        );
    }

    // PODCASTR__API__BASE_URL -> api.base_url
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .source(env),
    );

    let config = builder.build()?;
    config.try_deserialize()
}
