use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Unsupported API URL scheme '{scheme}', expected 'http' or 'https'")]
    UnsupportedScheme { scheme: String },

    #[error("Listing limit must be positive")]
    ZeroListingLimit,

    #[error("Timeout must be positive: {field}")]
    ZeroTimeout { field: &'static str },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_api(config)?;
    validate_pages(config)?;
    Ok(())
}

/// The base URL must be an absolute http(s) URL usable as a path prefix
fn validate_api(config: &Config) -> Result<(), ValidationError> {
    let url = reqwest::Url::parse(&config.api.base_url).map_err(|e| {
        ValidationError::InvalidBaseUrl {
            url: config.api.base_url.clone(),
            reason: e.to_string(),
        }
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ValidationError::UnsupportedScheme {
            scheme: url.scheme().to_string(),
        });
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(ValidationError::InvalidBaseUrl {
            url: config.api.base_url.clone(),
            reason: "query strings and fragments are not allowed".to_string(),
        });
    }

    if config.api.connect_timeout.is_some_and(|w| w.as_secs() == 0) {
        return Err(ValidationError::ZeroTimeout {
            field: "api.connect_timeout",
        });
    }
    if config.api.request_timeout.is_some_and(|w| w.as_secs() == 0) {
        return Err(ValidationError::ZeroTimeout {
            field: "api.request_timeout",
        });
    }

    Ok(())
}

/// Revalidate windows may be zero, which makes every cached page stale
fn validate_pages(config: &Config) -> Result<(), ValidationError> {
    if config.pages.listing_limit == 0 {
        return Err(ValidationError::ZeroListingLimit);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::humanize::Window;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = Config::default();
        config.api.base_url = "localhost:3333".to_string();
        assert!(matches!(
            validate(&config),
            Err(ValidationError::UnsupportedScheme { .. })
        ));

        config.api.base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidBaseUrl { .. })
        ));

        config.api.base_url = "ftp://example.com".to_string();
        assert!(matches!(
            validate(&config),
            Err(ValidationError::UnsupportedScheme { .. })
        ));

        config.api.base_url = "http://example.com/?x=1".to_string();
        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_zero_listing_limit() {
        let mut config = Config::default();
        config.pages.listing_limit = 0;
        config.pages.prerender_count = 0;
        assert!(matches!(
            validate(&config),
            Err(ValidationError::ZeroListingLimit)
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.api.request_timeout = Some(Window(0));
        assert!(matches!(
            validate(&config),
            Err(ValidationError::ZeroTimeout { .. })
        ));
    }

    #[test]
    fn test_zero_revalidate_allowed() {
        let mut config = Config::default();
        config.pages.listing_revalidate = Window(0);
        config.pages.episode_revalidate = Window(0);
        assert!(validate(&config).is_ok());
    }
}
