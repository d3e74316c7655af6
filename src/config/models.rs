use crate::client::HttpConfig;
use crate::humanize::{Locale, Window};
use crate::pages::Fallback;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub pages: PagesConfig,
    #[serde(default)]
    pub build: BuildConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

/// Episodes API connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// No connect timeout unless set
    pub connect_timeout: Option<Window>,
    /// No request timeout unless set
    pub request_timeout: Option<Window>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout: None,
            request_timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            connect_timeout: self.connect_timeout.map(|w| w.as_duration()),
            request_timeout: self.request_timeout.map(|w| w.as_duration()),
            user_agent: self.user_agent.clone(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_user_agent() -> String {
    HttpConfig::default().user_agent
}

/// Page generation and regeneration policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PagesConfig {
    #[serde(default)]
    pub locale: Locale,
    /// Episodes shown on the listing page
    #[serde(default = "default_listing_limit")]
    pub listing_limit: usize,
    #[serde(default = "default_listing_revalidate")]
    pub listing_revalidate: Window,
    /// Most recent episodes pre-rendered as detail pages
    #[serde(default = "default_prerender_count")]
    pub prerender_count: usize,
    #[serde(default = "default_episode_revalidate")]
    pub episode_revalidate: Window,
    #[serde(default)]
    pub fallback: Fallback,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            listing_limit: default_listing_limit(),
            listing_revalidate: default_listing_revalidate(),
            prerender_count: default_prerender_count(),
            episode_revalidate: default_episode_revalidate(),
            fallback: Fallback::default(),
        }
    }
}

impl PagesConfig {
    pub fn listing_window(&self) -> Duration {
        self.listing_revalidate.as_duration()
    }

    pub fn episode_window(&self) -> Duration {
        self.episode_revalidate.as_duration()
    }
}

fn default_listing_limit() -> usize {
    12
}

fn default_listing_revalidate() -> Window {
    Window::hours(8)
}

fn default_prerender_count() -> usize {
    2
}

fn default_episode_revalidate() -> Window {
    Window::hours(24)
}

/// Static build output settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
        }
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("dist")
}
