use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::{
    services::{episode_page, health, listing_page, metrics},
    state::AppState,
};
use crate::client::ApiClient;
use crate::config::Config;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All routes with their shared state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(listing_page))
        .route("/episode/{slug}", get(episode_page))
        .route("/health", get(health))
        .route("/operators/metrics", get(metrics))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve the site on `address`.
///
/// With `prerender` the listing and the most recent detail pages are generated
/// before the listener opens, and a failure there aborts startup.
pub async fn run(config: Config, address: SocketAddr, prerender: bool) -> Result<(), AnyError> {
    let client = ApiClient::new(&config.api.base_url, &config.api.http_config())?;
    info!(base_url = %client.base_url(), "Using episodes API");

    let state = AppState::new(config, Arc::new(client))?;

    if prerender {
        let pages = state.site.prerender().await?;
        info!(pages = pages.len(), "Pre-rendered pages");
    }

    let app = router(state);

    let listener = TcpListener::bind(address).await?;
    info!(%address, "podcastr listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
