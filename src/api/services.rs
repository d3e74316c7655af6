use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use super::{
    models::{HealthResponse, MetricsResponse},
    state::AppState,
    utils::{cache_control, http_date},
};
use crate::api::error::ApiError;
use crate::pages::PageKey;
use crate::site::Served;

/// Listing page (GET /)
pub async fn listing_page(State(state): State<AppState>) -> Result<Response, ApiError> {
    serve_page(&state, PageKey::Listing).await
}

/// Episode detail page (GET /episode/{slug})
///
/// Slugs outside the pre-rendered set are handled by the configured fallback:
/// blocking generation by default, so a slug the API knows is never a 404.
pub async fn episode_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    serve_page(&state, PageKey::Episode(slug)).await
}

async fn serve_page(state: &AppState, key: PageKey) -> Result<Response, ApiError> {
    let response = match state.site.serve(&key).await? {
        Served::Page(page) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, mime::TEXT_HTML_UTF_8.to_string()),
                (header::CACHE_CONTROL, cache_control(page.revalidate)),
                (header::LAST_MODIFIED, http_date(page.generated_at)),
            ],
            page.html.clone(),
        )
            .into_response(),
        Served::Loading(html) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, mime::TEXT_HTML_UTF_8.to_string()),
                (header::CACHE_CONTROL, "no-store".to_string()),
            ],
            html,
        )
            .into_response(),
        Served::NotFound => return Err(ApiError::NotFound(key.path())),
    };

    Ok(response)
}

/// Health check endpoint (GET /health)
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cached_pages: state.site.cache().len().await,
    };

    (StatusCode::OK, Json(response))
}

/// Counter snapshot (GET /operators/metrics)
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.metrics.snapshot();
    let response = MetricsResponse {
        pages_generated: snapshot.pages_generated,
        generation_failures: snapshot.generation_failures,
        regenerations: snapshot.regenerations,
        cache_fresh_hits: snapshot.cache_fresh_hits,
        cache_stale_hits: snapshot.cache_stale_hits,
        cache_misses: snapshot.cache_misses,
        cached_pages: state.site.cache().len().await,
    };

    (StatusCode::OK, Json(response))
}
