mod support;

use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use podcastr::client::{ApiClient, ClientError, EpisodeQuery, EpisodeSource, HttpConfig};
use podcastr::config::PagesConfig;
use podcastr::pages::{PageGenerator, PageKey};

use support::episode_json;

#[derive(Clone, Default)]
struct Upstream {
    queries: Arc<Mutex<Vec<String>>>,
    paths: Arc<Mutex<Vec<String>>>,
}

async fn list(State(upstream): State<Upstream>, RawQuery(query): RawQuery) -> Json<Vec<Value>> {
    upstream
        .queries
        .lock()
        .unwrap()
        .push(query.unwrap_or_default());
    Json(vec![
        episode_json("newest", "2021-05-10 08:00:00", "5400"),
        episode_json("middle", "2021-03-15 12:00:00", "3600"),
    ])
}

async fn show(State(upstream): State<Upstream>, Path(id): Path<String>) -> impl IntoResponse {
    upstream.paths.lock().unwrap().push(id.clone());
    match id.as_str() {
        "newest" => Json(episode_json("newest", "2021-05-10 08:00:00", "5400")).into_response(),
        "garbled" => (StatusCode::OK, "{\"id\": 1").into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            StatusCode::NO_CONTENT.into_response()
        }
        "flaky" => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Starts a fake episodes API on an ephemeral port
async fn spawn_upstream() -> (SocketAddr, Upstream) {
    let upstream = Upstream::default();
    let app = Router::new()
        .route("/episodes", get(list))
        .route("/episodes/{id}", get(show))
        .with_state(upstream.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, upstream)
}

/// Starts a fake API whose listing records carry only the listing fields
async fn spawn_sparse_upstream() -> SocketAddr {
    let app = Router::new().route(
        "/episodes",
        get(|| async {
            Json(serde_json::json!([
                {"id": "a", "title": "A", "members": "Diego"},
                {"id": "b", "title": "B", "members": "Richard", "season": 2}
            ]))
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

fn client(addr: SocketAddr) -> ApiClient {
    ApiClient::new(&format!("http://{addr}"), &HttpConfig::default()).unwrap()
}

#[tokio::test]
async fn test_list_episodes_query_string() {
    let (addr, upstream) = spawn_upstream().await;
    let client = client(addr);

    let episodes = client
        .list_episodes(&EpisodeQuery::latest(12))
        .await
        .unwrap();
    client.list_episodes(&EpisodeQuery::latest(2)).await.unwrap();

    assert_eq!(episodes.len(), 2);
    assert_eq!(episodes[0].id, "newest");
    assert_eq!(
        *upstream.queries.lock().unwrap(),
        vec![
            "_limit=12&_sort=published_at&_order=desc".to_string(),
            "_limit=2&_sort=published_at&_order=desc".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_sparse_listing_records_pass_through() {
    let addr = spawn_sparse_upstream().await;

    let episodes = client(addr)
        .list_episodes(&EpisodeQuery::latest(12))
        .await
        .unwrap();

    assert_eq!(episodes.len(), 2);
    assert_eq!(episodes[0].id, "a");
    assert_eq!(episodes[0].members, "Diego");
    assert!(episodes[0].extra.is_empty());
    assert_eq!(episodes[1].extra["season"], 2);
}

#[tokio::test]
async fn test_sparse_listing_renders() {
    let addr = spawn_sparse_upstream().await;
    let generator = PageGenerator::new(Arc::new(client(addr)), PagesConfig::default()).unwrap();

    let page = generator.generate(&PageKey::Listing).await.unwrap();

    assert!(page.html.contains("<h1>Index</h1>"));
    assert!(page.html.contains(">A</a>"));
    assert!(page.html.contains("<span>Richard</span>"));
}

#[tokio::test]
async fn test_get_episode() {
    let (addr, upstream) = spawn_upstream().await;

    let episode = client(addr).get_episode("newest").await.unwrap();

    assert_eq!(episode.id, "newest");
    assert_eq!(episode.published_at, "2021-05-10 08:00:00");
    // Fields the pages never read are kept
    assert_eq!(episode.file.extra["type"], "audio/x-m4a");
    assert_eq!(*upstream.paths.lock().unwrap(), vec!["newest".to_string()]);
}

#[tokio::test]
async fn test_get_episode_encodes_identifier() {
    let (addr, upstream) = spawn_upstream().await;

    let result = client(addr).get_episode("a b").await;

    assert!(matches!(result, Err(ClientError::NotFound(id)) if id == "a b"));
    assert_eq!(*upstream.paths.lock().unwrap(), vec!["a b".to_string()]);
}

#[tokio::test]
async fn test_missing_episode_is_not_found() {
    let (addr, _upstream) = spawn_upstream().await;

    let result = client(addr).get_episode("missing").await;
    assert!(matches!(result, Err(ClientError::NotFound(id)) if id == "missing"));
}

#[tokio::test]
async fn test_error_status_is_surfaced() {
    let (addr, _upstream) = spawn_upstream().await;

    let result = client(addr).get_episode("flaky").await;
    assert!(matches!(result, Err(ClientError::Status { status: 503, .. })));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let (addr, _upstream) = spawn_upstream().await;

    let result = client(addr).get_episode("garbled").await;
    assert!(matches!(result, Err(ClientError::Decode { .. })));
}

#[tokio::test]
async fn test_request_timeout() {
    let (addr, _upstream) = spawn_upstream().await;
    let config = HttpConfig {
        request_timeout: Some(Duration::from_millis(100)),
        ..HttpConfig::default()
    };
    let client = ApiClient::new(&format!("http://{addr}"), &config).unwrap();

    let result = client.get_episode("slow").await;
    assert!(matches!(result, Err(ClientError::Timeout(_))));
}

#[tokio::test]
async fn test_unreachable_upstream() {
    // Bind and drop to get a port nobody listens on
    let addr = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap()
        .local_addr()
        .unwrap();

    let result = client(addr).list_episodes(&EpisodeQuery::latest(12)).await;
    assert!(matches!(result, Err(ClientError::RequestFailed(_))));
}
