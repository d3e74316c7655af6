//! Shared fixtures for the integration tests

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use serde_json::json;
use std::future::Future;
use std::time::Duration;

use podcastr::episodes::RawEpisode;

/// An API record shaped like `GET /episodes/{id}`
pub fn episode(id: &str, published_at: &str, duration: &str) -> RawEpisode {
    serde_json::from_value(episode_json(id, published_at, duration)).unwrap()
}

pub fn episode_json(id: &str, published_at: &str, duration: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Episode {id}"),
        "members": "Diego e Richard",
        "thumbnail": format!("https://cdn.example.com/{id}.jpg"),
        "published_at": published_at,
        "description": "<p>Neste episódio <strong>falamos</strong> de Rust.</p>",
        "file": {
            "url": format!("https://cdn.example.com/{id}.m4a"),
            "type": "audio/x-m4a",
            "duration": duration
        }
    })
}

/// Three episodes; `newest` and `middle` are the two most recent
pub fn catalog() -> Vec<RawEpisode> {
    vec![
        episode("oldest", "2021-01-01 10:00:00", "1800"),
        episode("newest", "2021-05-10 08:00:00", "5400"),
        episode("middle", "2021-03-15 12:00:00", "3600"),
    ]
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Poll `check` until it holds, failing after two seconds
pub async fn eventually<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..200 {
        if check().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met within 2s");
}
