mod support;

use std::sync::Arc;
use tempfile::TempDir;

use podcastr::client::InMemorySource;
use podcastr::config::PagesConfig;
use podcastr::observability::Metrics;
use podcastr::pages::PageError;
use podcastr::site::Site;

use support::{catalog, episode};

fn site(source: Arc<InMemorySource>) -> Site {
    Site::new(source, PagesConfig::default(), Arc::new(Metrics::new())).unwrap()
}

#[tokio::test]
async fn test_build_writes_static_tree() {
    let out = TempDir::new().unwrap();
    let source = Arc::new(InMemorySource::new(catalog()));

    let written = site(source.clone()).build(out.path()).await.unwrap();

    assert_eq!(
        written,
        vec![
            out.path().join("index.html"),
            out.path().join("episode/middle/index.html"),
            out.path().join("episode/newest/index.html"),
        ]
    );

    let index = std::fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(index.contains("<h1>Index</h1>"));
    assert!(index.contains("Episode oldest"));

    let detail = std::fs::read_to_string(out.path().join("episode/newest/index.html")).unwrap();
    assert!(detail.contains("<h1>Episode newest</h1>"));
    assert!(detail.contains("<span>01:30:00</span>"));

    assert!(!out.path().join("episode/oldest").exists());

    // One listing query, one paths query, one lookup per pre-rendered page
    let limits: Vec<_> = source.queries().iter().map(|q| q.limit).collect();
    assert_eq!(limits, vec![12, 2]);
    assert_eq!(
        source.lookups(),
        vec!["newest".to_string(), "middle".to_string()]
    );
}

#[tokio::test]
async fn test_build_fails_on_bad_record() {
    let out = TempDir::new().unwrap();
    let source = Arc::new(InMemorySource::new(vec![
        episode("fine", "2021-01-01 10:00:00", "60"),
        episode("broken", "2021-02-01 10:00:00", "forever"),
    ]));

    let result = site(source).build(out.path()).await;

    assert!(matches!(result, Err(PageError::Mapping(_))));
    assert!(!out.path().join("index.html").exists());
}

#[tokio::test]
async fn test_build_fails_when_api_is_down() {
    let out = TempDir::new().unwrap();
    let source = Arc::new(InMemorySource::new(catalog()));
    source.set_failing(true);

    let result = site(source).build(out.path()).await;
    assert!(matches!(result, Err(PageError::Fetch(_))));
}
