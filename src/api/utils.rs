//! API utility functions

use chrono::{DateTime, Utc};
use std::time::Duration;

/// `Cache-Control` value for a page regenerated every `revalidate`.
///
/// Shared caches may keep the page for the window and keep serving it while
/// a fresh copy is fetched.
pub fn cache_control(revalidate: Duration) -> String {
    format!("s-maxage={}, stale-while-revalidate", revalidate.as_secs())
}

/// IMF-fixdate as used by `Last-Modified`
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_control() {
        assert_eq!(
            cache_control(Duration::from_secs(28_800)),
            "s-maxage=28800, stale-while-revalidate"
        );
        assert_eq!(
            cache_control(Duration::ZERO),
            "s-maxage=0, stale-while-revalidate"
        );
    }

    #[test]
    fn test_http_date() {
        let at = DateTime::parse_from_rfc3339("1994-11-06T08:49:37Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(http_date(at), "Sun, 06 Nov 1994 08:49:37 GMT");
    }
}
