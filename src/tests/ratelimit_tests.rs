use chrono::{TimeZone, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;

use crate::annotations::{Annotations, RateLimitStatus};
use crate::client::ratelimit::extract_rate_limit_at;

fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.insert(*name, HeaderValue::from_static(value));
    }
    map
}

#[test]
fn test_no_rate_limit_headers_yields_nothing() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert!(extract_rate_limit_at(StatusCode::OK, &HeaderMap::new(), now).is_none());
}

#[test]
fn test_limit_remaining_and_delay_reset() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let map = headers(&[
        ("x-ratelimit-limit", "100"),
        ("x-ratelimit-remaining", "42"),
        ("x-ratelimit-reset", "30"),
    ]);

    let description = extract_rate_limit_at(StatusCode::OK, &map, now).unwrap();
    assert_eq!(description.status, RateLimitStatus::Ok);
    assert_eq!(description.limit, Some(100));
    assert_eq!(description.remaining, Some(42));
    assert_eq!(description.reset_at, Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 30).unwrap()));
}

#[test]
fn test_rfc3339_reset() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let map = headers(&[("x-ratelimit-reset", "2024-01-01T00:05:00Z")]);

    let description = extract_rate_limit_at(StatusCode::OK, &map, now).unwrap();
    assert_eq!(description.reset_at, Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 5, 0).unwrap()));
}

#[test]
fn test_too_many_requests_is_overlimit_with_retry_after() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let map = headers(&[("retry-after", "10")]);

    let description = extract_rate_limit_at(StatusCode::TOO_MANY_REQUESTS, &map, now).unwrap();
    assert_eq!(description.status, RateLimitStatus::Overlimit);
    assert_eq!(description.reset_at, Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 10).unwrap()));
}

#[test]
fn test_garbage_values_are_skipped() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let map = headers(&[("x-ratelimit-limit", "lots"), ("x-ratelimit-remaining", "7")]);

    let description = extract_rate_limit_at(StatusCode::OK, &map, now).unwrap();
    assert_eq!(description.limit, None);
    assert_eq!(description.remaining, Some(7));
}

#[test]
fn test_merge_keeps_latest_rate_limit() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let first = extract_rate_limit_at(StatusCode::OK, &headers(&[("x-ratelimit-remaining", "9")]), now).unwrap();
    let second = extract_rate_limit_at(StatusCode::OK, &headers(&[("x-ratelimit-remaining", "8")]), now).unwrap();

    let mut annotations = Annotations::new();
    annotations.with_rate_limiting(first);
    let mut later = Annotations::new();
    later.with_rate_limiting(second);
    annotations.merge(later);

    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations.rate_limit().unwrap().remaining, Some(8));
}
