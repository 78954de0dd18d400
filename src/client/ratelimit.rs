use chrono::{DateTime, Duration, TimeZone, Utc};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;

use crate::annotations::{RateLimitDescription, RateLimitStatus};

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";
const RETRY_AFTER_HEADER: &str = "retry-after";

// Reset values above this are epoch seconds, anything below is a delay.
const EPOCH_THRESHOLD: i64 = 1_000_000_000;

pub fn extract_rate_limit(status: StatusCode, headers: &HeaderMap) -> Option<RateLimitDescription> {
    extract_rate_limit_at(status, headers, Utc::now())
}

/// Reads rate-limit headers off a response. Returns `None` when the
/// response carries no rate-limit information at all.
///
/// Unparseable header values are skipped rather than failing the call.
pub fn extract_rate_limit_at(
    status: StatusCode,
    headers: &HeaderMap,
    now: DateTime<Utc>,
) -> Option<RateLimitDescription> {
    let limit = header_u64(headers, LIMIT_HEADER);
    let remaining = header_u64(headers, REMAINING_HEADER);
    let reset_at = header_str(headers, RESET_HEADER)
        .and_then(|value| parse_reset(value, now))
        .or_else(|| {
            header_str(headers, RETRY_AFTER_HEADER)
                .and_then(|value| value.parse::<i64>().ok())
                .and_then(|seconds| after(now, seconds))
        });

    let overlimit = status == StatusCode::TOO_MANY_REQUESTS || remaining == Some(0);

    if limit.is_none() && remaining.is_none() && reset_at.is_none() && !overlimit {
        return None;
    }

    Some(RateLimitDescription {
        status: if overlimit {
            RateLimitStatus::Overlimit
        } else {
            RateLimitStatus::Ok
        },
        limit,
        remaining,
        reset_at,
    })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    header_str(headers, name).and_then(|value| value.parse().ok())
}

fn parse_reset(value: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if let Ok(seconds) = value.parse::<i64>() {
        return if seconds > EPOCH_THRESHOLD {
            Utc.timestamp_opt(seconds, 0).single()
        } else {
            after(now, seconds)
        };
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|reset| reset.with_timezone(&Utc))
}

fn after(now: DateTime<Utc>, seconds: i64) -> Option<DateTime<Utc>> {
    Duration::try_seconds(seconds).and_then(|delay| now.checked_add_signed(delay))
}
