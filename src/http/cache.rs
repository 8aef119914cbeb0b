//! HTTP date and conditional request module
//!
//! Provides `Last-Modified` formatting and `If-Modified-Since` evaluation.

use chrono::{DateTime, SubsecRound, Utc};
use std::time::SystemTime;

/// Format a timestamp as an RFC 7231 IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
pub fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// `Last-Modified` value for a file modification time
pub fn last_modified(mtime: SystemTime) -> String {
    http_date(DateTime::<Utc>::from(mtime))
}

/// Parse an HTTP date header value
///
/// Only dates carrying a UTC offset of zero are accepted; anything else is
/// treated as absent.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc2822(value.trim()).ok()?;
    (parsed.offset().local_minus_utc() == 0).then(|| parsed.with_timezone(&Utc))
}

/// Check whether a conditional GET should be answered with 304
///
/// `If-None-Match` takes precedence: when present, `If-Modified-Since` is
/// ignored. Modification times are compared at whole-second precision.
///
/// # Arguments
/// * `if_modified_since` - Client-sent If-Modified-Since header
/// * `has_if_none_match` - Whether the request carried If-None-Match
/// * `mtime` - File modification time
pub fn is_not_modified(
    if_modified_since: Option<&str>,
    has_if_none_match: bool,
    mtime: SystemTime,
) -> bool {
    if has_if_none_match {
        return false;
    }
    let Some(since) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };
    DateTime::<Utc>::from(mtime).trunc_subsecs(0) <= since
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    // Sun, 06 Nov 1994 08:49:37 GMT
    const RFC_EXAMPLE_SECS: u64 = 784_111_777;

    fn example_time() -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(RFC_EXAMPLE_SECS)
    }

    #[test]
    fn test_http_date_format() {
        assert_eq!(last_modified(example_time()), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_parse_http_date() {
        let parsed = parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT").unwrap();
        assert_eq!(parsed, DateTime::<Utc>::from(example_time()));
        assert!(parse_http_date("Sun, 06 Nov 1994 09:49:37 +0100").is_none());
        assert!(parse_http_date("yesterday").is_none());
    }

    #[test]
    fn test_not_modified_when_unchanged() {
        let header = "Sun, 06 Nov 1994 08:49:37 GMT";
        assert!(is_not_modified(Some(header), false, example_time()));
        // sub-second part of the mtime is ignored
        let with_nanos = example_time() + Duration::from_millis(400);
        assert!(is_not_modified(Some(header), false, with_nanos));
    }

    #[test]
    fn test_modified_after_header_date() {
        let later = example_time() + Duration::from_secs(1);
        assert!(!is_not_modified(
            Some("Sun, 06 Nov 1994 08:49:37 GMT"),
            false,
            later
        ));
    }

    #[test]
    fn test_if_none_match_wins() {
        assert!(!is_not_modified(
            Some("Sun, 06 Nov 1994 08:49:37 GMT"),
            true,
            example_time()
        ));
    }

    #[test]
    fn test_missing_or_invalid_header() {
        assert!(!is_not_modified(None, false, example_time()));
        assert!(!is_not_modified(Some("garbage"), false, example_time()));
    }
}
