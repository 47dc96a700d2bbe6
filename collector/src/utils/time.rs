//! Time utility functions

use chrono::{DateTime, Utc};

/// Parse an appliance ISO 8601 / RFC 3339 timestamp into nanoseconds since
/// epoch. Returns `None` for unparseable or out-of-range values; callers
/// fall back to the emission wall clock.
pub fn parse_iso_nanos(ts: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(ts)
        .ok()?
        .with_timezone(&Utc)
        .timestamp_nanos_opt()
}

/// Current wall-clock time in nanoseconds since epoch, for synthetic
/// records with no appliance-reported sample time.
pub fn now_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_nanos_epoch() {
        assert_eq!(parse_iso_nanos("1970-01-01T00:00:00Z"), Some(0));
    }

    #[test]
    fn test_parse_iso_nanos_known_value() {
        // 2024-01-01 00:00:00 UTC = 1704067200 seconds
        assert_eq!(
            parse_iso_nanos("2024-01-01T00:00:00.000Z"),
            Some(1_704_067_200_000_000_000)
        );
    }

    #[test]
    fn test_parse_iso_nanos_subsecond() {
        assert_eq!(
            parse_iso_nanos("1970-01-01T00:00:01.500Z"),
            Some(1_500_000_000)
        );
    }

    #[test]
    fn test_parse_iso_nanos_with_offset() {
        // 10:30 at +05:00 is 05:30 UTC
        let nanos = parse_iso_nanos("2024-01-15T10:30:00+05:00").unwrap();
        assert_eq!(nanos % (24 * 3600 * 1_000_000_000), (5 * 3600 + 30 * 60) * 1_000_000_000);
    }

    #[test]
    fn test_parse_iso_nanos_invalid() {
        assert_eq!(parse_iso_nanos("not-a-timestamp"), None);
        assert_eq!(parse_iso_nanos(""), None);
    }

    #[test]
    fn test_now_nanos_is_positive() {
        assert!(now_nanos() > 0);
    }
}
