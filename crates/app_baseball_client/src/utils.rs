//! Timestamp normalization and response-envelope helpers.

use chrono::{NaiveDate, NaiveDateTime};

/// Parse the timestamp shapes the backend and older records produce.
///
/// Accepts:
/// - YYYY-MM-DD -> midnight of that day
/// - RFC3339 datetime -> wall-clock time with the offset dropped
/// - Naive datetime with `T` or space separator, optional fractional seconds
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Same inputs as [`parse_timestamp`], keeping only the calendar date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    parse_timestamp(s).map(|dt| dt.date())
}

/// Take `value[key]` when the backend wrapped its payload in an object,
/// otherwise return the value as-is.
///
/// The backend answers `{"players": [...]}` while some deployments return the
/// bare array; both read the same.
pub fn unwrap_envelope(value: serde_json::Value, key: &str) -> serde_json::Value {
    match value {
        serde_json::Value::Object(mut map) if map.contains_key(key) => {
            map.remove(key).unwrap_or(serde_json::Value::Null)
        }
        other => other,
    }
}

/// Blank strings become `None`; others are trimmed.
pub fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_timestamp_accepts_date_only() {
        let ts = parse_timestamp("2025-06-01").unwrap();
        assert_eq!(ts.format("%Y-%m-%dT%H:%M:%S").to_string(), "2025-06-01T00:00:00");
    }

    #[test]
    fn parse_timestamp_preserves_naive_datetime() {
        let ts = parse_timestamp("2025-06-01T10:30:00").unwrap();
        assert_eq!(ts.format("%H:%M").to_string(), "10:30");
        let ts = parse_timestamp("2025-06-01 10:30:00.123456").unwrap();
        assert_eq!(ts.format("%H:%M:%S").to_string(), "10:30:00");
    }

    #[test]
    fn parse_timestamp_drops_rfc3339_offset() {
        let ts = parse_timestamp("2025-06-01T10:30:00+09:00").unwrap();
        assert_eq!(ts.format("%Y-%m-%dT%H:%M:%S").to_string(), "2025-06-01T10:30:00");
    }

    #[test]
    fn parse_timestamp_rejects_invalid() {
        assert!(parse_timestamp("not-a-date").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn parse_date_keeps_calendar_day() {
        assert_eq!(
            parse_date("2025-06-01T23:59:00Z"),
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
    }

    #[test]
    fn unwrap_envelope_handles_both_shapes() {
        assert_eq!(unwrap_envelope(json!({"players": [1, 2]}), "players"), json!([1, 2]));
        assert_eq!(unwrap_envelope(json!([1, 2]), "players"), json!([1, 2]));
        assert_eq!(
            unwrap_envelope(json!({"id": 1}), "player"),
            json!({"id": 1})
        );
    }

    #[test]
    fn non_blank_trims_and_drops_empty() {
        assert_eq!(non_blank(Some("  hi ")), Some("hi".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
