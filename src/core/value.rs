//! Value coercions shared by the filter, search and sort evaluators
//!
//! Records carry loosely-typed JSON values; comparisons happen in one of
//! three domains (string, number, instant). Coercion failures are soft:
//! callers treat `None` as "does not participate", never as an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// String form of a scalar value, `None` for null and structured values
pub fn display_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Object(_) | Value::Array(_) => None,
    }
}

/// Numeric form of a value; strings are parsed after trimming
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Instant form of a value
///
/// Accepts RFC 3339, `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, `DD/MM/YYYY`
/// (dates resolve to midnight UTC) and numeric epoch milliseconds.
pub fn as_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_instant(s.trim()),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_display_string_scalars() {
        assert_eq!(display_string(&json!("open")), Some("open".into()));
        assert_eq!(display_string(&json!(12.5)), Some("12.5".into()));
        assert_eq!(display_string(&json!(true)), Some("true".into()));
    }

    #[test]
    fn test_display_string_non_scalars() {
        assert_eq!(display_string(&json!(null)), None);
        assert_eq!(display_string(&json!({"a": 1})), None);
        assert_eq!(display_string(&json!([1])), None);
    }

    #[test]
    fn test_as_number_from_string() {
        assert_eq!(as_number(&json!(" 150 ")), Some(150.0));
        assert_eq!(as_number(&json!("12.5")), Some(12.5));
        assert_eq!(as_number(&json!("abc")), None);
    }

    #[test]
    fn test_as_instant_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(as_instant(&json!("2024-03-01")), Some(midnight));
        assert_eq!(as_instant(&json!("01/03/2024")), Some(midnight));
        assert_eq!(as_instant(&json!("2024-03-01T00:00:00Z")), Some(midnight));
        assert_eq!(
            as_instant(&json!(midnight.timestamp_millis())),
            Some(midnight)
        );
        assert_eq!(as_instant(&json!("not a date")), None);
    }
}
