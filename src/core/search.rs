//! Free-text search over record fields
//!
//! Case-insensitive substring match against the string form of every field
//! value, recursing exactly one level into nested objects and arrays. The
//! one-level limit is deliberate: grand-children are never searched, which
//! bounds cost on deeply nested records.

use crate::core::record::Record;
use crate::core::value::display_string;
use serde_json::Value;

/// Whether a record matches a free-text term
///
/// An empty term matches everything. A record matches a non-empty term if
/// any scalar field, or any scalar member of a top-level object/array field,
/// contains the lower-cased term as a substring.
pub fn matches(record: &Record, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    record.fields().values().any(|value| match value {
        Value::Object(children) => children.values().any(|c| scalar_contains(c, &needle)),
        Value::Array(children) => children.iter().any(|c| scalar_contains(c, &needle)),
        scalar => scalar_contains(scalar, &needle),
    })
}

// Second-level values only match when scalar; no further recursion.
fn scalar_contains(value: &Value, needle: &str) -> bool {
    display_string(value).is_some_and(|s| s.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(value).expect("object value")
    }

    #[test]
    fn test_empty_term_matches_everything() {
        assert!(matches(&record(json!({"id": 1})), ""));
    }

    #[test]
    fn test_scalar_substring_case_insensitive() {
        let r = record(json!({"id": 1, "patient": "Jean Dupont"}));
        assert!(matches(&r, "dupont"));
        assert!(matches(&r, "DUP"));
        assert!(!matches(&r, "martin"));
    }

    #[test]
    fn test_numbers_match_by_string_form() {
        let r = record(json!({"id": 1, "amount": 1250}));
        assert!(matches(&r, "125"));
        assert!(!matches(&r, "999"));
    }

    #[test]
    fn test_recursion_is_one_level_deep() {
        let r = record(json!({
            "id": 1,
            "doctor": {"name": "Martin", "clinic": {"city": "Paris"}},
        }));
        assert!(matches(&r, "martin"));
        assert!(!matches(&r, "paris"));
    }

    #[test]
    fn test_array_members_match() {
        let r = record(json!({"id": 1, "tags": ["urgent", "retainer"]}));
        assert!(matches(&r, "retain"));
        assert!(!matches(&r, "aligner"));
    }

    #[test]
    fn test_nested_structures_inside_arrays_do_not_match() {
        let r = record(json!({"id": 1, "notes": [{"text": "call back"}]}));
        assert!(!matches(&r, "call back"));
    }

    #[test]
    fn test_null_never_matches() {
        let r = record(json!({"id": 1, "status": null}));
        assert!(!matches(&r, "null"));
    }
}
