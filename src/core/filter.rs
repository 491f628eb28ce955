//! Filter specification and predicate evaluation
//!
//! A filter specification is a per-field map of constraints, built once from
//! a loose JSON object and resolved into a tagged union at build time. Each
//! value is either an exact match (case-insensitive string comparison against
//! the stringified field value) or a range with optional bounds (compared in
//! a numeric or chronological domain).
//!
//! # Filter format
//! - Exact match: `{"status": "open"}`
//! - Range: `{"amount": [0, 100]}`, `{"amount": [100, ""]}` (open upper bound)
//! - Empty string / both-empty range: the key is inactive
//!
//! Any other value shape is a wiring bug in the calling screen and is
//! rejected loudly when the specification is built, never per record.

use crate::core::error::EngineError;
use crate::core::record::Record;
use crate::core::value::{as_instant, as_number, display_string};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One resolved per-field constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterValue {
    /// Case-insensitive equality against the stringified field value
    Exact(String),
    /// `[lower, upper]`; a `None` bound leaves that side open
    Range(Option<String>, Option<String>),
}

impl FilterValue {
    /// Resolve one loose JSON filter value
    ///
    /// Returns `Ok(None)` when the value deactivates the key (empty string,
    /// both bounds empty) and `Err` for any unsupported shape.
    pub fn from_value(field: &str, value: &Value) -> Result<Option<Self>, EngineError> {
        match value {
            Value::String(s) if s.is_empty() => Ok(None),
            Value::String(s) => Ok(Some(Self::Exact(s.clone()))),
            Value::Array(items) if items.len() == 2 => {
                let lower = bound_from_value(field, &items[0])?;
                let upper = bound_from_value(field, &items[1])?;
                if lower.is_none() && upper.is_none() {
                    Ok(None)
                } else {
                    Ok(Some(Self::Range(lower, upper)))
                }
            }
            other => Err(EngineError::InvalidFilter {
                field: field.to_string(),
                found: type_name(other),
            }),
        }
    }
}

fn bound_from_value(field: &str, value: &Value) -> Result<Option<String>, EngineError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(EngineError::InvalidBound {
            field: field.to_string(),
            found: type_name(other),
        }),
    }
}

fn type_name(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(_) => "a string".to_string(),
        Value::Array(items) => format!("an array of {} elements", items.len()),
        Value::Object(_) => "an object".to_string(),
    }
}

/// Declarative per-field constraints, insertion-ordered
///
/// Inactive values (empty strings, empty ranges) are never stored, so every
/// entry present in the specification constrains the result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec {
    entries: IndexMap<String, FilterValue>,
}

impl FilterSpec {
    /// Build a specification from a loose JSON object
    ///
    /// `null` is accepted as "no constraints". Fails fast on the first
    /// malformed value.
    pub fn from_value(value: &Value) -> Result<Self, EngineError> {
        let mut spec = Self::default();
        match value {
            Value::Null => Ok(spec),
            Value::Object(map) => {
                for (field, raw) in map {
                    spec.set(field, raw)?;
                }
                Ok(spec)
            }
            other => Err(EngineError::InvalidFilter {
                field: "<root>".to_string(),
                found: type_name(other),
            }),
        }
    }

    /// Set or clear one field's constraint from a loose JSON value
    ///
    /// A deactivating value (empty string, empty range) removes the key.
    pub fn set(&mut self, field: &str, value: &Value) -> Result<(), EngineError> {
        match FilterValue::from_value(field, value)? {
            Some(fv) => {
                self.entries.insert(field.to_string(), fv);
            }
            None => {
                self.entries.shift_remove(field);
            }
        }
        Ok(())
    }

    /// Remove one field's constraint
    pub fn clear(&mut self, field: &str) {
        self.entries.shift_remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.entries.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.entries.iter()
    }
}

/// Comparison domain for a range filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeDomain {
    /// Numeric if the value and bounds parse as numbers, chronological
    /// otherwise
    #[default]
    Auto,
    /// Raw numeric comparison
    Number,
    /// Numeric comparison after rounding the field value up to the nearest
    /// integer (monetary amounts entered with cents)
    CeilNumber,
    /// Chronological comparison after parsing to an instant
    Date,
}

/// Per-field shaping of how a filter key reads and compares its source value
///
/// # Example
/// ```
/// use listwise::core::filter::{FieldRule, FieldRules, RangeDomain};
///
/// let mut rules = FieldRules::default();
/// // the `caseType` filter key reads the record's nested `case.type`
/// rules.insert("caseType".into(), FieldRule::source("case.type"));
/// // `amount` is monetary: round up before comparing
/// rules.insert("amount".into(), FieldRule::range(RangeDomain::CeilNumber));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Dot path of the value to compare, when it differs from the filter key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Comparison domain for range filters on this field
    #[serde(default)]
    pub range: RangeDomain,
}

impl FieldRule {
    pub fn source(path: impl Into<String>) -> Self {
        Self {
            source: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn range(domain: RangeDomain) -> Self {
        Self {
            range: domain,
            ..Self::default()
        }
    }
}

/// Field name to shaping rule; fields without a rule use the defaults
pub type FieldRules = IndexMap<String, FieldRule>;

/// Whether a record satisfies every active constraint of the specification
///
/// Conjunction over all keys; vacuously true for an empty specification.
/// Values that fail to parse in a range's comparison domain make that record
/// fail the bound (soft failure, never an error).
pub fn matches(record: &Record, spec: &FilterSpec, rules: &FieldRules) -> bool {
    spec.iter().all(|(field, constraint)| {
        let rule = rules.get(field);
        let path = rule.and_then(|r| r.source.as_deref()).unwrap_or(field);
        let value = record.get_path(path);
        match constraint {
            FilterValue::Exact(want) => exact_matches(value, want),
            FilterValue::Range(lower, upper) => {
                let domain = rule.map_or(RangeDomain::Auto, |r| r.range);
                range_matches(value, lower.as_deref(), upper.as_deref(), domain)
            }
        }
    })
}

fn exact_matches(value: Option<&Value>, want: &str) -> bool {
    value
        .and_then(display_string)
        .is_some_and(|have| have.to_lowercase() == want.to_lowercase())
}

fn range_matches(
    value: Option<&Value>,
    lower: Option<&str>,
    upper: Option<&str>,
    domain: RangeDomain,
) -> bool {
    let Some(value) = value else {
        return false;
    };
    match domain {
        RangeDomain::Number => numeric_in_range(value, lower, upper, false),
        RangeDomain::CeilNumber => numeric_in_range(value, lower, upper, true),
        RangeDomain::Date => date_in_range(value, lower, upper),
        RangeDomain::Auto => {
            if numeric_candidate(value, lower, upper) {
                numeric_in_range(value, lower, upper, false)
            } else {
                date_in_range(value, lower, upper)
            }
        }
    }
}

/// Auto domain picks numbers when the value and every present bound parse
/// numerically; anything else falls through to the date domain.
fn numeric_candidate(value: &Value, lower: Option<&str>, upper: Option<&str>) -> bool {
    as_number(value).is_some()
        && lower.is_none_or(|b| b.trim().parse::<f64>().is_ok())
        && upper.is_none_or(|b| b.trim().parse::<f64>().is_ok())
}

fn numeric_in_range(value: &Value, lower: Option<&str>, upper: Option<&str>, ceil: bool) -> bool {
    let Some(mut have) = as_number(value) else {
        return false;
    };
    if ceil {
        have = have.ceil();
    }
    let lower_ok = match lower {
        Some(bound) => bound.trim().parse::<f64>().is_ok_and(|b| have >= b),
        None => true,
    };
    let upper_ok = match upper {
        Some(bound) => bound.trim().parse::<f64>().is_ok_and(|b| have <= b),
        None => true,
    };
    lower_ok && upper_ok
}

fn date_in_range(value: &Value, lower: Option<&str>, upper: Option<&str>) -> bool {
    let Some(have) = as_instant(value) else {
        return false;
    };
    let lower_ok = match lower {
        Some(bound) => as_instant(&Value::String(bound.to_string())).is_some_and(|b| have >= b),
        None => true,
    };
    let upper_ok = match upper {
        Some(bound) => as_instant(&Value::String(bound.to_string())).is_some_and(|b| have <= b),
        None => true,
    };
    lower_ok && upper_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(value).expect("object value")
    }

    fn spec(value: Value) -> FilterSpec {
        FilterSpec::from_value(&value).expect("valid spec")
    }

    #[test]
    fn test_empty_spec_retains_everything() {
        let r = record(json!({"id": 1}));
        assert!(matches(&r, &FilterSpec::default(), &FieldRules::default()));
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let r = record(json!({"id": 1, "status": "Open"}));
        assert!(matches(&r, &spec(json!({"status": "open"})), &FieldRules::default()));
        assert!(!matches(&r, &spec(json!({"status": "closed"})), &FieldRules::default()));
    }

    #[test]
    fn test_exact_match_stringifies_numbers_and_booleans() {
        let r = record(json!({"id": 1, "retries": 3, "urgent": true}));
        let rules = FieldRules::default();
        assert!(matches(&r, &spec(json!({"retries": "3"})), &rules));
        assert!(matches(&r, &spec(json!({"urgent": "True"})), &rules));
        assert!(!matches(&r, &spec(json!({"urgent": "false"})), &rules));
    }

    #[test]
    fn test_exact_match_missing_field_never_matches() {
        let r = record(json!({"id": 1}));
        assert!(!matches(&r, &spec(json!({"status": "open"})), &FieldRules::default()));
    }

    #[test]
    fn test_conjunction_over_keys() {
        let rules = FieldRules::default();
        let s = spec(json!({"status": "open", "amount": [0, 100]}));
        assert!(matches(&record(json!({"id": 1, "status": "open", "amount": 50})), &s, &rules));
        assert!(!matches(&record(json!({"id": 2, "status": "open", "amount": 150})), &s, &rules));
        assert!(!matches(&record(json!({"id": 3, "status": "closed", "amount": 50})), &s, &rules));
    }

    #[test]
    fn test_range_open_lower_bound() {
        let s = spec(json!({"amount": ["", 100]}));
        let rules = FieldRules::default();
        assert!(matches(&record(json!({"id": 1, "amount": -5})), &s, &rules));
        assert!(!matches(&record(json!({"id": 2, "amount": 101})), &s, &rules));
    }

    #[test]
    fn test_range_open_upper_bound() {
        let s = spec(json!({"amount": [100, ""]}));
        let rules = FieldRules::default();
        assert!(matches(&record(json!({"id": 1, "amount": 100})), &s, &rules));
        assert!(matches(&record(json!({"id": 2, "amount": 100_000})), &s, &rules));
        assert!(!matches(&record(json!({"id": 3, "amount": 99})), &s, &rules));
    }

    #[test]
    fn test_range_both_bounds_empty_is_inactive() {
        let s = spec(json!({"amount": ["", ""]}));
        assert!(s.is_empty());
    }

    #[test]
    fn test_range_unparsable_value_is_soft_no_match() {
        let s = spec(json!({"amount": [0, 100]}));
        let r = record(json!({"id": 1, "amount": "n/a"}));
        assert!(!matches(&r, &s, &FieldRules::default()));
    }

    #[test]
    fn test_range_dates_auto_domain() {
        let s = spec(json!({"created_at": ["2024-01-01", "2024-12-31"]}));
        let rules = FieldRules::default();
        let inside = record(json!({"id": 1, "created_at": "2024-06-15"}));
        let outside = record(json!({"id": 2, "created_at": "2025-01-02"}));
        assert!(matches(&inside, &s, &rules));
        assert!(!matches(&outside, &s, &rules));
    }

    #[test]
    fn test_range_ceil_number_domain() {
        let mut rules = FieldRules::default();
        rules.insert("amount".into(), FieldRule::range(RangeDomain::CeilNumber));
        // 99.01 rounds up to 100 before comparing
        let r = record(json!({"id": 1, "amount": 99.01}));
        assert!(matches(&r, &spec(json!({"amount": [100, 200]})), &rules));
        assert!(!matches(&r, &spec(json!({"amount": [0, 99]})), &rules));
    }

    #[test]
    fn test_exact_match_remapped_source() {
        let mut rules = FieldRules::default();
        rules.insert("caseType".into(), FieldRule::source("case.type"));
        let r = record(json!({"id": 1, "case": {"type": "Invisalign"}}));
        assert!(matches(&r, &spec(json!({"caseType": "invisalign"})), &rules));
        assert!(!matches(&r, &spec(json!({"caseType": "braces"})), &rules));
    }

    #[test]
    fn test_spec_rejects_invalid_shapes() {
        assert_eq!(
            FilterSpec::from_value(&json!({"status": {"eq": "open"}})),
            Err(EngineError::InvalidFilter {
                field: "status".into(),
                found: "an object".into(),
            })
        );
        assert!(FilterSpec::from_value(&json!({"amount": [1, 2, 3]})).is_err());
        assert!(FilterSpec::from_value(&json!({"urgent": true})).is_err());
    }

    #[test]
    fn test_spec_rejects_invalid_bound_shapes() {
        assert_eq!(
            FilterSpec::from_value(&json!({"amount": [{"gt": 1}, 2]})),
            Err(EngineError::InvalidBound {
                field: "amount".into(),
                found: "an object".into(),
            })
        );
    }

    #[test]
    fn test_set_with_empty_string_clears_key() {
        let mut s = spec(json!({"status": "open"}));
        s.set("status", &json!("")).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn test_numeric_bounds_accept_number_literals() {
        let s = spec(json!({"amount": [0, 100]}));
        assert_eq!(
            s.get("amount"),
            Some(&FilterValue::Range(Some("0".into()), Some("100".into())))
        );
    }
}
