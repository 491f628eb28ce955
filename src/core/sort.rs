//! Sort state and comparator
//!
//! One sort key and direction at a time. Sorting is stable and never filters
//! or deduplicates; with no key the records keep the store's order.

use crate::core::record::Record;
use crate::core::value::{as_instant, display_string};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Current sort key and direction; `key: None` means identity order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    /// Apply the toggle rule for a sort request on `key`
    ///
    /// Requesting the key already sorted ascending flips to descending; any
    /// other prior state (different key, no key, or descending) sorts that
    /// key ascending.
    pub fn toggle(&mut self, key: &str) {
        if self.key.as_deref() == Some(key) && self.direction == SortDirection::Ascending {
            self.direction = SortDirection::Descending;
        } else {
            self.key = Some(key.to_string());
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Stable in-place sort by the state's key and direction
pub fn sort(records: &mut [Record], state: &SortState) {
    let Some(key) = state.key.as_deref() else {
        return;
    };
    records.sort_by(|a, b| {
        let ordering = compare_values(a.get(key), b.get(key));
        match state.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Native ordering: numeric for numbers, chronological when both sides are
/// date-like, lexicographic otherwise; missing/null order before present
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), Some(_)) => Ordering::Less,
        (Some(_), None | Some(Value::Null)) => Ordering::Greater,
        (Some(a), Some(b)) => compare_present(a, b),
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    if let (Value::Number(x), Value::Number(y)) = (a, b) {
        let x = x.as_f64().unwrap_or(f64::NAN);
        let y = y.as_f64().unwrap_or(f64::NAN);
        return x.total_cmp(&y);
    }
    if let (Value::Bool(x), Value::Bool(y)) = (a, b) {
        return x.cmp(y);
    }
    if let (Some(x), Some(y)) = (as_instant(a), as_instant(b)) {
        return x.cmp(&y);
    }
    match (display_string(a), display_string(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(values: serde_json::Value) -> Vec<Record> {
        values
            .as_array()
            .unwrap()
            .iter()
            .map(|v| Record::from_value(v.clone()).unwrap())
            .collect()
    }

    fn ids(records: &[Record]) -> Vec<i64> {
        records
            .iter()
            .map(|r| r.get("id").and_then(|v| v.as_i64()).unwrap())
            .collect()
    }

    #[test]
    fn test_no_key_preserves_order() {
        let mut rs = records(json!([{"id": 2}, {"id": 1}, {"id": 3}]));
        sort(&mut rs, &SortState::default());
        assert_eq!(ids(&rs), vec![2, 1, 3]);
    }

    #[test]
    fn test_numeric_sort_both_directions() {
        let mut rs = records(json!([
            {"id": 1, "amount": 150},
            {"id": 2, "amount": 50},
            {"id": 3, "amount": 99.5},
        ]));
        let mut state = SortState::default();
        state.toggle("amount");
        sort(&mut rs, &state);
        assert_eq!(ids(&rs), vec![2, 3, 1]);

        state.toggle("amount");
        sort(&mut rs, &state);
        assert_eq!(ids(&rs), vec![1, 3, 2]);
    }

    #[test]
    fn test_lexicographic_sort() {
        let mut rs = records(json!([
            {"id": 1, "patient": "Dupont"},
            {"id": 2, "patient": "Bernard"},
        ]));
        sort(
            &mut rs,
            &SortState { key: Some("patient".into()), direction: SortDirection::Ascending },
        );
        assert_eq!(ids(&rs), vec![2, 1]);
    }

    #[test]
    fn test_chronological_sort_of_date_strings() {
        // lexicographic would put 02/01 before 15/12 only by accident of the
        // format; DD/MM/YYYY needs chronological comparison
        let mut rs = records(json!([
            {"id": 1, "due": "15/12/2024"},
            {"id": 2, "due": "02/01/2025"},
        ]));
        sort(
            &mut rs,
            &SortState { key: Some("due".into()), direction: SortDirection::Ascending },
        );
        assert_eq!(ids(&rs), vec![1, 2]);
    }

    #[test]
    fn test_missing_values_order_first_ascending() {
        let mut rs = records(json!([
            {"id": 1, "amount": 10},
            {"id": 2},
        ]));
        sort(
            &mut rs,
            &SortState { key: Some("amount".into()), direction: SortDirection::Ascending },
        );
        assert_eq!(ids(&rs), vec![2, 1]);
    }

    #[test]
    fn test_toggle_rule() {
        let mut state = SortState::default();
        state.toggle("amount");
        assert_eq!(state.key.as_deref(), Some("amount"));
        assert_eq!(state.direction, SortDirection::Ascending);

        state.toggle("amount");
        assert_eq!(state.direction, SortDirection::Descending);

        // third request on the same key goes back to ascending
        state.toggle("amount");
        assert_eq!(state.direction, SortDirection::Ascending);

        state.toggle("amount");
        state.toggle("patient");
        assert_eq!(state.key.as_deref(), Some("patient"));
        assert_eq!(state.direction, SortDirection::Ascending);
    }
}
