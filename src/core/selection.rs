//! Selection tracking scoped to the full logical dataset
//!
//! The selection is a set of record identities over the Record Store's full
//! working copy, never over the visible page or the filtered subset.

use crate::core::record::RecordId;
use serde::Serialize;
use std::collections::HashSet;

/// The set of checked record identities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection {
    selected: HashSet<RecordId>,
}

impl Selection {
    /// Check or uncheck one identity
    pub fn toggle(&mut self, id: RecordId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Global select-all over the full working copy
    ///
    /// If everything is already selected, clears the selection; otherwise
    /// selects every identity in `all_ids` — irrespective of current
    /// filters, search, or page. Set equality, not size: a stale identity
    /// left behind by a local delete never counts as coverage.
    pub fn select_all(&mut self, all_ids: impl IntoIterator<Item = RecordId>) {
        let all: HashSet<RecordId> = all_ids.into_iter().collect();
        if self.selected == all {
            self.selected.clear();
        } else {
            self.selected = all;
        }
    }

    /// Empty the selection (after a bulk action)
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop identities not present in `live_ids` (applied on sync, so a
    /// refreshed collection never leaves ghost selections behind)
    pub fn retain_present(&mut self, live_ids: &HashSet<RecordId>) {
        self.selected.retain(|id| live_ids.contains(id));
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordId> {
        self.selected.iter()
    }
}
