//! The list engine: one instance per list view
//!
//! [`ListEngine`] owns the Record Store plus all filter, search, sort,
//! pagination and selection state for one list view, and keeps an eagerly
//! recomputed derived view (filtered → searched → sorted) from which the
//! current page is sliced. Every operation is a synchronous state
//! transition; the engine performs no I/O and is owned by exactly one
//! caller context.
//!
//! # Example
//! ```
//! use listwise::prelude::*;
//! use serde_json::json;
//!
//! let rows = vec![
//!     Record::from_value(json!({"id": 1, "status": "open", "amount": 50})).unwrap(),
//!     Record::from_value(json!({"id": 2, "status": "open", "amount": 150})).unwrap(),
//!     Record::from_value(json!({"id": 3, "status": "closed", "amount": 50})).unwrap(),
//! ];
//!
//! let mut engine = ListEngine::new(EngineConfig::default(), rows)?;
//! engine.update_filter("status", &json!("open"))?;
//! engine.update_filter("amount", &json!([0, 100]))?;
//! assert_eq!(engine.matching_total(), 1);
//! # Ok::<(), listwise::core::error::EngineError>(())
//! ```

use crate::core::error::EngineError;
use crate::core::filter::{self, FieldRules, FilterSpec};
use crate::core::paginate::{self, PageMeta, PageState};
use crate::core::record::{Record, RecordId};
use crate::core::search;
use crate::core::selection::Selection;
use crate::core::sort::{self, SortState};
use crate::store::RecordStore;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Caller-supplied engine configuration
///
/// `initial_filters` is both the active default and the state restored by
/// [`ListEngine::reset`]. `field_rules` shape how individual filter keys
/// read and compare their source values (see
/// [`FieldRule`](crate::core::filter::FieldRule)).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub page_size: usize,
    pub initial_filters: Value,
    pub field_rules: FieldRules,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            initial_filters: Value::Null,
            field_rules: FieldRules::default(),
        }
    }
}

/// Tabular query engine for one list view
#[derive(Debug, Clone)]
pub struct ListEngine {
    store: RecordStore,
    rules: FieldRules,
    initial_filters: FilterSpec,
    filters: FilterSpec,
    search_term: String,
    sort: SortState,
    page: PageState,
    selection: Selection,
    /// Filtered → searched → sorted projection of the working copy
    derived: Vec<Record>,
}

impl ListEngine {
    /// Create an engine over an initial collection
    ///
    /// Fails fast on a malformed `initial_filters` object or a record
    /// without a usable `id`.
    pub fn new(config: EngineConfig, collection: Vec<Record>) -> Result<Self, EngineError> {
        let initial_filters = FilterSpec::from_value(&config.initial_filters)?;
        let mut engine = Self {
            store: RecordStore::new(collection)?,
            rules: config.field_rules,
            filters: initial_filters.clone(),
            initial_filters,
            search_term: String::new(),
            sort: SortState::default(),
            page: PageState::new(config.page_size),
            selection: Selection::default(),
            derived: Vec::new(),
        };
        engine.recompute();
        Ok(engine)
    }

    // === Record store operations ===

    /// Replace the working copy with a refreshed collection
    ///
    /// Selected identities absent from the new collection are pruned, so a
    /// server-side deletion can never leave a ghost selection behind. The
    /// page position is kept; the clamped paginator degrades to an empty
    /// tail if the new collection is shorter.
    pub fn sync(&mut self, collection: Vec<Record>) -> Result<(), EngineError> {
        self.store.sync(collection)?;
        let live: HashSet<RecordId> = self.store.ids().collect();
        self.selection.retain_present(&live);
        self.recompute();
        Ok(())
    }

    /// Remove records locally by identity (one id is a one-element batch)
    ///
    /// Purely local: persisting the deletion and re-syncing is the host's
    /// job. The selection is not touched; hosts performing a bulk delete
    /// call [`clear_selection`](Self::clear_selection) afterwards.
    pub fn delete(&mut self, ids: &[RecordId]) {
        self.store.delete(ids);
        self.recompute();
    }

    /// Restore the working copy, filters and search term to their state as
    /// of the last sync/construction
    ///
    /// Undoes local deletes without a network round-trip and puts the
    /// filter spec and search term back to the caller-supplied initial
    /// values. The page returns to 1 since the result set changes.
    pub fn reset(&mut self) {
        self.store.reset();
        self.filters = self.initial_filters.clone();
        self.search_term.clear();
        self.page.reset();
        debug!("engine reset to baseline");
        self.recompute();
    }

    // === Filter / search / sort / pagination transitions ===

    /// Set or clear one field's filter from a loose JSON value
    ///
    /// Accepts the same shapes as the filter format (string or 2-element
    /// range); anything else is a wiring bug and fails loudly. Changing a
    /// filter resets the page to 1.
    pub fn update_filter(&mut self, field: &str, value: &Value) -> Result<(), EngineError> {
        self.filters.set(field, value)?;
        self.page.reset();
        self.recompute();
        Ok(())
    }

    /// Remove one field's filter; resets the page to 1
    pub fn clear_filter(&mut self, field: &str) {
        self.filters.clear(field);
        self.page.reset();
        self.recompute();
    }

    /// Change the free-text search term; resets the page to 1
    pub fn handle_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page.reset();
        self.recompute();
    }

    /// Request a sort on `key`, applying the toggle rule
    ///
    /// Sorting never resets the page: changing the order should not move
    /// the user's position, unlike narrowing the result set.
    pub fn handle_sort(&mut self, key: &str) {
        self.sort.toggle(key);
        self.recompute();
    }

    /// Move to a 1-based page; out-of-range pages yield an empty slice
    pub fn handle_paginate(&mut self, page: usize) {
        self.page.set_page(page);
    }

    /// Change the page size at runtime
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page.set_page_size(page_size);
    }

    // === Selection transitions ===

    /// Check or uncheck one record identity
    pub fn toggle(&mut self, id: impl Into<RecordId>) {
        self.selection.toggle(id.into());
    }

    /// Select every identity in the full working copy, or clear if
    /// everything is already selected
    ///
    /// Global scope: current filters, search and page are irrelevant.
    pub fn select_all(&mut self) {
        let all: Vec<RecordId> = self.store.ids().collect();
        self.selection.select_all(all);
    }

    /// Empty the selection (after a bulk action)
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // === Outbound surface ===

    /// The current page of the derived view
    pub fn page(&self) -> &[Record] {
        paginate::page(&self.derived, &self.page)
    }

    /// All records matching the active filters and search, sorted
    pub fn matching(&self) -> &[Record] {
        &self.derived
    }

    /// Count of records matching filters and search, for paging controls
    pub fn matching_total(&self) -> usize {
        self.derived.len()
    }

    /// Pagination metadata over the matching total
    pub fn page_meta(&self) -> PageMeta {
        PageMeta::new(
            self.page.current_page(),
            self.page.page_size(),
            self.derived.len(),
        )
    }

    /// The full working copy, unfiltered
    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    pub fn filter_spec(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn page_state(&self) -> &PageState {
        &self.page
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.selection.contains(id)
    }

    // Derived view = sort(filter_and_search(working)); filters and search
    // combine by conjunction.
    fn recompute(&mut self) {
        self.derived = self
            .store
            .records()
            .iter()
            .filter(|r| {
                filter::matches(r, &self.filters, &self.rules)
                    && search::matches(r, &self.search_term)
            })
            .cloned()
            .collect();
        sort::sort(&mut self.derived, &self.sort);
        trace!(
            total = self.store.len(),
            matching = self.derived.len(),
            "derived view recomputed"
        );
    }
}
