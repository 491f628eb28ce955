//! # Listwise
//!
//! A client-side tabular query engine for list views: filtering, free-text
//! search, sorting, pagination and selection over an in-memory collection of
//! schema-less records.
//!
//! ## Features
//!
//! - **Open records**: rows are JSON maps with a stable `id`; no schema
//! - **Declarative filters**: exact-match or range per field, resolved into
//!   a tagged union once at specification-build time
//! - **Shallow free-text search**: one level of recursion into nested values
//! - **Stable sorting**: numeric, chronological or lexicographic, with the
//!   ascending/descending toggle rule
//! - **Clamped pagination**: 1-based pages that degrade to an empty tail,
//!   reset on filter/search changes but never on sort changes
//! - **Global-scope selection**: select-all covers the full working copy,
//!   not the visible page
//! - **Local delete / reset**: optimistic removal without I/O; the host owns
//!   persistence and re-syncs afterwards
//!
//! ## Quick Start
//!
//! ```
//! use listwise::prelude::*;
//! use serde_json::json;
//!
//! let rows: Vec<Record> = (1..=3)
//!     .map(|i| Record::from_value(json!({
//!         "id": i,
//!         "status": if i == 3 { "closed" } else { "open" },
//!         "amount": i * 50,
//!     })).unwrap())
//!     .collect();
//!
//! let mut engine = ListEngine::new(EngineConfig::default(), rows)?;
//! engine.update_filter("status", &json!("open"))?;
//! engine.handle_sort("amount");
//!
//! assert_eq!(engine.matching_total(), 2);
//! assert_eq!(engine.page()[0].get("amount"), Some(&json!(50)));
//! # Ok::<(), listwise::core::EngineError>(())
//! ```
//!
//! One engine instance belongs to one list view and one caller context; the
//! engine performs no I/O and no locking. See [`engine::ListEngine`] for
//! the full operation surface.

pub mod core;
pub mod engine;
pub mod store;

/// Re-exports of commonly used types
pub mod prelude {
    // === Engine ===
    pub use crate::engine::{EngineConfig, ListEngine};

    // === Core types ===
    pub use crate::core::{
        error::EngineError,
        filter::{FieldRule, FieldRules, FilterSpec, FilterValue, RangeDomain},
        paginate::{PageMeta, PageState},
        record::{Record, RecordId},
        selection::Selection,
        sort::{SortDirection, SortState},
    };

    // === Store ===
    pub use crate::store::RecordStore;

    // === External dependencies ===
    pub use serde_json::{Map, Value, json};
}
