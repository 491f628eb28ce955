//! Core module containing the engine's evaluators and state types

pub mod error;
pub mod filter;
pub mod paginate;
pub mod record;
pub mod search;
pub mod selection;
pub mod sort;
pub mod value;

pub use error::EngineError;
pub use filter::{FieldRule, FieldRules, FilterSpec, FilterValue, RangeDomain};
pub use paginate::{PageMeta, PageState};
pub use record::{Record, RecordId};
pub use selection::Selection;
pub use sort::{SortDirection, SortState};
