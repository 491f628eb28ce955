//! Typed error handling for the engine
//!
//! Only configuration mistakes are errors: a malformed filter wiring or a
//! record without identity indicates a bug in the calling screen and fails
//! fast. Per-record parse issues during filtering are absorbed into
//! "no match" instead (see [`crate::core::filter`]).

use thiserror::Error;

/// Errors surfaced by the engine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A filter value that is neither a string nor a 2-element range
    #[error("invalid filter value for field `{field}`: expected a string or a 2-element range, got {found}")]
    InvalidFilter { field: String, found: String },

    /// A range bound of an unsupported shape (only strings, numbers and
    /// null/empty are accepted as bounds)
    #[error("invalid range bound for field `{field}`: {found}")]
    InvalidBound { field: String, found: String },

    /// A synced record exposes no usable `id` field
    #[error("record at position {position} has no usable `id` field")]
    MissingId { position: usize },
}
