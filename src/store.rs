//! The Record Store: a private working copy of the caller's collection
//!
//! The store owns two sequences: the baseline (the collection most recently
//! supplied by the caller) and the working copy (baseline minus local
//! deletes). The caller's collection is never mutated; `sync` replaces both
//! sequences wholesale, so local deletes do not survive a refetch — the
//! store has no notion of tombstones, and local delete is an optimistic-UI
//! convenience only.

use crate::core::error::EngineError;
use crate::core::record::{Record, RecordId};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    baseline: Vec<Record>,
    working: Vec<Record>,
}

impl RecordStore {
    /// Create a store from an initial collection
    ///
    /// Fails if any record lacks a usable `id`, since selection and deletion
    /// key on identity.
    pub fn new(collection: Vec<Record>) -> Result<Self, EngineError> {
        let mut store = Self::default();
        store.sync(collection)?;
        Ok(store)
    }

    /// Replace the working copy with a fresh copy of `collection`
    ///
    /// Identities removed via [`delete`](Self::delete) since the last sync
    /// are not preserved: if they still exist upstream, they come back.
    pub fn sync(&mut self, collection: Vec<Record>) -> Result<(), EngineError> {
        for (position, record) in collection.iter().enumerate() {
            if record.id().is_none() {
                return Err(EngineError::MissingId { position });
            }
        }
        debug!(records = collection.len(), "record store synced");
        self.working = collection.clone();
        self.baseline = collection;
        Ok(())
    }

    /// Remove records from the working copy by identity, locally only
    ///
    /// A single id is a one-element batch. Persisting the deletion is the
    /// host's job; a later `sync` with an unrefreshed collection
    /// reintroduces the records.
    pub fn delete(&mut self, ids: &[RecordId]) {
        let doomed: HashSet<&RecordId> = ids.iter().collect();
        self.working
            .retain(|r| r.id().is_none_or(|id| !doomed.contains(&id)));
        debug!(deleted = ids.len(), remaining = self.working.len(), "local delete");
    }

    /// Restore the working copy to the last synced baseline, undoing local
    /// deletes without a network round-trip
    pub fn reset(&mut self) {
        self.working = self.baseline.clone();
        debug!(records = self.working.len(), "record store reset");
    }

    /// The full working copy
    pub fn records(&self) -> &[Record] {
        &self.working
    }

    /// Number of records in the full working copy
    pub fn len(&self) -> usize {
        self.working.len()
    }

    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Every identity in the full working copy
    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        // ids were validated on sync
        self.working.iter().filter_map(Record::id)
    }
}
