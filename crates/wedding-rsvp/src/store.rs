//! The record store.
//!
//! All RSVP records live under a single backend key as one JSON array, in
//! submission order. A missing item or malformed JSON reads as an empty
//! list. [`RecordStore::load`] also shows an unreadable backend as empty;
//! writes go through [`RecordStore::try_load`] so a failed read can never
//! overwrite the saved list.
//!
//! `load` and `save` are separate calls, so [`RecordStore::append`] is a
//! read-modify-write. Two writers racing on the same backend can lose an
//! update; there is only ever one writer per device.

use tracing::{debug, warn};

use crate::error::Result;
use crate::record::RsvpRecord;
use crate::storage::StorageBackend;

/// Backend key the records are stored under.
pub const DEFAULT_STORAGE_KEY: &str = "wedding_rsvps_v1";

/// Ordered RSVP records persisted through a [`StorageBackend`].
#[derive(Debug)]
pub struct RecordStore<B> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> RecordStore<B> {
    /// Create a store using [`DEFAULT_STORAGE_KEY`].
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Create a store that persists under a custom key.
    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The backend key records are stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load every stored record, oldest first, for display.
    ///
    /// Never fails: a backend read error is logged and shows as an empty
    /// store.
    pub fn load(&self) -> Vec<RsvpRecord> {
        self.try_load().unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "Could not read stored RSVPs");
            Vec::new()
        })
    }

    /// Load every stored record, oldest first.
    ///
    /// A missing item or anything that is not a JSON array of records is
    /// an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn try_load(&self) -> Result<Vec<RsvpRecord>> {
        let Some(raw) = self.backend.get_item(&self.key)? else {
            return Ok(Vec::new());
        };

        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            debug!(key = %self.key, error = %e, "Stored RSVPs are malformed, treating as empty");
            Vec::new()
        }))
    }

    /// Overwrite the stored list with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    pub fn save(&mut self, records: &[RsvpRecord]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.backend.set_item(&self.key, &json)?;
        debug!(key = %self.key, count = records.len(), "Saved RSVPs");
        Ok(())
    }

    /// Remove the stored list entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn clear(&mut self) -> Result<()> {
        self.backend.remove_item(&self.key)?;
        debug!(key = %self.key, "Cleared RSVPs");
        Ok(())
    }

    /// Append one record and persist. Returns the new number of records.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read or write fails. Nothing is
    /// written when the read fails.
    pub fn append(&mut self, record: RsvpRecord) -> Result<usize> {
        let mut records = self.try_load()?;
        records.push(record);
        self.save(&records)?;
        Ok(records.len())
    }
}
