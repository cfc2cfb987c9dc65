//! Testing utilities for the tracker.
//!
//! This module provides:
//! - `RecordingStorage`, an in-memory backend that counts writes and can be
//!   switched into a failing mode
//! - `posse()` fixture drafts and `tracker_with` for quick setups
//! - assertion helpers for roster ordering

use crate::character::{Character, CharacterDraft};
use crate::persist::STORAGE_KEY;
use crate::storage::{MemoryStorage, Storage, StorageError};
use crate::tracker::Tracker;

/// Storage that records how often it was written and can refuse writes.
#[derive(Debug, Clone, Default)]
pub struct RecordingStorage {
    inner: MemoryStorage,
    writes: usize,
    failing: bool,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing backend's contents.
    pub fn wrapping(inner: MemoryStorage) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    pub fn inner(&self) -> &MemoryStorage {
        &self.inner
    }
}

impl Storage for RecordingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        self.writes += 1;
        self.inner.set(key, value)
    }
}

/// A small posse with distinct initiatives, listed out of order.
pub fn posse() -> Vec<CharacterDraft> {
    vec![
        CharacterDraft::new("Doc").with_initiative(12).with_hp(5).with_garra(2),
        CharacterDraft::new("Billy the Kid").with_initiative(18).with_hp(8).with_garra(3),
        CharacterDraft::new("Calamity Jane").with_initiative(15).with_hp(11),
        CharacterDraft::new("Outlaw").with_initiative(4),
    ]
}

/// A tracker on fresh recording storage holding `drafts`.
///
/// The write counter is reset so tests only see their own writes.
pub fn tracker_with(drafts: Vec<CharacterDraft>) -> Tracker<RecordingStorage> {
    let mut tracker = Tracker::open(RecordingStorage::new(), STORAGE_KEY);
    for draft in drafts {
        tracker.add(draft);
    }
    tracker.drain_changes();

    // Reopen over the populated storage for a clean counter
    let inner = tracker.storage().inner().clone();
    Tracker::open(RecordingStorage::wrapping(inner), STORAGE_KEY)
}

/// Names in roster order.
pub fn names(characters: &[Character]) -> Vec<&str> {
    characters.iter().map(|c| c.name.as_str()).collect()
}

/// Panic unless initiatives never increase down the roster.
pub fn assert_sorted_descending(characters: &[Character]) {
    for pair in characters.windows(2) {
        assert!(
            pair[0].initiative >= pair[1].initiative,
            "{} ({}) is ahead of {} ({})",
            pair[0].name,
            pair[0].initiative,
            pair[1].name,
            pair[1].initiative
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_with_starts_clean() {
        let tracker = tracker_with(posse());
        assert_eq!(tracker.characters().len(), 4);
        assert_eq!(tracker.storage().writes(), 0);
        assert_sorted_descending(tracker.characters());
    }

    #[test]
    fn test_failing_storage() {
        let mut storage = RecordingStorage::new();
        storage.set_failing(true);
        assert!(storage.set("k", "v").is_err());
        assert_eq!(storage.writes(), 0);

        storage.set_failing(false);
        assert!(storage.set("k", "v").is_ok());
        assert_eq!(storage.writes(), 1);
    }
}
