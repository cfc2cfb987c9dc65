//! The tracker store: roster, turn pointer and persistence in one owner.
//!
//! Every roster mutation writes the whole roster back to storage and queues a
//! [`Change`]. Front ends drain the queue after handling an input and redraw
//! from the current state; nothing is cached.

use crate::character::{
    coerce_number, Character, CharacterDraft, CharacterId, NumericField, Resource, Step,
};
use crate::persist::{load_roster_or_empty, save_roster};
use crate::roster::Roster;
use crate::storage::Storage;
use crate::summary::format_summary;
use crate::turn::TurnPointer;
use thiserror::Error;

/// Errors from tracker operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("No character with id {0}")]
    UnknownCharacter(CharacterId),
}

/// A state change, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Added { id: CharacterId, position: usize },
    Updated { id: CharacterId, field: NumericField, value: i64 },
    /// The roster was re-sorted after an initiative edit.
    Reordered,
    Removed { id: CharacterId, name: String },
    TurnAdvanced { index: usize },
    TurnReset,
}

impl Change {
    /// Whether this change wrote the roster to storage.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Change::Added { .. } | Change::Updated { .. } | Change::Removed { .. }
        )
    }
}

/// Owned tracker state with an injected storage backend.
#[derive(Debug)]
pub struct Tracker<S: Storage> {
    roster: Roster,
    turn: TurnPointer,
    storage: S,
    key: String,
    changes: Vec<Change>,
    last_persist_error: Option<String>,
}

impl<S: Storage> Tracker<S> {
    /// Load the roster stored under `key`, or start empty.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let roster = Roster::from_characters(load_roster_or_empty(&storage, &key));
        tracing::info!(key = %key, characters = roster.len(), "tracker opened");

        Self {
            roster,
            turn: TurnPointer::new(),
            storage,
            key,
            changes: Vec::new(),
            last_persist_error: None,
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn characters(&self) -> &[Character] {
        self.roster.characters()
    }

    pub fn turn(&self) -> TurnPointer {
        self.turn
    }

    /// The character whose turn it is, if the pointer is on an occupied slot.
    pub fn current(&self) -> Option<&Character> {
        self.turn.current(&self.roster)
    }

    pub fn summary(&self) -> String {
        format_summary(self.roster.characters())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// The most recent write failure, cleared by the next successful write.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    /// Take all changes queued since the last drain.
    pub fn drain_changes(&mut self) -> Vec<Change> {
        std::mem::take(&mut self.changes)
    }

    // ------------------------------------------------------------------
    // Roster mutations
    // ------------------------------------------------------------------

    /// Add a character. An empty name is ignored and returns `None`.
    pub fn add(&mut self, draft: CharacterDraft) -> Option<CharacterId> {
        let Some(id) = self.roster.add(draft) else {
            tracing::debug!("ignored add with empty name");
            return None;
        };

        let position = self.roster.position(id).unwrap_or_default();
        tracing::debug!(%id, position, "character added");
        self.changes.push(Change::Added { id, position });
        self.persist();
        Some(id)
    }

    /// Overwrite a numeric field without clamping.
    pub fn update(
        &mut self,
        id: CharacterId,
        field: NumericField,
        value: i64,
    ) -> Result<(), TrackerError> {
        self.roster
            .update(id, field, value)
            .ok_or(TrackerError::UnknownCharacter(id))?;

        tracing::debug!(%id, %field, value, "character updated");
        self.changes.push(Change::Updated { id, field, value });
        if field == NumericField::Initiative {
            self.changes.push(Change::Reordered);
        }
        self.persist();
        Ok(())
    }

    /// Overwrite a numeric field from text. Non-numeric text stores 0.
    ///
    /// Returns the stored value.
    pub fn update_text(
        &mut self,
        id: CharacterId,
        field: NumericField,
        text: &str,
    ) -> Result<i64, TrackerError> {
        let value = coerce_number(text).unwrap_or(0);
        self.update(id, field, value)?;
        Ok(value)
    }

    /// Step HP or garra by one, staying inside `[0, total]`.
    ///
    /// Returns the new value.
    pub fn adjust(
        &mut self,
        id: CharacterId,
        resource: Resource,
        step: Step,
    ) -> Result<i64, TrackerError> {
        let value = self
            .roster
            .adjust(id, resource, step)
            .ok_or(TrackerError::UnknownCharacter(id))?;

        self.changes.push(Change::Updated {
            id,
            field: resource.current_field(),
            value,
        });
        self.persist();
        Ok(value)
    }

    /// Remove a character. The turn pointer is left where it is.
    pub fn remove(&mut self, id: CharacterId) -> Result<Character, TrackerError> {
        let removed = self
            .roster
            .remove(id)
            .ok_or(TrackerError::UnknownCharacter(id))?;

        tracing::debug!(%id, name = %removed.name, "character removed");
        self.changes.push(Change::Removed {
            id,
            name: removed.name.clone(),
        });
        self.persist();
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Turn pointer
    // ------------------------------------------------------------------

    /// Pass the turn to the next slot. Does nothing on an empty roster.
    pub fn advance_turn(&mut self) {
        if self.roster.is_empty() {
            return;
        }
        self.turn.advance(self.roster.len());
        self.changes.push(Change::TurnAdvanced {
            index: self.turn.index(),
        });
    }

    /// Start a new duel: the pointer goes back to the first slot.
    pub fn reset_turn(&mut self) {
        self.turn.reset();
        self.changes.push(Change::TurnReset);
    }

    fn persist(&mut self) {
        match save_roster(&mut self.storage, &self.key, self.roster.characters()) {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to persist roster");
                self.last_persist_error = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::{load_roster, STORAGE_KEY};
    use crate::storage::MemoryStorage;
    use crate::testing::RecordingStorage;

    fn tracker() -> Tracker<MemoryStorage> {
        Tracker::open(MemoryStorage::new(), STORAGE_KEY)
    }

    #[test]
    fn test_add_persists() {
        let mut tracker = tracker();
        tracker.add(CharacterDraft::new("Doc").with_hp(5).with_garra(2));

        let stored = load_roster(tracker.storage(), STORAGE_KEY).unwrap();
        assert_eq!(stored, tracker.characters());
        assert_eq!(tracker.summary(), "1- Doc HP [5/5] Garra (2/2)");
    }

    #[test]
    fn test_add_blank_name_writes_nothing() {
        let mut tracker = Tracker::open(RecordingStorage::new(), STORAGE_KEY);
        assert!(tracker.add(CharacterDraft::new("")).is_none());
        assert_eq!(tracker.storage().writes(), 0);
        assert!(tracker.drain_changes().is_empty());
    }

    #[test]
    fn test_update_unknown_id() {
        let mut tracker = tracker();
        let ghost = CharacterId(9);
        assert_eq!(
            tracker.update(ghost, NumericField::HpCurrent, 3),
            Err(TrackerError::UnknownCharacter(ghost))
        );
        assert!(tracker.remove(ghost).is_err());
        assert!(tracker.adjust(ghost, Resource::Hp, Step::Increment).is_err());
    }

    #[test]
    fn test_update_text_coerces() {
        let mut tracker = tracker();
        let id = tracker.add(CharacterDraft::new("Doc")).unwrap();

        assert_eq!(tracker.update_text(id, NumericField::HpCurrent, "oops"), Ok(0));
        assert_eq!(tracker.update_text(id, NumericField::HpCurrent, "25"), Ok(25));
        assert_eq!(tracker.roster().get(id).unwrap().hp_current, 25);
    }

    #[test]
    fn test_changes_are_queued_in_order() {
        let mut tracker = tracker();
        let id = tracker.add(CharacterDraft::new("Doc")).unwrap();
        tracker.update(id, NumericField::Initiative, 4).unwrap();
        tracker.advance_turn();
        tracker.reset_turn();

        assert_eq!(
            tracker.drain_changes(),
            vec![
                Change::Added { id, position: 0 },
                Change::Updated { id, field: NumericField::Initiative, value: 4 },
                Change::Reordered,
                Change::TurnAdvanced { index: 0 },
                Change::TurnReset,
            ]
        );
        assert!(tracker.drain_changes().is_empty());
    }

    #[test]
    fn test_only_roster_changes_are_writes() {
        let mut tracker = tracker();
        let id = tracker.add(CharacterDraft::new("Doc")).unwrap();
        assert!(tracker.drain_changes().iter().all(Change::is_write));

        tracker.advance_turn();
        tracker.reset_turn();
        assert!(!tracker.drain_changes().iter().any(Change::is_write));

        tracker.remove(id).unwrap();
        assert!(tracker.drain_changes().iter().any(Change::is_write));
    }

    #[test]
    fn test_advance_on_empty_roster() {
        let mut tracker = tracker();
        tracker.advance_turn();
        assert_eq!(tracker.turn().index(), 0);
        assert!(tracker.current().is_none());
        assert!(tracker.drain_changes().is_empty());
    }

    #[test]
    fn test_add_keeps_leniently_loaded_records() {
        let stored = r#"[{"id":1,"name":"Doc","initiative":12.7,"hpCurrent":3.5,"hpTotal":5,"garraCurrent":null,"garraTotal":2}]"#;
        let storage = MemoryStorage::new().with_entry(STORAGE_KEY, stored);
        let mut tracker = Tracker::open(storage, STORAGE_KEY);
        assert_eq!(tracker.characters().len(), 1);

        tracker.add(CharacterDraft::new("Kid").with_initiative(3));

        let saved = load_roster(tracker.storage(), STORAGE_KEY).unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].name, "Doc");
        assert_eq!(saved[0].initiative, 12);
    }

    #[test]
    fn test_reopen_restores_roster() {
        let mut tracker = tracker();
        tracker.add(CharacterDraft::new("A").with_initiative(5));
        tracker.add(CharacterDraft::new("B").with_initiative(9));
        let before = tracker.characters().to_vec();

        let reopened = Tracker::open(tracker.storage().clone(), STORAGE_KEY);
        assert_eq!(reopened.characters(), before.as_slice());
        assert_eq!(reopened.turn().index(), 0);
    }
}
