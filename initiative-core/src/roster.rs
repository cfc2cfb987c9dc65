//! The initiative roster.
//!
//! Records stay sorted highest initiative first. Sorting is stable, so ties
//! keep their previous relative order, and it only happens on insertion and on
//! initiative edits.

use crate::character::{Character, CharacterDraft, CharacterId, NumericField, Resource, Step};

/// Ordered list of characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    characters: Vec<Character>,
    last_id: Option<CharacterId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap already-ordered records, e.g. a roster loaded from storage.
    ///
    /// Stored order is kept as-is.
    pub fn from_characters(characters: Vec<Character>) -> Self {
        let last_id = characters.iter().map(|c| c.id).max();
        Self {
            characters,
            last_id,
        }
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn position(&self, id: CharacterId) -> Option<usize> {
        self.characters.iter().position(|c| c.id == id)
    }

    pub fn id_at(&self, position: usize) -> Option<CharacterId> {
        self.characters.get(position).map(|c| c.id)
    }

    /// Add a character and re-sort. Returns `None` for an empty name.
    pub fn add(&mut self, draft: CharacterDraft) -> Option<CharacterId> {
        let id = CharacterId::next_after(self.last_id).unwrap_or_else(|| self.first_free_id());
        let character = draft.into_character(id)?;

        self.last_id = self.last_id.max(Some(id));
        self.characters.push(character);
        self.sort_by_initiative();
        Some(id)
    }

    /// Smallest id not taken by any record. Used once wall-clock ids run out.
    fn first_free_id(&self) -> CharacterId {
        (1..=u64::MAX)
            .map(CharacterId)
            .find(|id| self.get(*id).is_none())
            .unwrap_or(CharacterId(0))
    }

    /// Overwrite a field. Re-sorts only for initiative edits.
    ///
    /// Returns the previous value, or `None` if the id is unknown.
    pub fn update(&mut self, id: CharacterId, field: NumericField, value: i64) -> Option<i64> {
        let character = self.characters.iter_mut().find(|c| c.id == id)?;
        let previous = character.field(field);
        character.set_field(field, value);

        if field == NumericField::Initiative {
            self.sort_by_initiative();
        }
        Some(previous)
    }

    /// Step a resource by one within `[0, total]`.
    ///
    /// Returns the new value, or `None` if the id is unknown.
    pub fn adjust(&mut self, id: CharacterId, resource: Resource, step: Step) -> Option<i64> {
        let character = self.characters.iter_mut().find(|c| c.id == id)?;
        let (current, total) = character.resource(resource);
        let value = step.apply(current, total);
        character.set_field(resource.current_field(), value);
        Some(value)
    }

    /// Remove a character, keeping the order of the rest.
    pub fn remove(&mut self, id: CharacterId) -> Option<Character> {
        let position = self.position(id)?;
        Some(self.characters.remove(position))
    }

    fn sort_by_initiative(&mut self) {
        // Vec::sort_by is stable
        self.characters
            .sort_by(|a, b| b.initiative.cmp(&a.initiative));
    }
}
