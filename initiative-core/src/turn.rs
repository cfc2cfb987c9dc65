//! Turn pointer.
//!
//! The pointer is a slot in the roster, not a reference to a character. When
//! the roster is re-sorted or shrinks, it keeps its numeric value and may land
//! on someone else or past the end.

use crate::character::Character;
use crate::roster::Roster;

/// Index of the roster entry currently acting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnPointer {
    index: usize,
}

impl TurnPointer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move to the next slot, wrapping at `len`. Does nothing when `len` is 0.
    pub fn advance(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.index + 1) % len;
    }

    /// Start a new duel from the top of the order.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// The character in the current slot, if the slot is occupied.
    pub fn current<'a>(&self, roster: &'a Roster) -> Option<&'a Character> {
        roster.characters().get(self.index)
    }

    pub fn is_current(&self, position: usize) -> bool {
        self.index == position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterDraft;

    #[test]
    fn test_advance_cycles_and_wraps() {
        let mut turn = TurnPointer::new();
        let seen: Vec<usize> = (0..4)
            .map(|_| {
                turn.advance(3);
                turn.index()
            })
            .collect();
        assert_eq!(seen, vec![1, 2, 0, 1]);
    }

    #[test]
    fn test_advance_empty_is_noop() {
        let mut turn = TurnPointer::new();
        turn.advance(0);
        assert_eq!(turn.index(), 0);
    }

    #[test]
    fn test_reset() {
        let mut turn = TurnPointer::new();
        turn.advance(5);
        turn.advance(5);
        turn.reset();
        assert_eq!(turn.index(), 0);
    }

    #[test]
    fn test_current_out_of_range() {
        let mut roster = Roster::new();
        let a = roster.add(CharacterDraft::new("A").with_initiative(2)).unwrap();
        roster.add(CharacterDraft::new("B").with_initiative(1));

        let mut turn = TurnPointer::new();
        turn.advance(roster.len());
        assert_eq!(turn.current(&roster).map(|c| c.name.as_str()), Some("B"));

        roster.remove(a);
        assert_eq!(turn.index(), 1);
        assert!(turn.current(&roster).is_none());
    }
}
