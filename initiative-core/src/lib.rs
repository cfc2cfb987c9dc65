//! Initiative order and turn tracking for tabletop combat.
//!
//! This crate provides:
//! - Character records with initiative, HP and garra
//! - A roster kept sorted by initiative, highest first
//! - A positional turn pointer
//! - A shareable plain-text summary
//! - Roster persistence through a pluggable key-value storage port
//! - A small line-command language used by the front ends
//!
//! # Quick Start
//!
//! ```
//! use initiative_core::{CharacterDraft, MemoryStorage, Tracker, STORAGE_KEY};
//!
//! let mut tracker = Tracker::open(MemoryStorage::new(), STORAGE_KEY);
//! tracker.add(CharacterDraft::new("Doc").with_initiative(12).with_hp(5).with_garra(2));
//! tracker.add(CharacterDraft::new("Billy").with_initiative(18));
//!
//! assert_eq!(tracker.characters()[0].name, "Billy");
//! tracker.advance_turn();
//! assert_eq!(tracker.current().map(|c| c.name.as_str()), Some("Doc"));
//! ```

pub mod character;
pub mod command;
pub mod config;
pub mod persist;
pub mod roster;
pub mod storage;
pub mod summary;
pub mod testing;
pub mod tracker;
pub mod turn;

// Primary public API
pub use character::{Character, CharacterDraft, CharacterId, NumericField, Resource, Step};
pub use command::{Command, CommandError, Outcome};
pub use config::TrackerConfig;
pub use persist::{PersistError, STORAGE_KEY};
pub use roster::Roster;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use summary::format_summary;
pub use tracker::{Change, Tracker, TrackerError};
pub use turn::TurnPointer;
