//! Roster persistence.
//!
//! The roster is stored verbatim as a JSON array of character records under a
//! single storage key. There is no envelope or version field, so files written
//! by earlier versions of the tracker load directly.

use crate::character::Character;
use crate::storage::{Storage, StorageError};
use thiserror::Error;

/// Key the roster is stored under unless configured otherwise.
pub const STORAGE_KEY: &str = "rpg-tracker-data";

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize the roster to its stored form.
pub fn encode_roster(characters: &[Character]) -> Result<String, PersistError> {
    Ok(serde_json::to_string(characters)?)
}

/// Parse a stored roster. Stored order is kept.
pub fn decode_roster(content: &str) -> Result<Vec<Character>, PersistError> {
    Ok(serde_json::from_str(content)?)
}

/// Write the full roster under `key`.
pub fn save_roster<S: Storage + ?Sized>(
    storage: &mut S,
    key: &str,
    characters: &[Character],
) -> Result<(), PersistError> {
    let content = encode_roster(characters)?;
    storage.set(key, &content)?;
    Ok(())
}

/// Read the roster stored under `key`. A missing key is an empty roster.
pub fn load_roster<S: Storage + ?Sized>(
    storage: &S,
    key: &str,
) -> Result<Vec<Character>, PersistError> {
    match storage.get(key)? {
        Some(content) => decode_roster(&content),
        None => Ok(Vec::new()),
    }
}

/// Like [`load_roster`], but unreadable or corrupt data yields an empty roster.
pub fn load_roster_or_empty<S: Storage + ?Sized>(storage: &S, key: &str) -> Vec<Character> {
    match load_roster(storage, key) {
        Ok(characters) => {
            tracing::debug!(key, count = characters.len(), "loaded roster");
            characters
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "could not load roster, starting empty");
            Vec::new()
        }
    }
}
