//! Plain-text roster summary for sharing outside the tracker.

use crate::character::Character;

/// Format one line per character in roster order.
///
/// `1- Doc HP [5/5] Garra (2/2)`
pub fn format_summary(characters: &[Character]) -> String {
    characters
        .iter()
        .enumerate()
        .map(|(idx, c)| {
            format!(
                "{}- {} HP [{}/{}] Garra ({}/{})",
                idx + 1,
                c.name,
                c.hp_current,
                c.hp_total,
                c.garra_current,
                c.garra_total
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
