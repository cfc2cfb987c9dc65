//! Character records tracked in the initiative roster.
//!
//! Field names serialize in camelCase so rosters saved by earlier versions of
//! the tracker load without conversion.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default HP for a character added without a usable value.
pub const DEFAULT_HP: i64 = 10;

/// Default garra for a character added without a usable value.
pub const DEFAULT_GARRA: i64 = 0;

/// Default initiative.
pub const DEFAULT_INITIATIVE: i64 = 0;

/// Unique identifier for a character.
///
/// Ids are creation-order timestamps in milliseconds. Only uniqueness matters;
/// see [`CharacterId::next_after`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub u64);

impl CharacterId {
    /// Issue an id from the wall clock that is strictly greater than `last`.
    ///
    /// Returns `None` when `last` is already `u64::MAX`.
    pub fn next_after(last: Option<CharacterId>) -> Option<Self> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();

        match last {
            Some(CharacterId(prev)) if now <= prev => prev.checked_add(1).map(CharacterId),
            _ => Some(CharacterId(now)),
        }
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A combatant in the roster.
///
/// Numeric fields read leniently: decimals truncate toward zero and `null`,
/// missing or non-numeric values read as 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub initiative: i64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub hp_current: i64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub hp_total: i64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub garra_current: i64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub garra_total: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredNumber {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = match Option::<StoredNumber>::deserialize(deserializer)? {
        Some(StoredNumber::Int(value)) => value,
        // `as` saturates and maps NaN to 0.
        Some(StoredNumber::Float(value)) => value.trunc() as i64,
        Some(StoredNumber::Text(text)) => coerce_number(&text).unwrap_or(0),
        Some(StoredNumber::Other(_)) | None => 0,
    };
    Ok(value)
}

impl Character {
    /// Read one of the numeric fields.
    pub fn field(&self, field: NumericField) -> i64 {
        match field {
            NumericField::Initiative => self.initiative,
            NumericField::HpCurrent => self.hp_current,
            NumericField::HpTotal => self.hp_total,
            NumericField::GarraCurrent => self.garra_current,
            NumericField::GarraTotal => self.garra_total,
        }
    }

    /// Overwrite one of the numeric fields. No bounds are applied.
    pub fn set_field(&mut self, field: NumericField, value: i64) {
        match field {
            NumericField::Initiative => self.initiative = value,
            NumericField::HpCurrent => self.hp_current = value,
            NumericField::HpTotal => self.hp_total = value,
            NumericField::GarraCurrent => self.garra_current = value,
            NumericField::GarraTotal => self.garra_total = value,
        }
    }

    /// Current and total for a resource.
    pub fn resource(&self, resource: Resource) -> (i64, i64) {
        (
            self.field(resource.current_field()),
            self.field(resource.total_field()),
        )
    }

    /// Fill ratio of a resource for gauges, clamped to `[0, 1]`.
    ///
    /// A zero or negative total reads as empty.
    pub fn ratio(&self, resource: Resource) -> f64 {
        let (current, total) = self.resource(resource);
        if total <= 0 {
            return 0.0;
        }
        (current as f64 / total as f64).clamp(0.0, 1.0)
    }
}

/// The numeric fields that can be edited after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Initiative,
    HpCurrent,
    HpTotal,
    GarraCurrent,
    GarraTotal,
}

impl NumericField {
    pub const ALL: [NumericField; 5] = [
        NumericField::Initiative,
        NumericField::HpCurrent,
        NumericField::HpTotal,
        NumericField::GarraCurrent,
        NumericField::GarraTotal,
    ];

    /// Short name used by the command line.
    pub fn name(self) -> &'static str {
        match self {
            NumericField::Initiative => "init",
            NumericField::HpCurrent => "hp",
            NumericField::HpTotal => "hpmax",
            NumericField::GarraCurrent => "garra",
            NumericField::GarraTotal => "garramax",
        }
    }

    /// Parse a field name, accepting the serialized names as aliases.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "init" | "initiative" => Some(NumericField::Initiative),
            "hp" | "hpcurrent" => Some(NumericField::HpCurrent),
            "hpmax" | "hptotal" => Some(NumericField::HpTotal),
            "garra" | "garracurrent" => Some(NumericField::GarraCurrent),
            "garramax" | "garratotal" => Some(NumericField::GarraTotal),
            _ => None,
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A depletable resource with a current and a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Hp,
    Garra,
}

impl Resource {
    pub fn current_field(self) -> NumericField {
        match self {
            Resource::Hp => NumericField::HpCurrent,
            Resource::Garra => NumericField::GarraCurrent,
        }
    }

    pub fn total_field(self) -> NumericField {
        match self {
            Resource::Hp => NumericField::HpTotal,
            Resource::Garra => NumericField::GarraTotal,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "hp" => Some(Resource::Hp),
            "garra" => Some(Resource::Garra),
            _ => None,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Hp => f.write_str("HP"),
            Resource::Garra => f.write_str("Garra"),
        }
    }
}

/// Direction of a clamped +/- adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Increment,
    Decrement,
}

impl Step {
    fn delta(self) -> i64 {
        match self {
            Step::Increment => 1,
            Step::Decrement => -1,
        }
    }

    /// Apply the step to `current`, keeping the result inside `[0, total]`.
    ///
    /// A negative total yields 0.
    pub fn apply(self, current: i64, total: i64) -> i64 {
        current.saturating_add(self.delta()).min(total).max(0)
    }
}

/// Input for adding a character. Absent numeric fields fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterDraft {
    pub name: String,
    pub initiative: Option<i64>,
    pub hp_current: Option<i64>,
    pub hp_total: Option<i64>,
    pub garra_current: Option<i64>,
    pub garra_total: Option<i64>,
}

impl CharacterDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build a draft from raw add-form text.
    ///
    /// Current HP and garra start equal to the typed totals.
    pub fn from_inputs(name: &str, initiative: &str, hp_total: &str, garra_total: &str) -> Self {
        let hp = coerce_number(hp_total);
        let garra = coerce_number(garra_total);
        Self {
            name: name.to_string(),
            initiative: coerce_number(initiative),
            hp_current: hp,
            hp_total: hp,
            garra_current: garra,
            garra_total: garra,
        }
    }

    pub fn with_initiative(mut self, initiative: i64) -> Self {
        self.initiative = Some(initiative);
        self
    }

    /// Set both current and total HP.
    pub fn with_hp(mut self, hp: i64) -> Self {
        self.hp_current = Some(hp);
        self.hp_total = Some(hp);
        self
    }

    /// Set both current and total garra.
    pub fn with_garra(mut self, garra: i64) -> Self {
        self.garra_current = Some(garra);
        self.garra_total = Some(garra);
        self
    }

    /// Turn the draft into a record, or `None` when the name is empty.
    ///
    /// The name is kept as typed. Zero counts as "not given" for every
    /// numeric field.
    pub fn into_character(self, id: CharacterId) -> Option<Character> {
        if self.name.is_empty() {
            return None;
        }

        let or_default = |value: Option<i64>, default: i64| {
            value.filter(|v| *v != 0).unwrap_or(default)
        };

        Some(Character {
            id,
            name: self.name,
            initiative: or_default(self.initiative, DEFAULT_INITIATIVE),
            hp_current: or_default(self.hp_current, DEFAULT_HP),
            hp_total: or_default(self.hp_total, DEFAULT_HP),
            garra_current: or_default(self.garra_current, DEFAULT_GARRA),
            garra_total: or_default(self.garra_total, DEFAULT_GARRA),
        })
    }
}

/// Coerce free text to an integer.
///
/// Blank text is 0, decimals truncate toward zero, and anything else is `None`.
pub fn coerce_number(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0);
    }
    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value.trunc() as i64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults() {
        let character = CharacterDraft::new("Doc")
            .into_character(CharacterId(1))
            .unwrap();

        assert_eq!(character.name, "Doc");
        assert_eq!(character.initiative, 0);
        assert_eq!(character.hp_current, 10);
        assert_eq!(character.hp_total, 10);
        assert_eq!(character.garra_current, 0);
        assert_eq!(character.garra_total, 0);
    }

    #[test]
    fn test_draft_zero_hp_falls_back_to_default() {
        let character = CharacterDraft::new("Doc")
            .with_hp(0)
            .into_character(CharacterId(1))
            .unwrap();
        assert_eq!(character.hp_total, 10);
        assert_eq!(character.hp_current, 10);
    }

    #[test]
    fn test_draft_empty_name_is_rejected() {
        assert!(CharacterDraft::new("").into_character(CharacterId(1)).is_none());
    }

    #[test]
    fn test_draft_name_is_kept_as_typed() {
        let character = CharacterDraft::new("  Doc ")
            .into_character(CharacterId(1))
            .unwrap();
        assert_eq!(character.name, "  Doc ");

        let spaces = CharacterDraft::new("   ").into_character(CharacterId(2));
        assert_eq!(spaces.map(|c| c.name), Some("   ".to_string()));
    }

    #[test]
    fn test_draft_from_inputs() {
        let draft = CharacterDraft::from_inputs("Billy the Kid", "15", "12", "abc");
        assert_eq!(draft.initiative, Some(15));
        assert_eq!(draft.hp_current, Some(12));
        assert_eq!(draft.hp_total, Some(12));
        assert_eq!(draft.garra_total, None);

        let character = draft.into_character(CharacterId(7)).unwrap();
        assert_eq!(character.garra_total, 0);
        assert_eq!(character.hp_current, 12);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(""), Some(0));
        assert_eq!(coerce_number("  42 "), Some(42));
        assert_eq!(coerce_number("-3"), Some(-3));
        assert_eq!(coerce_number("3.9"), Some(3));
        assert_eq!(coerce_number("-3.9"), Some(-3));
        assert_eq!(coerce_number("seven"), None);
        assert_eq!(coerce_number("inf"), None);
    }

    #[test]
    fn test_step_clamps() {
        assert_eq!(Step::Increment.apply(5, 5), 5);
        assert_eq!(Step::Increment.apply(4, 5), 5);
        assert_eq!(Step::Decrement.apply(0, 5), 0);
        assert_eq!(Step::Decrement.apply(3, 5), 2);
        // Over the total after a direct edit
        assert_eq!(Step::Decrement.apply(15, 10), 10);
        // Negative values come back to the floor
        assert_eq!(Step::Increment.apply(-4, 10), 0);
        assert_eq!(Step::Decrement.apply(2, -1), 0);
    }

    #[test]
    fn test_ratio() {
        let mut character = CharacterDraft::new("Doc")
            .with_hp(8)
            .into_character(CharacterId(1))
            .unwrap();
        character.hp_current = 4;
        assert!((character.ratio(Resource::Hp) - 0.5).abs() < f64::EPSILON);

        character.hp_current = 20;
        assert_eq!(character.ratio(Resource::Hp), 1.0);

        // Garra total defaults to zero
        assert_eq!(character.ratio(Resource::Garra), 0.0);
    }

    #[test]
    fn test_next_id_is_strictly_increasing() {
        let far_future = CharacterId(u64::MAX / 2);
        assert_eq!(
            CharacterId::next_after(Some(far_future)),
            Some(CharacterId(u64::MAX / 2 + 1))
        );

        let first = CharacterId::next_after(None).unwrap();
        let second = CharacterId::next_after(Some(first)).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_next_id_at_max_is_none() {
        assert_eq!(CharacterId::next_after(Some(CharacterId(u64::MAX))), None);
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in NumericField::ALL {
            assert_eq!(NumericField::parse(field.name()), Some(field));
        }
        assert_eq!(NumericField::parse("hpTotal"), Some(NumericField::HpTotal));
        assert_eq!(NumericField::parse("speed"), None);
    }

    #[test]
    fn test_serialized_field_names() {
        let character = CharacterDraft::new("Doc")
            .with_initiative(3)
            .into_character(CharacterId(1700000000000))
            .unwrap();
        let json = serde_json::to_value(&character).unwrap();

        assert_eq!(json["id"], 1700000000000u64);
        assert_eq!(json["hpCurrent"], 10);
        assert_eq!(json["garraTotal"], 0);
    }

    #[test]
    fn test_numbers_read_leniently() {
        let json = r#"{"id":5,"name":"Doc","initiative":"7","hpCurrent":3.9,"hpTotal":null,"garraCurrent":-1.5,"garraTotal":true}"#;
        let character: Character = serde_json::from_str(json).unwrap();

        assert_eq!(character.initiative, 7);
        assert_eq!(character.hp_current, 3);
        assert_eq!(character.hp_total, 0);
        assert_eq!(character.garra_current, -1);
        assert_eq!(character.garra_total, 0);

        let sparse: Character = serde_json::from_str(r#"{"id":6,"name":"Kid"}"#).unwrap();
        assert_eq!(sparse.hp_total, 0);
    }
}
