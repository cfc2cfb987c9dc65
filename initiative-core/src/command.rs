//! Line commands shared by the TUI command line and headless mode.
//!
//! Positions are 1-based, matching the numbering in the summary. Verbs are
//! case-insensitive.

use crate::character::{coerce_number, CharacterDraft, CharacterId, NumericField, Resource, Step};
use crate::storage::Storage;
use crate::tracker::{Tracker, TrackerError};
use thiserror::Error;

/// One-line usage for every command.
pub const HELP: &[(&str, &str)] = &[
    ("add <name> [init=N] [hp=N] [garra=N]", "Add a character"),
    ("set <pos> <field> <value>", "Edit init, hp, hpmax, garra or garramax"),
    ("inc <pos> hp|garra", "Raise HP or garra by one (up to the total)"),
    ("dec <pos> hp|garra", "Lower HP or garra by one (down to zero)"),
    ("rm <pos>", "Remove a character"),
    ("next", "Advance to the next turn"),
    ("reset", "New duel: back to the first slot"),
    ("list", "Show the roster"),
    ("summary", "Show the shareable summary"),
    ("copy", "Copy the summary to the clipboard"),
    ("help", "Show this help"),
    ("quit", "Exit"),
];

/// Errors from parsing or running a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Not a roster position: {0}")]
    BadPosition(String),

    #[error("Nobody at position {0}")]
    NoCharacterAt(usize),

    #[error("Unknown field: {0} (expected init, hp, hpmax, garra or garramax)")]
    UnknownField(String),

    #[error("Unknown resource: {0} (expected hp or garra)")]
    UnknownResource(String),

    #[error("Unknown option: {0} (expected init=, hp= or garra=)")]
    BadOption(String),

    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(CharacterDraft),
    Set {
        position: usize,
        field: NumericField,
        value: String,
    },
    Adjust {
        position: usize,
        resource: Resource,
        step: Step,
    },
    Remove {
        position: usize,
    },
    Next,
    Reset,
    List,
    Summary,
    Copy,
    Help,
    Quit,
}

/// What running a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added { id: CharacterId, name: String },
    /// Add with an empty name; nothing changed.
    Ignored,
    Updated {
        name: String,
        field: NumericField,
        value: i64,
    },
    Removed {
        name: String,
    },
    Turn {
        index: usize,
        name: Option<String>,
    },
    Reset,
    Listing(String),
    Summary(String),
    /// The caller should put this text on the clipboard.
    Copy(String),
    Help,
    Quit,
}

impl Command {
    /// Parse a command line. A leading `:` or `#` is ignored.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim().trim_start_matches([':', '#']);
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        match verb.as_str() {
            "add" | "a" => parse_add(&args),
            "set" | "s" => match args.as_slice() {
                [position, field, value] => Ok(Command::Set {
                    position: parse_position(position)?,
                    field: NumericField::parse(field)
                        .ok_or_else(|| CommandError::UnknownField(field.to_string()))?,
                    value: value.to_string(),
                }),
                _ => Err(CommandError::Usage("set <pos> <field> <value>")),
            },
            "inc" | "+" => parse_adjust(&args, Step::Increment, "inc <pos> hp|garra"),
            "dec" | "-" => parse_adjust(&args, Step::Decrement, "dec <pos> hp|garra"),
            "rm" | "remove" | "del" => match args.as_slice() {
                [position] => Ok(Command::Remove {
                    position: parse_position(position)?,
                }),
                _ => Err(CommandError::Usage("rm <pos>")),
            },
            "next" | "n" => Ok(Command::Next),
            "reset" | "duel" => Ok(Command::Reset),
            "list" | "ls" => Ok(Command::List),
            "summary" => Ok(Command::Summary),
            "copy" | "y" => Ok(Command::Copy),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }

    /// Run the command against a tracker.
    pub fn apply<S: Storage>(self, tracker: &mut Tracker<S>) -> Result<Outcome, CommandError> {
        match self {
            Command::Add(draft) => match tracker.add(draft) {
                Some(id) => {
                    let name = tracker
                        .roster()
                        .get(id)
                        .map(|c| c.name.clone())
                        .unwrap_or_default();
                    Ok(Outcome::Added { id, name })
                }
                None => Ok(Outcome::Ignored),
            },
            Command::Set {
                position,
                field,
                value,
            } => {
                let id = resolve(tracker, position)?;
                let value = tracker.update_text(id, field, &value)?;
                Ok(Outcome::Updated {
                    name: name_of(tracker, id),
                    field,
                    value,
                })
            }
            Command::Adjust {
                position,
                resource,
                step,
            } => {
                let id = resolve(tracker, position)?;
                let value = tracker.adjust(id, resource, step)?;
                Ok(Outcome::Updated {
                    name: name_of(tracker, id),
                    field: resource.current_field(),
                    value,
                })
            }
            Command::Remove { position } => {
                let id = resolve(tracker, position)?;
                let removed = tracker.remove(id)?;
                Ok(Outcome::Removed { name: removed.name })
            }
            Command::Next => {
                tracker.advance_turn();
                Ok(Outcome::Turn {
                    index: tracker.turn().index(),
                    name: tracker.current().map(|c| c.name.clone()),
                })
            }
            Command::Reset => {
                tracker.reset_turn();
                Ok(Outcome::Reset)
            }
            Command::List => Ok(Outcome::Listing(format_listing(tracker))),
            Command::Summary => Ok(Outcome::Summary(tracker.summary())),
            Command::Copy => Ok(Outcome::Copy(tracker.summary())),
            Command::Help => Ok(Outcome::Help),
            Command::Quit => Ok(Outcome::Quit),
        }
    }
}

/// Roster table with the turn marker, one character per line.
pub fn format_listing<S: Storage>(tracker: &Tracker<S>) -> String {
    let turn = tracker.turn();
    tracker
        .characters()
        .iter()
        .enumerate()
        .map(|(idx, c)| {
            let marker = if turn.is_current(idx) { ">" } else { " " };
            format!(
                "{marker} {:>2}. [{:>3}] {}  HP {}/{}  Garra {}/{}",
                idx + 1,
                c.initiative,
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

fn parse_add(args: &[&str]) -> Result<Command, CommandError> {
    let mut name_words = Vec::new();
    let mut draft = CharacterDraft::default();

    for arg in args {
        match arg.split_once('=') {
            Some((key, value)) => {
                let value = coerce_number(value);
                match key.to_ascii_lowercase().as_str() {
                    "init" | "initiative" => draft.initiative = value,
                    "hp" => {
                        draft.hp_current = value;
                        draft.hp_total = value;
                    }
                    "garra" => {
                        draft.garra_current = value;
                        draft.garra_total = value;
                    }
                    _ => return Err(CommandError::BadOption(arg.to_string())),
                }
            }
            None => name_words.push(*arg),
        }
    }

    if name_words.is_empty() {
        return Err(CommandError::Usage("add <name> [init=N] [hp=N] [garra=N]"));
    }
    draft.name = name_words.join(" ");
    Ok(Command::Add(draft))
}

fn parse_adjust(args: &[&str], step: Step, usage: &'static str) -> Result<Command, CommandError> {
    match args {
        [position, resource] => Ok(Command::Adjust {
            position: parse_position(position)?,
            resource: Resource::parse(resource)
                .ok_or_else(|| CommandError::UnknownResource(resource.to_string()))?,
            step,
        }),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn parse_position(text: &str) -> Result<usize, CommandError> {
    match text.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(CommandError::BadPosition(text.to_string())),
    }
}

fn resolve<S: Storage>(tracker: &Tracker<S>, position: usize) -> Result<CharacterId, CommandError> {
    tracker
        .roster()
        .id_at(position - 1)
        .ok_or(CommandError::NoCharacterAt(position))
}

fn name_of<S: Storage>(tracker: &Tracker<S>, id: CharacterId) -> String {
    tracker
        .roster()
        .get(id)
        .map(|c| c.name.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{names, posse, tracker_with};

    #[test]
    fn test_parse_add_with_spaces_and_options() {
        let command = Command::parse("add Billy the Kid init=18 hp=8 garra=3").unwrap();
        let Command::Add(draft) = command else {
            panic!("expected add, got {command:?}");
        };
        assert_eq!(draft.name, "Billy the Kid");
        assert_eq!(draft.initiative, Some(18));
        assert_eq!(draft.hp_total, Some(8));
        assert_eq!(draft.hp_current, Some(8));
        assert_eq!(draft.garra_total, Some(3));
    }

    #[test]
    fn test_parse_prefixes_and_case() {
        assert_eq!(Command::parse(":NEXT").unwrap(), Command::Next);
        assert_eq!(Command::parse("#quit").unwrap(), Command::Quit);
        assert_eq!(Command::parse("  duel ").unwrap(), Command::Reset);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(
            Command::parse("shoot 1"),
            Err(CommandError::UnknownCommand("shoot".to_string()))
        );
        assert_eq!(
            Command::parse("rm 0"),
            Err(CommandError::BadPosition("0".to_string()))
        );
        assert_eq!(
            Command::parse("set 1 speed 3"),
            Err(CommandError::UnknownField("speed".to_string()))
        );
        assert_eq!(
            Command::parse("inc 1 mana"),
            Err(CommandError::UnknownResource("mana".to_string()))
        );
        assert_eq!(
            Command::parse("add Doc ac=3"),
            Err(CommandError::BadOption("ac=3".to_string()))
        );
        assert!(matches!(Command::parse("add init=3"), Err(CommandError::Usage(_))));
        assert!(matches!(Command::parse("set 1 hp"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_apply_set_initiative_resorts() {
        let mut tracker = tracker_with(posse());
        // Billy the Kid, Calamity Jane, Doc, Outlaw
        let outcome = Command::parse("set 4 init 20")
            .unwrap()
            .apply(&mut tracker)
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Updated {
                name: "Outlaw".to_string(),
                field: NumericField::Initiative,
                value: 20
            }
        );
        assert_eq!(names(tracker.characters())[0], "Outlaw");
    }

    #[test]
    fn test_apply_adjust_and_remove() {
        let mut tracker = tracker_with(posse());

        let outcome = Command::parse("dec 3 hp").unwrap().apply(&mut tracker).unwrap();
        assert_eq!(
            outcome,
            Outcome::Updated {
                name: "Doc".to_string(),
                field: NumericField::HpCurrent,
                value: 4
            }
        );

        let outcome = Command::parse("rm 1").unwrap().apply(&mut tracker).unwrap();
        assert_eq!(
            outcome,
            Outcome::Removed {
                name: "Billy the Kid".to_string()
            }
        );
        assert_eq!(tracker.characters().len(), 3);
    }

    #[test]
    fn test_apply_unknown_position() {
        let mut tracker = tracker_with(posse());
        let result = Command::parse("rm 9").unwrap().apply(&mut tracker);
        assert_eq!(result, Err(CommandError::NoCharacterAt(9)));
    }

    #[test]
    fn test_apply_next_reports_current() {
        let mut tracker = tracker_with(posse());
        let outcome = Command::Next.apply(&mut tracker).unwrap();
        assert_eq!(
            outcome,
            Outcome::Turn {
                index: 1,
                name: Some("Calamity Jane".to_string())
            }
        );
    }

    #[test]
    fn test_listing_marks_turn() {
        let tracker = tracker_with(posse());
        let listing = format_listing(&tracker);
        let first = listing.lines().next().unwrap();
        assert!(first.starts_with(">  1. [ 18] Billy the Kid"));
        assert!(listing.lines().nth(1).unwrap().starts_with("   2."));
    }
}
