//! Headless mode for the initiative tracker.
//!
//! This module provides a simple text-based interface for running the
//! tracker without a TUI. It's designed for scripting and automated testing.

use std::io::{self, BufRead, Write};

use initiative_core::command::HELP;
use initiative_core::{Change, Command, CommandError, Outcome, Storage, Tracker};

use crate::clipboard::Clipboard;

/// Run the tracker in headless mode on stdin/stdout.
///
/// This provides a simple line-oriented protocol:
/// - Each line is one command (`add`, `set`, `next`, ...)
/// - A leading `#` or `:` is accepted and ignored
/// - Replies are prefixed with a tag such as `[OK]`, `[TURN]` or `[ERROR]`
pub fn run_headless<S: Storage>(
    tracker: &mut Tracker<S>,
    clipboard: &mut dyn Clipboard,
) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(tracker, clipboard, stdin.lock(), stdout.lock())
}

/// Run the line protocol over arbitrary streams.
pub fn run_session<S: Storage, R: BufRead, W: Write>(
    tracker: &mut Tracker<S>,
    clipboard: &mut dyn Clipboard,
    input: R,
    mut out: W,
) -> io::Result<()> {
    writeln!(out, "=== Initiative Tracker (headless) ===")?;
    writeln!(out, "{} in the roster. Type help for commands.", tracker.characters().len())?;
    writeln!(out)?;

    for line in input.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                tracing::error!(error = %e, "failed to read input");
                break;
            }
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                writeln!(out, "[ERROR] {e}")?;
                continue;
            }
        };

        tracing::debug!(?command, "headless command");
        match command.apply(tracker) {
            Ok(Outcome::Quit) => {
                writeln!(out, "Goodbye!")?;
                break;
            }
            Ok(outcome) => write_outcome(&mut out, outcome, clipboard)?,
            Err(e) => writeln!(out, "[ERROR] {e}")?,
        }

        let wrote = tracker.drain_changes().iter().any(Change::is_write);
        if let Some(error) = tracker.last_persist_error().filter(|_| wrote) {
            writeln!(out, "[WARN] Not saved: {error}")?;
        }
        out.flush()?;
    }

    Ok(())
}

fn write_outcome<W: Write>(
    out: &mut W,
    outcome: Outcome,
    clipboard: &mut dyn Clipboard,
) -> io::Result<()> {
    match outcome {
        Outcome::Added { id, name } => writeln!(out, "[OK] Added {name} (id {id})"),
        Outcome::Ignored => writeln!(out, "[OK] Nothing added"),
        Outcome::Updated { name, field, value } => {
            writeln!(out, "[OK] {name}: {field} = {value}")
        }
        Outcome::Removed { name } => writeln!(out, "[OK] Removed {name}"),
        Outcome::Turn { index, name } => match name {
            Some(name) => writeln!(out, "[TURN] {} - {name}", index + 1),
            None => writeln!(out, "[TURN] Roster is empty"),
        },
        Outcome::Reset => writeln!(out, "[TURN] New duel"),
        Outcome::Listing(text) | Outcome::Summary(text) => {
            if text.is_empty() {
                writeln!(out, "(empty)")
            } else {
                writeln!(out, "{text}")
            }
        }
        Outcome::Copy(text) => {
            if text.is_empty() {
                return writeln!(out, "[OK] Nothing to copy");
            }
            if let Err(e) = clipboard.copy(&text) {
                tracing::warn!(error = %e, "clipboard write failed");
            }
            writeln!(out, "[COPIED]")?;
            writeln!(out, "{text}")
        }
        Outcome::Help => {
            writeln!(out, "[HELP]")?;
            for (usage, description) in HELP {
                writeln!(out, "  {usage:<38} - {description}")?;
            }
            Ok(())
        }
        Outcome::Quit => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use initiative_core::testing::RecordingStorage;
    use initiative_core::{FileStorage, MemoryStorage, STORAGE_KEY};
    use std::io::Cursor;

    fn run(script: &str) -> (String, MemoryClipboard, Tracker<MemoryStorage>) {
        let mut tracker = Tracker::open(MemoryStorage::new(), STORAGE_KEY);
        let mut clipboard = MemoryClipboard::new();
        let mut out = Vec::new();
        run_session(&mut tracker, &mut clipboard, Cursor::new(script), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), clipboard, tracker)
    }

    #[test]
    fn test_session_adds_and_rotates() {
        let (out, _, tracker) = run(
            "add Doc init=12 hp=5 garra=2\n\
             add Billy the Kid init=18 hp=8\n\
             next\n\
             next\n",
        );

        assert!(out.contains("[OK] Added Doc"));
        assert!(out.contains("[TURN] 2 - Doc"));
        assert!(out.contains("[TURN] 1 - Billy the Kid"));
        assert_eq!(tracker.characters()[0].name, "Billy the Kid");
    }

    #[test]
    fn test_session_reports_errors_and_continues() {
        let (out, _, tracker) = run("shoot\nrm 1\n\nadd Doc\n");

        assert!(out.contains("[ERROR] Unknown command: shoot"));
        assert!(out.contains("[ERROR] Nobody at position 1"));
        assert_eq!(tracker.characters().len(), 1);
    }

    #[test]
    fn test_session_copy() {
        let (out, clipboard, _) = run("copy\nadd Doc hp=5 garra=2\n#copy\n");

        assert!(out.contains("[OK] Nothing to copy"));
        assert!(out.contains("[COPIED]\n1- Doc HP [5/5] Garra (2/2)"));
        assert_eq!(clipboard.contents(), Some("1- Doc HP [5/5] Garra (2/2)"));
    }

    #[test]
    fn test_session_roster_survives_restart() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory");
        let script = "add Doc init=12 hp=5 garra=2\nadd Billy init=18\ndec 2 hp\n";

        {
            let storage = FileStorage::open(temp_dir.path()).unwrap();
            let mut tracker = Tracker::open(storage, STORAGE_KEY);
            let mut out = Vec::new();
            run_session(&mut tracker, &mut MemoryClipboard::new(), Cursor::new(script), &mut out)
                .unwrap();
        }

        let storage = FileStorage::open(temp_dir.path()).unwrap();
        let mut tracker = Tracker::open(storage, STORAGE_KEY);
        let mut out = Vec::new();
        run_session(
            &mut tracker,
            &mut MemoryClipboard::new(),
            Cursor::new("summary\n"),
            &mut out,
        )
        .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("2 in the roster"));
        assert!(out.contains("1- Billy HP [10/10] Garra (0/0)\n2- Doc HP [4/5] Garra (2/2)"));
    }

    #[test]
    fn test_session_warns_only_after_failed_writes() {
        let mut storage = RecordingStorage::new();
        storage.set_failing(true);
        let mut tracker = Tracker::open(storage, STORAGE_KEY);
        let mut out = Vec::new();
        run_session(
            &mut tracker,
            &mut MemoryClipboard::new(),
            Cursor::new("add Doc
next
list
summary
reset
"),
            &mut out,
        )
        .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("[WARN] Not saved").count(), 1);
        assert!(out.contains("[OK] Added Doc"));
        assert!(out.contains("[TURN] 1 - Doc"));
    }

    #[test]
    fn test_session_stops_at_quit() {
        let (out, _, tracker) = run("quit\nadd Doc\n");

        assert!(out.contains("Goodbye!"));
        assert!(tracker.characters().is_empty());
    }
}
