//! Main application state and logic

use std::time::{Duration, Instant};

use initiative_core::{
    Change, CharacterDraft, CharacterId, Command, CommandError, NumericField, Outcome, Resource,
    Step, Storage, Tracker, TrackerError,
};

use crate::clipboard::Clipboard;
use crate::ui::theme::TrackerTheme;
use crate::ui::{FocusedPanel, Overlay};

/// Storage as seen by the app; the backend is chosen at startup.
pub type AppTracker = Tracker<Box<dyn Storage>>;

/// Vim-style input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and hotkeys (default)
    #[default]
    Normal,
    /// Typing into the add form
    Form,
    /// Typing a new value for one field of the selected character
    Edit,
    /// Entering : commands
    Command,
}

/// Fields of the add form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Initiative,
    HpTotal,
    GarraTotal,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Initiative,
        FormField::HpTotal,
        FormField::GarraTotal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Initiative => "Initiative",
            FormField::HpTotal => "HP Total",
            FormField::GarraTotal => "Garra Total",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "e.g. Billy the Kid",
            FormField::Initiative => "0",
            FormField::HpTotal => "10",
            FormField::GarraTotal => "0",
        }
    }

    fn index(self) -> usize {
        match self {
            FormField::Name => 0,
            FormField::Initiative => 1,
            FormField::HpTotal => 2,
            FormField::GarraTotal => 3,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// The add-character form.
#[derive(Debug, Clone, Default)]
pub struct AddForm {
    values: [String; 4],
    pub focused: FormField,
}

impl AddForm {
    pub fn value(&self, field: FormField) -> &str {
        &self.values[field.index()]
    }

    pub fn type_char(&mut self, c: char) {
        let numeric = self.focused != FormField::Name;
        if numeric && !(c.is_ascii_digit() || c == '-' || c == '.') {
            return;
        }
        self.values[self.focused.index()].push(c);
    }

    pub fn backspace(&mut self) {
        self.values[self.focused.index()].pop();
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    /// Current contents as a draft.
    pub fn draft(&self) -> CharacterDraft {
        CharacterDraft::from_inputs(
            self.value(FormField::Name),
            self.value(FormField::Initiative),
            self.value(FormField::HpTotal),
            self.value(FormField::GarraTotal),
        )
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A direct edit in progress.
#[derive(Debug, Clone)]
pub struct PendingEdit {
    pub id: CharacterId,
    pub field: NumericField,
    pub buffer: String,
}

/// A transient message in the status bar.
#[derive(Debug, Clone)]
struct Notification {
    text: String,
    shown_at: Instant,
}

/// Main application state
pub struct App {
    pub tracker: AppTracker,

    // UI state
    pub theme: TrackerTheme,
    pub focused_panel: FocusedPanel,
    overlay: Option<Overlay>,
    pub selected: usize,

    // Input state
    pub input_mode: InputMode,
    pub form: AddForm,
    edit: Option<PendingEdit>,
    command_buffer: String,

    // Status
    notification: Option<Notification>,
    notification_duration: Duration,
    pub should_quit: bool,

    clipboard: Box<dyn Clipboard>,
}

impl App {
    pub fn new(
        tracker: AppTracker,
        clipboard: Box<dyn Clipboard>,
        notification_duration: Duration,
    ) -> Self {
        Self {
            tracker,
            theme: TrackerTheme::default(),
            focused_panel: FocusedPanel::default(),
            overlay: None,
            selected: 0,
            input_mode: InputMode::Normal,
            form: AddForm::default(),
            edit: None,
            command_buffer: String::new(),
            notification: None,
            notification_duration,
            should_quit: false,
            clipboard,
        }
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Id of the highlighted row.
    pub fn selected_id(&self) -> Option<CharacterId> {
        self.tracker.roster().id_at(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.tracker.characters().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.tracker.characters().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Apply queued tracker changes to UI state.
    pub fn sync(&mut self) {
        let mut last_edited = None;
        let mut wrote = false;
        for change in self.tracker.drain_changes() {
            wrote |= change.is_write();
            match change {
                Change::Added { position, .. } => self.selected = position,
                Change::Updated { id, .. } => last_edited = Some(id),
                Change::Reordered => {
                    // Keep the edited character highlighted after the re-sort
                    if let Some(position) =
                        last_edited.and_then(|id| self.tracker.roster().position(id))
                    {
                        self.selected = position;
                    }
                }
                Change::Removed { .. } => self.clamp_selection(),
                Change::TurnAdvanced { .. } | Change::TurnReset => {}
            }
        }
        if !wrote {
            return;
        }
        if let Some(error) = self.tracker.last_persist_error() {
            let text = format!("Not saved: {error}");
            self.set_status(text);
        }
    }

    // ------------------------------------------------------------------
    // Roster actions
    // ------------------------------------------------------------------

    /// Submit the add form. An empty name leaves the form untouched.
    pub fn submit_form(&mut self) {
        let draft = self.form.draft();
        if let Some(id) = self.tracker.add(draft) {
            let name = self
                .tracker
                .roster()
                .get(id)
                .map(|c| c.name.clone())
                .unwrap_or_default();
            self.form.clear();
            self.set_status(format!("{name} joins the posse"));
        }
        self.sync();
    }

    /// Step a resource of the selected character.
    pub fn adjust_selected(&mut self, resource: Resource, step: Step) {
        if let Some(id) = self.selected_id() {
            if let Err(e) = self.tracker.adjust(id, resource, step) {
                self.report(e);
            }
        }
        self.sync();
    }

    /// Remove the selected character.
    pub fn remove_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            match self.tracker.remove(id) {
                Ok(removed) => self.set_status(format!("{} sent to the coffin", removed.name)),
                Err(e) => self.report(e),
            }
        }
        self.sync();
    }

    pub fn next_turn(&mut self) {
        self.tracker.advance_turn();
        if let Some(current) = self.tracker.current() {
            let text = format!("{}'s turn", current.name);
            self.set_status(text);
        }
        self.sync();
    }

    pub fn new_duel(&mut self) {
        self.tracker.reset_turn();
        self.set_status("New duel! Back to the top of the order");
        self.sync();
    }

    /// Copy the summary to the clipboard. An empty roster copies nothing.
    pub fn copy_summary(&mut self) {
        let summary = self.tracker.summary();
        self.copy_text(&summary);
    }

    fn copy_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Err(e) = self.clipboard.copy(text) {
            tracing::warn!(error = %e, "clipboard write failed");
        }
        self.set_status("Summary copied to the telegraph!");
    }

    // ------------------------------------------------------------------
    // Direct edits
    // ------------------------------------------------------------------

    /// Start editing a field of the selected character.
    pub fn begin_edit(&mut self, field: NumericField) {
        let Some(character) = self.selected_id().and_then(|id| self.tracker.roster().get(id))
        else {
            return;
        };
        self.edit = Some(PendingEdit {
            id: character.id,
            field,
            buffer: character.field(field).to_string(),
        });
        self.input_mode = InputMode::Edit;
    }

    pub fn pending_edit(&self) -> Option<&PendingEdit> {
        self.edit.as_ref()
    }

    pub fn edit_type_char(&mut self, c: char) {
        if let Some(edit) = self.edit.as_mut() {
            edit.buffer.push(c);
        }
    }

    pub fn edit_backspace(&mut self) {
        if let Some(edit) = self.edit.as_mut() {
            edit.buffer.pop();
        }
    }

    /// Store the edited value as typed. Non-numeric text stores 0.
    pub fn commit_edit(&mut self) {
        if let Some(edit) = self.edit.take() {
            if let Err(e) = self.tracker.update_text(edit.id, edit.field, &edit.buffer) {
                self.report(e);
            }
        }
        self.input_mode = InputMode::Normal;
        self.sync();
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
        self.input_mode = InputMode::Normal;
    }

    // ------------------------------------------------------------------
    // Command mode
    // ------------------------------------------------------------------

    pub fn enter_command_mode(&mut self) {
        self.input_mode = InputMode::Command;
        self.command_buffer.clear();
    }

    pub fn command_buffer(&self) -> &str {
        &self.command_buffer
    }

    pub fn command_type_char(&mut self, c: char) {
        self.command_buffer.push(c);
    }

    pub fn command_backspace(&mut self) {
        if self.command_buffer.pop().is_none() {
            self.input_mode = InputMode::Normal;
        }
    }

    /// Run the typed command and return to normal mode.
    pub fn execute_command(&mut self) {
        let line = std::mem::take(&mut self.command_buffer);
        self.input_mode = InputMode::Normal;

        let result = Command::parse(&line).and_then(|cmd| cmd.apply(&mut self.tracker));
        match result {
            Ok(outcome) => self.handle_outcome(outcome),
            Err(CommandError::Empty) => {}
            Err(e) => self.set_status(e.to_string()),
        }
        self.sync();
    }

    fn handle_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Added { name, .. } => self.set_status(format!("{name} joins the posse")),
            Outcome::Ignored => {}
            Outcome::Updated { name, field, value } => {
                self.set_status(format!("{name}: {field} = {value}"))
            }
            Outcome::Removed { name } => self.set_status(format!("{name} sent to the coffin")),
            Outcome::Turn { name, .. } => {
                if let Some(name) = name {
                    self.set_status(format!("{name}'s turn"));
                }
            }
            Outcome::Reset => self.set_status("New duel! Back to the top of the order"),
            Outcome::Listing(_) | Outcome::Summary(_) => {
                self.focused_panel = FocusedPanel::Summary;
            }
            Outcome::Copy(text) => self.copy_text(&text),
            Outcome::Help => self.overlay = Some(Overlay::Help),
            Outcome::Quit => self.should_quit = true,
        }
    }

    // ------------------------------------------------------------------
    // Focus, overlays, status
    // ------------------------------------------------------------------

    pub fn focus_form(&mut self) {
        self.focused_panel = FocusedPanel::Form;
        self.input_mode = InputMode::Form;
    }

    pub fn leave_form(&mut self) {
        self.focused_panel = FocusedPanel::Roster;
        self.input_mode = InputMode::Normal;
    }

    /// Toggle between roster and summary. The form is entered with `a`.
    pub fn cycle_focus(&mut self) {
        self.focused_panel = match self.focused_panel {
            FocusedPanel::Roster => FocusedPanel::Summary,
            FocusedPanel::Form | FocusedPanel::Summary => FocusedPanel::Roster,
        };
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn toggle_help(&mut self) {
        if matches!(self.overlay, Some(Overlay::Help)) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::Help);
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.notification = Some(Notification {
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    pub fn status_message(&self) -> Option<&str> {
        self.notification.as_ref().map(|n| n.text.as_str())
    }

    fn report(&mut self, error: TrackerError) {
        tracing::debug!(error = %error, "tracker rejected action");
        self.set_status(error.to_string());
    }

    /// Expire old notifications.
    pub fn tick(&mut self) {
        if let Some(notification) = &self.notification {
            if notification.shown_at.elapsed() >= self.notification_duration {
                self.notification = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use initiative_core::testing::{posse, RecordingStorage};
    use initiative_core::{MemoryStorage, STORAGE_KEY};

    fn app() -> App {
        let storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
        App::new(
            Tracker::open(storage, STORAGE_KEY),
            Box::new(MemoryClipboard::new()),
            Duration::from_secs(3),
        )
    }

    fn app_with_posse() -> App {
        let mut app = app();
        for draft in posse() {
            app.tracker.add(draft);
        }
        app.sync();
        app.selected = 0;
        app
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.form.type_char(c);
        }
    }

    #[test]
    fn test_form_submit_adds_and_clears() {
        let mut app = app();
        app.focus_form();
        type_str(&mut app, "Doc");
        app.form.focus_next();
        type_str(&mut app, "12");
        app.form.focus_next();
        type_str(&mut app, "5");
        app.form.focus_next();
        type_str(&mut app, "2");
        app.submit_form();

        assert_eq!(app.tracker.summary(), "1- Doc HP [5/5] Garra (2/2)");
        assert_eq!(app.form.value(FormField::Name), "");
        assert_eq!(app.form.focused, FormField::Name);
        assert_eq!(app.status_message(), Some("Doc joins the posse"));
    }

    #[test]
    fn test_form_blank_name_is_ignored() {
        let mut app = app();
        app.form.focus_next();
        type_str(&mut app, "9");
        app.submit_form();

        assert!(app.tracker.characters().is_empty());
        assert_eq!(app.form.value(FormField::Initiative), "9");
    }

    #[test]
    fn test_numeric_form_fields_reject_letters() {
        let mut app = app();
        app.form.focus_next();
        type_str(&mut app, "1x2");
        assert_eq!(app.form.value(FormField::Initiative), "12");
    }

    #[test]
    fn test_selection_follows_new_character() {
        let mut app = app_with_posse();
        app.tracker.add(CharacterDraft::new("Deputy").with_initiative(13));
        app.sync();
        // Billy 18, Jane 15, Deputy 13, Doc 12, Outlaw 4
        assert_eq!(app.selected, 2);
    }

    #[test]
    fn test_selection_follows_initiative_edit() {
        let mut app = app_with_posse();
        app.selected = 3;
        app.begin_edit(NumericField::Initiative);
        assert_eq!(app.pending_edit().unwrap().buffer, "4");

        app.edit_backspace();
        app.edit_type_char('2');
        app.edit_type_char('0');
        app.commit_edit();

        assert_eq!(app.selected, 0);
        assert_eq!(app.tracker.characters()[0].name, "Outlaw");
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_edit_is_not_clamped_but_buttons_are() {
        let mut app = app_with_posse();
        app.selected = 2; // Doc, HP 5/5
        app.begin_edit(NumericField::HpCurrent);
        app.edit_backspace();
        app.edit_type_char('9');
        app.commit_edit();
        assert_eq!(app.tracker.characters()[2].hp_current, 9);

        app.adjust_selected(Resource::Hp, Step::Increment);
        assert_eq!(app.tracker.characters()[2].hp_current, 5);
    }

    #[test]
    fn test_remove_clamps_selection() {
        let mut app = app_with_posse();
        app.selected = 3;
        app.remove_selected();
        assert_eq!(app.selected, 2);
        assert_eq!(app.tracker.characters().len(), 3);
    }

    #[test]
    fn test_copy_empty_roster_does_nothing() {
        let mut app = app();
        app.copy_summary();
        assert!(app.status_message().is_none());
    }

    #[test]
    fn test_command_mode() {
        let mut app = app_with_posse();
        app.enter_command_mode();
        for c in "next".chars() {
            app.command_type_char(c);
        }
        app.execute_command();

        assert_eq!(app.tracker.turn().index(), 1);
        assert_eq!(app.status_message(), Some("Calamity Jane's turn"));

        app.enter_command_mode();
        for c in "rm 9".chars() {
            app.command_type_char(c);
        }
        app.execute_command();
        assert_eq!(app.status_message(), Some("Nobody at position 9"));
    }

    #[test]
    fn test_save_failure_is_reported_once() {
        let mut storage = RecordingStorage::new();
        storage.set_failing(true);
        let storage: Box<dyn Storage> = Box::new(storage);
        let mut app = App::new(
            Tracker::open(storage, STORAGE_KEY),
            Box::new(MemoryClipboard::new()),
            Duration::from_secs(3),
        );

        app.tracker.add(CharacterDraft::new("Doc"));
        app.sync();
        assert_eq!(
            app.status_message(),
            Some("Not saved: Storage error: Storage unavailable: writes disabled")
        );

        app.next_turn();
        assert_eq!(app.status_message(), Some("Doc's turn"));
    }

    #[test]
    fn test_notification_expires() {
        let storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
        let mut app = App::new(
            Tracker::open(storage, STORAGE_KEY),
            Box::new(MemoryClipboard::new()),
            Duration::ZERO,
        );
        app.set_status("bang");
        app.tick();
        assert!(app.status_message().is_none());
    }
}
