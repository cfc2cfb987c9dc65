//! Event handling for the tracker TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use initiative_core::{NumericField, Resource, Step};

use crate::app::{App, InputMode};

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    // Handle overlay keys first
    if app.has_overlay() {
        return handle_overlay_key(app, key);
    }

    let result = match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Form => handle_form_mode(app, key),
        InputMode::Edit => handle_edit_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
    };

    if app.should_quit {
        EventResult::Quit
    } else {
        result
    }
}

/// Handle keys in NORMAL mode
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        // Mode switching
        KeyCode::Char('a') => app.focus_form(),
        KeyCode::Char(':') => app.enter_command_mode(),

        // Help
        KeyCode::Char('?') | KeyCode::F(1) => app.toggle_help(),

        // Quit
        KeyCode::Char('q') => return EventResult::Quit,

        // Turn order
        KeyCode::Enter | KeyCode::Char('n') => app.next_turn(),
        KeyCode::Char('r') => app.new_duel(),

        // Selection
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Tab | KeyCode::BackTab => app.cycle_focus(),

        // Resources
        KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_selected(Resource::Hp, Step::Increment),
        KeyCode::Char('-') => app.adjust_selected(Resource::Hp, Step::Decrement),
        KeyCode::Char(']') => app.adjust_selected(Resource::Garra, Step::Increment),
        KeyCode::Char('[') => app.adjust_selected(Resource::Garra, Step::Decrement),

        // Direct edits
        KeyCode::Char('i') => app.begin_edit(NumericField::Initiative),
        KeyCode::Char('h') => app.begin_edit(NumericField::HpCurrent),
        KeyCode::Char('H') => app.begin_edit(NumericField::HpTotal),
        KeyCode::Char('g') => app.begin_edit(NumericField::GarraCurrent),
        KeyCode::Char('G') => app.begin_edit(NumericField::GarraTotal),

        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Char('y') => app.copy_summary(),

        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Handle keys while the add form is focused
fn handle_form_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => app.leave_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Char(c) => app.form.type_char(c),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Handle keys while editing a single field
fn handle_edit_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Backspace => app.edit_backspace(),
        KeyCode::Char(c) => app.edit_type_char(c),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Handle keys in COMMAND mode
fn handle_command_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Enter => app.execute_command(),
        KeyCode::Backspace => app.command_backspace(),
        KeyCode::Char(c) => app.command_type_char(c),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Handle keys when an overlay is shown
fn handle_overlay_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
            app.close_overlay();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}
