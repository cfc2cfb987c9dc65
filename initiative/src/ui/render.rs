//! Render orchestration for the tracker TUI

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use initiative_core::command::HELP;

use crate::app::{App, InputMode};
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::widgets::{
    AddFormWidget, HotkeyBarWidget, InputWidget, RosterWidget, StatusBarWidget, SummaryWidget,
};

/// Which panel is focused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    #[default]
    Roster,
    Form,
    Summary,
}

/// Overlay types
#[derive(Debug, Clone)]
pub enum Overlay {
    Help,
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = AppLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);

    let roster = RosterWidget::new(app.tracker.characters(), app.tracker.turn(), &app.theme)
        .selected(app.selected)
        .focused(matches!(app.focused_panel, FocusedPanel::Roster));
    frame.render_widget(roster, layout.roster_area);

    let form = AddFormWidget::new(&app.form, &app.theme)
        .focused(matches!(app.focused_panel, FocusedPanel::Form));
    frame.render_widget(form, layout.form_area);

    let summary = app.tracker.summary();
    let summary_widget = SummaryWidget::new(&summary, &app.theme)
        .focused(matches!(app.focused_panel, FocusedPanel::Summary));
    frame.render_widget(summary_widget, layout.summary_area);

    let status = StatusBarWidget::new(app.tracker.characters().len(), app.input_mode, &app.theme)
        .current(app.tracker.current().map(|c| c.name.as_str()))
        .message(app.status_message());
    frame.render_widget(status, layout.status_bar);

    frame.render_widget(HotkeyBarWidget::new(app.input_mode), layout.hotkey_bar);

    render_input(frame, app, layout.input_area);

    if let Some(overlay) = app.overlay() {
        render_overlay(frame, app, overlay, area);
    }
}

/// Render the title bar
fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        " WANTED: Initiative | Slot {} | {} ",
        app.tracker.turn().index() + 1,
        app.tracker.storage_key()
    );

    let line = Line::from(Span::styled(
        title,
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the input area
fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let widget = match app.input_mode {
        InputMode::Command => InputWidget::new(app.command_buffer(), &app.theme)
            .prompt(":")
            .active(true),
        InputMode::Edit => match app.pending_edit() {
            Some(edit) => {
                let name = app
                    .tracker
                    .roster()
                    .get(edit.id)
                    .map(|c| c.name.as_str())
                    .unwrap_or("?");
                InputWidget::new(&edit.buffer, &app.theme)
                    .prompt(format!("{name} {} = ", edit.field))
                    .active(true)
            }
            None => InputWidget::new("", &app.theme),
        },
        InputMode::Form => {
            InputWidget::new("", &app.theme).placeholder("Fill in the form, Enter to add")
        }
        InputMode::Normal => InputWidget::new("", &app.theme),
    };

    frame.render_widget(widget, area);
}

/// Render overlay
fn render_overlay(frame: &mut Frame, app: &App, overlay: &Overlay, area: Rect) {
    match overlay {
        Overlay::Help => render_help_overlay(frame, app, area),
    }
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(84, 38, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let heading = Style::default().add_modifier(Modifier::UNDERLINED);

    let mut help_text = vec![
        Line::from(Span::styled(
            " Initiative Tracker - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Turn order:", heading)),
        Line::from("  Enter/n        Next turn"),
        Line::from("  r              New duel (back to the top)"),
        Line::from("  j/k or ↑/↓     Select character"),
        Line::from("  Tab            Cycle panel focus"),
        Line::from(""),
        Line::from(Span::styled("Characters:", heading)),
        Line::from("  a              Add (Tab moves between fields)"),
        Line::from("  +/-            HP up/down"),
        Line::from("  ]/[            Garra up/down"),
        Line::from("  i              Edit initiative"),
        Line::from("  h/g            Edit current HP/garra"),
        Line::from("  H/G            Edit HP/garra total"),
        Line::from("  d/Del          Remove"),
        Line::from("  y              Copy summary"),
        Line::from(""),
        Line::from(Span::styled("Commands:", heading)),
    ];
    help_text.extend(
        HELP.iter()
            .map(|(usage, description)| Line::from(format!("  :{usage:<37} {description}"))),
    );
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        "Press Esc or q to close",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}
