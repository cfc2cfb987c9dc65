//! Status bar widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::InputMode;
use crate::ui::theme::TrackerTheme;

/// Status bar showing mode, roster size and the latest notification
pub struct StatusBarWidget<'a> {
    character_count: usize,
    current: Option<&'a str>,
    input_mode: InputMode,
    theme: &'a TrackerTheme,
    message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(character_count: usize, input_mode: InputMode, theme: &'a TrackerTheme) -> Self {
        Self {
            character_count,
            current: None,
            input_mode,
            theme,
            message: None,
        }
    }

    pub fn current(mut self, name: Option<&'a str>) -> Self {
        self.current = name;
        self
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Input mode indicator (vim-style)
        let (input_mode_text, input_mode_style) = match self.input_mode {
            InputMode::Normal => (
                "NORMAL",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            InputMode::Form => (
                "ADD",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            InputMode::Edit => (
                "EDIT",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            InputMode::Command => (
                "COMMAND",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        };

        let count = match self.character_count {
            1 => "1 character".to_string(),
            n => format!("{n} characters"),
        };

        let mut spans = vec![
            Span::styled(format!("-- {input_mode_text} --"), input_mode_style),
            Span::raw(" | "),
            Span::raw(count),
        ];

        if let Some(name) = self.current {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("Turn: {name}"),
                Style::default().fg(self.theme.current_turn),
            ));
        }

        if let Some(msg) = self.message {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(msg, Style::default().add_modifier(Modifier::DIM)));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Hotkey bar widget
pub struct HotkeyBarWidget {
    input_mode: InputMode,
}

impl HotkeyBarWidget {
    pub fn new(input_mode: InputMode) -> Self {
        Self { input_mode }
    }
}

impl Widget for HotkeyBarWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hotkeys = match self.input_mode {
            InputMode::Normal => vec![
                ("Enter:next", true),
                ("a:add", true),
                ("+/-:hp", true),
                ("]/[:garra", true),
                ("i/h/g:edit", true),
                ("d:remove", true),
                ("r:new duel", true),
                ("y:copy", true),
                ("::command", false),
                ("?:help", false),
            ],
            InputMode::Form => vec![
                ("Esc:done", true),
                ("Enter:add", true),
                ("Tab:next field", true),
                ("S-Tab:prev field", false),
            ],
            InputMode::Edit => vec![("Esc:cancel", true), ("Enter:save", true)],
            InputMode::Command => vec![
                ("Esc:cancel", true),
                ("Enter:execute", true),
                (":add NAME init=N", false),
                (":set 1 hp 7", false),
                (":help", false),
            ],
        };

        let spans: Vec<Span> = hotkeys
            .iter()
            .flat_map(|(text, primary)| {
                let style = if *primary {
                    Style::default()
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                };
                vec![Span::styled(*text, style), Span::raw("  ")]
            })
            .collect();

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
