//! Input line widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::TrackerTheme;

/// Single-line input with a prompt and a block cursor at the end
pub struct InputWidget<'a> {
    content: &'a str,
    prompt: String,
    theme: &'a TrackerTheme,
    placeholder: &'a str,
    is_active: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(content: &'a str, theme: &'a TrackerTheme) -> Self {
        Self {
            content,
            prompt: "> ".to_string(),
            theme,
            placeholder: "Press : for commands, ? for help",
            is_active: false,
        }
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.is_active));

        let inner = block.inner(area);
        block.render(area, buf);

        let prompt_style = Style::default().fg(self.theme.title);

        let line = if !self.is_active {
            Line::from(vec![
                Span::styled(self.prompt, prompt_style),
                Span::styled(self.placeholder, self.theme.system_style()),
            ])
        } else {
            Line::from(vec![
                Span::styled(self.prompt, prompt_style),
                Span::raw(self.content),
                Span::styled(
                    " ",
                    Style::default().add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
                ),
            ])
        };

        Paragraph::new(line).render(inner, buf);
    }
}
