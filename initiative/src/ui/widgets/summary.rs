//! Summary panel widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::ui::theme::TrackerTheme;

/// Shows the text that `y` copies.
pub struct SummaryWidget<'a> {
    summary: &'a str,
    theme: &'a TrackerTheme,
    focused: bool,
}

impl<'a> SummaryWidget<'a> {
    pub fn new(summary: &'a str, theme: &'a TrackerTheme) -> Self {
        Self {
            summary,
            theme,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for SummaryWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(" Summary ", self.theme.title_style(self.focused)))
            .title_bottom(Line::from(Span::styled(" y: copy ", self.theme.system_style())))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));

        let text: Vec<Line> = if self.summary.is_empty() {
            vec![Line::from(Span::styled(
                "Nothing to report yet.",
                self.theme.system_style(),
            ))]
        } else {
            self.summary.lines().map(Line::from).collect()
        };

        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
