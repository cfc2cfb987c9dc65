//! Add-character form widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::app::{AddForm, FormField};
use crate::ui::theme::TrackerTheme;

pub struct AddFormWidget<'a> {
    form: &'a AddForm,
    theme: &'a TrackerTheme,
    focused: bool,
}

impl<'a> AddFormWidget<'a> {
    pub fn new(form: &'a AddForm, theme: &'a TrackerTheme) -> Self {
        Self {
            form,
            theme,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for AddFormWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(
                " New Gunslinger ",
                self.theme.title_style(self.focused),
            ))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = FormField::ALL
            .iter()
            .map(|&field| {
                let active = self.focused && self.form.focused == field;
                let value = self.form.value(field);
                let label_style = if active {
                    Style::default()
                        .fg(self.theme.border_focused)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                };

                let mut spans = vec![Span::styled(format!("{:<12}", field.label()), label_style)];
                if value.is_empty() && !active {
                    spans.push(Span::styled(field.placeholder(), self.theme.system_style()));
                } else {
                    spans.push(Span::raw(value));
                }
                if active {
                    spans.push(Span::styled(
                        " ",
                        Style::default().add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
                    ));
                }
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
