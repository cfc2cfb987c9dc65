//! Roster widget: the turn order with HP and garra meters

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

use initiative_core::{Character, Resource, TurnPointer};

use crate::ui::theme::TrackerTheme;

const METER_WIDTH: usize = 10;

/// Widget displaying initiative order, the turn marker and resources
pub struct RosterWidget<'a> {
    characters: &'a [Character],
    turn: TurnPointer,
    selected: usize,
    theme: &'a TrackerTheme,
    focused: bool,
}

impl<'a> RosterWidget<'a> {
    pub fn new(characters: &'a [Character], turn: TurnPointer, theme: &'a TrackerTheme) -> Self {
        Self {
            characters,
            turn,
            selected: 0,
            theme,
            focused: false,
        }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn meter_line(&self, character: &'a Character, resource: Resource) -> Line<'a> {
        let (current, total) = character.resource(resource);
        let ratio = character.ratio(resource);
        let color = match resource {
            Resource::Hp => self.theme.hp_color(ratio),
            Resource::Garra => self.theme.garra,
        };
        let label = match resource {
            Resource::Hp => "HP   ",
            Resource::Garra => "Garra",
        };

        Line::from(vec![
            Span::raw("       "),
            Span::styled(label, Style::default().add_modifier(Modifier::DIM)),
            Span::raw(" "),
            Span::styled(meter(ratio, METER_WIDTH), Style::default().fg(color)),
            Span::raw(format!(" {current}/{total}")),
        ])
    }
}

impl Widget for RosterWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Turn Order ({}) ", self.characters.len());
        let block = Block::default()
            .title(Span::styled(title, self.theme.title_style(self.focused)))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.characters.is_empty() {
            let hint = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  The saloon is empty.",
                    self.theme.system_style(),
                )),
                Line::from(Span::styled(
                    "  Press a to add a gunslinger.",
                    self.theme.system_style(),
                )),
            ];
            Paragraph::new(hint)
                .wrap(Wrap { trim: false })
                .render(inner, buf);
            return;
        }

        // Each character takes three lines; scroll so the selection stays visible
        let rows_visible = (inner.height as usize / 3).max(1);
        let skip = (self.selected + 1).saturating_sub(rows_visible);

        let items: Vec<ListItem> = self
            .characters
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(idx, character)| {
                let is_current = self.turn.is_current(idx);
                let is_selected = self.focused && idx == self.selected;
                let style = self.theme.initiative_style(is_current, is_selected);

                let indicator = if is_current { "> " } else { "  " };
                let header = Line::from(vec![
                    Span::styled(indicator, style),
                    Span::styled(format!("{:>2}. ", idx + 1), style),
                    Span::styled(format!("[{:>3}] ", character.initiative), style),
                    Span::styled(character.name.as_str(), style),
                ]);

                ListItem::new(vec![
                    header,
                    self.meter_line(character, Resource::Hp),
                    self.meter_line(character, Resource::Garra),
                ])
            })
            .collect();

        Widget::render(List::new(items), inner, buf);
    }
}

/// Text meter such as `██████░░░░`.
fn meter(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
