//! Color theme and styling for the tracker TUI

use ratatui::style::{Color, Modifier, Style};

/// Tracker UI color theme
#[derive(Debug, Clone)]
pub struct TrackerTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,
    pub title: Color,

    // HP colors
    pub hp_healthy: Color,
    pub hp_wounded: Color,
    pub hp_critical: Color,

    pub garra: Color,

    // Turn order
    pub current_turn: Color,
    pub selected_bg: Color,

    pub system_text: Color,
}

impl Default for TrackerTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Yellow,
            title: Color::LightYellow,

            hp_healthy: Color::Green,
            hp_wounded: Color::Yellow,
            hp_critical: Color::Red,

            garra: Color::LightMagenta,

            current_turn: Color::LightYellow,
            selected_bg: Color::Rgb(60, 40, 20),

            system_text: Color::DarkGray,
        }
    }
}

impl TrackerTheme {
    /// Get style for dimmed helper text
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    /// Get HP bar color based on ratio
    pub fn hp_color(&self, ratio: f64) -> Color {
        if ratio > 0.5 {
            self.hp_healthy
        } else if ratio > 0.25 {
            self.hp_wounded
        } else {
            self.hp_critical
        }
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Get title style
    pub fn title_style(&self, focused: bool) -> Style {
        let style = Style::default().fg(if focused {
            self.border_focused
        } else {
            self.foreground
        });

        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Get roster row style
    pub fn initiative_style(&self, is_current: bool, is_selected: bool) -> Style {
        let mut style = if is_current {
            Style::default()
                .fg(self.current_turn)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(self.foreground)
        };
        if is_selected {
            style = style.bg(self.selected_bg);
        }
        style
    }
}
