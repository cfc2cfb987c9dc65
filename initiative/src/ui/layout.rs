//! Layout calculations for the tracker TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of the add form panel: four fields plus borders.
const FORM_HEIGHT: u16 = 6;

/// Calculate the main layout areas
pub struct AppLayout {
    pub title_area: Rect,
    pub roster_area: Rect,
    pub form_area: Rect,
    pub summary_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
    pub input_area: Rect,
}

impl AppLayout {
    /// Calculate layout based on terminal size
    pub fn calculate(area: Rect) -> Self {
        // Main vertical split
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Min(8),    // Main content
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Hotkey bar
                Constraint::Length(3), // Input area
            ])
            .split(area);

        // Content area: roster + sidebar
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(main_chunks[1]);

        // Sidebar: add form above the summary
        let sidebar_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(FORM_HEIGHT), Constraint::Min(3)])
            .split(content_chunks[1]);

        Self {
            title_area: main_chunks[0],
            roster_area: content_chunks[0],
            form_area: sidebar_chunks[0],
            summary_area: sidebar_chunks[1],
            status_bar: main_chunks[2],
            hotkey_bar: main_chunks[3],
            input_area: main_chunks[4],
        }
    }
}

/// Calculate fixed-size centered popup
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
