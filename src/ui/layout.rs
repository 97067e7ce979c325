//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Header on top, winner and history side by side, status bar at the bottom.
pub struct AppLayout {
    pub header_area: Rect,
    pub winner_area: Rect,
    pub history_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    pub fn from_area(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // root folder / pool summary
                Constraint::Min(3),    // panels
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(rows[1]);

        Self {
            header_area: rows[0],
            winner_area: panels[0],
            history_area: panels[1],
            status_area: rows[2],
        }
    }
}
