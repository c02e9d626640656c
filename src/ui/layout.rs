//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Header: one row of brand and links, one row of scroll progress.
pub const HEADER_HEIGHT: u16 = 2;

/// Below this width the header links collapse into a menu.
pub const COMPACT_WIDTH: u16 = 72;

/// Primary screen layout: fixed header, scrolling page, bottom status bar.
pub struct AppLayout {
    pub header_area: Rect,
    pub page_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(1),    // page (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            header_area: chunks[0],
            page_area: chunks[1],
            status_area: chunks[2],
        }
    }

    pub fn is_compact(&self) -> bool {
        self.header_area.width < COMPACT_WIDTH
    }
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
