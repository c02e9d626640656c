//! Busy indicator: a braille spinner followed by a label.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()]
}

/// Renders `⠋ label` centred on the first row of `area`.
pub struct Spinner<'a> {
    pub label: &'a str,
    /// Monotonically increasing tick counter (drives the spinner frame).
    pub tick: u64,
    pub style: Style,
}

impl Widget for Spinner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let text = format!("{}  {}", frame(self.tick), self.label);
        let width = (text.chars().count() as u16).min(area.width);
        let x = area.x + (area.width - width) / 2;
        let line = Line::from(Span::styled(text, self.style));
        buf.set_line(x, area.y, &line, width);
    }
}
