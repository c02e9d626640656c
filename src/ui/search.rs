//! Search overlay widget (query input, searching indicator, and results).

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::core::search::SearchSession;
use crate::ui::layout::centered_fixed;
use crate::ui::spinner::Spinner;
use crate::ui::theme::Theme;

const PLACEHOLDER: &str = "Search for skills, education, contact info...";

/// Rows above the result list inside the popup: input + rule.
const RESULTS_OFFSET: u16 = 2;
/// Each result takes a title row and a content row.
const ROWS_PER_RESULT: u16 = 2;

/// Where the overlay sits on screen.
pub fn overlay_area(area: Rect) -> Rect {
    let mut rect = centered_fixed(68, 16, area);
    // Pull it toward the top like a command palette.
    rect.y = area.y + (area.height.saturating_sub(rect.height) / 4);
    rect
}

fn inner_area(popup: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(popup)
}

/// Index of the result under `row`, for a popup placed at `popup`.
pub fn result_at(popup: Rect, results: usize, column: u16, row: u16) -> Option<usize> {
    let inner = inner_area(popup);
    if !inner.contains((column, row).into()) {
        return None;
    }
    let first = inner.y + RESULTS_OFFSET;
    if row < first {
        return None;
    }
    let idx = ((row - first) / ROWS_PER_RESULT) as usize;
    (idx < results).then_some(idx)
}

pub struct SearchOverlay<'a> {
    pub session: &'a SearchSession,
    pub theme: &'a Theme,
    pub tick: u64,
}

impl Widget for SearchOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = overlay_area(area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Search ")
            .title_style(self.theme.title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_style())
            .style(self.theme.popup_style());

        let inner = block.inner(popup);
        block.render(popup, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let dim = self.theme.dim_style();
        let query = self.session.query();
        let input = if query.is_empty() {
            Line::from(vec![
                Span::styled("/ ", self.theme.key_style()),
                Span::styled("█", self.theme.key_style()),
                Span::styled(PLACEHOLDER, dim),
            ])
        } else {
            Line::from(vec![
                Span::styled("/ ", self.theme.key_style()),
                Span::raw(query.to_string()),
                Span::styled("█", self.theme.key_style()),
            ])
        };
        Paragraph::new(input).render(Rect::new(inner.x, inner.y, inner.width, 1), buf);
        if inner.height > 1 {
            buf.set_stringn(
                inner.x,
                inner.y + 1,
                "─".repeat(inner.width as usize),
                inner.width as usize,
                self.theme.border_style(),
            );
        }
        if inner.height <= RESULTS_OFFSET {
            return;
        }
        let body = Rect::new(
            inner.x,
            inner.y + RESULTS_OFFSET,
            inner.width,
            inner.height - RESULTS_OFFSET,
        );

        if self.session.is_searching() {
            let middle = Rect::new(body.x, body.y + body.height / 2, body.width, 1);
            Spinner {
                label: "Searching...",
                tick: self.tick,
                style: dim,
            }
            .render(middle, buf);
            return;
        }

        if self.session.result_count() > 0 {
            let max = (body.height / ROWS_PER_RESULT) as usize;
            let mut lines = Vec::new();
            for (i, entry) in self.session.results().take(max).enumerate() {
                let selected = i == self.session.selected();
                let row_style = if selected {
                    self.theme.selected_style()
                } else {
                    Style::default()
                };
                let marker = if selected { "▸ " } else { "  " };
                lines.push(
                    Line::from(vec![
                        Span::raw(marker),
                        Span::styled("● ", Style::default().fg(Theme::section_color(entry.section))),
                        Span::styled(entry.title, Style::default().add_modifier(Modifier::BOLD)),
                    ])
                    .style(row_style),
                );
                lines.push(Line::from(Span::styled(format!("    {}", entry.content), dim)).style(row_style));
            }
            Paragraph::new(lines).render(body, buf);
            return;
        }

        let lines = if query.trim().is_empty() {
            vec![
                Line::raw(""),
                Line::from(Span::styled("Type to search for information about Rajan", dim)).centered(),
                Line::from(Span::styled(
                    "Try \"skills\", \"education\", or \"contact\"",
                    dim.add_modifier(Modifier::ITALIC),
                ))
                .centered(),
            ]
        } else {
            vec![
                Line::raw(""),
                Line::from(Span::styled(format!("No results found for \"{query}\""), dim)).centered(),
            ]
        };
        Paragraph::new(lines).render(body, buf);
    }
}
