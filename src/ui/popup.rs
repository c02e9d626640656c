//! Popup overlay widgets for the controls list and the section menu.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::config::{Action, AppConfig};
use crate::core::scroll::SectionTable;
use crate::ui::layout::centered_fixed;
use crate::ui::theme::Theme;

fn popup_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .title_style(theme.title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style())
        .style(theme.popup_style())
}

// ───────────────────────────────────────── controls popup ────

/// Read-only list of every action and the keys bound to it.
pub struct HelpPopup<'a> {
    pub config: &'a AppConfig,
    pub theme: &'a Theme,
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // actions + jump row + blank + hint + blank + borders
        let height = (Action::ALL.len() as u16) + 6;
        let popup = centered_fixed(54, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Controls ", self.theme);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let label_style = self.theme.popup_style();
        let key_style = self.theme.key_style();
        let inner_width = inner.width as usize;

        let row = |label: &str, keys: String| {
            let label_col = format!("   {label:<22}");
            let keys_width = inner_width.saturating_sub(label_col.chars().count()).max(1);
            Line::from(vec![
                Span::styled(label_col, label_style),
                Span::styled(format!("{keys:>keys_width$}"), key_style),
            ])
        };

        let mut lines = vec![Line::raw("")];
        for &action in Action::ALL {
            lines.push(row(action.label(), self.config.display_bindings(action)));
        }
        lines.push(row("Jump to Section", "1-5".to_string()));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Mouse: wheel scrolls, click links  Esc: close",
            self.theme.dim_style(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── menu popup ────────

/// Section list used instead of header links on narrow terminals.
pub struct MenuPopup<'a> {
    pub sections: &'a SectionTable,
    pub active_id: &'a str,
    pub selected: usize,
    pub theme: &'a Theme,
}

/// Where the menu sits for `count` sections.
pub fn menu_area(area: Rect, count: usize) -> Rect {
    centered_fixed(30, count as u16 + 4, area)
}

/// Section index under a click, if any.
pub fn menu_item_at(area: Rect, count: usize, column: u16, row: u16) -> Option<usize> {
    let popup = menu_area(area, count);
    let inner = Block::default().borders(Borders::ALL).inner(popup);
    if !inner.contains((column, row).into()) || row == inner.y {
        return None;
    }
    let idx = (row - inner.y - 1) as usize;
    (idx < count).then_some(idx)
}

impl Widget for MenuPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = menu_area(area, self.sections.len());
        Clear.render(popup, buf);

        let block = popup_block(" Sections ", self.theme);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::raw("")];
        for (i, section) in self.sections.iter().enumerate() {
            let prefix = if i == self.selected { " ▸ " } else { "   " };
            let style = if i == self.selected {
                self.theme.selected_style()
            } else {
                self.theme.popup_style()
            };
            let marker = if section.id == self.active_id { " •" } else { "" };
            lines.push(Line::from(vec![
                Span::styled(format!("{prefix}{} {}", i + 1, section.title), style),
                Span::styled(marker, self.theme.key_style()),
            ]));
        }
        Paragraph::new(lines).render(inner, buf);
    }
}
