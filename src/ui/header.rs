//! Fixed header: brand, section links with the active one highlighted, and
//! the scroll progress bar underneath.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::scroll::{NavigationState, SectionTable};
use crate::ui::layout::COMPACT_WIDTH;
use crate::ui::theme::Theme;

const MENU_LABEL: &str = " ≡ Menu ";

pub struct Header<'a> {
    pub brand: &'a str,
    pub sections: &'a SectionTable,
    pub nav: &'a NavigationState,
    pub theme: &'a Theme,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let bar_style = self.theme.header_style(self.nav.is_scrolled_past_threshold);
        buf.set_style(Rect::new(area.x, area.y, area.width, 1), bar_style);

        let brand = Line::from(vec![
            Span::styled(self.brand, self.theme.brand_style()),
            Span::styled(".", self.theme.key_style()),
        ]);
        buf.set_line(area.x + 2, area.y, &brand, area.width.saturating_sub(2));

        if area.width < COMPACT_WIDTH {
            let button = menu_button_area(area);
            buf.set_stringn(
                button.x,
                button.y,
                MENU_LABEL,
                button.width as usize,
                self.theme.nav_link_style(false).patch(bar_style),
            );
        } else {
            for (rect, idx) in nav_link_areas(area, self.sections) {
                let Some(section) = self.sections.get(idx) else {
                    continue;
                };
                let active = section.id == self.nav.active_section_id;
                let style = bar_style.patch(self.theme.nav_link_style(active));
                let label = format!("{} {}", idx + 1, section.title);
                buf.set_stringn(rect.x + 1, rect.y, label, rect.width as usize - 1, style);
            }
        }

        if area.height > 1 {
            let y = area.y + 1;
            let filled = progress_cells(self.nav.scroll_progress_percent, area.width);
            buf.set_style(Rect::new(area.x, y, area.width, 1), self.theme.background());
            if filled > 0 {
                buf.set_stringn(
                    area.x,
                    y,
                    "━".repeat(filled as usize),
                    filled as usize,
                    self.theme.key_style(),
                );
            }
        }
    }
}

/// Cells of the progress bar to fill.  Progress outside 0..=100 is clamped.
pub fn progress_cells(percent: f64, width: u16) -> u16 {
    if !percent.is_finite() {
        return 0;
    }
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    (ratio * f64::from(width)).round() as u16
}

/// Clickable area of each section link, right-aligned in the header row.
pub fn nav_link_areas(area: Rect, sections: &SectionTable) -> Vec<(Rect, usize)> {
    let widths: Vec<u16> = sections
        .iter()
        .enumerate()
        .map(|(i, s)| (format!("{} {}", i + 1, s.title).chars().count() + 2) as u16)
        .collect();
    let total: u16 = widths.iter().sum();
    let mut x = (area.x + area.width).saturating_sub(total + 1);
    widths
        .into_iter()
        .enumerate()
        .map(|(i, w)| {
            let rect = Rect::new(x, area.y, w, 1);
            x += w;
            (rect, i)
        })
        .collect()
}

/// Clickable area of the menu button shown on narrow terminals.
pub fn menu_button_area(area: Rect) -> Rect {
    let w = MENU_LABEL.chars().count() as u16;
    Rect::new((area.x + area.width).saturating_sub(w + 1), area.y, w, 1)
}

/// Section link under the cell at `(column, row)`, if any.
pub fn link_at(area: Rect, sections: &SectionTable, column: u16, row: u16) -> Option<usize> {
    if area.width < COMPACT_WIDTH {
        return None;
    }
    nav_link_areas(area, sections)
        .into_iter()
        .find(|(rect, _)| rect.contains((column, row).into()))
        .map(|(_, idx)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeMode;
    use crate::core::content::NAV_LINKS;

    fn table() -> SectionTable {
        SectionTable::from_links(NAV_LINKS).expect("valid links")
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn progress_is_clamped_to_the_bar() {
        assert_eq!(progress_cells(0.0, 80), 0);
        assert_eq!(progress_cells(50.0, 80), 40);
        assert_eq!(progress_cells(100.0, 80), 80);
        assert_eq!(progress_cells(140.0, 80), 80);
        assert_eq!(progress_cells(-3.0, 80), 0);
        assert_eq!(progress_cells(f64::NAN, 80), 0);
    }

    #[test]
    fn links_are_hit_where_they_are_drawn() {
        let area = Rect::new(0, 0, 100, 2);
        let sections = table();
        let areas = nav_link_areas(area, &sections);
        assert_eq!(areas.len(), 5);
        assert!(areas.windows(2).all(|w| w[0].0.right() == w[1].0.x));
        assert!(areas[4].0.right() <= area.right());

        let (contact, _) = areas[4];
        assert_eq!(link_at(area, &sections, contact.x + 1, 0), Some(4));
        assert_eq!(link_at(area, &sections, 0, 0), None);
        assert_eq!(link_at(area, &sections, contact.x + 1, 1), None);
    }

    #[test]
    fn narrow_header_has_no_links() {
        let area = Rect::new(0, 0, 50, 2);
        assert_eq!(link_at(area, &table(), 45, 0), None);
        assert!(menu_button_area(area).right() <= area.right());
    }

    #[test]
    fn renders_links_and_progress() {
        let sections = table();
        let mut nav = NavigationState::initial(&sections);
        nav.scroll_progress_percent = 50.0;
        let theme = Theme::new(ThemeMode::Dark);
        let area = Rect::new(0, 0, 100, 2);
        let mut buf = Buffer::empty(area);
        Header {
            brand: "Rajan",
            sections: &sections,
            nav: &nav,
            theme: &theme,
        }
        .render(area, &mut buf);

        let top = row_text(&buf, 0);
        assert!(top.contains("Rajan."));
        assert!(top.contains("1 Home"));
        assert!(top.contains("5 Contact"));
        assert_eq!(row_text(&buf, 1).matches('━').count(), 50);
    }
}
