//! Renders the visible slice of a [`PageLayout`], applying each region's
//! reveal animation.
//!
//! Opacity becomes a colour blend toward the background.  Pixel offsets
//! become whole-row (vertical) or whole-column (horizontal) shifts; a cell is
//! taken to be half as wide as it is tall.  Content sliding up is clipped at
//! the top of its own region so it never paints over its neighbours.

use std::time::Instant;

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::core::reveal::{Motion, RevealController, RevealVisual};
use crate::ui::page::{PageLayout, Row};
use crate::ui::theme::Theme;

const BACK_TO_TOP_LABEL: &str = " ↑ Top ";

pub struct PageWidget<'a> {
    pub layout: &'a PageLayout,
    pub scroll_row: usize,
    /// Indexed by element id.
    pub reveals: &'a [RevealController],
    pub now: Instant,
    pub motion: Motion,
    pub px_per_row: u16,
    pub theme: &'a Theme,
}

impl PageWidget<'_> {
    fn visual_for(&self, element: usize) -> RevealVisual {
        self.reveals
            .get(element)
            .map_or(RevealVisual::HIDDEN, |r| r.visual(self.now, self.motion))
    }
}

impl Widget for PageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.background());
        if area.width == 0 || area.height == 0 {
            return;
        }

        let px = f64::from(self.px_per_row.max(1));
        let left = area.x + area.width.saturating_sub(self.layout.width()) / 2;

        for y in 0..area.height {
            let doc_row = self.scroll_row + y as usize;
            if doc_row >= self.layout.len() {
                break;
            }

            let (source_row, shift_cols, opacity) = match self.layout.region_at(doc_row) {
                None => (doc_row, 0_i32, 1.0),
                Some(region) => {
                    let visual = self.visual_for(region.element.0);
                    if visual.opacity <= 0.0 {
                        continue;
                    }
                    let shift_rows = (visual.offset_y / px).round() as i64;
                    let shift_cols = (visual.offset_x / (px / 2.0)).round() as i32;
                    let source = doc_row as i64 - shift_rows;
                    if source < region.top as i64 || source >= (region.top + region.height) as i64 {
                        continue;
                    }
                    (source as usize, shift_cols, visual.opacity)
                }
            };

            if let Some(row) = self.layout.row(source_row) {
                draw_row(buf, area, left, area.y + y, row, shift_cols, opacity, self.theme);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_row(
    buf: &mut Buffer,
    area: Rect,
    left: u16,
    y: u16,
    row: &Row,
    shift_cols: i32,
    opacity: f64,
    theme: &Theme,
) {
    let mut x = i32::from(left) + i32::from(row.indent) + shift_cols;
    let right = i32::from(area.x + area.width);
    for piece in &row.pieces {
        let style = theme.fade(theme.tone(piece.tone), opacity);
        for ch in piece.text.chars() {
            if x >= right {
                return;
            }
            if x >= i32::from(area.x) {
                let cell = &mut buf[(x as u16, y)];
                cell.set_char(ch);
                cell.set_style(style);
            }
            x += 1;
        }
    }
}

/// Clickable area of the back-to-top button, bottom-right of the page.
pub fn back_to_top_area(page_area: Rect) -> Rect {
    let w = BACK_TO_TOP_LABEL.chars().count() as u16;
    Rect::new(
        (page_area.x + page_area.width).saturating_sub(w + 2),
        (page_area.y + page_area.height).saturating_sub(1),
        w.min(page_area.width),
        page_area.height.min(1),
    )
}

/// Shown once the page has scrolled far enough.
pub struct BackToTop<'a> {
    pub theme: &'a Theme,
}

impl Widget for BackToTop<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let button = back_to_top_area(area);
        if button.width == 0 || button.height == 0 {
            return;
        }
        buf.set_stringn(
            button.x,
            button.y,
            BACK_TO_TOP_LABEL,
            button.width as usize,
            self.theme.tone(crate::ui::theme::Tone::Button),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::ThemeMode;
    use crate::core::contact::{ContactForm, SubmitStatus};
    use crate::core::observe::IntersectionObserver;
    use crate::core::reveal::REVEAL_BOTTOM_INSET_PX;
    use crate::ui::page::{FormView, PageView};

    fn layout() -> PageLayout {
        let form = ContactForm::default();
        PageLayout::build(
            80,
            FormView {
                form: &form,
                focus: None,
                status: SubmitStatus::Idle,
            },
            2026,
        )
    }

    fn screen_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.y..area.y + area.height)
            .map(|y| {
                (area.x..area.x + area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn controllers(layout: &PageLayout) -> Vec<RevealController> {
        layout
            .regions()
            .iter()
            .map(|r| RevealController::new(r.options))
            .collect()
    }

    #[test]
    fn hidden_regions_render_blank() {
        let layout = layout();
        let reveals = controllers(&layout);
        let theme = Theme::new(ThemeMode::Light);
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        PageWidget {
            layout: &layout,
            scroll_row: 0,
            reveals: &reveals,
            now: Instant::now(),
            motion: Motion::STANDARD,
            px_per_row: 16,
            theme: &theme,
        }
        .render(area, &mut buf);
        assert!(!screen_text(&buf).contains("Rajan Prakash Chand"));
    }

    #[test]
    fn revealed_regions_render_once_settled() {
        let layout = layout();
        let mut reveals = controllers(&layout);
        let observer = IntersectionObserver::new(REVEAL_BOTTOM_INSET_PX);
        for (r, region) in reveals.iter_mut().zip(layout.regions()) {
            r.mount(&observer, region.element);
        }
        let t0 = Instant::now();
        observer.evaluate(&PageView::new(&layout, 0, 20, 16), t0);

        let theme = Theme::new(ThemeMode::Light);
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        PageWidget {
            layout: &layout,
            scroll_row: 0,
            reveals: &reveals,
            now: t0 + Duration::from_secs(2),
            motion: Motion::STANDARD,
            px_per_row: 16,
            theme: &theme,
        }
        .render(area, &mut buf);
        assert!(screen_text(&buf).contains("Rajan Prakash Chand"));
    }

    #[test]
    fn back_to_top_sits_in_the_corner() {
        let page = Rect::new(0, 2, 80, 30);
        let button = back_to_top_area(page);
        assert_eq!(button.y, 31);
        assert!(button.right() <= page.right());
    }
}
