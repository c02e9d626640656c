//! Page geometry: the measurements the scroll and reveal engines read.
//!
//! Everything here is expressed in pixels with the viewport top at `0.0`.
//! The hosting view converts its own units (terminal rows) before handing a
//! [`PageGeometry`] to the engine, so the engine's thresholds stay the same
//! no matter how the page is drawn.

/// Identifies an observable element on the page (a heading, a card, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// Viewport-relative vertical extent of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Read-only view of the page supplied by the host on every tick.
pub trait PageGeometry {
    /// Current vertical scroll offset of the document.
    fn scroll_y(&self) -> f64;

    /// Height of the visible viewport.
    fn viewport_height(&self) -> f64;

    /// Full height of the scrollable document.
    fn document_height(&self) -> f64;

    /// Top edge of the anchor `id`, relative to the viewport top.
    /// `None` when no such anchor exists in the document.
    fn anchor_top(&self, id: &str) -> Option<f64>;

    /// Viewport-relative bounds of an element, `None` when it is not attached.
    fn element_bounds(&self, element: ElementId) -> Option<Bounds>;

    /// Distance the document can actually scroll.  Zero or negative when the
    /// whole document fits in the viewport.
    fn scrollable_distance(&self) -> f64 {
        self.document_height() - self.viewport_height()
    }
}

/// Fraction of `bounds` that overlaps the viewport after its bottom edge is
/// pulled up by `bottom_inset` pixels.
///
/// A zero-height element counts as fully visible while its edge lies inside
/// the shrunk viewport.
pub fn intersection_ratio(bounds: Bounds, viewport_height: f64, bottom_inset: f64) -> f64 {
    let root_bottom = viewport_height - bottom_inset;
    if root_bottom <= 0.0 {
        return 0.0;
    }

    if bounds.height <= 0.0 {
        return if (0.0..=root_bottom).contains(&bounds.top) {
            1.0
        } else {
            0.0
        };
    }

    let visible_top = bounds.top.max(0.0);
    let visible_bottom = bounds.bottom().min(root_bottom);
    let overlap = (visible_bottom - visible_top).max(0.0);
    (overlap / bounds.height).clamp(0.0, 1.0)
}
