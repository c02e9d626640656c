//! Scroll-derived navigation state: progress bar, header chrome, and the
//! active-section highlight.
//!
//! [`ScrollTracker`] owns one subscription on the page's [`ScrollBus`] and
//! recomputes a [`NavigationState`] on every tick.  The tracker is the only
//! writer; the view reads snapshots through [`ScrollTracker::state`].

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use thiserror::Error;

use super::geometry::PageGeometry;
use super::observe::{ScrollBus, Subscription};

/// Header chrome switches to its opaque style past this offset.
pub const SCROLLED_THRESHOLD_PX: f64 = 10.0;

/// A section becomes active once its anchor is within this distance of the
/// viewport top.
pub const SECTION_ACTIVATION_OFFSET_PX: f64 = 100.0;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("navigation needs at least one section")]
    NoSections,
    #[error("section `{0}` is declared more than once")]
    DuplicateSection(String),
    #[error("section href `{0}` does not point at an anchor")]
    InvalidHref(String),
}

// ───────────────────────────────────────── sections ──────────

/// One navigation entry: `href` is an in-page anchor such as `#skills`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub href: String,
    pub title: String,
}

impl Section {
    /// Build a section from its link, deriving the anchor id from `href`.
    pub fn from_link(title: &str, href: &str) -> Result<Self, NavigationError> {
        let id = href
            .strip_prefix('#')
            .filter(|id| !id.is_empty())
            .ok_or_else(|| NavigationError::InvalidHref(href.to_string()))?;
        Ok(Self {
            id: id.to_string(),
            href: href.to_string(),
            title: title.to_string(),
        })
    }
}

/// Ordered, non-empty list of sections with unique ids (document order).
#[derive(Debug, Clone)]
pub struct SectionTable {
    sections: Vec<Section>,
}

impl SectionTable {
    pub fn new(sections: Vec<Section>) -> Result<Self, NavigationError> {
        if sections.is_empty() {
            return Err(NavigationError::NoSections);
        }
        let mut seen = HashSet::new();
        for section in &sections {
            if !seen.insert(section.id.as_str()) {
                return Err(NavigationError::DuplicateSection(section.id.clone()));
            }
        }
        Ok(Self { sections })
    }

    /// Parse `(title, href)` pairs as they appear in the navigation config.
    pub fn from_links(links: &[(&str, &str)]) -> Result<Self, NavigationError> {
        let sections = links
            .iter()
            .map(|(title, href)| Section::from_link(title, href))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(sections)
    }

    pub fn first(&self) -> &Section {
        &self.sections[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Section after `id` in document order, saturating at the last one.
    pub fn next_after(&self, id: &str) -> &Section {
        let idx = self.position(id).map_or(0, |i| (i + 1).min(self.len() - 1));
        &self.sections[idx]
    }

    /// Section before `id` in document order, saturating at the first one.
    pub fn prev_before(&self, id: &str) -> &Section {
        let idx = self.position(id).map_or(0, |i| i.saturating_sub(1));
        &self.sections[idx]
    }
}

// ───────────────────────────────────────── derivations ───────

/// Percentage of the scrollable distance consumed by `scroll_y`.
/// Zero when the document cannot scroll.
pub fn scroll_progress_percent(scroll_y: f64, scrollable_distance: f64) -> f64 {
    if scrollable_distance <= 0.0 || !scrollable_distance.is_finite() {
        return 0.0;
    }
    scroll_y / scrollable_distance * 100.0
}

pub fn is_scrolled_past_threshold(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_THRESHOLD_PX
}

/// Scan the table from the bottom of the page up and return the first
/// section whose anchor top is within [`SECTION_ACTIVATION_OFFSET_PX`] of the
/// viewport top.  In document order that is the *last* qualifying section.
/// Sections whose anchor is missing never qualify.
pub fn resolve_active_section<'a>(
    table: &'a SectionTable,
    geometry: &dyn PageGeometry,
) -> Option<&'a Section> {
    table.iter().rev().find(|section| {
        geometry
            .anchor_top(&section.id)
            .is_some_and(|top| top <= SECTION_ACTIVATION_OFFSET_PX)
    })
}

// ───────────────────────────────────────── state ─────────────

/// Scroll-relative UI state exposed to the view layer.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    pub scroll_progress_percent: f64,
    pub is_scrolled_past_threshold: bool,
    pub active_section_id: String,
}

impl NavigationState {
    pub fn initial(table: &SectionTable) -> Self {
        Self {
            scroll_progress_percent: 0.0,
            is_scrolled_past_threshold: false,
            active_section_id: table.first().id.clone(),
        }
    }

    /// Recompute all three values from one geometry sample.  Returns `true`
    /// when the active section changed.
    pub fn apply(&mut self, table: &SectionTable, geometry: &dyn PageGeometry) -> bool {
        let scroll_y = geometry.scroll_y();
        self.scroll_progress_percent =
            scroll_progress_percent(scroll_y, geometry.scrollable_distance());
        self.is_scrolled_past_threshold = is_scrolled_past_threshold(scroll_y);

        match resolve_active_section(table, geometry) {
            Some(section) if section.id != self.active_section_id => {
                self.active_section_id = section.id.clone();
                true
            }
            // No match keeps whatever was active before.
            _ => false,
        }
    }
}

// ───────────────────────────────────────── tracker ───────────

/// Keeps a [`NavigationState`] in sync with the page's scroll stream.
#[derive(Debug)]
pub struct ScrollTracker {
    sections: Rc<SectionTable>,
    state: Rc<RefCell<NavigationState>>,
    /// Present while mounted.
    subscription: Option<Subscription>,
}

impl ScrollTracker {
    pub fn new(sections: SectionTable) -> Self {
        let state = NavigationState::initial(&sections);
        Self {
            sections: Rc::new(sections),
            state: Rc::new(RefCell::new(state)),
            subscription: None,
        }
    }

    /// Subscribe to `bus`.  Mounting twice keeps the first subscription.
    pub fn mount(&mut self, bus: &ScrollBus) {
        if self.subscription.is_some() {
            return;
        }
        let sections = Rc::clone(&self.sections);
        let state = Rc::clone(&self.state);
        self.subscription = Some(bus.subscribe(move |geometry| {
            let Ok(mut state) = state.try_borrow_mut() else {
                return;
            };
            if state.apply(&sections, geometry) {
                tracing::debug!(section = %state.active_section_id, "active section changed");
            }
        }));
    }

    /// Release the subscription.  State stays frozen at its last value.
    pub fn unmount(&mut self) {
        self.subscription = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.as_ref().is_some_and(Subscription::is_active)
    }

    pub fn state(&self) -> NavigationState {
        self.state.borrow().clone()
    }

    pub fn active_section_id(&self) -> String {
        self.state.borrow().active_section_id.clone()
    }

    pub fn sections(&self) -> &SectionTable {
        &self.sections
    }
}

/// Boolean "scrolled past `threshold` px" flag with its own subscription,
/// used for chrome that only cares about one offset (e.g. back-to-top).
#[derive(Debug)]
pub struct ScrollWatch {
    threshold: f64,
    past: Rc<Cell<bool>>,
    subscription: Option<Subscription>,
}

impl ScrollWatch {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            past: Rc::new(Cell::new(false)),
            subscription: None,
        }
    }

    pub fn mount(&mut self, bus: &ScrollBus) {
        if self.subscription.is_some() {
            return;
        }
        let threshold = self.threshold;
        let past = Rc::clone(&self.past);
        self.subscription = Some(bus.subscribe(move |geometry| {
            past.set(geometry.scroll_y() > threshold);
        }));
    }

    pub fn unmount(&mut self) {
        self.subscription = None;
    }

    pub fn is_past(&self) -> bool {
        self.past.get()
    }
}
