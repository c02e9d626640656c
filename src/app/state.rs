//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! Whenever the visible scroll row or the layout changes, [`AppState::sync`]
//! feeds the new geometry to the scroll bus and the intersection observer.

use std::time::Instant;

use ratatui::layout::Rect;

use crate::app::form_runtime::FormUpdate;
use crate::config::AppConfig;
use crate::core::contact::{ContactForm, Field, SubmitStatus};
use crate::core::content::SEARCH_INDEX;
use crate::core::observe::{IntersectionObserver, ScrollBus};
use crate::core::reveal::{Motion, RevealController, REVEAL_BOTTOM_INSET_PX};
use crate::core::scroll::{ScrollTracker, ScrollWatch, SectionTable};
use crate::core::search::{SearchPhase, SearchSession};
use crate::ui::layout::AppLayout;
use crate::ui::page::{FormView, PageLayout, PageView};
use crate::ui::smooth_scroll::SmoothScroll;
use crate::ui::theme::Theme;

/// Scroll offset past which the back-to-top button shows.
pub const BACK_TO_TOP_PX: f64 = 500.0;

const SMOOTH_SCROLL_SPEED: f64 = 0.35;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Page,
    /// Keystrokes go to the contact form.
    ContactForm,
    Search,
    Menu,
    Help,
}

/// Top-level application state.
pub struct AppState {
    /// User configuration (bindings, theme, page settings).
    pub config: AppConfig,
    pub theme: Theme,
    /// Set when `config` changed and should be written back to disk.
    pub config_dirty: bool,
    /// Animations for this run (the config value, unless overridden on the
    /// command line).
    pub animations: bool,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Monotonic tick counter (drives spinners).
    pub tick: u64,
    /// Year printed in the footer.
    pub year: i32,

    // ── page ───────────────────────────────────────────────────
    /// Full terminal area at the last resize.
    pub area: Rect,
    pub layout: PageLayout,
    pub scroll: SmoothScroll,
    bus: ScrollBus,
    observer: IntersectionObserver,
    pub tracker: ScrollTracker,
    pub back_to_top: ScrollWatch,
    /// One controller per layout region, indexed by element id.
    pub reveals: Vec<RevealController>,

    // ── overlays ───────────────────────────────────────────────
    pub search: SearchSession,
    pub menu_selected: usize,

    // ── contact form ───────────────────────────────────────────
    pub form: ContactForm,
    pub form_focus: Field,
    pub submit_status: SubmitStatus,
    /// Bumped on every submission; background updates carrying an older
    /// generation are ignored.
    pub submit_generation: u64,
    /// Submission waiting for the event loop to spawn it.
    pub pending_submit: Option<(u64, ContactForm)>,
}

impl AppState {
    pub fn new(config: AppConfig, sections: SectionTable, year: i32, area: Rect, now: Instant) -> Self {
        let form = ContactForm::default();
        let layout = PageLayout::build(
            area.width,
            FormView {
                form: &form,
                focus: None,
                status: SubmitStatus::Idle,
            },
            year,
        );
        let reveals = layout
            .regions()
            .iter()
            .map(|region| RevealController::new(region.options))
            .collect();

        let mut state = Self {
            theme: Theme::new(config.theme),
            animations: config.animations,
            config,
            config_dirty: false,
            should_quit: false,
            status_message: None,
            active_view: ActiveView::default(),
            tick: 0,
            year,
            area,
            layout,
            scroll: SmoothScroll::new(SMOOTH_SCROLL_SPEED),
            bus: ScrollBus::new(),
            observer: IntersectionObserver::new(REVEAL_BOTTOM_INSET_PX),
            tracker: ScrollTracker::new(sections),
            back_to_top: ScrollWatch::new(BACK_TO_TOP_PX),
            reveals: Vec::new(),
            search: SearchSession::new(SEARCH_INDEX),
            menu_selected: 0,
            form,
            form_focus: Field::Name,
            submit_status: SubmitStatus::Idle,
            submit_generation: 0,
            pending_submit: None,
        };

        state.reveals = reveals;
        state.tracker.mount(&state.bus);
        state.back_to_top.mount(&state.bus);
        for (controller, region) in state.reveals.iter_mut().zip(state.layout.regions()) {
            controller.mount(&state.observer, region.element);
        }
        state.sync(now);
        state
    }

    pub fn motion(&self) -> Motion {
        if self.animations {
            Motion::STANDARD
        } else {
            Motion::REDUCED
        }
    }

    pub fn screen(&self) -> AppLayout {
        AppLayout::from_area(self.area)
    }

    pub fn viewport_rows(&self) -> usize {
        self.screen().page_area.height as usize
    }

    pub fn max_scroll(&self) -> usize {
        self.layout.max_scroll(self.viewport_rows())
    }

    /// The page as the core engine sees it right now.
    pub fn view(&self) -> PageView<'_> {
        PageView::new(
            &self.layout,
            self.scroll.row(),
            self.viewport_rows(),
            self.config.px_per_row,
        )
    }

    /// Publish the current geometry: scroll listeners first, then the
    /// visibility observer.
    pub fn sync(&mut self, now: Instant) {
        let view = self.view();
        self.bus.emit(&view);
        self.observer.evaluate(&view, now);
        for controller in &mut self.reveals {
            controller.release_if_done();
        }
    }

    // ── layout ─────────────────────────────────────────────────

    pub fn resize(&mut self, area: Rect, now: Instant) {
        self.area = area;
        self.relayout(now);
    }

    /// Rebuild the page (width or form changed) and re-measure.
    pub fn relayout(&mut self, now: Instant) {
        let focus = (self.active_view == ActiveView::ContactForm).then_some(self.form_focus);
        self.layout = PageLayout::build(
            self.area.width,
            FormView {
                form: &self.form,
                focus,
                status: self.submit_status,
            },
            self.year,
        );
        let max = self.max_scroll();
        if self.scroll.row() > max {
            self.scroll.jump_to(max);
        } else if self.scroll.target() > max {
            self.scroll.glide_to(max);
        }
        self.sync(now);
    }

    // ── scrolling ──────────────────────────────────────────────

    pub fn scroll_by(&mut self, delta: isize, now: Instant) {
        let row = self.scroll.row().saturating_add_signed(delta).min(self.max_scroll());
        self.scroll.jump_to(row);
        self.sync(now);
    }

    /// Scroll to `row`, smoothly unless animations are off.
    pub fn glide_to(&mut self, row: usize, now: Instant) {
        let row = row.min(self.max_scroll());
        if self.animations {
            self.scroll.glide_to(row);
        } else {
            self.scroll.jump_to(row);
            self.sync(now);
        }
    }

    /// Bring a section's anchor to the top of the viewport.  Returns `false`
    /// for an unknown section.
    pub fn jump_to_section(&mut self, id: &str, now: Instant) -> bool {
        let Some(row) = self.layout.anchor_row(id) else {
            return false;
        };
        tracing::debug!(section = id, row, "jumping to section");
        self.glide_to(row, now);
        true
    }

    /// Like [`jump_to_section`](Self::jump_to_section) but without the glide.
    pub fn start_at_section(&mut self, id: &str, now: Instant) -> bool {
        let Some(row) = self.layout.anchor_row(id) else {
            return false;
        };
        let row = row.min(self.max_scroll());
        self.scroll.jump_to(row);
        self.sync(now);
        true
    }

    pub fn jump_to_section_index(&mut self, index: usize, now: Instant) -> bool {
        let Some(id) = self.tracker.sections().get(index).map(|s| s.id.clone()) else {
            return false;
        };
        self.jump_to_section(&id, now)
    }

    pub fn next_section(&mut self, now: Instant) {
        let active = self.tracker.active_section_id();
        let id = self.tracker.sections().next_after(&active).id.clone();
        self.jump_to_section(&id, now);
    }

    pub fn prev_section(&mut self, now: Instant) {
        let active = self.tracker.active_section_id();
        let id = self.tracker.sections().prev_before(&active).id.clone();
        self.jump_to_section(&id, now);
    }

    /// `true` while something on screen changes without input: a glide, a
    /// reveal, a pending search or a submission spinner.
    pub fn is_animating(&self, now: Instant) -> bool {
        let motion = self.motion();
        self.scroll.is_animating()
            || self.reveals.iter().any(|r| r.is_animating(now, motion))
            || self.search.phase() != SearchPhase::Idle
            || self.submit_status == SubmitStatus::Submitting
    }

    /// Detach every listener from the scroll bus and the observer.
    pub fn shutdown(&mut self) {
        self.tracker.unmount();
        self.back_to_top.unmount();
        for controller in &mut self.reveals {
            controller.unmount();
        }
    }

    /// Advance animations and timers by one frame.
    pub fn on_tick(&mut self, now: Instant) {
        self.tick = self.tick.wrapping_add(1);
        if self.scroll.tick() {
            self.sync(now);
        }
        self.search.tick(now);
    }

    // ── chrome ─────────────────────────────────────────────────

    pub fn toggle_theme(&mut self) {
        self.config.theme = self.config.theme.toggled();
        self.theme = Theme::new(self.config.theme);
        self.config_dirty = true;
        self.status_message = Some(format!("Theme: {}", self.config.theme.label()));
    }

    pub fn open_search(&mut self) {
        if !self.search.is_open() {
            self.search.toggle();
        }
        self.active_view = ActiveView::Search;
    }

    pub fn close_search(&mut self) {
        self.search.close();
        self.active_view = ActiveView::Page;
    }

    /// Jump to the section of the selected search result and close.
    pub fn activate_search_result(&mut self, now: Instant) {
        let Some(section) = self.search.selected_entry().map(|e| e.section) else {
            return;
        };
        self.close_search();
        self.jump_to_section(section, now);
    }

    pub fn open_menu(&mut self) {
        let active = self.tracker.active_section_id();
        self.menu_selected = self.tracker.sections().position(&active).unwrap_or(0);
        self.active_view = ActiveView::Menu;
    }

    /// Choosing a menu entry closes the menu.
    pub fn choose_menu_item(&mut self, index: usize, now: Instant) {
        self.active_view = ActiveView::Page;
        self.jump_to_section_index(index, now);
    }

    // ── contact form ───────────────────────────────────────────

    pub fn open_contact_form(&mut self, now: Instant) {
        self.active_view = ActiveView::ContactForm;
        self.relayout(now);
        self.jump_to_section("contact", now);
    }

    pub fn close_contact_form(&mut self, now: Instant) {
        self.active_view = ActiveView::Page;
        self.relayout(now);
    }

    pub fn form_push_char(&mut self, c: char, now: Instant) {
        if c == '\n' && !self.form_focus.is_multiline() {
            return;
        }
        self.form.push_char(self.form_focus, c);
        self.relayout(now);
    }

    pub fn form_backspace(&mut self, now: Instant) {
        self.form.backspace(self.form_focus);
        self.relayout(now);
    }

    pub fn focus_next_field(&mut self, now: Instant) {
        self.form_focus = cycle_field(self.form_focus, 1);
        self.relayout(now);
    }

    pub fn focus_prev_field(&mut self, now: Instant) {
        self.form_focus = cycle_field(self.form_focus, Field::ALL.len() - 1);
        self.relayout(now);
    }

    /// Validate and, if the form is clean, queue a submission.  Ignored
    /// while a submission is in flight.
    pub fn submit_form(&mut self, now: Instant) {
        if self.submit_status == SubmitStatus::Submitting {
            return;
        }
        if !self.form.validate() {
            self.relayout(now);
            return;
        }
        self.submit_generation = self.submit_generation.wrapping_add(1);
        self.submit_status = SubmitStatus::Submitting;
        self.pending_submit = Some((self.submit_generation, self.form.clone()));
        self.relayout(now);
    }

    /// Apply a background update.  Returns the generation whose status
    /// banner should now be scheduled to expire.
    pub fn apply_form_update(&mut self, update: FormUpdate, now: Instant) -> Option<u64> {
        match update {
            FormUpdate::Delivered { generation, result } => {
                if generation != self.submit_generation {
                    return None;
                }
                match result {
                    Ok(()) => {
                        self.submit_status = SubmitStatus::Success;
                        self.form.clear();
                        self.form_focus = Field::Name;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "contact form submission failed");
                        self.submit_status = SubmitStatus::Error;
                    }
                }
                self.relayout(now);
                Some(generation)
            }
            FormUpdate::StatusExpired { generation } => {
                if generation == self.submit_generation
                    && matches!(self.submit_status, SubmitStatus::Success | SubmitStatus::Error)
                {
                    self.submit_status = SubmitStatus::Idle;
                    self.relayout(now);
                }
                None
            }
        }
    }
}

fn cycle_field(field: Field, step: usize) -> Field {
    let idx = Field::ALL.iter().position(|&f| f == field).unwrap_or(0);
    Field::ALL[(idx + step) % Field::ALL.len()]
}

#[cfg(test)]
pub(crate) mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::content::NAV_LINKS;

    pub(crate) fn state_with(config: AppConfig) -> (AppState, Instant) {
        let now = Instant::now();
        let sections = SectionTable::from_links(NAV_LINKS).expect("valid links");
        let state = AppState::new(config, sections, 2026, Rect::new(0, 0, 100, 40), now);
        (state, now)
    }

    pub(crate) fn state() -> (AppState, Instant) {
        let mut config = AppConfig::default();
        config.animations = false;
        state_with(config)
    }

    fn fill_form(state: &mut AppState, now: Instant) {
        state.form.set(Field::Name, "Ada");
        state.form.set(Field::Email, "ada@example.com");
        state.form.set(Field::Subject, "Hello");
        state.form.set(Field::Message, "Let's build something.");
        state.relayout(now);
    }

    #[test]
    fn starts_at_home_with_hero_revealed() {
        let (state, _) = state();
        let nav = state.tracker.state();
        assert_eq!(nav.active_section_id, "home");
        assert_eq!(nav.scroll_progress_percent, 0.0);
        assert!(!nav.is_scrolled_past_threshold);
        assert!(state.reveals[0].has_become_visible());
        assert!(!state.back_to_top.is_past());
    }

    #[test]
    fn jumping_updates_navigation() {
        let (mut state, now) = state();
        assert!(state.jump_to_section("education", now));
        let nav = state.tracker.state();
        assert_eq!(nav.active_section_id, "education");
        assert!(nav.is_scrolled_past_threshold);
        assert!(nav.scroll_progress_percent > 0.0);
        assert!(state.back_to_top.is_past());
    }

    #[test]
    fn start_at_section_skips_the_glide() {
        let (mut state, now) = state_with(AppConfig::default());
        assert!(state.start_at_section("skills", now));
        assert_eq!(state.tracker.active_section_id(), "skills");
        assert!(!state.scroll.is_animating());
    }

    #[test]
    fn unknown_section_is_rejected() {
        let (mut state, now) = state();
        assert!(!state.jump_to_section("projects", now));
        assert_eq!(state.scroll.row(), 0);
    }

    #[test]
    fn scrolling_reveals_regions_permanently() {
        let (mut state, now) = state();
        let last = state.reveals.len() - 1;
        assert!(!state.reveals[last].has_become_visible());

        state.scroll_by(isize::MAX, now);
        assert_eq!(state.scroll.row(), state.max_scroll());
        assert!(state.reveals[last].has_become_visible());

        state.scroll_by(isize::MIN, now);
        assert_eq!(state.scroll.row(), 0);
        assert!(state.reveals[last].has_become_visible());
    }

    #[test]
    fn bottom_of_page_is_full_progress() {
        let (mut state, now) = state();
        state.scroll_by(isize::MAX, now);
        let progress = state.tracker.state().scroll_progress_percent;
        assert!((progress - 100.0).abs() < 1e-9);
    }

    #[test]
    fn smooth_jump_lands_after_ticks() {
        let (mut state, now) = state_with(AppConfig::default());
        state.jump_to_section("about", now);
        assert_eq!(state.tracker.active_section_id(), "home");
        for i in 0..200 {
            state.on_tick(now + Duration::from_millis(50 * i));
        }
        assert_eq!(state.tracker.active_section_id(), "about");
    }

    #[test]
    fn next_and_prev_follow_the_active_section() {
        let (mut state, now) = state();
        state.next_section(now);
        assert_eq!(state.tracker.active_section_id(), "skills");
        state.next_section(now);
        assert_eq!(state.tracker.active_section_id(), "education");
        state.prev_section(now);
        assert_eq!(state.tracker.active_section_id(), "skills");
    }

    #[test]
    fn invalid_form_is_not_submitted() {
        let (mut state, now) = state();
        state.submit_form(now);
        assert!(state.pending_submit.is_none());
        assert_eq!(state.submit_status, SubmitStatus::Idle);
        assert!(state.form.has_errors());
    }

    #[test]
    fn valid_form_goes_through_submit_cycle() {
        let (mut state, now) = state();
        fill_form(&mut state, now);
        state.submit_form(now);
        let (generation, sent) = state.pending_submit.take().expect("queued");
        assert_eq!(sent.name, "Ada");
        assert_eq!(state.submit_status, SubmitStatus::Submitting);

        // Re-submitting while in flight is ignored.
        state.submit_form(now);
        assert!(state.pending_submit.is_none());

        let reset = state.apply_form_update(
            FormUpdate::Delivered {
                generation,
                result: Ok(()),
            },
            now,
        );
        assert_eq!(reset, Some(generation));
        assert_eq!(state.submit_status, SubmitStatus::Success);
        assert_eq!(state.form, ContactForm::default());

        state.apply_form_update(FormUpdate::StatusExpired { generation }, now);
        assert_eq!(state.submit_status, SubmitStatus::Idle);
    }

    #[test]
    fn failed_delivery_shows_error_then_resets() {
        let (mut state, now) = state();
        fill_form(&mut state, now);
        state.submit_form(now);
        let (generation, _) = state.pending_submit.take().expect("queued");
        state.apply_form_update(
            FormUpdate::Delivered {
                generation,
                result: Err(anyhow::anyhow!("offline")),
            },
            now,
        );
        assert_eq!(state.submit_status, SubmitStatus::Error);
        assert_eq!(state.form.name, "Ada");
        state.apply_form_update(FormUpdate::StatusExpired { generation }, now);
        assert_eq!(state.submit_status, SubmitStatus::Idle);
    }

    #[test]
    fn stale_updates_are_ignored() {
        let (mut state, now) = state();
        fill_form(&mut state, now);
        state.submit_form(now);
        let (generation, _) = state.pending_submit.take().expect("queued");
        let stale = state.apply_form_update(
            FormUpdate::Delivered {
                generation: generation + 1,
                result: Ok(()),
            },
            now,
        );
        assert_eq!(stale, None);
        assert_eq!(state.submit_status, SubmitStatus::Submitting);
    }

    #[test]
    fn field_focus_cycles() {
        let (mut state, now) = state();
        state.open_contact_form(now);
        assert_eq!(state.form_focus, Field::Name);
        state.focus_prev_field(now);
        assert_eq!(state.form_focus, Field::Message);
        state.focus_next_field(now);
        assert_eq!(state.form_focus, Field::Name);
    }

    #[test]
    fn newline_only_goes_into_the_message() {
        let (mut state, now) = state();
        state.open_contact_form(now);
        state.form_push_char('\n', now);
        assert_eq!(state.form.name, "");
        state.form_focus = Field::Message;
        state.form_push_char('\n', now);
        assert_eq!(state.form.message, "\n");
    }

    #[test]
    fn resize_keeps_scroll_in_range() {
        let (mut state, now) = state();
        state.scroll_by(isize::MAX, now);
        state.resize(Rect::new(0, 0, 160, 60), now);
        assert!(state.scroll.row() <= state.max_scroll());
    }

    #[test]
    fn animating_until_opening_reveals_settle() {
        let (state, now) = state_with(AppConfig::default());
        assert!(state.is_animating(now));
        assert!(!state.is_animating(now + Duration::from_secs(5)));
    }

    #[test]
    fn pending_search_keeps_frames_coming() {
        let (mut state, now) = state();
        assert!(!state.is_animating(now));
        state.open_search();
        state.search.push_char('s', now);
        assert!(state.is_animating(now));
        state.close_search();
        assert!(!state.is_animating(now));
    }

    #[test]
    fn shutdown_detaches_every_listener() {
        let (mut state, now) = state();
        state.shutdown();
        state.scroll_by(10_000, now);
        assert_eq!(state.tracker.active_section_id(), "home");
        assert!(!state.back_to_top.is_past());
        assert!(state.reveals.last().is_some_and(|r| !r.has_become_visible()));
    }

    #[test]
    fn theme_toggle_marks_config_dirty() {
        let (mut state, _) = state();
        let before = state.config.theme;
        state.toggle_theme();
        assert_ne!(state.config.theme, before);
        assert!(state.config_dirty);
    }
}
