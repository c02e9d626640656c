//! Input handling: maps key/mouse events to state mutations.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::config::Action;
use crate::ui::{header, page_widget, popup, search};

use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Page => handle_page_key(state, key, now),
        ActiveView::ContactForm => handle_form_key(state, key, now),
        ActiveView::Search => handle_search_key(state, key, now),
        ActiveView::Menu => handle_menu_key(state, key, now),
        ActiveView::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?' | 'q')) {
                state.active_view = ActiveView::Page;
            }
        }
    }
}

/// Pasted text goes wherever typing would.
pub fn handle_paste(state: &mut AppState, text: &str, now: Instant) {
    match state.active_view {
        ActiveView::Search => {
            for c in text.chars().filter(|c| !c.is_control()) {
                state.search.push_char(c, now);
            }
        }
        ActiveView::ContactForm => {
            let field = state.form_focus;
            let multiline = field.is_multiline();
            let pasted: String = text
                .chars()
                .filter(|&c| (c == '\n' && multiline) || !c.is_control())
                .collect();
            if pasted.is_empty() {
                return;
            }
            let value = format!("{}{pasted}", state.form.value(field));
            state.form.set(field, &value);
            state.relayout(now);
        }
        _ => {}
    }
}

/// Section index for the digit keys `1`..=`9`.
fn digit_section(key: KeyEvent) -> Option<usize> {
    match key.code {
        KeyCode::Char(c @ '1'..='9') if key.modifiers.is_empty() => {
            c.to_digit(10).map(|d| d as usize - 1)
        }
        _ => None,
    }
}

// ── Page view (configurable bindings) ───────────────────────────

fn handle_page_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    if let Some(index) = digit_section(key) {
        state.jump_to_section_index(index, now);
        return;
    }
    if key.code == KeyCode::Esc {
        state.status_message = None;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    let step = state.config.scroll_step as isize;
    let page = state.viewport_rows().saturating_sub(2).max(1);

    match action {
        Action::ScrollUp => state.scroll_by(-step, now),
        Action::ScrollDown => state.scroll_by(step, now),
        Action::PageUp => {
            let row = state.scroll.target().saturating_sub(page);
            state.glide_to(row, now);
        }
        Action::PageDown => {
            let row = state.scroll.target() + page;
            state.glide_to(row, now);
        }
        Action::PrevSection => state.prev_section(now),
        Action::NextSection => state.next_section(now),
        Action::Top => state.glide_to(0, now),
        Action::Bottom => {
            let max = state.max_scroll();
            state.glide_to(max, now);
        }
        Action::OpenSearch => state.open_search(),
        Action::OpenMenu => state.open_menu(),
        Action::EditContact => state.open_contact_form(now),
        Action::ToggleTheme => state.toggle_theme(),
        Action::OpenHelp => state.active_view = ActiveView::Help,
        Action::Quit => state.should_quit = true,
    }
}

// ── Contact form ────────────────────────────────────────────────

fn handle_form_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => state.close_contact_form(now),
        KeyCode::Tab | KeyCode::Down => state.focus_next_field(now),
        KeyCode::BackTab | KeyCode::Up => state.focus_prev_field(now),
        KeyCode::Char('s') if ctrl => state.submit_form(now),
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
            state.form_push_char('\n', now);
        }
        KeyCode::Enter => {
            if state.form_focus.is_multiline() {
                state.submit_form(now);
            } else {
                state.focus_next_field(now);
            }
        }
        KeyCode::Backspace => state.form_backspace(now),
        KeyCode::Char(c) if !ctrl => state.form_push_char(c, now),
        _ => {}
    }
}

// ── Search overlay ──────────────────────────────────────────────

fn handle_search_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => state.close_search(),
        KeyCode::Enter => state.activate_search_result(now),
        KeyCode::Down | KeyCode::Tab => state.search.select_next(),
        KeyCode::Char('n') if ctrl => state.search.select_next(),
        KeyCode::Up | KeyCode::BackTab => state.search.select_prev(),
        KeyCode::Char('p') if ctrl => state.search.select_prev(),
        KeyCode::Backspace => state.search.backspace(now),
        KeyCode::Char(c) if !ctrl => state.search.push_char(c, now),
        _ => {}
    }
}

// ── Section menu ────────────────────────────────────────────────

fn handle_menu_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    if let Some(index) = digit_section(key) {
        state.choose_menu_item(index, now);
        return;
    }
    let count = state.tracker.sections().len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('m' | 'q') => state.active_view = ActiveView::Page,
        KeyCode::Down | KeyCode::Char('j') => {
            if state.menu_selected + 1 < count {
                state.menu_selected += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.menu_selected = state.menu_selected.saturating_sub(1);
        }
        KeyCode::Enter => {
            let index = state.menu_selected;
            state.choose_menu_item(index, now);
        }
        _ => {}
    }
}

// ── Mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    match state.active_view {
        ActiveView::Search => handle_search_mouse(state, mouse, now),
        ActiveView::Menu => handle_menu_mouse(state, mouse, now),
        ActiveView::Help => {
            if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                state.active_view = ActiveView::Page;
            }
        }
        ActiveView::Page | ActiveView::ContactForm => handle_page_mouse(state, mouse, now),
    }
}

fn handle_page_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    let step = state.config.scroll_step as isize;
    match mouse.kind {
        MouseEventKind::ScrollDown => state.scroll_by(step, now),
        MouseEventKind::ScrollUp => state.scroll_by(-step, now),
        MouseEventKind::Down(MouseButton::Left) => {
            let screen = state.screen();
            let (col, row) = (mouse.column, mouse.row);

            if screen.is_compact() && point_in_rect(header::menu_button_area(screen.header_area), col, row) {
                state.open_menu();
                return;
            }
            if let Some(index) = header::link_at(screen.header_area, state.tracker.sections(), col, row) {
                state.jump_to_section_index(index, now);
                return;
            }
            if state.back_to_top.is_past()
                && point_in_rect(page_widget::back_to_top_area(screen.page_area), col, row)
            {
                state.glide_to(0, now);
            }
        }
        _ => {}
    }
}

fn handle_search_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let popup = search::overlay_area(state.area);
    if !point_in_rect(popup, mouse.column, mouse.row) {
        state.close_search();
        return;
    }
    if let Some(index) = search::result_at(popup, state.search.result_count(), mouse.column, mouse.row) {
        state.search.select(index);
        state.activate_search_result(now);
    }
}

fn handle_menu_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let count = state.tracker.sections().len();
    if let Some(index) = popup::menu_item_at(state.area, count, mouse.column, mouse.row) {
        state.choose_menu_item(index, now);
    } else if !point_in_rect(popup::menu_area(state.area, count), mouse.column, mouse.row) {
        state.active_view = ActiveView::Page;
    }
}

fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::KeyEventKind;

    use super::*;
    use crate::app::state::tests::state;
    use crate::core::contact::{Field, SubmitStatus};
    use crate::core::search::{DEBOUNCE, SEARCH_LATENCY};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(state: &mut AppState, text: &str, now: Instant) {
        for c in text.chars() {
            handle_key(state, press(KeyCode::Char(c)), now);
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn ctrl_c_quits_from_any_view() {
        let (mut state, now) = state();
        state.open_search();
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), now);
        assert!(state.should_quit);
    }

    #[test]
    fn digits_jump_to_sections() {
        let (mut state, now) = state();
        handle_key(&mut state, press(KeyCode::Char('4')), now);
        assert_eq!(state.tracker.active_section_id(), "about");
        handle_key(&mut state, press(KeyCode::Char('9')), now);
        assert_eq!(state.tracker.active_section_id(), "about");
    }

    #[test]
    fn search_flow_jumps_to_result() {
        let (mut state, now) = state();
        handle_key(&mut state, press(KeyCode::Char('/')), now);
        assert_eq!(state.active_view, ActiveView::Search);

        // Typing into the overlay never triggers page bindings.
        type_text(&mut state, "phone", now);
        assert_eq!(state.search.query(), "phone");
        assert_eq!(state.scroll.row(), 0);

        state.on_tick(now + DEBOUNCE);
        state.on_tick(now + DEBOUNCE + SEARCH_LATENCY);
        assert_eq!(state.search.result_count(), 1);

        handle_key(&mut state, press(KeyCode::Enter), now);
        assert_eq!(state.active_view, ActiveView::Page);
        assert!(!state.search.is_open());
        assert_eq!(state.tracker.active_section_id(), "contact");
    }

    #[test]
    fn escape_and_outside_click_close_search() {
        let (mut state, now) = state();
        state.open_search();
        handle_key(&mut state, press(KeyCode::Esc), now);
        assert_eq!(state.active_view, ActiveView::Page);

        state.open_search();
        handle_mouse(&mut state, click(0, 0), now);
        assert_eq!(state.active_view, ActiveView::Page);
        assert!(!state.search.is_open());
    }

    #[test]
    fn header_click_jumps() {
        let (mut state, now) = state();
        let header = state.screen().header_area;
        let links = header::nav_link_areas(header, state.tracker.sections());
        let (skills, _) = links[1];
        handle_mouse(&mut state, click(skills.x + 1, skills.y), now);
        assert_eq!(state.tracker.active_section_id(), "skills");
    }

    #[test]
    fn wheel_scrolls_by_step() {
        let (mut state, now) = state();
        let scroll = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 10,
            row: 10,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut state, scroll, now);
        assert_eq!(state.scroll.row(), state.config.scroll_step as usize);
    }

    #[test]
    fn back_to_top_button_scrolls_home() {
        let (mut state, now) = state();
        state.jump_to_section("about", now);
        assert!(state.back_to_top.is_past());
        let button = page_widget::back_to_top_area(state.screen().page_area);
        handle_mouse(&mut state, click(button.x, button.y), now);
        assert_eq!(state.scroll.row(), 0);
        assert_eq!(state.tracker.active_section_id(), "home");
    }

    #[test]
    fn contact_form_typing_and_submit() {
        let (mut state, now) = state();
        handle_key(&mut state, press(KeyCode::Char('c')), now);
        assert_eq!(state.active_view, ActiveView::ContactForm);
        assert_eq!(state.tracker.active_section_id(), "contact");

        // Page bindings are off while typing: `q` is just a letter.
        type_text(&mut state, "qa", now);
        assert!(!state.should_quit);
        assert_eq!(state.form.name, "qa");

        handle_key(&mut state, press(KeyCode::Enter), now);
        assert_eq!(state.form_focus, Field::Email);
        type_text(&mut state, "qa@example.com", now);
        handle_key(&mut state, press(KeyCode::Tab), now);
        type_text(&mut state, "Hi", now);
        handle_key(&mut state, press(KeyCode::Tab), now);
        handle_paste(&mut state, "Line one\r\nline two", now);
        assert_eq!(state.form.message, "Line one\nline two");

        handle_key(&mut state, press(KeyCode::Enter), now);
        assert_eq!(state.submit_status, SubmitStatus::Submitting);
        assert!(state.pending_submit.is_some());
    }

    #[test]
    fn paste_into_single_line_field_drops_newlines_and_clears_error() {
        let (mut state, now) = state();
        handle_key(&mut state, press(KeyCode::Char('c')), now);
        state.submit_form(now);
        assert!(state.form.error(Field::Name).is_some());

        handle_paste(&mut state, "Ada\nLovelace", now);
        assert_eq!(state.form.name, "AdaLovelace");
        assert!(state.form.error(Field::Name).is_none());

        // An empty paste leaves the other errors alone.
        handle_key(&mut state, press(KeyCode::Tab), now);
        handle_paste(&mut state, "\r\n", now);
        assert!(state.form.error(Field::Email).is_some());
    }

    #[test]
    fn menu_selects_section() {
        let (mut state, now) = state();
        handle_key(&mut state, press(KeyCode::Char('m')), now);
        assert_eq!(state.active_view, ActiveView::Menu);
        handle_key(&mut state, press(KeyCode::Down), now);
        handle_key(&mut state, press(KeyCode::Down), now);
        handle_key(&mut state, press(KeyCode::Enter), now);
        assert_eq!(state.active_view, ActiveView::Page);
        assert_eq!(state.tracker.active_section_id(), "education");
    }

    #[test]
    fn help_opens_and_closes() {
        let (mut state, now) = state();
        handle_key(
            &mut state,
            KeyEvent::new_with_kind(KeyCode::Char('?'), KeyModifiers::SHIFT, KeyEventKind::Press),
            now,
        );
        assert_eq!(state.active_view, ActiveView::Help);
        handle_key(&mut state, press(KeyCode::Esc), now + Duration::from_millis(10));
        assert_eq!(state.active_view, ActiveView::Page);
    }
}
