//! Keyword search over the portfolio's fixed index.
//!
//! Matching is a case-insensitive substring test against an entry's title or
//! content.  [`SearchSession`] adds the overlay's timing: input is debounced,
//! then a short "searching" phase runs before results land.

use std::time::{Duration, Instant};

/// Quiet period after the last keystroke before a search starts.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// How long the "searching" indicator is shown before results appear.
pub const SEARCH_LATENCY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    pub title: &'static str,
    pub content: &'static str,
    /// Section anchor the entry links to (`skills`, `contact`, ...).
    pub section: &'static str,
}

/// Entries whose title or content contains `query`, ignoring case.  An
/// all-whitespace query matches nothing.
pub fn search_entries<'a>(entries: &'a [SearchEntry], query: &str) -> Vec<&'a SearchEntry> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|e| {
            e.title.to_lowercase().contains(&needle) || e.content.to_lowercase().contains(&needle)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    /// Waiting for typing to pause.
    Debouncing { until: Instant },
    /// Search running; results land at `until`.
    Searching { until: Instant },
}

/// State of the search overlay.
#[derive(Debug, Clone)]
pub struct SearchSession {
    entries: &'static [SearchEntry],
    is_open: bool,
    query: String,
    phase: SearchPhase,
    /// Indices into `entries`.
    results: Vec<usize>,
    selected: usize,
}

impl SearchSession {
    pub fn new(entries: &'static [SearchEntry]) -> Self {
        Self {
            entries,
            is_open: false,
            query: String::new(),
            phase: SearchPhase::Idle,
            results: Vec::new(),
            selected: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Opening always starts from a blank query.
    pub fn toggle(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.query.clear();
            self.results.clear();
            self.selected = 0;
            self.phase = SearchPhase::Idle;
            self.is_open = true;
        }
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.phase = SearchPhase::Idle;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.phase, SearchPhase::Searching { .. })
    }

    pub fn push_char(&mut self, c: char, now: Instant) {
        self.query.push(c);
        self.restart_debounce(now);
    }

    pub fn backspace(&mut self, now: Instant) {
        if self.query.pop().is_some() {
            self.restart_debounce(now);
        }
    }

    /// Any edit cancels a pending or running search.
    fn restart_debounce(&mut self, now: Instant) {
        self.phase = SearchPhase::Debouncing {
            until: now + DEBOUNCE,
        };
    }

    /// Advance timers.  Returns `true` when something visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.phase {
            SearchPhase::Debouncing { until } if now >= until => {
                if self.query.trim().is_empty() {
                    self.results.clear();
                    self.selected = 0;
                    self.phase = SearchPhase::Idle;
                } else {
                    self.phase = SearchPhase::Searching {
                        until: now + SEARCH_LATENCY,
                    };
                }
                true
            }
            SearchPhase::Searching { until } if now >= until => {
                let entries = self.entries;
                self.results = search_entries(entries, &self.query)
                    .into_iter()
                    .filter_map(|hit| entries.iter().position(|e| std::ptr::eq(e, hit)))
                    .collect();
                self.selected = 0;
                self.phase = SearchPhase::Idle;
                tracing::debug!(query = %self.query, hits = self.results.len(), "search finished");
                true
            }
            _ => false,
        }
    }

    pub fn results(&self) -> impl Iterator<Item = &SearchEntry> + '_ {
        self.results.iter().filter_map(|&i| self.entries.get(i))
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.results.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select(&mut self, index: usize) {
        if index < self.results.len() {
            self.selected = index;
        }
    }

    pub fn selected_entry(&self) -> Option<&SearchEntry> {
        self.results
            .get(self.selected)
            .and_then(|&i| self.entries.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ENTRIES: &[SearchEntry] = &[
        SearchEntry {
            title: "Frontend Development Skills",
            content: "React, Vue.js, TypeScript",
            section: "skills",
        },
        SearchEntry {
            title: "Master's Degree",
            content: "Computer Science with AI",
            section: "education",
        },
        SearchEntry {
            title: "Contact Information",
            content: "Email: someone@example.com",
            section: "contact",
        },
    ];

    #[test]
    fn matches_title_or_content_ignoring_case() {
        let hits = search_entries(ENTRIES, "SKILLS");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].section, "skills");

        let hits = search_entries(ENTRIES, "example.com");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].section, "contact");
    }

    #[test]
    fn blank_query_matches_nothing() {
        assert!(search_entries(ENTRIES, "").is_empty());
        assert!(search_entries(ENTRIES, "   ").is_empty());
    }

    #[test]
    fn unmatched_query_is_empty() {
        assert!(search_entries(ENTRIES, "kubernetes").is_empty());
    }

    #[test]
    fn results_land_after_debounce_and_latency() {
        let mut session = SearchSession::new(ENTRIES);
        session.toggle();
        let t0 = Instant::now();
        for c in "science".chars() {
            session.push_char(c, t0);
        }

        assert!(!session.tick(t0 + Duration::from_millis(299)));
        assert!(session.tick(t0 + DEBOUNCE));
        assert!(session.is_searching());

        let searching_since = t0 + DEBOUNCE;
        assert!(!session.tick(searching_since + Duration::from_millis(500)));
        assert!(session.tick(searching_since + SEARCH_LATENCY));
        assert!(!session.is_searching());
        assert_eq!(session.result_count(), 1);
        assert_eq!(session.selected_entry().map(|e| e.section), Some("education"));
    }

    #[test]
    fn typing_restarts_the_debounce() {
        let mut session = SearchSession::new(ENTRIES);
        session.toggle();
        let t0 = Instant::now();
        session.push_char('a', t0);
        let t1 = t0 + Duration::from_millis(200);
        session.push_char('i', t1);

        assert!(!session.tick(t0 + DEBOUNCE));
        assert!(session.tick(t1 + DEBOUNCE));
    }

    #[test]
    fn clearing_the_query_clears_results() {
        let mut session = SearchSession::new(ENTRIES);
        session.toggle();
        let t0 = Instant::now();
        session.push_char('e', t0);
        session.tick(t0 + DEBOUNCE);
        session.tick(t0 + DEBOUNCE + SEARCH_LATENCY);
        assert!(session.result_count() > 0);

        let t1 = t0 + Duration::from_secs(5);
        session.backspace(t1);
        session.tick(t1 + DEBOUNCE);
        assert_eq!(session.result_count(), 0);
        assert_eq!(session.phase(), SearchPhase::Idle);
    }

    #[test]
    fn reopening_resets_query() {
        let mut session = SearchSession::new(ENTRIES);
        session.toggle();
        session.push_char('x', Instant::now());
        session.toggle();
        assert!(!session.is_open());
        session.toggle();
        assert!(session.is_open());
        assert_eq!(session.query(), "");
    }

    #[test]
    fn selection_stays_in_range() {
        let mut session = SearchSession::new(ENTRIES);
        session.toggle();
        let t0 = Instant::now();
        session.push_char('o', t0);
        session.tick(t0 + DEBOUNCE);
        session.tick(t0 + DEBOUNCE + SEARCH_LATENCY);
        let n = session.result_count();
        assert!(n >= 2);

        for _ in 0..10 {
            session.select_next();
        }
        assert_eq!(session.selected(), n - 1);
        for _ in 0..10 {
            session.select_prev();
        }
        assert_eq!(session.selected(), 0);
    }
}
