//! Page layout: the portfolio flattened into styled terminal rows.
//!
//! The layout is rebuilt whenever the terminal width or the contact form
//! changes.  Every animated region gets an [`ElementId`] in build order, so
//! ids stay stable across rebuilds even though their row positions move.
//! [`PageView`] exposes a layout plus a scroll position to the core engine
//! as pixel geometry.

use crate::core::contact::{ContactForm, Field, SubmitStatus};
use crate::core::content::{self, Heading};
use crate::core::geometry::{Bounds, ElementId, PageGeometry};
use crate::core::reveal::{AnimationKind, RevealOptions};
use crate::ui::theme::Tone;

/// Widest the text column gets, however wide the terminal is.
pub const MAX_CONTENT_WIDTH: u16 = 96;
const MIN_CONTENT_WIDTH: u16 = 20;

/// One run of uniformly styled text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub text: String,
    pub tone: Tone,
}

fn piece(text: impl Into<String>, tone: Tone) -> Piece {
    Piece {
        text: text.into(),
        tone,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub indent: u16,
    pub pieces: Vec<Piece>,
}

impl Row {
    pub fn text(&self) -> String {
        self.pieces.iter().map(|p| p.text.as_str()).collect()
    }
}

/// A block of rows that reveals as a unit.
#[derive(Debug, Clone)]
pub struct Region {
    pub element: ElementId,
    pub top: usize,
    pub height: usize,
    pub options: RevealOptions,
}

impl Region {
    pub fn contains(&self, row: usize) -> bool {
        row >= self.top && row < self.top + self.height
    }
}

/// What the contact form looks like right now.
#[derive(Debug, Clone, Copy)]
pub struct FormView<'a> {
    pub form: &'a ContactForm,
    pub focus: Option<Field>,
    pub status: SubmitStatus,
}

#[derive(Debug, Clone)]
pub struct PageLayout {
    width: u16,
    rows: Vec<Row>,
    regions: Vec<Region>,
    anchors: Vec<(&'static str, usize)>,
}

impl PageLayout {
    /// Lay the page out for a terminal `terminal_width` columns wide.
    pub fn build(terminal_width: u16, form: FormView<'_>, year: i32) -> Self {
        let width = terminal_width
            .saturating_sub(4)
            .clamp(MIN_CONTENT_WIDTH, MAX_CONTENT_WIDTH);
        let mut b = Builder::new(width);

        b.anchor("home");
        hero(&mut b);
        b.anchor("skills");
        skills(&mut b);
        b.anchor("education");
        education(&mut b);
        b.anchor("about");
        about(&mut b);
        b.anchor("contact");
        contact(&mut b, form);
        footer(&mut b, year);

        PageLayout {
            width,
            rows: b.rows,
            regions: b.regions,
            anchors: b.anchors,
        }
    }

    /// Width of the text column.
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, element: ElementId) -> Option<&Region> {
        self.regions.get(element.0)
    }

    /// Region covering `row`, if any.  Regions never overlap.
    pub fn region_at(&self, row: usize) -> Option<&Region> {
        let idx = self.regions.partition_point(|r| r.top + r.height <= row);
        self.regions.get(idx).filter(|r| r.contains(row))
    }

    pub fn anchor_row(&self, id: &str) -> Option<usize> {
        self.anchors
            .iter()
            .find(|(anchor, _)| *anchor == id)
            .map(|&(_, row)| row)
    }

    /// Largest useful scroll offset for a viewport `viewport_rows` high.
    pub fn max_scroll(&self, viewport_rows: usize) -> usize {
        self.rows.len().saturating_sub(viewport_rows)
    }
}

// ───────────────────────────────────────── geometry ──────────

/// A layout seen through a viewport, measured in pixels.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    layout: &'a PageLayout,
    scroll_row: usize,
    viewport_rows: usize,
    px_per_row: f64,
}

impl<'a> PageView<'a> {
    pub fn new(layout: &'a PageLayout, scroll_row: usize, viewport_rows: usize, px_per_row: u16) -> Self {
        Self {
            layout,
            scroll_row,
            viewport_rows,
            px_per_row: f64::from(px_per_row.max(1)),
        }
    }

    fn px(&self, rows: usize) -> f64 {
        rows as f64 * self.px_per_row
    }

    fn relative_px(&self, row: usize) -> f64 {
        (row as f64 - self.scroll_row as f64) * self.px_per_row
    }
}

impl PageGeometry for PageView<'_> {
    fn scroll_y(&self) -> f64 {
        self.px(self.scroll_row)
    }

    fn viewport_height(&self) -> f64 {
        self.px(self.viewport_rows)
    }

    fn document_height(&self) -> f64 {
        self.px(self.layout.len())
    }

    fn anchor_top(&self, id: &str) -> Option<f64> {
        self.layout.anchor_row(id).map(|row| self.relative_px(row))
    }

    fn element_bounds(&self, element: ElementId) -> Option<Bounds> {
        self.layout
            .region(element)
            .map(|r| Bounds::new(self.relative_px(r.top), self.px(r.height)))
    }
}

// ───────────────────────────────────────── builder ───────────

struct Builder {
    width: u16,
    rows: Vec<Row>,
    regions: Vec<Region>,
    anchors: Vec<(&'static str, usize)>,
}

impl Builder {
    fn new(width: u16) -> Self {
        Self {
            width,
            rows: Vec::new(),
            regions: Vec::new(),
            anchors: Vec::new(),
        }
    }

    fn anchor(&mut self, id: &'static str) {
        self.anchors.push((id, self.rows.len()));
    }

    fn blank(&mut self) {
        self.rows.push(Row::default());
    }

    fn line(&mut self, indent: u16, pieces: Vec<Piece>) {
        self.rows.push(Row { indent, pieces });
    }

    fn text(&mut self, indent: u16, text: &str, tone: Tone) {
        let avail = self.width.saturating_sub(indent).max(1) as usize;
        for line in wrap_text(text, avail) {
            self.line(indent, vec![piece(line, tone)]);
        }
    }

    /// `left` flush left, `right` flush right on one row.  Falls back to two
    /// rows when they don't fit side by side.
    fn split(&mut self, indent: u16, left: Piece, right: Piece) {
        let avail = self.width.saturating_sub(indent) as usize;
        let used = left.text.chars().count() + right.text.chars().count();
        if used + 1 <= avail {
            let gap = " ".repeat(avail - used);
            self.line(indent, vec![left, piece(gap, Tone::Body), right]);
        } else {
            self.line(indent, vec![left]);
            self.line(indent, vec![right]);
        }
    }

    /// Pieces on one row when they fit, otherwise one row each.
    fn flow(&mut self, indent: u16, pieces: Vec<Piece>) {
        let avail = self.width.saturating_sub(indent) as usize;
        let used: usize = pieces.iter().map(|p| p.text.chars().count()).sum();
        if used <= avail {
            self.line(indent, pieces);
            return;
        }
        for p in pieces {
            let text = p.text.trim_start();
            if !text.is_empty() {
                self.line(indent, vec![piece(text, p.tone)]);
            }
        }
    }

    fn region(&mut self, options: RevealOptions, body: impl FnOnce(&mut Self)) {
        let top = self.rows.len();
        body(self);
        let height = self.rows.len() - top;
        let element = ElementId(self.regions.len());
        self.regions.push(Region {
            element,
            top,
            height,
            options,
        });
    }

    fn heading(&mut self, heading: &Heading) {
        self.blank();
        self.blank();
        self.region(RevealOptions::new(AnimationKind::FadeIn), |b| {
            b.line(0, vec![piece(heading.subtitle, Tone::Subtitle)]);
            b.line(0, vec![piece(heading.title, Tone::Title)]);
            b.line(0, vec![piece("─".repeat(8), Tone::Accent)]);
        });
        self.blank();
    }
}

fn revealed(kind: AnimationKind, delay_secs: f64) -> RevealOptions {
    RevealOptions::new(kind)
        .with_delay_secs(delay_secs)
        .unwrap_or_else(|_| RevealOptions::new(kind))
}

/// Stagger of `0.1 * index` seconds used by card lists.
fn staggered(index: usize) -> RevealOptions {
    revealed(AnimationKind::SlideUp, 0.1 * index as f64)
}

// ───────────────────────────────────────── sections ──────────

fn hero(b: &mut Builder) {
    let profile = &content::PROFILE;
    b.blank();
    b.blank();
    let fade_on_mount = RevealOptions::new(AnimationKind::FadeIn)
        .with_threshold(0.0)
        .unwrap_or_default();
    b.region(fade_on_mount, |b| {
        b.line(0, vec![piece("Hi I'm,", Tone::Muted)]);
        b.line(0, vec![piece(profile.name, Tone::Title)]);
        b.line(0, vec![piece(profile.role, Tone::Subtitle)]);
        b.blank();
        for (i, para) in profile.bio.iter().enumerate() {
            if i > 0 {
                b.blank();
            }
            b.text(0, para, Tone::Body);
        }
        b.blank();
        b.line(0, vec![piece("Connect with me", Tone::Muted)]);
        let socials: Vec<&str> = profile.socials.iter().map(|&(name, _)| name).collect();
        b.text(0, &socials.join("  ·  "), Tone::Accent);
    });
}

fn skills(b: &mut Builder) {
    b.heading(&content::SKILLS_HEADING);
    let bar_width = b.width.saturating_sub(4) as usize;
    for (i, skill) in content::SKILLS.iter().enumerate() {
        b.region(staggered(i), |b| {
            b.split(
                0,
                piece(skill.name, Tone::Title),
                piece(format!("{}%", skill.proficiency), Tone::Accent),
            );
            b.text(2, skill.description, Tone::Muted);
            let filled = bar_width * usize::from(skill.proficiency.min(100)) / 100;
            b.line(
                2,
                vec![
                    piece("█".repeat(filled), Tone::Bar),
                    piece("█".repeat(bar_width - filled), Tone::BarTrack),
                ],
            );
        });
        b.blank();
    }
}

fn education(b: &mut Builder) {
    b.heading(&content::EDUCATION_HEADING);
    for (i, entry) in content::EDUCATION.iter().enumerate() {
        b.region(staggered(i), |b| {
            b.split(
                0,
                piece(entry.degree, Tone::Title),
                piece(entry.period, Tone::Muted),
            );
            b.flow(
                2,
                vec![
                    piece(entry.institution, Tone::Accent),
                    piece(format!("  ·  {}", entry.location), Tone::Muted),
                ],
            );
            b.text(2, entry.description, Tone::Body);
            for achievement in entry.achievements {
                b.text(4, &format!("• {achievement}"), Tone::Muted);
            }
        });
        b.blank();
    }
}

fn about(b: &mut Builder) {
    b.heading(&content::ABOUT_HEADING);

    b.region(revealed(AnimationKind::SlideUp, 0.0), |b| {
        for para in content::PROFILE.bio {
            b.text(0, para, Tone::Body);
            b.blank();
        }
        b.line(0, vec![piece("Personal Info", Tone::Title)]);
        for (label, value) in content::PERSONAL_INFO {
            b.line(
                2,
                vec![piece(format!("{label:<13}"), Tone::Muted), piece(*value, Tone::Body)],
            );
        }
    });
    b.blank();

    b.region(revealed(AnimationKind::SlideUp, 0.2), |b| {
        b.line(0, vec![piece("My Skills", Tone::Title)]);
        let avail = b.width.saturating_sub(2) as usize;
        let mut row: Vec<Piece> = Vec::new();
        let mut used = 0;
        for tag in content::SKILL_TAGS {
            let len = tag.chars().count() + 3;
            if used + len > avail && !row.is_empty() {
                b.line(2, std::mem::take(&mut row));
                used = 0;
            }
            row.push(piece(format!(" {tag} "), Tone::Tag));
            row.push(piece(" ", Tone::Body));
            used += len;
        }
        if !row.is_empty() {
            b.line(2, row);
        }
        b.blank();
        b.line(0, vec![piece("Experience", Tone::Title)]);
        for job in content::EXPERIENCE {
            b.split(
                2,
                piece(job.position, Tone::Body),
                piece(job.period, Tone::Muted),
            );
            b.line(4, vec![piece(job.company, Tone::Accent)]);
            b.text(4, job.description, Tone::Muted);
        }
    });
    b.blank();

    for (i, (value, label)) in content::STATISTICS.iter().enumerate() {
        b.region(staggered(i), |b| {
            b.line(
                2,
                vec![piece(format!("{value:>4}  "), Tone::Subtitle), piece(*label, Tone::Body)],
            );
        });
    }
}

fn contact(b: &mut Builder, view: FormView<'_>) {
    b.heading(&content::CONTACT_HEADING);

    b.region(revealed(AnimationKind::SlideUp, 0.0), |b| {
        b.text(0, content::CONTACT_INTRO, Tone::Body);
        b.blank();
        for (title, value) in content::CONTACT_INFO {
            b.line(
                2,
                vec![piece(format!("{title:<10}"), Tone::Muted), piece(*value, Tone::Accent)],
            );
        }
    });
    b.blank();

    b.region(revealed(AnimationKind::SlideUp, 0.2), |b| {
        b.line(0, vec![piece("Send me a message", Tone::Title)]);
        b.blank();
        for &field in Field::ALL {
            form_field(b, view, field);
        }
        b.blank();
        let button = match view.status {
            SubmitStatus::Submitting => " Sending... ",
            _ => " Send Message ",
        };
        match view.status {
            SubmitStatus::Success => b.split(
                0,
                piece("✓ Message sent successfully!", Tone::Success),
                piece(button, Tone::Button),
            ),
            SubmitStatus::Error => b.split(
                0,
                piece("✗ Failed to send message. Please try again.", Tone::Error),
                piece(button, Tone::Button),
            ),
            SubmitStatus::Idle | SubmitStatus::Submitting => {
                b.split(0, piece("", Tone::Body), piece(button, Tone::Button))
            }
        }
    });
}

fn form_field(b: &mut Builder, view: FormView<'_>, field: Field) {
    let focused = view.focus == Some(field);
    let label_tone = if focused { Tone::LabelFocused } else { Tone::Label };
    b.line(0, vec![piece(field.label(), label_tone)]);

    let value = view.form.value(field);
    // indent + marker + cursor
    let avail = b.width.saturating_sub(5).max(1) as usize;
    let marker = if focused { "▌ " } else { "│ " };
    if value.is_empty() {
        let mut pieces = vec![piece(marker, label_tone)];
        if focused {
            pieces.push(piece("█", Tone::Accent));
        }
        pieces.push(piece(field.placeholder(), Tone::Placeholder));
        b.line(2, pieces);
    } else {
        let mut lines: Vec<String> = if field.is_multiline() {
            value.split('\n').flat_map(|l| wrap_text(l, avail)).collect()
        } else {
            // Long single-line values scroll: keep the tail in view.
            let len = value.chars().count();
            vec![value.chars().skip(len.saturating_sub(avail)).collect()]
        };
        if lines.is_empty() {
            lines.push(String::new());
        }
        let last = lines.len() - 1;
        for (i, line) in lines.into_iter().enumerate() {
            let mut pieces = vec![piece(marker, label_tone), piece(line, Tone::Input)];
            if focused && i == last {
                pieces.push(piece("█", Tone::Accent));
            }
            b.line(2, pieces);
        }
    }

    if let Some(err) = view.form.error(field) {
        b.line(2, vec![piece(format!("! {err}"), Tone::Error)]);
    }
    b.blank();
}

fn footer(b: &mut Builder, year: i32) {
    b.blank();
    b.blank();
    b.line(0, vec![piece(content::PROFILE.brand, Tone::Title), piece(".", Tone::Accent)]);
    b.text(0, content::FOOTER_TAGLINE, Tone::Muted);
    b.blank();
    b.text(
        0,
        &format!("© {year} {}. All rights reserved.", content::PROFILE.name),
        Tone::Muted,
    );
    b.blank();
}

// ───────────────────────────────────────── helpers ───────────

/// Greedy word wrap.  Words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let sep = usize::from(current_len > 0);
        if current_len + sep + word.len() > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        } else if sep == 1 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }
    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}
