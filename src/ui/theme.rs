//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;

/// Semantic role of a piece of page text.  The page layout tags its spans
/// with a tone; the theme decides the colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Body,
    Muted,
    Title,
    Subtitle,
    Accent,
    Tag,
    Bar,
    BarTrack,
    Label,
    LabelFocused,
    Input,
    Placeholder,
    Error,
    Success,
    Button,
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    bg: (u8, u8, u8),
    surface: (u8, u8, u8),
    text: (u8, u8, u8),
    muted: (u8, u8, u8),
    accent: (u8, u8, u8),
    error: (u8, u8, u8),
    success: (u8, u8, u8),
}

const LIGHT: Palette = Palette {
    bg: (250, 250, 250),
    surface: (235, 237, 240),
    text: (23, 23, 23),
    muted: (110, 110, 115),
    accent: (37, 99, 235),
    error: (220, 38, 38),
    success: (22, 163, 74),
};

const DARK: Palette = Palette {
    bg: (12, 12, 14),
    surface: (34, 36, 42),
    text: (236, 236, 236),
    muted: (150, 150, 158),
    accent: (96, 165, 250),
    error: (248, 113, 113),
    success: (74, 222, 128),
};

/// Central theme: change colours here and they propagate everywhere.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    mode: ThemeMode,
    palette: Palette,
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

impl Theme {
    pub fn new(mode: ThemeMode) -> Self {
        let palette = match mode {
            ThemeMode::Light => LIGHT,
            ThemeMode::Dark => DARK,
        };
        Self { mode, palette }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn background(&self) -> Style {
        Style::default().bg(rgb(self.palette.bg)).fg(rgb(self.palette.text))
    }

    // ── page text ──────────────────────────────────────────────
    pub fn tone(&self, tone: Tone) -> Style {
        let p = &self.palette;
        let base = Style::default().bg(rgb(p.bg));
        match tone {
            Tone::Body | Tone::Input => base.fg(rgb(p.text)),
            Tone::Muted | Tone::Placeholder => base.fg(rgb(p.muted)),
            Tone::Title => base.fg(rgb(p.text)).add_modifier(Modifier::BOLD),
            Tone::Subtitle => base.fg(rgb(p.accent)).add_modifier(Modifier::BOLD),
            Tone::Accent => base.fg(rgb(p.accent)),
            Tone::Tag => Style::default().bg(rgb(p.surface)).fg(rgb(p.text)),
            Tone::Bar => base.fg(rgb(p.accent)),
            Tone::BarTrack => base.fg(rgb(p.surface)),
            Tone::Label => base.fg(rgb(p.muted)),
            Tone::LabelFocused => base.fg(rgb(p.accent)).add_modifier(Modifier::BOLD),
            Tone::Error => base.fg(rgb(p.error)),
            Tone::Success => base.fg(rgb(p.success)),
            Tone::Button => Style::default()
                .bg(rgb(p.accent))
                .fg(rgb(p.bg))
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Fade `style` toward the page background.  `opacity` 0 is invisible,
    /// 1 leaves the style untouched.
    pub fn fade(&self, style: Style, opacity: f64) -> Style {
        if opacity >= 1.0 {
            return style;
        }
        let bg = self.palette.bg;
        let mut out = style;
        if let Some(Color::Rgb(r, g, b)) = style.fg {
            out = out.fg(rgb(blend((r, g, b), bg, opacity)));
        }
        if let Some(Color::Rgb(r, g, b)) = style.bg {
            out = out.bg(rgb(blend((r, g, b), bg, opacity)));
        }
        out
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn header_style(&self, scrolled: bool) -> Style {
        let p = &self.palette;
        if scrolled {
            Style::default().bg(rgb(p.surface)).fg(rgb(p.text))
        } else {
            Style::default().bg(rgb(p.bg)).fg(rgb(p.text))
        }
    }

    pub fn brand_style(&self) -> Style {
        Style::default()
            .fg(rgb(self.palette.accent))
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_link_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(rgb(self.palette.accent))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(rgb(self.palette.muted))
        }
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(rgb(self.palette.muted))
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(rgb(self.palette.accent))
            .add_modifier(Modifier::BOLD)
    }

    pub fn popup_style(&self) -> Style {
        Style::default().bg(rgb(self.palette.bg)).fg(rgb(self.palette.text))
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(rgb(self.palette.surface))
            .fg(rgb(self.palette.text))
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_style(&self) -> Style {
        Style::default().fg(rgb(self.palette.accent))
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(rgb(self.palette.muted))
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(rgb(self.palette.error))
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default()
            .bg(rgb(self.palette.surface))
            .fg(rgb(self.palette.muted))
    }

    /// Bullet colour for a search result, by the section it links to.
    pub fn section_color(section: &str) -> Color {
        match section {
            "skills" => Color::Rgb(59, 130, 246),
            "education" => Color::Rgb(34, 197, 94),
            "about" => Color::Rgb(168, 85, 247),
            "contact" => Color::Rgb(249, 115, 22),
            _ => Color::Gray,
        }
    }
}

fn blend(fg: (u8, u8, u8), bg: (u8, u8, u8), opacity: f64) -> (u8, u8, u8) {
    let t = opacity.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (b as f64 + (a as f64 - b as f64) * t).round() as u8;
    (mix(fg.0, bg.0), mix(fg.1, bg.1), mix(fg.2, bg.2))
}
