//! A single-page portfolio for the terminal.
//!
//! The page scrolls like a browser: the header tracks the section in view
//! and fills a progress bar, and content fades or slides in the first time
//! it enters the viewport.  Run with `--help` for the available flags.

mod app;
mod config;
mod core;
mod ui;

use std::fs::OpenOptions;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, widgets::Block, widgets::Paragraph, Frame, Terminal};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    form_runtime::{self, FormUpdate},
    handler,
    state::{ActiveView, AppState},
};
use crate::config::{AppConfig, ThemeMode};
use crate::core::contact::SubmitStatus;
use crate::core::content::{NAV_LINKS, PROFILE};
use crate::core::scroll::SectionTable;
use crate::ui::{
    header::Header,
    layout::AppLayout,
    page_widget::{BackToTop, PageWidget},
    popup::{HelpPopup, MenuPopup},
    search::SearchOverlay,
    spinner,
};

/// Quiet period after which the event reader emits a `Tick`.
const TICK_RATE: Duration = Duration::from_millis(33);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), version, about = "A single-page portfolio in the terminal")]
struct Cli {
    /// Colour theme for this run (`light` or `dark`).
    #[arg(long, value_parser = parse_theme)]
    theme: Option<ThemeMode>,

    /// Section to open at, e.g. `skills` or `contact`.
    #[arg(long)]
    section: Option<String>,

    /// Disable smooth scrolling and reveal animations.
    #[arg(long)]
    no_animations: bool,

    /// Append logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the config file location and exit.
    #[arg(long)]
    print_config_path: bool,
}

fn parse_theme(s: &str) -> Result<ThemeMode, String> {
    ThemeMode::parse(s).ok_or_else(|| format!("unknown theme `{s}` (expected light or dark)"))
}

// ───────────────────────────────────────── logging ───────────

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=info"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            // Only when RUST_LOG is set; the page itself owns stdout.
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &AppState, now: Instant) {
    let area = frame.area();
    let layout = AppLayout::from_area(area);
    let theme = &state.theme;

    frame.render_widget(Block::default().style(theme.background()), area);

    let nav = state.tracker.state();
    frame.render_widget(
        Header {
            brand: PROFILE.brand,
            sections: state.tracker.sections(),
            nav: &nav,
            theme,
        },
        layout.header_area,
    );

    frame.render_widget(
        PageWidget {
            layout: &state.layout,
            scroll_row: state.scroll.row(),
            reveals: &state.reveals,
            now,
            motion: state.motion(),
            px_per_row: state.config.px_per_row,
            theme,
        },
        layout.page_area,
    );
    if state.back_to_top.is_past() {
        frame.render_widget(BackToTop { theme }, layout.page_area);
    }

    let status = status_text(state);
    frame.render_widget(Paragraph::new(status).style(theme.status_bar_style()), layout.status_area);

    match state.active_view {
        ActiveView::Search => frame.render_widget(
            SearchOverlay {
                session: &state.search,
                theme,
                tick: state.tick,
            },
            area,
        ),
        ActiveView::Menu => {
            let active = nav.active_section_id.as_str();
            frame.render_widget(
                MenuPopup {
                    sections: state.tracker.sections(),
                    active_id: active,
                    selected: state.menu_selected,
                    theme,
                },
                area,
            );
        }
        ActiveView::Help => frame.render_widget(
            HelpPopup {
                config: &state.config,
                theme,
            },
            area,
        ),
        ActiveView::Page | ActiveView::ContactForm => {}
    }
}

fn status_text(state: &AppState) -> String {
    if state.submit_status == SubmitStatus::Submitting {
        return format!(" {} Sending message...", spinner::frame(state.tick));
    }
    match state.active_view {
        ActiveView::Page => state
            .status_message
            .clone()
            .unwrap_or_else(|| state.config.status_bar_hint()),
        ActiveView::ContactForm if state.form.has_errors() => {
            " Fix the highlighted fields | Tab: next field | Esc: done".into()
        }
        ActiveView::ContactForm => {
            " Tab: next field | Enter: next / send | Alt+Enter: new line | Ctrl+s: send | Esc: done".into()
        }
        ActiveView::Search => " Type to search | ↑/↓: select | Enter: open | Esc: close".into(),
        ActiveView::Menu => " ↑/↓: select | Enter: go | 1-9: jump | Esc: close".into(),
        ActiveView::Help => " Esc: close".into(),
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config_path {
        println!("{}", config::config_path().display());
        return Ok(());
    }

    init_tracing(cli.log_file.as_deref())?;

    // ── configuration ─────────────────────────────────────────
    let mut user_config = AppConfig::load();
    if let Some(theme) = cli.theme {
        user_config.theme = theme;
    }
    let animations = user_config.animations && !cli.no_animations;

    let sections = SectionTable::from_links(NAV_LINKS).context("building the section table")?;
    let year = chrono::Local::now().year();

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stdout_handle = stdout();
    execute!(
        stdout_handle,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let now = Instant::now();
    let mut state = AppState::new(user_config, sections, year, Rect::new(0, 0, size.width, size.height), now);
    if !animations {
        state.animations = false;
    }
    tracing::info!(width = size.width, height = size.height, animations, "portfolio started");

    if let Some(id) = cli.section.as_deref() {
        if !state.start_at_section(id, now) {
            tracing::warn!(section = id, "unknown section requested on the command line");
            state.status_message = Some(format!("No section named `{id}`"));
        }
    }

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(TICK_RATE);
    let (form_tx, mut form_rx) = mpsc::unbounded_channel::<FormUpdate>();

    // ── event loop ────────────────────────────────────────────
    let mut redraw = true;
    let mut was_animating = false;
    loop {
        if redraw {
            terminal.draw(|frame| draw(frame, &state, Instant::now()))?;
        }
        redraw = true;

        // Background work is kicked off after the frame that shows
        // the "Sending..." state.
        if let Some((generation, form)) = state.pending_submit.take() {
            form_runtime::spawn_submit(form_tx.clone(), generation, form);
        }
        if state.config_dirty {
            state.config_dirty = false;
            if let Err(err) = state.config.save() {
                tracing::warn!(error = %err, "could not save config");
                state.status_message = Some(format!("Could not save settings: {err}"));
            }
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                let now = Instant::now();
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k, now),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m, now),
                    AppEvent::Paste(text) => handler::handle_paste(&mut state, &text, now),
                    AppEvent::Resize(w, h) => state.resize(Rect::new(0, 0, w, h), now),
                    AppEvent::Tick => {
                        state.on_tick(now);
                        // Idle ticks skip the frame; one more is drawn after
                        // the last animation settles.
                        let animating = state.is_animating(now);
                        redraw = animating || was_animating;
                        was_animating = animating;
                    }
                }
            }

            Some(update) = form_rx.recv() => {
                if let Some(generation) = state.apply_form_update(update, Instant::now()) {
                    form_runtime::spawn_status_reset(form_tx.clone(), generation);
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    state.shutdown();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    tracing::info!("portfolio closed");

    Ok(())
}
