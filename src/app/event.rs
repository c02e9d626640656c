//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a blocking reader
//! task that forwards them over a channel so the main loop stays
//! non-blocking.  Quiet periods turn into `Tick`s, which drive animations.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Bracketed paste (typed into the search box or the contact form).
    Paste(String),
    Resize(u16, u16),
    Tick,
}

impl AppEvent {
    /// Translate a crossterm event.  Key releases are dropped so a keypress
    /// acts once on every platform.
    fn from_crossterm(ev: CtEvent) -> Option<Self> {
        match ev {
            CtEvent::Key(k) if k.kind != KeyEventKind::Release => Some(AppEvent::Key(k)),
            CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
            CtEvent::Paste(text) => Some(AppEvent::Paste(text)),
            CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            _ => None,
        }
    }
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.  A `Tick` is sent whenever `tick_rate`
/// passes without input.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        let has_event = event::poll(tick_rate).unwrap_or(false);
        let app_event = if has_event {
            match event::read().ok().and_then(AppEvent::from_crossterm) {
                Some(ev) => ev,
                None => continue,
            }
        } else {
            AppEvent::Tick
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(kind: KeyEventKind) -> CtEvent {
        CtEvent::Key(KeyEvent {
            code: KeyCode::Char('j'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn key_releases_are_dropped() {
        assert!(matches!(
            AppEvent::from_crossterm(key(KeyEventKind::Press)),
            Some(AppEvent::Key(_))
        ));
        assert!(AppEvent::from_crossterm(key(KeyEventKind::Release)).is_none());
        assert!(matches!(
            AppEvent::from_crossterm(key(KeyEventKind::Repeat)),
            Some(AppEvent::Key(_))
        ));
    }

    #[test]
    fn paste_and_resize_are_forwarded() {
        assert!(matches!(
            AppEvent::from_crossterm(CtEvent::Paste("hi".into())),
            Some(AppEvent::Paste(s)) if s == "hi"
        ));
        assert!(matches!(
            AppEvent::from_crossterm(CtEvent::Resize(80, 24)),
            Some(AppEvent::Resize(80, 24))
        ));
        assert!(AppEvent::from_crossterm(CtEvent::FocusGained).is_none());
    }
}
