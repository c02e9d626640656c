//! Background contact-form jobs so the UI thread never waits on a timer.
//!
//! Every job carries the submission generation it belongs to; the state
//! drops updates from superseded submissions.

use tokio::sync::mpsc;

use crate::core::contact::{ContactForm, STATUS_RESET, SUBMIT_LATENCY};

#[derive(Debug)]
pub enum FormUpdate {
    /// The (simulated) delivery finished.
    Delivered {
        generation: u64,
        result: anyhow::Result<()>,
    },
    /// The success/error banner has been shown long enough.
    StatusExpired { generation: u64 },
}

/// Deliver `form` after [`SUBMIT_LATENCY`].  There is no backend; delivery
/// is logged and always succeeds.
pub fn spawn_submit(tx: mpsc::UnboundedSender<FormUpdate>, generation: u64, form: ContactForm) {
    tokio::spawn(async move {
        tokio::time::sleep(SUBMIT_LATENCY).await;
        tracing::info!(
            name = %form.name,
            email = %form.email,
            subject = %form.subject,
            message_len = form.message.chars().count(),
            "contact form submitted"
        );
        let _ = tx.send(FormUpdate::Delivered {
            generation,
            result: Ok(()),
        });
    });
}

/// Clear the status banner after [`STATUS_RESET`].
pub fn spawn_status_reset(tx: mpsc::UnboundedSender<FormUpdate>, generation: u64) {
    tokio::spawn(async move {
        tokio::time::sleep(STATUS_RESET).await;
        let _ = tx.send(FormUpdate::StatusExpired { generation });
    });
}
