//! Application orchestration: state, input handling and background jobs.

pub mod event;
pub mod form_runtime;
pub mod handler;
pub mod state;
