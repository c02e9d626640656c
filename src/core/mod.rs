//! Core engine: page geometry, scroll tracking, reveal state machines, and
//! the portfolio's data model.
//!
//! Nothing in this module depends on any TUI or rendering crate.  The view
//! layer measures the page, hands it over as a
//! [`PageGeometry`](geometry::PageGeometry), and reads back plain state.

pub mod contact;
pub mod content;
pub mod geometry;
pub mod observe;
pub mod reveal;
pub mod scroll;
pub mod search;
