//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer lays the portfolio out as terminal rows, measures it for the
//! core engine, and paints the current state.  No state changes happen here.

pub mod header;
pub mod layout;
pub mod page;
pub mod page_widget;
pub mod popup;
pub mod search;
pub mod smooth_scroll;
pub mod spinner;
pub mod theme;
