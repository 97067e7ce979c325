//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! Widgets read session data and the decoded preview; no filesystem I/O
//! happens here.

pub mod history;
pub mod layout;
pub mod popup;
pub mod theme;
pub mod winner;
