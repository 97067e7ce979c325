//! Core logic – the draw session and the filesystem queries it depends on.
//!
//! Nothing in this module depends on any TUI or rendering crate.  The OS
//! dialog and opener live behind traits in [`crate::host`].

pub mod error;
pub mod images;
pub mod listing;
pub mod random;
pub mod session;
