//! Application orchestration — state, terminal events and key handling.

pub mod event;
pub mod handler;
pub mod preview;
pub mod state;
