//! Per-room, three-phase power consumption monitor.

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
/// Rooms, consumption history, and the room registry.
pub mod model;
pub mod reporting;
pub mod runner;
#[cfg(feature = "tui")]
pub mod tui;
