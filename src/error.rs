//! Error type shared by the room model, the registry, and history import.

use std::io;

use thiserror::Error;

/// Every recoverable failure the monitor core can report.
///
/// Variants carry the offending room name, field, or raw value so callers can
/// present a precise message without re-deriving the cause.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// No room with this name exists in the registry.
    #[error("unknown room \"{0}\"")]
    UnknownRoom(String),

    /// Socket count was below 1, out of range, or not an integer.
    #[error("invalid socket count \"{value}\" for room \"{room}\" (must be an integer >= 1)")]
    InvalidSocketCount { room: String, value: String },

    /// Warning threshold was negative or not a finite number.
    #[error("invalid warning threshold \"{0}\" (must be a number >= 0)")]
    InvalidThreshold(String),

    /// A required CSV column is absent from the header row.
    #[error("column \"{0}\" is missing from the CSV header")]
    MissingField(&'static str),

    /// A CSV cell could not be parsed into a timestamp or a number.
    #[error("row {row}: cannot parse {field} value \"{value}\"")]
    Parse {
        /// 1-based data row (the header is not counted).
        row: usize,
        field: &'static str,
        value: String,
    },

    /// Phase index outside `1..=3`.
    #[error("invalid phase index {0} (expected 1, 2 or 3)")]
    InvalidPhase(u8),

    /// Simulation bounds with `lower > upper`.
    #[error("invalid load bounds [{lower}, {upper}] (lower must be <= upper)")]
    InvalidBounds { lower: u32, upper: u32 },

    /// Room name listed twice when building a registry.
    #[error("room \"{0}\" is listed more than once")]
    DuplicateRoom(String),

    /// Malformed CSV structure (ragged rows, invalid UTF-8).
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The import source could not be opened or read.
    #[error("cannot read history source: {0}")]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = MonitorError> = std::result::Result<T, E>;
