//! Value types for phase readings, history records, and socket counts.

use std::fmt;

use chrono::NaiveDateTime;

use crate::error::MonitorError;

/// One of the three supply phases tracked per room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    L1,
    L2,
    L3,
}

impl Phase {
    /// All phases in index order.
    pub const ALL: [Phase; 3] = [Phase::L1, Phase::L2, Phase::L3];

    /// Converts a 1-based phase index.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::InvalidPhase`] for anything outside `1..=3`.
    pub fn from_index(index: u8) -> Result<Self, MonitorError> {
        match index {
            1 => Ok(Self::L1),
            2 => Ok(Self::L2),
            3 => Ok(Self::L3),
            other => Err(MonitorError::InvalidPhase(other)),
        }
    }

    /// 1-based index of this phase.
    pub fn index(self) -> u8 {
        match self {
            Self::L1 => 1,
            Self::L2 => 2,
            Self::L3 => 3,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Phase {}", self.index())
    }
}

/// Instantaneous power draw on all three phases, in watts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseReading {
    pub l1: f64,
    pub l2: f64,
    pub l3: f64,
}

impl PhaseReading {
    pub fn new(l1: f64, l2: f64, l3: f64) -> Self {
        Self { l1, l2, l3 }
    }

    /// Value on a single phase.
    pub fn get(&self, phase: Phase) -> f64 {
        match phase {
            Phase::L1 => self.l1,
            Phase::L2 => self.l2,
            Phase::L3 => self.l3,
        }
    }

    /// Highest of the three phase values.
    pub fn max_phase(&self) -> f64 {
        self.l1.max(self.l2).max(self.l3)
    }
}

/// A timestamped reading stored in a room's history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub timestamp: NaiveDateTime,
    pub reading: PhaseReading,
}

/// A single point of a per-phase time series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSample {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// Number of active sockets in a room; always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sockets(u32);

impl Sockets {
    pub const ONE: Sockets = Sockets(1);

    /// Returns `None` for zero.
    pub fn new(count: u32) -> Option<Self> {
        (count >= 1).then_some(Self(count))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Sockets {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Sockets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Confirmation returned after a socket count change.
///
/// The core does not notify anyone; front ends turn this into a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketChange {
    pub room: String,
    pub previous: Sockets,
    pub current: Sockets,
}

impl fmt::Display for SocketChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sockets in {} set to {} (was {})",
            self.room, self.current, self.previous
        )
    }
}
