//! TUI application state and the actions bound to keys.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::model::{Phase, Room};
use crate::runner::Monitor;

/// Maximum number of samples drawn in the chart.
pub const MAX_CHART_POINTS: usize = 200;

/// Highest socket count offered by the controls.
pub const MAX_SOCKETS: i64 = 5;

/// Threshold change per key press, in watts.
pub const THRESHOLD_STEP_W: f64 = 10.0;

/// Outcome of the last user action, shown in the status line.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// TUI application state.
pub struct App {
    monitor: Monitor,
    /// CSV file offered for import, from `--import`.
    import_path: Option<PathBuf>,
    /// Name of the active preset.
    pub preset_name: String,
    /// Index of the highlighted room in registry order.
    pub selected: usize,
    /// Phase shown in the chart.
    pub phase: Phase,
    /// Whether automatic updates are paused.
    pub paused: bool,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// When the last automatic update ran.
    pub last_tick: Instant,
    /// Last confirmation or error.
    pub status: Option<StatusMessage>,
}

impl App {
    pub fn new(monitor: Monitor, preset: &str, import_path: Option<PathBuf>) -> Self {
        Self {
            monitor,
            import_path,
            preset_name: preset.to_string(),
            selected: 0,
            phase: Phase::L1,
            paused: false,
            quit: false,
            last_tick: Instant::now(),
            status: None,
        }
    }

    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    /// Interval between automatic updates.
    pub fn tick_interval_ms(&self) -> u64 {
        self.monitor.config().simulation.tick_ms
    }

    /// Time left before the next automatic update, zero when overdue.
    pub fn until_next_update(&self, now: Instant) -> Duration {
        let deadline = self.last_tick + Duration::from_millis(self.tick_interval_ms());
        deadline.saturating_duration_since(now)
    }

    /// Whether the timer has expired and updates are not paused.
    pub fn update_due(&self, now: Instant) -> bool {
        !self.paused && self.until_next_update(now).is_zero()
    }

    /// Runs one simulated update; failures land in the status line.
    pub fn tick(&mut self) {
        if let Err(e) = self.monitor.tick() {
            self.status = Some(StatusMessage::Error(e.to_string()));
        }
    }

    /// Update triggered by the user rather than the timer.
    pub fn manual_update(&mut self) {
        self.tick();
        if !matches!(self.status, Some(StatusMessage::Error(_))) {
            self.status = Some(StatusMessage::Info("consumption updated".to_string()));
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn selected_room(&self) -> Option<&Room> {
        self.monitor.registry().rooms().get(self.selected)
    }

    pub fn select_next(&mut self) {
        let count = self.monitor.registry().len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn select_prev(&mut self) {
        let count = self.monitor.registry().len();
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
        }
    }

    pub fn select_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Adds `delta` sockets to the selected room, capped at [`MAX_SOCKETS`].
    pub fn adjust_sockets(&mut self, delta: i64) {
        let Some(room) = self.selected_room() else {
            return;
        };
        let name = room.name().to_string();
        let target = i64::from(room.sockets().get()) + delta;
        if target > MAX_SOCKETS {
            self.status = Some(StatusMessage::Error(format!(
                "{name} already has the maximum of {MAX_SOCKETS} sockets"
            )));
            return;
        }
        self.status = Some(match self.monitor.set_sockets(&name, target) {
            Ok(change) => StatusMessage::Info(change.to_string()),
            Err(e) => StatusMessage::Error(e.to_string()),
        });
    }

    /// Moves the warning threshold by `delta` watts.
    pub fn adjust_threshold(&mut self, delta: f64) {
        let target = self.monitor.registry().warning_threshold() + delta;
        self.status = Some(match self.monitor.set_threshold(target) {
            Ok(()) => StatusMessage::Info(format!("warning threshold set to {target:.0} W")),
            Err(e) => StatusMessage::Error(e.to_string()),
        });
    }

    /// Imports the `--import` file into every room.
    pub fn import(&mut self) {
        let Some(path) = self.import_path.clone() else {
            self.status = Some(StatusMessage::Error(
                "no CSV file to import (start with --import <path>)".to_string(),
            ));
            return;
        };
        self.status = Some(match self.monitor.import_file(&path) {
            Ok(rows) => StatusMessage::Info(format!(
                "imported {rows} rows from {} into all rooms",
                path.display()
            )),
            Err(e) => StatusMessage::Error(e.to_string()),
        });
    }

    /// Chart points for the selected room and phase: seconds since the first
    /// plotted sample against watts.
    pub fn chart_points(&self) -> Vec<(f64, f64)> {
        let Some(room) = self.selected_room() else {
            return Vec::new();
        };
        let series = room.latest_by_phase(self.phase);
        let skip = series.len().saturating_sub(MAX_CHART_POINTS);
        let mut samples = series.skip(skip).peekable();
        let Some(origin) = samples.peek().map(|s| s.timestamp) else {
            return Vec::new();
        };
        samples
            .map(|s| {
                let secs = (s.timestamp - origin).num_milliseconds() as f64 / 1000.0;
                (secs, s.value)
            })
            .collect()
    }
}
