//! Monitoring session: the caller-held registry, random source, and settings.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::config::MonitorConfig;
use crate::error::{MonitorError, Result};
use crate::model::{RoomRegistry, SocketChange};

/// Drives one monitoring session for a front end.
///
/// Owns the registry and a seeded RNG so two sessions built from the same
/// configuration produce identical simulated readings. This is the only layer
/// that logs; the model reports through its `Result`s.
pub struct Monitor {
    config: MonitorConfig,
    registry: RoomRegistry,
    rng: StdRng,
    ticks: u64,
}

impl Monitor {
    /// Builds a session from a configuration.
    ///
    /// # Errors
    ///
    /// Propagates [`MonitorConfig::build_registry`] failures.
    pub fn from_config(config: MonitorConfig) -> Result<Self> {
        let registry = config.build_registry()?;
        let rng = StdRng::seed_from_u64(config.simulation.seed);
        info!(
            rooms = registry.len(),
            seed = config.simulation.seed,
            threshold_w = registry.warning_threshold(),
            "monitor session created"
        );
        Ok(Self {
            config,
            registry,
            rng,
            ticks: 0,
        })
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Number of completed simulation updates.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulates one new reading for every room.
    ///
    /// # Errors
    ///
    /// Fails only if the configured bounds are inverted.
    pub fn tick(&mut self) -> Result<()> {
        let sim = &self.config.simulation;
        self.registry
            .simulate_all(&mut self.rng, sim.lower_w, sim.upper_w)?;
        self.ticks += 1;

        let over = self.rooms_over_threshold();
        debug!(tick = self.ticks, over = over.len(), "rooms updated");
        for room in over {
            warn!(room, threshold_w = self.registry.warning_threshold(), "room over warning threshold");
        }
        Ok(())
    }

    /// Changes a room's socket count.
    ///
    /// # Errors
    ///
    /// See [`RoomRegistry::set_socket_count`].
    pub fn set_sockets(&mut self, room: &str, count: i64) -> Result<SocketChange> {
        match self.registry.set_socket_count(room, count) {
            Ok(change) => {
                info!(room = %change.room, sockets = change.current.get(), "socket count changed");
                Ok(change)
            }
            Err(e) => {
                warn!(room, count, error = %e, "socket change rejected");
                Err(e)
            }
        }
    }

    /// Changes the shared warning threshold.
    ///
    /// # Errors
    ///
    /// See [`RoomRegistry::set_warning_threshold`].
    pub fn set_threshold(&mut self, value: f64) -> Result<()> {
        self.registry
            .set_warning_threshold(value)
            .inspect(|_| info!(threshold_w = value, "warning threshold changed"))
            .inspect_err(|e| warn!(error = %e, "threshold change rejected"))
    }

    /// Imports one CSV file into the history of every room.
    ///
    /// Returns the number of imported rows.
    ///
    /// # Errors
    ///
    /// I/O, header, and parse failures; no room changes on error.
    pub fn import_file(&mut self, path: &Path) -> Result<usize> {
        let result = File::open(path)
            .map_err(MonitorError::from)
            .and_then(|file| self.registry.import_all(BufReader::new(file)));
        match result {
            Ok(rows) => {
                info!(path = %path.display(), rows, "history imported into all rooms");
                Ok(rows)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "history import failed");
                Err(e)
            }
        }
    }

    /// Names of rooms currently above the warning threshold, in room order.
    pub fn rooms_over_threshold(&self) -> Vec<&str> {
        self.registry
            .list_rooms()
            .filter(|name| self.registry.is_over_threshold(name).unwrap_or(false))
            .collect()
    }
}
