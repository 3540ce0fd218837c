//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use phase_monitor::model::{LoadSource, RoomRegistry, Sockets};

/// Path to a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load source that replays a fixed cycle of values, ignoring the bounds.
pub struct Scripted {
    values: Vec<u32>,
    pub draws: usize,
}

impl Scripted {
    pub fn new(values: &[u32]) -> Self {
        Self {
            values: values.to_vec(),
            draws: 0,
        }
    }
}

impl LoadSource for Scripted {
    fn draw_watts(&mut self, _lower: u32, _upper: u32) -> u32 {
        let v = self.values[self.draws % self.values.len()];
        self.draws += 1;
        v
    }
}

/// Single-room registry with the reference 300 W threshold.
pub fn kitchen_only() -> RoomRegistry {
    RoomRegistry::new(["Kitchen"], Sockets::ONE, 300.0).expect("kitchen registry")
}
