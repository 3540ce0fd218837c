//! Room registry: the ordered set of rooms and the shared warning threshold.

use std::io::Read;

use crate::error::{MonitorError, Result};
use crate::io::import::read_history;

use super::room::Room;
use super::source::LoadSource;
use super::types::{SocketChange, Sockets};

/// Rooms created by [`RoomRegistry::default`].
pub const DEFAULT_ROOMS: [&str; 4] = ["Kitchen", "Living Room", "Bedroom", "Bathroom"];

/// Warning threshold used by [`RoomRegistry::default`], in watts.
pub const DEFAULT_WARNING_THRESHOLD_W: f64 = 300.0;

/// Owns every room for the lifetime of a monitoring session.
///
/// Rooms are fixed at construction and kept in insertion order; only their
/// sockets, readings, and history change afterwards.
#[derive(Debug, Clone)]
pub struct RoomRegistry {
    rooms: Vec<Room>,
    warning_threshold: f64,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self {
            rooms: DEFAULT_ROOMS.iter().map(|name| Room::new(*name)).collect(),
            warning_threshold: DEFAULT_WARNING_THRESHOLD_W,
        }
    }
}

impl RoomRegistry {
    /// Builds a registry from room names, each starting with `sockets`.
    ///
    /// # Errors
    ///
    /// * [`MonitorError::DuplicateRoom`] if a name appears twice.
    /// * [`MonitorError::InvalidThreshold`] if `warning_threshold` is rejected
    ///   by [`RoomRegistry::set_warning_threshold`].
    pub fn new<I, S>(names: I, sockets: Sockets, warning_threshold: f64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self {
            rooms: Vec::new(),
            warning_threshold: 0.0,
        };
        for name in names {
            let name = name.into();
            if registry.position(&name).is_some() {
                return Err(MonitorError::DuplicateRoom(name));
            }
            registry.rooms.push(Room::with_sockets(name, sockets));
        }
        registry.set_warning_threshold(warning_threshold)?;
        Ok(registry)
    }

    /// Room names in insertion order.
    pub fn list_rooms(&self) -> impl Iterator<Item = &str> + '_ {
        self.rooms.iter().map(Room::name)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Looks up a room by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::UnknownRoom`] if no room has that name.
    pub fn room(&self, name: &str) -> Result<&Room> {
        self.rooms
            .iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| MonitorError::UnknownRoom(name.to_string()))
    }

    fn room_mut(&mut self, name: &str) -> Result<&mut Room> {
        self.rooms
            .iter_mut()
            .find(|r| r.name() == name)
            .ok_or_else(|| MonitorError::UnknownRoom(name.to_string()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.rooms.iter().position(|r| r.name() == name)
    }

    /// Changes the socket count of one room.
    ///
    /// The room is resolved before the count is checked, so an unknown room
    /// is reported even when the count is also invalid.
    ///
    /// # Errors
    ///
    /// * [`MonitorError::UnknownRoom`] if `room` is not registered.
    /// * [`MonitorError::InvalidSocketCount`] if `count < 1` or does not fit
    ///   in a `u32`.
    pub fn set_socket_count(&mut self, room: &str, count: i64) -> Result<SocketChange> {
        let target = self.room_mut(room)?;
        let sockets = u32::try_from(count)
            .ok()
            .and_then(Sockets::new)
            .ok_or_else(|| MonitorError::InvalidSocketCount {
                room: room.to_string(),
                value: count.to_string(),
            })?;
        let previous = target.set_sockets(sockets);
        Ok(SocketChange {
            room: room.to_string(),
            previous,
            current: sockets,
        })
    }

    /// Draws a fresh reading for every room.
    ///
    /// Each room gets three independent draws in `[lower, upper]`, each
    /// multiplied by the room's socket count, in registry order.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::InvalidBounds`] when `lower > upper`; no room
    /// is updated in that case.
    pub fn simulate_all(
        &mut self,
        mut source: impl LoadSource,
        lower: u32,
        upper: u32,
    ) -> Result<()> {
        if lower > upper {
            return Err(MonitorError::InvalidBounds { lower, upper });
        }
        for room in &mut self.rooms {
            let factor = f64::from(room.sockets().get());
            let mut draw = || f64::from(source.draw_watts(lower, upper)) * factor;
            let (l1, l2, l3) = (draw(), draw(), draw());
            room.update_usage(l1, l2, l3);
        }
        Ok(())
    }

    pub fn warning_threshold(&self) -> f64 {
        self.warning_threshold
    }

    /// Sets the shared warning threshold in watts.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::InvalidThreshold`] for negative, NaN, or
    /// infinite values.
    pub fn set_warning_threshold(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(MonitorError::InvalidThreshold(value.to_string()));
        }
        self.warning_threshold = value;
        Ok(())
    }

    /// Returns `true` when any current phase value is strictly above the
    /// warning threshold.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::UnknownRoom`] if `room` is not registered.
    pub fn is_over_threshold(&self, room: &str) -> Result<bool> {
        let reading = self.room(room)?.current_reading();
        Ok(reading.max_phase() > self.warning_threshold)
    }

    /// Replaces the history of every room with the same CSV data.
    ///
    /// The source is parsed once; if it fails no room is modified.
    ///
    /// # Errors
    ///
    /// See [`crate::io::import::read_history`].
    pub fn import_all(&mut self, source: impl Read) -> Result<usize> {
        let records = read_history(source)?;
        let rows = records.len();
        for room in &mut self.rooms {
            room.import_records(records.clone());
        }
        Ok(rows)
    }
}

/// Parses text input for [`RoomRegistry::set_warning_threshold`].
///
/// # Errors
///
/// Returns [`MonitorError::InvalidThreshold`] carrying the raw text when it is
/// not a number.
pub fn parse_threshold(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| MonitorError::InvalidThreshold(raw.to_string()))
}

/// Parses text input for [`RoomRegistry::set_socket_count`].
///
/// # Errors
///
/// Returns [`MonitorError::InvalidSocketCount`] for `room` when the text is not
/// an integer. Range checks are left to `set_socket_count`.
pub fn parse_socket_count(room: &str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| MonitorError::InvalidSocketCount {
            room: room.to_string(),
            value: raw.to_string(),
        })
}
