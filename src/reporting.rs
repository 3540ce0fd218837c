//! Plain-text rendering of room status and phase series.

use crate::model::{Phase, RoomRegistry};

/// Renders the room status table: name, sockets, phase readings, warning flag.
pub fn status_table(registry: &RoomRegistry) -> String {
    let width = registry
        .list_rooms()
        .map(str::len)
        .max()
        .unwrap_or(0)
        .max("Room".len());

    let header = format!(
        "{:<width$}  {:>7}  {:>10}  {:>10}  {:>10}  Warning",
        "Room", "Sockets", "Phase 1 W", "Phase 2 W", "Phase 3 W"
    );
    let rows = registry.rooms().iter().map(|room| {
        let r = room.current_reading();
        let flag = if registry.is_over_threshold(room.name()).unwrap_or(false) {
            "OVER"
        } else {
            "-"
        };
        format!(
            "{:<width$}  {:>7}  {:>10.1}  {:>10.1}  {:>10.1}  {flag}",
            room.name(),
            room.sockets(),
            r.l1,
            r.l2,
            r.l3,
        )
    });
    let footer = format!("Warning threshold: {:.1} W", registry.warning_threshold());

    std::iter::once(header)
        .chain(rows)
        .chain(std::iter::once(footer))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders one `timestamp,value` line per history record of a room phase.
///
/// Returns `None` if the room is unknown.
pub fn phase_series(registry: &RoomRegistry, room: &str, phase: Phase) -> Option<String> {
    let room = registry.room(room).ok()?;
    let title = format!("# {} - {}\n", room.name(), phase);
    let lines: String = room
        .latest_by_phase(phase)
        .map(|sample| {
            format!(
                "{},{}\n",
                sample.timestamp.format("%Y-%m-%d %H:%M:%S"),
                sample.value
            )
        })
        .collect();
    Some(title + &lines)
}
