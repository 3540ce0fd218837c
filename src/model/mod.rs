//! Room consumption model: rooms, their history, and the registry.

/// Ordered room set with socket, simulation, and threshold operations.
pub mod registry;
/// Single room with current reading and append-only history.
pub mod room;
pub mod source;
pub mod types;

pub use registry::{RoomRegistry, parse_socket_count, parse_threshold};
pub use room::{PhaseSeries, Room};
pub use source::LoadSource;
pub use types::{HistoryRecord, Phase, PhaseReading, PhaseSample, SocketChange, Sockets};
