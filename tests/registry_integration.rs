//! Integration tests for room updates, socket scaling, and threshold checks.

mod common;

use common::Scripted;
use phase_monitor::error::MonitorError;
use phase_monitor::model::{Phase, PhaseReading, Room, RoomRegistry};

fn current(reg: &RoomRegistry, room: &str) -> PhaseReading {
    reg.room(room)
        .map(Room::current_reading)
        .expect("room exists")
}

#[test]
fn update_usage_grows_history_by_one() {
    let mut room = Room::new("Kitchen");
    let inputs = [(0.0, 0.0, 0.0), (12.5, 300.0, 7.0), (1e6, 2.0, 3.0)];
    for (i, &(a, b, c)) in inputs.iter().enumerate() {
        room.update_usage(a, b, c);
        assert_eq!(room.history().len(), i + 1);
        assert_eq!(
            room.history().last().map(|r| r.reading),
            Some(room.current_reading())
        );
    }
    let stamps: Vec<_> = room.history().iter().map(|r| r.timestamp).collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn stubbed_source_with_two_sockets() {
    let mut reg = common::kitchen_only();
    reg.set_socket_count("Kitchen", 2).expect("valid count");
    reg.simulate_all(Scripted::new(&[10, 20, 30]), 50, 150)
        .expect("valid bounds");
    assert_eq!(current(&reg, "Kitchen"), PhaseReading::new(20.0, 40.0, 60.0));
}

#[test]
fn zero_sockets_rejected_three_sockets_scale_every_phase() {
    let mut reg = RoomRegistry::default();
    assert!(matches!(
        reg.set_socket_count("Kitchen", 0),
        Err(MonitorError::InvalidSocketCount { .. })
    ));

    let change = reg.set_socket_count("Kitchen", 3).expect("valid count");
    assert_eq!(change.current.get(), 3);

    let mut src = Scripted::new(&[100, 110, 120]);
    for _ in 0..3 {
        reg.simulate_all(&mut src, 50, 150).expect("valid bounds");
        assert_eq!(current(&reg, "Kitchen"), PhaseReading::new(300.0, 330.0, 360.0));
        // other rooms keep one socket
        assert_eq!(current(&reg, "Bedroom"), PhaseReading::new(100.0, 110.0, 120.0));
    }
    assert_eq!(src.draws, 3 * 3 * reg.len());
}

#[test]
fn unknown_room_leaves_registry_unchanged() {
    let mut reg = RoomRegistry::default();
    reg.simulate_all(Scripted::new(&[70]), 50, 150).expect("valid bounds");
    let before = format!("{reg:?}");

    let err = reg.set_socket_count("Garage", 2).unwrap_err();
    assert!(matches!(err, MonitorError::UnknownRoom(ref name) if name == "Garage"));
    assert_eq!(err.to_string(), "unknown room \"Garage\"");
    assert_eq!(format!("{reg:?}"), before);
}

#[test]
fn threshold_equality_is_not_a_warning() {
    let mut reg = common::kitchen_only();

    reg.simulate_all(Scripted::new(&[300, 100, 50]), 0, 1000).expect("bounds");
    assert_eq!(reg.is_over_threshold("Kitchen").ok(), Some(false));

    reg.simulate_all(Scripted::new(&[301, 100, 50]), 0, 1000).expect("bounds");
    assert_eq!(reg.is_over_threshold("Kitchen").ok(), Some(true));

    reg.set_warning_threshold(301.0).expect("valid threshold");
    assert_eq!(reg.is_over_threshold("Kitchen").ok(), Some(false));
}

#[test]
fn idle_room_never_warns() {
    let reg = RoomRegistry::default();
    for name in reg.list_rooms() {
        assert_eq!(reg.is_over_threshold(name).ok(), Some(false));
    }
}

#[test]
fn threshold_rejects_negative_and_nan() {
    let mut reg = RoomRegistry::default();
    for bad in [-0.5, f64::NAN, f64::NEG_INFINITY] {
        assert!(matches!(
            reg.set_warning_threshold(bad),
            Err(MonitorError::InvalidThreshold(_))
        ));
    }
    assert_eq!(reg.warning_threshold(), 300.0);
}

#[test]
fn phase_series_reflects_simulated_history() {
    let mut reg = common::kitchen_only();
    let mut src = Scripted::new(&[1, 2, 3, 4, 5, 6]);
    reg.simulate_all(&mut src, 0, 10).expect("bounds");
    reg.simulate_all(&mut src, 0, 10).expect("bounds");

    let room = reg.room("Kitchen").expect("room exists");
    let l2: Vec<f64> = room.latest_by_phase(Phase::L2).map(|s| s.value).collect();
    assert_eq!(l2, vec![2.0, 5.0]);

    let phase = Phase::from_index(3).expect("valid index");
    let l3: Vec<f64> = room.latest_by_phase(phase).map(|s| s.value).collect();
    assert_eq!(l3, vec![3.0, 6.0]);
}
