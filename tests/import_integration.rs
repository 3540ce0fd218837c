//! Integration tests for CSV history import.

mod common;

use std::fs::File;
use std::io::{BufReader, Write};

use phase_monitor::error::MonitorError;
use phase_monitor::io::import::read_history_file;
use phase_monitor::model::{Phase, PhaseReading, Room, RoomRegistry};

fn open_fixture(name: &str) -> BufReader<File> {
    BufReader::new(File::open(common::fixture(name)).expect("fixture exists"))
}

#[test]
fn valid_file_replaces_longer_history_in_file_order() {
    let mut room = Room::new("Kitchen");
    for i in 0..10 {
        room.update_usage(f64::from(i), 0.0, 0.0);
    }

    room.import_history(open_fixture("history.csv"))
        .expect("fixture is valid");

    assert_eq!(room.history().len(), 3);
    let l2: Vec<f64> = room.latest_by_phase(Phase::L2).map(|s| s.value).collect();
    assert_eq!(l2, vec![95.0, 310.0, 102.0]);
    assert_eq!(room.history()[2].reading, PhaseReading::new(88.0, 102.0, 97.5));
    assert_eq!(
        room.history()[0].timestamp.format("%H:%M").to_string(),
        "08:00"
    );
}

#[test]
fn import_keeps_current_reading() {
    let mut room = Room::new("Kitchen");
    room.update_usage(1.0, 2.0, 3.0);
    room.import_history(open_fixture("history.csv"))
        .expect("fixture is valid");
    assert_eq!(room.current_reading(), PhaseReading::new(1.0, 2.0, 3.0));
}

#[test]
fn missing_phase2_is_named_and_history_kept() {
    let mut room = Room::new("Kitchen");
    room.update_usage(5.0, 5.0, 5.0);
    let before = room.history().to_vec();

    let err = room
        .import_history(open_fixture("missing_phase2.csv"))
        .unwrap_err();

    assert!(matches!(err, MonitorError::MissingField("Phase2")));
    assert_eq!(room.history(), before.as_slice());
}

#[test]
fn registry_import_reaches_every_room() {
    let mut reg = RoomRegistry::default();
    let rows = reg
        .import_all(open_fixture("history.csv"))
        .expect("fixture is valid");
    assert_eq!(rows, 3);
    for room in reg.rooms() {
        assert_eq!(room.history().len(), 3);
    }
}

#[test]
fn unparseable_time_in_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "Time,Phase1,Phase2,Phase3").expect("write");
    writeln!(file, "2024-03-01 08:00:00,1,2,3").expect("write");
    writeln!(file, "not a time,1,2,3").expect("write");

    match read_history_file(file.path()) {
        Err(MonitorError::Parse { row, field, value }) => {
            assert_eq!((row, field, value.as_str()), (2, "Time", "not a time"));
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = read_history_file(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, MonitorError::Io(_)));
}

#[test]
fn ragged_rows_are_rejected() {
    let mut reg = RoomRegistry::default();
    let csv = "Time,Phase1,Phase2,Phase3\n2024-03-01 08:00:00,1,2\n";
    assert!(matches!(
        reg.import_all(csv.as_bytes()),
        Err(MonitorError::Csv(_))
    ));
    assert!(reg.rooms().iter().all(|r| r.history().is_empty()));
}
