//! A monitored room: current three-phase reading plus its history log.

use std::io::Read;
use std::slice;

use chrono::{Local, NaiveDateTime};

use crate::error::Result;
use crate::io::import::read_history;

use super::types::{HistoryRecord, Phase, PhaseReading, PhaseSample, Sockets};

/// A room whose power draw is tracked per phase.
///
/// The history is append-only: [`Room::update_usage`] pushes exactly one
/// record, and only a successful import replaces the log wholesale.
///
/// # Examples
///
/// ```
/// use phase_monitor::model::{Phase, Room};
///
/// let mut kitchen = Room::new("Kitchen");
/// kitchen.update_usage(120.0, 80.0, 95.0);
///
/// assert_eq!(kitchen.history().len(), 1);
/// let l2: Vec<f64> = kitchen.latest_by_phase(Phase::L2).map(|s| s.value).collect();
/// assert_eq!(l2, vec![80.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Room {
    name: String,
    sockets: Sockets,
    current: PhaseReading,
    history: Vec<HistoryRecord>,
    /// Stamp of the last live append; imported rows do not count.
    last_appended: Option<NaiveDateTime>,
}

impl Room {
    /// Creates a room with one socket, a zero reading, and empty history.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_sockets(name, Sockets::ONE)
    }

    pub fn with_sockets(name: impl Into<String>, sockets: Sockets) -> Self {
        Self {
            name: name.into(),
            sockets,
            current: PhaseReading::default(),
            history: Vec::new(),
            last_appended: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sockets(&self) -> Sockets {
        self.sockets
    }

    pub(crate) fn set_sockets(&mut self, sockets: Sockets) -> Sockets {
        std::mem::replace(&mut self.sockets, sockets)
    }

    /// Most recent reading; zero before the first update.
    pub fn current_reading(&self) -> PhaseReading {
        self.current
    }

    /// Full history, oldest record first.
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// Records a new reading stamped with the local wall clock.
    pub fn update_usage(&mut self, l1: f64, l2: f64, l3: f64) {
        self.update_usage_at(Local::now().naive_local(), PhaseReading::new(l1, l2, l3));
    }

    /// Records a reading with an explicit timestamp.
    ///
    /// A stamp earlier than the previous append is raised to that stamp so
    /// appended readings never go backwards. Imported rows are not compared.
    pub fn update_usage_at(&mut self, timestamp: NaiveDateTime, reading: PhaseReading) {
        let timestamp = match self.last_appended {
            Some(last) if last > timestamp => last,
            _ => timestamp,
        };
        self.last_appended = Some(timestamp);
        self.current = reading;
        self.history.push(HistoryRecord { timestamp, reading });
    }

    /// Replaces the whole history with the rows of a CSV source.
    ///
    /// The current reading is left as it was. On error the existing history
    /// is untouched.
    ///
    /// # Errors
    ///
    /// See [`crate::io::import::read_history`].
    pub fn import_history(&mut self, source: impl Read) -> Result<()> {
        let records = read_history(source)?;
        self.import_records(records);
        Ok(())
    }

    /// Replaces the whole history with already validated records.
    pub fn import_records(&mut self, records: Vec<HistoryRecord>) {
        self.history = records;
        self.last_appended = None;
    }

    /// Time series of one phase, oldest first.
    ///
    /// The iterator borrows the history, so calling this again starts over
    /// from the first record.
    pub fn latest_by_phase(&self, phase: Phase) -> PhaseSeries<'_> {
        PhaseSeries {
            records: self.history.iter(),
            phase,
        }
    }
}

/// Lazy per-phase view over a room's history.
#[derive(Debug, Clone)]
pub struct PhaseSeries<'a> {
    records: slice::Iter<'a, HistoryRecord>,
    phase: Phase,
}

impl Iterator for PhaseSeries<'_> {
    type Item = PhaseSample;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(|r| PhaseSample {
            timestamp: r.timestamp,
            value: r.reading.get(self.phase),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for PhaseSeries<'_> {}

impl DoubleEndedIterator for PhaseSeries<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.records.next_back().map(|r| PhaseSample {
            timestamp: r.timestamp,
            value: r.reading.get(self.phase),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MonitorError;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn new_room_is_idle() {
        let room = Room::new("Bedroom");
        assert_eq!(room.name(), "Bedroom");
        assert_eq!(room.sockets(), Sockets::ONE);
        assert_eq!(room.current_reading(), PhaseReading::default());
        assert!(room.history().is_empty());
    }

    #[test]
    fn update_appends_one_record_and_tracks_current() {
        let mut room = Room::new("Kitchen");
        for i in 0..5 {
            let before = room.history().len();
            let v = f64::from(i) * 10.0;
            room.update_usage(v, v + 1.0, v + 2.0);
            assert_eq!(room.history().len(), before + 1);
            let last = room.history().last().map(|r| r.reading);
            assert_eq!(last, Some(room.current_reading()));
        }
        assert_eq!(room.current_reading(), PhaseReading::new(40.0, 41.0, 42.0));
    }

    #[test]
    fn timestamps_never_go_backwards() {
        let mut room = Room::new("Kitchen");
        room.update_usage_at(at("2024-03-01 12:00:00"), PhaseReading::new(1.0, 1.0, 1.0));
        room.update_usage_at(at("2024-03-01 11:00:00"), PhaseReading::new(2.0, 2.0, 2.0));
        let stamps: Vec<_> = room.history().iter().map(|r| r.timestamp).collect();
        assert_eq!(stamps, vec![at("2024-03-01 12:00:00"); 2]);
        assert_eq!(room.current_reading().l1, 2.0);
    }

    #[test]
    fn live_stamps_ignore_future_imported_rows() {
        let mut room = Room::new("Kitchen");
        let csv = "Time,Phase1,Phase2,Phase3\n2099-01-01 00:00:00,1,2,3\n";
        room.import_history(csv.as_bytes()).unwrap();

        let before = Local::now().naive_local();
        room.update_usage(4.0, 5.0, 6.0);
        room.update_usage(7.0, 8.0, 9.0);
        let after = Local::now().naive_local();

        let stamps: Vec<_> = room.history().iter().map(|r| r.timestamp).collect();
        assert_eq!(stamps[0], at("2099-01-01 00:00:00"));
        for stamp in &stamps[1..] {
            assert!((before..=after).contains(stamp), "{stamp} is not wall-clock time");
        }
        assert!(stamps[1] <= stamps[2]);
    }

    #[test]
    fn import_resets_the_append_clamp() {
        let mut room = Room::new("Kitchen");
        room.update_usage_at(at("2024-03-01 12:00:00"), PhaseReading::new(1.0, 1.0, 1.0));
        let csv = "Time,Phase1,Phase2,Phase3\n2024-03-01 09:00:00,1,2,3\n";
        room.import_history(csv.as_bytes()).unwrap();

        room.update_usage_at(at("2024-03-01 10:00:00"), PhaseReading::new(2.0, 2.0, 2.0));
        assert_eq!(
            room.history().last().map(|r| r.timestamp),
            Some(at("2024-03-01 10:00:00"))
        );
    }

    #[test]
    fn import_replaces_history_but_keeps_current() {
        let mut room = Room::new("Kitchen");
        for _ in 0..4 {
            room.update_usage(7.0, 8.0, 9.0);
        }
        let csv = "Time,Phase1,Phase2,Phase3\n\
                   2024-03-01 10:00:00,1,2,3\n\
                   2024-03-01 10:01:00,4,5,6\n\
                   2024-03-01 10:02:00,7,8,9.5\n";
        room.import_history(csv.as_bytes()).unwrap();

        assert_eq!(room.history().len(), 3);
        assert_eq!(room.history()[0].reading, PhaseReading::new(1.0, 2.0, 3.0));
        assert_eq!(room.history()[2].reading.l3, 9.5);
        assert_eq!(room.current_reading(), PhaseReading::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn failed_import_leaves_history_alone() {
        let mut room = Room::new("Kitchen");
        room.update_usage(1.0, 2.0, 3.0);
        let before = room.history().to_vec();

        let csv = "Time,Phase1,Phase3\n2024-03-01 10:00:00,1,3\n";
        let err = room.import_history(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, MonitorError::MissingField("Phase2")));
        assert_eq!(room.history(), before.as_slice());
    }

    #[test]
    fn phase_series_is_restartable() {
        let mut room = Room::new("Kitchen");
        room.update_usage_at(at("2024-03-01 10:00:00"), PhaseReading::new(1.0, 10.0, 100.0));
        room.update_usage_at(at("2024-03-01 10:05:00"), PhaseReading::new(2.0, 20.0, 200.0));

        let series = room.latest_by_phase(Phase::L3);
        assert_eq!(series.len(), 2);
        let first: Vec<f64> = series.clone().map(|s| s.value).collect();
        let second: Vec<f64> = series.map(|s| s.value).collect();
        assert_eq!(first, vec![100.0, 200.0]);
        assert_eq!(first, second);

        let again = room.latest_by_phase(Phase::L3).next();
        assert_eq!(again.map(|s| s.timestamp), Some(at("2024-03-01 10:00:00")));
    }
}
