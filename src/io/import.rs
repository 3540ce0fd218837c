//! CSV import of room consumption history.
//!
//! The expected layout is a header row with `Time`, `Phase1`, `Phase2` and
//! `Phase3` columns followed by one row per history record, oldest first.
//! Header matching ignores case and surrounding whitespace; extra columns are
//! ignored. Rows are kept in file order and never re-sorted.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::error::{MonitorError, Result};
use crate::model::types::{HistoryRecord, PhaseReading};

/// Canonical names of the required columns, in schema order.
pub const REQUIRED_FIELDS: [&str; 4] = ["Time", "Phase1", "Phase2", "Phase3"];

/// Naive date-time layouts tried after RFC 3339.
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Column positions of the required fields within a header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    time: usize,
    phases: [usize; 3],
}

/// Reads and validates a complete history from any CSV source.
///
/// # Errors
///
/// * [`MonitorError::MissingField`] naming the first required column absent
///   from the header.
/// * [`MonitorError::Parse`] for the first time or phase cell that does not
///   parse. Phase values must be finite and non-negative.
/// * [`MonitorError::Csv`] for structurally broken input.
pub fn read_history(source: impl Read) -> Result<Vec<HistoryRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let columns = locate_columns(rdr.headers()?)?;

    let mut records = Vec::new();
    for (idx, row) in rdr.records().enumerate() {
        let row = row?;
        let row_no = idx + 1;

        let raw_time = row.get(columns.time).unwrap_or("");
        let timestamp = parse_timestamp(raw_time).ok_or_else(|| MonitorError::Parse {
            row: row_no,
            field: REQUIRED_FIELDS[0],
            value: raw_time.to_string(),
        })?;

        let mut watts = [0.0_f64; 3];
        for (slot, (&col, &field)) in watts
            .iter_mut()
            .zip(columns.phases.iter().zip(&REQUIRED_FIELDS[1..]))
        {
            let raw = row.get(col).unwrap_or("");
            *slot = parse_watts(raw).ok_or_else(|| MonitorError::Parse {
                row: row_no,
                field,
                value: raw.to_string(),
            })?;
        }

        records.push(HistoryRecord {
            timestamp,
            reading: PhaseReading::new(watts[0], watts[1], watts[2]),
        });
    }

    Ok(records)
}

/// Opens `path` and reads a history from it.
///
/// # Errors
///
/// Returns [`MonitorError::Io`] if the file cannot be opened, otherwise the
/// same errors as [`read_history`].
pub fn read_history_file(path: &Path) -> Result<Vec<HistoryRecord>> {
    let file = File::open(path)?;
    read_history(BufReader::new(file))
}

fn locate_columns(headers: &csv::StringRecord) -> Result<Columns> {
    let find = |field: &'static str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(field))
            .ok_or(MonitorError::MissingField(field))
    };

    Ok(Columns {
        time: find(REQUIRED_FIELDS[0])?,
        phases: [
            find(REQUIRED_FIELDS[1])?,
            find(REQUIRED_FIELDS[2])?,
            find(REQUIRED_FIELDS[3])?,
        ],
    })
}

/// Parses a timestamp in any of the accepted layouts.
///
/// Offset-carrying RFC 3339 values are converted to local wall-clock time so
/// they line up with readings stamped by `Room::update_usage`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn parse_watts(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn reads_rows_in_file_order() {
        let csv = "Time,Phase1,Phase2,Phase3\n\
                   2024-03-01 12:00:00,100,110,120\n\
                   2024-03-01 11:00:00,50,60,70\n";
        let records = read_history(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        // no re-sorting
        assert_eq!(records[0].timestamp, ts("2024-03-01 12:00:00"));
        assert_eq!(records[1].reading, PhaseReading::new(50.0, 60.0, 70.0));
    }

    #[test]
    fn header_match_ignores_case_whitespace_and_order() {
        let csv = " phase3 ,extra, TIME,Phase1 ,phase2\n30,x,2024-03-01 08:15,10,20\n";
        let records = read_history(csv.as_bytes()).unwrap();
        assert_eq!(records[0].reading, PhaseReading::new(10.0, 20.0, 30.0));
        assert_eq!(records[0].timestamp, ts("2024-03-01 08:15:00"));
    }

    #[test]
    fn missing_column_is_named() {
        let csv = "Time,Phase1,Phase3\n2024-03-01 12:00:00,1,3\n";
        let err = read_history(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, MonitorError::MissingField("Phase2")));
        assert!(err.to_string().contains("Phase2"));
    }

    #[test]
    fn empty_source_reports_time_missing() {
        let err = read_history("".as_bytes()).unwrap_err();
        assert!(matches!(err, MonitorError::MissingField("Time")));
    }

    #[test]
    fn bad_time_reports_row_and_value() {
        let csv = "Time,Phase1,Phase2,Phase3\n\
                   2024-03-01 12:00:00,1,2,3\n\
                   yesterday,1,2,3\n";
        match read_history(csv.as_bytes()) {
            Err(MonitorError::Parse { row, field, value }) => {
                assert_eq!(row, 2);
                assert_eq!(field, "Time");
                assert_eq!(value, "yesterday");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn bad_phase_value_is_rejected() {
        let csv = "Time,Phase1,Phase2,Phase3\n2024-03-01 12:00:00,1,abc,3\n";
        assert!(matches!(
            read_history(csv.as_bytes()),
            Err(MonitorError::Parse { field: "Phase2", .. })
        ));

        let negative = "Time,Phase1,Phase2,Phase3\n2024-03-01 12:00:00,1,2,-3\n";
        assert!(matches!(
            read_history(negative.as_bytes()),
            Err(MonitorError::Parse { field: "Phase3", .. })
        ));
    }

    #[test]
    fn accepted_timestamp_layouts() {
        assert_eq!(
            parse_timestamp("2024-03-01T12:30:00.250"),
            NaiveDateTime::parse_from_str("2024-03-01 12:30:00.250", "%Y-%m-%d %H:%M:%S%.f").ok()
        );
        assert_eq!(parse_timestamp("2024-03-01"), Some(ts("2024-03-01 00:00:00")));
        assert!(parse_timestamp("2024-03-01T12:30:00+02:00").is_some());
        assert!(parse_timestamp("03/01/2024").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn header_only_source_is_empty_history() {
        let records = read_history("Time,Phase1,Phase2,Phase3\n".as_bytes()).unwrap();
        assert!(records.is_empty());
    }
}
