//! CSV loading and export.
//!
//! Input files carry a time column and a vibration column. Columns are
//! identified by name when possible and by position otherwise:
//!
//! - time: `Time`, `time`, `TIME`, else the first column
//! - signal: `Vibration`, `vibration`, `VIBRATION`, `PRC_Normal`, `Signal`,
//!   else the second column
//!
//! Rows whose time or signal cell is not a finite number are dropped. The
//! time axis is carried along for export only; the decomposition uses sample
//! order.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::decomposition::Decomposition;
use crate::error::{ItdError, Result};
use crate::features::{component_label, ComponentFeatures, FeatureRecord};

/// Recognised names of the time column, in priority order.
pub const TIME_COLUMNS: [&str; 3] = ["Time", "time", "TIME"];

/// Recognised names of the signal column, in priority order.
pub const SIGNAL_COLUMNS: [&str; 5] =
    ["Vibration", "vibration", "VIBRATION", "PRC_Normal", "Signal"];

/// A signal together with its (display-only) time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedSignal {
    /// Time stamps, one per sample.
    pub time: Vec<f64>,
    /// Signal samples.
    pub values: Vec<f64>,
    /// Header of the column the time axis was read from.
    pub time_column: String,
    /// Header of the column the samples were read from.
    pub signal_column: String,
}

impl TimedSignal {
    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no row survived parsing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn find_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|name| headers.iter().position(|h| h == *name))
}

fn parse_cell(record: &csv::StringRecord, index: usize) -> Option<f64> {
    record
        .get(index)
        .and_then(|cell| cell.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Read a time axis and a signal from CSV data with a header row.
///
/// # Errors
///
/// Returns an input error for a file without header, [`ItdError::MissingColumn`]
/// when only one column exists and none is named like a signal, and
/// [`ItdError::Csv`] for malformed CSV.
///
/// # Example
///
/// ```
/// use itd_decomposition::io::load_signal;
///
/// let data = "Time,Vibration\n0.0,0.1\n0.1,oops\n0.2,0.12\n";
/// let signal = load_signal(data.as_bytes())?;
/// assert_eq!(signal.values, vec![0.1, 0.12]);
/// assert_eq!(signal.time, vec![0.0, 0.2]);
/// # Ok::<(), itd_decomposition::ItdError>(())
/// ```
pub fn load_signal<R: Read>(reader: R) -> Result<TimedSignal> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(ItdError::invalid_input("CSV data is empty"));
    }

    let time_idx = find_column(&headers, &TIME_COLUMNS).unwrap_or(0);
    let signal_idx = match find_column(&headers, &SIGNAL_COLUMNS) {
        Some(idx) => idx,
        None if headers.len() > 1 => 1,
        None => {
            return Err(ItdError::missing_column(
                "could not identify the vibration data column",
            ))
        }
    };

    let mut time = Vec::new();
    let mut values = Vec::new();
    let mut dropped = 0usize;

    for record in rdr.records() {
        let record = record?;
        match (parse_cell(&record, time_idx), parse_cell(&record, signal_idx)) {
            (Some(t), Some(v)) => {
                time.push(t);
                values.push(v);
            }
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!("dropped {dropped} non-finite row(s) while loading signal");
    }
    debug!(
        "loaded {} samples (time: {:?}, signal: {:?})",
        values.len(),
        &headers[time_idx],
        &headers[signal_idx]
    );

    Ok(TimedSignal {
        time,
        values,
        time_column: headers[time_idx].to_string(),
        signal_column: headers[signal_idx].to_string(),
    })
}

/// Read a signal from a CSV file on disk.
///
/// # Errors
///
/// See [`load_signal`]; also fails if the file cannot be opened.
pub fn load_signal_path<P: AsRef<Path>>(path: P) -> Result<TimedSignal> {
    load_signal(File::open(path)?)
}

/// Write one feature row per component.
///
/// # Errors
///
/// Returns [`ItdError::Csv`] if writing fails.
pub fn write_features_csv<W: Write>(writer: W, rows: &[ComponentFeatures]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["Component"];
    header.extend(FeatureRecord::COLUMNS);
    wtr.write_record(&header)?;

    for row in rows {
        let mut record = vec![row.label.clone()];
        record.extend(row.features.values().iter().map(f64::to_string));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write a single component next to its time axis.
///
/// # Errors
///
/// Returns [`ItdError::LengthMismatch`] when the lengths differ and
/// [`ItdError::Csv`] if writing fails.
pub fn write_component_csv<W: Write>(
    writer: W,
    time: &[f64],
    component: &[f64],
    label: &str,
) -> Result<()> {
    if time.len() != component.len() {
        return Err(ItdError::length_mismatch(component.len(), time.len()));
    }

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Time", label])?;
    for (t, v) in time.iter().zip(component) {
        wtr.write_record([t.to_string(), v.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write every component as a column next to the time axis.
///
/// # Errors
///
/// Returns [`ItdError::LengthMismatch`] when the time axis does not match the
/// decomposition and [`ItdError::Csv`] if writing fails.
pub fn write_decomposition_csv<W: Write>(
    writer: W,
    time: &[f64],
    decomposition: &Decomposition,
) -> Result<()> {
    if time.len() != decomposition.signal_len() {
        return Err(ItdError::length_mismatch(
            decomposition.signal_len(),
            time.len(),
        ));
    }

    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["Time".to_string()];
    header.extend((0..decomposition.len()).map(component_label));
    wtr.write_record(&header)?;

    for (i, t) in time.iter().enumerate() {
        let mut record = vec![t.to_string()];
        record.extend(decomposition.iter().map(|c| c[i].to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomposer::decompose;
    use crate::features::component_features;

    #[test]
    fn test_named_columns() {
        let data = "Index,Signal,Time\n0,1.5,0.0\n1,2.5,0.5\n";
        let s = load_signal(data.as_bytes()).unwrap();
        assert_eq!(s.values, vec![1.5, 2.5]);
        assert_eq!(s.time, vec![0.0, 0.5]);
        assert_eq!(s.time_column, "Time");
        assert_eq!(s.signal_column, "Signal");
    }

    #[test]
    fn test_positional_fallback() {
        let data = "t,amplitude,extra\n0,0.25,x\n1,0.5,y\n";
        let s = load_signal(data.as_bytes()).unwrap();
        assert_eq!(s.time_column, "t");
        assert_eq!(s.signal_column, "amplitude");
        assert_eq!(s.values, vec![0.25, 0.5]);
    }

    #[test]
    fn test_single_unnamed_column_is_rejected() {
        let data = "reading\n1\n2\n";
        assert!(matches!(
            load_signal(data.as_bytes()),
            Err(ItdError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = load_signal("".as_bytes()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_drops_non_numeric_and_short_rows() {
        let data = "Time,Vibration\n0,1\nabc,2\n2,NaN\n3\n4, 5 \n";
        let s = load_signal(data.as_bytes()).unwrap();
        assert_eq!(s.time, vec![0.0, 4.0]);
        assert_eq!(s.values, vec![1.0, 5.0]);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_drops_infinite_cells() {
        let data = "Time,Vibration\n0,1\n1,inf\n2,-inf\ninf,3\n4,2\n";
        let s = load_signal(data.as_bytes()).unwrap();
        assert_eq!(s.time, vec![0.0, 4.0]);
        assert_eq!(s.values, vec![1.0, 2.0]);
        assert!(decompose(&s.values, 3, 0.32).is_ok());
    }

    #[test]
    fn test_write_component_csv() {
        let mut out = Vec::new();
        write_component_csv(&mut out, &[0.0, 0.5], &[1.0, -1.0], "PRC_Normal").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Time,PRC_Normal\n0,1\n0.5,-1\n");
    }

    #[test]
    fn test_write_component_length_mismatch() {
        let mut out = Vec::new();
        let err = write_component_csv(&mut out, &[0.0], &[1.0, 2.0], "x").unwrap_err();
        assert!(matches!(err, ItdError::LengthMismatch { signal: 2, time: 1 }));
    }

    #[test]
    fn test_write_features_and_decomposition() {
        let x: Vec<f64> = (0..120).map(|i| (f64::from(i) * 0.5).sin()).collect();
        let time: Vec<f64> = (0..120).map(|i| f64::from(i) * 0.01).collect();
        let d = decompose(&x, 3, 0.32).unwrap();

        let mut features = Vec::new();
        write_features_csv(&mut features, &component_features(&d).unwrap()).unwrap();
        let text = String::from_utf8(features).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("Component,Mean,Max,Min,Standard Deviation"));
        assert_eq!(lines.count(), d.len());

        let mut table = Vec::new();
        write_decomposition_csv(&mut table, &time, &d).unwrap();
        let text = String::from_utf8(table).unwrap();
        let header = text.lines().next().unwrap();
        assert!(header.starts_with("Time,PRC_1"));
        assert_eq!(header.split(',').count(), d.len() + 1);
        assert_eq!(text.lines().count(), 121);
    }
}
