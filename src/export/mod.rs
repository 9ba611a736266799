//! Column-oriented CSV output.
//!
//! Both pipelines produce a [`ColumnSet`]: one column of values per
//! calibration, one row per qualifying annotation. The writer emits the
//! columns sorted by name; the measure pipeline additionally leads with a
//! `name` column holding each measured line's label.
//!
//! # Number formatting
//!
//! Values are written with Rust's shortest round-trip representation
//! (`50.0`, `0.1`, `1e-7`), so parsing the text back yields the exact same
//! `f64`.
//!
//! # Empty output
//!
//! If there are no columns, or the columns hold no rows, nothing is written,
//! not even a header.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::PlotmeterError;

/// Named columns of calibrated values, iterated in name order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnSet {
    columns: BTreeMap<String, Vec<f64>>,
}

impl ColumnSet {
    /// Creates an empty column set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Column names in output order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.keys().map(String::as_str)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of rows shared by every column.
    ///
    /// # Errors
    /// Returns [`PlotmeterError::ColumnMismatch`] if the columns differ in
    /// length.
    pub fn row_count(&self) -> Result<usize, PlotmeterError> {
        let mut iter = self.columns.iter();
        let Some((_, first)) = iter.next() else {
            return Ok(0);
        };
        let expected = first.len();

        for (name, values) in iter {
            if values.len() != expected {
                return Err(PlotmeterError::ColumnMismatch {
                    column: name.clone(),
                    expected,
                    found: values.len(),
                });
            }
        }
        Ok(expected)
    }
}

impl FromIterator<(String, Vec<f64>)> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = (String, Vec<f64>)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

/// Measured line lengths plus the label of each measured line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Measurements {
    /// Label of every measured line, parallel to the rows of `columns`.
    pub names: Vec<String>,
    /// One column of physical lengths per scale.
    pub columns: ColumnSet,
}

/// Header of the leading label column in measurement output.
pub const NAME_COLUMN: &str = "name";

// ============================================================================
// Public API
// ============================================================================

/// Writes projected values as CSV.
///
/// # Errors
/// Returns an error if the columns differ in length or the writer fails.
pub fn write_columns_csv<W: Write>(writer: W, columns: &ColumnSet) -> Result<(), PlotmeterError> {
    write_table(writer, None, columns)
}

/// Writes measurements as CSV, with the line labels as the first column.
///
/// # Errors
/// Returns an error if the label count or any column length disagrees with
/// the row count, or the writer fails.
pub fn write_measurements_csv<W: Write>(
    writer: W,
    measurements: &Measurements,
) -> Result<(), PlotmeterError> {
    write_table(writer, Some(&measurements.names), &measurements.columns)
}

/// Writes projected values to a CSV string.
///
/// Useful for testing without file I/O.
pub fn columns_to_csv_string(columns: &ColumnSet) -> Result<String, PlotmeterError> {
    let mut buf = Vec::new();
    write_columns_csv(&mut buf, columns)?;
    bytes_to_string(buf)
}

/// Writes measurements to a CSV string.
///
/// Useful for testing without file I/O.
pub fn measurements_to_csv_string(measurements: &Measurements) -> Result<String, PlotmeterError> {
    let mut buf = Vec::new();
    write_measurements_csv(&mut buf, measurements)?;
    bytes_to_string(buf)
}

/// Formats a value the way the writer does.
pub fn format_value(value: f64) -> String {
    format!("{:?}", value)
}

// ============================================================================
// Internals
// ============================================================================

fn write_table<W: Write>(
    writer: W,
    labels: Option<&[String]>,
    columns: &ColumnSet,
) -> Result<(), PlotmeterError> {
    let rows = columns.row_count()?;
    if let Some(labels) = labels {
        if !columns.is_empty() && labels.len() != rows {
            return Err(PlotmeterError::ColumnMismatch {
                column: NAME_COLUMN.to_string(),
                expected: rows,
                found: labels.len(),
            });
        }
    }

    if columns.is_empty() || rows == 0 {
        tracing::info!(columns = columns.len(), "nothing to export");
        return Ok(());
    }

    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    let mut header: Vec<&str> = Vec::with_capacity(columns.len() + 1);
    if labels.is_some() {
        header.push(NAME_COLUMN);
    }
    header.extend(columns.names());
    csv_writer
        .write_record(&header)
        .map_err(|source| PlotmeterError::CsvWrite { source })?;

    let ordered: Vec<&[f64]> = columns.columns.values().map(Vec::as_slice).collect();
    let mut record: Vec<String> = Vec::with_capacity(header.len());
    for row in 0..rows {
        record.clear();
        if let Some(labels) = labels {
            record.push(labels[row].clone());
        }
        record.extend(ordered.iter().map(|col| format_value(col[row])));

        csv_writer
            .write_record(&record)
            .map_err(|source| PlotmeterError::CsvWrite { source })?;
    }

    csv_writer.flush().map_err(PlotmeterError::Io)?;
    tracing::info!(rows, columns = columns.len(), "exported CSV");
    Ok(())
}

fn bytes_to_string(bytes: Vec<u8>) -> Result<String, PlotmeterError> {
    String::from_utf8(bytes).map_err(|e| {
        PlotmeterError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
