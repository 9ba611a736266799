use std::path::PathBuf;
use thiserror::Error;

/// The main error type for plotmeter operations.
#[derive(Debug, Error)]
pub enum PlotmeterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse annotation JSON from {path}: {source}")]
    AnnotationJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid annotation in {path}: {message}")]
    AnnotationInvalid { path: PathBuf, message: String },

    #[error("Calibration '{name}' is drawn as a zero-length or non-finite line")]
    DegenerateCalibration { name: String },

    #[error("Axis '{name}' has unusable bounds {a} and {b}: {reason}")]
    InvalidAxisBounds {
        name: String,
        a: f64,
        b: f64,
        reason: &'static str,
    },

    #[error("Scale '{name}' has a non-finite physical length {length}")]
    InvalidScaleLength { name: String, length: f64 },

    #[error("Calibration name '{name}' is defined more than once")]
    DuplicateCalibration { name: String },

    #[error("Scale name '{name}' clashes with the line label column")]
    ReservedScaleName { name: String },

    #[error("Failed to write CSV: {source}")]
    CsvWrite {
        #[source]
        source: csv::Error,
    },

    #[error("Column '{column}' has {found} value(s), expected {expected}")]
    ColumnMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
}
