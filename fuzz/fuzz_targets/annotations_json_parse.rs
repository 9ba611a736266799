//! Fuzz target for annotation JSON parsing.
//!
//! Feeds arbitrary bytes to the annotation reader and, when they parse, runs
//! both pipelines over the result, checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use plotmeter::export::{columns_to_csv_string, measurements_to_csv_string};
use plotmeter::extract::{extract, ExtractOptions};
use plotmeter::ir::io_json::from_annotations_json_slice;
use plotmeter::measure::{measure, MeasureOptions};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(set) = from_annotations_json_slice(data) else {
        return;
    };

    if let Ok(columns) = extract(&set, &ExtractOptions::default()) {
        let _ = columns_to_csv_string(&columns);
    }
    if let Ok(measurements) = measure(&set, &MeasureOptions::default()) {
        let _ = measurements_to_csv_string(&measurements);
    }
});
