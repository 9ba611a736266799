//! Fuzz target for calibration directive parsing.
//!
//! This fuzzer feeds arbitrary UTF-8 line names to the directive parser,
//! checking for panics and for strict/prefix disagreements.

#![no_main]

use libfuzzer_sys::fuzz_target;
use plotmeter::calibration::directive::fuzz_parse_directive;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }

    let Ok(name) = std::str::from_utf8(data) else {
        return;
    };

    fuzz_parse_directive(name);
});
