#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(csv) = csvreq::fuzzing::read_csv_input(data) {
        debug_assert!(!csv.header.is_empty());
    }
});
