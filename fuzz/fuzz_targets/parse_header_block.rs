#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(headers) = csvreq::fuzzing::parse_header_block_input(input) {
            let lines_with_colon = input.split('\n').filter(|line| line.contains(':')).count();
            debug_assert!(headers.len() <= lines_with_colon);
        }
    }
});
