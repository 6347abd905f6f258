#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar_pubs::convert::citations::parse_citations;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = parse_citations(text);
    }
});
