#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar_pubs::Normalizer;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let normalizer = Normalizer::default();
        let title = normalizer.clean_title(text);
        assert!(!title.contains('{') && !title.contains('}'));
        let _ = normalizer.clean_journal(text);
        let _ = normalizer.clean_author(text);
    }
});
