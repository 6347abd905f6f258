#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar_pubs::Pipeline;

fuzz_target!(|data: &[u8]| {
    // Any JSON value goes through the whole offline pipeline without panicking
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        let records = match value {
            serde_json::Value::Array(items) => items,
            other => vec![other],
        };
        let _ = Pipeline::default().process(records);
    }
});
