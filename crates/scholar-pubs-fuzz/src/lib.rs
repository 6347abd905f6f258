//! Fuzzing library for scholar-pubs.
//!
//! Targets feed arbitrary bytes to the record parser, the text cleaners and
//! the citation-dump reader. None of them may panic.
//!
//! # Usage
//!
//! ```bash
//! cd crates/scholar-pubs-fuzz
//! cargo +nightly fuzz run fuzz_paper_extract -- -max_total_time=60
//! ```

pub use scholar_pubs::{Normalizer, Pipeline, convert, models};
