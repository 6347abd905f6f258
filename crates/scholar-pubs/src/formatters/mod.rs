//! Output formatting: website YAML, detailed JSON and the run summary.

mod json;
mod summary;
mod yaml;

pub use json::{to_json, write_json};
pub use summary::{PublicationSummary, format_summary};
pub use yaml::{to_yaml, write_yaml};
