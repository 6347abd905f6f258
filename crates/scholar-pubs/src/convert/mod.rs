//! Format-specific readers producing the five-key publication list.
//!
//! - [`bibtex`]: `.bib` citation databases
//! - [`tabular`]: reference-manager CSV exports
//! - [`citations`]: numbered plain-text citation dumps (PubMed "Summary (text)")

pub mod bibtex;
pub mod citations;
pub mod tabular;

use std::cmp::Reverse;

use crate::models::PublicationEntry;

/// Sort by year descending; entries without a year go last.
pub fn sort_by_year_desc(entries: &mut [PublicationEntry]) {
    entries.sort_by_key(|e| Reverse(e.publication_year.unwrap_or(0)));
}

/// Parse a year field, ignoring anything that is not a plain integer.
fn parse_year(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}
