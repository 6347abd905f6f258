//! Reference-manager CSV exports.

use std::io::Read;
use std::path::Path;

use super::{parse_year, sort_by_year_desc};
use crate::error::{ConvertError, ConvertResult};
use crate::models::PublicationEntry;

/// Item types kept; everything else (preprints, book chapters, ...) is dropped.
pub const PUBLISHED_ITEM_TYPES: &[&str] = &["Journal Article", "Review", "Commentary"];

const TITLE: &str = "Title";
const AUTHORS: &str = "Authors";
const JOURNAL: &str = "Journal";
const YEAR: &str = "Publication year";
const DOI: &str = "DOI";
const ITEM_TYPE: &str = "Item type";

/// Column positions resolved from the header row.
struct Columns {
    title: usize,
    authors: usize,
    journal: usize,
    year: usize,
    doi: usize,
    item_type: usize,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> ConvertResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| ConvertError::missing_column(name))
        };

        Ok(Self {
            title: find(TITLE)?,
            authors: find(AUTHORS)?,
            journal: find(JOURNAL)?,
            year: find(YEAR)?,
            doi: find(DOI)?,
            item_type: find(ITEM_TYPE)?,
        })
    }
}

/// Read a CSV export from disk.
pub fn read_csv_file(path: impl AsRef<Path>) -> ConvertResult<Vec<PublicationEntry>> {
    let file = std::fs::File::open(path)?;
    parse_csv(std::io::BufReader::new(file))
}

/// Parse a CSV export, newest first.
pub fn parse_csv<R: Read>(input: R) -> ConvertResult<Vec<PublicationEntry>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(input);
    let columns = Columns::resolve(reader.headers()?)?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = |index: usize| record.get(index).unwrap_or("").trim();

        if !PUBLISHED_ITEM_TYPES.contains(&cell(columns.item_type)) {
            continue;
        }

        entries.push(PublicationEntry {
            title: cell(columns.title).to_string(),
            authors: split_authors(cell(columns.authors)),
            journal: cell(columns.journal).to_string(),
            publication_year: parse_year(cell(columns.year)),
            doi: cell(columns.doi).to_string(),
        });
    }

    tracing::debug!(count = entries.len(), "Parsed CSV publications");
    sort_by_year_desc(&mut entries);
    Ok(entries)
}

fn split_authors(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(String::from)
        .collect()
}
