//! BibTeX citation database reader.

use std::path::Path;
use std::sync::LazyLock;

use biblatex::{Bibliography, Chunk, Entry, EntryType, Person, Spanned};
use regex::Regex;

use super::{parse_year, sort_by_year_desc};
use crate::error::{ConvertError, ConvertResult};
use crate::models::PublicationEntry;
use crate::normalize::Normalizer;

static ENTRY_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^@[a-zA-Z]").expect("valid entry start regex"));

/// Read a `.bib` file.
pub fn read_bibtex_file(path: impl AsRef<Path>, normalizer: &Normalizer) -> ConvertResult<Vec<PublicationEntry>> {
    let content = std::fs::read_to_string(path)?;
    parse_bibtex(&content, normalizer)
}

/// Parse `.bib` content, newest first, skipping `@unpublished` entries.
///
/// If the file as a whole does not parse, each `@` entry is parsed on its
/// own and the broken ones are dropped.
pub fn parse_bibtex(content: &str, normalizer: &Normalizer) -> ConvertResult<Vec<PublicationEntry>> {
    let bibliographies = match Bibliography::parse(content) {
        Ok(bibliography) => vec![bibliography],
        Err(e) => {
            tracing::warn!(error = %e, "BibTeX file does not parse as a whole, parsing entries one by one");
            let parsed = parse_individually(content);
            if parsed.is_empty() {
                return Err(ConvertError::Bibtex(e.to_string()));
            }
            parsed
        }
    };

    let mut entries: Vec<PublicationEntry> = bibliographies
        .iter()
        .flat_map(Bibliography::iter)
        .filter(|entry| entry.entry_type != EntryType::Unpublished)
        .map(|entry| to_publication_entry(entry, normalizer))
        .collect();

    sort_by_year_desc(&mut entries);
    Ok(entries)
}

fn parse_individually(content: &str) -> Vec<Bibliography> {
    let starts: Vec<usize> = ENTRY_START.find_iter(content).map(|m| m.start()).collect();

    starts
        .iter()
        .enumerate()
        .filter_map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(content.len());
            match Bibliography::parse(&content[start..end]) {
                Ok(bibliography) => Some(bibliography),
                Err(e) => {
                    tracing::warn!(offset = start, error = %e, "Skipping unparseable BibTeX entry");
                    None
                }
            }
        })
        .collect()
}

fn to_publication_entry(entry: &Entry, normalizer: &Normalizer) -> PublicationEntry {
    let title = entry.title().map(chunks_to_string).unwrap_or_default();

    let authors = entry
        .author()
        .unwrap_or_default()
        .iter()
        .filter(|p| p.name != "others")
        .filter_map(|p| normalizer.clean_author(&format_person(p)))
        .collect();

    let journal = field(entry, "journal").or_else(|| field(entry, "journaltitle")).unwrap_or_default();

    let publication_year = field(entry, "year")
        .and_then(|y| parse_year(&y))
        .or_else(|| field(entry, "date").and_then(|d| d.get(..4).and_then(parse_year)));

    PublicationEntry {
        title: normalizer.clean_title(&title),
        authors,
        journal: normalizer.clean_journal(&journal),
        publication_year,
        doi: field(entry, "doi").map(|d| d.trim().to_string()).unwrap_or_default(),
    }
}

fn field(entry: &Entry, key: &str) -> Option<String> {
    entry.get(key).map(chunks_to_string).filter(|s| !s.trim().is_empty())
}

fn chunks_to_string(chunks: &[Spanned<Chunk>]) -> String {
    chunks
        .iter()
        .map(|c| match &c.v {
            Chunk::Normal(s) | Chunk::Verbatim(s) | Chunk::Math(s) => s.as_str(),
        })
        .collect()
}

/// "Given Family" order.
fn format_person(p: &Person) -> String {
    [p.given_name.as_str(), p.prefix.as_str(), p.name.as_str(), p.suffix.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
