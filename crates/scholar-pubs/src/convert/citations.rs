//! Numbered plain-text citation dumps, as exported by PubMed's
//! "Summary (text)" format:
//!
//! ```text
//! 1. J Cell Biol. 2020 Mar 2;219(3):e201910142. doi: 10.1083/jcb.201910142.
//!
//! Title of the paper.
//!
//! Author A(1), Author B(2).
//! ```

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConvertResult;
use crate::models::PublicationEntry;

static ENTRY_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\d+\.\s+").expect("valid entry split regex"));
static SECTION_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n").expect("valid section split regex"));
static JOURNAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\.\s*\d{4}").expect("valid journal regex"));
static DOI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"doi:\s*([\d\./\-a-zA-Z]+)").expect("valid doi regex"));
static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})\s+[A-Z][a-z]{2}").expect("valid year regex"));
static ESCAPED_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\s*\n\s*").expect("valid escaped newline regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static AFFILIATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+\)").expect("valid affiliation marker regex"));

/// Read a citation dump from disk.
pub fn read_citations_file(path: impl AsRef<Path>) -> ConvertResult<Vec<PublicationEntry>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_citations(&content))
}

/// Parse a citation dump, keeping input order.
///
/// Text before the first numbered entry is ignored, as are entries with
/// fewer than three sections.
#[must_use]
pub fn parse_citations(content: &str) -> Vec<PublicationEntry> {
    let content = format!("\n{content}");

    ENTRY_SPLIT
        .split(&content)
        .skip(1)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let parsed = parse_entry(entry);
            if parsed.is_none() {
                tracing::debug!(entry = entry.lines().next().unwrap_or(""), "Skipping incomplete citation");
            }
            parsed
        })
        .collect()
}

fn parse_entry(entry: &str) -> Option<PublicationEntry> {
    let sections: Vec<&str> = SECTION_SPLIT
        .split(entry)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let [citation, title, authors, ..] = sections.as_slice() else {
        return None;
    };

    Some(PublicationEntry {
        title: clean_text(title),
        authors: parse_authors(authors),
        journal: JOURNAL
            .captures(citation)
            .map(|c| c[1].trim().to_string())
            .unwrap_or_default(),
        publication_year: YEAR.captures(citation).and_then(|c| c[1].parse().ok()),
        doi: DOI
            .captures(citation)
            .map(|c| c[1].trim().trim_end_matches('.').to_string())
            .unwrap_or_default(),
    })
}

/// Join escaped line breaks, drop backslashes and enclosing quotes.
fn clean_text(text: &str) -> String {
    let joined = ESCAPED_NEWLINE.replace_all(text, " ");
    let collapsed = WHITESPACE.replace_all(&joined, " ").replace('\\', "");
    let trimmed = collapsed.trim();

    let unquoted = trimmed
        .strip_prefix(['"', '\''])
        .and_then(|inner| inner.strip_suffix(['"', '\'']))
        .unwrap_or(trimmed);

    unquoted.trim().to_string()
}

fn parse_authors(line: &str) -> Vec<String> {
    line.trim_end_matches('.')
        .split(',')
        .map(|author| clean_text(&AFFILIATION.replace_all(author, "")))
        .filter(|author| !author.is_empty())
        .collect()
}
