//! Heuristic tables for cleaning and noise filtering.
//!
//! The defaults encode the noise seen in one author's Semantic Scholar
//! profile. Retarget them by passing a JSON file with the same shape;
//! keys left out keep their defaults.
//!
//! ```json
//! {
//!   "cleaning": { "authorAliases": { "j. smith": "J. Smith" } },
//!   "filter": { "badVenues": ["Proceedings of Nothing"] }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// All heuristic tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rules {
    /// Text cleaning tables.
    pub cleaning: CleaningRules,

    /// Validity filter tables.
    pub filter: FilterRules,
}

impl Rules {
    /// Parse rules from JSON text.
    pub fn from_json(text: &str) -> Result<Self, RulesError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load rules from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// Tables used by the text normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CleaningRules {
    /// Regex patterns removed from titles, applied in order (case-sensitive).
    pub title_artifacts: Vec<String>,

    /// Regex patterns removed from journal names, applied in order.
    pub journal_artifacts: Vec<String>,

    /// Author name variants (matched case-insensitively) and their display form.
    pub author_aliases: BTreeMap<String, String>,

    /// Author names longer than this many characters are dropped.
    pub max_author_len: usize,
}

impl Default for CleaningRules {
    fn default() -> Self {
        let canonical = "I. Cheeseman";
        let author_aliases = [
            "i. cheeseman",
            "iain cheeseman",
            "iain m cheeseman",
            "cheeseman im",
            "cheeseman i",
        ]
        .into_iter()
        .map(|alias| (alias.to_string(), canonical.to_string()))
        .collect();

        Self {
            title_artifacts: strings(&[
                r"^(?:JCB:|REPORT|Editorial Board|Faculty Opinions recommendation of|Author response:|Decision letter:)",
                r"\[An interview by.*?\]\.?$",
                r"Citation$",
                r"Material Supplemental$",
            ]),
            journal_artifacts: strings(&[r"\(Dutch-Flemish ed\. Print\)"]),
            author_aliases,
            max_author_len: 100,
        }
    }
}

/// Tables used by the validity filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterRules {
    /// Cleaned titles shorter than this many characters are rejected.
    pub min_title_len: usize,

    /// Publication types that mark a record as non-research.
    pub excluded_types: Vec<String>,

    /// Regex patterns (case-insensitive) matched against the cleaned title.
    pub noise_patterns: Vec<String>,

    /// Venue names that count as no venue at all.
    pub bad_venues: Vec<String>,

    /// Title substrings marking a preprint deposit, which may lack a journal.
    pub preprint_markers: Vec<String>,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            min_title_len: 10,
            excluded_types: strings(&["Editorial", "News", "LettersAndComments", "ClinicalTrial"]),
            noise_patterns: strings(&[
                r"^Editorial Board",
                r"^Faculty Opinions recommendation",
                r"^Author response:",
                r"^Decision letter:",
                r"Crystal structure.*pdb$",
                r"Structure of.*pdb$",
                r"^\d{4}\.\d{4}/.*",
                r"Material Supplemental",
                r"Citation$",
            ]),
            bad_venues: strings(&["Clinical neurology and neurosurgery (Dutch-Flemish ed. Print)"]),
            preprint_markers: strings(&["biorxiv"]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Compile a pattern, naming it in the error.
pub(crate) fn compile(pattern: &str, case_insensitive: bool) -> Result<regex::Regex, RulesError> {
    regex::RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|source| RulesError::InvalidPattern { pattern: pattern.to_string(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_compile() {
        let rules = Rules::default();
        for pattern in rules.cleaning.title_artifacts.iter().chain(&rules.cleaning.journal_artifacts) {
            assert!(compile(pattern, false).is_ok(), "{pattern}");
        }
        for pattern in &rules.filter.noise_patterns {
            assert!(compile(pattern, true).is_ok(), "{pattern}");
        }
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let rules = Rules::from_json(r#"{"filter": {"minTitleLen": 5}}"#).unwrap();
        assert_eq!(rules.filter.min_title_len, 5);
        assert_eq!(rules.filter.excluded_types, FilterRules::default().excluded_types);
        assert_eq!(rules.cleaning, CleaningRules::default());
    }

    #[test]
    fn test_alias_table_from_json() {
        let rules =
            Rules::from_json(r#"{"cleaning": {"authorAliases": {"j smith": "J. Smith"}}}"#).unwrap();
        assert_eq!(rules.cleaning.author_aliases.len(), 1);
        assert_eq!(rules.cleaning.author_aliases["j smith"], "J. Smith");
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(matches!(Rules::from_json("{not json"), Err(RulesError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Rules::from_file("/nonexistent/rules.json"),
            Err(RulesError::Io(_))
        ));
    }

    #[test]
    fn test_compile_reports_pattern() {
        let err = compile("[unclosed", false).unwrap_err();
        assert!(matches!(err, RulesError::InvalidPattern { ref pattern, .. } if pattern == "[unclosed"));
    }
}
