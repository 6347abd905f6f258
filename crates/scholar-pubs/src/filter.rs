//! Research-publication validity filter.
//!
//! Conservative by construction: the tables in [`FilterRules`] describe the
//! noise of one corpus (board notices, peer-review letters, structure
//! deposits) rather than a general classifier.

use std::fmt;

use regex::Regex;

use crate::error::RulesError;
use crate::models::Paper;
use crate::normalize::{Normalizer, collapse_whitespace};
use crate::rules::{FilterRules, compile};

/// Why a raw record was not accepted as a publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// No title left after cleaning.
    EmptyTitle,

    /// Cleaned title below the minimum length.
    ShortTitle {
        /// Title length in characters.
        len: usize,
    },

    /// Declared publication type is on the exclusion list.
    ExcludedType(String),

    /// Cleaned title matches a boilerplate pattern.
    NoisePattern(String),

    /// No usable journal and the title is not a preprint deposit.
    MissingJournal,

    /// Journal is a known-bad venue and the title is not a preprint deposit.
    BadVenue(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "empty title"),
            Self::ShortTitle { len } => write!(f, "title too short ({len} chars)"),
            Self::ExcludedType(kind) => write!(f, "excluded publication type {kind}"),
            Self::NoisePattern(pattern) => write!(f, "title matches {pattern:?}"),
            Self::MissingJournal => write!(f, "no journal"),
            Self::BadVenue(venue) => write!(f, "bad venue {venue:?}"),
        }
    }
}

/// Classifies raw records as genuine publications or noise.
#[derive(Debug, Clone)]
pub struct PublicationFilter {
    normalizer: Normalizer,
    min_title_len: usize,
    excluded_types: Vec<String>,
    noise_patterns: Vec<Regex>,
    bad_venues: Vec<String>,
    preprint_markers: Vec<String>,
}

impl PublicationFilter {
    /// Compile the filter tables. Titles and journals are cleaned with `normalizer`.
    pub fn new(rules: &FilterRules, normalizer: Normalizer) -> Result<Self, RulesError> {
        let noise_patterns =
            rules.noise_patterns.iter().map(|p| compile(p, true)).collect::<Result<_, _>>()?;

        Ok(Self {
            normalizer,
            min_title_len: rules.min_title_len,
            excluded_types: lowercase_all(&rules.excluded_types),
            noise_patterns,
            bad_venues: rules.bad_venues.iter().map(|v| collapse_whitespace(v).to_lowercase()).collect(),
            preprint_markers: lowercase_all(&rules.preprint_markers),
        })
    }

    /// Returns true if the record looks like a research publication.
    #[must_use]
    pub fn is_valid(&self, paper: &Paper) -> bool {
        self.rejection_reason(paper).is_none()
    }

    /// The first check the record fails, if any.
    #[must_use]
    pub fn rejection_reason(&self, paper: &Paper) -> Option<Rejection> {
        let title = self.normalizer.clean_title(paper.title_or_empty());
        if title.is_empty() {
            return Some(Rejection::EmptyTitle);
        }

        let len = title.chars().count();
        if len < self.min_title_len {
            return Some(Rejection::ShortTitle { len });
        }

        if let Some(kind) = paper
            .publication_types
            .iter()
            .find(|kind| self.excluded_types.contains(&kind.to_lowercase()))
        {
            return Some(Rejection::ExcludedType(kind.clone()));
        }

        if let Some(pattern) = self.noise_patterns.iter().find(|re| re.is_match(&title)) {
            return Some(Rejection::NoisePattern(pattern.as_str().to_string()));
        }

        if self.is_preprint(&title) {
            return None;
        }

        let raw_venue = paper.raw_venue().unwrap_or("");
        let journal = self.normalizer.clean_journal(raw_venue);
        if journal.is_empty() {
            return Some(Rejection::MissingJournal);
        }

        // The journal cleaner may strip the very suffix that marks a bad
        // venue, so both forms are checked.
        let raw_key = collapse_whitespace(raw_venue).to_lowercase();
        let clean_key = journal.to_lowercase();
        if self.bad_venues.iter().any(|bad| *bad == raw_key || *bad == clean_key) {
            return Some(Rejection::BadVenue(journal));
        }

        None
    }

    fn is_preprint(&self, title: &str) -> bool {
        let lower = title.to_lowercase();
        self.preprint_markers.iter().any(|marker| lower.contains(marker.as_str()))
    }
}

impl Default for PublicationFilter {
    fn default() -> Self {
        Self::new(&FilterRules::default(), Normalizer::default())
            .expect("built-in filter rules compile")
    }
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}
