//! Text normalization for titles, journal names and author names.
//!
//! Everything here is a pure string transform. Absent or empty input yields
//! an empty string (or no author), never an error.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::RulesError;
use crate::models::AuthorRef;
use crate::rules::{CleaningRules, compile};

static BACKSLASH_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\s*\n\s*").expect("valid backslash-newline regex"));

/// Collapse every run of whitespace to one space and trim both ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove TeX grouping braces and backslash escapes.
///
/// A backslash at the end of a line joins it with the next one.
#[must_use]
pub fn strip_markup(text: &str) -> String {
    let joined = BACKSLASH_NEWLINE.replace_all(text, " ");
    joined.chars().filter(|c| !matches!(c, '{' | '}' | '\\')).collect()
}

/// Decode the handful of TeX accent macros seen in exported author lists.
#[must_use]
pub fn decode_latex_accents(text: &str) -> String {
    text.replace("{\\'a}", "á").replace("{\\'e}", "é").replace("{\\\"o}", "ö")
}

/// Cleaner built from a [`CleaningRules`] table.
#[derive(Debug, Clone)]
pub struct Normalizer {
    title_artifacts: Vec<Regex>,
    journal_artifacts: Vec<Regex>,
    aliases: HashMap<String, String>,
    max_author_len: usize,
}

impl Normalizer {
    /// Compile the cleaning tables.
    pub fn new(rules: &CleaningRules) -> Result<Self, RulesError> {
        let title_artifacts = rules
            .title_artifacts
            .iter()
            .map(|p| compile(p, false))
            .collect::<Result<_, _>>()?;
        let journal_artifacts = rules
            .journal_artifacts
            .iter()
            .map(|p| compile(p, false))
            .collect::<Result<_, _>>()?;
        let aliases = rules
            .author_aliases
            .iter()
            .map(|(alias, canonical)| (alias.trim().to_lowercase(), canonical.clone()))
            .collect();

        Ok(Self {
            title_artifacts,
            journal_artifacts,
            aliases,
            max_author_len: rules.max_author_len,
        })
    }

    /// Clean a title: markup out, whitespace collapsed, boilerplate and
    /// trailing periods removed.
    #[must_use]
    pub fn clean_title(&self, raw: &str) -> String {
        let mut title = collapse_whitespace(&strip_markup(raw));
        for artifact in &self.title_artifacts {
            title = artifact.replace_all(&title, "").into_owned();
        }
        let title = title.trim_end_matches(['.', ' ']);
        collapse_whitespace(title)
    }

    /// Clean a journal name.
    #[must_use]
    pub fn clean_journal(&self, raw: &str) -> String {
        let mut journal = strip_markup(raw);
        for artifact in &self.journal_artifacts {
            journal = artifact.replace_all(&journal, "").into_owned();
        }
        collapse_whitespace(&journal)
    }

    /// Clean one author name.
    ///
    /// Returns `None` for names that are empty or implausibly long; known
    /// variants are mapped to their display form.
    #[must_use]
    pub fn clean_author(&self, raw: &str) -> Option<String> {
        let name = collapse_whitespace(&strip_markup(&decode_latex_accents(raw)));
        if name.is_empty() || name.chars().count() > self.max_author_len {
            return None;
        }
        match self.aliases.get(&name.to_lowercase()) {
            Some(canonical) => Some(canonical.clone()),
            None => Some(name),
        }
    }

    /// Clean a byline, keeping source order and repeated names.
    #[must_use]
    pub fn clean_authors(&self, authors: &[AuthorRef]) -> Vec<String> {
        authors
            .iter()
            .filter_map(|a| a.name.as_deref())
            .filter_map(|name| self.clean_author(name))
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&CleaningRules::default()).expect("built-in cleaning rules compile")
    }
}
