//! Normalized publication records, the output of every pipeline.

use serde::{Deserialize, Serialize};

/// A cleaned publication with retrieval metadata.
///
/// Field order is the serialized key order of the detailed output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// Cleaned title (at least 10 characters for API-sourced records).
    pub title: String,

    /// Cleaned author display names in byline order.
    pub authors: Vec<String>,

    /// Cleaned journal name; empty only for preprints.
    pub journal: String,

    /// Publication year.
    pub publication_year: Option<i32>,

    /// DOI, or the empty string.
    pub doi: String,

    /// Citation count at retrieval time.
    pub citation_count: u64,

    /// Source identifier of the record.
    pub semantic_scholar_id: String,
}

impl Publication {
    /// Title as compared during deduplication: lower-cased and trimmed.
    #[must_use]
    pub fn normalized_title(&self) -> String {
        self.title.to_lowercase().trim().to_string()
    }

    /// Whether the record carries a publication year.
    #[must_use]
    pub const fn has_year(&self) -> bool {
        self.publication_year.is_some()
    }

    /// Whether the record carries a non-empty DOI.
    #[must_use]
    pub fn has_doi(&self) -> bool {
        !self.doi.is_empty()
    }

    /// Whether the record carries a non-empty journal.
    #[must_use]
    pub fn has_journal(&self) -> bool {
        !self.journal.is_empty()
    }

    /// Five-key view used for the website list.
    #[must_use]
    pub fn entry(&self) -> PublicationEntry {
        PublicationEntry {
            title: self.title.clone(),
            authors: self.authors.clone(),
            journal: self.journal.clone(),
            publication_year: self.publication_year,
            doi: self.doi.clone(),
        }
    }
}

/// The minimal five-key publication shape shared by every converter.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationEntry {
    /// Title.
    pub title: String,

    /// Author display names.
    pub authors: Vec<String>,

    /// Journal name.
    pub journal: String,

    /// Publication year.
    pub publication_year: Option<i32>,

    /// DOI, or the empty string.
    pub doi: String,
}

impl From<&Publication> for PublicationEntry {
    fn from(publication: &Publication) -> Self {
        publication.entry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completeness_signals() {
        let mut publication = Publication {
            title: "Kinetochore assembly".to_string(),
            ..Default::default()
        };
        assert!(!publication.has_year());
        assert!(!publication.has_doi());
        assert!(!publication.has_journal());

        publication.publication_year = Some(2020);
        publication.doi = "10.1/x".to_string();
        publication.journal = "Cell".to_string();
        assert!(publication.has_year());
        assert!(publication.has_doi());
        assert!(publication.has_journal());
    }

    #[test]
    fn test_normalized_title() {
        let publication = Publication {
            title: "  The Kinetochore ".to_string(),
            ..Default::default()
        };
        assert_eq!(publication.normalized_title(), "the kinetochore");
    }

    #[test]
    fn test_entry_key_order() {
        let publication = Publication {
            title: "T".to_string(),
            citation_count: 9,
            semantic_scholar_id: "s2".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&PublicationEntry::from(&publication)).unwrap();
        assert_eq!(
            json,
            r#"{"title":"T","authors":[],"journal":"","publication_year":null,"doi":""}"#
        );
    }
}
