//! Paper data model matching the Semantic Scholar author-papers schema.
//!
//! This is the raw record as the API hands it out. Nothing about it is
//! guaranteed, so every field is optional and `null` is read as absent.

use serde::{Deserialize, Deserializer, Serialize};

use super::AuthorRef;

/// A candidate publication as returned by the paginated author-papers endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Semantic Scholar paper ID.
    #[serde(default)]
    pub paper_id: Option<String>,

    /// Paper title, uncleaned.
    #[serde(default)]
    pub title: Option<String>,

    /// Paper abstract.
    #[serde(default)]
    pub r#abstract: Option<String>,

    /// Publication year.
    #[serde(default)]
    pub year: Option<i32>,

    /// Number of citations this paper has received.
    #[serde(default)]
    pub citation_count: Option<u64>,

    /// Influential citation count.
    #[serde(default)]
    pub influential_citation_count: Option<u64>,

    /// Authors in byline order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<AuthorRef>,

    /// Free-text venue name.
    #[serde(default)]
    pub venue: Option<String>,

    /// Structured venue, sometimes a bare string.
    #[serde(default)]
    pub publication_venue: Option<VenueRef>,

    /// Publication date in ISO format (YYYY-MM-DD).
    #[serde(default)]
    pub publication_date: Option<String>,

    /// External identifiers (DOI, ArXiv, PubMed).
    #[serde(default)]
    pub external_ids: Option<ExternalIds>,

    /// Declared publication categories (e.g. "JournalArticle", "Editorial").
    #[serde(default, deserialize_with = "null_as_default")]
    pub publication_types: Vec<String>,
}

impl Paper {
    /// Read a paper out of an untyped page entry.
    ///
    /// # Errors
    ///
    /// Returns error when a present field has the wrong shape
    /// (e.g. a string where the year should be).
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Raw title, or the empty string.
    #[must_use]
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Get the DOI if available and non-empty.
    #[must_use]
    pub fn doi(&self) -> Option<&str> {
        self.external_ids.as_ref()?.doi.as_deref().filter(|d| !d.is_empty())
    }

    /// Get citation count or 0 if not available.
    #[must_use]
    pub fn citations(&self) -> u64 {
        self.citation_count.unwrap_or(0)
    }

    /// Raw venue name: `venue` when non-empty, otherwise the structured venue's name.
    #[must_use]
    pub fn raw_venue(&self) -> Option<&str> {
        match self.venue.as_deref() {
            Some(v) if !v.is_empty() => Some(v),
            _ => self.publication_venue.as_ref()?.name().filter(|n| !n.is_empty()),
        }
    }
}

/// Structured venue reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VenueRef {
    /// Venue given as a plain name.
    Name(String),

    /// Venue given as an object.
    Detail(PublicationVenue),
}

impl VenueRef {
    /// Venue name, if the source gave one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Detail(venue) => venue.name.as_deref(),
        }
    }
}

/// Publication venue object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicationVenue {
    /// Venue ID.
    #[serde(default)]
    pub id: Option<String>,

    /// Venue name.
    #[serde(default)]
    pub name: Option<String>,

    /// Venue kind ("journal", "conference").
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// External identifiers for a paper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalIds {
    /// Digital Object Identifier.
    #[serde(rename = "DOI", default)]
    pub doi: Option<String>,

    /// ArXiv preprint ID.
    #[serde(rename = "ArXiv", default)]
    pub arxiv: Option<String>,

    /// PubMed ID.
    #[serde(rename = "PubMed", default)]
    pub pubmed: Option<String>,
}

/// One page of the author-papers endpoint.
///
/// Entries stay untyped so a single malformed record cannot fail its page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperPage {
    /// Offset this page starts at.
    #[serde(default)]
    pub offset: u32,

    /// Offset of the next page, if the API reports one.
    #[serde(default)]
    pub next: Option<u32>,

    /// Raw paper records.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<serde_json::Value>,
}

/// Read `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
