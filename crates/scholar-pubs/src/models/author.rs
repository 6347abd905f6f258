//! Author data model matching Semantic Scholar API schema.

use serde::{Deserialize, Serialize};

use super::paper::null_as_default;

/// An author profile (the identity whose papers are retrieved).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Unique Semantic Scholar author ID.
    #[serde(default)]
    pub author_id: Option<String>,

    /// Author name.
    #[serde(default)]
    pub name: Option<String>,

    /// Author's institutional affiliations.
    #[serde(default, deserialize_with = "null_as_default")]
    pub affiliations: Vec<String>,

    /// Author's homepage URL.
    #[serde(default)]
    pub homepage: Option<String>,

    /// Total number of papers the API attributes to this author.
    #[serde(default)]
    pub paper_count: Option<u64>,

    /// Total citation count across all papers.
    #[serde(default)]
    pub citation_count: Option<u64>,

    /// h-index metric.
    #[serde(default)]
    pub h_index: Option<u32>,
}

impl Author {
    /// Get the author name, falling back to "Unknown" if not available.
    #[must_use]
    pub fn name_or_default(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

/// Author entry inside a paper's byline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    /// Author ID (may be missing for unresolved authors).
    #[serde(default)]
    pub author_id: Option<String>,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}
