//! Publication pipeline: fetch, extract, filter, deduplicate, sort.
//!
//! Nothing in here is fatal. Network trouble shortens the input, malformed
//! records are skipped with a warning, and an author with no papers gives an
//! empty report.

use std::cmp::Reverse;
use std::time::Duration;

use crate::client::{FetchReport, ScholarClient};
use crate::config::Config;
use crate::dedup::Deduplicator;
use crate::error::{ClientResult, RulesError};
use crate::filter::PublicationFilter;
use crate::models::{Author, Paper, Publication};
use crate::normalize::Normalizer;
use crate::rules::Rules;

/// Where raw records come from.
#[async_trait::async_trait]
pub trait PaperSource: Send + Sync {
    /// Profile of the identity, used for reporting only.
    async fn author_profile(&self, author_id: &str) -> ClientResult<Author>;

    /// All raw paper records of the identity.
    async fn author_papers(&self, author_id: &str, page_size: u32) -> FetchReport;
}

#[async_trait::async_trait]
impl PaperSource for ScholarClient {
    async fn author_profile(&self, author_id: &str) -> ClientResult<Author> {
        self.get_author(author_id).await
    }

    async fn author_papers(&self, author_id: &str, page_size: u32) -> FetchReport {
        self.fetch_all_report(author_id, page_size).await
    }
}

/// What a pipeline run produced, with the count after every stage.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    /// Identity profile, when it could be retrieved.
    pub profile: Option<Author>,

    /// Raw records received.
    pub raw_count: usize,

    /// Records that parsed as papers.
    pub parsed_count: usize,

    /// Papers that passed the validity filter.
    pub valid_count: usize,

    /// Publications extracted from valid papers.
    pub extracted_count: usize,

    /// True if the fetch stopped early and the input was partial.
    pub fetch_truncated: bool,

    /// Final publications, newest first.
    pub publications: Vec<Publication>,
}

/// Cleans, filters and deduplicates raw records.
#[derive(Debug, Clone)]
pub struct Pipeline {
    normalizer: Normalizer,
    filter: PublicationFilter,
    deduplicator: Deduplicator,
    page_size: u32,
    profile_delay: Duration,
}

impl Pipeline {
    /// Build a pipeline from rule tables, with default paging.
    pub fn new(rules: &Rules) -> Result<Self, RulesError> {
        let normalizer = Normalizer::new(&rules.cleaning)?;
        let filter = PublicationFilter::new(&rules.filter, normalizer.clone())?;
        let defaults = Config::default();

        Ok(Self {
            normalizer,
            filter,
            deduplicator: Deduplicator::default(),
            page_size: defaults.page_size,
            profile_delay: defaults.profile_delay,
        })
    }

    /// Build a pipeline using the paging settings of `config`.
    pub fn from_config(config: &Config, rules: &Rules) -> Result<Self, RulesError> {
        Ok(Self::new(rules)?.with_page_size(config.page_size).with_profile_delay(config.profile_delay))
    }

    /// Set the page size used for fetching.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the pause between the profile request and paging.
    #[must_use]
    pub fn with_profile_delay(mut self, delay: Duration) -> Self {
        self.profile_delay = delay;
        self
    }

    /// Fetch and process every publication of `author_id`.
    pub async fn run<S>(&self, source: &S, author_id: &str) -> PipelineReport
    where
        S: PaperSource + ?Sized,
    {
        tracing::info!(author_id, "Getting author profile");
        let profile = match source.author_profile(author_id).await {
            Ok(author) => {
                tracing::info!(
                    name = author.name_or_default(),
                    paper_count = ?author.paper_count,
                    citation_count = ?author.citation_count,
                    "Author profile"
                );
                Some(author)
            }
            Err(e) => {
                tracing::warn!(author_id, error = %e, "Could not get author profile");
                None
            }
        };

        if !self.profile_delay.is_zero() {
            tokio::time::sleep(self.profile_delay).await;
        }

        let fetch = source.author_papers(author_id, self.page_size).await;
        if fetch.records.is_empty() {
            tracing::info!(author_id, "No papers found");
        }

        let mut report = self.process(fetch.records);
        report.profile = profile;
        report.fetch_truncated = fetch.stopped_early;
        report
    }

    /// Process raw records that were already fetched.
    #[must_use]
    pub fn process(&self, raw: Vec<serde_json::Value>) -> PipelineReport {
        let raw_count = raw.len();
        tracing::info!(count = raw_count, "Processing raw papers");

        let papers: Vec<Paper> = raw
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match Paper::from_value(value) {
                Ok(paper) => Some(paper),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping malformed paper record");
                    None
                }
            })
            .collect();
        let parsed_count = papers.len();

        let valid: Vec<&Paper> = papers
            .iter()
            .filter(|paper| match self.filter.rejection_reason(paper) {
                None => true,
                Some(reason) => {
                    tracing::debug!(title = paper.title_or_empty(), %reason, "Rejected paper");
                    false
                }
            })
            .collect();
        let valid_count = valid.len();
        tracing::info!(count = valid_count, "After filtering");

        let extracted: Vec<Publication> = valid.into_iter().filter_map(|p| self.extract(p)).collect();
        let extracted_count = extracted.len();
        tracing::info!(count = extracted_count, "Extracted publications");

        let mut publications = self.deduplicator.dedupe(extracted);
        tracing::info!(count = publications.len(), "After deduplication");

        sort_newest_first(&mut publications);

        PipelineReport {
            profile: None,
            raw_count,
            parsed_count,
            valid_count,
            extracted_count,
            fetch_truncated: false,
            publications,
        }
    }

    /// Pull a cleaned publication out of a paper; `None` if no title survives cleaning.
    #[must_use]
    pub fn extract(&self, paper: &Paper) -> Option<Publication> {
        let title = self.normalizer.clean_title(paper.title_or_empty());
        if title.is_empty() {
            return None;
        }

        Some(Publication {
            title,
            authors: self.normalizer.clean_authors(&paper.authors),
            journal: self.normalizer.clean_journal(paper.raw_venue().unwrap_or("")),
            publication_year: paper.year,
            doi: paper.doi().unwrap_or_default().to_string(),
            citation_count: paper.citations(),
            semantic_scholar_id: paper.paper_id.clone().unwrap_or_default(),
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&Rules::default()).expect("built-in rules compile")
    }
}

/// Sort by `(year, citations)` descending; records without a year sort last.
pub fn sort_newest_first(publications: &mut [Publication]) {
    publications.sort_by_key(|p| Reverse((p.publication_year.unwrap_or(0), p.citation_count)));
}
