//! Configuration for the publication retriever.

use std::time::Duration;

use crate::client::RetryPolicy;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Graph API endpoint.
    pub const GRAPH_API: &str = "https://api.semanticscholar.org/graph/v1";

    /// Per-request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Records requested per page.
    pub const PAGE_SIZE: u32 = 50;

    /// Pause between successful page fetches.
    pub const PAGE_DELAY: Duration = Duration::from_secs(2);

    /// Pause after the author profile request, before paging starts.
    pub const PROFILE_DELAY: Duration = Duration::from_secs(3);

    /// Attempts per page before the fetch is abandoned.
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Base backoff delay (10s, 20s, 40s).
    pub const RETRY_BASE_DELAY: Duration = Duration::from_secs(10);
}

/// Field sets for API requests.
pub mod fields {
    /// Fields requested for each paper of an author.
    pub const AUTHOR_PAPERS: &[&str] = &[
        "paperId",
        "title",
        "authors",
        "venue",
        "year",
        "citationCount",
        "influentialCitationCount",
        "publicationVenue",
        "publicationDate",
        "abstract",
        "externalIds",
        "publicationTypes",
    ];

    /// Author profile fields.
    pub const AUTHOR: &[&str] =
        &["authorId", "name", "affiliations", "homepage", "paperCount", "citationCount", "hIndex"];
}

/// Retriever configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Semantic Scholar API key (optional).
    pub api_key: Option<String>,

    /// Base URL for Graph API (for testing with mock servers).
    pub graph_api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Records requested per page.
    pub page_size: u32,

    /// Pause between successful page fetches.
    pub page_delay: Duration,

    /// Pause between the profile request and the first page.
    pub profile_delay: Duration,

    /// Backoff policy applied to each page request.
    pub retry: RetryPolicy,
}

impl Config {
    /// Create a new configuration with optional API key.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            graph_api_url: api::GRAPH_API.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            page_size: api::PAGE_SIZE,
            page_delay: api::PAGE_DELAY,
            profile_delay: api::PROFILE_DELAY,
            retry: RetryPolicy::new(api::MAX_ATTEMPTS, api::RETRY_BASE_DELAY),
        }
    }

    /// Create a test configuration with custom URLs for mock servers.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: None,
            graph_api_url: format!("{}/graph/v1", base_url),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            page_size: api::PAGE_SIZE,
            page_delay: Duration::ZERO, // No pauses in tests
            profile_delay: Duration::ZERO,
            retry: RetryPolicy::new(api::MAX_ATTEMPTS, Duration::from_millis(10)),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("SEMANTIC_SCHOLAR_API_KEY").ok().filter(|k| !k.is_empty());
        Ok(Self::new(api_key))
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
