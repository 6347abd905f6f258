//! Semantic Scholar API client.
//!
//! Provides a sequential HTTP client with:
//! - Optional API key header
//! - Per-page retry with exponential backoff ([`RetryPolicy`])
//! - A fixed pause between pages to stay under the unauthenticated rate limit
//!
//! Pages are fetched strictly one after another.

mod retry;

use std::time::Duration;

use reqwest::Client;

pub use retry::RetryPolicy;

use crate::config::{Config, fields};
use crate::error::{ClientError, ClientResult};
use crate::models::{Author, PaperPage};

/// Outcome of a paginated fetch.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// Raw records in page order.
    pub records: Vec<serde_json::Value>,

    /// Number of non-empty pages retrieved.
    pub pages: usize,

    /// Every backoff delay slept, in order.
    pub backoffs: Vec<Duration>,

    /// True if paging was abandoned after an error; `records` is then partial.
    pub stopped_early: bool,
}

/// Semantic Scholar API client.
#[derive(Clone)]
pub struct ScholarClient {
    /// HTTP client.
    client: Client,

    /// API key (optional).
    api_key: Option<String>,

    /// Graph API base URL.
    graph_api_url: String,

    /// Per-request timeout, reported in [`ClientError::Timeout`].
    request_timeout: Duration,

    /// Pause between pages.
    page_delay: Duration,

    /// Per-page backoff policy.
    retry: RetryPolicy,
}

impl ScholarClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        if let Some(ref key) = config.api_key {
            headers.insert("x-api-key", key.parse()?);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key,
            graph_api_url: config.graph_api_url,
            request_timeout: config.request_timeout,
            page_delay: config.page_delay,
            retry: config.retry,
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Get an author profile by ID.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_author(&self, author_id: &str) -> ClientResult<Author> {
        let url = format!("{}/author/{}", self.graph_api_url, author_id);
        let params = vec![("fields".to_string(), fields::AUTHOR.join(","))];

        self.get(&url, &params).await
    }

    /// Get one page of an author's papers.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_author_papers(
        &self,
        author_id: &str,
        offset: u32,
        limit: u32,
    ) -> ClientResult<PaperPage> {
        let url = format!("{}/author/{}/papers", self.graph_api_url, author_id);

        let params = vec![
            ("offset".to_string(), offset.to_string()),
            ("limit".to_string(), limit.to_string()),
            ("fields".to_string(), fields::AUTHOR_PAPERS.join(",")),
        ];

        self.get(&url, &params).await
    }

    /// Fetch every paper of an author, `page_size` records at a time.
    ///
    /// Never fails: if a page cannot be retrieved within the retry budget,
    /// paging stops and the records gathered so far are returned.
    pub async fn fetch_all(&self, author_id: &str, page_size: u32) -> Vec<serde_json::Value> {
        self.fetch_all_report(author_id, page_size).await.records
    }

    /// Like [`fetch_all`](Self::fetch_all), with paging diagnostics.
    pub async fn fetch_all_report(&self, author_id: &str, page_size: u32) -> FetchReport {
        let page_size = page_size.max(1);
        let mut report = FetchReport::default();
        let mut offset = 0u32;

        loop {
            tracing::info!(offset, limit = page_size, "Requesting papers page");

            let page = self
                .retry
                .run(|| self.get_author_papers(author_id, offset, page_size), &mut report.backoffs)
                .await;

            let page = match page {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(
                        offset,
                        kept = report.records.len(),
                        error = %e,
                        "Giving up on paging, keeping partial results"
                    );
                    report.stopped_early = true;
                    break;
                }
            };

            let received = page.data.len();
            if received == 0 {
                break;
            }

            report.records.extend(page.data);
            report.pages += 1;
            tracing::info!(received, total = report.records.len(), "Retrieved papers page");

            if received < page_size as usize {
                break;
            }

            offset = offset.saturating_add(page_size);
            if !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        report
    }

    /// Make a GET request.
    async fn get<T>(&self, url: &str, params: &[(String, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let response = self.handle_response(response).await?;
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;

        serde_json::from_slice(&body).map_err(ClientError::from)
    }

    /// Classify a transport failure; timeouts get their own variant.
    fn transport_error(&self, error: reqwest::Error) -> ClientError {
        if error.is_timeout() {
            ClientError::Timeout(self.request_timeout)
        } else {
            ClientError::Http(error)
        }
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok());

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

impl std::fmt::Debug for ScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScholarClient")
            .field("has_api_key", &self.has_api_key())
            .field("graph_api_url", &self.graph_api_url)
            .finish()
    }
}
