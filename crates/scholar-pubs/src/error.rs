//! Error types for the publication retriever and converters.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by Semantic Scholar API (429 response)
    #[error("Rate limited (retry-after hint: {retry_after:?})")]
    RateLimited {
        /// Wait time suggested by the `Retry-After` header, if any
        retry_after: Option<Duration>,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// No response within the configured request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with an optional retry-after hint in seconds.
    #[must_use]
    pub fn rate_limited(seconds: Option<u64>) -> Self {
        Self::RateLimited { retry_after: seconds.map(Duration::from_secs) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Returns true if this error is transient and worth retrying.
    ///
    /// Transport errors count as transient when the connection failed, timed
    /// out, or broke while the body was being read.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Timeout(_) | Self::Server { .. } => true,
            Self::Http(e) => {
                e.is_connect() || e.is_timeout() || e.is_request() || e.is_body() || e.is_decode()
            }
            _ => false,
        }
    }

    /// Get the retry-after hint if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Errors from loading or compiling the heuristic rule tables.
#[derive(thiserror::Error, Debug)]
pub enum RulesError {
    /// The rules file could not be read
    #[error("Failed to read rules file: {0}")]
    Io(#[from] std::io::Error),

    /// The rules file is not valid JSON for the rules schema
    #[error("Failed to parse rules: {0}")]
    Parse(#[from] serde_json::Error),

    /// A configured pattern is not a valid regular expression
    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The offending pattern text
        pattern: String,
        /// Compilation error from the regex engine
        source: regex::Error,
    },
}

/// Errors from the format converters and output writers.
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The BibTeX input could not be parsed at all
    #[error("BibTeX parse error: {0}")]
    Bibtex(String),

    /// The tabular input is malformed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing from the tabular header
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// YAML serialization failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    /// Create a missing column error.
    #[must_use]
    pub fn missing_column(name: impl Into<String>) -> Self {
        Self::MissingColumn(name.into())
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for converter and writer operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_retryable() {
        assert!(ClientError::rate_limited(Some(60)).is_retryable());
        assert!(ClientError::rate_limited(None).is_retryable());
        assert!(ClientError::Timeout(Duration::from_secs(30)).is_retryable());
        assert!(ClientError::server(503, "Service unavailable").is_retryable());

        assert!(!ClientError::not_found("author 42").is_retryable());
        assert!(!ClientError::bad_request("invalid offset").is_retryable());
    }

    #[test]
    fn test_client_error_retry_after() {
        let err = ClientError::rate_limited(Some(60));
        assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));

        let err = ClientError::rate_limited(None);
        assert_eq!(err.retry_after(), None);

        let err = ClientError::not_found("paper");
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn test_invalid_pattern_names_pattern() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = RulesError::InvalidPattern { pattern: "(".to_string(), source };
        assert!(err.to_string().contains("\"(\""));
    }

    #[test]
    fn test_missing_column_message() {
        let err = ConvertError::missing_column("Item type");
        assert_eq!(err.to_string(), "Missing column: Item type");
    }
}
