//! Scholar Pubs
//!
//! Builds a clean, deduplicated publication list for one researcher from the
//! Semantic Scholar Graph API, and converts BibTeX, CSV and plain-text
//! citation dumps into the same five-key YAML shape.
//!
//! # Features
//!
//! - **Paginated fetch**: sequential paging with per-page exponential backoff
//! - **Heuristic cleanup**: markup stripping, artifact removal, author aliases
//! - **Validity filter**: drops editorials, supplements and venue-less records
//! - **Fuzzy dedup**: near-duplicate titles collapse onto the most complete record
//!
//! # Example
//!
//! ```no_run
//! use scholar_pubs::{Config, Pipeline, ScholarClient, rules::Rules};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let pipeline = Pipeline::from_config(&config, &Rules::default())?;
//!     let client = ScholarClient::new(config)?;
//!
//!     let report = pipeline.run(&client, "1796400").await;
//!     println!("{} publications", report.publications.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod convert;
pub mod dedup;
pub mod error;
pub mod filter;
pub mod formatters;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod rules;

pub use client::{FetchReport, RetryPolicy, ScholarClient};
pub use config::Config;
pub use dedup::Deduplicator;
pub use error::{ClientError, ConvertError, RulesError};
pub use filter::PublicationFilter;
pub use models::{Publication, PublicationEntry};
pub use normalize::Normalizer;
pub use pipeline::{PaperSource, Pipeline, PipelineReport};
