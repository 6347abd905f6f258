//! Data models for API records and normalized publications.
//!
//! API models use `#[serde(default)]` for every field and
//! `#[serde(rename_all = "camelCase")]` to match API naming.

mod author;
mod paper;
mod publication;

pub use author::{Author, AuthorRef};
pub use paper::{ExternalIds, Paper, PaperPage, PublicationVenue, VenueRef};
pub use publication::{Publication, PublicationEntry};
