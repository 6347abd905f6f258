//! Minimal YAML list for static site generators.

use std::path::Path;

use crate::error::ConvertResult;
use crate::models::PublicationEntry;

/// Render entries as a block-style YAML list.
///
/// Keys keep their declaration order (`title, authors, journal,
/// publication_year, doi`) and non-ASCII text is written as is.
pub fn to_yaml(entries: &[PublicationEntry]) -> ConvertResult<String> {
    Ok(serde_yaml::to_string(entries)?)
}

/// Write entries to `path` as YAML.
pub fn write_yaml(path: impl AsRef<Path>, entries: &[PublicationEntry]) -> ConvertResult<()> {
    let path = path.as_ref();
    std::fs::write(path, to_yaml(entries)?)?;
    tracing::info!(path = %path.display(), count = entries.len(), "Wrote publication list");
    Ok(())
}
