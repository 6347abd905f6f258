//! Detailed JSON output with retrieval metadata.

use std::path::Path;

use crate::error::ConvertResult;
use crate::models::Publication;

/// Render publications as pretty JSON (two-space indent, Unicode kept literal).
pub fn to_json(publications: &[Publication]) -> ConvertResult<String> {
    Ok(serde_json::to_string_pretty(publications)?)
}

/// Write publications to `path` as pretty JSON.
pub fn write_json(path: impl AsRef<Path>, publications: &[Publication]) -> ConvertResult<()> {
    let path = path.as_ref();
    std::fs::write(path, to_json(publications)?)?;
    tracing::info!(path = %path.display(), count = publications.len(), "Wrote detailed publications");
    Ok(())
}
