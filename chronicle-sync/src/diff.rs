//! Dry-run unified diff support for `chronicle diff` and `run --dry-run`.

use std::path::Path;

use similar::TextDiff;

use crate::error::SyncError;
use crate::writer::read_document;

/// Unified diff between the on-disk document and `next`.
///
/// Returns `None` when the computed content matches the disk exactly.
/// No files are written.
pub fn document_diff(path: &Path, next: &str) -> Result<Option<String>, SyncError> {
    let existing = read_document(path)?.unwrap_or_default();
    let next = next.replace("\r\n", "\n");
    if existing == next {
        return Ok(None);
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let old_header = format!("a/{name}");
    let new_header = format!("b/{name}");
    let unified = TextDiff::from_lines(&existing, &next)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string();
    Ok(Some(unified))
}
