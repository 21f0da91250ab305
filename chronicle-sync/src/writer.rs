//! Hash-gated atomic document persistence.
//!
//! ## `write_document` — protocol
//!
//! 1. Normalize line endings to LF.
//! 2. SHA-256 hash the next content.
//! 3. Hash the current on-disk content → skip if identical.
//! 4. Write to `<path>.chronicle.tmp`.
//! 5. Rename to final path (atomic on POSIX).
//!
//! The document is always replaced wholesale — never appended to in place.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{io_err, SyncError};

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of a document write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped — next content matches what is on disk.
    Unchanged { path: PathBuf },
    /// Dry-run mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

/// Read the current document, or `None` when no document exists.
///
/// Line endings are normalized to LF so classification and diffing see the
/// same text the writer would produce.
pub fn read_document(path: &Path) -> Result<Option<String>, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content.replace("\r\n", "\n"))),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

// ---------------------------------------------------------------------------
// Write
// ---------------------------------------------------------------------------

/// Atomically replace the document at `path` with `content`.
///
/// Skips the write when the on-disk content already matches (hash compare),
/// so a re-run with identical output never touches the file's mtime.
pub fn write_document(
    path: &Path,
    content: &str,
    dry_run: bool,
) -> Result<WriteResult, SyncError> {
    let normalized = content.replace("\r\n", "\n");
    let content = normalized.as_str();

    let digest = sha256_hex(content);
    if let Some(existing) = read_document(path)? {
        if sha256_hex(&existing) == digest {
            tracing::debug!("unchanged: {}", path.display());
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
    }

    let tmp = PathBuf::from(format!("{}.chronicle.tmp", path.display()));
    std::fs::write(&tmp, content).map_err(|e| io_err(&tmp, e))?;

    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

fn sha256_hex(content: &str) -> String {
    let mut h = Sha256::new();
    h.update(content.as_bytes());
    hex::encode(h.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn read_missing_document_is_none() {
        let tmp = TempDir::new().unwrap();
        let read = read_document(&tmp.path().join("README.md")).unwrap();
        assert!(read.is_none());
    }

    #[test]
    fn read_normalizes_crlf() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("README.md");
        fs::write(&path, "line1\r\nline2\r\n").unwrap();
        assert_eq!(read_document(&path).unwrap().unwrap(), "line1\nline2\n");
    }

    #[test]
    fn first_write_returns_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("README.md");
        let result = write_document(&path, "hello\n", false).unwrap();
        assert!(matches!(result, WriteResult::Written { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn identical_rewrite_returns_unchanged_and_keeps_mtime() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("README.md");
        write_document(&path, "same content\n", false).unwrap();
        let mtime_1 = fs::metadata(&path).unwrap().modified().unwrap();

        let result = write_document(&path, "same content\n", false).unwrap();
        assert!(matches!(result, WriteResult::Unchanged { .. }));
        let mtime_2 = fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(mtime_2, mtime_1, "no-op write must not rewrite the file");
    }

    #[test]
    fn changed_content_returns_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("README.md");
        write_document(&path, "v1\n", false).unwrap();
        let result = write_document(&path, "v2\n", false).unwrap();
        assert!(matches!(result, WriteResult::Written { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "v2\n");
    }

    #[test]
    fn dry_run_does_not_write_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.md");
        let result = write_document(&path, "content\n", true).unwrap();
        assert!(matches!(result, WriteResult::WouldWrite { .. }));
        assert!(!path.exists(), "dry-run must not create files");
    }

    #[test]
    fn dry_run_on_identical_content_still_reports_unchanged() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("README.md");
        write_document(&path, "stable\n", false).unwrap();
        let result = write_document(&path, "stable\n", true).unwrap();
        assert!(matches!(result, WriteResult::Unchanged { .. }));
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clean.md");
        write_document(&path, "data\n", false).unwrap();
        let tmp_path = PathBuf::from(format!("{}.chronicle.tmp", path.display()));
        assert!(!tmp_path.exists(), ".chronicle.tmp must be cleaned up");
    }

    #[test]
    fn creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("docs").join("nested").join("README.md");
        write_document(&path, "content\n", false).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn crlf_and_lf_content_compare_equal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("normalize.md");

        let first = write_document(&path, "line1\r\nline2\r\n", false).unwrap();
        assert!(matches!(first, WriteResult::Written { .. }));

        let second = write_document(&path, "line1\nline2\n", false).unwrap();
        assert!(matches!(second, WriteResult::Unchanged { .. }));

        let disk = fs::read_to_string(&path).unwrap();
        assert_eq!(disk, "line1\nline2\n");
    }

    #[test]
    #[cfg(unix)]
    fn rename_failure_leaves_original_intact() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let readonly_dir = root.path().join("readonly");
        fs::create_dir_all(&readonly_dir).unwrap();

        let path = readonly_dir.join("README.md");
        fs::write(&path, "original\n").unwrap();

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        let err = write_document(&path, "new content\n", false)
            .expect_err("write into readonly dir should fail");
        assert!(matches!(err, SyncError::Io { .. }));

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        let current = fs::read_to_string(&path).unwrap();
        assert_eq!(current, "original\n", "original file should be intact");
    }
}
