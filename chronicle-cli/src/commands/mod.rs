//! Subcommand implementations.

pub mod diff;
pub mod init;
pub mod run;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};

use chronicle_core::Config;

use crate::git;

/// Resolve the document to operate on: an explicit `--document` path wins;
/// otherwise the configured document relative to the repository root (or the
/// current directory when not inside a repository).
pub(crate) fn resolve_document(explicit: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let root = match git::toplevel() {
        Ok(root) => root,
        Err(_) => std::env::current_dir().context("could not determine current directory")?,
    };
    Ok(root.join(&config.document))
}
