//! Version-control collaborator — thin wrappers over the `git` binary.
//!
//! Chronicle treats git as an external collaborator: it reads the staged
//! diff, stages the synced document, commits, and pushes. Nothing here
//! inspects repository internals.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};

fn git(args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .output()
        .with_context(|| format!("failed to run `git {}`", args.join(" ")))?;
    if !output.status.success() {
        bail!(
            "`git {}` failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Staged diff with zero context lines, or empty when nothing is staged.
pub fn staged_diff() -> Result<String> {
    git(&["diff", "--staged", "-U0"])
}

/// Absolute path of the repository root.
pub fn toplevel() -> Result<PathBuf> {
    Ok(PathBuf::from(git(&["rev-parse", "--show-toplevel"])?))
}

/// Name of the currently checked-out branch.
pub fn current_branch() -> Result<String> {
    git(&["rev-parse", "--abbrev-ref", "HEAD"])
}

/// Stage a single file.
pub fn stage(path: &Path) -> Result<()> {
    let path = path.display().to_string();
    git(&["add", &path]).map(|_| ())
}

/// Commit the index with `message`.
pub fn commit(message: &str) -> Result<()> {
    git(&["commit", "-m", message]).map(|_| ())
}

/// Push `branch` to `origin`.
pub fn push(branch: &str) -> Result<()> {
    git(&["push", "origin", branch]).map(|_| ())
}
