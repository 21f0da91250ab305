//! Project-context discovery.
//!
//! Inspects indicator files in the repository root and assembles the
//! [`GenerationContext`] the prompts render from. Discovery is best-effort:
//! unreadable files are skipped, never fatal. Only configuration key NAMES
//! leave this module — values are discarded at the parse site.

use std::collections::BTreeSet;
use std::path::Path;

use chronicle_core::GenerationContext;

/// Files scanned for configuration key names, in order.
const ENV_FILES: &[&str] = &[".env.example", ".env"];

/// Dependency manifests, ordered by specificity.
const MANIFESTS: &[&str] = &[
    "Cargo.toml",
    "package.json",
    "pyproject.toml",
    "requirements.txt",
    "go.mod",
];

/// Assemble the generation context for the repository at `root`.
pub fn collect_at(root: &Path) -> GenerationContext {
    GenerationContext {
        project_name: project_name(root),
        config_keys: config_keys(root),
        manifest: manifest(root),
        change_summary: None,
    }
}

/// Repository name: the root directory's file name.
fn project_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

/// Key names from `.env.example` / `.env`, sorted and deduplicated.
fn config_keys(root: &Path) -> Vec<String> {
    let mut keys = BTreeSet::new();
    for name in ENV_FILES {
        let path = root.join(name);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                log::debug!("skipping {}: {err}", path.display());
                continue;
            }
        };
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, _value)) = line.split_once('=') {
                let key = key.trim();
                if !key.is_empty() {
                    keys.insert(key.to_string());
                }
            }
        }
    }
    keys.into_iter().collect()
}

/// First dependency manifest present at the root.
fn manifest(root: &Path) -> Option<String> {
    MANIFESTS
        .iter()
        .find(|name| root.join(name).is_file())
        .map(|name| (*name).to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
