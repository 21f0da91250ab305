//! Changelog document model and synchronization strategies.
//!
//! The document itself is plain text owned by the caller; this module defines
//! the pieces of it Chronicle recognizes: the section header that accumulates
//! dated entries, the deprecated bullet format that signals a broken document,
//! and the entry line Chronicle appends on every commit.

use std::fmt;
use std::sync::LazyLock;

use chrono::Local;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Document grammar
// ---------------------------------------------------------------------------

/// Marker line delimiting the section that accumulates dated entries.
/// Matched exactly, after trimming surrounding whitespace.
pub const CHANGELOG_HEADER: &str = "## Features / Changelog";

/// Deprecated bullet format: `- YYYY-MM-DD … ``` ` (trailing triple backtick).
/// Its presence at the top of a document marks the document as malformed.
static LEGACY_BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s*\d{4}-\d{2}-\d{2}.*`{3}\s*$").expect("valid pattern"));

/// Whether `line` matches the deprecated bullet format.
pub fn is_legacy_line(line: &str) -> bool {
    LEGACY_BULLET_RE.is_match(line)
}

// ---------------------------------------------------------------------------
// Changelog entries
// ---------------------------------------------------------------------------

/// A single dated changelog line. Immutable once written; newest entries sit
/// directly below the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    /// Minute-precision local time, `YYYY-MM-DD HH:MM`.
    pub timestamp: String,
    /// One-line summary derived from the commit message.
    pub summary: String,
}

impl ChangelogEntry {
    /// Build an entry from a (possibly multi-line) commit message, stamped
    /// with the current local time.
    ///
    /// Only the first line of the message is kept; control characters and
    /// surrounding quote/backtick characters are stripped.
    pub fn new(message: &str) -> Self {
        Self::with_timestamp(message, Local::now().format("%Y-%m-%d %H:%M").to_string())
    }

    /// Build an entry with an explicit timestamp string.
    pub fn with_timestamp(message: &str, timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            summary: summarize(message),
        }
    }

    /// The bullet line inserted into the document.
    pub fn render(&self) -> String {
        format!("- **{}**: {}", self.timestamp, self.summary)
    }
}

impl fmt::Display for ChangelogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// First line of `message`, with control characters removed and surrounding
/// quotes/backticks trimmed.
fn summarize(message: &str) -> String {
    let first = message.lines().next().unwrap_or("");
    let cleaned: String = first.chars().filter(|c| !c.is_control()).collect();
    cleaned
        .trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim()
        .to_string()
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// What to do when the document classifies as malformed.
///
/// Both strategies are deliberate options rather than a single hard-coded
/// behavior; the configured default is [`MalformedStrategy::Replace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MalformedStrategy {
    /// Discard the existing content and draft a fresh document.
    #[default]
    Replace,
    /// Strip the leading legacy lines and keep the remainder.
    Repair,
}

impl fmt::Display for MalformedStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedStrategy::Replace => write!(f, "replace"),
            MalformedStrategy::Repair => write!(f, "repair"),
        }
    }
}

/// What to do when the document classifies as well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WellFormedStrategy {
    /// Leave the document as-is and only insert the new entry.
    #[default]
    Insert,
    /// Ask the generator to revise the document before inserting.
    Regenerate,
}

impl fmt::Display for WellFormedStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WellFormedStrategy::Insert => write!(f, "insert"),
            WellFormedStrategy::Regenerate => write!(f, "regenerate"),
        }
    }
}

/// Strategy pair driving one synchronization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncOptions {
    pub on_malformed: MalformedStrategy,
    pub on_well_formed: WellFormedStrategy,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
