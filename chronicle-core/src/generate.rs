//! Generator seam — the external text-generation collaborator.
//!
//! The sync engine never talks to a network itself; it calls a
//! [`DocumentGenerator`] and treats the returned text as opaque document
//! content. `chronicle-generator` provides the production implementation;
//! tests substitute stubs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Produces full document text from project context.
///
/// Implementations may block on network I/O; they are invoked at most once
/// per synchronization call. A failure must leave no partial output behind —
/// the caller treats any error as "nothing was generated".
pub trait DocumentGenerator {
    /// Draft a fresh document from scratch.
    fn draft(&self, ctx: &GenerationContext) -> Result<String, GenerateError>;

    /// Produce a revised version of `current`, preserving its structure.
    fn revise(&self, ctx: &GenerationContext, current: &str) -> Result<String, GenerateError>;
}

/// Everything a generator is allowed to see about the project.
///
/// `config_keys` holds configuration key NAMES discovered in the repository —
/// never values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationContext {
    pub project_name: String,
    #[serde(default)]
    pub config_keys: Vec<String>,
    /// Dependency manifest file present at the repository root, if any
    /// (e.g. `Cargo.toml`, `package.json`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,
    /// One-line natural-language summary of the change being committed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_summary: Option<String>,
}

/// All errors that can arise from an external generation call.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Transport-level failure: connection refused, DNS, timeout, bad JSON.
    #[error("generation request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("generation service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The service answered, but with blank text.
    #[error("generation service returned empty text")]
    EmptyResponse,

    /// A prompt template failed to render.
    #[error("prompt template error: {0}")]
    Prompt(String),
}
