//! One end-to-end synchronization call.
//!
//! classify → (draft | repair | revise | keep) → insert. The orchestrator is
//! a pure transform from current content + entry to next content; persisting
//! the result is the caller's step (see [`crate::writer`]). A generator
//! failure propagates before any content is assembled, so the existing
//! document is never corrupted.

use chronicle_core::{
    types::{MalformedStrategy, SyncOptions, WellFormedStrategy},
    ChangelogEntry, DocumentGenerator, GenerationContext,
};

use crate::classify::{classify, Classification};
use crate::error::SyncError;
use crate::{insert, legacy};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// How the base document was obtained before the entry was inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// A fresh document was drafted by the generator.
    Drafted,
    /// Leading legacy lines were stripped; the remainder was kept.
    Repaired,
    /// The generator revised the existing well-formed document.
    Revised,
    /// The existing document was kept unchanged.
    Kept,
}

/// Result of one synchronization call.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// Final document content, ready to persist.
    pub content: String,
    /// How the prior document classified.
    pub classification: Classification,
    /// Which path produced the base content.
    pub action: SyncAction,
}

// ---------------------------------------------------------------------------
// synchronize
// ---------------------------------------------------------------------------

/// Run one synchronization call over `existing`.
///
/// State machine per classification:
/// - `Absent` → draft via the generator.
/// - `Malformed` → replace (draft) or repair (strip legacy prefix), per
///   `opts.on_malformed`. A repair that leaves nothing behind falls back to
///   drafting — an all-legacy document is treated as absent.
/// - `WellFormed` → keep as-is or revise via the generator, per
///   `opts.on_well_formed`.
///
/// The new entry is then inserted exactly once, directly below the header.
pub fn synchronize<G: DocumentGenerator>(
    existing: Option<&str>,
    entry: &ChangelogEntry,
    generator: &G,
    ctx: &GenerationContext,
    opts: &SyncOptions,
) -> Result<SyncOutcome, SyncError> {
    let classification = classify(existing);

    let (base, action) = match classification {
        Classification::Absent => (draft(generator, ctx)?, SyncAction::Drafted),
        Classification::Malformed => match opts.on_malformed {
            MalformedStrategy::Replace => (draft(generator, ctx)?, SyncAction::Drafted),
            MalformedStrategy::Repair => {
                let cleaned = legacy::clean(existing.unwrap_or(""));
                if cleaned.is_empty() {
                    // Nothing survived the repair; same as no document at all.
                    (draft(generator, ctx)?, SyncAction::Drafted)
                } else {
                    (cleaned, SyncAction::Repaired)
                }
            }
        },
        Classification::WellFormed => {
            let current = existing.unwrap_or("");
            match opts.on_well_formed {
                WellFormedStrategy::Insert => (current.to_string(), SyncAction::Kept),
                WellFormedStrategy::Regenerate => {
                    let revised = generator.revise(ctx, current)?;
                    (normalize_draft(&revised), SyncAction::Revised)
                }
            }
        }
    };

    let content = insert::insert(&base, entry);
    tracing::debug!(
        "synchronized: {} -> {:?}, {} bytes",
        classification,
        action,
        content.len()
    );

    Ok(SyncOutcome {
        content,
        classification,
        action,
    })
}

fn draft<G: DocumentGenerator>(
    generator: &G,
    ctx: &GenerationContext,
) -> Result<String, SyncError> {
    let text = generator.draft(ctx)?;
    Ok(normalize_draft(&text))
}

/// Generated text is opaque; only surrounding whitespace is normalized.
fn normalize_draft(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    format!("{trimmed}\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
