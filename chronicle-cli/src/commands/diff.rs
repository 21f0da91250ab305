//! `chronicle diff` — preview what a sync would change, without the network.
//!
//! Only the local transforms run here: the preview entry is inserted onto
//! the existing (or repaired) document and diffed against disk. Paths that
//! would call the generation service are reported instead of simulated.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use chronicle_core::{config, types::MalformedStrategy, ChangelogEntry};
use chronicle_sync::{classify, diff, insert, legacy, writer, Classification};

use super::resolve_document;

/// Arguments for `chronicle diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Document to preview (defaults to the configured one).
    #[arg(long)]
    pub document: Option<PathBuf>,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let cfg = config::load().context("failed to load configuration")?;
        let path = resolve_document(self.document, &cfg)?;

        let existing = writer::read_document(&path)?;
        let entry = ChangelogEntry::new("docs: preview entry");

        let next = match classify(existing.as_deref()) {
            Classification::Absent => {
                println!(
                    "no document at {}; `chronicle run` would draft a fresh one",
                    path.display()
                );
                return Ok(());
            }
            Classification::Malformed => match cfg.on_malformed {
                MalformedStrategy::Repair => {
                    let cleaned = legacy::clean(existing.as_deref().unwrap_or(""));
                    if cleaned.is_empty() {
                        println!(
                            "document is entirely legacy content; `chronicle run` would draft a fresh one"
                        );
                        return Ok(());
                    }
                    insert::insert(&cleaned, &entry)
                }
                MalformedStrategy::Replace => {
                    println!(
                        "document is malformed; `chronicle run` would replace it via the generation service"
                    );
                    return Ok(());
                }
            },
            Classification::WellFormed => {
                insert::insert(existing.as_deref().unwrap_or(""), &entry)
            }
        };

        match diff::document_diff(&path, &next)? {
            Some(unified) => {
                print!("{unified}");
                if !unified.ends_with('\n') {
                    println!();
                }
            }
            None => println!("No differences for {}.", path.display()),
        }
        Ok(())
    }
}
