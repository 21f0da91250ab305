//! `chronicle run` — the full per-commit flow.
//!
//! staged diff → commit message → changelog sync → persist → commit/push →
//! notify. The generated message is printed before anything is mutated; a
//! generation failure aborts before any write.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use chronicle_core::{config, types::SyncOptions, ChangelogEntry};
use chronicle_generator::{context, ChatClient};
use chronicle_sync::{diff, pipeline, sanitize::sanitize, writer, WriteResult};

use super::resolve_document;
use crate::{git, notify, MalformedArg, WellFormedArg};

/// Arguments for `chronicle run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Compute and show everything without writing, committing, or notifying.
    #[arg(long)]
    pub dry_run: bool,

    /// Commit but do not push.
    #[arg(long)]
    pub no_push: bool,

    /// Document to synchronize (defaults to the configured one).
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Override the malformed-document strategy: replace | repair.
    #[arg(long, value_name = "STRATEGY")]
    pub on_malformed: Option<MalformedArg>,

    /// Override the well-formed-document strategy: insert | regenerate.
    #[arg(long, value_name = "STRATEGY")]
    pub on_well_formed: Option<WellFormedArg>,
}

impl RunArgs {
    pub fn run(self) -> Result<()> {
        let cfg = config::load().context("failed to load configuration")?;
        let api_key = config::api_key()?;

        let diff_text = git::staged_diff().context("failed to read the staged diff")?;
        if diff_text.trim().is_empty() {
            bail!("no staged changes found; run `git add` first");
        }

        let client = ChatClient::new(api_key, cfg.api_url.clone(), cfg.model.clone())
            .context("failed to build generation client")?;

        let message = sanitize(
            &client
                .commit_message(&diff_text)
                .context("commit message generation failed")?,
        );
        if message.is_empty() {
            bail!("generated commit message was empty after sanitization");
        }
        println!("{}", "=== Generated commit message ===".bold());
        println!("{message}\n");

        let entry = ChangelogEntry::new(&message);

        let root = git::toplevel()
            .or_else(|_| std::env::current_dir().context("could not determine current directory"))?;
        let mut ctx = context::collect_at(&root);
        ctx.change_summary = Some(entry.summary.clone());

        let doc_path = resolve_document(self.document.clone(), &cfg)?;
        let existing = writer::read_document(&doc_path)?;

        let opts = SyncOptions {
            on_malformed: self
                .on_malformed
                .clone()
                .map(Into::into)
                .unwrap_or(cfg.on_malformed),
            on_well_formed: self
                .on_well_formed
                .clone()
                .map(Into::into)
                .unwrap_or(cfg.on_well_formed),
        };
        let outcome = pipeline::synchronize(existing.as_deref(), &entry, &client, &ctx, &opts)
            .context("changelog synchronization failed")?;
        println!(
            "document was {}; {}",
            outcome.classification,
            action_label(outcome.action)
        );

        if self.dry_run {
            match diff::document_diff(&doc_path, &outcome.content)? {
                Some(unified) => print!("{unified}"),
                None => println!("no document changes"),
            }
            println!("{}", "[dry-run] skipped write, commit, and notification".dimmed());
            return Ok(());
        }

        let write = writer::write_document(&doc_path, &outcome.content, false)
            .context("failed to persist the document")?;
        match &write {
            WriteResult::Written { path } => println!("  ✎  {}", path.display()),
            WriteResult::Unchanged { path } => println!("  ·  {} (unchanged)", path.display()),
            WriteResult::WouldWrite { .. } => unreachable!("dry_run handled above"),
        }

        git::stage(&doc_path).context("failed to stage the document")?;
        git::commit(&message).context("git commit failed")?;
        println!("{} committed", "✓".green());

        if cfg.push && !self.no_push {
            match git::current_branch().and_then(|branch| git::push(&branch).map(|_| branch)) {
                Ok(branch) => println!("{} pushed to {branch}", "✓".green()),
                // Push failures are non-fatal; the commit already landed.
                Err(err) => eprintln!("{} push failed: {err:#}", "⚠".yellow()),
            }
        }

        if let Some(url) = &cfg.webhook_url {
            notify::send(url, &message);
        }

        println!("{} done", "✓".green());
        Ok(())
    }
}

fn action_label(action: pipeline::SyncAction) -> &'static str {
    match action {
        pipeline::SyncAction::Drafted => "drafted a fresh document",
        pipeline::SyncAction::Repaired => "stripped the legacy prefix",
        pipeline::SyncAction::Revised => "revised the existing document",
        pipeline::SyncAction::Kept => "kept the existing document",
    }
}
