//! `chronicle status` — document classification at a glance.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use chronicle_core::{config, CHANGELOG_HEADER};
use chronicle_sync::{classify, writer, Classification};

use super::resolve_document;

/// Arguments for `chronicle status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Document to inspect (defaults to the configured one).
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let cfg = config::load().context("failed to load configuration")?;
        let path = resolve_document(self.document, &cfg)?;

        let existing = writer::read_document(&path)?;
        let classification = classify(existing.as_deref());
        let report = DocumentStatus {
            document: path.display().to_string(),
            status: classification.to_string(),
            header_present: existing.as_deref().map(has_header).unwrap_or(false),
            entries: existing.as_deref().map(entry_count).unwrap_or(0),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        print_table(report, classification);
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct DocumentStatus {
    document: String,
    status: String,
    header_present: bool,
    entries: usize,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "document")]
    document: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "header")]
    header: String,
    #[tabled(rename = "entries")]
    entries: usize,
}

fn print_table(report: DocumentStatus, classification: Classification) {
    let status = match classification {
        Classification::WellFormed => report.status.green().to_string(),
        Classification::Malformed => report.status.yellow().to_string(),
        Classification::Absent => report.status.dimmed().to_string(),
    };
    let header = if report.header_present {
        "present"
    } else {
        "missing"
    };
    let row = StatusTableRow {
        document: report.document,
        status,
        header: header.to_string(),
        entries: report.entries,
    };
    let mut table = Table::new(vec![row]);
    table.with(Style::rounded());
    println!("{table}");
}

fn has_header(content: &str) -> bool {
    content.lines().any(|line| line.trim() == CHANGELOG_HEADER)
}

/// Dated entries in the changelog section: contiguous bullets directly below
/// the first header, up to the next heading.
fn entry_count(content: &str) -> usize {
    let mut lines = content.lines();
    for line in lines.by_ref() {
        if line.trim() == CHANGELOG_HEADER {
            break;
        }
    }
    lines
        .take_while(|line| !line.trim_start().starts_with('#'))
        .filter(|line| line.trim_start().starts_with("- **"))
        .count()
}
