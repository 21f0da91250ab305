//! Chronicle — commit automation with an idempotent changelog sync engine.
//!
//! # Usage
//!
//! ```text
//! chronicle run [--dry-run] [--no-push] [--document <path>]
//!               [--on-malformed replace|repair]
//!               [--on-well-formed insert|regenerate]
//! chronicle diff [--document <path>]
//! chronicle status [--document <path>] [--json]
//! chronicle init
//! ```

mod commands;
mod git;
mod notify;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use chronicle_core::types::{MalformedStrategy, WellFormedStrategy};
use commands::{diff::DiffArgs, init::InitArgs, run::RunArgs, status::StatusArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "chronicle",
    version,
    about = "Generate a commit message and keep the README changelog in sync",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a commit message, sync the changelog, commit, and push.
    Run(RunArgs),

    /// Show the unified diff a sync would apply to the document.
    Diff(DiffArgs),

    /// Show how the document currently classifies.
    Status(StatusArgs),

    /// Scaffold ~/.chronicle/config.yaml.
    Init(InitArgs),
}

// ---------------------------------------------------------------------------
// Shared strategy arguments — parsed from CLI strings, convert to core types
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `MalformedStrategy` from CLI args.
#[derive(Debug, Clone, Default)]
pub struct MalformedArg(pub MalformedStrategy);

impl FromStr for MalformedArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "replace" => Ok(Self(MalformedStrategy::Replace)),
            "repair" => Ok(Self(MalformedStrategy::Repair)),
            other => Err(format!(
                "unknown malformed strategy '{other}'; expected: replace, repair"
            )),
        }
    }
}

impl fmt::Display for MalformedArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<MalformedArg> for MalformedStrategy {
    fn from(a: MalformedArg) -> Self {
        a.0
    }
}

/// Thin wrapper so clap can parse `WellFormedStrategy` from CLI args.
#[derive(Debug, Clone, Default)]
pub struct WellFormedArg(pub WellFormedStrategy);

impl FromStr for WellFormedArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "insert" => Ok(Self(WellFormedStrategy::Insert)),
            "regenerate" => Ok(Self(WellFormedStrategy::Regenerate)),
            other => Err(format!(
                "unknown well-formed strategy '{other}'; expected: insert, regenerate"
            )),
        }
    }
}

impl fmt::Display for WellFormedArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<WellFormedArg> for WellFormedStrategy {
    fn from(a: WellFormedArg) -> Self {
        a.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Status(args) => args.run(),
        Commands::Init(args) => args.run(),
    }
}
