//! `chronicle init` — scaffold the starter configuration.

use anyhow::{Context, Result};
use clap::Args;

use chronicle_core::config;

/// Arguments for `chronicle init`.
#[derive(Args, Debug)]
pub struct InitArgs {}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let (path, created) = config::init().context("failed to scaffold configuration")?;
        if created {
            println!("✓ Wrote starter config to {}", path.display());
            println!("  Export CHRONICLE_API_KEY (or OPENAI_API_KEY) before `chronicle run`.");
        } else {
            println!("Config already exists at {}", path.display());
        }
        Ok(())
    }
}
