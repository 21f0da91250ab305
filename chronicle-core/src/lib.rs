//! Chronicle core library — domain types, configuration, generator seam.
//!
//! Public API surface:
//! - [`types`] — changelog document model and sync strategies
//! - [`config`] — immutable configuration, load / save / init
//! - [`generate`] — [`DocumentGenerator`] trait and its context
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod generate;
pub mod types;

pub use config::Config;
pub use error::ConfigError;
pub use generate::{DocumentGenerator, GenerateError, GenerationContext};
pub use types::{
    ChangelogEntry, MalformedStrategy, SyncOptions, WellFormedStrategy, CHANGELOG_HEADER,
};
