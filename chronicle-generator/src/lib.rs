//! # chronicle-generator
//!
//! Production implementation of the generator seam: an OpenAI-compatible
//! chat-completions client with embedded Tera prompt templates, plus
//! project-context discovery.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chronicle_core::DocumentGenerator;
//! use chronicle_generator::{context, ChatClient};
//!
//! fn draft(api_key: String) -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ChatClient::new(
//!         api_key,
//!         "https://api.openai.com/v1/chat/completions".to_string(),
//!         "gpt-4o-mini".to_string(),
//!     )?;
//!     let ctx = context::collect_at(std::path::Path::new("."));
//!     let readme = client.draft(&ctx)?;
//!     println!("{} bytes drafted", readme.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod context;
pub mod prompt;

pub use client::ChatClient;
pub use prompt::PromptEngine;
