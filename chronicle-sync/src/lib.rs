//! # chronicle-sync
//!
//! The documentation synchronization engine: decide whether an existing
//! changelog document is well-formed, regenerate or repair it, and insert a
//! new dated entry exactly once — idempotently, regardless of the document's
//! prior state.
//!
//! Call [`synchronize`] for one end-to-end pass over a document, then persist
//! the result with [`writer::write_document`].

pub mod classify;
pub mod diff;
pub mod error;
pub mod insert;
pub mod legacy;
pub mod pipeline;
pub mod sanitize;
pub mod writer;

pub use classify::{classify, Classification};
pub use error::SyncError;
pub use pipeline::{synchronize, SyncAction, SyncOutcome};
pub use writer::WriteResult;
