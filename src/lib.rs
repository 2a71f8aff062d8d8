//! bifgen: BIF Index Generation
//!
//! Scans a tree of scanned documents, resolves each document's metadata from a
//! record store, and writes BIF sidecar index files next to the documents for
//! downstream imaging tools.

pub mod bif;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod report;
pub mod resolver;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod writer;

pub use engine::{BifEngine, RunSummary};
pub use error::{BifError, StorageError};
pub use resolver::MetadataResolver;
pub use writer::BifWriter;
