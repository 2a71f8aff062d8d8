//! Metadata resolution
//!
//! Maps a document file to its metadata record. Store failures are logged here
//! and collapsed into "no record", so the engine only ever sees a record or
//! nothing and renders blank fields for the latter.

use crate::store::{MetadataRecord, MetadataStore};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error};

/// Resolves document keys against a record store.
#[derive(Clone)]
pub struct MetadataResolver {
    store: Arc<dyn MetadataStore>,
}

impl MetadataResolver {
    pub fn new(store: Arc<dyn MetadataStore>) -> Self {
        Self { store }
    }

    /// Look up `document_key`; `None` covers both a miss and an unreachable store.
    pub fn resolve(&self, document_key: &str) -> Option<MetadataRecord> {
        debug!(key = document_key, "Resolving metadata");
        match self.store.fetch(document_key) {
            Ok(Some(record)) => {
                debug!(key = document_key, ?record, "Metadata resolved");
                Some(record)
            }
            Ok(None) => {
                debug!(key = document_key, "No metadata record found");
                None
            }
            Err(e) => {
                error!(key = document_key, error = %e, "Metadata lookup failed");
                None
            }
        }
    }

    /// Resolve the record for a document file by its key.
    pub fn resolve_document(&self, document: &Path) -> Option<MetadataRecord> {
        self.resolve(&document_key(document))
    }
}

/// The store key for a document: its file name with the extension stripped.
pub fn document_key(document: &Path) -> String {
    document
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
