//! Sled-backed record store.

use crate::error::StorageError;
use crate::store::{MetadataRecord, MetadataStore};
use std::path::Path;

const RECORDS_TREE: &str = "records";

/// Records persisted as JSON under their Document Number.
pub struct SledMetadataStore {
    records: sled::Tree,
}

impl SledMetadataStore {
    /// Open (or create) the store at `path`.
    pub fn new(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = sled::open(path)?;
        Self::from_db(&db)
    }

    pub fn from_db(db: &sled::Db) -> Result<Self, StorageError> {
        let records = db.open_tree(RECORDS_TREE)?;
        Ok(Self { records })
    }

    /// Insert many records in one batch; records without a key are skipped.
    ///
    /// Returns the number of records stored.
    pub fn import<I>(&self, records: I) -> Result<usize, StorageError>
    where
        I: IntoIterator<Item = MetadataRecord>,
    {
        let mut batch = sled::Batch::default();
        let mut stored = 0;
        for record in records {
            let Some(key) = record.key() else {
                tracing::warn!("Skipping record without a Document Number: {:?}", record);
                continue;
            };
            batch.insert(key.as_bytes(), serde_json::to_vec(&record)?);
            stored += 1;
        }
        self.records.apply_batch(batch)?;
        self.records.flush()?;
        Ok(stored)
    }
}

impl MetadataStore for SledMetadataStore {
    fn fetch(&self, key: &str) -> Result<Option<MetadataRecord>, StorageError> {
        match self.records.get(key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, record: &MetadataRecord) -> Result<(), StorageError> {
        self.records
            .insert(key.as_bytes(), serde_json::to_vec(record)?)?;
        self.records.flush()?;
        Ok(())
    }

    fn len(&self) -> Result<usize, StorageError> {
        Ok(self.records.len())
    }
}
