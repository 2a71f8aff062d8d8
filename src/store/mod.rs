//! Metadata Record Store
//!
//! The lookup contract the engine requires from the external record store,
//! plus the record type it returns. Records are keyed by Document Number.

pub mod persistence;

pub use persistence::SledMetadataStore;

use crate::error::StorageError;
use crate::types::{Field, FieldValue};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// MetadataRecord: the fixed eight-field description of one document.
///
/// Missing or null columns deserialize as `FieldValue::Absent`. Only the date
/// columns parse ISO-8601 text into dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(rename = "Document Number", default)]
    pub document_number: FieldValue,
    #[serde(rename = "Invoice No", default)]
    pub invoice_no: FieldValue,
    #[serde(rename = "Invoice Date", default, deserialize_with = "date_value")]
    pub invoice_date: FieldValue,
    #[serde(rename = "Vendor Name", default)]
    pub vendor_name: FieldValue,
    #[serde(rename = "Vendor Code", default)]
    pub vendor_code: FieldValue,
    #[serde(rename = "Assignment", default)]
    pub assignment: FieldValue,
    #[serde(rename = "Transaction Date", default, deserialize_with = "date_value")]
    pub transaction_date: FieldValue,
    #[serde(rename = "Amount", default)]
    pub amount: FieldValue,
}

fn date_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FieldValue, D::Error> {
    FieldValue::deserialize(deserializer).map(FieldValue::into_date)
}

impl MetadataRecord {
    pub fn get(&self, field: Field) -> &FieldValue {
        match field {
            Field::DocumentNumber => &self.document_number,
            Field::InvoiceNo => &self.invoice_no,
            Field::InvoiceDate => &self.invoice_date,
            Field::VendorName => &self.vendor_name,
            Field::VendorCode => &self.vendor_code,
            Field::Assignment => &self.assignment,
            Field::TransactionDate => &self.transaction_date,
            Field::Amount => &self.amount,
        }
    }

    /// Store key for this record, if it carries a usable Document Number.
    pub fn key(&self) -> Option<String> {
        match &self.document_number {
            FieldValue::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            FieldValue::Number(n) => Some(format!("{}", n.trunc() as i64)),
            _ => None,
        }
    }

    /// Field/value pairs in schema order.
    pub fn entries(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

/// Record store interface
pub trait MetadataStore: Send + Sync {
    /// Fetch the record for `key`; `Ok(None)` when the store has no such record.
    fn fetch(&self, key: &str) -> Result<Option<MetadataRecord>, StorageError>;
    fn put(&self, key: &str, record: &MetadataRecord) -> Result<(), StorageError>;
    fn len(&self) -> Result<usize, StorageError>;

    fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

/// Process-local store, used for tests and dry runs without a database.
#[derive(Default)]
pub struct InMemoryMetadataStore {
    records: RwLock<HashMap<String, MetadataRecord>>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = (String, MetadataRecord)>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().collect()),
        }
    }
}

fn poisoned() -> StorageError {
    StorageError::IoError(std::io::Error::new(
        std::io::ErrorKind::Other,
        "in-memory record store lock poisoned",
    ))
}

impl MetadataStore for InMemoryMetadataStore {
    fn fetch(&self, key: &str) -> Result<Option<MetadataRecord>, StorageError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.get(key).cloned())
    }

    fn put(&self, key: &str, record: &MetadataRecord) -> Result<(), StorageError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.insert(key.to_string(), record.clone());
        Ok(())
    }

    fn len(&self) -> Result<usize, StorageError> {
        Ok(self.records.read().map_err(|_| poisoned())?.len())
    }
}
