//! Core types shared by the scanner, resolver, and BIF builder.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One column of the fixed metadata schema, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    DocumentNumber,
    InvoiceNo,
    InvoiceDate,
    VendorName,
    VendorCode,
    Assignment,
    TransactionDate,
    Amount,
}

impl Field {
    /// The full schema in the order it is declared in every BIF block.
    pub const ALL: [Field; 8] = [
        Field::DocumentNumber,
        Field::InvoiceNo,
        Field::InvoiceDate,
        Field::VendorName,
        Field::VendorCode,
        Field::Assignment,
        Field::TransactionDate,
        Field::Amount,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::DocumentNumber => "Document Number",
            Field::InvoiceNo => "Invoice No",
            Field::InvoiceDate => "Invoice Date",
            Field::VendorName => "Vendor Name",
            Field::VendorCode => "Vendor Code",
            Field::Assignment => "Assignment",
            Field::TransactionDate => "Transaction Date",
            Field::Amount => "Amount",
        }
    }

    /// Date columns only ever render a real date, never free text.
    pub fn is_date(self) -> bool {
        matches!(self, Field::InvoiceDate | Field::TransactionDate)
    }

    pub fn from_label(label: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.label() == label)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single metadata value as it came out of the record store.
///
/// Serialized untagged. On load `null` becomes `Absent`, JSON numbers
/// `Number`, and strings `Text`; date columns upgrade ISO-8601 text through
/// [`FieldValue::into_date`].
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Absent,
    Number(f64),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Absent,
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawValue::deserialize(deserializer)? {
            RawValue::Absent => FieldValue::Absent,
            RawValue::Number(n) => FieldValue::Number(n),
            RawValue::Text(s) => FieldValue::Text(s),
        })
    }
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Reinterpret ISO-8601 text as a date or timestamp. Anything else is
    /// returned unchanged.
    pub fn into_date(self) -> Self {
        let text = match self {
            FieldValue::Text(text) => text,
            other => return other,
        };
        let trimmed = text.trim();
        for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, pattern) {
                return FieldValue::DateTime(dt);
            }
        }
        match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(d) => FieldValue::Date(d),
            Err(_) => FieldValue::Text(text),
        }
    }

    /// The calendar date carried by this value, if it is date-typed.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::DateTime(dt) => Some(dt.date()),
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

/// Contextual identifiers derived from a leaf folder's position in the tree.
///
/// Segments missing from shallow paths stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderContext {
    pub account_folder: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub sub_category: Option<String>,
}

/// Mode flags embedded verbatim in every document block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockFlags {
    pub create_location: bool,
    pub append: bool,
    pub delete_images: bool,
}
