//! Document blocks and the builder that produces them.

use crate::bif::format::{format_flag, format_value, relative_location};
use crate::store::MetadataRecord;
use crate::types::{BlockFlags, Field, FieldValue, FolderContext};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// One document's entry in a BIF file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentBlock {
    /// 1-based position within its file.
    pub ordinal: usize,
    pub document_type: String,
    pub path: String,
    /// Declared fields with their already formatted values.
    pub values: Vec<(Field, String)>,
    pub location: String,
    pub flags: BlockFlags,
}

impl DocumentBlock {
    pub fn with_ordinal(mut self, ordinal: usize) -> Self {
        self.ordinal = ordinal;
        self
    }

    pub fn value(&self, field: Field) -> Option<&str> {
        self.values
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    /// Append this block's lines to `out`. Line order is part of the format.
    pub fn render_into(&self, out: &mut String) {
        let n = self.ordinal;
        // Writing to a String cannot fail.
        let _ = writeln!(out, "document{}={}\t\"{}\"", n, self.document_type, self.path);
        let labels: Vec<&str> = self.values.iter().map(|(f, _)| f.label()).collect();
        let _ = writeln!(out, "doc{}.fields={}", n, labels.join("|"));
        for (idx, (_, value)) in self.values.iter().enumerate() {
            let _ = writeln!(out, "doc{}.field{}={}", n, idx + 1, value);
        }
        let _ = writeln!(out, "doc{}.location={}", n, self.location);
        let _ = writeln!(
            out,
            "doc{}.create_location={}",
            n,
            format_flag(self.flags.create_location)
        );
        let _ = writeln!(out, "doc{}.append={}", n, format_flag(self.flags.append));
        let _ = writeln!(
            out,
            "doc{}.delete_images={}",
            n,
            format_flag(self.flags.delete_images)
        );
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }
}

/// Builds document blocks for documents under one scan root.
#[derive(Debug, Clone)]
pub struct BifBuilder {
    root: PathBuf,
    fields: Vec<Field>,
    flags: BlockFlags,
}

impl BifBuilder {
    pub fn new(root: impl Into<PathBuf>, flags: BlockFlags) -> Self {
        Self {
            root: root.into(),
            fields: Field::ALL.to_vec(),
            flags,
        }
    }

    /// Override the declared field list.
    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    /// Build the block for `document`.
    ///
    /// A missing record yields a block whose field values are all empty.
    pub fn build(
        &self,
        ordinal: usize,
        context: &FolderContext,
        document: &Path,
        record: Option<&MetadataRecord>,
    ) -> DocumentBlock {
        let absent = FieldValue::Absent;
        let values = self
            .fields
            .iter()
            .map(|&field| {
                let value = record.map(|r| r.get(field)).unwrap_or(&absent);
                (field, format_value(field, value))
            })
            .collect();

        let folder = document.parent().unwrap_or(self.root.as_path());
        DocumentBlock {
            ordinal,
            document_type: context.sub_category.clone().unwrap_or_default(),
            path: document.display().to_string(),
            values,
            location: relative_location(folder, &self.root),
            flags: self.flags,
        }
    }
}
