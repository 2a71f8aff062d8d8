//! Whole BIF files: header, count, and ordered document blocks.

use crate::bif::block::DocumentBlock;
use crate::bif::format::parse_flag;
use crate::error::BifError;
use crate::types::{BlockFlags, Field};
use serde::Serialize;
use std::path::Path;

pub const FILE_HEADER: &str = "[Documents File]";
pub const SECTION_HEADER: &str = "[documents]";

/// An ordered set of document blocks with contiguous ordinals from 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BifFile {
    blocks: Vec<DocumentBlock>,
}

impl BifFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block, assigning it the next ordinal.
    pub fn push(&mut self, block: DocumentBlock) -> usize {
        let ordinal = self.blocks.len() + 1;
        self.blocks.push(block.with_ordinal(ordinal));
        ordinal
    }

    pub fn count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[DocumentBlock] {
        &self.blocks
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "{}\n{}\ncount={}\n",
            FILE_HEADER,
            SECTION_HEADER,
            self.count()
        );
        for block in &self.blocks {
            block.render_into(&mut out);
        }
        out
    }

    pub fn read(path: &Path) -> Result<Self, BifError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse BIF text. The count header must agree with the blocks present.
    pub fn parse(content: &str) -> Result<Self, BifError> {
        let mut lines = content.lines().enumerate().map(|(i, l)| (i + 1, l));

        for expected in [FILE_HEADER, SECTION_HEADER] {
            match lines.next() {
                Some((_, line)) if line.trim() == expected => {}
                Some((n, line)) => {
                    return Err(parse_error(n, format!("expected {}, found {:?}", expected, line)))
                }
                None => return Err(parse_error(0, format!("missing {}", expected))),
            }
        }
        let declared = match lines.next() {
            Some((n, line)) => line
                .strip_prefix("count=")
                .and_then(|c| c.trim().parse::<usize>().ok())
                .ok_or_else(|| parse_error(n, format!("invalid count header {:?}", line)))?,
            None => return Err(parse_error(0, "missing count header")),
        };

        let mut file = BifFile::new();
        let mut current: Option<PartialBlock> = None;
        for (n, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(rest) = line.strip_prefix("document") {
                if let Some(done) = current.take() {
                    file.blocks.push(done.finish());
                }
                current = Some(PartialBlock::start(n, rest)?);
                continue;
            }
            let block = current
                .as_mut()
                .ok_or_else(|| parse_error(n, "property line before any document line"))?;
            block.apply(n, line)?;
        }
        if let Some(done) = current.take() {
            file.blocks.push(done.finish());
        }

        for (idx, block) in file.blocks.iter().enumerate() {
            if block.ordinal != idx + 1 {
                return Err(parse_error(
                    0,
                    format!("ordinals not contiguous: expected {}, found {}", idx + 1, block.ordinal),
                ));
            }
        }
        if declared != file.count() {
            return Err(parse_error(
                3,
                format!("count={} but file holds {} documents", declared, file.count()),
            ));
        }
        Ok(file)
    }
}

fn parse_error(line: usize, reason: impl Into<String>) -> BifError {
    BifError::ParseError {
        line,
        reason: reason.into(),
    }
}

struct PartialBlock {
    block: DocumentBlock,
    raw_values: Vec<String>,
}

impl PartialBlock {
    /// `rest` is the text after `document`, e.g. `1=invoices\t"/path"`.
    fn start(n: usize, rest: &str) -> Result<Self, BifError> {
        let (ordinal, value) = rest
            .split_once('=')
            .ok_or_else(|| parse_error(n, "document line without '='"))?;
        let ordinal = ordinal
            .parse::<usize>()
            .map_err(|_| parse_error(n, format!("invalid document ordinal {:?}", ordinal)))?;
        let (document_type, path) = value
            .split_once('\t')
            .ok_or_else(|| parse_error(n, "document line without tab separator"))?;
        Ok(Self {
            block: DocumentBlock {
                ordinal,
                document_type: document_type.to_string(),
                path: path.trim_matches('"').to_string(),
                values: Vec::new(),
                location: String::new(),
                flags: BlockFlags::default(),
            },
            raw_values: Vec::new(),
        })
    }

    fn apply(&mut self, n: usize, line: &str) -> Result<(), BifError> {
        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| parse_error(n, format!("line without '=': {:?}", line)))?;
        let prefix = format!("doc{}.", self.block.ordinal);
        let property = key.strip_prefix(&prefix).ok_or_else(|| {
            parse_error(
                n,
                format!("{:?} does not belong to document {}", key, self.block.ordinal),
            )
        })?;

        let flag = |raw: &str| {
            parse_flag(raw).ok_or_else(|| parse_error(n, format!("invalid flag value {:?}", raw)))
        };
        match property {
            "fields" => {
                let mut fields = Vec::new();
                for label in value.split('|').filter(|l| !l.is_empty()) {
                    let field = Field::from_label(label)
                        .ok_or_else(|| parse_error(n, format!("unknown field {:?}", label)))?;
                    fields.push(field);
                }
                self.block.values = fields.into_iter().map(|f| (f, String::new())).collect();
            }
            "location" => self.block.location = value.to_string(),
            "create_location" => self.block.flags.create_location = flag(value)?,
            "append" => self.block.flags.append = flag(value)?,
            "delete_images" => self.block.flags.delete_images = flag(value)?,
            other => {
                let position = other
                    .strip_prefix("field")
                    .and_then(|p| p.parse::<usize>().ok())
                    .filter(|p| *p >= 1)
                    .ok_or_else(|| parse_error(n, format!("unknown property {:?}", other)))?;
                if self.raw_values.len() < position {
                    self.raw_values.resize(position, String::new());
                }
                self.raw_values[position - 1] = value.to_string();
            }
        }
        Ok(())
    }

    fn finish(mut self) -> DocumentBlock {
        for (idx, (_, value)) in self.block.values.iter_mut().enumerate() {
            if let Some(raw) = self.raw_values.get_mut(idx) {
                *value = std::mem::take(raw);
            }
        }
        self.block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bif::block::BifBuilder;
    use crate::store::MetadataRecord;
    use crate::types::{FieldValue, FolderContext};
    use std::path::PathBuf;

    fn block(name: &str) -> DocumentBlock {
        let builder = BifBuilder::new(
            "/scan",
            BlockFlags {
                create_location: true,
                append: true,
                delete_images: false,
            },
        );
        let record = MetadataRecord {
            document_number: FieldValue::text(name),
            vendor_name: FieldValue::text("ACME = Corp"),
            ..Default::default()
        };
        let ctx = FolderContext {
            sub_category: Some("invoices".to_string()),
            ..Default::default()
        };
        builder.build(
            99,
            &ctx,
            &PathBuf::from(format!("/scan/a/invoices/{}.pdf", name)),
            Some(&record),
        )
    }

    #[test]
    fn test_push_assigns_contiguous_ordinals() {
        let mut file = BifFile::new();
        assert_eq!(file.push(block("A")), 1);
        assert_eq!(file.push(block("B")), 2);
        let ordinals: Vec<usize> = file.blocks().iter().map(|b| b.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2]);
    }

    #[test]
    fn test_render_header_and_count() {
        let mut file = BifFile::new();
        file.push(block("A"));
        file.push(block("B"));
        let rendered = file.render();
        assert!(rendered.starts_with("[Documents File]\n[documents]\ncount=2\ndocument1=invoices\t"));
        assert!(rendered.contains("document2=invoices\t\"/scan/a/invoices/B.pdf\"\n"));
        assert!(rendered.ends_with("doc2.delete_images=False\n"));
    }

    #[test]
    fn test_empty_file_renders_zero_count() {
        assert_eq!(BifFile::new().render(), "[Documents File]\n[documents]\ncount=0\n");
    }

    #[test]
    fn test_parse_rendered_file() {
        let mut file = BifFile::new();
        file.push(block("A"));
        file.push(block("B"));
        let parsed = BifFile::parse(&file.render()).unwrap();
        assert_eq!(parsed, file);
        assert_eq!(parsed.blocks()[1].value(Field::VendorName), Some("ACME = Corp"));
    }

    #[test]
    fn test_parse_rejects_stale_count() {
        let mut file = BifFile::new();
        file.push(block("A"));
        let stale = file.render().replace("count=1", "count=0");
        let err = BifFile::parse(&stale).unwrap_err();
        assert!(matches!(err, BifError::ParseError { .. }));
    }

    #[test]
    fn test_parse_rejects_foreign_property() {
        let text = "[Documents File]\n[documents]\ncount=1\ndocument1=x\t\"/a.pdf\"\ndoc2.location=a\n";
        assert!(BifFile::parse(text).is_err());
    }

    #[test]
    fn test_parse_rejects_missing_header() {
        assert!(BifFile::parse("count=0\n").is_err());
        assert!(BifFile::parse("").is_err());
    }
}
