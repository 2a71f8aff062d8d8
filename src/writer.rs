//! BIF Writer
//!
//! Turns one leaf folder into BIF output. In separate mode every document gets
//! its own `<stem>.bif`, or `<file name>.bif` when another document in the
//! folder shares its stem; in aggregated mode the whole folder goes into a single
//! file. Aggregated blocks are collected in memory and written once, so a
//! persisted file always carries its true count.

use crate::bif::{BifBuilder, BifFile, BIF_EXTENSION};
use crate::config::{OutputConfig, SeparateMetadata};
use crate::error::{BifError, StorageError};
use crate::resolver::MetadataResolver;
use crate::tree::LeafFolder;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What happened to one written (or planned) BIF file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    pub path: PathBuf,
    /// Blocks in the file after the write, including appended ones.
    pub documents: usize,
    pub appended: bool,
}

/// Result of processing one folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FolderOutcome {
    pub folder: PathBuf,
    pub documents: usize,
    pub unresolved: usize,
    pub files: Vec<WrittenFile>,
}

/// Writes BIF files for leaf folders under one scan root.
pub struct BifWriter {
    builder: BifBuilder,
    resolver: MetadataResolver,
    output: OutputConfig,
    dry_run: bool,
}

impl BifWriter {
    pub fn new(root: impl Into<PathBuf>, resolver: MetadataResolver, output: OutputConfig) -> Self {
        let builder = BifBuilder::new(root, output.flags());
        Self {
            builder,
            resolver,
            output,
            dry_run: false,
        }
    }

    /// Compute output without touching the filesystem.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Produce the BIF output for `folder` in the configured mode.
    ///
    /// Folders without documents produce nothing.
    pub fn process_folder(&self, folder: &LeafFolder) -> Result<FolderOutcome, BifError> {
        if folder.documents.is_empty() {
            return Ok(FolderOutcome {
                folder: folder.path.clone(),
                ..Default::default()
            });
        }
        if self.output.create_separate_bif {
            self.write_separate(folder)
        } else {
            self.write_aggregated(folder)
        }
    }

    /// One single-block file per document, each overwriting any previous file.
    fn write_separate(&self, folder: &LeafFolder) -> Result<FolderOutcome, BifError> {
        let mut outcome = FolderOutcome {
            folder: folder.path.clone(),
            ..Default::default()
        };

        let anchor_record = match self.output.separate_metadata {
            SeparateMetadata::FolderAnchor => {
                folder.anchor().and_then(|a| self.resolver.resolve_document(a))
            }
            SeparateMetadata::PerDocument => None,
        };

        let targets = separate_targets(&folder.documents)?;
        for (document, target) in folder.documents.iter().zip(targets) {
            let record = match self.output.separate_metadata {
                SeparateMetadata::FolderAnchor => anchor_record.clone(),
                SeparateMetadata::PerDocument => self.resolver.resolve_document(document),
            };
            if record.is_none() {
                outcome.unresolved += 1;
            }

            let mut file = BifFile::new();
            file.push(
                self.builder
                    .build(1, &folder.context, document, record.as_ref()),
            );

            debug!("BIF {} creation started", target.display());
            self.persist(&target, &file)?;
            outcome.documents += 1;
            outcome.files.push(WrittenFile {
                path: target,
                documents: 1,
                appended: false,
            });
        }

        info!(
            folder = %folder.path.display(),
            files = outcome.files.len(),
            "Separate BIF files created"
        );
        Ok(outcome)
    }

    /// All documents of the folder in one file, written once with its final count.
    fn write_aggregated(&self, folder: &LeafFolder) -> Result<FolderOutcome, BifError> {
        let target = folder.path.join(self.aggregate_file_name());
        let mut outcome = FolderOutcome {
            folder: folder.path.clone(),
            ..Default::default()
        };

        let mut file = if self.output.append && target.is_file() {
            let existing = BifFile::read(&target)?;
            debug!(
                "Appending to {} ({} existing documents)",
                target.display(),
                existing.count()
            );
            existing
        } else {
            BifFile::new()
        };
        let appended = !file.is_empty();

        for document in &folder.documents {
            let record = self.resolver.resolve_document(document);
            if record.is_none() {
                outcome.unresolved += 1;
            }
            let ordinal = file.count() + 1;
            file.push(
                self.builder
                    .build(ordinal, &folder.context, document, record.as_ref()),
            );
            outcome.documents += 1;
        }

        self.persist(&target, &file)?;
        info!(
            folder = %folder.path.display(),
            file = %target.display(),
            count = file.count(),
            "BIF created"
        );
        outcome.files.push(WrittenFile {
            path: target,
            documents: file.count(),
            appended,
        });
        Ok(outcome)
    }

    fn aggregate_file_name(&self) -> String {
        match &self.output.aggregate_file_name {
            Some(name) => name.clone(),
            None => format!("{}.{}", short_id(), BIF_EXTENSION),
        }
    }

    /// Write the whole file in one go, replacing any previous content.
    fn persist(&self, target: &Path, file: &BifFile) -> Result<(), BifError> {
        if self.dry_run {
            debug!("Dry run, not writing {}", target.display());
            return Ok(());
        }
        std::fs::write(target, file.render()).map_err(|source| {
            BifError::StorageError(StorageError::WriteFailed {
                path: target.to_path_buf(),
                source,
            })
        })
    }
}

/// Output path for each document in separate mode, checked for uniqueness
/// before anything is written.
fn separate_targets(documents: &[PathBuf]) -> Result<Vec<PathBuf>, BifError> {
    let mut stems: HashMap<String, usize> = HashMap::new();
    for document in documents {
        *stems.entry(stem_key(document)).or_default() += 1;
    }

    let mut seen = HashSet::new();
    let mut targets = Vec::with_capacity(documents.len());
    for document in documents {
        let target = if stems.get(&stem_key(document)).copied().unwrap_or(0) > 1 {
            let mut name = document.file_name().unwrap_or_default().to_os_string();
            name.push(".");
            name.push(BIF_EXTENSION);
            document.with_file_name(name)
        } else {
            document.with_extension(BIF_EXTENSION)
        };
        // Case-folded so that case-insensitive filesystems cannot merge two targets.
        if !seen.insert(target.to_string_lossy().to_lowercase()) {
            return Err(BifError::StorageError(StorageError::TargetCollision {
                path: target,
            }));
        }
        targets.push(target);
    }
    Ok(targets)
}

fn stem_key(document: &Path) -> String {
    document
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// First eight hex characters of a random UUID.
fn short_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}
