//! BIF Engine
//!
//! Drives a full run: scan the root, hand each leaf folder to the writer, and
//! collect a summary. Folders are processed one after another; a folder whose
//! output cannot be written is recorded as a failure and the scan continues.

use crate::config::{OutputConfig, ScanConfig};
use crate::error::BifError;
use crate::resolver::MetadataResolver;
use crate::tree::FolderScanner;
use crate::writer::{BifWriter, FolderOutcome};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

/// A folder whose output could not be produced.
#[derive(Debug, Clone, Serialize)]
pub struct FolderFailure {
    pub folder: PathBuf,
    pub error: String,
}

/// Summary of one engine run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub root: PathBuf,
    pub dry_run: bool,
    pub folders_scanned: usize,
    pub folders_written: usize,
    pub documents: usize,
    pub unresolved: usize,
    pub files_written: Vec<PathBuf>,
    pub failures: Vec<FolderFailure>,
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, outcome: FolderOutcome) {
        self.folders_written += 1;
        self.documents += outcome.documents;
        self.unresolved += outcome.unresolved;
        self.files_written
            .extend(outcome.files.into_iter().map(|f| f.path));
    }
}

/// Scans a root and writes BIF files for every leaf folder.
pub struct BifEngine {
    scanner: FolderScanner,
    writer: BifWriter,
    dry_run: bool,
}

impl BifEngine {
    pub fn new(
        scan: &ScanConfig,
        output: OutputConfig,
        resolver: MetadataResolver,
    ) -> Result<Self, BifError> {
        let scanner =
            FolderScanner::new(&scan.parent_folder)?.with_walker_config(scan.walker_config());
        let writer = BifWriter::new(scanner.root(), resolver, output);
        Ok(Self {
            scanner,
            writer,
            dry_run: false,
        })
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.writer = self.writer.with_dry_run(dry_run);
        self.dry_run = dry_run;
        self
    }

    pub fn root(&self) -> &std::path::Path {
        self.scanner.root()
    }

    pub fn run(&self) -> Result<RunSummary, BifError> {
        let started = Instant::now();
        info!(root = %self.scanner.root().display(), "BIF generation started");

        let folders = self.scanner.scan()?;
        let mut summary = RunSummary {
            root: self.scanner.root().to_path_buf(),
            dry_run: self.dry_run,
            folders_scanned: folders.len(),
            ..Default::default()
        };

        for folder in &folders {
            match self.writer.process_folder(folder) {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    error!(folder = %folder.path.display(), error = %e, "Folder failed");
                    summary.failures.push(FolderFailure {
                        folder: folder.path.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        summary.duration_ms = started.elapsed().as_millis() as u64;
        info!(
            folders = summary.folders_written,
            documents = summary.documents,
            failures = summary.failures.len(),
            "BIF generation finished"
        );
        Ok(summary)
    }
}
