//! CLI Tooling
//!
//! Command-line interface for BIF generation and record store maintenance.

use crate::bif::format::format_value;
use crate::bif::BifFile;
use crate::config::{BifConfig, ConfigLoader};
use crate::engine::BifEngine;
use crate::error::BifError;
use crate::logging::LoggingConfig;
use crate::report::{format_bif_text, format_lookup_text, format_run_summary_text};
use crate::resolver::MetadataResolver;
use crate::store::{MetadataRecord, SledMetadataStore};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::info;

/// bifgen - BIF index generation for scanned document trees
#[derive(Parser)]
#[command(name = "bifgen")]
#[command(about = "Generate BIF sidecar index files for scanned document folders")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold logging flags into the configured logging section.
    pub fn apply_log_overrides(&self, logging: &mut LoggingConfig) {
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the document tree and write BIF files
    Generate {
        /// Scan root (overrides scan.parent_folder)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Write one BIF per document instead of one per folder
        #[arg(long)]
        separate: bool,
        /// Append to existing aggregated BIF files
        #[arg(long)]
        append: bool,
        /// Report what would be written without writing
        #[arg(long)]
        dry_run: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Load metadata records from a JSON array into the record store
    Import {
        /// JSON file holding an array of records
        file: PathBuf,
    },
    /// Show the field values a document key resolves to
    Lookup {
        /// Document key (file name without extension)
        key: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration
    Config {
        /// Output format (toml or json)
        #[arg(long, default_value = "toml")]
        format: String,
    },
    /// Parse and display an existing BIF file
    Inspect {
        /// BIF file to read
        file: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Loaded configuration plus the directory relative paths resolve against.
pub struct CliContext {
    config: BifConfig,
    work_dir: PathBuf,
    store: OnceLock<Arc<SledMetadataStore>>,
}

impl CliContext {
    /// Create a new CLI context, loading configuration for `work_dir`.
    pub fn new(work_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, BifError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&work_dir)?,
        };
        Ok(Self::from_config(config, work_dir))
    }

    pub fn from_config(config: BifConfig, work_dir: PathBuf) -> Self {
        Self {
            config,
            work_dir,
            store: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &BifConfig {
        &self.config
    }

    /// The record store, opened on first use and kept for the context's lifetime.
    fn open_store(&self) -> Result<Arc<SledMetadataStore>, BifError> {
        if let Some(store) = self.store.get() {
            return Ok(Arc::clone(store));
        }
        let path = self.config.store.resolve_path(&self.work_dir)?;
        let store = Arc::new(SledMetadataStore::new(&path)?);
        Ok(Arc::clone(self.store.get_or_init(|| store)))
    }

    fn resolve_dir(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.work_dir.join(path)
        }
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, BifError> {
        match command {
            Commands::Generate {
                root,
                separate,
                append,
                dry_run,
                format,
            } => {
                let format = OutputFormat::parse(format)?;
                let mut scan = self.config.scan.clone();
                if let Some(root) = root {
                    scan.parent_folder = root.clone();
                }
                scan.parent_folder = self.resolve_dir(&scan.parent_folder);

                let mut output = self.config.output.clone();
                output.create_separate_bif |= *separate;
                output.append |= *append;

                let resolver = MetadataResolver::new(self.open_store()?);
                let engine = BifEngine::new(&scan, output, resolver)?.with_dry_run(*dry_run);
                let summary = engine.run()?;
                match format {
                    OutputFormat::Json => to_json(&summary),
                    OutputFormat::Text => Ok(format_run_summary_text(&summary)),
                }
            }
            Commands::Import { file } => {
                let path = self.resolve_dir(file);
                let content = std::fs::read_to_string(&path)?;
                let records: Vec<MetadataRecord> = serde_json::from_str(&content).map_err(|e| {
                    BifError::ConfigError(format!(
                        "Failed to parse records from {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                let total = records.len();
                let store = self.open_store()?;
                let stored = store.import(records)?;
                info!(stored, total, "Imported metadata records");
                Ok(format!(
                    "Imported {} of {} records from {}",
                    stored,
                    total,
                    path.display()
                ))
            }
            Commands::Lookup { key, format } => {
                let format = OutputFormat::parse(format)?;
                let resolver = MetadataResolver::new(self.open_store()?);
                let record = resolver.resolve(key);
                match format {
                    OutputFormat::Text => Ok(format_lookup_text(key, record.as_ref())),
                    OutputFormat::Json => {
                        let fields: serde_json::Map<String, serde_json::Value> = match &record {
                            Some(r) => r
                                .entries()
                                .map(|(f, v)| (f.label().to_string(), json!(format_value(f, v))))
                                .collect(),
                            None => serde_json::Map::new(),
                        };
                        to_json(&json!({
                            "key": key,
                            "found": record.is_some(),
                            "fields": fields,
                        }))
                    }
                }
            }
            Commands::Config { format } => match format.as_str() {
                "toml" => toml::to_string_pretty(&self.config).map_err(|e| {
                    BifError::ConfigError(format!("Failed to serialize configuration: {}", e))
                }),
                "json" => to_json(&self.config),
                other => Err(BifError::ConfigError(format!(
                    "Invalid output format: {} (must be 'toml' or 'json')",
                    other
                ))),
            },
            Commands::Inspect { file, format } => {
                let format = OutputFormat::parse(format)?;
                let path = self.resolve_dir(file);
                let bif = BifFile::read(&path)?;
                match format {
                    OutputFormat::Json => to_json(&json!({
                        "path": path,
                        "count": bif.count(),
                        "documents": bif.blocks(),
                    })),
                    OutputFormat::Text => Ok(format_bif_text(&path, &bif)),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(raw: &str) -> Result<Self, BifError> {
        match raw {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(BifError::ConfigError(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, BifError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| BifError::StorageError(crate::error::StorageError::SerializationError(e)))
}
