//! Configuration
//!
//! Layered configuration: built-in defaults, then the global config file, then
//! `bifgen.toml` in the working directory, then `BIFGEN__*` environment
//! variables.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod store;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use store::StoreConfig;

use crate::error::BifError;
use crate::logging::LoggingConfig;
use crate::bif::BIF_EXTENSION;
use crate::tree::WalkerConfig;
use crate::types::BlockFlags;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BifConfig {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BifConfig {
    pub fn validate(&self) -> Result<(), BifError> {
        if self.scan.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(BifError::ConfigError(
                "scan.extensions must name at least one document extension".to_string(),
            ));
        }
        if self
            .scan
            .extensions
            .iter()
            .any(|e| e.trim().trim_start_matches('.').eq_ignore_ascii_case(BIF_EXTENSION))
        {
            return Err(BifError::ConfigError(format!(
                "scan.extensions must not include {:?}, the output extension",
                BIF_EXTENSION
            )));
        }
        if let Some(name) = &self.output.aggregate_file_name {
            if name.trim().is_empty() || name.contains(['/', '\\']) {
                return Err(BifError::ConfigError(format!(
                    "output.aggregate_file_name must be a plain file name, got {:?}",
                    name
                )));
            }
        }
        Ok(())
    }
}

fn default_parent_folder() -> PathBuf {
    PathBuf::from(".")
}

fn default_extensions() -> Vec<String> {
    vec!["pdf".to_string()]
}

/// Which folders to scan and what counts as a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Scan root (`PARENT_FOLDER`).
    #[serde(default = "default_parent_folder")]
    pub parent_folder: PathBuf,

    /// Document extensions, matched case-insensitively.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub follow_symlinks: bool,

    /// Deepest directory level visited below the root; unlimited when unset.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl ScanConfig {
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            extensions: self
                .extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_string())
                .filter(|e| !e.is_empty())
                .collect(),
            follow_symlinks: self.follow_symlinks,
            max_depth: self.max_depth,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            parent_folder: default_parent_folder(),
            extensions: default_extensions(),
            follow_symlinks: false,
            max_depth: None,
        }
    }
}

/// Metadata source for files written in separate mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparateMetadata {
    /// Each file is resolved by its own document key.
    #[default]
    PerDocument,
    /// Every file in a folder reuses the record of the folder's first document.
    FolderAnchor,
}

/// How BIF files are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Embedded verbatim as `create_location` (`CREATE_LOCATION`).
    #[serde(default)]
    pub create_location: bool,

    /// Append to an existing aggregated file instead of overwriting (`APPEND`).
    #[serde(default)]
    pub append: bool,

    /// Embedded verbatim as `delete_images` (`DELETE_IMAGES`).
    #[serde(default)]
    pub delete_images: bool,

    /// One BIF per document instead of one per folder (`CREATE_SEPARATE_BIF`).
    #[serde(default)]
    pub create_separate_bif: bool,

    #[serde(default)]
    pub separate_metadata: SeparateMetadata,

    /// Fixed name for aggregated files; a random short id when unset.
    #[serde(default)]
    pub aggregate_file_name: Option<String>,
}

impl OutputConfig {
    pub fn flags(&self) -> BlockFlags {
        BlockFlags {
            create_location: self.create_location,
            append: self.append,
            delete_images: self.delete_images,
        }
    }
}
