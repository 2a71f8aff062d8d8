//! StoreConfig and path resolution for the metadata record store.

use crate::config::xdg;
use crate::error::BifError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Record store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the record store; `None` means the XDG data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    /// Resolve the store path. Relative paths are taken from `base`.
    pub fn resolve_path(&self, base: &Path) -> Result<PathBuf, BifError> {
        match &self.path {
            Some(p) if p.is_absolute() => Ok(p.clone()),
            Some(p) => Ok(base.join(p)),
            None => Ok(xdg::data_dir()?.join("records")),
        }
    }
}
