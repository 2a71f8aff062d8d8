//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::BifConfig;
use crate::error::BifError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from files and environment, then validate it.
    pub fn load(dir: &Path) -> Result<BifConfig, BifError> {
        let config = MergeService::load(dir)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<BifConfig, BifError> {
        let config = MergeService::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeparateMetadata;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
[scan]
parent_folder = "/data/scans"
extensions = ["pdf", "tif"]

[output]
append = true
aggregate_file_name = "index.bif"
separate_metadata = "folder_anchor"

[store]
path = "records"
"#,
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.scan.parent_folder, PathBuf::from("/data/scans"));
        assert_eq!(config.scan.extensions, vec!["pdf", "tif"]);
        assert!(config.output.append);
        assert!(!config.output.create_separate_bif);
        assert_eq!(config.output.aggregate_file_name.as_deref(), Some("index.bif"));
        assert_eq!(config.output.separate_metadata, SeparateMetadata::FolderAnchor);
        assert_eq!(config.store.path, Some(PathBuf::from("records")));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        assert!(ConfigLoader::load_from_file(&temp.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_invalid_file_value_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        std::fs::write(&path, "[output]\naggregate_file_name = \"a/b.bif\"\n").unwrap();
        let err = ConfigLoader::load_from_file(&path).unwrap_err();
        assert!(matches!(err, BifError::ConfigError(_)));
    }
}
