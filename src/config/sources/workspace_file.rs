//! Working directory config file source: `<dir>/bifgen.toml`

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::{Path, PathBuf};

pub const WORKSPACE_CONFIG_FILE: &str = "bifgen.toml";

pub fn workspace_config_path(dir: &Path) -> PathBuf {
    dir.join(WORKSPACE_CONFIG_FILE)
}

/// Add `bifgen.toml` from `dir` if present.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(File::from(workspace_config_path(dir)).required(false)))
}
