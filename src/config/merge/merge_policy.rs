//! Base layer for every config build: the serialized defaults.

use crate::config::BifConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Start a builder seeded with `BifConfig::default()`.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&BifConfig::default())?;
    Ok(Config::builder().add_source(defaults))
}
