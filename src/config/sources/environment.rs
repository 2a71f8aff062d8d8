//! Environment variable source: BIFGEN__ prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

pub const ENV_PREFIX: &str = "BIFGEN";

/// Add environment variable overlay to builder.
///
/// `BIFGEN__OUTPUT__APPEND=true` sets `output.append`; `scan.extensions` takes a
/// comma-separated list.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(source()))
}

pub(crate) fn source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("scan.extensions")
}
