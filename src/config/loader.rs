use super::{default_config_path, ConfigError, DaemonConfig};
use std::path::Path;
use tracing::debug;

/// Parse a config document.
pub fn parse_config(content: &str) -> Result<DaemonConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load the daemon configuration.
///
/// With `path` set the file must exist. Without it the default location is
/// used and a missing file yields `DaemonConfig::default()`.
pub fn load_config(path: Option<&Path>) -> Result<DaemonConfig, ConfigError> {
    let explicit = path.is_some();
    let path = path.map_or_else(default_config_path, Path::to_path_buf);

    if !explicit && !path.exists() {
        debug!("Config not found at {}; using defaults", path.display());
        return Ok(DaemonConfig::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let config = parse_config(&content)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}
