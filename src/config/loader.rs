//! Configuration file loading

use std::path::Path;

use super::{
    ConfigError,
    LocalizationSettings,
};

/// Name of the configuration file looked up in the project root.
pub(crate) const CONFIG_FILE_NAME: &str = ".world-localization.json";

/// Load settings from the project root.
///
/// # Returns
/// - `Ok(Some(settings))`: configuration file found and parsed
/// - `Ok(None)`: no configuration file
/// - `Err(ConfigError)`: read or parse failure
pub(super) fn load_from_project(
    project_root: &Path,
) -> Result<Option<LocalizationSettings>, ConfigError> {
    let config_path = project_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: LocalizationSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
