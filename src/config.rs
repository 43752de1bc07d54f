//! Localization settings
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub(crate) use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    LocalizationSettings,
    SourceFilesConfig,
    ValidationError,
};
