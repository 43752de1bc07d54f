//! Configuration manager

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    LocalizationSettings,
    loader,
};

/// Holds the validated settings and the project root they were loaded from.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// Current settings
    current_settings: LocalizationSettings,

    /// Project root the settings were loaded from
    project_root: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: LocalizationSettings::default(), project_root: None }
    }

    /// Load settings from `<project_root>/.world-localization.json`, or defaults.
    ///
    /// Settings are only replaced when they validate.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn load_settings(&mut self, project_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for project: {:?}", project_root);

        let settings = if let Some(root) = &project_root {
            loader::load_from_project(root)?.map_or_else(LocalizationSettings::default, |s| {
                tracing::debug!("Loaded project settings: {:?}", s);
                s
            })
        } else {
            LocalizationSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.project_root = project_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// Replace the settings after validating them.
    ///
    /// # Errors
    /// Validation error; the current settings are kept.
    pub fn update_settings(&mut self, new_settings: LocalizationSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &LocalizationSettings {
        &self.current_settings
    }

    #[must_use]
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }
}
