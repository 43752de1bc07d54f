use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::source::FileSource;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "sourceFiles.includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Handler-level localization settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalizationSettings {
    /// Language loaded when the scene is activated.
    pub primary_source: Option<String>,
    /// Language consulted when a key is missing from the primary one. Optional.
    pub fallback_source: Option<String>,

    /// Append the key to text that came from the fallback language.
    pub show_key_in_fallback_text: bool,
    pub log_missing_keys: bool,
    /// Show raw keys instead of text. Overrides every other setting.
    pub only_show_key_name: bool,

    pub source_files: SourceFilesConfig,
}

/// Patterns used to discover language files for the editor's source picker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceFilesConfig {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl Default for SourceFilesConfig {
    fn default() -> Self {
        Self { include_patterns: vec!["**/*.json".to_string()], exclude_patterns: Vec::new() }
    }
}

impl Default for LocalizationSettings {
    fn default() -> Self {
        Self {
            primary_source: None,
            fallback_source: None,
            show_key_in_fallback_text: false,
            log_missing_keys: true,
            only_show_key_name: false,
            source_files: SourceFilesConfig::default(),
        }
    }
}

impl LocalizationSettings {
    /// # Errors
    /// - Source path is set but empty
    /// - No include pattern
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.primary_source.as_ref().is_some_and(String::is_empty) {
            errors.push(ValidationError::new(
                "primarySource",
                "The source path cannot be empty. Specify a language file (e.g., \"lang/en.json\"), or remove this field",
            ));
        }

        if self.fallback_source.as_ref().is_some_and(String::is_empty) {
            errors.push(ValidationError::new(
                "fallbackSource",
                "The source path cannot be empty. Specify a language file (e.g., \"lang/en.json\"), or remove this field",
            ));
        }

        if self.source_files.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "sourceFiles.includePatterns",
                "At least one pattern is required. Example: [\"**/*.json\"]",
            ));
        }

        for (index, pattern) in self.source_files.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("sourceFiles.includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.source_files.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("sourceFiles.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Primary language file, resolved against the project root.
    #[must_use]
    pub fn primary_source_file(&self, root: &Path) -> Option<FileSource> {
        self.primary_source.as_ref().map(|path| FileSource::new(root.join(path)))
    }

    /// Fallback language file, resolved against the project root.
    #[must_use]
    pub fn fallback_source_file(&self, root: &Path) -> Option<FileSource> {
        self.fallback_source.as_ref().map(|path| FileSource::new(root.join(path)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use std::path::PathBuf;

    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = LocalizationSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: LocalizationSettings = serde_json::from_str("{}").unwrap();

        assert_that!(settings, eq(&LocalizationSettings::default()));
        assert_that!(settings.log_missing_keys, eq(true));
        assert_that!(settings.show_key_in_fallback_text, eq(false));
        assert_that!(settings.only_show_key_name, eq(false));
        assert_that!(settings.source_files.include_patterns, elements_are![eq("**/*.json")]);
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"primarySource": "lang/ja.json", "logMissingKeys": false, "onlyShowKeyName": true}"#;

        let settings: LocalizationSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.primary_source, some(eq("lang/ja.json")));
        assert_that!(settings.fallback_source, none());
        assert_that!(settings.log_missing_keys, eq(false));
        assert_that!(settings.only_show_key_name, eq(true));
    }

    #[rstest]
    fn validate_empty_primary_source() {
        let settings = LocalizationSettings {
            primary_source: Some(String::new()),
            ..LocalizationSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("primarySource")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_empty_fallback_source() {
        let settings = LocalizationSettings {
            fallback_source: Some(String::new()),
            ..LocalizationSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![field!(ValidationError.field_path, eq("fallbackSource"))])
        );
    }

    #[rstest]
    fn validate_include_patterns_empty() {
        let settings = LocalizationSettings {
            source_files: SourceFilesConfig { include_patterns: vec![], exclude_patterns: vec![] },
            ..LocalizationSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("sourceFiles.includePatterns")),
                field!(ValidationError.message, contains_substring("At least one pattern"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_exclude_glob() {
        let settings = LocalizationSettings {
            source_files: SourceFilesConfig {
                include_patterns: vec!["**/*.json".to_string()],
                exclude_patterns: vec!["build/**".to_string(), "bad[pattern".to_string()],
            },
            ..LocalizationSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("sourceFiles.excludePatterns[1]")),
                field!(ValidationError.message, contains_substring("bad[pattern"))
            ]])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = LocalizationSettings {
            primary_source: Some(String::new()),
            source_files: SourceFilesConfig { include_patterns: vec![], exclude_patterns: vec![] },
            ..LocalizationSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let message = format!("{}", ConfigError::ValidationErrors(errors));

        assert_that!(message, contains_substring("Configuration validation failed"));
        assert_that!(message, contains_substring("1. primarySource"));
        assert_that!(message, contains_substring("2. sourceFiles.includePatterns"));
    }

    #[rstest]
    fn source_files_resolve_against_root() {
        let settings = LocalizationSettings {
            primary_source: Some("lang/en.json".to_string()),
            ..LocalizationSettings::default()
        };
        let root = PathBuf::from("/project");

        let primary = settings.primary_source_file(&root);

        assert_that!(primary.map(|s| s.path().to_path_buf()), some(eq(&root.join("lang/en.json"))));
        assert_that!(settings.fallback_source_file(&root), none());
    }
}
