//! Error types shared across the dictionary, source and editor layers.

use thiserror::Error;

use crate::source::SourceId;

/// Errors raised while turning source text into a language dictionary.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The text is not valid JSON
    #[error("Failed to parse language JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    /// The text is valid JSON but the top level is not an object
    #[error("Language JSON must be an object at the top level, found {found}")]
    NotAnObject {
        /// JSON kind found at the top level (e.g. "array")
        found: &'static str,
    },
}

/// Errors raised while serializing a language dictionary for saving.
#[derive(Error, Debug)]
#[error("Failed to serialize language JSON: {0}")]
pub struct SerializeError(#[from] serde_json::Error);

/// Errors raised at the load/save boundary of a source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read source '{id}': {source}")]
    Read {
        id: SourceId,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write source '{id}': {source}")]
    Write {
        id: SourceId,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while compiling the source discovery patterns.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid source pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to compile source patterns: {0}")]
    Compile(#[from] globset::Error),
}

/// Errors returned by editing operations of an editor session.
#[derive(Error, Debug)]
pub enum EditorError {
    /// No valid dictionary is loaded (nothing picked, or the source is invalid JSON)
    #[error("No editable language dictionary is loaded")]
    NotEditable,
    /// A source switch is waiting for confirmation
    #[error("A source switch is pending confirmation")]
    SwitchPending,
    /// The filtered key list is empty
    #[error("No key is selected")]
    NoSelection,
    #[error(transparent)]
    Serialize(#[from] SerializeError),
    #[error(transparent)]
    Source(#[from] SourceError),
}
