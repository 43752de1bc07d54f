//! Load/save boundary for language sources.
//!
//! A source is the externally owned text asset backing a language
//! dictionary. The core only ever sees its text: it reads the whole text on
//! load and hands back the whole serialized text on save.

/// Candidate source discovery
mod catalog;
/// File-backed sources
mod file;

use std::fmt;

pub use catalog::SourceCatalog;
pub use file::FileSource;

use crate::error::SourceError;

/// Identifier of a source, used to tell whether two picks refer to the same asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(
    /// Host-chosen identifier text
    String,
);

impl SourceId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A language source the host can read from and write back to.
pub trait LanguageSource {
    fn id(&self) -> &SourceId;

    /// Human-readable name shown in dialogs.
    fn display_name(&self) -> &str {
        self.id().as_str()
    }

    /// Read the full source text.
    fn read_text(&self) -> Result<String, SourceError>;

    /// Replace the full source text in one atomic step.
    ///
    /// On failure the previous text must be left intact.
    fn write_text(&self, text: &str) -> Result<(), SourceError>;
}
