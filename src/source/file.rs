use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use super::{
    LanguageSource,
    SourceId,
};
use crate::error::SourceError;

/// A language source stored as a JSON file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    /// Location of the JSON file
    path: PathBuf,
    /// Path-derived identifier
    id: SourceId,
    /// File stem shown in dialogs
    name: String,
}

impl FileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = SourceId::new(path.to_string_lossy());
        let name = path.file_stem().map_or_else(
            || id.as_str().to_string(),
            |stem| stem.to_string_lossy().to_string(),
        );
        Self { path, id, name }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path used for the write-then-rename step.
    fn temp_path(&self) -> PathBuf {
        let mut file_name = self.path.file_name().map(ToOwned::to_owned).unwrap_or_default();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

impl LanguageSource for FileSource {
    fn id(&self) -> &SourceId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn read_text(&self) -> Result<String, SourceError> {
        fs::read_to_string(&self.path)
            .map_err(|source| SourceError::Read { id: self.id.clone(), source })
    }

    fn write_text(&self, text: &str) -> Result<(), SourceError> {
        let temp_path = self.temp_path();
        let write_error = |source| SourceError::Write { id: self.id.clone(), source };

        fs::write(&temp_path, text).map_err(write_error)?;

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_error(e));
        }

        Ok(())
    }
}
