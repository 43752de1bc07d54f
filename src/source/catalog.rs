use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;

use super::FileSource;
use crate::config::{
    CONFIG_FILE_NAME,
    SourceFilesConfig,
};
use crate::error::CatalogError;

/// Lists the language files an author can pick in the editor.
#[derive(Debug, Clone)]
pub struct SourceCatalog {
    project_root: PathBuf,
    /// Compiled `includePatterns`
    include: GlobSet,
    /// Compiled `excludePatterns`
    exclude: GlobSet,
}

impl SourceCatalog {
    /// # Errors
    /// Invalid include or exclude pattern.
    pub fn new(project_root: PathBuf, config: &SourceFilesConfig) -> Result<Self, CatalogError> {
        Ok(Self {
            project_root,
            include: compile(&config.include_patterns)?,
            exclude: compile(&config.exclude_patterns)?,
        })
    }

    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// True if `path` lies under the project root, matches an include
    /// pattern and no exclude pattern. The settings file never matches.
    #[must_use]
    pub fn is_candidate(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.project_root) else {
            return false;
        };

        if relative.file_name().is_some_and(|name| name == CONFIG_FILE_NAME) {
            return false;
        }

        self.include.is_match(relative) && !self.exclude.is_match(relative)
    }

    /// Walk the project root and return candidate files, sorted by path.
    ///
    /// Entries ignored by `.gitignore` are skipped. Unreadable directory
    /// entries are logged and skipped.
    #[must_use]
    pub fn discover(&self) -> Vec<FileSource> {
        tracing::debug!(project_root = %self.project_root.display(), "Discovering language sources");

        let mut found: Vec<PathBuf> = WalkBuilder::new(&self.project_root)
            .hidden(false)
            .git_ignore(true)
            .git_global(false)
            .follow_links(false)
            .build()
            .filter_map(|result| {
                result
                    .inspect_err(|err| tracing::debug!(?err, "Failed to read directory entry"))
                    .ok()
            })
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .map(ignore::DirEntry::into_path)
            .filter(|path| self.is_candidate(path))
            .collect();

        found.sort();
        tracing::debug!(count = found.len(), "Discovered language sources");
        found.into_iter().map(FileSource::new).collect()
    }
}

/// Compile glob patterns into one set, naming the first invalid pattern.
fn compile(patterns: &[String]) -> Result<GlobSet, CatalogError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|source| CatalogError::InvalidPattern { pattern: pattern.clone(), source })?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::source::LanguageSource;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn catalog(include: &[&str], exclude: &[&str]) -> SourceCatalog {
        let config = SourceFilesConfig {
            include_patterns: include.iter().copied().map(String::from).collect(),
            exclude_patterns: exclude.iter().copied().map(String::from).collect(),
        };
        SourceCatalog::new(PathBuf::from("/game"), &config).unwrap()
    }

    #[rstest]
    #[case::top_level("/game/en.json", true)]
    #[case::nested("/game/lang/ja.json", true)]
    #[case::other_extension("/game/lang/en.txt", false)]
    #[case::outside_root("/other/lang/en.json", false)]
    #[case::settings_file("/game/.world-localization.json", false)]
    #[case::excluded("/game/build/en.json", false)]
    fn is_candidate_cases(#[case] path: &str, #[case] expected: bool) {
        let catalog = catalog(&["**/*.json"], &["build/**"]);

        assert_that!(catalog.is_candidate(Path::new(path)), eq(expected));
    }

    #[rstest]
    #[case::include(&["**/*.{json"], &[])]
    #[case::exclude(&["**/*.json"], &["[invalid"])]
    fn new_rejects_invalid_pattern(#[case] include: &[&str], #[case] exclude: &[&str]) {
        let config = SourceFilesConfig {
            include_patterns: include.iter().copied().map(String::from).collect(),
            exclude_patterns: exclude.iter().copied().map(String::from).collect(),
        };

        let result = SourceCatalog::new(PathBuf::from("/game"), &config);

        assert!(matches!(result, Err(CatalogError::InvalidPattern { .. })));
    }

    #[googletest::test]
    fn discover_finds_matching_files_sorted() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "lang/ja.json", "{}");
        write(temp_dir.path(), "lang/en.json", "{}");
        write(temp_dir.path(), "notes.txt", "");
        write(temp_dir.path(), CONFIG_FILE_NAME, "{}");

        let catalog =
            SourceCatalog::new(temp_dir.path().to_path_buf(), &SourceFilesConfig::default())
                .unwrap();
        let names: Vec<String> =
            catalog.discover().iter().map(|s| s.display_name().to_string()).collect();

        assert_that!(names, elements_are![eq("en"), eq("ja")]);
    }

    #[googletest::test]
    fn discover_honors_exclude_patterns() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "lang/en.json", "{}");
        write(temp_dir.path(), "build/en.json", "{}");

        let config = SourceFilesConfig {
            include_patterns: vec!["**/*.json".to_string()],
            exclude_patterns: vec!["build/**".to_string()],
        };
        let catalog = SourceCatalog::new(temp_dir.path().to_path_buf(), &config).unwrap();
        let found = catalog.discover();

        assert_that!(found.len(), eq(1));
        assert_that!(found.first().map(|s| s.path().ends_with("lang/en.json")), some(eq(true)));
    }
}
