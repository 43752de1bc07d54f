//! Key search over a language dictionary.

use crate::dictionary::LanguageDictionary;

/// Keys with text values whose name contains `search`, ignoring case.
///
/// Dictionary order is kept. An empty search matches every key.
#[must_use]
pub fn filter_keys(dictionary: &LanguageDictionary, search: &str) -> Vec<String> {
    let needle = search.to_lowercase();
    dictionary
        .keys()
        .filter(|key| key.to_lowercase().contains(&needle))
        .map(ToString::to_string)
        .collect()
}

/// Search string plus a lazily computed list of matching keys.
///
/// The list is dropped whenever the search or the dictionary changes and
/// rebuilt on next access.
#[derive(Debug, Clone, Default)]
pub(crate) struct KeyFilter {
    /// Current search text
    search: String,
    /// Matching keys, `None` until requested after a change
    cached: Option<Vec<String>>,
}

impl KeyFilter {
    /// Current search text.
    pub(crate) fn search(&self) -> &str {
        &self.search
    }

    /// Returns true if the search text changed.
    pub(crate) fn set_search(&mut self, search: String) -> bool {
        if self.search == search {
            return false;
        }
        self.search = search;
        self.cached = None;
        true
    }

    /// Drop the cached list after the dictionary changed.
    pub(crate) fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Matching keys, recomputed if the cache was dropped.
    pub(crate) fn keys(&mut self, dictionary: &LanguageDictionary) -> &[String] {
        let search = &self.search;
        self.cached.get_or_insert_with(|| filter_keys(dictionary, search))
    }
}
