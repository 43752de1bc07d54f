//! Key resolution with fallback language and diagnostics.

use std::borrow::Cow;
use std::cell::RefCell;

use crate::config::LocalizationSettings;
use crate::dictionary::LanguageDictionary;

/// Flags controlling how keys are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Append a missing-key marker to text taken from the fallback language.
    pub show_key_in_fallback_text: bool,
    /// Log every key missing from the current language.
    pub log_missing_keys: bool,
    /// Return the key itself. Overrides every other flag.
    pub only_show_key_name: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self { show_key_in_fallback_text: false, log_missing_keys: true, only_show_key_name: false }
    }
}

impl From<&LocalizationSettings> for ResolveOptions {
    fn from(settings: &LocalizationSettings) -> Self {
        Self {
            show_key_in_fallback_text: settings.show_key_in_fallback_text,
            log_missing_keys: settings.log_missing_keys,
            only_show_key_name: settings.only_show_key_name,
        }
    }
}

/// Placeholder shown for a key that no dictionary provides.
#[must_use]
pub fn missing_key_marker(key: &str) -> String {
    format!("[Missing Key \"{key}\"]")
}

/// Resolve `key` to display text.
///
/// Order: key-only mode, current language, fallback language, placeholder.
/// The result is never empty unless key-only mode is on and the key is empty.
#[must_use]
pub fn resolve<'a>(
    key: &'a str,
    current: &'a LanguageDictionary,
    fallback: &'a LanguageDictionary,
    options: &ResolveOptions,
) -> Cow<'a, str> {
    if options.only_show_key_name {
        return Cow::Borrowed(key);
    }

    if let Some(text) = current.text(key) {
        return Cow::Borrowed(text);
    }

    if options.log_missing_keys {
        tracing::info!(key = %key, "Key doesn't exist in current language");
    }

    match fallback.text(key) {
        Some(text) if options.show_key_in_fallback_text => {
            Cow::Owned(format!("{text}\n{}", missing_key_marker(key)))
        }
        Some(text) => Cow::Borrowed(text),
        None => Cow::Owned(missing_key_marker(key)),
    }
}

/// Owns the current and fallback languages and resolves keys against them.
///
/// Dictionaries sit behind `RefCell` so a handler shared by many display
/// elements can still be set up again with a new language.
#[derive(Debug, Default)]
pub struct LocalizationHandler {
    /// Resolution flags
    options: ResolveOptions,
    /// Language shown to the player
    current: RefCell<LanguageDictionary>,
    /// Language consulted for keys the current one lacks
    fallback: RefCell<LanguageDictionary>,
}

impl LocalizationHandler {
    #[must_use]
    pub fn new(options: ResolveOptions) -> Self {
        Self { options, ..Self::default() }
    }

    /// Create a handler with both languages already loaded.
    #[must_use]
    pub fn with_dictionaries(
        options: ResolveOptions,
        current: LanguageDictionary,
        fallback: LanguageDictionary,
    ) -> Self {
        Self { options, current: RefCell::new(current), fallback: RefCell::new(fallback) }
    }

    /// Handler configured from `settings` with the given language texts installed.
    ///
    /// A missing primary text is logged; a missing fallback is not.
    #[must_use]
    pub fn from_settings(
        settings: &LocalizationSettings,
        primary_text: Option<&str>,
        fallback_text: Option<&str>,
    ) -> Self {
        let handler = Self::new(ResolveOptions::from(settings));
        handler.setup_languages(primary_text, fallback_text);
        handler
    }

    #[must_use]
    pub const fn options(&self) -> &ResolveOptions {
        &self.options
    }

    pub const fn set_options(&mut self, options: ResolveOptions) {
        self.options = options;
    }

    /// Replace the current language with one parsed from `json_text`.
    ///
    /// Invalid JSON installs an empty language and logs a warning.
    pub fn setup_primary_language(&self, json_text: &str) {
        tracing::debug!("Setting up primary language");
        *self.current.borrow_mut() = LanguageDictionary::load_or_empty(json_text);
    }

    /// Replace the fallback language with one parsed from `json_text`.
    pub fn setup_fallback_language(&self, json_text: &str) {
        tracing::debug!("Setting up fallback language");
        *self.fallback.borrow_mut() = LanguageDictionary::load_or_empty(json_text);
    }

    /// Install whichever language texts are present.
    ///
    /// A missing primary text is logged and leaves the current language as
    /// it was. A missing fallback text is silent.
    pub fn setup_languages(&self, primary_text: Option<&str>, fallback_text: Option<&str>) {
        if let Some(json_text) = primary_text {
            self.setup_primary_language(json_text);
        } else {
            tracing::info!("Primary language is not set");
        }

        if let Some(json_text) = fallback_text {
            self.setup_fallback_language(json_text);
        }
    }

    /// Replace the current language with an empty one; every key resolves as missing.
    pub fn clear_primary_language(&self) {
        *self.current.borrow_mut() = LanguageDictionary::default();
    }

    /// Replace the fallback language with an empty one.
    pub fn clear_fallback_language(&self) {
        *self.fallback.borrow_mut() = LanguageDictionary::default();
    }

    /// Resolve `key` against the installed languages.
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        let current = self.current.borrow();
        let fallback = self.fallback.borrow();
        resolve(key, &current, &fallback, &self.options).into_owned()
    }

    /// Number of entries in the current and fallback languages.
    #[must_use]
    pub fn language_sizes(&self) -> (usize, usize) {
        (self.current.borrow().len(), self.fallback.borrow().len())
    }
}
