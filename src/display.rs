//! Display elements bound to a localization handler.
//!
//! The host owns the actual widgets. An element only knows its key, the
//! handler it was wired to and the surface it writes text into.

/// Scene composition root
mod scene;

use std::fmt;
use std::rc::Rc;

pub use scene::{
    LocalizationScene,
    RefreshSummary,
};

use crate::resolve::LocalizationHandler;

/// Host widget that can show text.
pub trait TextSurface {
    fn set_text(&mut self, text: &str);
}

/// Result of asking an element to refresh its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    /// No handler is wired to the element; nothing was changed
    MissingHandler,
    /// The element has no surface to write text into
    MissingSurface,
}

/// A text element showing the localized text for one key.
pub struct LocalizedText {
    /// Element name used in diagnostics
    name: String,

    /// Localization key to show
    key: String,

    /// Handler wired in by the scene
    handler: Option<Rc<LocalizationHandler>>,

    /// Host widget receiving the text
    surface: Option<Box<dyn TextSurface>>,
}

impl LocalizedText {
    /// Create an unwired element without a surface.
    #[must_use]
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self { name: name.into(), key: key.into(), handler: None, surface: None }
    }

    #[must_use]
    pub fn with_surface(mut self, surface: impl TextSurface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    #[must_use]
    pub fn with_handler(mut self, handler: Rc<LocalizationHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Wire this element to `handler`, replacing any previous link.
    pub fn link(&mut self, handler: Rc<LocalizationHandler>) {
        self.handler = Some(handler);
    }

    pub fn unlink(&mut self) {
        self.handler = None;
    }

    #[must_use]
    pub const fn is_linked(&self) -> bool {
        self.handler.is_some()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Change the key and refresh the shown text.
    pub fn set_key(&mut self, key: impl Into<String>) -> UpdateOutcome {
        self.key = key.into();
        self.update_text()
    }

    /// Resolve the key through the linked handler and show the result.
    ///
    /// Never fails: a missing handler or surface is logged and reported in
    /// the outcome.
    pub fn update_text(&mut self) -> UpdateOutcome {
        let Some(handler) = &self.handler else {
            tracing::warn!(element = %self.name, "Localization handler is missing, skipping update");
            return UpdateOutcome::MissingHandler;
        };

        let text = handler.text(&self.key);

        let Some(surface) = self.surface.as_mut() else {
            tracing::warn!(element = %self.name, "No text surface to apply localized text to");
            return UpdateOutcome::MissingSurface;
        };

        surface.set_text(&text);
        UpdateOutcome::Updated
    }
}

impl fmt::Debug for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizedText")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("linked", &self.handler.is_some())
            .field("surface", &self.surface.as_ref().map(|_| "<dyn TextSurface>"))
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;

    use googletest::prelude::*;

    use super::*;
    use crate::dictionary::LanguageDictionary;
    use crate::resolve::ResolveOptions;
    use crate::test_utils::capture_logs;

    /// Surface whose text stays observable after it is boxed into an element.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct SharedSurface(pub(crate) Rc<RefCell<Option<String>>>);

    impl SharedSurface {
        pub(crate) fn text(&self) -> Option<String> {
            self.0.borrow().clone()
        }
    }

    impl TextSurface for SharedSurface {
        fn set_text(&mut self, text: &str) {
            *self.0.borrow_mut() = Some(text.to_string());
        }
    }

    fn handler() -> Rc<LocalizationHandler> {
        Rc::new(LocalizationHandler::with_dictionaries(
            ResolveOptions::default(),
            LanguageDictionary::from_iter([("menu.start", "Start")]),
            LanguageDictionary::from_iter([("menu.quit", "Quit")]),
        ))
    }

    #[googletest::test]
    fn update_text_writes_resolved_text() {
        let surface = SharedSurface::default();
        let mut element = LocalizedText::new("StartButton", "menu.start")
            .with_surface(surface.clone())
            .with_handler(handler());

        expect_that!(element.update_text(), eq(UpdateOutcome::Updated));
        expect_that!(surface.text(), some(eq("Start")));
    }

    #[googletest::test]
    fn update_text_without_handler_is_noop_with_diagnostic() {
        let surface = SharedSurface::default();
        let mut element = LocalizedText::new("Orphan", "menu.start").with_surface(surface.clone());

        let (outcome, logs) = capture_logs(|| element.update_text());

        expect_that!(outcome, eq(UpdateOutcome::MissingHandler));
        expect_that!(surface.text(), none());
        expect_that!(logs.field_values("element"), elements_are![eq("Orphan")]);
    }

    #[googletest::test]
    fn update_text_without_surface_reports_it() {
        let mut element = LocalizedText::new("Bare", "menu.start").with_handler(handler());

        let (outcome, logs) = capture_logs(|| element.update_text());

        expect_that!(outcome, eq(UpdateOutcome::MissingSurface));
        expect_that!(logs.messages(), contains(contains_substring("No text surface")));
    }

    #[googletest::test]
    fn set_key_refreshes_text() {
        let surface = SharedSurface::default();
        let mut element = LocalizedText::new("Button", "menu.start")
            .with_surface(surface.clone())
            .with_handler(handler());

        let outcome = element.set_key("menu.quit");

        expect_that!(outcome, eq(UpdateOutcome::Updated));
        expect_that!(element.key(), eq("menu.quit"));
        expect_that!(surface.text(), some(eq("Quit")));
    }

    #[googletest::test]
    fn unlink_stops_updates() {
        let surface = SharedSurface::default();
        let mut element =
            LocalizedText::new("Button", "menu.start").with_surface(surface.clone());
        element.link(handler());
        expect_that!(element.is_linked(), eq(true));

        element.unlink();

        expect_that!(element.update_text(), eq(UpdateOutcome::MissingHandler));
        expect_that!(surface.text(), none());
    }

    #[googletest::test]
    fn debug_hides_surface_and_handler() {
        let element = LocalizedText::new("Title", "title");

        let debug = format!("{element:?}");

        expect_that!(debug, contains_substring("Title"));
        expect_that!(debug, contains_substring("linked: false"));
    }
}
