use std::rc::Rc;

use super::{
    LocalizedText,
    UpdateOutcome,
};
use crate::config::LocalizationSettings;
use crate::resolve::{
    LocalizationHandler,
    ResolveOptions,
};
use crate::source::LanguageSource;

/// Counts from one refresh pass over the registered elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub updated: usize,
    pub skipped: usize,
}

/// Owns the handler and every element registered for refresh.
///
/// This is where elements get wired to the handler; neither the handler nor
/// the elements look each other up.
#[derive(Debug)]
pub struct LocalizationScene {
    /// Handler shared with every attached element
    handler: Rc<LocalizationHandler>,
    /// Elements refreshed by [`LocalizationScene::refresh`], in registration order
    elements: Vec<LocalizedText>,
}

impl LocalizationScene {
    #[must_use]
    pub fn new(handler: LocalizationHandler) -> Self {
        Self { handler: Rc::new(handler), elements: Vec::new() }
    }

    /// Scene with a handler configured from `settings`; no language is loaded yet.
    #[must_use]
    pub fn from_settings(settings: &LocalizationSettings) -> Self {
        Self::new(LocalizationHandler::new(ResolveOptions::from(settings)))
    }

    #[must_use]
    pub const fn handler(&self) -> &Rc<LocalizationHandler> {
        &self.handler
    }

    /// Wire `element` to this scene's handler and register it. Returns its index.
    pub fn attach(&mut self, mut element: LocalizedText) -> usize {
        element.link(Rc::clone(&self.handler));
        self.register(element)
    }

    /// Register `element` as-is, keeping whatever handler link it has.
    pub fn register(&mut self, element: LocalizedText) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    #[must_use]
    pub fn elements(&self) -> &[LocalizedText] {
        &self.elements
    }

    pub fn element_mut(&mut self, index: usize) -> Option<&mut LocalizedText> {
        self.elements.get_mut(index)
    }

    /// Startup sequence: install the languages that are present, then refresh.
    ///
    /// A missing primary language is logged; a missing fallback is not.
    pub fn activate(&mut self, primary: Option<&str>, fallback: Option<&str>) -> RefreshSummary {
        self.handler.setup_languages(primary, fallback);
        self.refresh()
    }

    /// Startup sequence reading the languages from sources.
    ///
    /// An absent primary source is logged as not set. A source that is
    /// configured but cannot be read is logged and installs an empty
    /// language, the same as one holding invalid JSON.
    pub fn activate_from_sources(
        &mut self,
        primary: Option<&dyn LanguageSource>,
        fallback: Option<&dyn LanguageSource>,
    ) -> RefreshSummary {
        match primary.map(read_or_log) {
            Some(Some(json_text)) => self.handler.setup_primary_language(&json_text),
            Some(None) => self.handler.clear_primary_language(),
            None => tracing::info!("Primary language is not set"),
        }

        match fallback.map(read_or_log) {
            Some(Some(json_text)) => self.handler.setup_fallback_language(&json_text),
            Some(None) => self.handler.clear_fallback_language(),
            None => {}
        }

        self.refresh()
    }

    /// Ask every registered element to show its text again.
    pub fn refresh(&mut self) -> RefreshSummary {
        tracing::debug!(count = self.elements.len(), "Refreshing localized text elements");

        let mut summary = RefreshSummary::default();
        for element in &mut self.elements {
            match element.update_text() {
                UpdateOutcome::Updated => summary.updated += 1,
                UpdateOutcome::MissingHandler | UpdateOutcome::MissingSurface => {
                    summary.skipped += 1;
                }
            }
        }
        summary
    }
}

/// Read a source's text, logging instead of failing.
fn read_or_log(source: &dyn LanguageSource) -> Option<String> {
    match source.read_text() {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::warn!(
                source = %source.id(),
                error = %e,
                "Failed to read language source, all keys will be missing"
            );
            None
        }
    }
}
