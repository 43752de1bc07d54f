//! Editing session over one language source.

use super::filter::KeyFilter;
use super::view::{
    ConfirmDialog,
    EditorView,
    SessionStatus,
};
use crate::dictionary::LanguageDictionary;
use crate::error::EditorError;
use crate::source::LanguageSource;

/// A valid dictionary being edited, with its search and selection.
#[derive(Debug)]
struct Document<S> {
    /// Source the dictionary was loaded from and is saved back to
    source: S,
    /// Working copy of the language, edited in place
    dictionary: LanguageDictionary,
    /// Search text and its matching keys
    filter: KeyFilter,
    /// Index into the filtered key list
    selected: usize,
    /// Unsaved edits exist
    dirty: bool,
    /// Key waiting for removal confirmation
    pending_removal: Option<String>,
}

impl<S> Document<S> {
    /// Fresh document with empty search and first key selected.
    fn new(source: S, dictionary: LanguageDictionary) -> Self {
        Self {
            source,
            dictionary,
            filter: KeyFilter::default(),
            selected: 0,
            dirty: false,
            pending_removal: None,
        }
    }

    /// Reset the selection to 0 if it no longer points into the filtered list.
    fn clamp_selection(&mut self) {
        let len = self.filter.keys(&self.dictionary).len();
        if self.selected >= len {
            self.selected = 0;
        }
    }

    /// Key at the selected index of the filtered list.
    fn selected_key(&mut self) -> Option<String> {
        let selected = self.selected;
        self.filter.keys(&self.dictionary).get(selected).cloned()
    }

    /// True if the search text is non-empty and names no text key.
    ///
    /// Keys holding non-text values are hidden from editing, so they do not
    /// block adding the same key as text.
    fn can_add_key(&self) -> bool {
        let search = self.filter.search();
        !search.is_empty() && !self.dictionary.contains_text(search)
    }

    /// Record a dictionary change: filtered list, selection and pending removal are stale.
    fn mark_changed(&mut self) {
        self.dirty = true;
        self.pending_removal = None;
        self.filter.invalidate();
        self.clamp_selection();
    }
}

/// What the session has loaded, ignoring any pending switch.
#[derive(Debug)]
enum Loaded<S> {
    /// No source picked yet, or the picker was cleared
    Nothing,
    /// Source parsed into an editable dictionary
    Valid(Document<S>),
    /// The source could not be read or parsed
    Invalid {
        /// Source that failed, kept so it can be picked again
        source: S,
        /// Read or parse error shown instead of the editor
        error: String,
    },
}

impl<S: LanguageSource> Loaded<S> {
    /// Loaded source, valid or not.
    fn source(&self) -> Option<&S> {
        match self {
            Self::Nothing => None,
            Self::Valid(document) => Some(&document.source),
            Self::Invalid { source, .. } => Some(source),
        }
    }

    /// Read and parse `source`; failures produce an invalid state.
    fn open(source: S) -> Self {
        let text = match source.read_text() {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(source = %source.id(), error = %e, "Failed to read language source");
                return Self::Invalid { source, error: e.to_string() };
            }
        };

        match LanguageDictionary::load(&text) {
            Ok(dictionary) => {
                tracing::debug!(
                    source = %source.id(),
                    entries = dictionary.len(),
                    "Loaded language source"
                );
                Self::Valid(Document::new(source, dictionary))
            }
            Err(e) => {
                tracing::warn!(source = %source.id(), error = %e, "Language source is invalid JSON");
                Self::Invalid { source, error: e.to_string() }
            }
        }
    }
}

/// Interactive editing session for language dictionaries.
///
/// Every operation is applied completely before it returns. Switching to a
/// different source is a two-step operation (`pick_source`, then
/// `confirm_switch` or `cancel_switch`) because it drops unsaved edits.
/// Editing operations fail with [`EditorError::NotEditable`] unless a valid
/// dictionary is loaded, and with [`EditorError::SwitchPending`] while a
/// switch waits for confirmation.
#[derive(Debug)]
pub struct EditorSession<S> {
    /// Loaded source and its dictionary, if any
    loaded: Loaded<S>,
    /// `Some(target)` while a switch waits for confirmation; `target` of `None` unloads
    pending_switch: Option<Option<S>>,
}

impl<S: LanguageSource> Default for EditorSession<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LanguageSource> EditorSession<S> {
    #[must_use]
    pub const fn new() -> Self {
        Self { loaded: Loaded::Nothing, pending_switch: None }
    }

    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        if self.pending_switch.is_some() {
            return SessionStatus::ConfirmingSwitch;
        }
        match self.loaded {
            Loaded::Nothing => SessionStatus::NoSourceLoaded,
            Loaded::Valid(_) => SessionStatus::Loaded,
            Loaded::Invalid { .. } => SessionStatus::Invalid,
        }
    }

    /// Source currently loaded, valid or not.
    #[must_use]
    pub fn loaded_source(&self) -> Option<&S> {
        self.loaded.source()
    }

    /// Source waiting for switch confirmation. `Some(None)` means unloading.
    #[must_use]
    pub fn pending_source(&self) -> Option<Option<&S>> {
        self.pending_switch.as_ref().map(Option::as_ref)
    }

    #[must_use]
    pub fn dictionary(&self) -> Option<&LanguageDictionary> {
        match &self.loaded {
            Loaded::Valid(document) => Some(&document.dictionary),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        match &self.loaded {
            Loaded::Valid(document) => document.dirty,
            _ => false,
        }
    }

    /// Author picked `source` (or cleared the picker with `None`).
    ///
    /// Picking the loaded source withdraws any pending switch. If that
    /// source failed to load it is read again right away, so a fixed file
    /// becomes editable without switching away. Any other pick asks for
    /// confirmation.
    pub fn pick_source(&mut self, source: Option<S>) -> SessionStatus {
        let loaded_id = self.loaded.source().map(LanguageSource::id);
        let picked_id = source.as_ref().map(LanguageSource::id);

        if loaded_id == picked_id {
            self.pending_switch = None;
            if matches!(self.loaded, Loaded::Invalid { .. })
                && let Some(source) = source
            {
                tracing::debug!(source = %source.id(), "Retrying invalid language source");
                self.loaded = Loaded::open(source);
            }
        } else {
            tracing::debug!(picked = ?picked_id, "Source switch requested");
            self.pending_switch = Some(source);
        }

        self.status()
    }

    /// Apply the pending switch, discarding the current session state.
    ///
    /// The new source is read and parsed; failures leave the session in
    /// [`SessionStatus::Invalid`]. Without a pending switch nothing happens.
    pub fn confirm_switch(&mut self) -> SessionStatus {
        let Some(target) = self.pending_switch.take() else {
            return self.status();
        };

        if self.is_dirty() {
            tracing::info!("Discarding unsaved edits");
        }

        self.loaded = match target {
            Some(source) => Loaded::open(source),
            None => Loaded::Nothing,
        };

        self.status()
    }

    /// Drop the pending switch and keep the loaded source.
    pub fn cancel_switch(&mut self) -> SessionStatus {
        self.pending_switch = None;
        self.status()
    }

    /// Loaded document, if editing is currently possible.
    fn document_mut(&mut self) -> Result<&mut Document<S>, EditorError> {
        if self.pending_switch.is_some() {
            return Err(EditorError::SwitchPending);
        }
        match &mut self.loaded {
            Loaded::Valid(document) => Ok(document),
            _ => Err(EditorError::NotEditable),
        }
    }

    /// Loaded document for read-only queries.
    fn document(&self) -> Option<&Document<S>> {
        if self.pending_switch.is_some() {
            return None;
        }
        match &self.loaded {
            Loaded::Valid(document) => Some(document),
            _ => None,
        }
    }

    #[must_use]
    pub fn search(&self) -> &str {
        match &self.loaded {
            Loaded::Valid(document) => document.filter.search(),
            _ => "",
        }
    }

    /// Change the search text. A selection beyond the new list resets to 0.
    pub fn set_search(&mut self, search: impl Into<String>) -> Result<(), EditorError> {
        let document = self.document_mut()?;
        if document.filter.set_search(search.into()) {
            document.pending_removal = None;
            document.clamp_selection();
        }
        Ok(())
    }

    /// Keys matching the search, in dictionary order.
    pub fn filtered_keys(&mut self) -> Result<&[String], EditorError> {
        let document = self.document_mut()?;
        Ok(document.filter.keys(&document.dictionary))
    }

    /// Select a key by its index in the filtered list. Out-of-range indices select 0.
    ///
    /// Returns the index actually selected.
    pub fn select(&mut self, index: usize) -> Result<usize, EditorError> {
        let document = self.document_mut()?;
        let len = document.filter.keys(&document.dictionary).len();
        let selected = if index < len { index } else { 0 };
        if selected != document.selected {
            document.pending_removal = None;
        }
        document.selected = selected;
        Ok(selected)
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.document().map(|document| document.selected)
    }

    pub fn selected_key(&mut self) -> Option<String> {
        self.document_mut().ok().and_then(Document::selected_key)
    }

    pub fn selected_value(&mut self) -> Option<String> {
        let document = self.document_mut().ok()?;
        let key = document.selected_key()?;
        document.dictionary.text(&key).map(ToString::to_string)
    }

    /// True if the search text can be added as a new key.
    ///
    /// The search must be non-empty and not exactly equal to an existing
    /// text key. The comparison is case- and whitespace-sensitive.
    #[must_use]
    pub fn can_add_key(&self) -> bool {
        self.document().is_some_and(Document::can_add_key)
    }

    /// Append the search text as a new key with an empty value.
    ///
    /// Returns `false` without changing anything if adding is not allowed.
    pub fn add_key(&mut self) -> Result<bool, EditorError> {
        let document = self.document_mut()?;
        if !document.can_add_key() {
            return Ok(false);
        }

        let key = document.filter.search().to_string();
        document.dictionary.set(key.clone(), String::new());
        document.mark_changed();
        tracing::debug!(key = %key, "Added key");
        Ok(true)
    }

    /// Ask to remove the selected key. Returns the key awaiting confirmation.
    pub fn request_remove(&mut self) -> Result<String, EditorError> {
        let document = self.document_mut()?;
        let key = document.selected_key().ok_or(EditorError::NoSelection)?;
        document.pending_removal = Some(key.clone());
        Ok(key)
    }

    /// Remove the key awaiting confirmation, together with its value.
    ///
    /// Returns the removed key, or `None` if no removal was requested.
    pub fn confirm_remove(&mut self) -> Result<Option<String>, EditorError> {
        let document = self.document_mut()?;
        let Some(key) = document.pending_removal.take() else {
            return Ok(None);
        };

        document.dictionary.remove(&key);
        document.mark_changed();
        tracing::debug!(key = %key, "Removed key");
        Ok(Some(key))
    }

    pub fn cancel_remove(&mut self) {
        if let Ok(document) = self.document_mut() {
            document.pending_removal = None;
        }
    }

    /// Key awaiting removal confirmation.
    #[must_use]
    pub fn pending_removal(&self) -> Option<&str> {
        self.document().and_then(|document| document.pending_removal.as_deref())
    }

    /// Replace the value of the selected key. Applies immediately.
    pub fn set_selected_value(&mut self, value: impl Into<String>) -> Result<(), EditorError> {
        let document = self.document_mut()?;
        let key = document.selected_key().ok_or(EditorError::NoSelection)?;
        document.dictionary.set(key, value);
        document.dirty = true;
        Ok(())
    }

    /// Serialize the dictionary and write it back to its source.
    ///
    /// On failure nothing changes: the dictionary, the dirty flag and the
    /// source text are left as they were.
    pub fn save(&mut self) -> Result<(), EditorError> {
        let document = self.document_mut()?;

        let text = document.dictionary.serialize().inspect_err(|e| {
            tracing::error!(source = %document.source.id(), error = %e, "Unable to save language");
        })?;

        document.source.write_text(&text).inspect_err(|e| {
            tracing::error!(source = %document.source.id(), error = %e, "Unable to save language");
        })?;

        document.dirty = false;
        tracing::info!(source = %document.source.id(), "Saved language");
        Ok(())
    }

    /// Snapshot of everything the editor window shows.
    pub fn view(&mut self) -> EditorView {
        let status = self.status();
        let dialog = self.pending_switch.as_ref().map(|target| {
            ConfirmDialog::source_switch(target.as_ref().map_or("none", LanguageSource::display_name))
        });

        let mut view = match &mut self.loaded {
            Loaded::Nothing => EditorView::empty(status),
            Loaded::Invalid { source, error } => EditorView {
                source_name: Some(source.display_name().to_string()),
                error: Some(format!("Language JSON is invalid: {error}")),
                ..EditorView::empty(status)
            },
            Loaded::Valid(document) => document_view(document, status),
        };

        view.dialog = match (dialog, self.pending_removal()) {
            (Some(dialog), _) => Some(dialog),
            (None, Some(key)) => Some(ConfirmDialog::key_removal(key)),
            (None, None) => None,
        };
        view
    }
}

/// View of a valid document.
fn document_view<S: LanguageSource>(
    document: &mut Document<S>,
    status: SessionStatus,
) -> EditorView {
    let selected_key = document.selected_key();
    let search = document.filter.search().to_string();
    let keys = document.filter.keys(&document.dictionary).to_vec();

    let add_key_label = (document.can_add_key() && status == SessionStatus::Loaded)
        .then(|| format!("Add Key \"{search}\""));

    let selected_value =
        selected_key.as_deref().and_then(|key| document.dictionary.text(key)).map(ToString::to_string);
    let remove_key_label = selected_key.as_ref().map(|key| format!("Remove Key \"{key}\""));
    let key_header = selected_key.as_deref().map(|key| {
        let position =
            document.dictionary.keys().position(|text_key| text_key == key).unwrap_or_default();
        format!("KEY \"{key}\" ({position})")
    });

    EditorView {
        status,
        source_name: Some(document.source.display_name().to_string()),
        error: None,
        search,
        keys,
        selected_index: document.selected,
        selected_key,
        selected_value,
        add_key_label,
        remove_key_label,
        key_header,
        dirty: document.dirty,
        dialog: None,
    }
}
