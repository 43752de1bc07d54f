//! Presentable snapshot of an editor session.

/// Where an editor session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    NoSourceLoaded,
    /// A different source was picked and waits for confirm or cancel
    ConfirmingSwitch,
    Loaded,
    /// The loaded source is not a valid language JSON; editing is withheld
    Invalid,
}

/// Text of a confirmation dialog the host should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl ConfirmDialog {
    /// Dialog shown before switching the loaded source to `name`.
    #[must_use]
    pub fn source_switch(name: &str) -> Self {
        Self {
            title: "Language Changed!".to_string(),
            message: format!(
                "Are you sure you want to change the loaded language to {name}?\n\nIf you have any unsaved changes you will lose them."
            ),
            confirm_label: "Change".to_string(),
            cancel_label: "Don't Change".to_string(),
        }
    }

    /// Dialog shown before deleting `key`.
    #[must_use]
    pub fn key_removal(key: &str) -> Self {
        Self {
            title: "Key Deletion".to_string(),
            message: format!("Are you sure you want to delete \"{key}\"?"),
            confirm_label: "Yes".to_string(),
            cancel_label: "No".to_string(),
        }
    }
}

/// Everything the editor window needs to draw one frame.
///
/// Editing fields are empty unless the status is [`SessionStatus::Loaded`]
/// or a switch is pending over a loaded source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub status: SessionStatus,
    /// Display name of the loaded source
    pub source_name: Option<String>,
    /// Message shown instead of the editing controls for invalid JSON
    pub error: Option<String>,
    pub search: String,
    /// Filtered key list, in dictionary order
    pub keys: Vec<String>,
    pub selected_index: usize,
    pub selected_key: Option<String>,
    pub selected_value: Option<String>,
    /// `Add Key "<search>"`, present only when adding is allowed
    pub add_key_label: Option<String>,
    /// `Remove Key "<key>"`, present when a key is selected
    pub remove_key_label: Option<String>,
    /// `KEY "<key>" (<position>)` heading above the value editor
    pub key_header: Option<String>,
    pub dirty: bool,
    /// Pending confirmation, if any
    pub dialog: Option<ConfirmDialog>,
}

impl EditorView {
    pub(crate) const fn empty(status: SessionStatus) -> Self {
        Self {
            status,
            source_name: None,
            error: None,
            search: String::new(),
            keys: Vec::new(),
            selected_index: 0,
            selected_key: None,
            selected_value: None,
            add_key_label: None,
            remove_key_label: None,
            key_header: None,
            dirty: false,
            dialog: None,
        }
    }

    /// True if filter, add, remove, edit and save controls should be shown.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self.status, SessionStatus::Loaded)
    }
}
