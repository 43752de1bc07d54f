//! Language dictionary editor.
//!
//! Host-independent engine behind the authoring window: search, add,
//! remove, edit and save over one language source at a time.

/// Key search and filtered key cache
mod filter;
/// Editing session state machine
mod session;
/// Presentable session snapshot
mod view;

pub use filter::filter_keys;
pub use session::EditorSession;
pub use view::{
    ConfirmDialog,
    EditorView,
    SessionStatus,
};
