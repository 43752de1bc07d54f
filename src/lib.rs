//! world-localization
//!
//! Key-based text localization for game worlds: language dictionaries,
//! key resolution with fallback, display elements refreshed from a shared
//! handler, and a host-independent dictionary editor.

pub mod config;
pub mod dictionary;
pub mod display;
pub mod editor;
pub mod error;
pub mod logging;
pub mod resolve;
pub mod source;

mod test_utils;

pub use dictionary::{
    LanguageDictionary,
    Token,
};
pub use display::{
    LocalizationScene,
    LocalizedText,
    TextSurface,
};
pub use editor::EditorSession;
pub use resolve::{
    LocalizationHandler,
    ResolveOptions,
    resolve,
};
pub use source::{
    FileSource,
    LanguageSource,
    SourceCatalog,
    SourceId,
};
