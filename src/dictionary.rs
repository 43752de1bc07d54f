//! Language dictionary: an ordered key → text mapping backed by a JSON object.

mod token;

use indexmap::IndexMap;
use serde_json::{
    Map,
    Value,
};
pub use token::Token;

use crate::error::{
    ParseError,
    SerializeError,
};

/// Ordered mapping from localization key to value for a single language.
///
/// Keys keep the order in which they were loaded or added. Setting an
/// existing key overwrites it in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageDictionary {
    /// Entries in load order, including non-text values
    entries: IndexMap<String, Token>,
}

impl LanguageDictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a language dictionary from JSON text.
    ///
    /// The top-level value must be an object. Values of any JSON type are
    /// accepted and kept as [`Token`]s.
    ///
    /// # Errors
    /// - Malformed JSON
    /// - Top-level value is not an object
    pub fn load(json_text: &str) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(json_text)?;

        match value {
            Value::Object(map) => {
                let entries = map.into_iter().map(|(key, value)| (key, Token::from(value))).collect();
                Ok(Self { entries })
            }
            other => Err(ParseError::NotAnObject { found: token::value_kind(&other) }),
        }
    }

    /// Parse a language dictionary, substituting an empty one on failure.
    ///
    /// The failure is logged; every key will resolve as missing.
    #[must_use]
    pub fn load_or_empty(json_text: &str) -> Self {
        match Self::load(json_text) {
            Ok(dictionary) => dictionary,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load language JSON, all keys will be missing");
                Self::default()
            }
        }
    }

    /// Serialize to pretty-printed JSON for saving.
    ///
    /// Carriage returns are stripped from every value. Entries whose value
    /// is not text are left out.
    ///
    /// # Errors
    /// Returns error if the serializer refuses the output.
    pub fn serialize(&self) -> Result<String, SerializeError> {
        let mut output = Map::new();
        for (key, token) in &self.entries {
            let Some(text) = token.as_text() else {
                tracing::debug!(key = %key, kind = token.kind(), "Dropping non-text entry from output");
                continue;
            };
            output.insert(key.clone(), Value::String(text.replace('\r', "")));
        }

        Ok(serde_json::to_string_pretty(&Value::Object(output))?)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Token> {
        self.entries.get(key)
    }

    /// Text stored under `key`; `None` if absent or not text.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Token::as_text)
    }

    /// Set the text for `key`, returning the previous token.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<Token> {
        self.entries.insert(key.into(), Token::Text(value.into()))
    }

    /// Remove `key` and its value entirely, keeping the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<Token> {
        self.entries.shift_remove(key)
    }

    /// True if any value (text or not) is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn contains_text(&self, key: &str) -> bool {
        self.text(key).is_some()
    }

    /// Keys with text values, in dictionary order.
    ///
    /// This is the list presented for editing; keys holding other tokens
    /// are not included.
    #[must_use]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter(|(_, token)| token.is_text()).map(|(key, _)| key.as_str())
    }

    /// All raw entries, including non-text ones.
    #[must_use]
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Token)> {
        self.entries.iter().map(|(key, token)| (key.as_str(), token))
    }

    /// Position of `key` in dictionary order.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.get_index_of(key)
    }

    /// Number of entries, including non-text ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for LanguageDictionary
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries =
            iter.into_iter().map(|(key, value)| (key.into(), Token::Text(value.into()))).collect();
        Self { entries }
    }
}
