use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Infinitive endings that mark a conjugable verb
pub const ENDINGS: [&str; 3] = ["ar", "er", "ir"];

/// Normalized verb key: trimmed, NFC-composed and lowercased
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Verb(String);

impl Verb {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().nfc().collect::<String>().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Two-letter infinitive ending, if the verb has one
    pub fn ending(&self) -> Option<&'static str> {
        ENDINGS.into_iter().find(|e| self.0.ends_with(e))
    }

    pub fn is_conjugable(&self) -> bool {
        self.ending().is_some()
    }

    /// The verb minus its infinitive ending; the whole verb when there is none
    pub fn stem(&self) -> &str {
        match self.ending() {
            Some(ending) => &self.0[..self.0.len() - ending.len()],
            None => &self.0,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Verb {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Verb {
    fn from(raw: &str) -> Self {
        Verb::new(raw)
    }
}
