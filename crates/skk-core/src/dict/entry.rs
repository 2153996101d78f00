use serde::{Deserialize, Serialize};

use super::CompositeKey;
use crate::numeric::expand;

/// One candidate as stored under a headword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    pub surface: String,
    pub annotation: Option<String>,
}

impl DictEntry {
    pub fn new(surface: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            annotation: None,
        }
    }

    pub fn with_annotation(surface: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            annotation: Some(annotation.into()),
        }
    }
}

/// A dictionary entry bound to the key it was found under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub key: CompositeKey,
    pub entry: DictEntry,
}

impl Candidate {
    pub fn new(key: CompositeKey, entry: DictEntry) -> Self {
        Self { key, entry }
    }

    pub fn surface(&self) -> &str {
        &self.entry.surface
    }

    /// Text committed for this candidate: the surface with its numeric
    /// placeholders filled, followed by the okurigana exactly as typed and
    /// any suffix.
    pub fn output(&self) -> String {
        let mut out = expand(&self.entry.surface, &self.key.numbers());
        if let Some(okuri) = self.key.okuri() {
            out.push_str(okuri);
        }
        if let Some(suffix) = self.key.suffix() {
            out.push_str(suffix);
        }
        out
    }
}
