//! Dictionary sources and their merged view.
//!
//! Every backing store implements `Dictionary`. `StaticDictionary` is a
//! read-only mapping handed over by the host; `UserDictionary` (in
//! `crate::user_dict`) is the writable store that receives registrations.
//! `CompositeDictionary` queries an ordered list of sources as one.

mod composite;
mod entry;
mod key;
mod static_dict;

pub use composite::CompositeDictionary;
pub use entry::{Candidate, DictEntry};
pub use key::CompositeKey;
pub use static_dict::StaticDictionary;

use std::fmt;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("dictionary {name:?} is read-only")]
    ReadOnly { name: String },

    #[error("no writable dictionary attached")]
    NoWritableDictionary,

    #[error("empty reading")]
    EmptyReading,

    #[error("empty surface")]
    EmptySurface,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(&'static str),

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),
}

/// All entries stored under one headword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub reading: String,
    pub entries: Vec<DictEntry>,
}

/// A source of conversion candidates.
///
/// Lookups take `&self` and must be safe to run from several sessions at
/// once. Writable sources serialize `register`/`purge` internally.
pub trait Dictionary: Send + Sync + fmt::Debug {
    /// Short label used in logs and errors.
    fn name(&self) -> &str;

    /// Candidates for `reading` in stored order. Unknown readings yield an
    /// empty list.
    fn lookup(&self, reading: &str) -> Vec<DictEntry>;

    /// Headwords starting with `prefix`, sorted by reading.
    fn complete(&self, prefix: &str, max_results: usize) -> Vec<SearchResult>;

    fn is_writable(&self) -> bool {
        false
    }

    /// Insert `entry` under `reading`, or move it to the front if present.
    /// Returns `true` when the entry is new.
    fn register(&self, reading: &str, entry: DictEntry) -> Result<bool, DictError> {
        let _ = (reading, entry);
        Err(DictError::ReadOnly {
            name: self.name().to_string(),
        })
    }

    /// Remove `surface` from `reading`. Returns `true` when something was removed.
    fn purge(&self, reading: &str, surface: &str) -> Result<bool, DictError> {
        let _ = (reading, surface);
        Err(DictError::ReadOnly {
            name: self.name().to_string(),
        })
    }
}

pub(crate) fn validate_entry(reading: &str, entry: &DictEntry) -> Result<(), DictError> {
    if reading.is_empty() {
        return Err(DictError::EmptyReading);
    }
    if entry.surface.is_empty() {
        return Err(DictError::EmptySurface);
    }
    Ok(())
}
