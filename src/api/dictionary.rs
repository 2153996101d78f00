use std::path::Path;
use std::sync::Arc;

use skk_core::dict::{DictEntry, Dictionary, StaticDictionary};
use skk_core::user_dict::UserDictionary;
use tracing::debug;

use super::{SkkError, SkkUserWord};

#[derive(Debug)]
enum Backing {
    Static(Arc<StaticDictionary>),
    User(Arc<UserDictionary>),
}

/// Host handle to one candidate source.
///
/// Contexts keep their own reference to the source, so closing a handle
/// that is still attached only gives up the host's share; the source lives
/// until the last context using it is destroyed.
#[derive(Debug)]
pub struct SkkDictionary {
    backing: Backing,
}

impl SkkDictionary {
    /// Build a source from an already-decoded `reading -> [surface, ...]`
    /// mapping. A writable source also receives registrations and learning.
    pub fn open<I, R, S>(mapping: I, writable: bool) -> Arc<Self>
    where
        I: IntoIterator<Item = (R, Vec<S>)>,
        R: Into<String>,
        S: Into<String>,
    {
        let entries = mapping.into_iter().map(|(reading, surfaces)| {
            (
                reading.into(),
                surfaces.into_iter().map(DictEntry::new).collect::<Vec<_>>(),
            )
        });
        let backing = if writable {
            Backing::User(Arc::new(UserDictionary::from_entries("user", entries)))
        } else {
            Backing::Static(Arc::new(StaticDictionary::from_entries("system", entries)))
        };
        let dict = Self { backing };
        debug!(name = dict.name(), writable, "dictionary opened");
        Arc::new(dict)
    }

    /// Open a user dictionary snapshot written by `save`. A missing file
    /// yields an empty writable dictionary.
    pub fn load(path: &str) -> Result<Arc<Self>, SkkError> {
        let dict = UserDictionary::open(Path::new(path))?;
        debug!(path, words = dict.len(), "user dictionary loaded");
        Ok(Arc::new(Self {
            backing: Backing::User(Arc::new(dict)),
        }))
    }

    pub fn save(&self, path: &str) -> Result<(), SkkError> {
        match &self.backing {
            Backing::User(d) => Ok(d.save(Path::new(path))?),
            Backing::Static(d) => Err(SkkError::ReadOnlyDictionary {
                name: d.name().to_string(),
            }),
        }
    }

    /// Give up the host's handle. Returns `true` when a context still holds
    /// the source, which then stays alive with it.
    pub fn close(self: Arc<Self>) -> bool {
        // The handle itself owns one reference.
        let in_use = match &self.backing {
            Backing::Static(d) => Arc::strong_count(d) > 1,
            Backing::User(d) => Arc::strong_count(d) > 1,
        };
        debug!(name = self.name(), in_use, "dictionary closed");
        in_use
    }

    pub fn name(&self) -> &str {
        self.as_dyn().name()
    }

    pub fn is_writable(&self) -> bool {
        self.as_dyn().is_writable()
    }

    pub fn lookup(&self, reading: &str) -> Vec<String> {
        self.as_dyn()
            .lookup(reading)
            .into_iter()
            .map(|e| e.surface)
            .collect()
    }

    pub fn register(&self, reading: &str, surface: &str) -> Result<bool, SkkError> {
        Ok(self.as_dyn().register(reading, DictEntry::new(surface))?)
    }

    pub fn unregister(&self, reading: &str, surface: &str) -> Result<bool, SkkError> {
        Ok(self.as_dyn().purge(reading, surface)?)
    }

    /// Words of a writable dictionary; empty for read-only sources.
    pub fn list(&self) -> Vec<SkkUserWord> {
        match &self.backing {
            Backing::User(d) => d
                .list()
                .into_iter()
                .map(|(reading, surface)| SkkUserWord { reading, surface })
                .collect(),
            Backing::Static(_) => Vec::new(),
        }
    }

    fn as_dyn(&self) -> &dyn Dictionary {
        match &self.backing {
            Backing::Static(d) => d.as_ref(),
            Backing::User(d) => d.as_ref(),
        }
    }

    /// Shared reference to the source for a context to hold.
    pub(crate) fn source(&self) -> Arc<dyn Dictionary> {
        match &self.backing {
            Backing::Static(d) => Arc::clone(d) as Arc<dyn Dictionary>,
            Backing::User(d) => Arc::clone(d) as Arc<dyn Dictionary>,
        }
    }
}
