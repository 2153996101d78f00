//! Writable user dictionary.
//!
//! Registrations land here. Candidates under one reading are kept
//! most-recently-registered first. A `RwLock` lets many sessions look up
//! concurrently while registrations from any of them are serialized.


use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dict::{validate_entry, DictEntry, DictError, Dictionary, SearchResult};

const MAGIC: &[u8; 4] = b"SKUD";
const VERSION: u8 = 1;

#[derive(Debug)]
pub struct UserDictionary {
    name: String,
    entries: RwLock<HashMap<String, Vec<DictEntry>>>,
}

impl UserDictionary {
    pub fn new() -> Self {
        Self::named("user")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Seed from an already-decoded mapping, keeping the given order.
    pub fn from_entries<I>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<DictEntry>)>,
    {
        let dict = Self::named(name);
        {
            let mut map = dict.write();
            for (reading, list) in entries {
                for entry in list {
                    if validate_entry(&reading, &entry).is_err() {
                        continue;
                    }
                    let slot = map.entry(reading.clone()).or_default();
                    if !slot.iter().any(|e| e.surface == entry.surface) {
                        slot.push(entry);
                    }
                }
            }
        }
        dict
    }

    // A panic while holding the lock leaves the map itself intact, so keep
    // serving it.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Vec<DictEntry>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Vec<DictEntry>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// All entries as (reading, surface) pairs, sorted by reading then
    /// candidate order.
    pub fn list(&self) -> Vec<(String, String)> {
        let map = self.read();
        let mut readings: Vec<&String> = map.keys().collect();
        readings.sort();
        readings
            .into_iter()
            .flat_map(|r| map[r].iter().map(move |e| (r.clone(), e.surface.clone())))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Serialize a snapshot (SKUD format).
    pub fn to_bytes(&self) -> Result<Vec<u8>, DictError> {
        let records: Vec<UserWordRecord> = {
            let map = self.read();
            let mut readings: Vec<&String> = map.keys().collect();
            readings.sort();
            readings
                .into_iter()
                .flat_map(|reading| {
                    map[reading].iter().map(move |e| UserWordRecord {
                        reading: reading.clone(),
                        surface: e.surface.clone(),
                        annotation: e.annotation.clone(),
                    })
                })
                .collect()
        };

        let body = bincode::serialize(&records).map_err(DictError::Serialize)?;
        let mut buf = Vec::with_capacity(MAGIC.len() + 1 + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    /// Restore a snapshot produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DictError> {
        let header = MAGIC.len() + 1;
        if bytes.len() < header {
            return Err(DictError::InvalidSnapshot("too short"));
        }
        if &bytes[..MAGIC.len()] != MAGIC {
            return Err(DictError::InvalidSnapshot("bad magic"));
        }
        if bytes[MAGIC.len()] != VERSION {
            return Err(DictError::InvalidSnapshot("unsupported version"));
        }
        let records: Vec<UserWordRecord> =
            bincode::deserialize(&bytes[header..]).map_err(DictError::Deserialize)?;

        let mut grouped: Vec<(String, Vec<DictEntry>)> = Vec::new();
        for rec in records {
            let entry = DictEntry {
                surface: rec.surface,
                annotation: rec.annotation,
            };
            match grouped.last_mut() {
                Some((reading, list)) if *reading == rec.reading => list.push(entry),
                _ => grouped.push((rec.reading, vec![entry])),
            }
        }
        Ok(Self::from_entries("user", grouped))
    }

    /// Atomic write: write to a sibling .tmp then rename over `path`.
    pub fn save(&self, path: &Path) -> Result<(), DictError> {
        let bytes = self.to_bytes()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        debug!(path = %path.display(), bytes = bytes.len(), "user dictionary saved");
        Ok(())
    }

    /// Open a snapshot file. A missing file is an empty dictionary.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        match fs::read(path) {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for UserDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary for UserDictionary {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, reading: &str) -> Vec<DictEntry> {
        self.read().get(reading).cloned().unwrap_or_default()
    }

    fn complete(&self, prefix: &str, max_results: usize) -> Vec<SearchResult> {
        let map = self.read();
        let mut results: Vec<SearchResult> = map
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| SearchResult {
                reading: k.clone(),
                entries: v.clone(),
            })
            .collect();
        results.sort_by(|a, b| a.reading.cmp(&b.reading));
        results.truncate(max_results);
        results
    }

    fn is_writable(&self) -> bool {
        true
    }

    fn register(&self, reading: &str, entry: DictEntry) -> Result<bool, DictError> {
        validate_entry(reading, &entry)?;
        let mut map = self.write();
        let list = map.entry(reading.to_string()).or_default();
        let existing = list.iter().position(|e| e.surface == entry.surface);
        if let Some(pos) = existing {
            list.remove(pos);
        }
        list.insert(0, entry);
        Ok(existing.is_none())
    }

    fn purge(&self, reading: &str, surface: &str) -> Result<bool, DictError> {
        let mut map = self.write();
        let Some(list) = map.get_mut(reading) else {
            return Ok(false);
        };
        let before = list.len();
        list.retain(|e| e.surface != surface);
        let removed = list.len() < before;
        if list.is_empty() {
            map.remove(reading);
        }
        Ok(removed)
    }
}

/// Flat snapshot record, one per candidate, in candidate order.
#[derive(Serialize, Deserialize)]
struct UserWordRecord {
    reading: String,
    surface: String,
    annotation: Option<String>,
}
