use std::collections::{BTreeMap, HashMap};

use super::{DictEntry, Dictionary, SearchResult};

/// Read-only dictionary over an already-decoded mapping.
///
/// Candidate order is the order the host supplied them in; duplicate
/// surfaces under one reading keep their first position.
#[derive(Debug)]
pub struct StaticDictionary {
    name: String,
    entries: HashMap<String, Vec<DictEntry>>,
}

impl StaticDictionary {
    pub fn from_entries<I>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<DictEntry>)>,
    {
        let mut map: HashMap<String, Vec<DictEntry>> = HashMap::new();
        for (reading, list) in entries {
            if reading.is_empty() {
                continue;
            }
            let slot = map.entry(reading).or_default();
            for entry in list {
                if !entry.surface.is_empty() && !slot.iter().any(|e| e.surface == entry.surface) {
                    slot.push(entry);
                }
            }
        }
        map.retain(|_, v| !v.is_empty());
        Self {
            name: name.into(),
            entries: map,
        }
    }

    /// Convenience for `reading -> [surface, ...]` tables.
    pub fn from_surfaces<I, S>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: Into<String>,
    {
        Self::from_entries(
            name,
            entries.into_iter().map(|(reading, surfaces)| {
                (
                    reading.into(),
                    surfaces.into_iter().map(DictEntry::new).collect(),
                )
            }),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Dictionary for StaticDictionary {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, reading: &str) -> Vec<DictEntry> {
        self.entries.get(reading).cloned().unwrap_or_default()
    }

    fn complete(&self, prefix: &str, max_results: usize) -> Vec<SearchResult> {
        let sorted: BTreeMap<&String, &Vec<DictEntry>> = self
            .entries
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .collect();
        sorted
            .into_iter()
            .take(max_results)
            .map(|(reading, entries)| SearchResult {
                reading: reading.clone(),
                entries: entries.clone(),
            })
            .collect()
    }
}
