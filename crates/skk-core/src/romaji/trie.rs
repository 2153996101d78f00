use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use lexime_trie::{DoubleArray, TrieSearch};

use super::config::{parse_romaji_toml, RomajiConfigError};
use super::DEFAULT_TOML;

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieLookupResult {
    None,
    Prefix,
    Exact(String),
    ExactAndPrefix(String),
}

/// Romaji rule table on a double-array trie answering exact and prefix lookups.
pub struct RomajiTrie {
    da: DoubleArray<u8>,
    keys: Vec<String>,
    values: Vec<String>,
}

impl fmt::Debug for RomajiTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RomajiTrie")
            .field("rules", &self.keys.len())
            .finish()
    }
}

impl RomajiTrie {
    /// Install a custom table before the first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), RomajiConfigError> {
        parse_romaji_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| RomajiConfigError::AlreadyInitialized)
    }

    /// Get or initialize the process-wide table.
    pub fn global() -> &'static RomajiTrie {
        static INSTANCE: OnceLock<RomajiTrie> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let custom = CUSTOM_TOML
                .get()
                .and_then(|s| parse_romaji_toml(s).ok());
            // The embedded table is covered by tests; fall back to an empty
            // table rather than panic inside a host process.
            let map = custom
                .or_else(|| parse_romaji_toml(DEFAULT_TOML).ok())
                .unwrap_or_default();
            Self::from_map(map)
        })
    }

    pub fn from_map(map: BTreeMap<String, String>) -> Self {
        // BTreeMap iterates in byte order, which the double-array build needs;
        // value ids are positions in that order.
        let (keys, values): (Vec<String>, Vec<String>) = map.into_iter().unzip();
        let byte_keys: Vec<&[u8]> = keys.iter().map(|k| k.as_bytes()).collect();
        let da = DoubleArray::<u8>::build(&byte_keys);
        Self { da, keys, values }
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, RomajiConfigError> {
        parse_romaji_toml(toml_str).map(Self::from_map)
    }

    pub fn lookup(&self, romaji: &str) -> TrieLookupResult {
        if romaji.is_empty() {
            return TrieLookupResult::None;
        }
        let pr = self.da.probe(romaji.as_bytes());
        let kana = pr.value.and_then(|id| self.values.get(id as usize)).cloned();
        match (kana, pr.has_children) {
            (None, false) => TrieLookupResult::None,
            (None, true) => TrieLookupResult::Prefix,
            (Some(kana), false) => TrieLookupResult::Exact(kana),
            (Some(kana), true) => TrieLookupResult::ExactAndPrefix(kana),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys
            .iter()
            .zip(&self.values)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
