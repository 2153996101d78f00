//! Romaji-to-kana transliteration.
//!
//! A double-array trie of the rules answers exact and prefix lookups;
//! `Transliterator` walks it one key at a time, handling sokuon (っ),
//! hatsuon (ん) and yōon (きゃ).

mod config;
mod convert;
mod trie;

pub use config::{parse_romaji_toml, RomajiConfigError};
pub use convert::{Step, StepKind, Transliterator};
pub use trie::{RomajiTrie, TrieLookupResult};

pub(crate) const DEFAULT_TOML: &str = include_str!("default_romaji.toml");

/// The embedded default romaji table.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}
