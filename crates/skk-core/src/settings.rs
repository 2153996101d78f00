//! Global settings loaded from TOML, using the same OnceLock pattern as the
//! romaji table.
//!
//! - `init_custom(toml_content)` installs a custom document before the first
//!   `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Defaults are embedded via `include_str!("default_settings.toml")`

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::keyevent::{KeyEvent, KeyEventError};

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before the first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("invalid key {key:?} for {field}: {source}")]
    InvalidKey {
        field: String,
        key: String,
        #[source]
        source: KeyEventError,
    },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

/// Engine commands that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Convert,
    NextCandidate,
    PreviousCandidate,
    Commit,
    Cancel,
    Delete,
    PurgeCandidate,
    RegisterWord,
    Abbreviation,
    ToggleKatakana,
    AsciiMode,
    ZenkakuMode,
    HiraganaMode,
    BeginComposition,
    Complete,
    PreviousCompletion,
}

impl Command {
    pub const ALL: [Command; 16] = [
        Command::Convert,
        Command::NextCandidate,
        Command::PreviousCandidate,
        Command::Commit,
        Command::Cancel,
        Command::Delete,
        Command::PurgeCandidate,
        Command::RegisterWord,
        Command::Abbreviation,
        Command::ToggleKatakana,
        Command::AsciiMode,
        Command::ZenkakuMode,
        Command::HiraganaMode,
        Command::BeginComposition,
        Command::Complete,
        Command::PreviousCompletion,
    ];

    /// Name used as the `[keymap]` key.
    pub fn name(self) -> &'static str {
        match self {
            Command::Convert => "convert",
            Command::NextCandidate => "next_candidate",
            Command::PreviousCandidate => "previous_candidate",
            Command::Commit => "commit",
            Command::Cancel => "cancel",
            Command::Delete => "delete",
            Command::PurgeCandidate => "purge_candidate",
            Command::RegisterWord => "register_word",
            Command::Abbreviation => "abbreviation",
            Command::ToggleKatakana => "toggle_katakana",
            Command::AsciiMode => "ascii_mode",
            Command::ZenkakuMode => "zenkaku_mode",
            Command::HiraganaMode => "hiragana_mode",
            Command::BeginComposition => "begin_composition",
            Command::Complete => "complete",
            Command::PreviousCompletion => "previous_completion",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Command → keys table. Several commands may share a key; which one
/// applies depends on the state the engine is in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keymap {
    bindings: HashMap<Command, Vec<KeyEvent>>,
}

impl Keymap {
    /// True when `event` is bound to `command`.
    pub fn matches(&self, command: Command, event: &KeyEvent) -> bool {
        let ev = event.normalized();
        self.bindings
            .get(&command)
            .is_some_and(|keys| keys.iter().any(|k| k.normalized() == ev))
    }

    pub fn keys(&self, command: Command) -> &[KeyEvent] {
        self.bindings.get(&command).map_or(&[], Vec::as_slice)
    }

    pub fn bind(&mut self, command: Command, key: KeyEvent) {
        let keys = self.bindings.entry(command).or_default();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    pub fn unbind(&mut self, command: Command) {
        self.bindings.remove(&command);
    }

    fn from_raw(raw: &HashMap<String, Vec<String>>) -> Result<Self, SettingsError> {
        let mut map = Keymap::default();
        for (name, keys) in raw {
            let command = Command::from_name(name).ok_or_else(|| SettingsError::InvalidValue {
                field: format!("keymap.{name}"),
                reason: "unknown command".to_string(),
            })?;
            let parsed = keys
                .iter()
                .map(|k| {
                    k.parse::<KeyEvent>().map_err(|source| SettingsError::InvalidKey {
                        field: format!("keymap.{name}"),
                        key: k.clone(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            map.bindings.insert(command, parsed);
        }
        Ok(map)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Limits {
    pub max_registration_depth: usize,
    pub max_composition_length: usize,
}

/// Conversion behaviour that is not a key binding.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Conversion {
    /// Kana that, typed at the end of a reading, convert the reading in
    /// front of them and ride along after the chosen candidate.
    pub auto_start_keywords: Vec<String>,
    /// Most readings offered by completion.
    pub max_completions: usize,
}

impl Default for Conversion {
    fn default() -> Self {
        Self {
            auto_start_keywords: ["。", "、", "」", "』"].map(String::from).to_vec(),
            max_completions: 32,
        }
    }
}

impl Conversion {
    /// The keyword `text` ends with, if any.
    pub fn auto_start_suffix(&self, text: &str) -> Option<&str> {
        self.auto_start_keywords
            .iter()
            .map(String::as_str)
            .find(|k| text.ends_with(k))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub limits: Limits,
    #[serde(default)]
    pub conversion: Conversion,
    #[serde(default, rename = "keymap")]
    keymap_raw: HashMap<String, Vec<String>>,
    #[serde(skip)]
    keymap: Keymap,
}

impl Settings {
    /// Settings from the embedded default document, ignoring any custom
    /// global.
    pub fn builtin() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("embedded settings TOML must be valid")
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn keymap_mut(&mut self) -> &mut Keymap {
        &mut self.keymap
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let mut s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    s.keymap = merged_keymap(&s.keymap_raw)?;
    Ok(s)
}

// Commands missing from `raw` fall back to the embedded bindings.
fn merged_keymap(raw: &HashMap<String, Vec<String>>) -> Result<Keymap, SettingsError> {
    #[derive(Deserialize)]
    struct KeymapOnly {
        keymap: HashMap<String, Vec<String>>,
    }

    let mut merged: HashMap<String, Vec<String>> = toml::from_str::<KeymapOnly>(DEFAULT_SETTINGS_TOML)
        .map(|d| d.keymap)
        .map_err(|e| SettingsError::Parse(e.to_string()))?;
    for (name, keys) in raw {
        merged.insert(name.clone(), keys.clone());
    }
    Keymap::from_raw(&merged)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive_usize!(limits.max_registration_depth);
    check_positive_usize!(limits.max_composition_length);
    check_positive_usize!(conversion.max_completions);

    if s.conversion.auto_start_keywords.iter().any(String::is_empty) {
        return Err(SettingsError::InvalidValue {
            field: "conversion.auto_start_keywords".to_string(),
            reason: "empty keyword".to_string(),
        });
    }

    Ok(())
}
