use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Deserialize)]
struct RomajiTable {
    mappings: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RomajiConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    #[error("key must be printable ASCII without spaces: {0:?}")]
    NonAsciiKey(String),
    #[error("empty kana for key: {0}")]
    EmptyValue(String),
    #[error("romaji table already initialized")]
    AlreadyInitialized,
}

/// Parse a romaji table document into a sorted `romaji -> kana` map.
pub fn parse_romaji_toml(toml_str: &str) -> Result<BTreeMap<String, String>, RomajiConfigError> {
    let table: RomajiTable =
        toml::from_str(toml_str).map_err(|e| RomajiConfigError::Parse(e.to_string()))?;

    if table.mappings.is_empty() {
        return Err(RomajiConfigError::Empty);
    }

    for (key, kana) in &table.mappings {
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(RomajiConfigError::NonAsciiKey(key.clone()));
        }
        if kana.is_empty() {
            return Err(RomajiConfigError::EmptyValue(key.clone()));
        }
    }

    Ok(table.mappings)
}
