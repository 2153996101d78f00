//! Host-facing surface of the engine: dictionary and context handles plus
//! the global configuration entry points.
//!
//! Handles are `Arc`s so they can cross into a host binding layer as-is.

mod context;
mod dictionary;
mod types;


pub use context::SkkContext;
pub use dictionary::SkkDictionary;
pub use types::{SkkCandidateList, SkkError, SkkUserWord};

use std::path::Path;

use skk_core::romaji::RomajiTrie;

// ---------------------------------------------------------------------------
// Top-level functions
// ---------------------------------------------------------------------------

pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

fn read_config(path: &str) -> Result<String, SkkError> {
    std::fs::read_to_string(path).map_err(|e| SkkError::Io {
        msg: format!("{path}: {e}"),
    })
}

/// Replace the built-in romaji table. Must run before the first context
/// processes a key.
pub fn romaji_load_config(path: &str) -> Result<(), SkkError> {
    let content = read_config(path)?;
    RomajiTrie::init_custom(content)?;
    Ok(())
}

/// Replace the built-in settings. Must run before the first context is
/// created.
pub fn settings_load_config(path: &str) -> Result<(), SkkError> {
    let content = read_config(path)?;
    skk_core::settings::init_custom(content)?;
    Ok(())
}

pub fn romaji_default_config() -> &'static str {
    skk_core::romaji::default_toml()
}

pub fn settings_default_config() -> &'static str {
    skk_core::settings::DEFAULT_SETTINGS_TOML
}

/// Start JSON trace logging into `log_dir`; `false` if logging was
/// already set up or the `trace` feature is off.
pub fn trace_init(log_dir: &str) -> bool {
    crate::trace_init::init_tracing(Path::new(log_dir))
}
