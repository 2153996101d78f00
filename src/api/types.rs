use skk_core::dict::DictError;
use skk_core::romaji::RomajiConfigError;
use skk_core::settings::SettingsError;
use skk_core::KeyEventError;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SkkError {
    #[error("IO error: {msg}")]
    Io { msg: String },
    #[error("invalid data: {msg}")]
    InvalidData { msg: String },
    #[error("unresolvable key event: {0}")]
    UnresolvableKeyEvent(#[from] KeyEventError),
    #[error("dictionary {name:?} is read-only")]
    ReadOnlyDictionary { name: String },
    #[error("dictionary error: {0}")]
    Dictionary(DictError),
}

impl From<DictError> for SkkError {
    fn from(e: DictError) -> Self {
        match e {
            DictError::ReadOnly { name } => SkkError::ReadOnlyDictionary { name },
            DictError::Io(e) => SkkError::Io { msg: e.to_string() },
            other => SkkError::Dictionary(other),
        }
    }
}

impl From<SettingsError> for SkkError {
    fn from(e: SettingsError) -> Self {
        SkkError::InvalidData { msg: e.to_string() }
    }
}

impl From<RomajiConfigError> for SkkError {
    fn from(e: RomajiConfigError) -> Self {
        SkkError::InvalidData { msg: e.to_string() }
    }
}

// ---------------------------------------------------------------------------
// Records (value types handed to the host)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkkUserWord {
    pub reading: String,
    pub surface: String,
}

/// Candidate list currently shown, with the highlighted index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkkCandidateList {
    pub surfaces: Vec<String>,
    pub selected: u32,
}
