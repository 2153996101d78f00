//! SKK-style kana/kanji conversion engine.
//!
//! The work happens in two member crates: `skk_core` (key events, romaji,
//! dictionaries, settings) and `skk_session` (the per-session conversion
//! state machine). This crate re-exports both and adds the host-facing
//! handles in [`api`].

pub mod api;
mod trace_init;

pub use api::{SkkCandidateList, SkkContext, SkkDictionary, SkkError, SkkUserWord};
pub use trace_init::init_tracing;

pub use skk_core::dict::{CompositeDictionary, Dictionary, StaticDictionary};
pub use skk_core::settings::{Command, Settings};
pub use skk_core::user_dict::UserDictionary;
pub use skk_core::{parse_key_sequence, KeyEvent, KeyEventError, KeySym, Modifiers};
pub use skk_session::{Context, InputMode, Mode};
