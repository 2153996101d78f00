//! Building blocks for an SKK-style kana/kanji conversion engine: key
//! events, the romaji table and transliterator, kana and numeric helpers,
//! dictionary sources and settings. Nothing here holds per-session state.

pub mod dict;
pub mod kana;
pub mod keyevent;
pub mod numeric;
pub mod romaji;
pub mod settings;
pub mod user_dict;

pub use keyevent::{parse_key_sequence, KeyEvent, KeyEventError, KeySym, Modifiers};
