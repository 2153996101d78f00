use skk_core::dict::CompositeKey;
use skk_core::romaji::Transliterator;

/// Unconverted text of the current segment.
///
/// `kana` is the finalized stem, always hiragana (ASCII in abbreviation
/// mode). `okuri` is `Some` once an uppercase key has started the
/// okurigana, even before any of it resolved. `pending` is the romaji tail
/// still waiting for more keys; it belongs to `okuri` when that is `Some`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompositionBuffer {
    kana: String,
    okuri: Option<String>,
    pending: String,
}

impl CompositionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kana(&self) -> &str {
        &self.kana
    }

    pub fn okuri(&self) -> Option<&str> {
        self.okuri.as_deref()
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.kana.is_empty() && self.okuri.is_none() && self.pending.is_empty()
    }

    /// Characters held across stem, okurigana and tail.
    pub fn char_len(&self) -> usize {
        self.kana.chars().count()
            + self.okuri.as_deref().map_or(0, |o| o.chars().count())
            + self.pending.chars().count()
    }

    /// Stem followed by okurigana, without the tail.
    pub fn text(&self) -> String {
        let mut s = self.kana.clone();
        if let Some(okuri) = &self.okuri {
            s.push_str(okuri);
        }
        s
    }

    pub(crate) fn has_okuri(&self) -> bool {
        self.okuri.is_some()
    }

    /// Okurigana has at least one kana and nothing is pending.
    pub(crate) fn okuri_complete(&self) -> bool {
        self.pending.is_empty() && self.okuri.as_deref().is_some_and(|o| !o.is_empty())
    }

    /// Append resolved text to whichever part is being typed.
    pub(crate) fn append(&mut self, text: &str) {
        match &mut self.okuri {
            Some(okuri) => okuri.push_str(text),
            None => self.kana.push_str(text),
        }
    }

    pub(crate) fn append_stem(&mut self, text: &str) {
        self.kana.push_str(text);
    }

    pub(crate) fn set_pending(&mut self, pending: String) {
        self.pending = pending;
    }

    pub(crate) fn begin_okuri(&mut self) {
        if self.okuri.is_none() {
            self.okuri = Some(String::new());
        }
    }

    /// Resolve the tail as if no more keys were coming.
    pub(crate) fn flush_pending(&mut self, romaji: &Transliterator<'_>) {
        if self.pending.is_empty() {
            return;
        }
        let resolved = romaji.flush(&std::mem::take(&mut self.pending));
        self.append(&resolved);
    }

    /// Drop one character: tail first, then okurigana, then stem. An
    /// okurigana marker with nothing after it is dropped as a whole.
    pub(crate) fn pop(&mut self) -> bool {
        if self.pending.pop().is_some() {
            return true;
        }
        if let Some(okuri) = &mut self.okuri {
            if okuri.pop().is_none() || okuri.is_empty() {
                self.okuri = None;
            }
            return true;
        }
        self.kana.pop().is_some()
    }

    pub(crate) fn clear(&mut self) {
        self.kana.clear();
        self.okuri = None;
        self.pending.clear();
    }

    /// Lookup key for the current content. The tail is ignored.
    pub(crate) fn key(&self) -> CompositeKey {
        CompositeKey::new(self.kana.clone(), self.okuri.clone())
    }

    /// Put a conversion key back as editable text, suffix included.
    pub(crate) fn restore(&mut self, key: &CompositeKey) {
        self.kana = key.yomi().to_string();
        self.okuri = key.okuri().map(str::to_string);
        self.pending.clear();
        if let Some(suffix) = key.suffix() {
            self.append(suffix);
        }
    }
}
