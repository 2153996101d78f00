use tracing::trace;

use super::trie::{RomajiTrie, TrieLookupResult};

/// How a single key resolved against the pending tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// At least one kana unit was produced.
    Complete,
    /// Nothing resolved yet; the tail grew.
    Incomplete,
    /// The old tail had no continuation and was flushed as literal text.
    Rejected,
}

/// Result of feeding one key to the transliterator.
///
/// `emitted` is everything that left the tail on this step, in order: flushed
/// literals and completed kana. `pending` is the new tail, always a prefix of
/// some rule (or empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,
    pub emitted: String,
    pub pending: String,
}

impl Step {
    fn complete(emitted: String, pending: String) -> Self {
        Self {
            kind: StepKind::Complete,
            emitted,
            pending,
        }
    }

    fn incomplete(pending: String) -> Self {
        Self {
            kind: StepKind::Incomplete,
            emitted: String::new(),
            pending,
        }
    }

    /// Prepend text that left the tail before this step ran.
    fn after(mut self, head: String, kind: StepKind) -> Self {
        self.emitted.insert_str(0, &head);
        if kind == StepKind::Rejected || self.kind != StepKind::Rejected {
            self.kind = kind;
        }
        self
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

/// Table-driven romaji to hiragana matcher.
///
/// Stateless: callers own the pending tail and pass it back on every call.
#[derive(Debug, Clone, Copy)]
pub struct Transliterator<'a> {
    trie: &'a RomajiTrie,
}

impl Default for Transliterator<'static> {
    fn default() -> Self {
        Self::new(RomajiTrie::global())
    }
}

impl<'a> Transliterator<'a> {
    pub fn new(trie: &'a RomajiTrie) -> Self {
        Self { trie }
    }

    /// Feed one key against `pending`.
    pub fn feed(&self, pending: &str, key: char) -> Step {
        let key = key.to_ascii_lowercase();
        let mut candidate = String::with_capacity(pending.len() + key.len_utf8());
        candidate.push_str(pending);
        candidate.push(key);

        match self.trie.lookup(&candidate) {
            TrieLookupResult::Exact(kana) => return Step::complete(kana, String::new()),
            TrieLookupResult::Prefix | TrieLookupResult::ExactAndPrefix(_) => {
                return Step::incomplete(candidate)
            }
            TrieLookupResult::None => {}
        }

        if pending.is_empty() {
            // The key starts no rule at all.
            trace!(%key, "no rule starts with key");
            return Step {
                kind: StepKind::Rejected,
                emitted: key.to_string(),
                pending: String::new(),
            };
        }

        // Geminate: a doubled consonant yields っ and keeps one consonant.
        if pending.len() == 1
            && pending.starts_with(key)
            && key.is_ascii_alphabetic()
            && key != 'n'
            && !is_vowel(key)
        {
            return Step::complete("っ".to_string(), key.to_string());
        }

        // Moraic nasal: a held "n" resolves to ん before anything that cannot
        // continue it, then the key restarts matching.
        if pending == "n" {
            return self.feed("", key).after("ん".to_string(), StepKind::Complete);
        }

        // A tail that is itself a complete rule resolves before restarting.
        if let TrieLookupResult::ExactAndPrefix(kana) = self.trie.lookup(pending) {
            return self.feed("", key).after(kana, StepKind::Complete);
        }

        trace!(pending, %key, "tail rejected, flushing as literal");
        self.feed("", key)
            .after(pending.to_string(), StepKind::Rejected)
    }

    /// Like `feed`, but returns text resolved out of the old tail separately
    /// from the step the new key started.
    ///
    /// `("s", 's')` gives `("っ", pending "s")`; `("k", 'a')` gives
    /// `("", emitted "か")` because the key completed the old tail's rule.
    pub fn feed_split(&self, pending: &str, key: char) -> (String, Step) {
        let whole = self.feed(pending, key);
        if pending.is_empty() {
            return (String::new(), whole);
        }
        let mut candidate = pending.to_string();
        candidate.push(key.to_ascii_lowercase());
        if self.trie.lookup(&candidate) != TrieLookupResult::None {
            return (String::new(), whole);
        }

        let fresh = self.feed("", key);
        let head = whole
            .emitted
            .strip_suffix(fresh.emitted.as_str())
            .unwrap_or(&whole.emitted)
            .to_string();
        let step = Step {
            kind: fresh.kind,
            emitted: fresh.emitted,
            pending: whole.pending,
        };
        (head, step)
    }

    /// Resolve a tail with no further input: a held "n" becomes ん, a tail
    /// that is a complete rule yields its kana, anything else stays literal.
    pub fn flush(&self, pending: &str) -> String {
        if pending.is_empty() {
            return String::new();
        }
        if pending == "n" {
            return "ん".to_string();
        }
        match self.trie.lookup(pending) {
            TrieLookupResult::Exact(kana) | TrieLookupResult::ExactAndPrefix(kana) => kana,
            _ => pending.to_string(),
        }
    }

    /// Transliterate a whole key sequence, flushing the final tail.
    pub fn convert(&self, romaji: &str) -> String {
        let mut out = String::new();
        let mut pending = String::new();
        for key in romaji.chars() {
            let step = self.feed(&pending, key);
            out.push_str(&step.emitted);
            pending = step.pending;
        }
        out.push_str(&self.flush(&pending));
        out
    }
}
