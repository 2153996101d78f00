mod composition;
mod output;

pub use composition::CompositionBuffer;
pub use output::OutputQueue;

use skk_core::dict::Candidate;

/// Which conversion phase the engine is in. Reported to hosts; the engine
/// itself keeps richer per-phase data internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Keys become kana and are committed at once.
    Direct,
    /// Kana accumulates as a yomi (▽).
    Composing,
    /// Stepping through dictionary candidates (▼).
    CandidateSelection,
    /// Stepping through words whose reading starts with the yomi (■).
    Completion,
    /// Collecting a surface form for a yomi the dictionaries lack.
    Registration,
    /// ASCII yomi typed after `/`, bypassing romaji.
    Abbreviation,
}

/// Character form applied to kana produced in `Direct` and `Composing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputMode {
    #[default]
    Hiragana,
    Katakana,
    /// Printable keys are committed verbatim.
    Ascii,
    /// Printable keys are committed as full-width characters.
    Zenkaku,
}

impl InputMode {
    /// Printable keys bypass romaji and are committed one by one.
    pub fn is_latin(self) -> bool {
        matches!(self, InputMode::Ascii | InputMode::Zenkaku)
    }
}

/// Borrowed view of an active candidate list.
#[derive(Debug, Clone, Copy)]
pub struct SelectionView<'a> {
    pub index: usize,
    pub candidates: &'a [Candidate],
}

impl SelectionView<'_> {
    pub fn current(&self) -> &Candidate {
        &self.candidates[self.index]
    }
}

pub(crate) fn cyclic_index(current: usize, delta: i32, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let c = current as i64;
    let n = count as i64;
    (c + delta as i64).rem_euclid(n) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cyclic_wraps_both_ways() {
        assert_eq!(cyclic_index(0, 1, 3), 1);
        assert_eq!(cyclic_index(2, 1, 3), 0);
        assert_eq!(cyclic_index(0, -1, 3), 2);
        assert_eq!(cyclic_index(0, 1, 0), 0);
        assert_eq!(cyclic_index(0, -7, 3), 2);
    }
}
