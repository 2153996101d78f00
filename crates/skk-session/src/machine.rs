//! The conversion state machine.
//!
//! One `Machine` drives one segment. Registration nests a fresh machine for
//! the word being registered, so every level has its own buffer and state
//! and committing in the inner machine writes into the registration text.

use skk_core::dict::{Candidate, CompositeDictionary, CompositeKey};
use skk_core::kana::{hiragana_to_katakana, katakana_to_hiragana};
use skk_core::romaji::Transliterator;
use skk_core::settings::{Command, Settings};
use skk_core::KeyEvent;
use tracing::debug;

use crate::types::{CompositionBuffer, InputMode, Mode, SelectionView};

/// Everything a key handler needs besides its own machine.
pub(crate) struct Env<'a> {
    pub(crate) dict: &'a CompositeDictionary,
    pub(crate) settings: &'a Settings,
    pub(crate) romaji: Transliterator<'a>,
    pub(crate) input_mode: &'a mut InputMode,
    /// Registrations enclosing the machine being driven.
    pub(crate) depth: usize,
}

impl<'a> Env<'a> {
    pub(crate) fn is(&self, command: Command, event: &KeyEvent) -> bool {
        self.settings.keymap().matches(command, event)
    }

    /// Kana in the form the current input mode displays and commits.
    pub(crate) fn render(&self, kana: &str) -> String {
        render(*self.input_mode, kana)
    }

    /// Kana in the form opposite to the current input mode.
    pub(crate) fn render_flipped(&self, kana: &str) -> String {
        match *self.input_mode {
            InputMode::Katakana => katakana_to_hiragana(kana),
            InputMode::Hiragana | InputMode::Ascii | InputMode::Zenkaku => {
                hiragana_to_katakana(kana)
            }
        }
    }

    pub(crate) fn can_register(&self) -> bool {
        self.depth < self.settings.limits.max_registration_depth
    }

    /// Environment for a machine nested one registration deeper.
    pub(crate) fn nested(&mut self) -> Env<'_> {
        Env {
            dict: self.dict,
            settings: self.settings,
            romaji: self.romaji,
            input_mode: &mut *self.input_mode,
            depth: self.depth + 1,
        }
    }
}

pub(crate) fn render(mode: InputMode, kana: &str) -> String {
    match mode {
        InputMode::Katakana => hiragana_to_katakana(kana),
        InputMode::Hiragana | InputMode::Ascii | InputMode::Zenkaku => kana.to_string(),
    }
}

/// What kind of segment a conversion started from; editing or an exhausted
/// registration cap returns there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Origin {
    Kana,
    Abbreviation,
}

impl Origin {
    pub(crate) fn editing_state(self) -> State {
        match self {
            Origin::Kana => State::Composing,
            Origin::Abbreviation => State::Abbreviation,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Selection {
    pub(crate) key: CompositeKey,
    pub(crate) origin: Origin,
    pub(crate) candidates: Vec<Candidate>,
    pub(crate) index: usize,
}

impl Selection {
    pub(crate) fn current(&self) -> &Candidate {
        &self.candidates[self.index]
    }
}

#[derive(Debug)]
pub(crate) struct Registration {
    pub(crate) key: CompositeKey,
    pub(crate) origin: Origin,
    /// Text committed so far by the nested machine.
    pub(crate) text: String,
    pub(crate) inner: Machine,
}

#[derive(Debug, Default)]
pub(crate) enum State {
    #[default]
    Direct,
    Composing,
    Abbreviation,
    Selecting(Selection),
    /// Same shape as a selection, but every candidate carries the reading
    /// it completed to.
    Completing(Selection),
    Registering(Box<Registration>),
}

#[derive(Debug, Default)]
pub(crate) struct Machine {
    pub(crate) buffer: CompositionBuffer,
    pub(crate) state: State,
}

impl Machine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn mode(&self) -> Mode {
        match self.state {
            State::Direct => Mode::Direct,
            State::Composing => Mode::Composing,
            State::Abbreviation => Mode::Abbreviation,
            State::Selecting(_) => Mode::CandidateSelection,
            State::Completing(_) => Mode::Completion,
            State::Registering(_) => Mode::Registration,
        }
    }

    /// Drop everything, including nested registrations.
    pub(crate) fn reset(&mut self) {
        self.buffer.clear();
        self.state = State::Direct;
    }

    /// The machine that is currently receiving keys.
    pub(crate) fn innermost(&self) -> &Machine {
        match &self.state {
            State::Registering(reg) => reg.inner.innermost(),
            _ => self,
        }
    }

    pub(crate) fn selection(&self) -> Option<SelectionView<'_>> {
        match &self.innermost().state {
            State::Selecting(sel) | State::Completing(sel) => Some(SelectionView {
                index: sel.index,
                candidates: &sel.candidates,
            }),
            _ => None,
        }
    }

    pub(crate) fn transition(&mut self, state: State) {
        let from = self.mode();
        self.state = state;
        let to = self.mode();
        if from != to {
            debug!(?from, ?to, "transition");
        }
    }

    /// Feed one key. Committed text is appended to `out`. Returns whether
    /// the key was consumed.
    pub(crate) fn handle(&mut self, env: &mut Env<'_>, event: &KeyEvent, out: &mut String) -> bool {
        if !matches!(self.state, State::Direct) && env.is(Command::Cancel, event) {
            debug!(from = ?self.mode(), depth = env.depth, "cancel");
            self.reset();
            return true;
        }

        match self.state {
            State::Direct => self.handle_direct(env, event, out),
            State::Composing => self.handle_composing(env, event, out),
            State::Abbreviation => self.handle_abbreviation(env, event, out),
            State::Selecting(_) => self.handle_selecting(env, event, out),
            State::Completing(_) => self.handle_completing(env, event, out),
            State::Registering(_) => self.handle_registering(env, event, out),
        }
    }

    /// Look up the current buffer and move to the matching phase: candidates
    /// found → selection, none → registration (or stay composing when the
    /// nesting cap is reached).
    pub(crate) fn start_conversion(&mut self, env: &mut Env<'_>, key: CompositeKey, origin: Origin) {
        let candidates = env.dict.candidates(&key);
        debug!(yomi = key.yomi(), okuri = ?key.okuri(), hits = candidates.len(), "convert");
        self.buffer.clear();
        if !candidates.is_empty() {
            self.transition(State::Selecting(Selection {
                key,
                origin,
                candidates,
                index: 0,
            }));
        } else if env.can_register() {
            self.begin_registration(key, origin);
        } else {
            debug!(depth = env.depth, "registration depth reached, staying in composition");
            self.resume_editing(&key, origin);
        }
    }

    /// Offer words whose reading starts with `key`'s yomi. Returns `false`
    /// and leaves the machine untouched when nothing matches.
    pub(crate) fn start_completion(&mut self, env: &Env<'_>, key: CompositeKey, origin: Origin) -> bool {
        let candidates = env
            .dict
            .completions(key.yomi(), env.settings.conversion.max_completions);
        if candidates.is_empty() {
            debug!(prefix = key.yomi(), "no completions");
            return false;
        }
        self.buffer.clear();
        self.transition(State::Completing(Selection {
            key,
            origin,
            candidates,
            index: 0,
        }));
        true
    }

    pub(crate) fn begin_registration(&mut self, key: CompositeKey, origin: Origin) {
        self.buffer.clear();
        self.transition(State::Registering(Box::new(Registration {
            key,
            origin,
            text: String::new(),
            inner: Machine::new(),
        })));
    }

    /// Put `key` back into the buffer as editable text.
    pub(crate) fn resume_editing(&mut self, key: &CompositeKey, origin: Origin) {
        self.buffer.restore(key);
        self.transition(origin.editing_state());
    }

    /// Text shown to the user for work in progress.
    pub(crate) fn preedit(&self, input_mode: InputMode) -> String {
        let b = &self.buffer;
        match &self.state {
            State::Direct => b.pending().to_string(),
            State::Composing => {
                let mut s = String::from("▽");
                s.push_str(&render(input_mode, b.kana()));
                if let Some(okuri) = b.okuri() {
                    s.push('*');
                    s.push_str(&render(input_mode, okuri));
                }
                s.push_str(b.pending());
                s
            }
            State::Abbreviation => format!("▽{}", b.kana()),
            State::Selecting(sel) => format!("▼{}", sel.current().output()),
            State::Completing(sel) => format!("■{}", sel.current().output()),
            State::Registering(reg) => {
                let mut s = String::from("▼");
                s.push_str(reg.key.yomi());
                if let Some(okuri) = reg.key.okuri() {
                    s.push('*');
                    s.push_str(okuri);
                }
                s.push_str(reg.key.suffix().unwrap_or_default());
                s.push('【');
                s.push_str(&reg.text);
                s.push_str(&reg.inner.preedit(input_mode));
                s.push('】');
                s
            }
        }
    }
}
