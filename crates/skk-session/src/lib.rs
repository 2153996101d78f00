//! Per-session SKK conversion state.
//!
//! `Context` owns one conversion state machine, its composition buffer and
//! an output queue, and shares dictionaries with other contexts through
//! `Arc`. Hosts feed it one `KeyEvent` at a time and drain committed text
//! with `poll_output`.

mod types;

mod abbreviation;
mod completion;
mod composing;
mod direct;
mod machine;
mod registration;
mod selection;

#[cfg(test)]
mod tests;

use skk_core::dict::CompositeDictionary;
use skk_core::romaji::{RomajiTrie, Transliterator};
use skk_core::settings::{settings, Settings};
use skk_core::KeyEvent;
use tracing::{debug_span, trace};

pub use types::{CompositionBuffer, InputMode, Mode, OutputQueue, SelectionView};

use machine::{Env, Machine, State};

/// One input session. Not shareable between threads without external
/// locking; dictionaries inside it are.
#[derive(Debug)]
pub struct Context {
    dict: CompositeDictionary,
    settings: Settings,
    romaji: &'static RomajiTrie,
    input_mode: InputMode,
    machine: Machine,
    output: OutputQueue,
}

impl Context {
    /// Session using the global settings and romaji table.
    pub fn new(dict: CompositeDictionary) -> Self {
        Self::with_settings(dict, settings().clone())
    }

    pub fn with_settings(dict: CompositeDictionary, settings: Settings) -> Self {
        Self {
            dict,
            settings,
            romaji: RomajiTrie::global(),
            input_mode: InputMode::default(),
            machine: Machine::new(),
            output: OutputQueue::new(),
        }
    }

    /// Process one key. Returns `true` when the key changed engine state or
    /// produced output; `false` means the host may handle it itself.
    pub fn process_key_event(&mut self, event: KeyEvent) -> bool {
        let _span = debug_span!("process_key_event", %event).entered();

        if event.is_release() {
            return false;
        }

        let mut env = Env {
            dict: &self.dict,
            settings: &self.settings,
            romaji: Transliterator::new(self.romaji),
            input_mode: &mut self.input_mode,
            depth: 0,
        };
        let mut committed = String::new();
        let consumed = self.machine.handle(&mut env, &event, &mut committed);
        if !committed.is_empty() {
            trace!(%committed, "output");
            self.output.push(&committed);
        }
        consumed
    }

    /// Drain everything committed since the last poll.
    pub fn poll_output(&mut self) -> String {
        self.output.poll()
    }

    pub fn peek_output(&self) -> &str {
        self.output.peek()
    }

    /// Work-in-progress text for display, with ▽/▼ markers.
    pub fn preedit(&self) -> String {
        self.machine.preedit(self.input_mode)
    }

    /// Buffer of the segment currently being edited (the innermost one during
    /// registration).
    pub fn composition(&self) -> &CompositionBuffer {
        &self.machine.innermost().buffer
    }

    /// Mode of the outermost segment.
    pub fn mode(&self) -> Mode {
        self.machine.mode()
    }

    /// Mode of the segment currently receiving keys.
    pub fn active_mode(&self) -> Mode {
        self.machine.innermost().mode()
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
    }

    /// Candidate list being stepped through, if any.
    pub fn selection(&self) -> Option<SelectionView<'_>> {
        self.machine.selection()
    }

    /// How many registrations are open, nested inside one another.
    pub fn registration_depth(&self) -> usize {
        let mut depth = 0;
        let mut m = &self.machine;
        while let State::Registering(reg) = &m.state {
            depth += 1;
            m = &reg.inner;
        }
        depth
    }

    pub fn dictionary(&self) -> &CompositeDictionary {
        &self.dict
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Abandon any composition without committing. Queued output is kept.
    pub fn reset(&mut self) {
        self.machine.reset();
    }
}
