use skk_core::kana::ascii_to_zenkaku;
use skk_core::settings::Command;
use skk_core::KeyEvent;
use tracing::debug;

use crate::machine::{Env, Machine, State};
use crate::types::InputMode;

impl Machine {
    pub(crate) fn handle_direct(&mut self, env: &mut Env<'_>, event: &KeyEvent, out: &mut String) -> bool {
        if env.input_mode.is_latin() {
            return handle_latin(env, event, out);
        }

        let has_pending = !self.buffer.pending().is_empty();

        if env.is(Command::Cancel, event) {
            // A dangling tail is dropped; otherwise the key belongs to the host.
            self.buffer.clear();
            return has_pending;
        }
        if env.is(Command::Delete, event) {
            return self.buffer.pop();
        }
        if env.is(Command::HiraganaMode, event) {
            let changed = *env.input_mode != InputMode::Hiragana;
            self.flush_direct(env, out);
            *env.input_mode = InputMode::Hiragana;
            return has_pending || changed;
        }
        if env.is(Command::Commit, event) {
            self.flush_direct(env, out);
            return has_pending;
        }

        let Some(c) = event.printable() else {
            return false;
        };

        if env.is(Command::ToggleKatakana, event) {
            self.flush_direct(env, out);
            *env.input_mode = match *env.input_mode {
                InputMode::Katakana => InputMode::Hiragana,
                _ => InputMode::Katakana,
            };
            debug!(input_mode = ?env.input_mode, "input mode toggled");
            return true;
        }
        if env.is(Command::AsciiMode, event) {
            self.flush_direct(env, out);
            *env.input_mode = InputMode::Ascii;
            debug!("ascii input mode");
            return true;
        }
        if env.is(Command::ZenkakuMode, event) {
            self.flush_direct(env, out);
            *env.input_mode = InputMode::Zenkaku;
            debug!("zenkaku input mode");
            return true;
        }
        if env.is(Command::BeginComposition, event) {
            // Opens a segment without contributing a letter, so a reading
            // can start with a digit.
            self.flush_direct(env, out);
            self.transition(State::Composing);
            return true;
        }
        if env.is(Command::Abbreviation, event) {
            self.flush_direct(env, out);
            self.transition(State::Abbreviation);
            return true;
        }

        if c.is_ascii_uppercase() {
            // Begin a convertible segment; the key itself is its first letter.
            self.flush_direct(env, out);
            self.transition(State::Composing);
            return self.handle_composing(env, event, out);
        }

        let step = env.romaji.feed(self.buffer.pending(), c);
        out.push_str(&env.render(&step.emitted));
        self.buffer.set_pending(step.pending);
        true
    }

    /// Commit whatever the romaji tail resolves to.
    fn flush_direct(&mut self, env: &Env<'_>, out: &mut String) {
        self.buffer.flush_pending(&env.romaji);
        out.push_str(&env.render(&self.buffer.text()));
        self.buffer.clear();
    }
}

fn handle_latin(env: &mut Env<'_>, event: &KeyEvent, out: &mut String) -> bool {
    if env.is(Command::HiraganaMode, event) {
        *env.input_mode = InputMode::Hiragana;
        debug!("hiragana input mode");
        return true;
    }
    let Some(c) = event.printable() else {
        return false;
    };
    match *env.input_mode {
        InputMode::Zenkaku => out.push(ascii_to_zenkaku(c)),
        _ => out.push(c),
    }
    true
}
