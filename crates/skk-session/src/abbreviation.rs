use skk_core::dict::CompositeKey;
use skk_core::settings::Command;
use skk_core::KeyEvent;

use crate::machine::{Env, Machine, Origin, State};

impl Machine {
    /// ASCII yomi entry started by `/`. The buffer stem holds the letters
    /// verbatim; no romaji conversion happens here.
    pub(crate) fn handle_abbreviation(&mut self, env: &mut Env<'_>, event: &KeyEvent, out: &mut String) -> bool {
        if env.is(Command::Convert, event) {
            if !self.buffer.kana().is_empty() {
                let key = CompositeKey::plain(self.buffer.kana());
                self.start_conversion(env, key, Origin::Abbreviation);
            }
            return true;
        }
        if env.is(Command::Complete, event) {
            if !self.buffer.kana().is_empty() {
                let key = CompositeKey::plain(self.buffer.kana());
                self.start_completion(env, key, Origin::Abbreviation);
            }
            return true;
        }
        if env.is(Command::Commit, event) {
            out.push_str(self.buffer.kana());
            self.buffer.clear();
            self.transition(State::Direct);
            return true;
        }
        if env.is(Command::Delete, event) {
            self.buffer.pop();
            if self.buffer.is_empty() {
                self.transition(State::Direct);
            }
            return true;
        }

        match event.printable() {
            Some(c) => {
                self.buffer.append_stem(c.encode_utf8(&mut [0; 4]));
                true
            }
            None => false,
        }
    }
}
