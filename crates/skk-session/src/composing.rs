use skk_core::dict::CompositeKey;
use skk_core::settings::Command;
use skk_core::KeyEvent;
use tracing::debug;

use crate::machine::{Env, Machine, Origin, State};

impl Machine {
    pub(crate) fn handle_composing(&mut self, env: &mut Env<'_>, event: &KeyEvent, out: &mut String) -> bool {
        if env.is(Command::Convert, event) {
            self.convert_composition(env);
            return true;
        }
        if env.is(Command::Commit, event) {
            self.commit_composition(env, out, false);
            return true;
        }
        if env.is(Command::Delete, event) {
            self.buffer.pop();
            if self.buffer.is_empty() {
                self.transition(State::Direct);
            }
            return true;
        }
        if env.is(Command::Complete, event) {
            self.complete_composition(env);
            return true;
        }
        if env.is(Command::ToggleKatakana, event) {
            self.commit_composition(env, out, true);
            return true;
        }
        if env.is(Command::BeginComposition, event) {
            // Already composing.
            return true;
        }

        let Some(c) = event.printable() else {
            return false;
        };

        let len = self.buffer.text().chars().count();
        if len >= env.settings.limits.max_composition_length {
            debug!(len, "composition overflow, committing as kana");
            self.commit_composition(env, out, false);
            return self.handle_direct(env, event, out);
        }

        let stem_len = self.buffer.kana().len();
        self.feed_composing(env, c);

        if self.buffer.okuri_complete() {
            let key = self.buffer.key();
            self.start_conversion(env, key, Origin::Kana);
        } else if self.buffer.kana().len() > stem_len && !self.buffer.has_okuri() {
            self.auto_start_conversion(env);
        }
        true
    }

    fn feed_composing(&mut self, env: &Env<'_>, c: char) {
        let starts_okuri =
            c.is_ascii_uppercase() && !self.buffer.has_okuri() && !self.buffer.kana().is_empty();

        if starts_okuri {
            // Whatever the old tail resolves to stays on the stem; the
            // uppercase key opens the okurigana.
            let (head, step) = env.romaji.feed_split(self.buffer.pending(), c);
            self.buffer.append_stem(&head);
            self.buffer.begin_okuri();
            self.buffer.append(&step.emitted);
            self.buffer.set_pending(step.pending);
            return;
        }

        let step = env.romaji.feed(self.buffer.pending(), c);
        self.buffer.append(&step.emitted);
        self.buffer.set_pending(step.pending);
    }

    /// A stem that now ends with an auto-start keyword converts what comes
    /// before the keyword and keeps the keyword as a suffix.
    fn auto_start_conversion(&mut self, env: &mut Env<'_>) {
        let settings = env.settings;
        let kana = self.buffer.kana();
        let Some(keyword) = settings.conversion.auto_start_suffix(kana) else {
            return;
        };
        let yomi = &kana[..kana.len() - keyword.len()];
        // Dead romaji letters left in the stem are not a reading.
        if yomi.is_empty() || yomi.chars().any(|c| c.is_ascii_alphabetic()) {
            return;
        }
        debug!(yomi, keyword, "auto-start conversion");
        let key = CompositeKey::plain(yomi).with_suffix(keyword);
        self.start_conversion(env, key, Origin::Kana);
    }

    fn convert_composition(&mut self, env: &mut Env<'_>) {
        self.buffer.flush_pending(&env.romaji);
        if self.buffer.kana().is_empty() {
            self.buffer.clear();
            self.transition(State::Direct);
            return;
        }
        let key = self.buffer.key();
        self.start_conversion(env, key, Origin::Kana);
    }

    /// Completion works on the stem alone; with okurigana typed it does
    /// nothing.
    fn complete_composition(&mut self, env: &Env<'_>) {
        if self.buffer.has_okuri() {
            return;
        }
        self.buffer.flush_pending(&env.romaji);
        let key = CompositeKey::plain(self.buffer.kana());
        self.start_completion(env, key, Origin::Kana);
    }

    /// Commit the buffer as kana. `flipped` commits it in the opposite form
    /// to the input mode (hiragana ↔ katakana).
    pub(crate) fn commit_composition(&mut self, env: &Env<'_>, out: &mut String, flipped: bool) {
        self.buffer.flush_pending(&env.romaji);
        let text = self.buffer.text();
        let rendered = if flipped {
            env.render_flipped(&text)
        } else {
            env.render(&text)
        };
        out.push_str(&rendered);
        self.buffer.clear();
        self.transition(State::Direct);
    }
}
