use skk_core::dict::{Candidate, DictEntry, DictError};
use skk_core::settings::Command;
use skk_core::KeyEvent;
use tracing::{debug, warn};

use crate::machine::{Env, Machine, Registration, State};

impl Machine {
    pub(crate) fn handle_registering(&mut self, env: &mut Env<'_>, event: &KeyEvent, out: &mut String) -> bool {
        let State::Registering(reg) = &mut self.state else {
            return false;
        };
        let reg: &mut Registration = reg;

        // Keys the nested machine has no use for while idle act on the
        // registration itself.
        if matches!(reg.inner.state, State::Direct) {
            let switching_back =
                env.input_mode.is_latin() && env.is(Command::HiraganaMode, event);
            if env.is(Command::Commit, event) && !switching_back {
                reg.inner.buffer.flush_pending(&env.romaji);
                reg.text.push_str(&env.render(&reg.inner.buffer.text()));
                reg.inner.buffer.clear();
                self.confirm_registration(env, out);
                return true;
            }
            if env.is(Command::Delete, event) && reg.inner.buffer.pending().is_empty() {
                reg.text.pop();
                return true;
            }
        }

        let mut nested = env.nested();
        reg.inner.handle(&mut nested, event, &mut reg.text)
    }

    fn confirm_registration(&mut self, env: &Env<'_>, out: &mut String) {
        let State::Registering(reg) = std::mem::take(&mut self.state) else {
            return;
        };
        let Registration {
            key, origin, text, ..
        } = *reg;

        if text.is_empty() {
            debug!(yomi = key.yomi(), "empty registration, back to editing");
            self.resume_editing(&key, origin);
            return;
        }

        let reading = key.dict_key();
        match env.dict.register(&reading, DictEntry::new(text.clone())) {
            Ok(new) => debug!(reading = %reading, surface = %text, new, "registered"),
            Err(DictError::NoWritableDictionary) => {
                warn!(reading = %reading, surface = %text, "no writable dictionary, word not saved")
            }
            Err(e) => warn!(error = %e, reading = %reading, "registration failed"),
        }

        out.push_str(&Candidate::new(key, DictEntry::new(text)).output());
        self.buffer.clear();
    }
}
