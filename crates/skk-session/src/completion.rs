use skk_core::settings::Command;
use skk_core::KeyEvent;
use tracing::debug;

use crate::machine::{Env, Machine, State};
use crate::types::cyclic_index;

impl Machine {
    /// Stepping through words whose reading starts with what was typed.
    /// Keys mirror candidate selection, with the completion keys stepping.
    pub(crate) fn handle_completing(&mut self, env: &mut Env<'_>, event: &KeyEvent, out: &mut String) -> bool {
        let State::Completing(sel) = &mut self.state else {
            return false;
        };

        if env.is(Command::Complete, event) {
            sel.index = cyclic_index(sel.index, 1, sel.candidates.len());
            return true;
        }
        if env.is(Command::PreviousCompletion, event) {
            sel.index = cyclic_index(sel.index, -1, sel.candidates.len());
            return true;
        }
        if env.is(Command::Convert, event) {
            // Convert the completed reading as if it had been typed out.
            let key = sel.current().key.clone();
            let origin = sel.origin;
            debug!(yomi = key.yomi(), "convert completed reading");
            self.start_conversion(env, key, origin);
            return true;
        }
        if env.is(Command::Delete, event) {
            let (key, origin) = (sel.key.clone(), sel.origin);
            self.resume_editing(&key, origin);
            return true;
        }
        if env.is(Command::PurgeCandidate, event) {
            self.purge_selected(env);
            return true;
        }
        if env.is(Command::Commit, event) {
            self.commit_selected(env, out);
            return true;
        }
        if event.printable().is_some() {
            self.commit_selected(env, out);
            self.handle_direct(env, event, out);
            return true;
        }
        false
    }
}
