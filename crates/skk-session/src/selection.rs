use skk_core::settings::Command;
use skk_core::KeyEvent;
use tracing::{debug, warn};

use crate::machine::{Env, Machine, State};
use crate::types::cyclic_index;

impl Machine {
    pub(crate) fn handle_selecting(&mut self, env: &mut Env<'_>, event: &KeyEvent, out: &mut String) -> bool {
        let State::Selecting(sel) = &mut self.state else {
            return false;
        };

        if env.is(Command::NextCandidate, event) {
            sel.index = cyclic_index(sel.index, 1, sel.candidates.len());
            return true;
        }
        if env.is(Command::PreviousCandidate, event) {
            sel.index = cyclic_index(sel.index, -1, sel.candidates.len());
            return true;
        }
        if env.is(Command::PurgeCandidate, event) {
            self.purge_selected(env);
            return true;
        }
        if env.is(Command::RegisterWord, event) {
            if env.can_register() {
                let (key, origin) = (sel.key.clone(), sel.origin);
                self.begin_registration(key, origin);
            }
            return true;
        }
        if env.is(Command::Delete, event) {
            let (key, origin) = (sel.key.clone(), sel.origin);
            self.resume_editing(&key, origin);
            return true;
        }
        if env.is(Command::Commit, event) {
            self.commit_selected(env, out);
            return true;
        }
        if event.printable().is_some() {
            // Any other printable key confirms, then starts the next segment.
            self.commit_selected(env, out);
            self.handle_direct(env, event, out);
            return true;
        }
        false
    }

    /// Commit the current candidate (of a selection or a completion) and
    /// move it to the front of the writable dictionary under the reading it
    /// was found by.
    pub(crate) fn commit_selected(&mut self, env: &Env<'_>, out: &mut String) {
        let (State::Selecting(sel) | State::Completing(sel)) = std::mem::take(&mut self.state) else {
            return;
        };
        let candidate = sel.current();
        out.push_str(&candidate.output());
        debug!(surface = candidate.surface(), index = sel.index, "commit candidate");

        if env.dict.writable().is_some() {
            if let Err(e) = env
                .dict
                .register(&candidate.key.dict_key(), candidate.entry.clone())
            {
                warn!(error = %e, "failed to record committed candidate");
            }
        }
        self.buffer.clear();
    }

    pub(crate) fn purge_selected(&mut self, env: &Env<'_>) {
        let (State::Selecting(sel) | State::Completing(sel)) = std::mem::take(&mut self.state) else {
            return;
        };
        let reading = sel.current().key.dict_key();
        let surface = sel.current().surface();
        match env.dict.purge(&reading, surface) {
            Ok(removed) => debug!(reading = %reading, surface, removed, "purged candidate"),
            Err(e) => warn!(error = %e, reading = %reading, surface, "purge failed"),
        }
        self.buffer.clear();
    }
}
