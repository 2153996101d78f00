use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use skk_core::dict::CompositeDictionary;
use skk_core::settings::Settings;
use skk_core::{KeyEvent, Modifiers};
use skk_session::{Context, InputMode, Mode};
use tracing::debug;

use super::{SkkCandidateList, SkkDictionary, SkkError};

/// Host handle to one input session.
///
/// Keys for one context are processed one at a time; the lock only makes
/// the handle safe to pass between host threads.
#[derive(Debug)]
pub struct SkkContext {
    session: Mutex<Context>,
}

impl SkkContext {
    /// New session over `dictionaries`, queried in the given order. The
    /// first writable one receives registrations.
    pub fn create(dictionaries: &[Arc<SkkDictionary>]) -> Arc<Self> {
        Self::from_context(Context::new(compose(dictionaries)))
    }

    pub fn create_with_settings(dictionaries: &[Arc<SkkDictionary>], settings: Settings) -> Arc<Self> {
        Self::from_context(Context::with_settings(compose(dictionaries), settings))
    }

    fn from_context(ctx: Context) -> Arc<Self> {
        debug!(layers = ctx.dictionary().len(), "context created");
        Arc::new(Self {
            session: Mutex::new(ctx),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Context> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn process_key_event(&self, event: KeyEvent) -> bool {
        self.lock().process_key_event(event)
    }

    /// Process a platform keysym. Codes that map to no key are left to the
    /// host.
    pub fn process_keysym(&self, keysym: u32, modifiers: u8) -> bool {
        match KeyEvent::from_keysym(keysym, Modifiers::from_bits_truncate(modifiers)) {
            Ok(event) => self.process_key_event(event),
            Err(e) => {
                debug!(error = %e, "key not handled");
                false
            }
        }
    }

    /// Process a key given in keymap notation (`"a"`, `"C-g"`, `"space"`).
    pub fn process_key(&self, notation: &str) -> Result<bool, SkkError> {
        let event: KeyEvent = notation.parse()?;
        Ok(self.process_key_event(event))
    }

    pub fn poll_output(&self) -> String {
        self.lock().poll_output()
    }

    pub fn preedit(&self) -> String {
        self.lock().preedit()
    }

    pub fn mode(&self) -> Mode {
        self.lock().mode()
    }

    pub fn input_mode(&self) -> InputMode {
        self.lock().input_mode()
    }

    pub fn set_input_mode(&self, mode: InputMode) {
        self.lock().set_input_mode(mode);
    }

    pub fn candidates(&self) -> Option<SkkCandidateList> {
        let ctx = self.lock();
        let sel = ctx.selection()?;
        Some(SkkCandidateList {
            surfaces: sel
                .candidates
                .iter()
                .map(|c| c.surface().to_string())
                .collect(),
            selected: sel.index as u32,
        })
    }

    /// Abandon the current composition. Committed text not yet polled is
    /// kept.
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Release the host's handle. Dictionaries attached only to this
    /// context are freed with it.
    pub fn destroy(self: Arc<Self>) {
        debug!("context destroyed");
    }
}

fn compose(dictionaries: &[Arc<SkkDictionary>]) -> CompositeDictionary {
    CompositeDictionary::new(dictionaries.iter().map(|d| d.source()).collect())
}
