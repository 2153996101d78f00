/// Committed text waiting for the host.
///
/// The engine appends; the host drains with `poll`. Each poll returns exactly
/// what was appended since the previous one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutputQueue {
    text: String,
}

impl OutputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn poll(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    /// Queued text without draining it.
    pub fn peek(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
