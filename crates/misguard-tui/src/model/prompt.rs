/// State for the backend configuration modal.
///
/// The buffer is a scratch copy; nothing is persisted until the user saves.
#[derive(Debug, Clone, Default)]
pub struct BackendPrompt {
    pub open: bool,
    pub buffer: String,
}

impl BackendPrompt {
    pub fn open_with(&mut self, current_url: &str) {
        self.open = true;
        self.buffer = current_url.to_string();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.buffer.clear();
    }

    /// The URL to save, or `None` if the buffer is blank.
    pub fn candidate(&self) -> Option<String> {
        let trimmed = self.buffer.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}
