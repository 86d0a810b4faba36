//! System clipboard seam.

use std::sync::Mutex;

#[derive(Debug, Clone, thiserror::Error)]
#[error("Clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// Somewhere text can be copied to.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Process-local clipboard for headless use.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last text written, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| ClipboardError("clipboard lock poisoned".into()))?;
        *contents = Some(text.to_string());
        Ok(())
    }
}
