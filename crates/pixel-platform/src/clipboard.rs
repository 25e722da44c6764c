//! System clipboard via `arboard`.

use crate::PlatformError;
use arboard::Clipboard;
use pixel_core::{ClipboardError, ClipboardSink};
use tracing::debug;

/// Clipboard sink backed by the OS clipboard.
///
/// The connection is opened on first use and kept for the life of the sink:
/// on X11 the copied text is only served while the owner is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn connection(&mut self) -> Result<&mut Clipboard, PlatformError> {
        if self.inner.is_none() {
            debug!("Opening clipboard connection");
            let clipboard =
                Clipboard::new().map_err(|e| PlatformError::Clipboard(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| PlatformError::Clipboard("clipboard not connected".into()))
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let result = self
            .connection()?
            .set_text(text)
            .map_err(|e| PlatformError::Clipboard(e.to_string()));

        if result.is_err() {
            // A broken connection is reopened on the next copy.
            self.inner = None;
        }
        Ok(result?)
    }
}
