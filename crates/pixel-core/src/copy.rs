//! Copy-to-clipboard: the shared request flag, shortcut chord tracking and the publisher.

use crate::{ClipboardError, DisplayField};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Edge-triggered copy request shared between key observers and the loop.
///
/// Observers call [`raise`](Self::raise) from any thread; the loop consumes the
/// request with [`take`](Self::take), an atomic test-and-clear.
#[derive(Debug, Clone, Default)]
pub struct CopyRequest {
    raised: Arc<AtomicBool>,
}

impl CopyRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    /// Returns whether a request was pending, clearing it.
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::SeqCst)
    }
}

/// Keys relevant to the Ctrl+C chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordKey {
    Control,
    C,
    Other,
}

/// Tracks Control and C across press/release events from a global hook.
///
/// Fires once when the chord completes; holding the keys (auto-repeat) does
/// not fire again until one of them is released.
#[derive(Debug, Clone, Default)]
pub struct CopyChord {
    control: bool,
    c: bool,
    fired: bool,
}

impl CopyChord {
    /// Returns true when this press completes the chord.
    pub fn press(&mut self, key: ChordKey) -> bool {
        match key {
            ChordKey::Control => self.control = true,
            ChordKey::C => self.c = true,
            ChordKey::Other => return false,
        }
        if self.control && self.c && !self.fired {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn release(&mut self, key: ChordKey) {
        match key {
            ChordKey::Control => self.control = false,
            ChordKey::C => self.c = false,
            ChordKey::Other => return,
        }
        self.fired = false;
    }
}

/// Plain-text clipboard target.
pub trait ClipboardSink {
    /// Replace the clipboard contents.
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Line separator used between copied fields.
pub fn line_separator() -> &'static str {
    if cfg!(windows) {
        "\r\n"
    } else {
        "\n"
    }
}

/// Writes the displayed values to the clipboard when a copy was requested.
#[derive(Debug, Clone)]
pub struct ClipboardPublisher {
    request: CopyRequest,
    include_labels: bool,
}

impl ClipboardPublisher {
    pub fn new(request: CopyRequest, include_labels: bool) -> Self {
        Self {
            request,
            include_labels,
        }
    }

    /// One line per non-empty field, in display order.
    pub fn compose(fields: &[DisplayField], include_labels: bool) -> String {
        let separator = line_separator();
        let mut block = String::new();
        for field in fields.iter().filter(|f| !f.text.is_empty()) {
            if include_labels {
                block.push_str(field.label);
            }
            block.push_str(&field.text);
            block.push_str(separator);
        }
        block
    }

    /// Consume a pending request and publish. Returns whether anything was written.
    ///
    /// The request is cleared even when the write fails.
    pub fn publish_if_requested<C: ClipboardSink>(
        &self,
        fields: &[DisplayField],
        clipboard: &mut C,
    ) -> Result<bool, ClipboardError> {
        if !self.request.take() {
            return Ok(false);
        }

        let block = Self::compose(fields, self.include_labels);
        if block.is_empty() {
            debug!("Copy requested with no text fields; clipboard left untouched");
            return Ok(false);
        }

        clipboard.set_text(&block)?;
        info!(bytes = block.len(), labels = self.include_labels, "Copied to clipboard");
        Ok(true)
    }
}
