//! Common error types for pixel-platform.

use pixel_core::{ClipboardError, DisplayError, SamplerError};
use thiserror::Error;

/// Platform-level errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("screen capture unavailable: {0}")]
    CaptureUnavailable(String),
    #[error("failed to read pixel at ({x}, {y})")]
    PixelRead { x: i32, y: i32 },
    #[error("window error: {0}")]
    Window(String),
    #[error("clipboard error: {0}")]
    Clipboard(String),
    #[error("input hook error: {0}")]
    Hook(String),
}

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;

impl From<PlatformError> for SamplerError {
    fn from(error: PlatformError) -> Self {
        match error {
            PlatformError::PixelRead { x, y } => SamplerError::ReadFailed { x, y },
            PlatformError::CaptureUnavailable(reason) => SamplerError::CaptureUnavailable(reason),
            other => SamplerError::CaptureUnavailable(other.to_string()),
        }
    }
}

impl From<PlatformError> for DisplayError {
    fn from(error: PlatformError) -> Self {
        match error {
            PlatformError::Window(reason) => DisplayError::Surface(reason),
            other => DisplayError::Surface(other.to_string()),
        }
    }
}

impl From<PlatformError> for ClipboardError {
    fn from(error: PlatformError) -> Self {
        match error {
            PlatformError::Clipboard(reason) => ClipboardError::Write(reason),
            other => ClipboardError::Write(other.to_string()),
        }
    }
}
