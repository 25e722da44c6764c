//! Error types shared across the refresh pipeline.

use thiserror::Error;

/// Screen sampling errors.
#[derive(Debug, Error)]
pub enum SamplerError {
    /// No capture device or no permission to read the screen. Fatal at startup.
    #[error("screen capture unavailable: {0}")]
    CaptureUnavailable(String),
    /// A single cursor/pixel read failed after the sampler was up.
    #[error("failed to read pixel at ({x}, {y})")]
    ReadFailed { x: i32, y: i32 },
}

/// Result type for sampler operations.
pub type SamplerResult<T> = Result<T, SamplerError>;

/// Native window errors.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("display surface error: {0}")]
    Surface(String),
}

/// Clipboard write errors.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Reasons the loop refuses to start. Not an error from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigRejected {
    #[error("options dialog was dismissed")]
    Cancelled,
    #[error("no fields and no color swatch selected")]
    NothingToShow,
}

/// Errors that end the refresh loop.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error(transparent)]
    Sampler(#[from] SamplerError),
    #[error(transparent)]
    Display(#[from] DisplayError),
}
