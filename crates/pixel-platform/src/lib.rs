//! pixel-platform: platform-specific I/O boundary for pixel-details.
//!
//! This crate provides:
//! - Screen sampling (cursor position via `enigo`, pixel color via GDI / Core Graphics / `scrap`)
//! - A global Ctrl+C hook via `rdev` feeding the shared copy request
//! - Clipboard access via `arboard`
//! - The native display surface (`winit` window, `softbuffer` framebuffer, `font8x8` text)
//! - DPI awareness setup
//!
//! ## Module Structure
//!
//! - `error` - Common error types
//! - `dpi` - DPI awareness
//! - `pixel` - Pixel color reading
//! - `sampler` - `ColorSampler` over the real screen
//! - `hotkey` - Global copy chord listener
//! - `clipboard` - System clipboard sink
//! - `surface` - Native window surface and rasterizer

mod clipboard;
mod dpi;
mod error;
mod hotkey;
mod pixel;
mod sampler;
mod surface;

// Re-export error types
pub use error::{PlatformError, PlatformResult};

// Re-export DPI utilities
pub use dpi::set_dpi_aware;

// Re-export pixel reading
pub use pixel::read_pixel;

// Re-export sampler
pub use sampler::ScreenSampler;

// Re-export copy hook
pub use hotkey::{start_copy_hotkey, CopyHotkeyHandle};

// Re-export clipboard
pub use clipboard::SystemClipboard;

// Re-export display surface
pub use surface::NativeSurface;
