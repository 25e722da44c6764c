//! pixel-core: domain model + refresh loop for pixel-details.
//!
//! Design goal: keep this crate UI-agnostic and platform-agnostic.
//! Platform specific I/O (screen capture, clipboard, native window, key hooks)
//! lives in `pixel-platform` and plugs in through the traits exported here.

mod color;
mod config;
mod copy;
mod display;
mod error;
mod field;
mod geometry;
mod layout;
mod refresh;

pub use color::Color;
pub use config::{accept, Configuration, FieldVisibility};
pub use copy::{
    line_separator, ChordKey, ClipboardPublisher, ClipboardSink, CopyChord, CopyRequest,
};
pub use display::{
    DisplayField, DisplayWindow, SurfaceEvent, SurfaceOptions, WindowState, WindowSurface,
};
pub use error::{
    ClipboardError, ConfigRejected, DisplayError, RefreshError, SamplerError, SamplerResult,
};
pub use field::{
    format_coordinates, format_hex, format_hsv, format_rgb, FieldEntry, FieldKind,
    FieldRegistry, RenderFn, Rendering,
};
pub use geometry::{place_near_cursor, CURSOR_BUFFER};
pub use layout::{Frame, FrameRow, Layout, Rect, GLYPH_SIZE};
pub use refresh::{ColorSampler, LoopReport, RefreshLoop};

use serde::{Deserialize, Serialize};

/// A point in screen coordinates (pixels, origin at the top-left).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// One snapshot of the pointer position and the pixel color beneath it.
///
/// Taken fresh every loop iteration and discarded once rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub position: Point,
    pub color: Color,
}

impl Sample {
    pub fn new(position: Point, color: Color) -> Self {
        Self { position, color }
    }
}
