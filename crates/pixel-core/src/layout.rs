//! Pixel layout of the display window content.
//!
//! Text is drawn with a fixed-width 8x8 bitmap font, so the natural size of
//! the window follows directly from the longest row.

use crate::{Color, DisplayField, Point, Size};

/// Side of one glyph cell in font pixels.
pub const GLYPH_SIZE: i32 = 8;

const MIN_CONTENT_CHARS: i32 = 8;

/// Axis-aligned rectangle in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Metrics for laying out rows and the swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Font pixel to screen pixel ratio.
    pub scale: i32,
    /// Horizontal space between the border and the text.
    pub padding: i32,
    /// Vertical space shared between consecutive rows.
    pub row_spacing: i32,
    /// Frame border thickness (0 for none).
    pub border: i32,
}

impl Layout {
    /// Metrics used by the display. Undecorated (dynamic) windows get a border.
    pub fn standard(dynamic: bool) -> Self {
        Self {
            scale: 2,
            padding: 8,
            row_spacing: 8,
            border: if dynamic { 2 } else { 0 },
        }
    }

    pub fn char_width(&self) -> i32 {
        GLYPH_SIZE * self.scale
    }

    pub fn row_height(&self) -> i32 {
        GLYPH_SIZE * self.scale + self.row_spacing
    }

    /// Smallest size that fits `row_chars` text rows plus an optional swatch band.
    pub fn natural_size(&self, row_chars: &[usize], swatch: bool) -> Size {
        let widest = row_chars.iter().copied().max().unwrap_or(0) as i32;
        let content_chars = widest.max(MIN_CONTENT_CHARS);
        let bands = row_chars.len() as i32 + i32::from(swatch);

        Size::new(
            content_chars * self.char_width() + 2 * (self.padding + self.border),
            bands * self.row_height() + 2 * self.border,
        )
    }

    /// Place rows and swatch inside a window of `size`.
    pub fn frame<'a>(&self, size: Size, fields: &'a [DisplayField], swatch: Option<Color>) -> Frame<'a> {
        let half_spacing = self.row_spacing / 2;
        let rows = fields
            .iter()
            .enumerate()
            .map(|(i, field)| FrameRow {
                origin: Point::new(
                    self.border + self.padding,
                    self.border + i as i32 * self.row_height() + half_spacing,
                ),
                label: field.label,
                text: &field.text,
            })
            .collect();

        let swatch = swatch.map(|color| {
            let band_top = self.border + fields.len() as i32 * self.row_height();
            let rect = Rect {
                x: self.border + self.padding,
                y: band_top + half_spacing,
                width: (size.width - 2 * (self.border + self.padding)).max(0),
                height: GLYPH_SIZE * self.scale,
            };
            (rect, color)
        });

        Frame {
            size,
            scale: self.scale,
            background: FRAME_BACKGROUND,
            border: (self.border > 0).then_some((self.border, Color::BLACK)),
            label_color: LABEL_COLOR,
            text_color: Color::BLACK,
            rows,
            swatch,
        }
    }
}

const FRAME_BACKGROUND: Color = Color::new(238, 238, 238);
const LABEL_COLOR: Color = Color::new(40, 40, 90);

/// One text row: static label followed by the current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRow<'a> {
    pub origin: Point,
    pub label: &'a str,
    pub text: &'a str,
}

/// Everything a surface needs to paint one update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    pub size: Size,
    pub scale: i32,
    pub background: Color,
    pub border: Option<(i32, Color)>,
    pub label_color: Color,
    pub text_color: Color,
    pub rows: Vec<FrameRow<'a>>,
    pub swatch: Option<(Rect, Color)>,
}
