//! Software rasterizer for display frames.
//!
//! Pixels are `0x00RRGGBB`, row-major, as softbuffer expects.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use pixel_core::{Color, Frame, Point, Rect, GLYPH_SIZE};

/// Mutable view over a framebuffer.
pub struct Canvas<'a> {
    pixels: &'a mut [u32],
    width: i32,
    height: i32,
}

impl<'a> Canvas<'a> {
    /// `pixels` must hold at least `width * height` entries.
    pub fn new(pixels: &'a mut [u32], width: u32, height: u32) -> Self {
        let width = width as i32;
        let height = (height as i32).min(pixels.len() as i32 / width.max(1));
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn fill(&mut self, color: Color) {
        let value = color.to_xrgb();
        let len = (self.width * self.height).max(0) as usize;
        self.pixels[..len].fill(value);
    }

    /// Fill a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = (rect.x + rect.width).min(self.width);
        let y1 = (rect.y + rect.height).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let value = color.to_xrgb();
        for y in y0..y1 {
            let row = (y * self.width) as usize;
            self.pixels[row + x0 as usize..row + x1 as usize].fill(value);
        }
    }

    /// Frame the canvas edge with a band of `thickness` pixels.
    pub fn stroke_border(&mut self, thickness: i32, color: Color) {
        let (w, h) = (self.width, self.height);
        self.fill_rect(Rect { x: 0, y: 0, width: w, height: thickness }, color);
        self.fill_rect(Rect { x: 0, y: h - thickness, width: w, height: thickness }, color);
        self.fill_rect(Rect { x: 0, y: 0, width: thickness, height: h }, color);
        self.fill_rect(Rect { x: w - thickness, y: 0, width: thickness, height: h }, color);
    }

    /// Draw `text` with the 8x8 bitmap font. Returns the x just past the last glyph.
    pub fn draw_text(&mut self, origin: Point, text: &str, scale: i32, color: Color) -> i32 {
        let scale = scale.max(1);
        let advance = GLYPH_SIZE * scale;
        let mut x = origin.x;

        for ch in text.chars() {
            if let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) {
                for (row, &bits) in glyph.iter().enumerate() {
                    for col in 0..GLYPH_SIZE {
                        if (bits >> col) & 1 == 0 {
                            continue;
                        }
                        let cell = Rect {
                            x: x + col * scale,
                            y: origin.y + row as i32 * scale,
                            width: scale,
                            height: scale,
                        };
                        self.fill_rect(cell, color);
                    }
                }
            }
            x += advance;
        }
        x
    }

    #[cfg(test)]
    fn pixel(&self, x: i32, y: i32) -> u32 {
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Paint a whole frame: background, rows, swatch, border.
pub fn paint(canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
    canvas.fill(frame.background);

    for row in &frame.rows {
        let after_label = canvas.draw_text(row.origin, row.label, frame.scale, frame.label_color);
        canvas.draw_text(
            Point::new(after_label, row.origin.y),
            row.text,
            frame.scale,
            frame.text_color,
        );
    }

    if let Some((rect, color)) = frame.swatch {
        canvas.fill_rect(rect, color);
    }

    if let Some((thickness, color)) = frame.border {
        canvas.stroke_border(thickness, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_core::{DisplayField, FieldKind, Layout};

    const BG: Color = Color::WHITE;

    fn canvas_of(pixels: &mut Vec<u32>, width: u32, height: u32) -> Canvas<'_> {
        pixels.resize((width * height) as usize, 0);
        Canvas::new(pixels, width, height)
    }

    #[test]
    fn test_fill_rect_clips_to_canvas() {
        let mut pixels = Vec::new();
        let mut canvas = canvas_of(&mut pixels, 4, 4);
        canvas.fill(BG);
        canvas.fill_rect(Rect { x: 2, y: 2, width: 10, height: 10 }, Color::BLACK);

        assert_eq!(canvas.pixel(1, 1), BG.to_xrgb());
        assert_eq!(canvas.pixel(3, 3), 0);
        // Fully outside: no panic, no change.
        canvas.fill_rect(Rect { x: -10, y: -10, width: 5, height: 5 }, Color::BLACK);
        assert_eq!(canvas.pixel(0, 0), BG.to_xrgb());
    }

    #[test]
    fn test_border_leaves_interior() {
        let mut pixels = Vec::new();
        let mut canvas = canvas_of(&mut pixels, 10, 8);
        canvas.fill(BG);
        canvas.stroke_border(2, Color::BLACK);

        assert_eq!(canvas.pixel(0, 0), 0);
        assert_eq!(canvas.pixel(9, 7), 0);
        assert_eq!(canvas.pixel(1, 4), 0);
        assert_eq!(canvas.pixel(2, 2), BG.to_xrgb());
        assert_eq!(canvas.pixel(7, 5), BG.to_xrgb());
    }

    #[test]
    fn test_draw_text_advances_and_inks() {
        let mut pixels = Vec::new();
        let mut canvas = canvas_of(&mut pixels, 64, 16);
        canvas.fill(BG);
        let end = canvas.draw_text(Point::new(0, 0), "#A", 2, Color::BLACK);
        assert_eq!(end, 32);

        let inked = (0..16)
            .flat_map(|y| (0..32).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) == 0)
            .count();
        assert!(inked > 0);
        // Nothing past the advance.
        assert!((32..64).all(|x| (0..16).all(|y| canvas.pixel(x, y) == BG.to_xrgb())));
    }

    #[test]
    fn test_space_draws_nothing() {
        let mut pixels = Vec::new();
        let mut canvas = canvas_of(&mut pixels, 16, 8);
        canvas.fill(BG);
        assert_eq!(canvas.draw_text(Point::new(0, 0), "  ", 1, Color::BLACK), 16);
        assert!(pixels.iter().all(|p| *p == BG.to_xrgb()));
    }

    #[test]
    fn test_paint_frame_with_swatch_and_border() {
        let layout = Layout::standard(true);
        let mut fields = vec![DisplayField::new(FieldKind::Hex)];
        fields[0].text = "#FF0000".into();
        let size = layout.natural_size(&[13], true);
        let red = Color::new(255, 0, 0);
        let frame = layout.frame(size, &fields, Some(red));

        let mut pixels = Vec::new();
        let mut canvas = canvas_of(&mut pixels, size.width as u32, size.height as u32);
        paint(&mut canvas, &frame);

        let (rect, _) = frame.swatch.expect("swatch");
        assert_eq!(canvas.pixel(rect.x + rect.width / 2, rect.y + rect.height / 2), red.to_xrgb());
        assert_eq!(canvas.pixel(0, 0), 0);
        assert_eq!(canvas.pixel(size.width - 1, 3), 0);
        assert_eq!(canvas.pixel(3, 3), frame.background.to_xrgb());
    }

    #[test]
    fn test_short_buffer_does_not_panic() {
        let mut pixels = vec![0u32; 10];
        let mut canvas = Canvas::new(&mut pixels, 4, 4);
        canvas.fill(BG);
        canvas.stroke_border(1, Color::BLACK);
        canvas.draw_text(Point::new(0, 0), "X", 1, Color::BLACK);
    }
}
