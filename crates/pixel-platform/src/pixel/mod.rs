//! Pixel color reading at screen coordinates.
//!
//! Platform implementations:
//! - Windows: GDI `GetPixel`, falling back to a 1x1 `BitBlt` copy
//! - macOS: Core Graphics image of a 1x1 rect on the display under the point
//! - Linux: X11 frame capture via `scrap`
//! - Other: not supported, reported as capture unavailable

use crate::{PlatformError, PlatformResult};
use pixel_core::{Color, Point, Rect};

#[cfg(windows)]
mod windows;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
pub(crate) use macos::ensure_capture_access;

/// Read the color of the pixel at the given screen coordinates.
pub fn read_pixel(x: i32, y: i32) -> PlatformResult<Color> {
    #[cfg(windows)]
    {
        windows::read_pixel(x, y).ok_or(PlatformError::PixelRead { x, y })
    }
    #[cfg(target_os = "macos")]
    {
        macos::read_pixel(x, y).ok_or(PlatformError::PixelRead { x, y })
    }
    #[cfg(target_os = "linux")]
    {
        linux::read_pixel(x, y)
    }
    #[cfg(not(any(windows, target_os = "macos", target_os = "linux")))]
    {
        let _ = (x, y);
        Err(PlatformError::CaptureUnavailable(
            "pixel capture is not supported on this platform".into(),
        ))
    }
}

/// Convert a little-endian BGRA pixel (GDI DIB, Core Graphics and X11 layout).
#[cfg_attr(not(any(windows, target_os = "macos", target_os = "linux")), allow(dead_code))]
fn color_from_bgra(pixel: &[u8]) -> Option<Color> {
    match pixel {
        [b, g, r, _, ..] => Some(Color::new(*r, *g, *b)),
        _ => None,
    }
}

/// Color at `(x, y)` in a BGRA frame of `height` rows.
///
/// Rows may be padded, so the stride comes from the frame length.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn color_in_frame(frame: &[u8], height: usize, x: usize, y: usize) -> Option<Color> {
    if height == 0 {
        return None;
    }
    let stride = frame.len() / height;
    if (x + 1) * 4 > stride || y >= height {
        return None;
    }
    let index = y * stride + x * 4;
    color_from_bgra(frame.get(index..index + 4)?)
}

/// Find the display whose bounds contain `point` and translate the point
/// into that display's own coordinates.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn locate_on_display<T: Copy>(point: Point, displays: &[(T, Rect)]) -> Option<(T, Point)> {
    displays
        .iter()
        .find(|(_, bounds)| {
            point.x >= bounds.x
                && point.y >= bounds.y
                && point.x < bounds.x + bounds.width
                && point.y < bounds.y + bounds.height
        })
        .map(|(display, bounds)| (*display, Point::new(point.x - bounds.x, point.y - bounds.y)))
}

/// Convert a GDI `COLORREF` (0x00BBGGRR).
#[cfg_attr(not(windows), allow(dead_code))]
fn color_from_colorref(color: u32) -> Color {
    Color::new(
        (color & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        ((color >> 16) & 0xFF) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_bgra() {
        assert_eq!(color_from_bgra(&[0x10, 0x20, 0x30, 0xFF]), Some(Color::new(0x30, 0x20, 0x10)));
        assert_eq!(color_from_bgra(&[0x10, 0x20]), None);
    }

    #[test]
    fn test_color_from_colorref() {
        assert_eq!(color_from_colorref(0x00FF8000), Color::new(0x00, 0x80, 0xFF));
        assert_eq!(color_from_colorref(0x000000FF), Color::new(255, 0, 0));
    }

    #[test]
    fn test_color_in_frame_uses_padded_stride() {
        // 2x2 frame with 4 bytes of padding per row.
        let frame = [
            1, 2, 3, 0, 4, 5, 6, 0, 0, 0, 0, 0, //
            7, 8, 9, 0, 10, 11, 12, 0, 0, 0, 0, 0,
        ];
        assert_eq!(color_in_frame(&frame, 2, 0, 0), Some(Color::new(3, 2, 1)));
        assert_eq!(color_in_frame(&frame, 2, 1, 1), Some(Color::new(12, 11, 10)));
        assert_eq!(color_in_frame(&frame, 2, 0, 2), None);
        assert_eq!(color_in_frame(&frame, 0, 0, 0), None);
    }

    #[test]
    fn test_locate_on_secondary_display() {
        let displays = [
            (1u32, Rect { x: 0, y: 0, width: 1920, height: 1080 }),
            (2u32, Rect { x: 1920, y: -200, width: 2560, height: 1440 }),
        ];
        assert_eq!(
            locate_on_display(Point::new(10, 20), &displays),
            Some((1, Point::new(10, 20)))
        );
        assert_eq!(
            locate_on_display(Point::new(1930, -100), &displays),
            Some((2, Point::new(10, 100)))
        );
        assert_eq!(locate_on_display(Point::new(1919, 1079), &displays).map(|d| d.0), Some(1));
        assert_eq!(locate_on_display(Point::new(100, 1200), &displays), None);
    }

    #[cfg(not(any(windows, target_os = "macos", target_os = "linux")))]
    #[test]
    fn test_unsupported_platform_reports_capture_unavailable() {
        assert!(matches!(read_pixel(0, 0), Err(PlatformError::CaptureUnavailable(_))));
    }
}
