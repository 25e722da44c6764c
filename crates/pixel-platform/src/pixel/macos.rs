//! Core Graphics pixel reads.
//!
//! Display space is top-left origin, the same space enigo reports the cursor in.
//! Without the Screen Recording permission the image contains only the desktop,
//! so the permission is checked up front.

use super::{color_from_bgra, locate_on_display};
use crate::{PlatformError, PlatformResult};
use core_graphics::access::ScreenCaptureAccess;
use core_graphics::display::{CGDirectDisplayID, CGDisplay};
use core_graphics::geometry::{CGPoint, CGRect, CGSize};
use pixel_core::{Color, Point, Rect};
use tracing::debug;

/// Fail unless the process may record the screen. Asks once if not yet decided.
pub fn ensure_capture_access() -> PlatformResult<()> {
    let access = ScreenCaptureAccess::default();
    if access.preflight() || access.request() {
        Ok(())
    } else {
        Err(PlatformError::CaptureUnavailable(
            "Screen Recording permission is not granted".into(),
        ))
    }
}

fn display_bounds() -> Vec<(CGDirectDisplayID, Rect)> {
    let ids = match CGDisplay::active_displays() {
        Ok(ids) => ids,
        Err(code) => {
            debug!(code, "Listing displays failed");
            return Vec::new();
        }
    };
    ids.into_iter()
        .map(|id| {
            let bounds = CGDisplay::new(id).bounds();
            let rect = Rect {
                x: bounds.origin.x.round() as i32,
                y: bounds.origin.y.round() as i32,
                width: bounds.size.width.round() as i32,
                height: bounds.size.height.round() as i32,
            };
            (id, rect)
        })
        .collect()
}

pub fn read_pixel(x: i32, y: i32) -> Option<Color> {
    let (id, local) = locate_on_display(Point::new(x, y), &display_bounds())?;
    let rect = CGRect::new(
        &CGPoint::new(local.x as f64, local.y as f64),
        &CGSize::new(1.0, 1.0),
    );
    let image = CGDisplay::new(id).image_for_rect(rect)?;
    let data = image.data();
    color_from_bgra(data.bytes())
}
