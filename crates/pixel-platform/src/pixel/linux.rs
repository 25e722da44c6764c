//! X11 pixel reads through a `scrap` frame capture.
//!
//! The capturer holds shared memory with the X server and is not `Send`, so
//! one is opened lazily per thread and dropped again after a failed frame.

use super::color_in_frame;
use crate::{PlatformError, PlatformResult};
use pixel_core::Color;
use scrap::{Capturer, Display};
use std::cell::RefCell;
use std::io::ErrorKind;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Frame reads attempted while the capturer reports no frame ready.
const FRAME_ATTEMPTS: u32 = 50;
const FRAME_RETRY_DELAY: Duration = Duration::from_millis(2);

thread_local! {
    static CAPTURER: RefCell<Option<Capturer>> = const { RefCell::new(None) };
}

fn open_capturer() -> PlatformResult<Capturer> {
    let display = Display::primary()
        .map_err(|e| PlatformError::CaptureUnavailable(format!("no X11 display: {e}")))?;
    let capturer = Capturer::new(display)
        .map_err(|e| PlatformError::CaptureUnavailable(format!("cannot capture display: {e}")))?;
    debug!(width = capturer.width(), height = capturer.height(), "X11 capturer opened");
    Ok(capturer)
}

pub fn read_pixel(x: i32, y: i32) -> PlatformResult<Color> {
    CAPTURER.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(open_capturer()?);
        }
        let result = match slot.as_mut() {
            Some(capturer) => read_frame_pixel(capturer, x, y),
            None => Err(PlatformError::PixelRead { x, y }),
        };
        if matches!(result, Err(PlatformError::CaptureUnavailable(_))) {
            // Reconnect on the next read.
            *slot = None;
        }
        result
    })
}

fn read_frame_pixel(capturer: &mut Capturer, x: i32, y: i32) -> PlatformResult<Color> {
    let (width, height) = (capturer.width(), capturer.height());
    let (Ok(column), Ok(row)) = (usize::try_from(x), usize::try_from(y)) else {
        return Err(PlatformError::PixelRead { x, y });
    };
    if column >= width || row >= height {
        return Err(PlatformError::PixelRead { x, y });
    }

    for _ in 0..FRAME_ATTEMPTS {
        match capturer.frame() {
            Ok(frame) => {
                return color_in_frame(&frame, height, column, row)
                    .ok_or(PlatformError::PixelRead { x, y });
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => thread::sleep(FRAME_RETRY_DELAY),
            Err(e) => {
                debug!("X11 frame capture failed: {}", e);
                return Err(PlatformError::CaptureUnavailable(format!("frame capture failed: {e}")));
            }
        }
    }

    debug!(x, y, "No X11 frame became ready");
    Err(PlatformError::PixelRead { x, y })
}
