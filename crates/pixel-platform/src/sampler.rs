//! Screen-backed [`ColorSampler`].

use crate::{read_pixel, PlatformError, PlatformResult};
use enigo::{Enigo, Mouse, Settings};
use pixel_core::{ColorSampler, Point, Sample, SamplerError, SamplerResult};
use tracing::{debug, info};

/// Reads the real cursor position and the pixel beneath it.
pub struct ScreenSampler {
    enigo: Enigo,
    last_position: Point,
}

impl ScreenSampler {
    /// Connect to the screen and take one startup sample.
    ///
    /// Fails with [`PlatformError::CaptureUnavailable`] when the cursor or the
    /// screen cannot be read at all, or when screen recording is not permitted.
    pub fn new() -> PlatformResult<Self> {
        #[cfg(target_os = "macos")]
        crate::pixel::ensure_capture_access()?;

        let enigo = Enigo::new(&Settings::default()).map_err(|e| {
            PlatformError::CaptureUnavailable(format!("failed to connect to input system: {e}"))
        })?;

        let mut sampler = Self {
            enigo,
            last_position: Point::default(),
        };

        let first = sampler.read().map_err(|e| match e {
            PlatformError::PixelRead { x, y } => {
                PlatformError::CaptureUnavailable(format!("startup read at ({x}, {y}) failed"))
            }
            other => other,
        })?;
        info!(x = first.position.x, y = first.position.y, color = %first.color, "Screen sampler ready");

        Ok(sampler)
    }

    fn read(&mut self) -> PlatformResult<Sample> {
        let (x, y) = self.enigo.location().map_err(|e| {
            debug!("Cursor location failed: {}", e);
            PlatformError::PixelRead {
                x: self.last_position.x,
                y: self.last_position.y,
            }
        })?;
        self.last_position = Point::new(x, y);

        let color = read_pixel(x, y)?;
        Ok(Sample::new(self.last_position, color))
    }
}

impl ColorSampler for ScreenSampler {
    fn sample(&mut self) -> SamplerResult<Sample> {
        self.read().map_err(SamplerError::from)
    }
}
