//! Refresh loop: sample, render, display, follow the cursor, publish copies.

use crate::{
    ClipboardPublisher, ClipboardSink, Configuration, DisplayWindow, FieldRegistry, RefreshError,
    Sample, SamplerResult, WindowSurface,
};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Source of fresh cursor/pixel samples (implemented by pixel-platform).
pub trait ColorSampler {
    /// Read the pointer position and the pixel beneath it. Never cached.
    fn sample(&mut self) -> SamplerResult<Sample>;
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopReport {
    pub iterations: u64,
    pub copies: u64,
}

/// Drives the display until its window is closed.
///
/// Runs on the thread that owns the window; nothing in here blocks except the
/// sampler, the surface and the clipboard write.
pub struct RefreshLoop<S, W, C> {
    config: Configuration,
    registry: FieldRegistry,
    sampler: S,
    window: DisplayWindow<W>,
    publisher: ClipboardPublisher,
    clipboard: C,
    pacing: Option<Duration>,
}

impl<S, W, C> RefreshLoop<S, W, C>
where
    S: ColorSampler,
    W: WindowSurface,
    C: ClipboardSink,
{
    pub fn new(
        config: Configuration,
        registry: FieldRegistry,
        sampler: S,
        window: DisplayWindow<W>,
        clipboard: C,
    ) -> Self {
        let publisher =
            ClipboardPublisher::new(window.copy_request().clone(), config.include_labels_on_copy);
        Self {
            config,
            registry,
            sampler,
            window,
            publisher,
            clipboard,
            pacing: None,
        }
    }

    /// Minimum time between iteration starts. Zero disables pacing.
    pub fn with_pacing(mut self, interval: Duration) -> Self {
        self.pacing = (!interval.is_zero()).then_some(interval);
        self
    }

    /// Run until the window reports closed.
    ///
    /// Termination is checked before each sample, so one iteration may still
    /// complete after the close event arrives.
    pub fn run(mut self) -> Result<LoopReport, RefreshError> {
        info!(pacing = ?self.pacing, "Refresh loop started");
        let mut report = LoopReport::default();

        while self.window.is_open() {
            let started = Instant::now();
            self.step(&mut report)?;

            if let Some(interval) = self.pacing {
                let elapsed = started.elapsed();
                if elapsed < interval {
                    thread::sleep(interval - elapsed);
                }
            }
        }

        info!(
            iterations = report.iterations,
            copies = report.copies,
            "Refresh loop finished"
        );
        Ok(report)
    }

    fn step(&mut self, report: &mut LoopReport) -> Result<(), RefreshError> {
        let sample = self.sampler.sample()?;

        let fields = &self.config.fields;
        let rendering = self.registry.render(&sample, |kind| fields.is_visible(kind));

        self.window.update(&rendering, sample.color)?;
        self.window.reposition(sample.position);

        match self
            .publisher
            .publish_if_requested(self.window.fields(), &mut self.clipboard)
        {
            Ok(true) => report.copies += 1,
            Ok(false) => {}
            Err(e) => warn!("Copy failed: {}", e),
        }

        report.iterations += 1;
        Ok(())
    }
}
