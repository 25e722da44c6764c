//! DPI awareness.
//!
//! On Windows the cursor position from enigo, the GDI pixel read and the
//! window placement must all agree on physical pixels. We set Per-Monitor V2
//! DPI awareness at process startup so none of them get scaled coordinates.

#[cfg(target_os = "windows")]
mod windows_dpi {
    use std::sync::Once;
    use tracing::{info, warn};

    static INIT: Once = Once::new();

    /// Set the process DPI awareness to Per-Monitor V2.
    ///
    /// Must be called before the sampler takes its first sample and before any window is created.
    pub fn set_dpi_aware() {
        INIT.call_once(|| unsafe {
            const DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2: isize = -4;

            #[link(name = "user32")]
            extern "system" {
                fn SetProcessDpiAwarenessContext(value: isize) -> i32;
            }

            if SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) != 0 {
                info!("Set Per-Monitor V2 DPI awareness");
            } else {
                warn!("Failed to set Per-Monitor V2 DPI awareness, sampled pixels may be offset");
            }
        });
    }
}

#[cfg(target_os = "windows")]
pub use windows_dpi::set_dpi_aware;

/// Set DPI awareness (no-op outside Windows).
#[cfg(not(target_os = "windows"))]
pub fn set_dpi_aware() {
    tracing::debug!("DPI awareness handled by the platform");
}
