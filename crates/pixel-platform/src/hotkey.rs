//! Global Ctrl+C listener.
//!
//! Raises the shared [`CopyRequest`] whenever the copy chord is pressed,
//! regardless of which application has focus. The window-level shortcut in
//! [`NativeSurface`](crate::NativeSurface) covers the focused case on every
//! platform; this hook adds the global one.
//!
//! Platform implementations:
//! - Windows/Linux: rdev listener thread
//! - macOS: not started (rdev must not run its event tap off the main thread
//!   next to the window's run loop)

use crate::{PlatformError, PlatformResult};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use pixel_core::{ChordKey, CopyChord, CopyRequest};
use std::thread::JoinHandle;
use std::time::Duration;

/// How long a fresh listener gets to fail before it counts as running.
///
/// `rdev::listen` blocks for as long as it is listening, so only failure is
/// ever reported back.
#[cfg_attr(target_os = "macos", allow(dead_code))]
const STARTUP_GRACE: Duration = Duration::from_millis(250);

/// Handle to the global copy listener.
pub struct CopyHotkeyHandle {
    stop_tx: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl CopyHotkeyHandle {
    /// Signal the listener to stop forwarding chords.
    pub fn stop(&self) {
        let _ = self.stop_tx.try_send(());
    }

    /// Check if the listener thread is still running.
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for CopyHotkeyHandle {
    fn drop(&mut self) {
        self.stop();
        // The rdev listener blocks forever and cannot be joined.
        let _ = self.thread.take();
    }
}

/// Map a hook key to the chord keys we track.
#[cfg_attr(target_os = "macos", allow(dead_code))]
fn chord_key(key: rdev::Key) -> ChordKey {
    match key {
        rdev::Key::ControlLeft | rdev::Key::ControlRight => ChordKey::Control,
        rdev::Key::KeyC => ChordKey::C,
        _ => ChordKey::Other,
    }
}

/// Feed one hook event into the chord; raises `request` when it completes.
#[cfg_attr(target_os = "macos", allow(dead_code))]
fn handle_event(chord: &mut CopyChord, request: &CopyRequest, event: &rdev::EventType) {
    match event {
        rdev::EventType::KeyPress(key) => {
            if chord.press(chord_key(*key)) {
                tracing::debug!("Global copy chord pressed");
                request.raise();
            }
        }
        rdev::EventType::KeyRelease(key) => chord.release(chord_key(*key)),
        _ => {}
    }
}

/// Wait for the listener thread to report a startup failure.
#[cfg_attr(target_os = "macos", allow(dead_code))]
fn await_startup(failures: &Receiver<String>, grace: Duration) -> PlatformResult<()> {
    match failures.recv_timeout(grace) {
        Ok(reason) => Err(PlatformError::Hook(reason)),
        Err(RecvTimeoutError::Timeout) => Ok(()),
        Err(RecvTimeoutError::Disconnected) => Err(PlatformError::Hook(
            "copy hotkey thread exited during startup".into(),
        )),
    }
}

/// Start listening for the global copy chord.
///
/// Returns an error when the hook cannot be installed, e.g. without access
/// to the input devices or on a Wayland session.
#[cfg(not(target_os = "macos"))]
pub fn start_copy_hotkey(request: CopyRequest) -> PlatformResult<CopyHotkeyHandle> {
    use tracing::{error, info};

    let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
    let (failure_tx, failure_rx) = crossbeam_channel::bounded::<String>(1);

    let thread = std::thread::Builder::new()
        .name("copy-hotkey".into())
        .spawn(move || {
            info!("Copy hotkey thread started (rdev)");
            let mut chord = CopyChord::default();
            let mut stopped = false;

            let callback = move |event: rdev::Event| {
                if stopped || stop_rx.try_recv().is_ok() {
                    stopped = true;
                    return;
                }
                handle_event(&mut chord, &request, &event.event_type);
            };

            if let Err(error) = rdev::listen(callback) {
                error!(?error, "Copy hotkey listener failed");
                let _ = failure_tx.send(format!("listener failed: {error:?}"));
            }
            info!("Copy hotkey thread exiting");
        })
        .map_err(|e| PlatformError::Hook(e.to_string()))?;

    await_startup(&failure_rx, STARTUP_GRACE)?;

    Ok(CopyHotkeyHandle {
        stop_tx,
        thread: Some(thread),
    })
}

/// Start listening for the global copy chord.
#[cfg(target_os = "macos")]
pub fn start_copy_hotkey(_request: CopyRequest) -> PlatformResult<CopyHotkeyHandle> {
    Err(PlatformError::Hook(
        "global copy hotkey is not supported on macOS, use Cmd+C in the window".into(),
    ))
}
