//! Native display surface.
//!
//! A `winit` window painted through a `softbuffer` framebuffer. The event
//! loop is pumped (never run), so the refresh loop keeps control of the main
//! thread and drains window events once per iteration.

mod raster;

use crate::PlatformError;
use pixel_core::{DisplayError, Frame, Point, Size, SurfaceEvent, SurfaceOptions, WindowSurface};
use raster::{paint, Canvas};
use softbuffer::{Context, Surface};
use std::fmt::Display;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, warn};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, ModifiersState};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowBuilder, WindowLevel};

/// Always-on-top native window implementing [`WindowSurface`].
pub struct NativeSurface {
    event_loop: EventLoop<()>,
    window: Rc<Window>,
    surface: Surface<Rc<Window>, Rc<Window>>,
    modifiers: ModifiersState,
}

fn window_error(e: impl Display) -> PlatformError {
    PlatformError::Window(e.to_string())
}

impl NativeSurface {
    /// Create the event loop and the window. Must run on the main thread.
    pub fn open(options: SurfaceOptions) -> Result<Self, DisplayError> {
        let event_loop = EventLoop::new().map_err(window_error)?;

        let level = if options.always_on_top {
            WindowLevel::AlwaysOnTop
        } else {
            WindowLevel::Normal
        };
        let window = WindowBuilder::new()
            .with_title(options.title)
            .with_inner_size(physical_size(options.size))
            .with_decorations(options.decorated)
            .with_resizable(false)
            .with_window_level(level)
            .build(&event_loop)
            .map_err(window_error)?;
        let window = Rc::new(window);

        let context = Context::new(window.clone()).map_err(window_error)?;
        let surface = Surface::new(&context, window.clone()).map_err(window_error)?;

        debug!(
            width = options.size.width,
            height = options.size.height,
            decorated = options.decorated,
            "Native window created"
        );

        Ok(Self {
            event_loop,
            window,
            surface,
            modifiers: ModifiersState::empty(),
        })
    }
}

impl WindowSurface for NativeSurface {
    fn present(&mut self, frame: &Frame<'_>) -> Result<(), DisplayError> {
        let inner = self.window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(inner.width), NonZeroU32::new(inner.height))
        else {
            // Minimized.
            return Ok(());
        };

        self.surface.resize(width, height).map_err(window_error)?;
        let mut buffer = self.surface.buffer_mut().map_err(window_error)?;
        let mut canvas = Canvas::new(&mut buffer[..], width.get(), height.get());
        paint(&mut canvas, frame);
        buffer.present().map_err(window_error)?;
        Ok(())
    }

    fn resize(&mut self, size: Size) -> Result<(), DisplayError> {
        // None means the resize is applied asynchronously; present() follows inner_size().
        let _ = self.window.request_inner_size(physical_size(size));
        Ok(())
    }

    fn move_to(&mut self, position: Point) {
        self.window
            .set_outer_position(PhysicalPosition::new(position.x, position.y));
    }

    fn screen_size(&self) -> Size {
        match self
            .window
            .current_monitor()
            .or_else(|| self.window.primary_monitor())
        {
            Some(monitor) => {
                let size = monitor.size();
                Size::new(size.width as i32, size.height as i32)
            }
            None => {
                warn!("No monitor reported; placement will not flip");
                Size::new(i32::MAX, i32::MAX)
            }
        }
    }

    fn poll_events(&mut self) -> Vec<SurfaceEvent> {
        let mut events = Vec::new();
        let window_id = self.window.id();
        let modifiers = &mut self.modifiers;

        let status = self
            .event_loop
            .pump_events(Some(Duration::ZERO), |event, _target| {
                let Event::WindowEvent { window_id: id, event } = event else {
                    return;
                };
                if id != window_id {
                    return;
                }
                match event {
                    WindowEvent::CloseRequested => events.push(SurfaceEvent::CloseRequested),
                    WindowEvent::ModifiersChanged(state) => *modifiers = state.state(),
                    WindowEvent::KeyboardInput { event, .. }
                        if event.state == ElementState::Pressed && !event.repeat =>
                    {
                        let text = match &event.logical_key {
                            Key::Character(text) => Some(text.as_str()),
                            _ => None,
                        };
                        if is_copy_shortcut(*modifiers, text) {
                            events.push(SurfaceEvent::CopyRequested);
                        }
                    }
                    _ => {}
                }
            });

        if let PumpStatus::Exit(code) = status {
            debug!(code, "Event loop exited");
            events.push(SurfaceEvent::CloseRequested);
        }
        events
    }

    fn hide(&mut self) {
        self.window.set_visible(false);
    }
}

fn physical_size(size: Size) -> PhysicalSize<u32> {
    PhysicalSize::new(size.width.max(1) as u32, size.height.max(1) as u32)
}

/// Ctrl+C, or Cmd+C on macOS.
fn is_copy_shortcut(modifiers: ModifiersState, key: Option<&str>) -> bool {
    let held = if cfg!(target_os = "macos") {
        modifiers.super_key()
    } else {
        modifiers.control_key()
    };
    held && key.is_some_and(|k| k.eq_ignore_ascii_case("c"))
}
