//! Display window model: field rows, optional swatch, placement and open state.
//!
//! The native window itself sits behind [`WindowSurface`]; this module decides
//! what is drawn, how big the window is and where it goes.

use crate::{
    place_near_cursor, Color, Configuration, CopyRequest, DisplayError, FieldKind, FieldRegistry,
    Frame, Layout, Point, Rendering, Sample, Size,
};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

const WINDOW_TITLE: &str = "Pixel Details";

/// Static sizing factor applied to the natural width when not following the cursor.
const STATIC_WIDTH_FACTOR: f32 = 1.4;

/// Samples whose rendering is the widest each field can get in practice:
/// five-digit negative coordinates, three-digit channels and 100% HSV components.
fn widest_samples() -> [Sample; 2] {
    [
        Sample::new(Point::new(-99999, -99999), Color::WHITE),
        Sample::new(Point::default(), Color::new(255, 0, 1)),
    ]
}

/// One visible row: a static label and the current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayField {
    pub kind: FieldKind,
    pub label: &'static str,
    pub text: String,
}

impl DisplayField {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            label: kind.label(),
            text: String::new(),
        }
    }

    fn char_count(&self) -> usize {
        self.label.chars().count() + self.text.chars().count()
    }
}

/// Parameters for creating the native window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceOptions {
    pub title: String,
    pub size: Size,
    pub decorated: bool,
    pub always_on_top: bool,
}

/// Events delivered by the native window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The user asked to close the window.
    CloseRequested,
    /// The copy shortcut was pressed while the window had focus.
    CopyRequested,
}

/// Native window operations used by [`DisplayWindow`].
pub trait WindowSurface {
    /// Paint a frame.
    fn present(&mut self, frame: &Frame<'_>) -> Result<(), DisplayError>;
    /// Request a new content size.
    fn resize(&mut self, size: Size) -> Result<(), DisplayError>;
    /// Move the window's top-left corner.
    fn move_to(&mut self, position: Point);
    /// Size of the screen the window is on.
    fn screen_size(&self) -> Size;
    /// Drain pending window events without blocking.
    fn poll_events(&mut self) -> Vec<SurfaceEvent>;
    /// Take the window off screen after close.
    fn hide(&mut self) {}
}

/// Open/closed state. Closing is terminal.
#[derive(Debug)]
pub struct WindowState {
    open: AtomicBool,
}

impl WindowState {
    fn new() -> Self {
        Self {
            open: AtomicBool::new(true),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Returns true only for the call that performed the Open -> Closed transition.
    pub fn close(&self) -> bool {
        self.open.swap(false, Ordering::SeqCst)
    }
}

/// Small always-on-top window showing the current sample.
pub struct DisplayWindow<S> {
    surface: S,
    layout: Layout,
    fields: Vec<DisplayField>,
    swatch: Option<Color>,
    dynamic: bool,
    size: Size,
    position: Option<Point>,
    state: WindowState,
    copy_request: CopyRequest,
}

impl<S: WindowSurface> DisplayWindow<S> {
    /// Build rows for the visible fields in registry order and open the surface.
    ///
    /// The opener receives the computed window options. In static mode the
    /// window is widened once so value changes never move its edges, and is
    /// never narrower than the widest values its rows can show.
    pub fn construct<F>(
        config: &Configuration,
        registry: &FieldRegistry,
        copy_request: CopyRequest,
        open: F,
    ) -> Result<Self, DisplayError>
    where
        F: FnOnce(SurfaceOptions) -> Result<S, DisplayError>,
    {
        let dynamic = config.dynamic_placement;
        let layout = Layout::standard(dynamic);
        let fields: Vec<DisplayField> = registry
            .order()
            .into_iter()
            .filter(|kind| config.fields.is_visible(*kind))
            .map(DisplayField::new)
            .collect();
        let swatch = config.show_swatch.then_some(Color::BLACK);

        let measure_sample = |sample: &Sample| {
            let rendering = registry.render(sample, |kind| config.fields.is_visible(kind));
            measure(&layout, &fields, Some(&rendering), swatch.is_some())
        };
        let natural = measure_sample(&Sample::new(Point::default(), Color::BLACK));
        let size = if dynamic {
            natural
        } else {
            let widened = (natural.width as f32 * STATIC_WIDTH_FACTOR).round() as i32;
            let widest = widest_samples()
                .iter()
                .map(|sample| measure_sample(sample).width)
                .max()
                .unwrap_or(0);
            Size::new(widened.max(widest), natural.height)
        };

        let surface = open(SurfaceOptions {
            title: WINDOW_TITLE.to_string(),
            size,
            decorated: !dynamic,
            always_on_top: true,
        })?;

        info!(
            rows = fields.len(),
            swatch = swatch.is_some(),
            dynamic,
            width = size.width,
            height = size.height,
            "Display window opened"
        );

        Ok(Self {
            surface,
            layout,
            fields,
            swatch,
            dynamic,
            size,
            position: None,
            state: WindowState::new(),
            copy_request,
        })
    }

    /// Refresh rows and swatch, re-fit in dynamic mode, paint, then drain window events.
    pub fn update(&mut self, rendering: &Rendering, color: Color) -> Result<(), DisplayError> {
        if !self.is_open() {
            return Ok(());
        }

        for field in &mut self.fields {
            field.text.clear();
            if let Some(text) = rendering.get(field.kind) {
                field.text.push_str(text);
            }
        }
        if let Some(swatch) = self.swatch.as_mut() {
            *swatch = color;
        }

        // Text length drives the layout, so measure only after assignment.
        if self.dynamic {
            let natural = measure(&self.layout, &self.fields, None, self.swatch.is_some());
            if natural != self.size {
                debug!(width = natural.width, height = natural.height, "Re-fitting window");
                self.surface.resize(natural)?;
                self.size = natural;
            }
        }

        let frame = self.layout.frame(self.size, &self.fields, self.swatch);
        self.surface.present(&frame)?;

        self.process_events();
        Ok(())
    }

    /// Move next to the cursor, staying on screen. No-op unless following the cursor.
    ///
    /// Placement uses the size last requested by [`update`](Self::update); the
    /// undecorated window has no frame, and the platform may apply the resize late.
    pub fn reposition(&mut self, cursor: Point) {
        if !self.dynamic || !self.is_open() {
            return;
        }

        let target = place_near_cursor(cursor, self.size, self.surface.screen_size());
        if self.position != Some(target) {
            self.surface.move_to(target);
            self.position = Some(target);
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Transition to Closed and take the window off screen.
    pub fn close(&mut self) {
        if self.state.close() {
            info!("Display window closed");
            self.surface.hide();
        }
    }

    pub fn fields(&self) -> &[DisplayField] {
        &self.fields
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn copy_request(&self) -> &CopyRequest {
        &self.copy_request
    }

    fn process_events(&mut self) {
        for event in self.surface.poll_events() {
            match event {
                SurfaceEvent::CloseRequested => self.close(),
                SurfaceEvent::CopyRequested => {
                    debug!("Copy shortcut pressed in window");
                    self.copy_request.raise();
                }
            }
        }
    }
}

/// Natural size for the rows, measured either on their current text or on a
/// reference rendering.
fn measure(
    layout: &Layout,
    fields: &[DisplayField],
    reference: Option<&Rendering>,
    swatch: bool,
) -> Size {
    let row_chars: Vec<usize> = fields
        .iter()
        .map(|field| match reference {
            Some(rendering) => {
                field.label.chars().count()
                    + rendering.get(field.kind).map_or(0, |text| text.chars().count())
            }
            None => field.char_count(),
        })
        .collect();
    layout.natural_size(&row_chars, swatch)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::FieldVisibility;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Everything a fake surface observed.
    #[derive(Debug, Default)]
    pub(crate) struct SurfaceLog {
        pub options: Option<SurfaceOptions>,
        pub presented: Vec<(Size, Vec<String>, Option<Color>)>,
        pub resized: Vec<Size>,
        pub moved: Vec<Point>,
        pub hidden: bool,
        /// Events returned by the n-th `poll_events` call.
        pub scripted: Vec<(usize, SurfaceEvent)>,
        pub polls: usize,
    }

    /// Applies resizes only to the log, like a platform that resizes late.
    pub(crate) struct FakeSurface {
        pub log: Rc<RefCell<SurfaceLog>>,
        pub screen: Size,
    }

    impl WindowSurface for FakeSurface {
        fn present(&mut self, frame: &Frame<'_>) -> Result<(), DisplayError> {
            let rows = frame
                .rows
                .iter()
                .map(|row| format!("{}{}", row.label, row.text))
                .collect();
            self.log
                .borrow_mut()
                .presented
                .push((frame.size, rows, frame.swatch.map(|(_, c)| c)));
            Ok(())
        }

        fn resize(&mut self, size: Size) -> Result<(), DisplayError> {
            self.log.borrow_mut().resized.push(size);
            Ok(())
        }

        fn move_to(&mut self, position: Point) {
            self.log.borrow_mut().moved.push(position);
        }

        fn screen_size(&self) -> Size {
            self.screen
        }

        fn poll_events(&mut self) -> Vec<SurfaceEvent> {
            let mut log = self.log.borrow_mut();
            let poll = log.polls;
            log.polls += 1;
            log.scripted
                .iter()
                .filter(|(at, _)| *at == poll)
                .map(|(_, event)| *event)
                .collect()
        }

        fn hide(&mut self) {
            self.log.borrow_mut().hidden = true;
        }
    }

    pub(crate) fn open_fake(
        config: &Configuration,
        log: Rc<RefCell<SurfaceLog>>,
    ) -> DisplayWindow<FakeSurface> {
        DisplayWindow::construct(
            config,
            &FieldRegistry::standard(),
            CopyRequest::new(),
            |options| {
                log.borrow_mut().options = Some(options);
                Ok(FakeSurface {
                    log,
                    screen: Size::new(1920, 1080),
                })
            },
        )
        .expect("fake surface")
    }

    fn rendering_for(sample: Sample, config: &Configuration) -> Rendering {
        FieldRegistry::standard().render(&sample, |k| config.fields.is_visible(k))
    }

    #[test]
    fn test_construct_static_mode() {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        let config = Configuration {
            dynamic_placement: false,
            ..Configuration::default()
        };
        let window = open_fake(&config, log.clone());

        let options = log.borrow().options.clone().expect("options");
        assert!(options.decorated);
        assert!(options.always_on_top);
        let kinds: Vec<_> = window.fields().iter().map(|f| f.kind).collect();
        assert_eq!(kinds, FieldKind::ALL.to_vec());

        // Widest reference row is "HSV = (0%, 0%, 0%)": 18 chars.
        let natural = Layout::standard(false).natural_size(&[18], false).width;
        assert_eq!(options.size.width, (natural as f32 * 1.4).round() as i32);
        assert_eq!(options.size.height, 5 * 24);
    }

    #[test]
    fn test_static_window_fits_large_coordinates() {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        let config = Configuration {
            fields: FieldVisibility::none().with(FieldKind::Coordinates, true),
            show_swatch: false,
            dynamic_placement: false,
            ..Configuration::default()
        };
        let mut window = open_fake(&config, log.clone());
        let layout = Layout::standard(false);

        for position in [Point::new(1920, 1080), Point::new(-12345, -12345)] {
            let sample = Sample::new(position, Color::BLACK);
            window.update(&rendering_for(sample, &config), sample.color).expect("update");
            let needed = layout.natural_size(&[window.fields()[0].char_count()], false);
            assert!(window.size().width >= needed.width, "{position:?} is clipped");
        }
        // "X,Y = (-99999, -99999)" is 22 chars.
        assert_eq!(window.size().width, layout.natural_size(&[22], false).width);
        assert!(log.borrow().resized.is_empty());
    }

    #[test]
    fn test_static_window_fits_widest_hsv() {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        let config = Configuration {
            fields: FieldVisibility::none().with(FieldKind::Hsv, true),
            show_swatch: false,
            dynamic_placement: false,
            ..Configuration::default()
        };
        let window = open_fake(&config, log);
        // "HSV = (100%, 100%, 100%)" is 24 chars.
        let needed = Layout::standard(false).natural_size(&[24], false);
        assert!(window.size().width >= needed.width);
    }

    #[test]
    fn test_construct_skips_hidden_fields() {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        let config = Configuration {
            fields: FieldVisibility::none().with(FieldKind::Hex, true),
            show_swatch: false,
            ..Configuration::default()
        };
        let window = open_fake(&config, log);
        assert_eq!(window.fields().len(), 1);
        assert_eq!(window.fields()[0].label, "Hex = ");
        assert_eq!(window.swatch, None);
    }

    #[test]
    fn test_update_sets_text_and_swatch() {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        let config = Configuration {
            dynamic_placement: false,
            ..Configuration::default()
        };
        let mut window = open_fake(&config, log.clone());
        let sample = Sample::new(Point::new(12, 34), Color::new(255, 0, 0));

        window
            .update(&rendering_for(sample, &config), sample.color)
            .expect("update");

        let texts: Vec<_> = window.fields().iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["(12, 34)", "(255, 0, 0)", "(0%, 100%, 100%)", "#FF0000"]);
        assert_eq!(window.swatch, Some(Color::new(255, 0, 0)));

        let log = log.borrow();
        let (_, rows, swatch) = &log.presented[0];
        assert_eq!(rows[3], "Hex = #FF0000");
        assert_eq!(*swatch, Some(Color::new(255, 0, 0)));
        // Static mode never re-fits.
        assert!(log.resized.is_empty());
    }

    #[test]
    fn test_dynamic_update_refits_after_text_change() {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        let config = Configuration {
            fields: FieldVisibility::none().with(FieldKind::Coordinates, true),
            show_swatch: false,
            ..Configuration::default()
        };
        let mut window = open_fake(&config, log.clone());

        let near = Sample::new(Point::new(1, 2), Color::BLACK);
        window.update(&rendering_for(near, &config), near.color).expect("update");
        let far = Sample::new(Point::new(12345, 67890), Color::BLACK);
        window.update(&rendering_for(far, &config), far.color).expect("update");

        let log = log.borrow();
        // "X,Y = (1, 2)" is 12 chars, "X,Y = (12345, 67890)" is 20 chars.
        let layout = Layout::standard(true);
        assert_eq!(log.resized.last(), Some(&layout.natural_size(&[20], false)));
        assert_eq!(log.presented.last().map(|p| p.0), Some(layout.natural_size(&[20], false)));
        assert_eq!(window.size(), layout.natural_size(&[20], false));
    }

    #[test]
    fn test_reposition_only_in_dynamic_mode() {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        let fixed = Configuration {
            dynamic_placement: false,
            ..Configuration::default()
        };
        let mut window = open_fake(&fixed, log.clone());
        window.reposition(Point::new(5, 5));
        assert!(log.borrow().moved.is_empty());

        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        let mut window = open_fake(&Configuration::default(), log.clone());
        window.reposition(Point::new(5, 5));
        window.reposition(Point::new(5, 5));
        assert_eq!(log.borrow().moved, vec![Point::new(15, 15)]);
        assert_eq!(window.position, Some(Point::new(15, 15)));
    }

    #[test]
    fn test_reposition_uses_refitted_size() {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        let config = Configuration {
            fields: FieldVisibility::none().with(FieldKind::Coordinates, true),
            show_swatch: false,
            ..Configuration::default()
        };
        let mut window = open_fake(&config, log.clone());
        let screen = Size::new(1920, 1080);

        // Text grows from the 12-char reference to 20 chars.
        let cursor = Point::new(1600, 100);
        let sample = Sample::new(Point::new(12345, 67890), Color::BLACK);
        window.update(&rendering_for(sample, &config), sample.color).expect("update");
        window.reposition(cursor);

        let grown = Layout::standard(true).natural_size(&[20], false);
        assert_eq!(window.size(), grown);
        let placed = log.borrow().moved[0];
        assert_eq!(placed, place_near_cursor(cursor, grown, screen));
        assert!(placed.x + grown.width <= screen.width);
    }

    #[test]
    fn test_close_event_is_terminal() {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        log.borrow_mut().scripted = vec![(0, SurfaceEvent::CloseRequested)];
        let config = Configuration::default();
        let mut window = open_fake(&config, log.clone());

        let first = Sample::new(Point::new(1, 1), Color::WHITE);
        window.update(&rendering_for(first, &config), first.color).expect("update");
        assert!(!window.is_open());
        assert!(log.borrow().hidden);

        let second = Sample::new(Point::new(2, 2), Color::BLACK);
        window.update(&rendering_for(second, &config), second.color).expect("update");
        window.reposition(Point::new(2, 2));

        assert!(!window.is_open());
        assert_eq!(window.fields()[0].text, "(1, 1)");
        assert_eq!(log.borrow().presented.len(), 1);
        assert!(log.borrow().moved.is_empty());
        assert!(!window.state.close());
    }

    #[test]
    fn test_copy_event_raises_request() {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        log.borrow_mut().scripted = vec![(0, SurfaceEvent::CopyRequested)];
        let config = Configuration::default();
        let mut window = open_fake(&config, log);

        let sample = Sample::new(Point::new(1, 1), Color::WHITE);
        window.update(&rendering_for(sample, &config), sample.color).expect("update");
        assert!(window.copy_request().take());
        assert!(!window.copy_request().take());
    }
}
