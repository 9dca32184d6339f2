//! App struct: lifecycle, frame loop, input routing.
//!
//! [`App`] ties together the widget tree, the styler, the control stack, the
//! pointer dispatcher and the layout engine. [`App::headless`] builds one
//! without touching the terminal.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::geometry::DimFloat;
use crate::input::{
    ControlStack, InputDispatcher, InputEvent, Key, KeyEvent, KeyKind, KeyOutcome, Modifiers, PointerEvent,
};
use crate::layout::{LayoutEngine, LayoutError};
use crate::render::{Renderer, TerminalRenderer};
use crate::style::{ImageCatalog, LoadError, Styler};
use crate::tree::{WidgetId, WidgetTree};
use crate::widgets::{self, GridSheet};

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Optional window/app title.
    pub title: Option<String>,
    /// Optional inline style document, used when no `style_sheet` is set.
    pub style_source: Option<String>,
    /// Optional style document on disk.
    pub style_sheet: Option<PathBuf>,
    /// Directory relative image identifiers resolve against.
    pub resource_path: PathBuf,
    /// Target frames per second for the frame loop.
    pub fps: u32,
    /// Key whose release yields a controller.
    pub escape_key: Key,
    /// Viewport size in cells when no terminal is attached.
    pub size: (u16, u16),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: None,
            style_source: None,
            style_sheet: None,
            resource_path: PathBuf::from("."),
            fps: 60,
            escape_key: Key::Escape,
            size: (80, 24),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set an inline style document (builder).
    pub fn with_style_source(mut self, source: impl Into<String>) -> Self {
        self.style_source = Some(source.into());
        self
    }

    /// Set the style sheet path (builder).
    pub fn with_style_sheet(mut self, path: impl Into<PathBuf>) -> Self {
        self.style_sheet = Some(path.into());
        self
    }

    /// Set the resource path (builder).
    pub fn with_resource_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.resource_path = path.into();
        self
    }

    /// Set the target FPS (builder).
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Set the yield key (builder).
    pub fn with_escape_key(mut self, key: Key) -> Self {
        self.escape_key = key;
        self
    }

    /// Set the headless viewport size (builder).
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.size = (width, height);
        self
    }

    /// Time budget of one frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

// ---------------------------------------------------------------------------
// Errors and events
// ---------------------------------------------------------------------------

/// Errors surfaced by the app.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Style(#[from] LoadError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// Something that happened during input handling that the app's owner may
/// want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A pointer event no grid sheet consumed.
    Pointer(PointerEvent),
    /// A named key binding fired.
    Action(String),
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The main application struct.
pub struct App {
    pub tree: WidgetTree,
    pub styler: Styler,
    pub controls: ControlStack,
    pub dispatcher: InputDispatcher,
    pub layout: LayoutEngine,
    pub config: AppConfig,
    grids: Vec<GridSheet>,
    events: Vec<AppEvent>,
    root: WidgetId,
    viewport: DimFloat,
    tick: usize,
    running: bool,
}

impl App {
    /// Create an app and load its configured styles.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let mut app = Self::build(config);
        app.reload_style()?;
        Ok(app)
    }

    /// Create an app with default config and no styles, for tests.
    pub fn headless(width: u16, height: u16) -> Self {
        Self::build(AppConfig::default().with_size(width, height))
    }

    fn build(config: AppConfig) -> Self {
        let mut tree = WidgetTree::new();
        let root = tree.create(widgets::sheet("Root"));
        let root = tree.set_root(root);
        let (width, height) = config.size;
        Self {
            styler: Styler::new(ImageCatalog::new(config.resource_path.clone())),
            controls: ControlStack::with_escape(root, config.escape_key),
            dispatcher: InputDispatcher::new(),
            layout: LayoutEngine::new(),
            tree,
            grids: Vec::new(),
            events: Vec::new(),
            root,
            viewport: DimFloat::new(f32::from(width), f32::from(height)),
            tick: 0,
            running: true,
            config,
        }
    }

    pub fn root(&self) -> WidgetId {
        self.root
    }

    pub fn viewport(&self) -> DimFloat {
        self.viewport
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> usize {
        self.tick
    }

    /// Re-run the configured style load: the sheet on disk if set, else the
    /// inline source. A failed load keeps the previous styles and is returned.
    pub fn reload_style(&mut self) -> Result<usize, AppError> {
        let count = match (&self.config.style_sheet, &self.config.style_source) {
            (Some(path), _) => self.styler.load_file(path)?,
            (None, Some(source)) => self.styler.load_str(source)?,
            (None, None) => return Ok(self.styler.table().len()),
        };
        tracing::info!(styles = count, "styles loaded");
        Ok(count)
    }

    /// Register drag-resize behaviour for a grid sheet.
    pub fn add_grid(&mut self, grid: GridSheet) {
        self.grids.push(grid);
    }

    /// Take the events collected since the last call.
    pub fn drain_events(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn should_quit(&self) -> bool {
        !self.running
    }

    pub fn request_quit(&mut self) {
        self.running = false;
    }

    /// Resize the viewport; the next tick lays out again.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = DimFloat::new(f32::from(width), f32::from(height));
    }

    /// Route one input event. Returns whether anything consumed it.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Key(key) => {
                let outcome = self.dispatcher.key(&key, &mut self.tree, &mut self.controls);
                match outcome {
                    KeyOutcome::Handled => true,
                    KeyOutcome::Custom(name) => {
                        self.events.push(AppEvent::Action(name));
                        true
                    }
                    KeyOutcome::Unhandled => {
                        let quit = key.kind == KeyKind::Down
                            && key.code == Key::Char('c')
                            && key.modifiers == Modifiers::CTRL;
                        if quit {
                            self.request_quit();
                        }
                        quit
                    }
                }
            }
            InputEvent::Mouse(mouse) => {
                let routed = self.dispatcher.pointer(&mouse, &mut self.tree, &mut self.controls);
                let consumed = !routed.is_empty();
                for pointer in routed {
                    let used = self
                        .grids
                        .iter_mut()
                        .any(|grid| grid.handle(&mut self.tree, &pointer));
                    if !used {
                        self.events.push(AppEvent::Pointer(pointer));
                    }
                }
                consumed
            }
            InputEvent::Resize { width, height } => {
                self.resize(width, height);
                true
            }
            InputEvent::FocusGained | InputEvent::FocusLost | InputEvent::Paste(_) => false,
        }
    }

    /// Run one frame: update, layout, render, then apply deferred binds.
    pub fn tick(&mut self, delta: usize, renderer: &mut dyn Renderer) -> Result<(), AppError> {
        self.tick += 1;
        let tick = self.tick;
        self.frame(tick, delta, renderer)
    }

    /// Like [`tick`](Self::tick) with an explicit tick number.
    pub fn frame(&mut self, tick: usize, delta: usize, renderer: &mut dyn Renderer) -> Result<(), AppError> {
        self.tick = tick;
        let stale = self.tree.sync_styles(&self.styler);
        self.tree.next_frame(self.root, tick, delta);
        let laid_out = self
            .layout
            .layout(&mut self.tree, &self.styler, self.root, self.viewport)?;
        self.tree.render(self.root, &self.styler, renderer);
        self.tree.apply_deferred();
        self.dispatcher.prune(&self.tree);
        self.controls.prune(&mut self.tree);
        tracing::trace!(tick, stale, laid_out, "frame");
        Ok(())
    }

    /// Drive the app on the real terminal until it quits.
    pub fn run(&mut self) -> Result<(), AppError> {
        use crossterm::event::{
            DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
            PushKeyboardEnhancementFlags,
        };
        use crossterm::execute;

        let mut renderer = TerminalRenderer::stdout()?;
        let (width, height) = crossterm::terminal::size()?;
        self.resize(width, height);
        renderer.enter_alt_screen()?;
        execute!(io::stdout(), EnableMouseCapture)?;
        let releases = crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false);
        if releases {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        tracing::debug!(releases, "terminal input");
        if let Some(title) = &self.config.title {
            execute!(io::stdout(), crossterm::terminal::SetTitle(title))?;
        }

        let result = self.pump(&mut renderer, releases);

        if releases {
            execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
        }
        execute!(io::stdout(), DisableMouseCapture)?;
        renderer.leave_alt_screen()?;
        result
    }

    /// Route one terminal event.
    ///
    /// When the terminal does not report key releases (`releases` false), each
    /// press is followed by a synthesized release so key-up bindings still fire.
    pub fn handle_terminal_event(&mut self, event: crossterm::event::Event, releases: bool) -> bool {
        let event = InputEvent::from(event);
        let release = match &event {
            InputEvent::Key(key) if !releases && key.kind == KeyKind::Down => {
                Some(KeyEvent::up(key.code, key.modifiers))
            }
            _ => None,
        };
        let mut handled = self.handle_input(event);
        if let Some(up) = release {
            handled |= self.handle_input(InputEvent::Key(up));
        }
        handled
    }

    fn pump<W: io::Write>(&mut self, renderer: &mut TerminalRenderer<W>, releases: bool) -> Result<(), AppError> {
        use crossterm::event;

        let budget = self.config.frame_duration();
        let mut last = Instant::now();
        while self.running {
            let deadline = last + budget;
            while let Some(wait) = deadline.checked_duration_since(Instant::now()) {
                if !event::poll(wait)? {
                    break;
                }
                self.handle_terminal_event(event::read()?, releases);
            }
            let now = Instant::now();
            let delta = now.duration_since(last).as_millis() as usize;
            last = now;
            self.tick(delta, renderer)?;
            renderer.finish()?;
        }
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dimension;
    use crate::input::{ControlMode, Controller, MouseAction, MouseBtn, MouseEvent};
    use crate::testing::RecordingRenderer;
    use crate::tree::Widget;

    fn key_up(key: Key) -> InputEvent {
        InputEvent::Key(KeyEvent::up(key, Modifiers::NONE))
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn headless_app_has_root() {
        let app = App::headless(80, 24);
        assert_eq!(app.tree.root(), Some(app.root()));
        assert_eq!(app.viewport(), DimFloat::new(80.0, 24.0));
        assert!(!app.should_quit());
    }

    #[test]
    fn new_loads_inline_styles() {
        let config = AppConfig::new().with_style_source("Button:\n  background_colour: 1,0,0,1\n");
        let app = App::new(config).unwrap();
        assert!(app.styler.get("Button").is_some());
    }

    #[test]
    fn new_reports_missing_sheet() {
        let config = AppConfig::new().with_style_sheet("/nonexistent/skein/style.yml");
        assert!(matches!(App::new(config), Err(AppError::Style(LoadError::Io { .. }))));
    }

    // ── tick ─────────────────────────────────────────────────────────

    #[test]
    fn tick_lays_out_and_renders() {
        let mut app = App::headless(40, 10);
        let child = app.tree.create(Widget::new("Panel")).id();
        app.tree.push(app.root(), child, false);

        let mut renderer = RecordingRenderer::default();
        app.tick(16, &mut renderer).unwrap();

        assert_eq!(renderer.drawn(), vec![app.root(), child]);
        assert_eq!(app.tree.get(child).unwrap().frame.size, DimFloat::new(40.0, 10.0));
        assert_eq!(app.tree.get(child).unwrap().frame.elapsed(), 16);
        assert_eq!(app.ticks(), 1);
    }

    #[test]
    fn deferred_binds_apply_after_render() {
        let mut app = App::headless(40, 10);
        let child = app.tree.create(Widget::new("Late")).id();
        app.tree.push(app.root(), child, true);

        let mut renderer = RecordingRenderer::default();
        app.tick(16, &mut renderer).unwrap();
        assert_eq!(renderer.drawn(), vec![app.root()]);
        assert_eq!(app.tree.parent(child), Some(app.root()));

        renderer.clear();
        app.tick(16, &mut renderer).unwrap();
        assert_eq!(renderer.drawn(), vec![app.root(), child]);
    }

    // ── handle_input ─────────────────────────────────────────────────

    #[test]
    fn resize_updates_viewport() {
        let mut app = App::headless(80, 24);
        assert!(app.handle_input(InputEvent::Resize {
            width: 100,
            height: 30
        }));
        assert_eq!(app.viewport(), DimFloat::new(100.0, 30.0));
    }

    #[test]
    fn ctrl_c_quits_when_unhandled() {
        let mut app = App::headless(80, 24);
        app.handle_input(InputEvent::Key(KeyEvent::new(Key::Char('c'), Modifiers::CTRL)));
        assert!(app.should_quit());
    }

    #[test]
    fn escape_yields_through_app() {
        let mut app = App::headless(80, 24);
        let c = app.controls.add_controller(Controller::new(ControlMode::Modal));
        let root = app.root();
        app.controls.take(c, root, &mut app.tree);
        assert!(app.handle_input(key_up(Key::Escape)));
        assert!(app.controls.claims().is_empty());
        assert!(!app.handle_input(key_up(Key::Escape)));
    }

    fn escape_press() -> crossterm::event::Event {
        crossterm::event::Event::Key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Esc,
            crossterm::event::KeyModifiers::NONE,
        ))
    }

    #[test]
    fn terminal_press_releases_when_terminal_reports_no_releases() {
        let mut app = App::headless(80, 24);
        let c = app.controls.add_controller(Controller::new(ControlMode::Modal));
        let root = app.root();
        app.controls.take(c, root, &mut app.tree);
        assert!(app.handle_terminal_event(escape_press(), false));
        assert!(app.controls.claims().is_empty());
    }

    #[test]
    fn terminal_press_waits_for_release_when_reported() {
        let mut app = App::headless(80, 24);
        let c = app.controls.add_controller(Controller::new(ControlMode::Modal));
        let root = app.root();
        app.controls.take(c, root, &mut app.tree);
        assert!(!app.handle_terminal_event(escape_press(), true));
        assert_eq!(app.controls.depth(), 2);

        let release = crossterm::event::Event::Key(crossterm::event::KeyEvent::new_with_kind(
            crossterm::event::KeyCode::Esc,
            crossterm::event::KeyModifiers::NONE,
            crossterm::event::KeyEventKind::Release,
        ));
        assert!(app.handle_terminal_event(release, true));
        assert_eq!(app.controls.depth(), 0);
    }

    #[test]
    fn configured_escape_key() {
        let mut app = App::new(AppConfig::new().with_escape_key(Key::Char('x'))).unwrap();
        let c = app.controls.add_controller(Controller::new(ControlMode::Control));
        let root = app.root();
        app.controls.take(c, root, &mut app.tree);
        assert!(!app.handle_input(key_up(Key::Escape)));
        assert!(app.handle_input(key_up(Key::Char('x'))));
    }

    #[test]
    fn custom_actions_are_queued() {
        let mut app = App::headless(80, 24);
        let mut controller = Controller::new(ControlMode::Control);
        controller.bindings.bind_down(
            Key::Enter,
            Modifiers::NONE,
            crate::input::BindingAction::Custom("submit".into()),
        );
        let c = app.controls.add_controller(controller);
        let root = app.root();
        app.controls.take(c, root, &mut app.tree);
        app.handle_input(InputEvent::Key(KeyEvent::new(Key::Enter, Modifiers::NONE)));
        assert_eq!(app.drain_events(), vec![AppEvent::Action("submit".into())]);
        assert!(app.drain_events().is_empty());
    }

    #[test]
    fn grid_sheet_consumes_its_drags() {
        let mut app = App::new(
            AppConfig::new()
                .with_size(100, 10)
                .with_style_source("Grid:\n  spacing: 10, 0\n"),
        )
        .unwrap();
        let grid = app.tree.create(GridSheet::widget("Grid")).id();
        app.tree.push(app.root(), grid, false);
        let mut cells = Vec::new();
        for _ in 0..2 {
            let cell = app.tree.create(Widget::new("Cell"));
            cells.push(app.tree.append(grid, cell));
        }
        app.add_grid(GridSheet::new(grid, Dimension::DimX));
        let mut renderer = RecordingRenderer::default();
        app.tick(16, &mut renderer).unwrap();
        // two 45px cells around a 10px gap
        assert_eq!(app.tree.get(cells[1]).unwrap().frame.position.x, 55.0);

        let mouse = |kind, x| InputEvent::Mouse(MouseEvent::new(kind, x, 5));
        app.handle_input(mouse(MouseAction::Down(MouseBtn::Left), 50));
        app.drain_events();
        app.handle_input(mouse(MouseAction::Drag(MouseBtn::Left), 60));
        assert!(app.drain_events().is_empty());

        let first = app.tree.get(cells[0]).unwrap().frame.span.x;
        assert!(first > 1.0, "{first}");
        app.tick(16, &mut renderer).unwrap();
        assert!(app.tree.get(cells[0]).unwrap().frame.size.x > 45.0);
    }
}
