//! Scripted input and frame stepping for a headless [`App`](crate::app::App).
//!
//! Every frame renders into a [`RecordingRenderer`], so tests can assert on
//! the paint trace or on the skins handed to the backend.

use crate::app::{App, AppConfig, AppError, AppEvent};
use crate::input::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent};
use crate::tree::WidgetId;

use super::snapshot::RecordingRenderer;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// Drives an app without a terminal.
///
/// # Examples
///
/// ```
/// use skein::input::Key;
/// use skein::testing::Pilot;
///
/// let mut pilot = Pilot::new(80, 24);
/// pilot.press_key(Key::Char('a'));
/// pilot.tick();
/// assert!(pilot.is_running());
/// ```
pub struct Pilot {
    app: App,
    renderer: RecordingRenderer,
    delta: usize,
}

impl Pilot {
    /// Create a headless app with the given viewport size.
    pub fn new(width: u16, height: u16) -> Self {
        Self::from_app(App::headless(width, height))
    }

    /// Create a Pilot from an [`AppConfig`], loading its styles.
    pub fn with_config(config: AppConfig) -> Result<Self, AppError> {
        Ok(Self::from_app(App::new(config)?))
    }

    fn from_app(app: App) -> Self {
        Self {
            app,
            renderer: RecordingRenderer::default(),
            delta: 16,
        }
    }

    /// Milliseconds each simulated frame advances (builder).
    pub fn with_frame_delta(mut self, delta: usize) -> Self {
        self.delta = delta;
        self
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Simulate pressing and releasing a key with no modifiers.
    pub fn press_key(&mut self, key: Key) {
        self.press_key_with(key, Modifiers::NONE);
    }

    /// Simulate pressing and releasing a key with the given modifiers.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) {
        self.app
            .handle_input(InputEvent::Key(KeyEvent::new(key, modifiers)));
        self.app
            .handle_input(InputEvent::Key(KeyEvent::up(key, modifiers)));
    }

    /// Simulate typing each character of `text`.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press_key(Key::Char(ch));
        }
    }

    fn mouse(&mut self, kind: MouseAction, x: u16, y: u16) {
        self.app
            .handle_input(InputEvent::Mouse(MouseEvent::new(kind, x, y)));
    }

    /// Simulate moving the pointer to (x, y).
    pub fn hover(&mut self, x: u16, y: u16) {
        self.mouse(MouseAction::Moved, x, y);
    }

    /// Simulate a left-button press and release at (x, y).
    pub fn click(&mut self, x: u16, y: u16) {
        self.mouse(MouseAction::Down(MouseBtn::Left), x, y);
        self.mouse(MouseAction::Up(MouseBtn::Left), x, y);
    }

    /// Simulate pressing at `from`, dragging to `to` and releasing there.
    pub fn drag(&mut self, from: (u16, u16), to: (u16, u16)) {
        self.mouse(MouseAction::Down(MouseBtn::Left), from.0, from.1);
        self.mouse(MouseAction::Drag(MouseBtn::Left), to.0, to.1);
        self.mouse(MouseAction::Up(MouseBtn::Left), to.0, to.1);
    }

    /// Simulate a viewport resize.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.app.handle_input(InputEvent::Resize { width, height });
    }

    // ── Frames ───────────────────────────────────────────────────────

    /// Run one frame into the recording renderer, replacing the last trace.
    ///
    /// # Panics
    ///
    /// Panics if layout fails.
    pub fn tick(&mut self) {
        self.renderer.clear();
        if let Err(err) = self.app.tick(self.delta, &mut self.renderer) {
            panic!("frame failed: {err}");
        }
    }

    /// Trace of the last frame, one begin/draw/end call per line.
    pub fn trace(&self) -> String {
        self.renderer.trace(&self.app.tree)
    }

    /// Widgets drawn in the last frame, in paint order.
    pub fn drawn(&self) -> Vec<WidgetId> {
        self.renderer.drawn()
    }

    pub fn renderer(&self) -> &RecordingRenderer {
        &self.renderer
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Take the app events collected so far.
    pub fn events(&mut self) -> Vec<AppEvent> {
        self.app.drain_events()
    }

    /// Whether the app is still running (has not quit).
    pub fn is_running(&self) -> bool {
        !self.app.should_quit()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
