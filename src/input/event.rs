//! Raw device events consumed by the control stack and pointer dispatch.
//!
//! Keys carry a down/up kind so bindings can fire on release. Backend events
//! arrive through `From` impls; nothing past this module names crossterm.

use bitflags::bitflags;

use crate::geometry::DimFloat;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Key code, independent of the input backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    /// Anything the backend reports that has no variant here.
    Other,
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

bitflags! {
    /// Modifier key bitmask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
    }
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers::empty();
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// Whether a key went down or came back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyKind {
    #[default]
    Down,
    Up,
}

/// A keyboard event with key, modifiers and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
    pub kind: KeyKind,
}

impl KeyEvent {
    /// A key-down event.
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self {
            code,
            modifiers,
            kind: KeyKind::Down,
        }
    }

    /// A key-up event.
    pub fn up(code: Key, modifiers: Modifiers) -> Self {
        Self {
            code,
            modifiers,
            kind: KeyKind::Up,
        }
    }
}

// ---------------------------------------------------------------------------
// MouseBtn / MouseAction / MouseEvent
// ---------------------------------------------------------------------------

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

/// Mouse action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Down(MouseBtn),
    Up(MouseBtn),
    Drag(MouseBtn),
    Moved,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

/// A pointer event at a cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseAction,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    pub fn new(kind: MouseAction, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// The pointer position in layout units.
    pub fn position(&self) -> DimFloat {
        DimFloat::new(f32::from(self.x), f32::from(self.y))
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Anything the input backend delivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    FocusGained,
    FocusLost,
    Paste(String),
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(m: crossterm::event::KeyModifiers) -> Self {
        let mut out = Modifiers::NONE;
        out.set(
            Modifiers::SHIFT,
            m.contains(crossterm::event::KeyModifiers::SHIFT),
        );
        out.set(
            Modifiers::CTRL,
            m.contains(crossterm::event::KeyModifiers::CONTROL),
        );
        out.set(Modifiers::ALT, m.contains(crossterm::event::KeyModifiers::ALT));
        out
    }
}

impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Other,
        }
    }
}

/// Repeats count as key-down.
impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(ct: crossterm::event::KeyEvent) -> Self {
        let kind = match ct.kind {
            crossterm::event::KeyEventKind::Release => KeyKind::Up,
            _ => KeyKind::Down,
        };
        KeyEvent {
            code: ct.code.into(),
            modifiers: ct.modifiers.into(),
            kind,
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseBtn {
    fn from(b: crossterm::event::MouseButton) -> Self {
        match b {
            crossterm::event::MouseButton::Left => MouseBtn::Left,
            crossterm::event::MouseButton::Right => MouseBtn::Right,
            crossterm::event::MouseButton::Middle => MouseBtn::Middle,
        }
    }
}

impl From<crossterm::event::MouseEvent> for MouseEvent {
    fn from(me: crossterm::event::MouseEvent) -> Self {
        use crossterm::event::MouseEventKind;
        let kind = match me.kind {
            MouseEventKind::Down(b) => MouseAction::Down(b.into()),
            MouseEventKind::Up(b) => MouseAction::Up(b.into()),
            MouseEventKind::Drag(b) => MouseAction::Drag(b.into()),
            MouseEventKind::Moved => MouseAction::Moved,
            MouseEventKind::ScrollUp => MouseAction::ScrollUp,
            MouseEventKind::ScrollDown => MouseAction::ScrollDown,
            MouseEventKind::ScrollLeft => MouseAction::ScrollLeft,
            MouseEventKind::ScrollRight => MouseAction::ScrollRight,
        };
        MouseEvent {
            kind,
            x: me.column,
            y: me.row,
            modifiers: me.modifiers.into(),
        }
    }
}

impl From<crossterm::event::Event> for InputEvent {
    fn from(ct: crossterm::event::Event) -> Self {
        match ct {
            crossterm::event::Event::Key(ke) => InputEvent::Key(ke.into()),
            crossterm::event::Event::Mouse(me) => InputEvent::Mouse(me.into()),
            crossterm::event::Event::Resize(width, height) => InputEvent::Resize { width, height },
            crossterm::event::Event::FocusGained => InputEvent::FocusGained,
            crossterm::event::Event::FocusLost => InputEvent::FocusLost,
            crossterm::event::Event::Paste(s) => InputEvent::Paste(s),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
