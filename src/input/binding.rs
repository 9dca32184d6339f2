//! Per-controller key bindings.
//!
//! [`KeyBindings`] keeps two maps, one consulted on key-down and one on
//! key-up, from key+modifier combinations to [`BindingAction`]s.

use std::collections::HashMap;

use super::event::{Key, KeyEvent, KeyKind, Modifiers};

// ---------------------------------------------------------------------------
// BindingAction
// ---------------------------------------------------------------------------

/// Action to take when a key binding is matched.
pub enum BindingAction {
    /// Yield the owning controller's claim.
    Yield,
    /// A named action reported back to the caller.
    Custom(String),
    /// Run a closure.
    Callback(Box<dyn FnMut()>),
}

impl std::fmt::Debug for BindingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yield => write!(f, "Yield"),
            Self::Custom(name) => write!(f, "Custom({name:?})"),
            Self::Callback(_) => write!(f, "Callback(<fn>)"),
        }
    }
}

// ---------------------------------------------------------------------------
// KeyBindings
// ---------------------------------------------------------------------------

/// Key-down and key-up bindings of one controller.
#[derive(Debug, Default)]
pub struct KeyBindings {
    down: HashMap<(Key, Modifiers), BindingAction>,
    up: HashMap<(Key, Modifiers), BindingAction>,
}

impl KeyBindings {
    /// Create an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings with `key` released (no modifiers) yielding the controller.
    pub fn with_escape(key: Key) -> Self {
        let mut bindings = Self::new();
        bindings.bind_up(key, Modifiers::NONE, BindingAction::Yield);
        bindings
    }

    /// Register a key-down binding, replacing any existing one.
    pub fn bind_down(&mut self, key: Key, modifiers: Modifiers, action: BindingAction) {
        self.down.insert((key, modifiers), action);
    }

    /// Register a key-up binding, replacing any existing one.
    pub fn bind_up(&mut self, key: Key, modifiers: Modifiers, action: BindingAction) {
        self.up.insert((key, modifiers), action);
    }

    pub fn unbind_down(&mut self, key: Key, modifiers: Modifiers) -> Option<BindingAction> {
        self.down.remove(&(key, modifiers))
    }

    pub fn unbind_up(&mut self, key: Key, modifiers: Modifiers) -> Option<BindingAction> {
        self.up.remove(&(key, modifiers))
    }

    /// Whether a key-up binding exists for exactly this combination.
    pub fn has_up(&self, key: Key, modifiers: Modifiers) -> bool {
        self.up.contains_key(&(key, modifiers))
    }

    fn map(&self, kind: KeyKind) -> &HashMap<(Key, Modifiers), BindingAction> {
        match kind {
            KeyKind::Down => &self.down,
            KeyKind::Up => &self.up,
        }
    }

    /// Look up the action for a key event, in the map matching its direction.
    pub fn resolve(&self, event: &KeyEvent) -> Option<&BindingAction> {
        self.map(event.kind).get(&(event.code, event.modifiers))
    }

    /// Like [`resolve`](Self::resolve), allowing callbacks to run.
    pub fn resolve_mut(&mut self, event: &KeyEvent) -> Option<&mut BindingAction> {
        let map = match event.kind {
            KeyKind::Down => &mut self.down,
            KeyKind::Up => &mut self.up,
        };
        map.get_mut(&(event.code, event.modifiers))
    }

    /// Number of bindings across both maps.
    pub fn len(&self) -> usize {
        self.down.len() + self.up.len()
    }

    pub fn is_empty(&self) -> bool {
        self.down.is_empty() && self.up.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
