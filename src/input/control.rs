//! Exclusive input ownership.
//!
//! A [`Controller`] claims mouse routing on one widget and keyboard routing
//! at the root. Claims stack: the most recent claim covering a device wins,
//! and yielding pops back to whatever owned that device before.

use bitflags::bitflags;
use slotmap::{new_key_type, SlotMap};

use super::binding::{BindingAction, KeyBindings};
use super::event::{Key, KeyEvent, Modifiers};
use crate::geometry::DimFloat;
use crate::style::WidgetState;
use crate::tree::{WidgetId, WidgetTree};

new_key_type! {
    /// Handle to a controller registered with a [`ControlStack`].
    pub struct ControllerId;
}

bitflags! {
    /// Device classes a claim can cover.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DeviceMask: u8 {
        const MOUSE_LEFT = 1 << 0;
        const MOUSE_RIGHT = 1 << 1;
        const MOUSE_MIDDLE = 1 << 2;
        const MOUSE_MOTION = 1 << 3;
        const MOUSE_WHEEL = 1 << 4;
        const KEYBOARD = 1 << 5;
        const MOUSE_ALL = Self::MOUSE_LEFT.bits()
            | Self::MOUSE_RIGHT.bits()
            | Self::MOUSE_MIDDLE.bits()
            | Self::MOUSE_MOTION.bits()
            | Self::MOUSE_WHEEL.bits();
    }
}

/// How strongly a controller holds its widget.
///
/// Ordered: `Control < Modal < Absolute`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ControlMode {
    /// Clicks outside the taken widget pass through.
    #[default]
    Control,
    /// Clicks outside the taken widget yield.
    Modal,
    Absolute,
}

impl ControlMode {
    pub fn is_modal(self) -> bool {
        self >= ControlMode::Modal
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// An input controller: a mode, the devices it claims, and its key bindings.
#[derive(Debug)]
pub struct Controller {
    mode: ControlMode,
    devices: DeviceMask,
    pub bindings: KeyBindings,
    active: Option<WidgetId>,
}

impl Controller {
    /// A controller claiming every mouse device and the keyboard.
    pub fn new(mode: ControlMode) -> Self {
        Self {
            mode,
            devices: DeviceMask::MOUSE_ALL | DeviceMask::KEYBOARD,
            bindings: KeyBindings::new(),
            active: None,
        }
    }

    pub fn with_devices(mut self, devices: DeviceMask) -> Self {
        self.devices = devices;
        self
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn devices(&self) -> DeviceMask {
        self.devices
    }

    /// The widget currently taken, if any.
    pub fn active(&self) -> Option<WidgetId> {
        self.active
    }
}

// ---------------------------------------------------------------------------
// Claims and outcomes
// ---------------------------------------------------------------------------

/// One entry of the claim stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    pub controller: ControllerId,
    pub widget: WidgetId,
    pub devices: DeviceMask,
}

/// Result of offering a key event to the controllers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// No binding matched; the event may propagate.
    Unhandled,
    /// A binding matched and ran.
    Handled,
    /// A binding matched a named action for the caller to run.
    Custom(String),
}

impl KeyOutcome {
    pub fn is_consumed(&self) -> bool {
        !matches!(self, KeyOutcome::Unhandled)
    }
}

/// Result of offering a left click to a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click landed inside the taken widget.
    Inside(WidgetId),
    /// The click missed and passes through to normal routing.
    Outside,
    /// The click missed a modal controller, which yielded.
    Yielded,
}

enum Pending {
    Yield,
    Done(KeyOutcome),
}

// ---------------------------------------------------------------------------
// ControlStack
// ---------------------------------------------------------------------------

/// Controller registry plus the LIFO stack of their claims.
#[derive(Debug)]
pub struct ControlStack {
    root: WidgetId,
    escape: Key,
    controllers: SlotMap<ControllerId, Controller>,
    claims: Vec<Claim>,
}

impl ControlStack {
    /// A stack whose keyboard claims attach to `root`, with Escape yielding.
    pub fn new(root: WidgetId) -> Self {
        Self::with_escape(root, Key::Escape)
    }

    /// Like [`new`](Self::new) with a different yield key.
    pub fn with_escape(root: WidgetId, escape: Key) -> Self {
        Self {
            root,
            escape,
            controllers: SlotMap::with_key(),
            claims: Vec::new(),
        }
    }

    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// Register a controller, adding the escape key-up binding unless the
    /// controller already binds that key on release.
    pub fn add_controller(&mut self, mut controller: Controller) -> ControllerId {
        if !controller.bindings.has_up(self.escape, Modifiers::NONE) {
            controller
                .bindings
                .bind_up(self.escape, Modifiers::NONE, BindingAction::Yield);
        }
        self.controllers.insert(controller)
    }

    /// Yield and unregister a controller.
    pub fn remove_controller(&mut self, id: ControllerId, tree: &mut WidgetTree) -> Option<Controller> {
        self.yield_control(id, tree);
        self.controllers.remove(id)
    }

    pub fn controller(&self, id: ControllerId) -> Option<&Controller> {
        self.controllers.get(id)
    }

    pub fn controller_mut(&mut self, id: ControllerId) -> Option<&mut Controller> {
        self.controllers.get_mut(id)
    }

    /// Current claims, oldest first.
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn depth(&self) -> usize {
        self.claims.len()
    }

    // -- take / yield --------------------------------------------------------

    /// Give `id` mouse ownership of `widget` and keyboard ownership at the root.
    ///
    /// A controller that already holds a widget yields it first.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not registered or `widget` is not in `tree`.
    pub fn take(&mut self, id: ControllerId, widget: WidgetId, tree: &mut WidgetTree) {
        assert!(tree.contains(widget), "cannot take a widget outside the tree");
        let Some(controller) = self.controllers.get(id) else {
            panic!("unknown controller {id:?}");
        };
        if let Some(previous) = controller.active {
            tracing::debug!(?id, ?previous, "controller re-taken without yield");
            self.yield_control(id, tree);
        }

        let Some(controller) = self.controllers.get_mut(id) else {
            return;
        };
        let mouse = controller.devices & DeviceMask::MOUSE_ALL;
        if !mouse.is_empty() {
            self.claims.push(Claim {
                controller: id,
                widget,
                devices: mouse,
            });
        }
        if controller.devices.contains(DeviceMask::KEYBOARD) {
            self.claims.push(Claim {
                controller: id,
                widget: self.root,
                devices: DeviceMask::KEYBOARD,
            });
        }
        controller.active = Some(widget);
        let mode = controller.mode;
        self.refresh_bits(widget, tree);
        tracing::debug!(?id, ?widget, ?mode, depth = self.claims.len(), "control taken");
    }

    /// Release every claim held by `id`, newest first. No-op when nothing is taken.
    pub fn yield_control(&mut self, id: ControllerId, tree: &mut WidgetTree) {
        let Some(controller) = self.controllers.get_mut(id) else {
            return;
        };
        let Some(widget) = controller.active.take() else {
            return;
        };
        while let Some(pos) = self.claims.iter().rposition(|claim| claim.controller == id) {
            self.claims.remove(pos);
        }
        self.refresh_bits(widget, tree);
        tracing::debug!(?id, ?widget, depth = self.claims.len(), "control yielded");
    }

    /// Yield every controller whose widget is no longer in `tree`.
    pub fn prune(&mut self, tree: &mut WidgetTree) {
        let gone: Vec<ControllerId> = self
            .controllers
            .iter()
            .filter(|(_, controller)| controller.active.is_some_and(|widget| !tree.contains(widget)))
            .map(|(id, _)| id)
            .collect();
        for id in gone {
            tracing::debug!(?id, "controller widget destroyed");
            self.yield_control(id, tree);
        }
    }

    /// Recompute `CONTROL`/`MODAL` on `widget` from the controllers holding it.
    fn refresh_bits(&self, widget: WidgetId, tree: &mut WidgetTree) {
        let holders = self
            .controllers
            .values()
            .filter(|controller| controller.active == Some(widget));
        let (mut control, mut modal) = (false, false);
        for holder in holders {
            control = true;
            modal |= holder.mode.is_modal();
        }
        tree.set_state(widget, WidgetState::CONTROL, control && !modal);
        tree.set_state(widget, WidgetState::MODAL, modal);
    }

    // -- routing -------------------------------------------------------------

    /// The topmost claim covering any of `devices`.
    fn owner_claim(&self, devices: DeviceMask) -> Option<&Claim> {
        self.claims
            .iter()
            .rev()
            .find(|claim| claim.devices.intersects(devices))
    }

    /// Widget receiving events from `device`, if claimed.
    pub fn mouse_owner(&self, device: DeviceMask) -> Option<WidgetId> {
        self.owner_claim(device & DeviceMask::MOUSE_ALL)
            .map(|claim| claim.widget)
    }

    /// Controller receiving events from `device`, if claimed.
    pub fn mouse_controller(&self, device: DeviceMask) -> Option<ControllerId> {
        self.owner_claim(device & DeviceMask::MOUSE_ALL)
            .map(|claim| claim.controller)
    }

    /// Widget receiving keyboard events, if claimed.
    pub fn keyboard_owner(&self) -> Option<WidgetId> {
        self.owner_claim(DeviceMask::KEYBOARD).map(|claim| claim.widget)
    }

    pub fn keyboard_controller(&self) -> Option<ControllerId> {
        self.owner_claim(DeviceMask::KEYBOARD)
            .map(|claim| claim.controller)
    }

    /// Offer a left click at `point` (root coordinates) to controller `id`.
    ///
    /// Modal controllers yield when the click misses their widget; others let
    /// it pass through.
    pub fn left_click(&mut self, id: ControllerId, point: DimFloat, tree: &mut WidgetTree) -> ClickOutcome {
        let Some(controller) = self.controllers.get(id) else {
            return ClickOutcome::Outside;
        };
        let Some(widget) = controller.active else {
            return ClickOutcome::Outside;
        };
        let inside = tree
            .get(widget)
            .is_some_and(|w| w.frame.inside(point - tree.absolute_position(widget)));
        if inside {
            return ClickOutcome::Inside(widget);
        }
        if controller.mode.is_modal() {
            self.yield_control(id, tree);
            return ClickOutcome::Yielded;
        }
        ClickOutcome::Outside
    }

    pub fn key_down(&mut self, event: &KeyEvent, tree: &mut WidgetTree) -> KeyOutcome {
        self.key(event, tree)
    }

    pub fn key_up(&mut self, event: &KeyEvent, tree: &mut WidgetTree) -> KeyOutcome {
        self.key(event, tree)
    }

    /// Try keyboard-claiming controllers from the top of the stack down.
    fn key(&mut self, event: &KeyEvent, tree: &mut WidgetTree) -> KeyOutcome {
        let mut seen: Vec<ControllerId> = Vec::new();
        let candidates: Vec<ControllerId> = self
            .claims
            .iter()
            .rev()
            .filter(|claim| claim.devices.contains(DeviceMask::KEYBOARD))
            .map(|claim| claim.controller)
            .collect();
        for id in candidates {
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);
            let Some(controller) = self.controllers.get_mut(id) else {
                continue;
            };
            let pending = match controller.bindings.resolve_mut(event) {
                None => continue,
                Some(BindingAction::Yield) => Pending::Yield,
                Some(BindingAction::Custom(name)) => Pending::Done(KeyOutcome::Custom(name.clone())),
                Some(BindingAction::Callback(callback)) => {
                    callback();
                    Pending::Done(KeyOutcome::Handled)
                }
            };
            tracing::trace!(?id, key = ?event.code, kind = ?event.kind, "key binding matched");
            return match pending {
                Pending::Yield => {
                    self.yield_control(id, tree);
                    KeyOutcome::Handled
                }
                Pending::Done(outcome) => outcome,
            };
        }
        KeyOutcome::Unhandled
    }
}

// ===========================================================================
// Tests
// ===========================================================================
