//! Pointer state machine.
//!
//! [`InputDispatcher`] turns raw mouse events into [`PointerEvent`]s aimed at
//! widgets, keeping the hovered/pressed/focused/dragged bits on the tree in
//! step. The control stack is consulted first so claimed devices route to
//! their owner.

use super::control::{ClickOutcome, ControlStack, DeviceMask, KeyOutcome};
use super::event::{KeyEvent, KeyKind, MouseAction, MouseBtn, MouseEvent};
use crate::geometry::DimFloat;
use crate::style::WidgetState;
use crate::tree::{WidgetId, WidgetTree};

/// What happened to the pointer, from the target widget's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Moved,
    Pressed(MouseBtn),
    Released(MouseBtn),
    /// Left press and release on the same widget without dragging.
    Clicked,
    DragStart,
    Drag,
    DragEnd,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

/// A routed pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub target: WidgetId,
    /// Pointer position in root coordinates.
    pub position: DimFloat,
    /// Movement since the previous pointer event.
    pub delta: DimFloat,
    /// Where the left button last went down.
    pub pressed_at: DimFloat,
}

fn device_of(button: MouseBtn) -> DeviceMask {
    match button {
        MouseBtn::Left => DeviceMask::MOUSE_LEFT,
        MouseBtn::Right => DeviceMask::MOUSE_RIGHT,
        MouseBtn::Middle => DeviceMask::MOUSE_MIDDLE,
    }
}

/// Hover, press, focus and drag tracking for one root.
#[derive(Debug, Default)]
pub struct InputDispatcher {
    hovered: Option<WidgetId>,
    pressed: Option<WidgetId>,
    focused: Option<WidgetId>,
    dragging: bool,
    last_position: DimFloat,
    pressed_at: DimFloat,
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<WidgetId> {
        self.hovered
    }

    pub fn pressed(&self) -> Option<WidgetId> {
        self.pressed
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Position of the last left press, in root coordinates.
    pub fn pressed_at(&self) -> DimFloat {
        self.pressed_at
    }

    /// Move keyboard focus, updating `FOCUSED` bits.
    pub fn focus(&mut self, tree: &mut WidgetTree, target: Option<WidgetId>) {
        if self.focused == target {
            return;
        }
        if let Some(old) = self.focused {
            tree.set_state(old, WidgetState::FOCUSED, false);
        }
        if let Some(new) = target {
            tree.set_state(new, WidgetState::FOCUSED, true);
        }
        self.focused = target;
    }

    /// Forget widgets that are no longer in the tree.
    pub fn prune(&mut self, tree: &WidgetTree) {
        for slot in [&mut self.hovered, &mut self.pressed, &mut self.focused] {
            if slot.is_some_and(|id| !tree.contains(id)) {
                *slot = None;
            }
        }
        if self.pressed.is_none() {
            self.dragging = false;
        }
    }

    /// Route a key event through the control stack.
    pub fn key(&mut self, event: &KeyEvent, tree: &mut WidgetTree, controls: &mut ControlStack) -> KeyOutcome {
        match event.kind {
            KeyKind::Down => controls.key_down(event, tree),
            KeyKind::Up => controls.key_up(event, tree),
        }
    }

    /// Route a mouse event, returning the pointer events it produced.
    pub fn pointer(
        &mut self,
        event: &MouseEvent,
        tree: &mut WidgetTree,
        controls: &mut ControlStack,
    ) -> Vec<PointerEvent> {
        let position = event.position();
        let delta = position - self.last_position;
        self.last_position = position;
        let root = controls.root();

        let mut out = Vec::new();

        match event.kind {
            MouseAction::Moved => {
                let target = self.target(tree, controls, root, position, DeviceMask::MOUSE_MOTION);
                self.hover(tree, target);
                if let Some(target) = target {
                    out.push(self.event(PointerKind::Moved, target, position, delta));
                }
            }
            MouseAction::Down(button) => {
                let device = device_of(button);
                let target = if button == MouseBtn::Left {
                    match controls.mouse_controller(device) {
                        Some(controller) => match controls.left_click(controller, position, tree) {
                            ClickOutcome::Yielded => return out,
                            ClickOutcome::Inside(owner) => tree.widget_at(owner, position).or(Some(owner)),
                            ClickOutcome::Outside => tree.widget_at(root, position),
                        },
                        None => tree.widget_at(root, position),
                    }
                } else {
                    self.target(tree, controls, root, position, device)
                };
                let Some(target) = target else {
                    return out;
                };
                if button == MouseBtn::Left {
                    self.pressed_at = position;
                    self.pressed = Some(target);
                    self.dragging = false;
                    tree.set_state(target, WidgetState::PRESSED, true);
                    self.focus(tree, Some(target));
                }
                out.push(self.event(PointerKind::Pressed(button), target, position, delta));
            }
            MouseAction::Drag(MouseBtn::Left) => {
                let Some(target) = self.pressed else {
                    return out;
                };
                if !self.dragging {
                    self.dragging = true;
                    tree.set_state(target, WidgetState::DRAGGED, true);
                    out.push(self.event(PointerKind::DragStart, target, position, delta));
                }
                out.push(self.event(PointerKind::Drag, target, position, delta));
            }
            MouseAction::Drag(_) => {}
            MouseAction::Up(MouseBtn::Left) => {
                let Some(target) = self.pressed.take() else {
                    return out;
                };
                tree.set_state(target, WidgetState::PRESSED, false);
                out.push(self.event(PointerKind::Released(MouseBtn::Left), target, position, delta));
                if self.dragging {
                    self.dragging = false;
                    tree.set_state(target, WidgetState::DRAGGED, false);
                    out.push(self.event(PointerKind::DragEnd, target, position, delta));
                } else if tree.widget_at(root, position) == Some(target) {
                    let activated = tree
                        .get(target)
                        .is_some_and(|w| w.has_state(WidgetState::ACTIVATED));
                    tree.set_state(target, WidgetState::ACTIVATED, !activated);
                    out.push(self.event(PointerKind::Clicked, target, position, delta));
                }
            }
            MouseAction::Up(button) => {
                if let Some(target) = self.target(tree, controls, root, position, device_of(button)) {
                    out.push(self.event(PointerKind::Released(button), target, position, delta));
                }
            }
            MouseAction::ScrollUp | MouseAction::ScrollDown | MouseAction::ScrollLeft | MouseAction::ScrollRight => {
                let kind = match event.kind {
                    MouseAction::ScrollUp => PointerKind::ScrollUp,
                    MouseAction::ScrollDown => PointerKind::ScrollDown,
                    MouseAction::ScrollLeft => PointerKind::ScrollLeft,
                    _ => PointerKind::ScrollRight,
                };
                if let Some(target) = self.target(tree, controls, root, position, DeviceMask::MOUSE_WHEEL) {
                    out.push(self.event(kind, target, position, delta));
                }
            }
        }
        out
    }

    fn event(&self, kind: PointerKind, target: WidgetId, position: DimFloat, delta: DimFloat) -> PointerEvent {
        PointerEvent {
            kind,
            target,
            position,
            delta,
            pressed_at: self.pressed_at,
        }
    }

    /// Hit-test within the claimed owner for `device`, or from the root.
    ///
    /// A claimed device always reaches its owner, even outside its bounds.
    fn target(
        &self,
        tree: &WidgetTree,
        controls: &ControlStack,
        root: WidgetId,
        position: DimFloat,
        device: DeviceMask,
    ) -> Option<WidgetId> {
        match controls.mouse_owner(device) {
            Some(owner) if tree.contains(owner) => tree.widget_at(owner, position).or(Some(owner)),
            _ => tree.widget_at(root, position),
        }
    }

    fn hover(&mut self, tree: &mut WidgetTree, target: Option<WidgetId>) {
        if self.hovered == target {
            return;
        }
        if let Some(old) = self.hovered {
            tree.set_state(old, WidgetState::HOVERED, false);
        }
        if let Some(new) = target {
            tree.set_state(new, WidgetState::HOVERED, true);
        }
        self.hovered = target;
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::control::{ControlMode, Controller};
    use crate::tree::{Widget, WidgetKind};
    use pretty_assertions::assert_eq;

    struct Fixture {
        tree: WidgetTree,
        controls: ControlStack,
        dispatcher: InputDispatcher,
        left: WidgetId,
        right: WidgetId,
    }

    fn fixture() -> Fixture {
        let mut tree = WidgetTree::new();
        let root = tree.create(Widget::new("Root").with_kind(WidgetKind::Wedge));
        let root = tree.set_root(root);
        tree.get_mut(root).unwrap().frame.size = DimFloat::new(20.0, 10.0);
        let left = tree.create(Widget::new("Left")).id();
        let right = tree.create(Widget::new("Right")).id();
        tree.push(root, left, false);
        tree.push(root, right, false);
        tree.get_mut(left).unwrap().frame.size = DimFloat::new(10.0, 10.0);
        let frame = &mut tree.get_mut(right).unwrap().frame;
        frame.position = DimFloat::new(10.0, 0.0);
        frame.size = DimFloat::new(10.0, 10.0);
        Fixture {
            tree,
            controls: ControlStack::new(root),
            dispatcher: InputDispatcher::new(),
            left,
            right,
        }
    }

    fn mouse(kind: MouseAction, x: u16, y: u16) -> MouseEvent {
        MouseEvent::new(kind, x, y)
    }

    impl Fixture {
        fn send(&mut self, event: MouseEvent) -> Vec<PointerKind> {
            self.dispatcher
                .pointer(&event, &mut self.tree, &mut self.controls)
                .into_iter()
                .map(|e| e.kind)
                .collect()
        }

        fn state(&self, id: WidgetId) -> WidgetState {
            self.tree.get(id).unwrap().state
        }
    }

    // ── Hover ────────────────────────────────────────────────────────

    #[test]
    fn hover_moves_between_widgets() {
        let mut fx = fixture();
        fx.send(mouse(MouseAction::Moved, 2, 2));
        assert!(fx.state(fx.left).contains(WidgetState::HOVERED));

        fx.send(mouse(MouseAction::Moved, 12, 2));
        assert!(!fx.state(fx.left).contains(WidgetState::HOVERED));
        assert!(fx.state(fx.right).contains(WidgetState::HOVERED));
        assert_eq!(fx.dispatcher.hovered(), Some(fx.right));
    }

    // ── Click ────────────────────────────────────────────────────────

    #[test]
    fn click_presses_focuses_and_activates() {
        let mut fx = fixture();
        let kinds = fx.send(mouse(MouseAction::Down(MouseBtn::Left), 3, 3));
        assert_eq!(kinds, vec![PointerKind::Pressed(MouseBtn::Left)]);
        assert!(fx.state(fx.left).contains(WidgetState::PRESSED | WidgetState::FOCUSED));

        let kinds = fx.send(mouse(MouseAction::Up(MouseBtn::Left), 3, 3));
        assert_eq!(
            kinds,
            vec![PointerKind::Released(MouseBtn::Left), PointerKind::Clicked]
        );
        let state = fx.state(fx.left);
        assert!(!state.contains(WidgetState::PRESSED));
        assert!(state.contains(WidgetState::ACTIVATED));

        fx.send(mouse(MouseAction::Down(MouseBtn::Left), 3, 3));
        fx.send(mouse(MouseAction::Up(MouseBtn::Left), 3, 3));
        assert!(!fx.state(fx.left).contains(WidgetState::ACTIVATED));
    }

    #[test]
    fn focus_follows_presses() {
        let mut fx = fixture();
        fx.send(mouse(MouseAction::Down(MouseBtn::Left), 3, 3));
        fx.send(mouse(MouseAction::Up(MouseBtn::Left), 3, 3));
        fx.send(mouse(MouseAction::Down(MouseBtn::Left), 13, 3));
        assert!(!fx.state(fx.left).contains(WidgetState::FOCUSED));
        assert!(fx.state(fx.right).contains(WidgetState::FOCUSED));
        assert_eq!(fx.dispatcher.focused(), Some(fx.right));
    }

    // ── Drag ─────────────────────────────────────────────────────────

    #[test]
    fn drag_sequence() {
        let mut fx = fixture();
        fx.send(mouse(MouseAction::Down(MouseBtn::Left), 3, 3));
        let first = fx.send(mouse(MouseAction::Drag(MouseBtn::Left), 5, 3));
        assert_eq!(first, vec![PointerKind::DragStart, PointerKind::Drag]);
        assert!(fx.state(fx.left).contains(WidgetState::DRAGGED));

        let events = fx
            .dispatcher
            .pointer(&mouse(MouseAction::Drag(MouseBtn::Left), 8, 4), &mut fx.tree, &mut fx.controls);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].delta, DimFloat::new(3.0, 1.0));
        assert_eq!(events[0].pressed_at, DimFloat::new(3.0, 3.0));
        assert_eq!(events[0].target, fx.left);

        let kinds = fx.send(mouse(MouseAction::Up(MouseBtn::Left), 14, 4));
        assert_eq!(
            kinds,
            vec![PointerKind::Released(MouseBtn::Left), PointerKind::DragEnd]
        );
        assert!(!fx.state(fx.left).intersects(WidgetState::DRAGGED | WidgetState::PRESSED));
        assert!(!fx.dispatcher.is_dragging());
    }

    // ── Control stack routing ────────────────────────────────────────

    #[test]
    fn claimed_mouse_routes_to_owner() {
        let mut fx = fixture();
        let c = fx
            .controls
            .add_controller(Controller::new(ControlMode::Control));
        fx.controls.take(c, fx.right, &mut fx.tree);

        let events = fx
            .dispatcher
            .pointer(&mouse(MouseAction::Moved, 2, 2), &mut fx.tree, &mut fx.controls);
        assert_eq!(events[0].target, fx.right);
    }

    #[test]
    fn modal_outside_click_is_swallowed() {
        let mut fx = fixture();
        let c = fx.controls.add_controller(Controller::new(ControlMode::Modal));
        fx.controls.take(c, fx.right, &mut fx.tree);

        let kinds = fx.send(mouse(MouseAction::Down(MouseBtn::Left), 2, 2));
        assert!(kinds.is_empty());
        assert!(fx.controls.claims().is_empty());
        assert!(!fx.state(fx.left).contains(WidgetState::PRESSED));
    }

    #[test]
    fn control_outside_click_passes_through() {
        let mut fx = fixture();
        let c = fx
            .controls
            .add_controller(Controller::new(ControlMode::Control));
        fx.controls.take(c, fx.right, &mut fx.tree);

        let events = fx
            .dispatcher
            .pointer(&mouse(MouseAction::Down(MouseBtn::Left), 2, 2), &mut fx.tree, &mut fx.controls);
        assert_eq!(events[0].target, fx.left);
        assert_eq!(fx.controls.depth(), 2);
    }

    #[test]
    fn wheel_keeps_scroll_direction() {
        let mut fx = fixture();
        assert_eq!(fx.send(mouse(MouseAction::ScrollLeft, 1, 1)), vec![PointerKind::ScrollLeft]);
        assert_eq!(fx.send(mouse(MouseAction::ScrollRight, 1, 1)), vec![PointerKind::ScrollRight]);
        assert_eq!(fx.send(mouse(MouseAction::ScrollDown, 1, 1)), vec![PointerKind::ScrollDown]);
    }

    #[test]
    fn claim_on_destroyed_widget_falls_back_to_hit_test() {
        let mut fx = fixture();
        let root = fx.controls.root();
        let c = fx.controls.add_controller(Controller::new(ControlMode::Control));
        let right = fx.right;
        fx.controls.take(c, right, &mut fx.tree);
        fx.tree.remove(root, right);
        let routed = fx
            .dispatcher
            .pointer(&mouse(MouseAction::Moved, 1, 1), &mut fx.tree, &mut fx.controls);
        assert_eq!(routed.len(), 1);
        assert_eq!(routed[0].target, fx.left);
    }

    #[test]
    fn prune_forgets_destroyed_widgets() {
        let mut fx = fixture();
        let root = fx.controls.root();
        let panel = fx
            .tree
            .create(Widget::new("Panel").with_kind(WidgetKind::Container))
            .id();
        fx.tree.push(root, panel, false);
        fx.tree.get_mut(panel).unwrap().frame.size = DimFloat::new(5.0, 5.0);
        let item = fx.tree.create(Widget::new("Item"));
        let item = fx.tree.append(panel, item);
        fx.tree.get_mut(item).unwrap().frame.size = DimFloat::new(5.0, 5.0);

        fx.send(mouse(MouseAction::Moved, 1, 1));
        assert_eq!(fx.dispatcher.hovered(), Some(item));

        fx.tree.clear(panel);
        fx.dispatcher.prune(&fx.tree);
        assert_eq!(fx.dispatcher.hovered(), None);
    }
}
