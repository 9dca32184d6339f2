//! Input events, key bindings, the control stack and pointer dispatch.

pub mod binding;
pub mod control;
pub mod dispatch;
pub mod event;

pub use binding::{BindingAction, KeyBindings};
pub use control::{
    Claim, ClickOutcome, ControlMode, ControlStack, Controller, ControllerId, DeviceMask,
    KeyOutcome,
};
pub use dispatch::{InputDispatcher, PointerEvent, PointerKind};
pub use event::{InputEvent, Key, KeyEvent, KeyKind, Modifiers, MouseAction, MouseBtn, MouseEvent};
