//! Widget tree: arena storage with structural and logical hierarchies.

pub mod arena;
pub mod frame;
pub mod node;
pub mod traverse;

pub use arena::WidgetTree;
pub use frame::{transfer_pixel_span, Dirty, Frame};
pub use node::{Detached, FrameType, Widget, WidgetId, WidgetKind};
