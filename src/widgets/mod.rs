//! Built-in widget families: Sheet, Container, Overlay, Decal, Spacer, Filler, GridSheet.
//!
//! Each constructor returns a [`Widget`] record with the kind and frame type
//! of its family, ready for [`WidgetTree::create`](crate::tree::WidgetTree::create).

pub mod grid_sheet;

pub use grid_sheet::GridSheet;

use crate::tree::{FrameType, Widget, WidgetKind};

/// A wedge laid out in its parent's flow.
pub fn sheet(style: impl Into<String>) -> Widget {
    Widget::new(style).with_kind(WidgetKind::Wedge)
}

/// A container owning its contents, laid out in its parent's flow.
pub fn container(style: impl Into<String>) -> Widget {
    Widget::new(style).with_kind(WidgetKind::Container)
}

/// A container on its own layer, positioned independently of its siblings.
pub fn overlay(style: impl Into<String>) -> Widget {
    container(style).with_frame_type(FrameType::Layer)
}

/// A wedge on its own layer.
pub fn decal(style: impl Into<String>) -> Widget {
    sheet(style).with_frame_type(FrameType::Layer)
}

/// A leaf that only takes up space.
pub fn spacer(style: impl Into<String>) -> Widget {
    Widget::new(style).with_frame_type(FrameType::Spacer)
}

/// A spacer drawn with the `Filler` style.
pub fn filler() -> Widget {
    spacer("Filler")
}
