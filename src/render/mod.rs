//! Rendering collaborator seam and the crossterm backend.
//!
//! The widget tree never rasterizes anything itself: each render pass calls
//! into a [`Renderer`] with begin/draw/end brackets per widget. Children are
//! drawn between their parent's `begin_draw` and `end_draw`, so a backend can
//! maintain a clip stack.

pub mod driver;

pub use driver::TerminalRenderer;

use crate::geometry::DimFloat;
use crate::style::Skin;
use crate::tree::{Frame, WidgetId};

/// Backend invoked by [`WidgetTree::render`](crate::tree::WidgetTree::render).
pub trait Renderer {
    /// Open the paint scope of a widget whose top-left corner sits at the
    /// absolute position `origin`. `force` requests a full redraw.
    fn begin_draw(&mut self, id: WidgetId, frame: &Frame, origin: DimFloat, force: bool);

    /// Draw the widget's resolved skin.
    fn draw(&mut self, id: WidgetId, frame: &Frame, origin: DimFloat, skin: &Skin, force: bool);

    /// Close the paint scope opened by the matching `begin_draw`.
    fn end_draw(&mut self, id: WidgetId, frame: &Frame);
}
