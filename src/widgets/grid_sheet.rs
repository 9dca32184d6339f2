//! A container whose children can be resized by dragging the gaps between them.

use crate::geometry::{DimFloat, Dimension};
use crate::input::{PointerEvent, PointerKind};
use crate::tree::{transfer_pixel_span, Widget, WidgetId, WidgetTree};

/// Drag-resize behaviour for a container laid out along `dim`.
///
/// Dragging starts on the sheet itself (the gaps between its children). The
/// first child at or past the press position and the child before it then
/// trade span as the pointer moves.
#[derive(Debug, Clone)]
pub struct GridSheet {
    id: WidgetId,
    dim: Dimension,
    drag: Option<(WidgetId, WidgetId)>,
}

impl GridSheet {
    /// The widget record for a grid sheet.
    pub fn widget(style: impl Into<String>) -> Widget {
        super::container(style)
    }

    /// Attach drag behaviour to the container `id`.
    pub fn new(id: WidgetId, dim: Dimension) -> Self {
        Self { id, dim, drag: None }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn dim(&self) -> Dimension {
        self.dim
    }

    /// The `(prev, next)` pair being resized, if a drag is in progress.
    pub fn dragging(&self) -> Option<(WidgetId, WidgetId)> {
        self.drag
    }

    /// Pick the pair of children around `pressed_at` (root coordinates).
    pub fn drag_start(&mut self, tree: &WidgetTree, pressed_at: DimFloat) {
        let pos = pressed_at[self.dim];
        let contents = tree.contents(self.id);
        self.drag = contents
            .iter()
            .position(|&child| tree.absolute_position(child)[self.dim] >= pos)
            .filter(|&index| index > 0)
            .map(|index| (contents[index - 1], contents[index]));
        tracing::trace!(sheet = ?self.id, pair = ?self.drag, "grid drag start");
    }

    /// Move `delta` pixels of span from the next child to the previous one.
    ///
    /// Returns `false` when no pair was picked at drag start.
    pub fn drag(&mut self, tree: &mut WidgetTree, delta: DimFloat) -> bool {
        let Some((prev, next)) = self.drag else {
            return false;
        };
        let (Some(prev_widget), Some(next_widget)) = (tree.get(prev), tree.get(next)) else {
            self.drag = None;
            return false;
        };
        let (mut prev_frame, mut next_frame) = (prev_widget.frame.clone(), next_widget.frame.clone());

        // Pixels per unit of span across the stripe.
        let total_span: f32 = tree
            .contents(self.id)
            .iter()
            .filter_map(|&child| tree.get(child))
            .map(|child| child.frame.span[self.dim])
            .sum();
        let size = tree.get(self.id).map_or(0.0, |sheet| sheet.frame.size[self.dim]);
        let extent = if total_span > 0.0 { size / total_span } else { 0.0 };

        transfer_pixel_span(&mut prev_frame, &mut next_frame, self.dim, delta[self.dim], extent);
        if let Some(widget) = tree.get_mut(prev) {
            widget.frame = prev_frame;
        }
        if let Some(widget) = tree.get_mut(next) {
            widget.frame = next_frame;
        }
        true
    }

    /// Feed a routed pointer event; returns whether the sheet used it.
    pub fn handle(&mut self, tree: &mut WidgetTree, event: &PointerEvent) -> bool {
        if event.target != self.id {
            return false;
        }
        match event.kind {
            PointerKind::DragStart => {
                self.drag_start(tree, event.pressed_at);
                true
            }
            PointerKind::Drag => self.drag(tree, event.delta),
            PointerKind::DragEnd => {
                self.drag = None;
                true
            }
            _ => false,
        }
    }
}
