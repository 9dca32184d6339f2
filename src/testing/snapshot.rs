//! Snapshot rendering helpers.
//!
//! [`RecordingRenderer`] captures every begin/draw/end call of a render pass;
//! [`RecordingRenderer::trace`] turns them into indented text suitable for
//! snapshot assertions.

use crate::geometry::DimFloat;
use crate::render::Renderer;
use crate::style::{Skin, Styler};
use crate::tree::{Frame, WidgetId, WidgetTree};

// ---------------------------------------------------------------------------
// RecordingRenderer
// ---------------------------------------------------------------------------

/// Which renderer method was called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Begin,
    Draw,
    End,
}

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCall {
    pub kind: CallKind,
    pub id: WidgetId,
    /// Absolute origin; zero for `End` calls.
    pub origin: DimFloat,
    pub force: bool,
    /// The resolved skin, for `Draw` calls.
    pub skin: Option<Skin>,
}

/// A [`Renderer`] that only records what it is asked to do.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Widgets drawn, in paint order.
    pub fn drawn(&self) -> Vec<WidgetId> {
        self.calls
            .iter()
            .filter(|call| call.kind == CallKind::Draw)
            .map(|call| call.id)
            .collect()
    }

    /// Render the recorded calls as text, one call per line, labelled by style
    /// name and indented by nesting depth.
    pub fn trace(&self, tree: &WidgetTree) -> String {
        let mut lines = Vec::with_capacity(self.calls.len());
        let mut depth = 0usize;
        for call in &self.calls {
            let label = tree
                .get(call.id)
                .map_or("<gone>", |widget| widget.style.as_str());
            let (verb, indent) = match call.kind {
                CallKind::Begin => {
                    depth += 1;
                    ("begin", depth - 1)
                }
                CallKind::Draw => ("draw", depth.saturating_sub(1)),
                CallKind::End => {
                    depth = depth.saturating_sub(1);
                    ("end", depth)
                }
            };
            lines.push(format!("{}{verb} {label}", "  ".repeat(indent)));
        }
        lines.join("\n")
    }
}

impl Renderer for RecordingRenderer {
    fn begin_draw(&mut self, id: WidgetId, _frame: &Frame, origin: DimFloat, force: bool) {
        self.calls.push(RenderCall {
            kind: CallKind::Begin,
            id,
            origin,
            force,
            skin: None,
        });
    }

    fn draw(&mut self, id: WidgetId, _frame: &Frame, origin: DimFloat, skin: &Skin, force: bool) {
        self.calls.push(RenderCall {
            kind: CallKind::Draw,
            id,
            origin,
            force,
            skin: Some(skin.clone()),
        });
    }

    fn end_draw(&mut self, id: WidgetId, _frame: &Frame) {
        self.calls.push(RenderCall {
            kind: CallKind::End,
            id,
            origin: DimFloat::ZERO,
            force: false,
            skin: None,
        });
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render `root` into a fresh [`RecordingRenderer`] and return its trace.
pub fn render_trace(tree: &mut WidgetTree, root: WidgetId, styler: &Styler) -> String {
    let mut recorder = RecordingRenderer::default();
    tree.render(root, styler, &mut recorder);
    recorder.trace(tree)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Widget, WidgetKind};

    #[test]
    fn single_widget_trace() {
        let mut tree = WidgetTree::new();
        let root = tree.create(Widget::new("Label"));
        let root = tree.set_root(root);
        assert_eq!(
            render_trace(&mut tree, root, &Styler::default()),
            "begin Label\ndraw Label\nend Label"
        );
    }

    #[test]
    fn drawn_lists_paint_order() {
        let mut tree = WidgetTree::new();
        let root = tree.create(Widget::new("Root").with_kind(WidgetKind::Wedge));
        let root = tree.set_root(root);
        let child = tree.create(Widget::new("Child")).id();
        tree.push(root, child, false);

        let mut recorder = RecordingRenderer::default();
        tree.render(root, &Styler::default(), &mut recorder);
        assert_eq!(recorder.drawn(), vec![root, child]);
        assert_eq!(recorder.calls().len(), 6);
        recorder.clear();
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn trace_survives_destroyed_widgets() {
        let mut tree = WidgetTree::new();
        let widget = tree.create(Widget::new("Gone"));
        let id = widget.id();
        let mut recorder = RecordingRenderer::default();
        recorder.begin_draw(id, &Frame::default(), DimFloat::ZERO, false);
        tree.destroy(widget);
        assert_eq!(recorder.trace(&tree), "begin <gone>");
    }
}
