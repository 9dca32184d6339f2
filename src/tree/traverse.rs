//! Tree traversals: per-tick update, per-frame render, visiting and hit tests.

use super::frame::Dirty;
use super::node::{FrameType, Widget, WidgetId};
use super::arena::WidgetTree;
use crate::geometry::DimFloat;
use crate::render::Renderer;
use crate::style::Styler;

impl WidgetTree {
    /// Advance `id` and then every structural descendant by one tick.
    ///
    /// A widget always updates before its children, and siblings update in
    /// structural index order.
    pub fn next_frame(&mut self, id: WidgetId, tick: usize, delta: usize) {
        let Some(widget) = self.widgets.get_mut(id) else {
            return;
        };
        widget.frame.next_frame(tick, delta);
        let mut index = 0;
        while let Some(&child) = self.contents(id).get(index) {
            self.next_frame(child, tick, delta);
            index += 1;
        }
    }

    /// Paint `id` and its visible structural descendants.
    ///
    /// A layer frame requesting a forced redraw forces it for its whole
    /// subtree for this pass; the request is consumed.
    pub fn render(&mut self, id: WidgetId, styler: &Styler, renderer: &mut dyn Renderer) {
        let origin = self
            .parent(id)
            .map_or(DimFloat::ZERO, |parent| self.absolute_position(parent));
        self.render_widget(id, origin, styler, renderer, false);
    }

    fn render_widget(
        &mut self,
        id: WidgetId,
        parent_origin: DimFloat,
        styler: &Styler,
        renderer: &mut dyn Renderer,
        mut force: bool,
    ) {
        let Some(widget) = self.widgets.get_mut(id) else {
            return;
        };
        if widget.frame_type == FrameType::Layer && widget.frame.force_redraw {
            widget.frame.force_redraw = false;
            force = true;
        }

        let widget = &self.widgets[id];
        let origin = parent_origin + widget.frame.position;
        renderer.begin_draw(id, &widget.frame, origin, force);
        renderer.draw(
            id,
            &widget.frame,
            origin,
            styler.resolve(&widget.style, widget.state),
            force,
        );

        let mut index = 0;
        while let Some(&child) = self.contents(id).get(index) {
            if !self.widgets[child].frame.hidden {
                self.render_widget(child, origin, styler, renderer, force);
            }
            index += 1;
        }

        renderer.end_draw(id, &self.widgets[id].frame);
    }

    /// Depth-first visit of `id`'s structural subtree.
    ///
    /// When `visitor` returns `false` the node's descendants are skipped;
    /// its siblings are still visited.
    pub fn visit<F>(&self, id: WidgetId, mut visitor: F)
    where
        F: FnMut(WidgetId, &Widget) -> bool,
    {
        self.visit_with(id, &mut visitor);
    }

    fn visit_with(&self, id: WidgetId, visitor: &mut dyn FnMut(WidgetId, &Widget) -> bool) {
        let Some(widget) = self.widgets.get(id) else {
            return;
        };
        if !visitor(id, widget) {
            return;
        }
        for &child in self.contents(id) {
            self.visit_with(child, visitor);
        }
    }

    /// Pre-order list of `id`'s structural subtree.
    pub fn walk(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut order = Vec::new();
        self.visit(id, |child, _| {
            order.push(child);
            true
        });
        order
    }

    /// Position of `id`'s top-left corner relative to the root.
    pub fn absolute_position(&self, id: WidgetId) -> DimFloat {
        let mut position = DimFloat::ZERO;
        let mut current = Some(id);
        while let Some(widget_id) = current {
            if let Some(widget) = self.widgets.get(widget_id) {
                position = position + widget.frame.position;
            }
            current = self.parent(widget_id);
        }
        position
    }

    /// The deepest visible, non-spacer widget under `point`, searching from `root`.
    ///
    /// Later siblings win over earlier ones, matching paint order.
    pub fn widget_at(&self, root: WidgetId, point: DimFloat) -> Option<WidgetId> {
        let mut hit = None;
        self.visit(root, |id, widget| {
            if widget.frame.hidden {
                return false;
            }
            let local = point - self.absolute_position(id);
            if !widget.frame.inside(local) {
                return false;
            }
            if widget.frame_type != FrameType::Spacer {
                hit = Some(id);
            }
            true
        });
        hit
    }

    /// Mark widgets whose style was reparsed since the last sync.
    ///
    /// Returns how many widgets were stale.
    pub fn sync_styles(&mut self, styler: &Styler) -> usize {
        let mut stale = 0;
        for (_, widget) in self.widgets.iter_mut() {
            let updated = styler.style(&widget.style).updated();
            if updated != widget.style_version {
                widget.style_version = updated;
                widget.frame.mark_dirty(Dirty::LAYOUT);
                stale += 1;
            }
        }
        stale
    }
}
