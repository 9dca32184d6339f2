//! TaffyTree wrapper for layout computation.
//!
//! [`LayoutEngine`] mirrors the structural widget tree into a taffy tree,
//! runs layout, and writes positions and sizes back into each widget's frame.

use std::collections::{HashMap, HashSet};

use taffy::geometry::Size;
use taffy::prelude::{AvailableSpace, FromLength, NodeId, TaffyAuto, TaffyTree};
use taffy::style::Dimension;

use crate::geometry::DimFloat;
use crate::style::values::Direction;
use crate::style::Styler;
use crate::tree::{WidgetId, WidgetTree};

use super::resolve::resolve_style;

/// Errors raised by the layout tree.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("layout tree error: {0}")]
    Taffy(#[from] taffy::TaffyError),
}

/// Wraps a [`TaffyTree`] and maintains a mapping from [`WidgetId`]s to taffy
/// node ids.
pub struct LayoutEngine {
    tree: TaffyTree<WidgetId>,
    node_map: HashMap<WidgetId, NodeId>,
    root: Option<(WidgetId, NodeId)>,
    viewport: DimFloat,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self {
            tree: TaffyTree::new(),
            node_map: HashMap::new(),
            root: None,
            viewport: DimFloat::ZERO,
        }
    }

    /// Number of mirrored widgets.
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }

    /// Synchronize the taffy tree with the structural tree under `root`.
    ///
    /// Stale nodes are removed, every live widget gets a freshly resolved
    /// style, and parent/child links are rebuilt in structural order. A root
    /// without a fixed size fills the viewport.
    pub fn sync_tree(
        &mut self,
        widgets: &WidgetTree,
        styler: &Styler,
        root: WidgetId,
        viewport: DimFloat,
    ) -> Result<(), LayoutError> {
        let live = widgets.walk(root);
        let live_set: HashSet<WidgetId> = live.iter().copied().collect();

        let stale: Vec<WidgetId> = self
            .node_map
            .keys()
            .filter(|id| !live_set.contains(id))
            .copied()
            .collect();
        for id in stale {
            if let Some(node) = self.node_map.remove(&id) {
                self.tree.remove(node)?;
            }
        }

        for &id in &live {
            let Some(widget) = widgets.get(id) else {
                continue;
            };
            let parent_direction = widgets
                .parent(id)
                .and_then(|parent| widgets.get(parent))
                .map_or(Direction::Reading, |parent| {
                    styler.style(&parent.style).layout().direction
                });
            let layout = styler.style(&widget.style).layout();
            let mut style = resolve_style(layout, widget.frame_type, &widget.frame, parent_direction);
            if id == root {
                if style.size.width == Dimension::AUTO {
                    style.size.width = Dimension::from_length(viewport.x);
                }
                if style.size.height == Dimension::AUTO {
                    style.size.height = Dimension::from_length(viewport.y);
                }
            }

            match self.node_map.get(&id) {
                Some(&node) => self.tree.set_style(node, style)?,
                None => {
                    let node = self.tree.new_leaf_with_context(style, id)?;
                    self.node_map.insert(id, node);
                }
            }
        }

        for &id in &live {
            let children: Vec<NodeId> = widgets
                .contents(id)
                .iter()
                .filter_map(|child| self.node_map.get(child).copied())
                .collect();
            if let Some(&node) = self.node_map.get(&id) {
                self.tree.set_children(node, &children)?;
            }
        }

        self.root = self.node_map.get(&root).map(|&node| (root, node));
        self.viewport = viewport;
        Ok(())
    }

    /// Run taffy layout on the synced root.
    pub fn compute(&mut self) -> Result<(), LayoutError> {
        if let Some((_, node)) = self.root {
            self.tree.compute_layout(
                node,
                Size {
                    width: AvailableSpace::Definite(self.viewport.x),
                    height: AvailableSpace::Definite(self.viewport.y),
                },
            )?;
        }
        Ok(())
    }

    /// Position (relative to the parent) and size computed for `id`.
    pub fn get_layout(&self, id: WidgetId) -> Option<(DimFloat, DimFloat)> {
        let node = self.node_map.get(&id)?;
        let layout = self.tree.layout(*node).ok()?;
        Some((
            DimFloat::new(layout.location.x, layout.location.y),
            DimFloat::new(layout.size.width, layout.size.height),
        ))
    }

    /// Copy computed geometry into frames and clear their dirty flags.
    pub fn apply(&self, widgets: &mut WidgetTree) {
        for &id in self.node_map.keys() {
            let Some((position, size)) = self.get_layout(id) else {
                continue;
            };
            if let Some(widget) = widgets.get_mut(id) {
                widget.frame.position = position;
                widget.frame.size = size;
                widget.frame.clear_dirty();
            }
        }
    }

    /// Sync, compute and apply when anything under `root` is dirty or the
    /// viewport changed. Returns whether a layout pass ran.
    pub fn layout(
        &mut self,
        widgets: &mut WidgetTree,
        styler: &Styler,
        root: WidgetId,
        viewport: DimFloat,
    ) -> Result<bool, LayoutError> {
        let same_root = self.root.is_some_and(|(id, _)| id == root);
        let dirty = widgets
            .walk(root)
            .into_iter()
            .any(|id| widgets.get(id).is_some_and(|w| !w.frame.dirty().is_empty()));
        if same_root && !dirty && viewport == self.viewport {
            return Ok(false);
        }
        self.sync_tree(widgets, styler, root, viewport)?;
        self.compute()?;
        self.apply(widgets);
        tracing::trace!(nodes = self.node_map.len(), "layout computed");
        Ok(true)
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{FrameType, Widget, WidgetKind};

    const VP: DimFloat = DimFloat::new(80.0, 24.0);

    fn styler(source: &str) -> Styler {
        let mut styler = Styler::default();
        styler.load_str(source).unwrap();
        styler
    }

    /// Root wedge with two leaf children.
    fn simple_tree() -> (WidgetTree, WidgetId, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.create(Widget::new("Root").with_kind(WidgetKind::Wedge));
        let root = tree.set_root(root);
        let a = tree.create(Widget::new("A")).id();
        let b = tree.create(Widget::new("B")).id();
        tree.push(root, a, false);
        tree.push(root, b, false);
        (tree, root, a, b)
    }

    #[test]
    fn new_engine_is_empty() {
        let engine = LayoutEngine::new();
        assert!(engine.is_empty());
        assert!(engine.root.is_none());
    }

    #[test]
    fn sync_with_children() {
        let (tree, root, a, b) = simple_tree();
        let mut engine = LayoutEngine::new();
        engine.sync_tree(&tree, &Styler::default(), root, VP).unwrap();
        assert_eq!(engine.len(), 3);
        assert!(engine.node_map.contains_key(&a));
        assert!(engine.node_map.contains_key(&b));
        let taffy_root = engine.node_map[&root];
        assert_eq!(engine.tree.children(taffy_root).unwrap().len(), 2);
    }

    #[test]
    fn root_fills_viewport_and_children_share_span() {
        let (mut tree, root, a, b) = simple_tree();
        let mut engine = LayoutEngine::new();
        let ran = engine.layout(&mut tree, &Styler::default(), root, VP).unwrap();
        assert!(ran);

        assert_eq!(tree.get(root).unwrap().frame.size, VP);
        let fa = &tree.get(a).unwrap().frame;
        let fb = &tree.get(b).unwrap().frame;
        assert_eq!(fa.size, DimFloat::new(40.0, 24.0));
        assert_eq!(fb.position, DimFloat::new(40.0, 0.0));
        assert!(fa.dirty().is_empty());
    }

    #[test]
    fn paragraph_with_fixed_heights() {
        let styler = styler(
            "Root:\n  direction: PARAGRAPH\nA:\n  space: BLOCK\n  size: 0, 10\nB:\n  space: BLOCK\n  size: 0, 14\n",
        );
        let (mut tree, root, a, b) = simple_tree();
        let mut engine = LayoutEngine::new();
        engine.layout(&mut tree, &styler, root, VP).unwrap();

        let (pa, sa) = engine.get_layout(a).unwrap();
        assert_eq!(pa.y, 0.0);
        assert_eq!(sa.y, 10.0);
        let (pb, sb) = engine.get_layout(b).unwrap();
        assert_eq!(pb.y, 10.0);
        assert_eq!(sb.y, 14.0);
    }

    #[test]
    fn frame_span_weights_growth() {
        let (mut tree, root, a, b) = simple_tree();
        tree.get_mut(a).unwrap().frame.span = DimFloat::new(3.0, 1.0);
        let mut engine = LayoutEngine::new();
        engine.layout(&mut tree, &Styler::default(), root, VP).unwrap();
        assert_eq!(tree.get(a).unwrap().frame.size.x, 60.0);
        assert_eq!(tree.get(b).unwrap().frame.size.x, 20.0);
    }

    #[test]
    fn layers_keep_their_position() {
        let (mut tree, root, _, _) = simple_tree();
        let layer = tree
            .create(Widget::new("Popup").with_frame_type(FrameType::Layer))
            .id();
        tree.push(root, layer, false);
        tree.get_mut(layer).unwrap().frame.position = DimFloat::new(4.0, 2.0);

        let styler = styler("Popup:\n  space: BLOCK\n  size: 10, 5\n");
        let mut engine = LayoutEngine::new();
        engine.layout(&mut tree, &styler, root, VP).unwrap();
        let frame = &tree.get(layer).unwrap().frame;
        assert_eq!(frame.position, DimFloat::new(4.0, 2.0));
        assert_eq!(frame.size, DimFloat::new(10.0, 5.0));
    }

    #[test]
    fn clean_tree_skips_layout() {
        let (mut tree, root, a, _) = simple_tree();
        let styler = Styler::default();
        let mut engine = LayoutEngine::new();
        assert!(engine.layout(&mut tree, &styler, root, VP).unwrap());
        assert!(!engine.layout(&mut tree, &styler, root, VP).unwrap());

        tree.get_mut(a).unwrap().frame.set_span(crate::geometry::Dimension::DimX, 2.0);
        assert!(engine.layout(&mut tree, &styler, root, VP).unwrap());
        assert!(engine.layout(&mut tree, &styler, root, DimFloat::new(100.0, 24.0)).unwrap());
    }

    #[test]
    fn removed_widgets_are_dropped() {
        let (mut tree, root, a, _) = simple_tree();
        let mut engine = LayoutEngine::new();
        engine.layout(&mut tree, &Styler::default(), root, VP).unwrap();
        tree.remove(root, a);
        engine.sync_tree(&tree, &Styler::default(), root, VP).unwrap();
        assert_eq!(engine.len(), 2);
        assert!(engine.get_layout(a).is_none());
    }
}
