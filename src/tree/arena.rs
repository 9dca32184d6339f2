//! Structural and logical tree operations.
//!
//! Every widget lives in one arena. Two independent sequences hang off it:
//! a wedge's structural `contents` (placement, traversal and paint order) and
//! a container's logical `container_contents` (ownership). A container places
//! its logical children into the structural contents of its target wedge,
//! which is the container itself unless redirected.

use slotmap::{SecondaryMap, SlotMap};

use super::frame::Dirty;
use super::node::{Detached, Widget, WidgetId, WidgetKind};
use crate::style::WidgetState;

/// Empty slice constant for returning when a widget has no children.
const EMPTY_CHILDREN: &[WidgetId] = &[];

/// A structural bind postponed until the current traversal completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DeferredBind {
    parent: WidgetId,
    widget: WidgetId,
    /// `None` appends.
    index: Option<usize>,
}

/// The widget tree, backed by a slotmap arena.
///
/// Structural misuse (removing a widget through a parent that does not hold
/// it, out-of-range indices, placing a widget twice) is a programming error
/// and panics.
#[derive(Debug, Default)]
pub struct WidgetTree {
    pub(crate) widgets: SlotMap<WidgetId, Widget>,
    parent: SecondaryMap<WidgetId, WidgetId>,
    contents: SecondaryMap<WidgetId, Vec<WidgetId>>,
    container_contents: SecondaryMap<WidgetId, Vec<WidgetId>>,
    container: SecondaryMap<WidgetId, WidgetId>,
    container_target: SecondaryMap<WidgetId, WidgetId>,
    deferred: Vec<DeferredBind>,
    root: Option<WidgetId>,
}

impl WidgetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Allocate a widget that is neither placed nor owned by a container.
    pub fn create(&mut self, widget: Widget) -> Detached {
        let kind = widget.kind;
        let id = self.widgets.insert(widget);
        if kind.is_wedge() {
            self.contents.insert(id, Vec::new());
        }
        if kind == WidgetKind::Container {
            self.container_contents.insert(id, Vec::new());
        }
        Detached(id)
    }

    /// Make `widget` the root of the tree. The tree keeps ownership of it.
    pub fn set_root(&mut self, widget: Detached) -> WidgetId {
        let id = widget.0;
        assert!(
            !self.parent.contains_key(id),
            "root widget cannot have a structural parent"
        );
        self.root = Some(id);
        id
    }

    /// The root widget, if set.
    pub fn root(&self) -> Option<WidgetId> {
        self.root
    }

    /// Destroy a widget that no container owns, along with everything it owns.
    ///
    /// Structural children owned by some other container are only unbound.
    pub fn destroy(&mut self, widget: Detached) {
        let id = widget.0;
        if let Some(parent) = self.parent.get(id).copied() {
            self.unbind(parent, id);
        }
        self.discard(id);
    }

    fn discard(&mut self, id: WidgetId) {
        if let Some(owned) = self.container_contents.remove(id) {
            for child in owned {
                self.container.remove(child);
                if let Some(parent) = self.parent.get(child).copied() {
                    self.unbind(parent, child);
                }
                self.discard(child);
            }
        }
        if let Some(placed) = self.contents.remove(id) {
            for child in placed {
                self.parent.remove(child);
                if let Some(widget) = self.widgets.get_mut(child) {
                    widget.index = 0;
                }
                if !self.container.contains_key(child) {
                    self.discard(child);
                }
            }
        }
        self.parent.remove(id);
        self.container.remove(id);
        self.container_target.remove(id);
        self.widgets.remove(id);
        if self.root == Some(id) {
            self.root = None;
        }
    }

    // -----------------------------------------------------------------------
    // Structural placement (Wedge)
    // -----------------------------------------------------------------------

    /// Append `widget` to `parent`'s structural contents.
    ///
    /// A deferred push takes effect at the next [`apply_deferred`](Self::apply_deferred).
    pub fn push(&mut self, parent: WidgetId, widget: WidgetId, deferred: bool) {
        if deferred {
            self.deferred.push(DeferredBind {
                parent,
                widget,
                index: None,
            });
            return;
        }
        let index = self.contents(parent).len();
        self.bind(parent, widget, index);
    }

    /// Insert `widget` at `index` in `parent`'s structural contents.
    pub fn insert(&mut self, parent: WidgetId, widget: WidgetId, index: usize, deferred: bool) {
        if deferred {
            self.deferred.push(DeferredBind {
                parent,
                widget,
                index: Some(index),
            });
            return;
        }
        self.bind(parent, widget, index);
    }

    /// Unbind `widget` from `parent`'s structural contents.
    ///
    /// A widget some container owns stays alive in that container; one that
    /// only had structural placement is destroyed.
    pub fn remove(&mut self, parent: WidgetId, widget: WidgetId) {
        self.unbind(parent, widget);
        if !self.container.contains_key(widget) {
            self.discard(widget);
        }
    }

    fn unbind(&mut self, parent: WidgetId, widget: WidgetId) {
        assert_eq!(
            self.parent.get(widget),
            Some(&parent),
            "widget is not a structural child of this parent"
        );
        let index = self.widgets[widget].index;
        let contents = self.wedge_contents_mut(parent);
        contents.remove(index);
        self.parent.remove(widget);
        self.widgets[widget].index = 0;
        let end = self.contents(parent).len();
        self.reindex(parent, index, end);
        self.widgets[parent].frame.mark_dirty(Dirty::MAPPING);
    }

    /// Move the structural child at `from` so it ends up at `to`.
    pub fn move_child(&mut self, parent: WidgetId, from: usize, to: usize) {
        let contents = self.wedge_contents_mut(parent);
        assert!(
            from < contents.len() && to < contents.len(),
            "move out of range: {from} -> {to} in {} children",
            contents.len()
        );
        let widget = contents.remove(from);
        contents.insert(to, widget);
        self.reindex(parent, from.min(to), from.max(to) + 1);
        self.widgets[parent].frame.mark_dirty(Dirty::MAPPING);
    }

    /// Exchange the structural children at `from` and `to`.
    pub fn swap(&mut self, parent: WidgetId, from: usize, to: usize) {
        let contents = self.wedge_contents_mut(parent);
        assert!(
            from < contents.len() && to < contents.len(),
            "swap out of range: {from} <-> {to} in {} children",
            contents.len()
        );
        contents.swap(from, to);
        self.reindex(parent, from.min(to), from.max(to) + 1);
        self.widgets[parent].frame.mark_dirty(Dirty::MAPPING);
    }

    fn bind(&mut self, parent: WidgetId, widget: WidgetId, index: usize) {
        assert!(self.widgets.contains_key(widget), "widget does not exist");
        assert!(
            !self.parent.contains_key(widget),
            "widget is already placed structurally"
        );
        assert!(
            widget != parent && !self.is_ancestor(widget, parent),
            "cannot place a widget inside itself"
        );
        let contents = self.wedge_contents_mut(parent);
        assert!(
            index <= contents.len(),
            "insert index {index} out of range for {} children",
            contents.len()
        );
        contents.insert(index, widget);
        self.parent.insert(widget, parent);
        let end = self.contents(parent).len();
        self.reindex(parent, index, end);
        self.widgets[widget].frame.mark_dirty(Dirty::all());
        self.widgets[parent].frame.mark_dirty(Dirty::MAPPING);
    }

    /// Rewrite the index of the structural children in `start..end`.
    fn reindex(&mut self, parent: WidgetId, start: usize, end: usize) {
        let Some(contents) = self.contents.get(parent) else {
            return;
        };
        for (index, &child) in contents.iter().enumerate().take(end).skip(start) {
            self.widgets[child].index = index;
        }
    }

    fn wedge_contents_mut(&mut self, parent: WidgetId) -> &mut Vec<WidgetId> {
        match self.contents.get_mut(parent) {
            Some(contents) => contents,
            None => panic!("widget is not a wedge and has no structural contents"),
        }
    }

    // -----------------------------------------------------------------------
    // Deferred binds
    // -----------------------------------------------------------------------

    /// Number of binds waiting for [`apply_deferred`](Self::apply_deferred).
    pub fn deferred_len(&self) -> usize {
        self.deferred.len()
    }

    /// Apply every deferred push/insert in the order it was requested.
    ///
    /// Binds whose widgets were destroyed or placed in the meantime are
    /// dropped; indices past the end append.
    pub fn apply_deferred(&mut self) {
        if self.deferred.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.deferred);
        let count = pending.len();
        for bind in pending {
            if !self.widgets.contains_key(bind.widget) || !self.contents.contains_key(bind.parent) {
                tracing::debug!(?bind, "deferred bind dropped: widget gone");
                continue;
            }
            if self.parent.contains_key(bind.widget) {
                tracing::debug!(?bind, "deferred bind dropped: widget already placed");
                continue;
            }
            let len = self.contents(bind.parent).len();
            let index = bind.index.map_or(len, |index| index.min(len));
            self.bind(bind.parent, bind.widget, index);
        }
        tracing::trace!(count, "deferred tree operations flushed");
    }

    // -----------------------------------------------------------------------
    // Logical ownership (Container)
    // -----------------------------------------------------------------------

    /// Take ownership of `widget` at the end of `container`'s logical contents.
    pub fn append(&mut self, container: WidgetId, widget: Detached) -> WidgetId {
        let index = self.container_contents(container).len();
        self.insert_content(container, widget, index)
    }

    /// Take ownership of `widget` at `index` in `container`'s logical contents.
    ///
    /// A widget without a structural parent is also placed into the
    /// container's target wedge; one already placed elsewhere stays put.
    pub fn insert_content(&mut self, container: WidgetId, widget: Detached, index: usize) -> WidgetId {
        let id = widget.0;
        assert!(
            self.container_contents.contains_key(container),
            "widget is not a container"
        );
        assert!(
            index <= self.container_contents[container].len(),
            "content index {index} out of range"
        );
        if !self.parent.contains_key(id) {
            let target = self.container_target(container);
            let placed = index.min(self.contents(target).len());
            self.bind(target, id, placed);
        }
        self.container.insert(id, container);
        self.container_contents[container].insert(index, id);
        id
    }

    /// Give up ownership of `widget`, unbinding it from wherever it is placed.
    pub fn release(&mut self, container: WidgetId, widget: WidgetId) -> Detached {
        assert_eq!(
            self.container.get(widget),
            Some(&container),
            "widget is not held by this container"
        );
        if let Some(parent) = self.parent.get(widget).copied() {
            self.unbind(parent, widget);
        }
        self.container.remove(widget);
        self.container_contents[container].retain(|&child| child != widget);
        Detached(widget)
    }

    /// Unbind and destroy every widget `container` owns.
    pub fn clear(&mut self, container: WidgetId) {
        let owned = match self.container_contents.get_mut(container) {
            Some(owned) => std::mem::take(owned),
            None => panic!("widget is not a container"),
        };
        for child in owned {
            self.container.remove(child);
            if let Some(parent) = self.parent.get(child).copied() {
                self.unbind(parent, child);
            }
            self.discard(child);
        }
    }

    /// Where `container` places its logical children structurally.
    pub fn container_target(&self, container: WidgetId) -> WidgetId {
        self.container_target
            .get(container)
            .copied()
            .unwrap_or(container)
    }

    /// Redirect `container`'s structural placement to the wedge `target`.
    pub fn set_container_target(&mut self, container: WidgetId, target: WidgetId) {
        assert!(
            self.container_contents.contains_key(container),
            "widget is not a container"
        );
        assert!(self.contents.contains_key(target), "target is not a wedge");
        if target == container {
            self.container_target.remove(container);
        } else {
            self.container_target.insert(container, target);
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.widgets.get_mut(id)
    }

    /// Set or clear interaction bits on a widget. Unknown ids are ignored.
    pub fn set_state(&mut self, id: WidgetId, state: WidgetState, on: bool) {
        if let Some(widget) = self.widgets.get_mut(id) {
            widget.set_state(state, on);
        }
    }

    /// The structural parent.
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.parent.get(id).copied()
    }

    /// Position among structural siblings.
    pub fn index(&self, id: WidgetId) -> Option<usize> {
        self.widgets.get(id).map(Widget::index)
    }

    /// Structural contents. Empty for leaves and unknown ids.
    pub fn contents(&self, id: WidgetId) -> &[WidgetId] {
        self.contents
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Logical contents. Empty for non-containers.
    pub fn container_contents(&self, id: WidgetId) -> &[WidgetId] {
        self.container_contents
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// The container that owns `id`.
    pub fn container(&self, id: WidgetId) -> Option<WidgetId> {
        self.container.get(id).copied()
    }

    /// Walk from `id` up to the root, collecting structural ancestors.
    ///
    /// The returned vec does **not** include `id` itself.
    pub fn ancestors(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent.get(current).copied() {
            result.push(parent);
            current = parent;
        }
        result
    }

    /// Whether `ancestor` lies on `id`'s structural parent chain.
    pub fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut current = id;
        while let Some(parent) = self.parent.get(current).copied() {
            if parent == ancestor {
                return true;
            }
            current = parent;
        }
        false
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn wedge(tree: &mut WidgetTree, style: &str) -> WidgetId {
        tree.create(Widget::new(style).with_kind(WidgetKind::Wedge)).id()
    }

    fn container(tree: &mut WidgetTree, style: &str) -> WidgetId {
        tree.create(Widget::new(style).with_kind(WidgetKind::Container)).id()
    }

    fn leaf(tree: &mut WidgetTree, style: &str) -> WidgetId {
        tree.create(Widget::new(style)).id()
    }

    fn indices(tree: &WidgetTree, parent: WidgetId) -> Vec<usize> {
        tree.contents(parent)
            .iter()
            .map(|&child| tree.index(child).unwrap())
            .collect()
    }

    /// A wedge holding leaves a, b, c, d.
    fn build() -> (WidgetTree, WidgetId, [WidgetId; 4]) {
        let mut tree = WidgetTree::new();
        let root = wedge(&mut tree, "Sheet");
        let ids = ["A", "B", "C", "D"].map(|name| {
            let id = leaf(&mut tree, name);
            tree.push(root, id, false);
            id
        });
        (tree, root, ids)
    }

    // ── Structural placement ─────────────────────────────────────────

    #[test]
    fn push_binds_parent_and_index() {
        let (tree, root, [a, b, c, d]) = build();
        assert_eq!(tree.contents(root), &[a, b, c, d]);
        assert_eq!(tree.parent(c), Some(root));
        assert_eq!(tree.index(c), Some(2));
    }

    #[test]
    fn insert_reindexes_following() {
        let (mut tree, root, [a, b, c, d]) = build();
        let e = leaf(&mut tree, "E");
        tree.insert(root, e, 1, false);
        assert_eq!(tree.contents(root), &[a, e, b, c, d]);
        assert_eq!(indices(&tree, root), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn remove_destroys_unowned_widget() {
        let (mut tree, root, [a, b, c, d]) = build();
        tree.remove(root, b);
        assert_eq!(tree.contents(root), &[a, c, d]);
        assert_eq!(indices(&tree, root), vec![0, 1, 2]);
        assert_eq!(tree.parent(b), None);
        assert!(!tree.contains(b));
    }

    #[test]
    fn repeated_push_remove_does_not_grow_arena() {
        let mut tree = WidgetTree::new();
        let root = wedge(&mut tree, "Sheet");
        for _ in 0..100 {
            let id = leaf(&mut tree, "Item");
            tree.push(root, id, false);
            tree.remove(root, id);
        }
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn remove_keeps_container_owned_widget() {
        let mut tree = WidgetTree::new();
        let panel = container(&mut tree, "Panel");
        let label = tree.create(Widget::new("Label"));
        let label = tree.append(panel, label);
        tree.remove(panel, label);
        assert!(tree.contains(label));
        assert_eq!(tree.parent(label), None);
        assert_eq!(tree.container(label), Some(panel));
    }

    #[test]
    #[should_panic(expected = "not a structural child")]
    fn remove_through_wrong_parent_panics() {
        let (mut tree, _root, [a, ..]) = build();
        let other = wedge(&mut tree, "Other");
        tree.remove(other, a);
    }

    #[test]
    #[should_panic(expected = "already placed")]
    fn double_push_panics() {
        let (mut tree, root, [a, ..]) = build();
        tree.push(root, a, false);
    }

    #[test]
    #[should_panic(expected = "inside itself")]
    fn push_into_descendant_panics() {
        let mut tree = WidgetTree::new();
        let outer = wedge(&mut tree, "Outer");
        let inner = wedge(&mut tree, "Inner");
        tree.push(outer, inner, false);
        tree.push(inner, outer, false);
    }

    #[test]
    fn move_forward_and_back() {
        let (mut tree, root, [a, b, c, d]) = build();
        tree.move_child(root, 0, 2);
        assert_eq!(tree.contents(root), &[b, c, a, d]);
        assert_eq!(indices(&tree, root), vec![0, 1, 2, 3]);
        tree.move_child(root, 3, 0);
        assert_eq!(tree.contents(root), &[d, b, c, a]);
        assert_eq!(indices(&tree, root), vec![0, 1, 2, 3]);
    }

    #[test]
    fn swap_marks_mapping_dirty() {
        let (mut tree, root, [a, b, c, d]) = build();
        tree.get_mut(root).unwrap().frame.clear_dirty();
        tree.swap(root, 3, 1);
        assert_eq!(tree.contents(root), &[a, d, c, b]);
        assert_eq!(indices(&tree, root), vec![0, 1, 2, 3]);
        assert!(tree.get(root).unwrap().frame.dirty().contains(Dirty::MAPPING));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn move_out_of_range_panics() {
        let (mut tree, root, _) = build();
        tree.move_child(root, 0, 4);
    }

    // ── Deferred ─────────────────────────────────────────────────────

    #[test]
    fn deferred_push_waits_for_apply() {
        let (mut tree, root, [a, b, c, d]) = build();
        let e = leaf(&mut tree, "E");
        let f = leaf(&mut tree, "F");
        tree.push(root, e, true);
        tree.insert(root, f, 0, true);
        assert_eq!(tree.parent(e), None);
        assert_eq!(tree.deferred_len(), 2);

        tree.apply_deferred();
        assert_eq!(tree.contents(root), &[f, a, b, c, d, e]);
        assert_eq!(indices(&tree, root), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(tree.deferred_len(), 0);
    }

    #[test]
    fn deferred_bind_of_destroyed_widget_is_dropped() {
        let (mut tree, root, _) = build();
        let e = tree.create(Widget::new("E"));
        tree.push(root, e.id(), true);
        tree.destroy(e);
        tree.apply_deferred();
        assert_eq!(tree.contents(root).len(), 4);
    }

    // ── Containers ───────────────────────────────────────────────────

    #[test]
    fn append_places_into_own_contents() {
        let mut tree = WidgetTree::new();
        let list = container(&mut tree, "List");
        let item = tree.create(Widget::new("Item"));
        let item = tree.append(list, item);
        assert_eq!(tree.container_contents(list), &[item]);
        assert_eq!(tree.contents(list), &[item]);
        assert_eq!(tree.container(item), Some(list));
        assert_eq!(tree.parent(item), Some(list));
    }

    #[test]
    fn append_respects_container_target() {
        let mut tree = WidgetTree::new();
        let scroll = container(&mut tree, "ScrollSheet");
        let body = wedge(&mut tree, "Body");
        tree.push(scroll, body, false);
        tree.set_container_target(scroll, body);

        let item = tree.create(Widget::new("Item"));
        let item = tree.append(scroll, item);
        assert_eq!(tree.container_contents(scroll), &[item]);
        assert_eq!(tree.contents(body), &[item]);
        assert_eq!(tree.contents(scroll), &[body]);
        assert_eq!(tree.container_target(scroll), body);
    }

    #[test]
    fn already_placed_widget_keeps_its_placement() {
        let mut tree = WidgetTree::new();
        let list = container(&mut tree, "List");
        let elsewhere = wedge(&mut tree, "Elsewhere");
        let item = tree.create(Widget::new("Item"));
        tree.push(elsewhere, item.id(), false);
        let item = tree.append(list, item);
        assert_eq!(tree.parent(item), Some(elsewhere));
        assert!(tree.contents(list).is_empty());
    }

    #[test]
    fn insert_content_at_index() {
        let mut tree = WidgetTree::new();
        let list = container(&mut tree, "List");
        let first = tree.create(Widget::new("First"));
        let first = tree.append(list, first);
        let zeroth = tree.create(Widget::new("Zeroth"));
        let zeroth = tree.insert_content(list, zeroth, 0);
        assert_eq!(tree.container_contents(list), &[zeroth, first]);
        assert_eq!(tree.contents(list), &[zeroth, first]);
        assert_eq!(indices(&tree, list), vec![0, 1]);
    }

    #[test]
    fn release_removes_from_both_sequences() {
        let mut tree = WidgetTree::new();
        let scroll = container(&mut tree, "ScrollSheet");
        let body = wedge(&mut tree, "Body");
        tree.push(scroll, body, false);
        tree.set_container_target(scroll, body);
        let item = tree.create(Widget::new("Item"));
        let item = tree.append(scroll, item);

        let detached = tree.release(scroll, item);
        assert_eq!(detached.id(), item);
        assert!(tree.container_contents(scroll).is_empty());
        assert!(tree.contents(body).is_empty());
        assert_eq!(tree.container(item), None);
        assert!(tree.contains(item));
        tree.destroy(detached);
        assert!(!tree.contains(item));
    }

    #[test]
    fn clear_destroys_owned_widgets() {
        let mut tree = WidgetTree::new();
        let list = container(&mut tree, "List");
        let ids: Vec<WidgetId> = (0..3)
            .map(|_| {
                let item = tree.create(Widget::new("Item"));
                tree.append(list, item)
            })
            .collect();
        tree.clear(list);
        assert!(tree.container_contents(list).is_empty());
        assert!(tree.contents(list).is_empty());
        assert!(ids.iter().all(|&id| !tree.contains(id)));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn destroy_takes_owned_subtree() {
        let mut tree = WidgetTree::new();
        let root = wedge(&mut tree, "Root");
        let panel = tree.create(Widget::new("Panel").with_kind(WidgetKind::Container));
        let panel_id = panel.id();
        tree.push(root, panel_id, false);
        let label = leaf(&mut tree, "Label");
        tree.push(panel_id, label, false);
        let item = tree.create(Widget::new("Item"));
        let item = tree.append(panel_id, item);

        tree.destroy(panel);
        assert!(!tree.contains(panel_id));
        assert!(!tree.contains(label));
        assert!(!tree.contains(item));
        assert!(tree.contents(root).is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn destroy_spares_widgets_owned_elsewhere() {
        let mut tree = WidgetTree::new();
        let list = container(&mut tree, "List");
        let body = tree.create(Widget::new("Body").with_kind(WidgetKind::Wedge));
        tree.push(list, body.id(), false);
        tree.set_container_target(list, body.id());
        let item = tree.create(Widget::new("Item"));
        let item = tree.append(list, item);

        tree.set_container_target(list, list);
        tree.destroy(body);
        assert!(tree.contains(item));
        assert_eq!(tree.parent(item), None);
        assert_eq!(tree.container(item), Some(list));
    }

    #[test]
    fn root_and_ancestors() {
        let mut tree = WidgetTree::new();
        let root = tree.create(Widget::new("Root").with_kind(WidgetKind::Wedge));
        let root = tree.set_root(root);
        let mid = wedge(&mut tree, "Mid");
        let bottom = leaf(&mut tree, "Bottom");
        tree.push(root, mid, false);
        tree.push(mid, bottom, false);
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.ancestors(bottom), vec![mid, root]);
        assert!(tree.is_ancestor(root, bottom));
        assert!(!tree.is_ancestor(bottom, root));
    }
}
