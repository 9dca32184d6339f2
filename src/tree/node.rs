//! Widget node types: WidgetId, Widget, FrameType, Detached.

use slotmap::new_key_type;

use crate::style::WidgetState;
use crate::tree::frame::Frame;

new_key_type! {
    /// Unique identifier for a widget. Copy, lightweight (u64).
    pub struct WidgetId;
}

/// How a widget participates in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameType {
    /// Box layout inside its parent's stripe.
    #[default]
    Frame,
    /// Positioned independently of its siblings; owns a redraw flag.
    Layer,
    /// Pure sizing element, never drawn with content.
    Spacer,
}

/// Structural role of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WidgetKind {
    /// A leaf.
    #[default]
    Widget,
    /// Holds a structural contents sequence.
    Wedge,
    /// A wedge that also owns a logical contents sequence.
    Container,
}

impl WidgetKind {
    /// Whether widgets can be structurally placed inside this kind.
    pub fn is_wedge(self) -> bool {
        matches!(self, WidgetKind::Wedge | WidgetKind::Container)
    }
}

/// Data carried by a single widget.
#[derive(Debug, Clone)]
pub struct Widget {
    /// Name of the style definition this widget draws with (e.g. "Button").
    pub style: String,
    pub kind: WidgetKind,
    pub frame_type: FrameType,
    /// Interaction bits; selects which decline of the style is drawn.
    pub state: WidgetState,
    pub frame: Frame,
    /// Update counter of the style seen at the last sync.
    pub(crate) style_version: u64,
    pub(crate) index: usize,
}

impl Widget {
    /// Create a leaf widget drawn with `style`.
    pub fn new(style: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            kind: WidgetKind::Widget,
            frame_type: FrameType::Frame,
            state: WidgetState::empty(),
            frame: Frame::default(),
            style_version: 0,
            index: 0,
        }
    }

    /// Set the structural kind (builder).
    pub fn with_kind(mut self, kind: WidgetKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the frame type (builder).
    pub fn with_frame_type(mut self, frame_type: FrameType) -> Self {
        self.frame_type = frame_type;
        self
    }

    /// Zero-based position among structural siblings.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn has_state(&self, state: WidgetState) -> bool {
        self.state.contains(state)
    }

    /// Set or clear interaction bits.
    pub fn set_state(&mut self, state: WidgetState, on: bool) {
        self.state.set(state, on);
    }
}

/// Ownership token for a widget that no container holds.
///
/// Returned by [`WidgetTree::create`](super::WidgetTree::create) and
/// [`WidgetTree::release`](super::WidgetTree::release); consumed by appending
/// the widget into a container or destroying it.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a detached widget stays in the arena until appended or destroyed"]
pub struct Detached(pub(crate) WidgetId);

impl Detached {
    pub fn id(&self) -> WidgetId {
        self.0
    }
}
