//! Per-widget layout and paint record.

use bitflags::bitflags;

use crate::geometry::{DimFloat, Dimension};

bitflags! {
    /// What needs recomputing before the next layout or paint.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Dirty: u8 {
        /// Structural order of the children changed.
        const MAPPING = 1 << 0;
        /// Sizes or spans changed.
        const LAYOUT = 1 << 1;
        /// Absolute positions are stale.
        const ABSOLUTE = 1 << 2;
    }
}

/// Layout and paint state owned by each widget.
///
/// Positions are relative to the structural parent; the layout collaborator
/// writes them and the render pass reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub position: DimFloat,
    pub size: DimFloat,
    /// Share of the parent's stripe along each axis.
    pub span: DimFloat,
    pub hidden: bool,
    /// Only honoured on layer frames: redraw everything below this layer.
    pub force_redraw: bool,
    dirty: Dirty,
    last_tick: usize,
    elapsed: usize,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            position: DimFloat::ZERO,
            size: DimFloat::ZERO,
            span: DimFloat::new(1.0, 1.0),
            hidden: false,
            force_redraw: false,
            dirty: Dirty::all(),
            last_tick: 0,
            elapsed: 0,
        }
    }
}

impl Frame {
    pub fn dirty(&self) -> Dirty {
        self.dirty
    }

    pub fn mark_dirty(&mut self, flags: Dirty) {
        self.dirty |= flags;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = Dirty::empty();
    }

    /// Tick number of the last update.
    pub fn last_tick(&self) -> usize {
        self.last_tick
    }

    /// Sum of the deltas seen by every update.
    pub fn elapsed(&self) -> usize {
        self.elapsed
    }

    /// Advance timing state by one tick.
    pub fn next_frame(&mut self, tick: usize, delta: usize) {
        self.last_tick = tick;
        self.elapsed += delta;
    }

    /// Whether a point in the parent's coordinate space falls inside this frame.
    pub fn contains(&self, point: DimFloat) -> bool {
        point.x >= self.position.x
            && point.y >= self.position.y
            && point.x < self.position.x + self.size.x
            && point.y < self.position.y + self.size.y
    }

    /// Whether a point in this frame's own coordinate space falls inside it.
    pub fn inside(&self, local: DimFloat) -> bool {
        local.x >= 0.0 && local.y >= 0.0 && local.x < self.size.x && local.y < self.size.y
    }

    pub fn set_span(&mut self, dim: Dimension, span: f32) {
        if dim == Dimension::DimNull {
            return;
        }
        self.span[dim] = span;
        self.mark_dirty(Dirty::LAYOUT);
    }
}

/// Move `pixels` worth of span from `next` to `prev` along `dim`.
///
/// `extent` is the stripe's pixel length along `dim`; a positive amount grows
/// `prev`. The transfer is clamped so neither span goes negative.
pub fn transfer_pixel_span(prev: &mut Frame, next: &mut Frame, dim: Dimension, pixels: f32, extent: f32) {
    if dim == Dimension::DimNull || extent <= 0.0 {
        return;
    }
    let offset = (pixels / extent).max(-prev.span[dim]).min(next.span[dim]);
    let (prev_span, next_span) = (prev.span[dim] + offset, next.span[dim] - offset);
    prev.set_span(dim, prev_span);
    next.set_span(dim, next_span);
}
