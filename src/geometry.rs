//! Core geometry types: DimFloat, BoxFloat, Colour, Dimension.
//!
//! These are the value types shared by the skin model, the frame records and the
//! layout collaborator. All coordinates are in pixels as `f32`.

use std::ops::{Add, Index, IndexMut, Sub};

// ---------------------------------------------------------------------------
// Dimension
// ---------------------------------------------------------------------------

/// A layout axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dimension {
    #[default]
    DimX,
    DimY,
    /// No axis; used by image skins that do not stretch.
    DimNull,
}

impl Dimension {
    /// The other axis. `DimNull` maps to itself.
    #[inline]
    pub const fn orthogonal(self) -> Dimension {
        match self {
            Dimension::DimX => Dimension::DimY,
            Dimension::DimY => Dimension::DimX,
            Dimension::DimNull => Dimension::DimNull,
        }
    }
}

// ---------------------------------------------------------------------------
// DimFloat
// ---------------------------------------------------------------------------

/// A pair of floats, one per axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DimFloat {
    pub x: f32,
    pub y: f32,
}

impl DimFloat {
    pub const ZERO: DimFloat = DimFloat { x: 0.0, y: 0.0 };

    /// Create a new pair.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Parse `"x, y"`. Missing or unreadable components read as zero.
    pub fn parse(value: &str) -> Self {
        let v = parse_floats::<2>(value);
        Self { x: v[0], y: v[1] }
    }
}

impl Index<Dimension> for DimFloat {
    type Output = f32;

    fn index(&self, dim: Dimension) -> &f32 {
        match dim {
            Dimension::DimY => &self.y,
            _ => &self.x,
        }
    }
}

impl IndexMut<Dimension> for DimFloat {
    fn index_mut(&mut self, dim: Dimension) -> &mut f32 {
        match dim {
            Dimension::DimY => &mut self.y,
            _ => &mut self.x,
        }
    }
}

impl Add for DimFloat {
    type Output = DimFloat;
    #[inline]
    fn add(self, rhs: DimFloat) -> DimFloat {
        DimFloat { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for DimFloat {
    type Output = DimFloat;
    #[inline]
    fn sub(self, rhs: DimFloat) -> DimFloat {
        DimFloat { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

// ---------------------------------------------------------------------------
// BoxFloat
// ---------------------------------------------------------------------------

/// Four floats describing the sides (or corners) of a box.
///
/// The meaning of each slot depends on the attribute: padding reads
/// left, top, right, bottom while corner radii read top-left clockwise.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoxFloat {
    pub v0: f32,
    pub v1: f32,
    pub v2: f32,
    pub v3: f32,
}

impl BoxFloat {
    pub const ZERO: BoxFloat = BoxFloat { v0: 0.0, v1: 0.0, v2: 0.0, v3: 0.0 };

    /// Create a new box.
    #[inline]
    pub const fn new(v0: f32, v1: f32, v2: f32, v3: f32) -> Self {
        Self { v0, v1, v2, v3 }
    }

    /// The same value on all four sides.
    #[inline]
    pub const fn uniform(v: f32) -> Self {
        Self { v0: v, v1: v, v2: v, v3: v }
    }

    /// Parse `"a, b, c, d"`. Missing or unreadable components read as zero.
    pub fn parse(value: &str) -> Self {
        let v = parse_floats::<4>(value);
        Self { v0: v[0], v1: v[1], v2: v[2], v3: v[3] }
    }

    /// Whether every side is zero.
    pub fn is_null(&self) -> bool {
        *self == BoxFloat::ZERO
    }
}

// ---------------------------------------------------------------------------
// Colour
// ---------------------------------------------------------------------------

/// An RGBA colour with float channels in `0.0..=1.0`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    pub const TRANSPARENT: Colour = Colour { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };
    pub const BLACK: Colour = Colour { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Colour = Colour { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    /// Create a new colour.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `"r, g, b, a"`. Missing or unreadable channels read as zero.
    pub fn parse(value: &str) -> Self {
        let v = parse_floats::<4>(value);
        Self { r: v[0], g: v[1], b: v[2], a: v[3] }
    }

    /// Whether the colour is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.a == 0.0
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Split a comma separated list into exactly `N` floats.
///
/// Whitespace around components is ignored, extra components are dropped and
/// missing or unparsable ones become `0.0`.
pub fn parse_floats<const N: usize>(value: &str) -> [f32; N] {
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(value.split(',')) {
        *slot = part.trim().parse().unwrap_or(0.0);
    }
    out
}
