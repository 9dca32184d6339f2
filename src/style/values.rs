//! Layout value grammar: enumerated tokens and the per-style layout record.
//!
//! Every enumerated attribute parses from an upper-case document token. An
//! unrecognised token falls back to the first enumerant instead of failing.

use crate::geometry::{BoxFloat, DimFloat};

/// Declares a layout enum whose first variant doubles as the parse fallback.
macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $first:ident => $first_token:literal $(, $variant:ident => $token:literal)* }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            $first,
            $($variant,)*
        }

        impl $name {
            /// Parse a document token, falling back to the first enumerant.
            pub fn from_token(token: &str) -> Self {
                match token.trim() {
                    $first_token => $name::$first,
                    $($token => $name::$variant,)*
                    other => {
                        tracing::debug!(
                            kind = stringify!($name),
                            token = other,
                            fallback = $first_token,
                            "unknown layout token"
                        );
                        $name::$first
                    }
                }
            }

            /// The document token for this value.
            pub fn token(self) -> &'static str {
                match self {
                    $name::$first => $first_token,
                    $($name::$variant => $token,)*
                }
            }
        }
    };
}

token_enum! {
    /// How a frame is positioned by its parent.
    Flow { Flow => "FLOW", Overlay => "OVERLAY", Align => "ALIGN", Free => "FREE" }
}

token_enum! {
    /// Whether children are clipped to the frame's bounds.
    Clipping { NoClip => "NOCLIP", Clip => "CLIP" }
}

token_enum! {
    /// Whether the frame catches pointer input and paints a background.
    Opacity { Opaque => "OPAQUE", Clear => "CLEAR", Hollow => "HOLLOW" }
}

token_enum! {
    /// Sizing policy of the frame along its two axes.
    Space {
        Sheet => "SHEET",
        Item => "ITEM",
        Block => "BLOCK",
        Line => "LINE",
        Stack => "STACK",
        Div => "DIV",
        Space => "SPACE",
        Board => "BOARD"
    }
}

token_enum! {
    /// Main layout axis: `READING` lays children out in a row, `PARAGRAPH` in a column.
    Direction { Reading => "READING", Paragraph => "PARAGRAPH" }
}

token_enum! {
    /// Alignment along one axis.
    Align { Left => "LEFT", Center => "CENTER", Right => "RIGHT" }
}

token_enum! {
    /// Whether children are laid out in order or in reverse.
    Pivot { Forward => "FORWARD", Reverse => "REVERSE" }
}

/// Alignment on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DimAlign {
    pub x: Align,
    pub y: Align,
}

impl DimAlign {
    /// Parse `"CENTER, LEFT"`. A missing second token falls back like an unknown one.
    pub fn parse(value: &str) -> Self {
        let mut parts = value.split(',');
        Self {
            x: Align::from_token(parts.next().unwrap_or("")),
            y: Align::from_token(parts.next().unwrap_or("")),
        }
    }
}

/// Pivot on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DimPivot {
    pub x: Pivot,
    pub y: Pivot,
}

impl DimPivot {
    /// Parse `"FORWARD, REVERSE"`.
    pub fn parse(value: &str) -> Self {
        let mut parts = value.split(',');
        Self {
            x: Pivot::from_token(parts.next().unwrap_or("")),
            y: Pivot::from_token(parts.next().unwrap_or("")),
        }
    }
}

/// The layout attributes of a style, read by the layout collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStyle {
    pub flow: Flow,
    pub clipping: Clipping,
    pub opacity: Opacity,
    pub space: Space,
    pub direction: Direction,
    pub align: DimAlign,
    /// Share of the parent's free space on each axis.
    pub span: DimFloat,
    /// Fixed size in pixels; zero on an axis means "size to content".
    pub size: DimFloat,
    /// left, top, right, bottom.
    pub padding: BoxFloat,
    pub margin: DimFloat,
    pub spacing: DimFloat,
    pub pivot: DimPivot,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            flow: Flow::default(),
            clipping: Clipping::default(),
            opacity: Opacity::default(),
            space: Space::default(),
            direction: Direction::default(),
            align: DimAlign::default(),
            span: DimFloat::new(1.0, 1.0),
            size: DimFloat::ZERO,
            padding: BoxFloat::ZERO,
            margin: DimFloat::ZERO,
            spacing: DimFloat::ZERO,
            pivot: DimPivot::default(),
        }
    }
}

impl LayoutStyle {
    /// Assign a layout attribute from its document key.
    ///
    /// Returns `false` when `key` does not name a layout attribute.
    pub fn assign(&mut self, key: &str, value: &str) -> bool {
        match key {
            "flow" => self.flow = Flow::from_token(value),
            "clipping" => self.clipping = Clipping::from_token(value),
            "opacity" => self.opacity = Opacity::from_token(value),
            "space" => self.space = Space::from_token(value),
            "direction" => self.direction = Direction::from_token(value),
            "align" => self.align = DimAlign::parse(value),
            "span" => self.span = DimFloat::parse(value),
            "size" => self.size = DimFloat::parse(value),
            "padding" => self.padding = BoxFloat::parse(value),
            "margin" => self.margin = DimFloat::parse(value),
            "spacing" => self.spacing = DimFloat::parse(value),
            "pivot" => self.pivot = DimPivot::parse(value),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tokens() {
        assert_eq!(Flow::from_token("OVERLAY"), Flow::Overlay);
        assert_eq!(Clipping::from_token("CLIP"), Clipping::Clip);
        assert_eq!(Opacity::from_token("HOLLOW"), Opacity::Hollow);
        assert_eq!(Space::from_token("BOARD"), Space::Board);
        assert_eq!(Direction::from_token("PARAGRAPH"), Direction::Paragraph);
        assert_eq!(Pivot::from_token("REVERSE"), Pivot::Reverse);
    }

    #[test]
    fn unknown_token_falls_back_to_first() {
        assert_eq!(Flow::from_token("FLOAT"), Flow::Flow);
        assert_eq!(Space::from_token("auto"), Space::Sheet);
        assert_eq!(Align::from_token(""), Align::Left);
    }

    #[test]
    fn token_round_trip() {
        assert_eq!(Space::from_token(Space::Div.token()), Space::Div);
    }

    #[test]
    fn dim_align_pair() {
        let a = DimAlign::parse("CENTER, RIGHT");
        assert_eq!(a.x, Align::Center);
        assert_eq!(a.y, Align::Right);
    }

    #[test]
    fn dim_pivot_missing_second() {
        let p = DimPivot::parse("REVERSE");
        assert_eq!(p.x, Pivot::Reverse);
        assert_eq!(p.y, Pivot::Forward);
    }

    #[test]
    fn layout_defaults() {
        let layout = LayoutStyle::default();
        assert_eq!(layout.span, DimFloat::new(1.0, 1.0));
        assert_eq!(layout.flow, Flow::Flow);
    }

    #[test]
    fn assign_layout_keys() {
        let mut layout = LayoutStyle::default();
        assert!(layout.assign("size", "120, 30"));
        assert!(layout.assign("padding", "1,2,3,4"));
        assert!(layout.assign("direction", "PARAGRAPH"));
        assert_eq!(layout.size, DimFloat::new(120.0, 30.0));
        assert_eq!(layout.padding, BoxFloat::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(layout.direction, Direction::Paragraph);
    }

    #[test]
    fn assign_rejects_skin_keys() {
        let mut layout = LayoutStyle::default();
        assert!(!layout.assign("background_colour", "1,1,1,1"));
        assert_eq!(layout, LayoutStyle::default());
    }
}
