//! LayoutStyle -> taffy Style conversion.
//!
//! Maps a style's [`LayoutStyle`] plus the widget's frame record to taffy's
//! [`taffy::Style`].

use taffy::geometry::{Point, Rect, Size};
use taffy::prelude::{FromLength, FromPercent, TaffyAuto};
use taffy::style::{
    AlignItems, Dimension, Display, FlexDirection, JustifyContent, LengthPercentage,
    LengthPercentageAuto, Overflow, Position,
};

use crate::geometry::{BoxFloat, DimFloat, Dimension as Axis};
use crate::style::values::{Align, Clipping, Direction, Flow, Pivot, Space};
use crate::style::LayoutStyle;
use crate::tree::{Frame, FrameType};

/// The axis children are laid out along.
pub fn main_axis(direction: Direction) -> Axis {
    match direction {
        Direction::Reading => Axis::DimX,
        Direction::Paragraph => Axis::DimY,
    }
}

/// Which axes a sizing policy stretches along, as `(main, cross)` relative to
/// the parent's direction.
pub fn expands(space: Space) -> (bool, bool) {
    match space {
        Space::Sheet | Space::Board => (true, true),
        Space::Line | Space::Space => (true, false),
        Space::Stack | Space::Div => (false, true),
        Space::Item | Space::Block => (false, false),
    }
}

/// A fixed pixel size, or auto when zero or negative.
fn resolve_length(value: f32) -> Dimension {
    if value > 0.0 {
        Dimension::from_length(value)
    } else {
        Dimension::AUTO
    }
}

fn resolve_padding(padding: &BoxFloat) -> Rect<LengthPercentage> {
    Rect {
        left: LengthPercentage::from_length(padding.v0),
        top: LengthPercentage::from_length(padding.v1),
        right: LengthPercentage::from_length(padding.v2),
        bottom: LengthPercentage::from_length(padding.v3),
    }
}

fn resolve_margin(margin: DimFloat) -> Rect<LengthPercentageAuto> {
    Rect {
        left: LengthPercentageAuto::from_length(margin.x),
        right: LengthPercentageAuto::from_length(margin.x),
        top: LengthPercentageAuto::from_length(margin.y),
        bottom: LengthPercentageAuto::from_length(margin.y),
    }
}

fn resolve_justify(align: Align) -> JustifyContent {
    match align {
        Align::Left => JustifyContent::Start,
        Align::Center => JustifyContent::Center,
        Align::Right => JustifyContent::End,
    }
}

fn resolve_align(align: Align) -> AlignItems {
    match align {
        Align::Left => AlignItems::Start,
        Align::Center => AlignItems::Center,
        Align::Right => AlignItems::End,
    }
}

fn resolve_direction(layout: &LayoutStyle) -> FlexDirection {
    let axis = main_axis(layout.direction);
    let reverse = match axis {
        Axis::DimY => layout.pivot.y == Pivot::Reverse,
        _ => layout.pivot.x == Pivot::Reverse,
    };
    match (layout.direction, reverse) {
        (Direction::Reading, false) => FlexDirection::Row,
        (Direction::Reading, true) => FlexDirection::RowReverse,
        (Direction::Paragraph, false) => FlexDirection::Column,
        (Direction::Paragraph, true) => FlexDirection::ColumnReverse,
    }
}

/// Convert a widget's layout record into a [`taffy::Style`].
///
/// `parent` is the direction of the structural parent, which decides which
/// axis the frame's span grows along.
///
/// Mapping summary:
/// - hidden frames -> `Display::None`
/// - `direction`/`pivot` -> flex direction
/// - `size` -> fixed size per axis, auto where zero
/// - `padding` -> padding, `margin` -> margin, `spacing` -> gap
/// - `align` -> justify content on the main axis, align items on the cross axis
/// - `OVERLAY`/`FREE` flow and layer frames -> absolute, inset at the frame position
/// - `space` and frame span -> flex grow and cross-axis stretch
/// - spacer frames always grow by their span
/// - `CLIP` -> hidden overflow
pub fn resolve_style(layout: &LayoutStyle, frame_type: FrameType, frame: &Frame, parent: Direction) -> taffy::Style {
    let mut style = taffy::Style {
        display: if frame.hidden { Display::None } else { Display::Flex },
        flex_direction: resolve_direction(layout),
        size: Size {
            width: resolve_length(layout.size.x),
            height: resolve_length(layout.size.y),
        },
        padding: resolve_padding(&layout.padding),
        margin: resolve_margin(layout.margin),
        gap: Size {
            width: LengthPercentage::from_length(layout.spacing.x),
            height: LengthPercentage::from_length(layout.spacing.y),
        },
        ..taffy::Style::default()
    };

    let own_main = main_axis(layout.direction);
    let (main_align, cross_align) = match own_main {
        Axis::DimY => (layout.align.y, layout.align.x),
        _ => (layout.align.x, layout.align.y),
    };
    style.justify_content = Some(resolve_justify(main_align));
    style.align_items = Some(resolve_align(cross_align));

    if layout.clipping == Clipping::Clip {
        style.overflow = Point {
            x: Overflow::Hidden,
            y: Overflow::Hidden,
        };
    }

    let absolute = frame_type == FrameType::Layer || matches!(layout.flow, Flow::Overlay | Flow::Free);
    if absolute {
        style.position = Position::Absolute;
        style.inset = Rect {
            left: LengthPercentageAuto::from_length(frame.position.x),
            top: LengthPercentageAuto::from_length(frame.position.y),
            right: LengthPercentageAuto::AUTO,
            bottom: LengthPercentageAuto::AUTO,
        };
    }

    let parent_main = main_axis(parent);
    let grow = layout.span[parent_main] * frame.span[parent_main];
    if frame_type == FrameType::Spacer {
        style.flex_grow = grow;
        style.flex_shrink = 1.0;
        return style;
    }

    let (grow_main, stretch_cross) = expands(layout.space);
    if absolute {
        // Absolute frames fill their parent on expanding axes.
        let fill = |on: bool| if on { Dimension::from_percent(1.0) } else { Dimension::AUTO };
        let (main_fill, cross_fill) = (fill(grow_main), fill(stretch_cross));
        let (width, height) = match parent_main {
            Axis::DimY => (cross_fill, main_fill),
            _ => (main_fill, cross_fill),
        };
        if layout.size.x <= 0.0 {
            style.size.width = width;
        }
        if layout.size.y <= 0.0 {
            style.size.height = height;
        }
        return style;
    }

    style.flex_grow = if grow_main { grow } else { 0.0 };
    style.flex_shrink = if layout.space == Space::Block { 0.0 } else { 1.0 };
    // A zero basis lets spans share free space in proportion.
    if grow_main {
        style.flex_basis = Dimension::from_length(0.0);
    }
    if stretch_cross {
        style.align_self = Some(AlignItems::Stretch);
    }
    style
}
