//! Skin: the visual attributes drawn for one interaction-state combination.

use crate::geometry::{BoxFloat, Colour, DimFloat, Dimension};
use crate::style::image::{ImageRef, ImageResolver};
use crate::style::values::DimAlign;

/// A nine-patch image: the stretchable centre is bounded by four margins.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSkin {
    pub image: ImageRef,
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub margin: i32,
    /// Axis along which only the middle strip stretches; `DimNull` stretches both.
    pub stretch: Dimension,
}

impl ImageSkin {
    /// Parse `"image, left, top, right, bottom[, margin[, DIM_X|DIM_Y]]"`.
    ///
    /// Returns `None` when fewer than five components are given.
    pub fn parse(value: &str, images: &mut dyn ImageResolver) -> Option<ImageSkin> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() < 5 {
            return None;
        }
        let int = |s: &str| s.parse::<i32>().unwrap_or(0);
        Some(ImageSkin {
            image: images.find_image(parts[0]),
            left: int(parts[1]),
            top: int(parts[2]),
            right: int(parts[3]),
            bottom: int(parts[4]),
            margin: parts.get(5).map_or(0, |&s| int(s)),
            stretch: match parts.get(6).copied() {
                Some("DIM_X") => Dimension::DimX,
                Some("DIM_Y") => Dimension::DimY,
                _ => Dimension::DimNull,
            },
        })
    }
}

/// A drop shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub x_offset: f32,
    pub y_offset: f32,
    pub blur: f32,
    pub spread: f32,
    pub colour: Colour,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            x_offset: 0.0,
            y_offset: 0.0,
            blur: 0.0,
            spread: 0.0,
            colour: Colour::new(0.0, 0.0, 0.0, 0.5),
        }
    }
}

impl Shadow {
    /// Parse `"x_offset, y_offset, blur, spread"`.
    pub fn parse(value: &str) -> Shadow {
        let [x_offset, y_offset, blur, spread] = crate::geometry::parse_floats::<4>(value);
        Shadow {
            x_offset,
            y_offset,
            blur,
            spread,
            ..Shadow::default()
        }
    }
}

/// Resolved visual attributes for a widget in one interaction state.
///
/// An `empty` skin draws nothing; every skin starts out empty until a style
/// definition claims it.
#[derive(Debug, Clone, PartialEq)]
pub struct Skin {
    pub empty: bool,
    pub background_colour: Colour,
    pub border_colour: Colour,
    pub image_colour: Colour,
    pub text_colour: Colour,
    pub text_font: String,
    pub text_size: f32,
    pub text_wrap: bool,
    /// top, right, bottom, left.
    pub border_width: BoxFloat,
    /// top-left, top-right, bottom-right, bottom-left.
    pub corner_radius: BoxFloat,
    pub weak_corners: bool,
    /// left, top, right, bottom.
    pub padding: BoxFloat,
    pub margin: BoxFloat,
    pub align: DimAlign,
    /// Top and bottom intensity of a vertical gradient over the background.
    pub linear_gradient: DimFloat,
    pub image: Option<ImageRef>,
    pub overlay: Option<ImageRef>,
    pub tile: Option<ImageRef>,
    pub image_skin: Option<ImageSkin>,
    pub shadow: Option<Shadow>,
}

impl Default for Skin {
    fn default() -> Self {
        Self {
            empty: true,
            background_colour: Colour::TRANSPARENT,
            border_colour: Colour::TRANSPARENT,
            image_colour: Colour::TRANSPARENT,
            text_colour: Colour::TRANSPARENT,
            text_font: String::new(),
            text_size: 14.0,
            text_wrap: false,
            border_width: BoxFloat::ZERO,
            corner_radius: BoxFloat::ZERO,
            weak_corners: false,
            padding: BoxFloat::ZERO,
            margin: BoxFloat::ZERO,
            align: DimAlign::default(),
            linear_gradient: DimFloat::ZERO,
            image: None,
            overlay: None,
            tile: None,
            image_skin: None,
            shadow: None,
        }
    }
}

/// `"null"` clears an image slot; anything else names an image.
fn image_value(value: &str, images: &mut dyn ImageResolver) -> Option<ImageRef> {
    if value == "null" {
        None
    } else {
        Some(images.find_image(value))
    }
}

/// Anything but the literal `"false"` reads as true.
fn flag_value(value: &str) -> bool {
    value != "false"
}

impl Skin {
    /// Whether the skin has something to draw.
    pub fn is_drawn(&self) -> bool {
        !self.empty
    }

    /// Assign a skin attribute from its document key.
    ///
    /// Returns `false` when `key` does not name a skin attribute.
    pub fn assign(&mut self, key: &str, value: &str, images: &mut dyn ImageResolver) -> bool {
        match key {
            "empty" => self.empty = flag_value(value),
            "background_colour" => self.background_colour = Colour::parse(value),
            "border_colour" => self.border_colour = Colour::parse(value),
            "image_colour" => self.image_colour = Colour::parse(value),
            "text_colour" => self.text_colour = Colour::parse(value),
            "text_font" | "font" => self.text_font = value.to_owned(),
            "text_size" => self.text_size = value.parse().unwrap_or(self.text_size),
            "text_wrap" => self.text_wrap = flag_value(value),
            "border_width" => self.border_width = BoxFloat::parse(value),
            "corner_radius" => self.corner_radius = BoxFloat::parse(value),
            "weak_corners" => self.weak_corners = flag_value(value),
            "skin_align" => self.align = DimAlign::parse(value),
            "skin_padding" => self.padding = BoxFloat::parse(value),
            "skin_margin" => self.margin = BoxFloat::parse(value),
            "topdown_gradient" => self.linear_gradient = DimFloat::parse(value),
            "image" => self.image = image_value(value, images),
            "overlay" => self.overlay = image_value(value, images),
            "tile" => self.tile = image_value(value, images),
            "image_skin" => match ImageSkin::parse(value, images) {
                Some(image_skin) => self.image_skin = Some(image_skin),
                None => tracing::debug!(value, "image_skin needs at least five components"),
            },
            "shadow" => self.shadow = Some(Shadow::parse(value)),
            "no_shadow" => self.shadow = None,
            "shadow_colour" => match self.shadow.as_mut() {
                Some(shadow) => shadow.colour = Colour::parse(value),
                None => tracing::debug!("shadow_colour set on a skin without a shadow"),
            },
            _ => return false,
        }
        true
    }
}
