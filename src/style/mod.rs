//! Style cascade: skins, declines and the style-document compiler.
//!
//! - **[`scanner`]**: YAML-subset tokenizer producing document events
//! - **[`parser`]**: state machine compiling events into style definitions
//! - **[`styler`]**: the style registry, loading and lookup
//! - **[`skin`]**, **[`values`]**: visual and layout attributes
//! - **[`state`]**: interaction-state bitmask used to key declines

pub mod image;
pub mod parser;
pub mod scanner;
pub mod skin;
pub mod state;
pub mod styledef;
pub mod styler;
pub mod values;

pub use image::{ImageCatalog, ImageHandle, ImageRef, ImageResolver};
pub use parser::{LoadError, StyleParser};
pub use scanner::{DocToken, ScanError};
pub use skin::{ImageSkin, Shadow, Skin};
pub use state::WidgetState;
pub use styledef::StyleDef;
pub use styler::{StyleTable, Styler};
pub use values::LayoutStyle;
