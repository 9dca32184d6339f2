//! # skein
//!
//! A retained-mode widget toolkit with a cascading skin engine and exclusive
//! input control, rendered through a pluggable backend (crossterm by default).
//!
//! ## Core Systems
//!
//! - **[`tree`]**: Slotmap-backed widget arena with structural and logical hierarchies
//! - **[`style`]**: YAML-subset style sheets, state-keyed skins and the decline cascade
//! - **[`layout`]**: Taffy-powered layout driven by each style's layout record
//! - **[`input`]**: Input events, key bindings, the control stack and pointer dispatch
//! - **[`widgets`]**: Constructors for common widget shapes plus the drag-resizable grid sheet
//! - **[`render`]**: Renderer seam and the crossterm terminal backend
//! - **[`app`]**: Application struct tying everything together
//! - **[`testing`]**: Headless pilot and recording renderer
//! - **[`geometry`]**: Dimension-indexed vectors, boxes and colours

// Foundation
pub mod geometry;

// Core systems
pub mod layout;
pub mod style;
pub mod tree;

// Widgets and input
pub mod input;
pub mod widgets;

// Rendering
pub mod render;

// Application
pub mod app;
pub mod testing;

pub use app::{App, AppConfig, AppError, AppEvent};
pub use style::{Skin, StyleDef, Styler, WidgetState};
pub use tree::{Widget, WidgetId, WidgetTree};
