//! Layout collaborator: taffy integration and layout-style resolution.

pub mod engine;
pub mod resolve;

pub use engine::{LayoutEngine, LayoutError};
pub use resolve::resolve_style;
