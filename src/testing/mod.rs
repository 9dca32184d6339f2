//! Headless testing framework: Pilot, render recording.
//!
//! Use the [`Pilot`] to programmatically drive an [`App`](crate::app::App)
//! without a terminal. Use [`RecordingRenderer`] and [`render_trace`] to
//! capture render passes as text for snapshot assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{render_trace, CallKind, RecordingRenderer, RenderCall};
