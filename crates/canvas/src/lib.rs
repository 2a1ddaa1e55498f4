//! Canvas transform core for the schema diagram.
//!
//! Two independent pieces of state: the [`Viewport`] (global pan and
//! zoom) and the [`PositionRegistry`] (where each table card sits in
//! canvas space). [`Canvas`] owns both for one editing session.

mod canvas;
mod config;
mod error;
mod input;
mod registry;
mod render;
mod viewport;

pub use canvas::{Canvas, CanvasEvent};
pub use config::{CanvasConfig, DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, DEFAULT_ZOOM_STEP};
pub use error::CanvasError;
pub use input::{DragTarget, InputEvent};
// Re-export coordinate types from node for convenience
pub use node::{CanvasDelta, CanvasPoint, ScreenDelta, ScreenPoint, TableId};
pub use registry::PositionRegistry;
pub use render::{LayerStyle, RenderSnapshot, TableStyle};
pub use viewport::{Viewport, ViewportState, ZoomDirection, ZoomOutcome};
