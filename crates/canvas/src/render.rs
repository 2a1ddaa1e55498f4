//! Style values for the rendering layer.
//!
//! The renderer reads a snapshot once per frame and never subscribes to
//! individual mutations.

use crate::ViewportState;
use node::TableId;
use serde::{Deserialize, Serialize};

/// Style of the transformed canvas layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerStyle {
    pub top: f32,
    pub left: f32,
    pub transform: String,
}

/// Absolute placement of one table card inside the canvas layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableStyle {
    pub id: TableId,
    pub top: f32,
    pub left: f32,
    pub dragging: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub viewport: ViewportState,
    pub layer: LayerStyle,
    /// In table insertion order.
    pub tables: Vec<TableStyle>,
}
