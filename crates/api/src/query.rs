//! Schema canvas queries - read-only access to canvas state.
//!
//! Queries allow inspecting the canvas without modifying it.

use canvas::{RenderSnapshot, ViewportState};
use node::{CanvasPoint, ScreenPoint, Table, TableId};
use serde::{Deserialize, Serialize};

/// A query for canvas state (read-only).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// Get the current viewport transform.
    GetTransform,

    /// Get a table position (origin if it has none).
    GetPosition { name: TableId },

    /// Get every table position.
    GetPositions,

    /// Get all tables with their fields.
    GetTables,

    /// Get table count.
    GetTableCount,

    /// Convert a screen point to canvas space.
    ScreenToCanvas { point: ScreenPoint },

    /// Convert a canvas point to screen space.
    CanvasToScreen { point: CanvasPoint },

    /// Get the styles the renderer would use this frame.
    GetRender,
}

/// Response to a query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryResult {
    /// Viewport result.
    Transform { transform: ViewportState },

    /// Single position result.
    Position { name: TableId, position: CanvasPoint },

    /// Positions result, in table order.
    Positions { positions: Vec<PositionInfo> },

    /// Tables result.
    Tables { tables: Vec<Table> },

    /// Count result.
    Count { count: usize },

    /// Converted canvas point.
    CanvasPoint { point: CanvasPoint },

    /// Converted screen point.
    ScreenPoint { point: ScreenPoint },

    /// Render snapshot result.
    Render { snapshot: RenderSnapshot },
}

/// Serializable position entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionInfo {
    pub name: TableId,
    pub position: CanvasPoint,
}
