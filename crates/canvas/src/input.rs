//! Input events delivered by the gesture layer.
//!
//! The gesture layer recognizes drags and wheel ticks; the canvas only
//! sees their results. Drag deltas are cumulative since the drag began.

use node::{ScreenDelta, ScreenPoint, TableId};
use serde::{Deserialize, Serialize};

/// What a drag gesture is attached to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragTarget {
    /// The canvas background; dragging it pans the viewport.
    Canvas,
    /// A table card; dragging it moves the table.
    Table(TableId),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    DragStart {
        target: DragTarget,
    },
    DragMove {
        target: DragTarget,
        delta: ScreenDelta,
    },
    DragEnd {
        target: DragTarget,
        delta: ScreenDelta,
    },
    Wheel {
        pointer: ScreenPoint,
        delta_y: f32,
    },
}
