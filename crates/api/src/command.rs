//! Schema canvas commands - all operations that modify canvas state.
//!
//! Commands describe what should happen to the session, in the same
//! units the gesture layer reports: screen deltas for drags and pans,
//! canvas points for absolute table placement.

use canvas::{InputEvent, ZoomDirection};
use node::{CanvasPoint, ScreenDelta, ScreenPoint, Table, TableId};
use serde::{Deserialize, Serialize};

/// A command that modifies canvas state.
///
/// Commands are serializable for:
/// - Replaying recorded sessions
/// - Scripting
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // === Viewport ===
    /// Pan the viewport by a screen delta.
    Pan { delta: ScreenDelta },

    /// Zoom one wheel tick around a screen point.
    Zoom {
        pointer: ScreenPoint,
        direction: ZoomDirection,
    },

    /// Zoom by an arbitrary factor around a screen point (origin by default).
    ZoomBy {
        factor: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        center: Option<ScreenPoint>,
    },

    /// Reset viewport to default.
    ResetView,

    // === Tables ===
    /// Add a table, or replace the fields of an existing one.
    AddTable { table: Table },

    /// Remove a table and its position.
    RemoveTable { name: TableId },

    /// Place a table at an absolute canvas position.
    SetPosition { name: TableId, position: CanvasPoint },

    // === Drag ===
    /// Start dragging a table.
    BeginDrag { name: TableId },

    /// Move a dragged table by the total screen movement since the start.
    UpdateDrag { name: TableId, delta: ScreenDelta },

    /// Finish dragging a table, optionally with a final movement.
    EndDrag {
        name: TableId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delta: Option<ScreenDelta>,
    },

    // === Input ===
    /// Feed a raw gesture event. Stale events succeed without effect.
    Input { event: InputEvent },

    // === Batch ===
    /// Execute multiple commands in sequence.
    Batch { commands: Vec<Command> },
}

/// Result of executing a command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandResult {
    /// Command succeeded.
    Success {
        /// Tables added or moved, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        modified: Vec<TableId>,
        /// Tables removed, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        removed: Vec<TableId>,
    },
    /// Command failed.
    Error { message: String },
}

impl CommandResult {
    pub fn success() -> Self {
        Self::Success {
            modified: vec![],
            removed: vec![],
        }
    }

    pub fn modified(ids: Vec<TableId>) -> Self {
        Self::Success {
            modified: ids,
            removed: vec![],
        }
    }

    pub fn removed(ids: Vec<TableId>) -> Self {
        Self::Success {
            modified: vec![],
            removed: ids,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
