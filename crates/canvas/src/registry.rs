use crate::error::is_valid_scale;
use crate::CanvasError;
use node::{CanvasPoint, ScreenDelta, TableId};
use std::collections::HashMap;

/// Canvas-space position of every table card, plus the anchors of
/// drags in progress.
///
/// Positions are independent of the viewport. A drag converts screen
/// movement to canvas movement with the scale passed in by the caller.
#[derive(Clone, Debug, Default)]
pub struct PositionRegistry {
    positions: HashMap<TableId, CanvasPoint>,
    anchors: HashMap<TableId, CanvasPoint>,
}

impl PositionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of a table, or the origin if it has none yet.
    pub fn get(&self, id: &TableId) -> CanvasPoint {
        self.positions.get(id).copied().unwrap_or(CanvasPoint::ORIGIN)
    }

    /// Make sure a table has an entry. Existing positions are kept.
    pub fn register(&mut self, id: TableId) -> CanvasPoint {
        *self.positions.entry(id).or_insert(CanvasPoint::ORIGIN)
    }

    /// Place a table at an absolute position.
    pub fn set(&mut self, id: TableId, position: CanvasPoint) {
        self.positions.insert(id, position);
    }

    /// Delete a table's position and any drag in progress.
    pub fn remove(&mut self, id: &TableId) -> Option<CanvasPoint> {
        self.anchors.remove(id);
        self.positions.remove(id)
    }

    /// Snapshot the current position as the drag anchor.
    ///
    /// An unterminated drag for the same table is discarded.
    pub fn begin_drag(&mut self, id: &TableId) {
        let start = self.register(id.clone());
        if self.anchors.insert(id.clone(), start).is_some() {
            log::debug!("drag on {} restarted before it ended", id);
        }
    }

    /// Move a dragged table to `anchor + delta / scale`.
    ///
    /// `delta` is the total screen movement since the drag began, not the
    /// movement since the last update.
    pub fn update_drag(
        &mut self,
        id: &TableId,
        delta: ScreenDelta,
        scale: f32,
    ) -> Result<CanvasPoint, CanvasError> {
        let Some(anchor) = self.anchors.get(id).copied() else {
            return Err(CanvasError::StaleEvent(id.clone()));
        };
        if !is_valid_scale(scale) {
            return Err(CanvasError::DegenerateScale(scale));
        }
        let position = anchor + delta.to_canvas(scale);
        if !position.0.is_finite() {
            return Err(CanvasError::NonFinite(format!("drag position {:?}", position)));
        }
        self.positions.insert(id.clone(), position);
        Ok(position)
    }

    /// Clear the drag anchor. Returns false if no drag was active.
    pub fn end_drag(&mut self, id: &TableId) -> bool {
        self.anchors.remove(id).is_some()
    }

    pub fn is_dragging(&self, id: &TableId) -> bool {
        self.anchors.contains_key(id)
    }

    pub fn contains(&self, id: &TableId) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TableId, &CanvasPoint)> {
        self.positions.iter()
    }
}
