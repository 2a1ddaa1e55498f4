use crate::{
    CanvasConfig, CanvasError, DragTarget, InputEvent, LayerStyle, PositionRegistry,
    RenderSnapshot, TableStyle, Viewport, ViewportState, ZoomDirection, ZoomOutcome,
};
use node::{CanvasPoint, Schema, ScreenDelta, ScreenPoint, Table, TableId};

/// Events recorded by the canvas since the last drain.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasEvent {
    TableAdded(TableId),
    TableRemoved(TableId),
    TableMoved(TableId),
    ViewportChanged,
}

/// The editing session state.
///
/// Created once when a diagram is opened and handed by reference to the
/// input dispatcher and the renderer. Every mutation marks the canvas
/// dirty; the render loop calls [`Canvas::take_redraw`] once per frame.
#[derive(Debug, Default)]
pub struct Canvas {
    /// All tables, in insertion order.
    tables: Vec<Table>,

    /// Canvas-space position of each table.
    positions: PositionRegistry,

    /// Pan/zoom state.
    viewport: Viewport,

    /// Movement of an in-progress canvas drag, not yet committed to the
    /// viewport offset.
    pan_preview: Option<ScreenDelta>,

    dirty: bool,
    events: Vec<CanvasEvent>,
}

impl Canvas {
    /// Open a session with a zoom configuration. Fails if the config
    /// does not validate.
    pub fn new(config: CanvasConfig) -> Result<Self, CanvasError> {
        Ok(Self {
            viewport: Viewport::new(config)?,
            ..Self::default()
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn positions(&self) -> &PositionRegistry {
        &self.positions
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, id: &TableId) -> Option<&Table> {
        self.tables.iter().find(|t| &t.name == id)
    }

    pub fn transform(&self) -> ViewportState {
        self.viewport.transform()
    }

    pub fn position(&self, id: &TableId) -> CanvasPoint {
        self.positions.get(id)
    }

    pub fn pan_preview(&self) -> Option<ScreenDelta> {
        self.pan_preview
    }

    // === Tables ===

    /// Add a table. Re-adding a known name replaces its fields and keeps
    /// its position.
    pub fn add_table(&mut self, table: Table) {
        let id = table.name.clone();
        match self.tables.iter_mut().find(|t| t.name == id) {
            Some(existing) => {
                log::debug!("replacing fields of table {}", id);
                *existing = table;
            }
            None => {
                log::info!("adding table {} ({} fields)", id, table.fields.len());
                self.tables.push(table);
            }
        }
        self.positions.register(id.clone());
        self.changed(CanvasEvent::TableAdded(id));
    }

    /// Remove a table and its position.
    pub fn remove_table(&mut self, id: &TableId) -> Result<Table, CanvasError> {
        let index = self
            .tables
            .iter()
            .position(|t| &t.name == id)
            .ok_or_else(|| CanvasError::UnknownTable(id.clone()))?;
        let table = self.tables.remove(index);
        self.positions.remove(id);
        log::info!("removed table {}", id);
        self.changed(CanvasEvent::TableRemoved(id.clone()));
        Ok(table)
    }

    /// Add every model of a schema.
    pub fn load_schema(&mut self, schema: Schema) {
        for table in schema.models {
            self.add_table(table);
        }
    }

    pub fn set_position(&mut self, id: &TableId, position: CanvasPoint) -> Result<(), CanvasError> {
        self.require_table(id)?;
        if !position.0.is_finite() {
            return Err(CanvasError::NonFinite(format!("position {:?}", position)));
        }
        self.positions.set(id.clone(), position);
        self.changed(CanvasEvent::TableMoved(id.clone()));
        Ok(())
    }

    // === Viewport ===

    pub fn pan(&mut self, delta: ScreenDelta) -> Result<(), CanvasError> {
        self.viewport.pan(delta)?;
        log::trace!("pan by {:?} -> {:?}", delta, self.viewport.offset());
        self.changed(CanvasEvent::ViewportChanged);
        Ok(())
    }

    pub fn zoom(
        &mut self,
        pointer: ScreenPoint,
        direction: ZoomDirection,
    ) -> Result<ZoomOutcome, CanvasError> {
        let outcome = self.viewport.zoom(pointer, direction)?;
        self.after_zoom(outcome);
        Ok(outcome)
    }

    pub fn zoom_by(&mut self, pointer: ScreenPoint, factor: f32) -> Result<ZoomOutcome, CanvasError> {
        let outcome = self.viewport.zoom_by(pointer, factor)?;
        self.after_zoom(outcome);
        Ok(outcome)
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
        self.pan_preview = None;
        self.changed(CanvasEvent::ViewportChanged);
    }

    fn after_zoom(&mut self, outcome: ZoomOutcome) {
        if outcome != ZoomOutcome::Unchanged {
            log::trace!("zoom -> scale {}", self.viewport.scale());
            self.changed(CanvasEvent::ViewportChanged);
        }
    }

    // === Table drags ===

    pub fn begin_drag(&mut self, id: &TableId) -> Result<(), CanvasError> {
        self.require_table(id)?;
        self.positions.begin_drag(id);
        Ok(())
    }

    /// Move a dragged table by the total screen movement since the drag
    /// began, converted at the current zoom scale.
    pub fn update_drag(&mut self, id: &TableId, delta: ScreenDelta) -> Result<CanvasPoint, CanvasError> {
        let position = self
            .positions
            .update_drag(id, delta, self.viewport.scale())?;
        self.changed(CanvasEvent::TableMoved(id.clone()));
        Ok(position)
    }

    /// Finish a drag, applying the final movement when one is reported.
    pub fn end_drag(&mut self, id: &TableId, delta: Option<ScreenDelta>) -> Result<(), CanvasError> {
        if let Some(delta) = delta {
            self.update_drag(id, delta)?;
        }
        if self.positions.end_drag(id) {
            Ok(())
        } else {
            Err(CanvasError::StaleEvent(id.clone()))
        }
    }

    // === Input dispatch ===

    /// Apply one event from the gesture layer.
    ///
    /// Stale and degenerate events are dropped and the last valid state
    /// is kept. Returns whether anything changed.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let was_dirty = std::mem::replace(&mut self.dirty, false);
        let result = self.dispatch(event);
        let changed = self.dirty;
        self.dirty |= was_dirty;

        if let Err(err) = result {
            log::debug!("ignored input: {}", err);
        }
        changed
    }

    fn dispatch(&mut self, event: InputEvent) -> Result<(), CanvasError> {
        match event {
            InputEvent::DragStart { target } => match target {
                DragTarget::Table(id) => self.begin_drag(&id),
                DragTarget::Canvas => {
                    self.pan_preview = Some(ScreenDelta::ZERO);
                    Ok(())
                }
            },

            InputEvent::DragMove { target, delta } => match target {
                DragTarget::Table(id) => self.update_drag(&id, delta).map(|_| ()),
                DragTarget::Canvas => {
                    if self.pan_preview.is_none() {
                        log::debug!("canvas drag move without start");
                        return Ok(());
                    }
                    if !delta.0.is_finite() {
                        return Err(CanvasError::NonFinite(format!("pan preview {:?}", delta)));
                    }
                    self.pan_preview = Some(delta);
                    self.dirty = true;
                    Ok(())
                }
            },

            InputEvent::DragEnd { target, delta } => match target {
                DragTarget::Table(id) => self.end_drag(&id, Some(delta)),
                DragTarget::Canvas => {
                    if self.pan_preview.take().is_none() {
                        log::debug!("canvas drag end without start");
                        return Ok(());
                    }
                    self.pan(delta)
                }
            },

            InputEvent::Wheel { pointer, delta_y } => match ZoomDirection::from_wheel(delta_y) {
                Some(direction) => self.zoom(pointer, direction).map(|_| ()),
                None => Ok(()),
            },
        }
    }

    // === Rendering ===

    /// Returns whether a redraw is due and clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    pub fn drain_events(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn render(&self) -> RenderSnapshot {
        let viewport = self.viewport.transform();
        let (top, left) = viewport.top_left();
        let tables = self
            .tables
            .iter()
            .map(|table| {
                let position = self.positions.get(&table.name);
                TableStyle {
                    id: table.name.clone(),
                    top: position.y(),
                    left: position.x(),
                    dragging: self.positions.is_dragging(&table.name),
                }
            })
            .collect();

        RenderSnapshot {
            viewport,
            layer: LayerStyle {
                top,
                left,
                transform: self.viewport.css_transform(self.pan_preview),
            },
            tables,
        }
    }

    fn require_table(&self, id: &TableId) -> Result<(), CanvasError> {
        if self.table(id).is_some() {
            Ok(())
        } else {
            Err(CanvasError::UnknownTable(id.clone()))
        }
    }

    fn changed(&mut self, event: CanvasEvent) {
        self.dirty = true;
        self.events.push(event);
    }
}
