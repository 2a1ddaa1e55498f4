//! Table model and coordinate types for the schema canvas.
//!
//! Tables are flat: every model is an independent card with no parent.
//! Geometry is not stored here, only identity and fields.

pub mod coords;
mod schema;
mod table;
mod table_id;

pub use coords::{CanvasDelta, CanvasPoint, ScreenDelta, ScreenPoint};
pub use schema::{Schema, SchemaError};
pub use table::{Field, Table};
pub use table_id::TableId;
