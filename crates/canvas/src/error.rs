use node::TableId;

/// Error type for canvas operations.
///
/// None of these are fatal. The session swallows stale and degenerate
/// events and keeps the last valid state.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasError {
    /// A drag move or end arrived for a table with no active drag.
    StaleEvent(TableId),
    /// A zoom step or drag conversion would use a scale that is not
    /// strictly positive and finite.
    DegenerateScale(f32),
    /// Configuration values are out of range.
    InvalidConfig(String),
    /// The named table is not on the canvas.
    UnknownTable(TableId),
    /// An input value or the resulting transform or position is NaN or
    /// infinite.
    NonFinite(String),
}

impl std::fmt::Display for CanvasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StaleEvent(id) => write!(f, "Stale drag event for {}", id),
            Self::DegenerateScale(scale) => write!(f, "Degenerate scale: {}", scale),
            Self::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            Self::UnknownTable(id) => write!(f, "Unknown table: {}", id),
            Self::NonFinite(what) => write!(f, "Non-finite {}", what),
        }
    }
}

impl std::error::Error for CanvasError {}

/// Returns true when `scale` can be divided by and multiplied with safely.
pub(crate) fn is_valid_scale(scale: f32) -> bool {
    scale.is_finite() && scale > 0.0
}
