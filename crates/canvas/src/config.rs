//! Zoom configuration for the canvas.
//!
//! ```json
//! { "zoom_step": 0.1, "min_scale": 0.1, "max_scale": 10.0 }
//! ```
//!
//! Every field is optional and falls back to its default.

use crate::CanvasError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ZOOM_STEP: f32 = 0.1;
pub const DEFAULT_MIN_SCALE: f32 = 0.1;
pub const DEFAULT_MAX_SCALE: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    /// Relative scale change per wheel tick (0.1 = 10%).
    pub zoom_step: f32,
    /// Smallest scale the viewport may reach.
    pub min_scale: f32,
    /// Largest scale the viewport may reach.
    pub max_scale: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            zoom_step: DEFAULT_ZOOM_STEP,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
        }
    }
}

impl CanvasConfig {
    pub fn from_json_str(json: &str) -> Result<Self, CanvasError> {
        let config: CanvasConfig =
            serde_json::from_str(json).map_err(|e| CanvasError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, CanvasError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            CanvasError::InvalidConfig(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// The identity scale must be reachable so a fresh session starts valid.
    pub fn validate(&self) -> Result<(), CanvasError> {
        if !self.zoom_step.is_finite() || self.zoom_step <= 0.0 || self.zoom_step >= 1.0 {
            return Err(CanvasError::InvalidConfig(format!(
                "zoom_step must be in (0, 1), got {}",
                self.zoom_step
            )));
        }
        if !self.min_scale.is_finite() || self.min_scale <= 0.0 || self.min_scale > 1.0 {
            return Err(CanvasError::InvalidConfig(format!(
                "min_scale must be in (0, 1], got {}",
                self.min_scale
            )));
        }
        if !self.max_scale.is_finite() || self.max_scale < 1.0 {
            return Err(CanvasError::InvalidConfig(format!(
                "max_scale must be finite and >= 1, got {}",
                self.max_scale
            )));
        }
        Ok(())
    }

    /// Clamp a scale into the configured range. Never panics, even on a
    /// config that fails [`CanvasConfig::validate`].
    pub fn clamp_scale(&self, scale: f32) -> f32 {
        scale.max(self.min_scale).min(self.max_scale)
    }
}
