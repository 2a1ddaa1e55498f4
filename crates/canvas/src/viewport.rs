use crate::error::is_valid_scale;
use crate::{CanvasConfig, CanvasError};
use node::{CanvasPoint, ScreenDelta, ScreenPoint};
use serde::{Deserialize, Serialize};

/// Wheel zoom direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Map a wheel delta to a direction. Scrolling up zooms in; a zero
    /// delta (horizontal scroll) has no direction.
    pub fn from_wheel(delta_y: f32) -> Option<Self> {
        if delta_y < 0.0 {
            Some(Self::In)
        } else if delta_y > 0.0 {
            Some(Self::Out)
        } else {
            None
        }
    }

    fn sign(self) -> f32 {
        match self {
            Self::In => 1.0,
            Self::Out => -1.0,
        }
    }
}

/// What a zoom call did to the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomOutcome {
    /// The full factor was applied.
    Applied,
    /// The scale hit a configured bound; a smaller factor was applied.
    Clamped,
    /// Nothing changed (already at the bound, or a factor of 1).
    Unchanged,
}

/// Snapshot of the global canvas transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Pan offset in screen pixels.
    pub offset: ScreenDelta,
    /// Zoom scale (1.0 = 100%). Always > 0.
    pub scale: f32,
}

impl ViewportState {
    /// `(top, left)` style pair for the canvas layer.
    pub fn top_left(&self) -> (f32, f32) {
        (self.offset.dy(), self.offset.dx())
    }
}

/// Camera state for the canvas.
///
/// Screen position of a canvas point is `canvas * scale + offset`. The
/// scale only changes through [`Viewport::zoom`] and [`Viewport::zoom_by`],
/// which keep it inside the configured range.
#[derive(Clone, Debug)]
pub struct Viewport {
    offset: ScreenDelta,
    scale: f32,
    config: CanvasConfig,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: ScreenDelta::ZERO,
            scale: 1.0,
            config: CanvasConfig::default(),
        }
    }
}

impl Viewport {
    /// Create a viewport at the identity transform. The config is
    /// validated first.
    pub fn new(config: CanvasConfig) -> Result<Self, CanvasError> {
        config.validate()?;
        Ok(Self {
            offset: ScreenDelta::ZERO,
            scale: 1.0,
            config,
        })
    }

    pub fn offset(&self) -> ScreenDelta {
        self.offset
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn transform(&self) -> ViewportState {
        ViewportState {
            offset: self.offset,
            scale: self.scale,
        }
    }

    /// Pan the viewport by a delta in screen coordinates.
    ///
    /// Panning moves the camera in screen terms, so the delta is not
    /// divided by the scale. A delta or result that is not finite is
    /// rejected and the offset is kept.
    pub fn pan(&mut self, delta: ScreenDelta) -> Result<(), CanvasError> {
        let offset = self.offset + delta;
        if !offset.0.is_finite() {
            return Err(CanvasError::NonFinite(format!("pan delta {:?}", delta)));
        }
        self.offset = offset;
        Ok(())
    }

    /// Zoom one wheel tick, keeping the canvas point under `pointer` fixed.
    pub fn zoom(
        &mut self,
        pointer: ScreenPoint,
        direction: ZoomDirection,
    ) -> Result<ZoomOutcome, CanvasError> {
        let step = direction.sign() * self.config.zoom_step;
        self.zoom_by(pointer, 1.0 + step)
    }

    /// Multiply the scale by `factor`, keeping the canvas point under
    /// `pointer` fixed.
    ///
    /// Non-positive or non-finite results are rejected and leave the
    /// viewport untouched. Results outside the configured range are
    /// clamped, and the offset is computed from the clamped factor.
    pub fn zoom_by(&mut self, pointer: ScreenPoint, factor: f32) -> Result<ZoomOutcome, CanvasError> {
        if !is_valid_scale(factor) {
            return Err(CanvasError::DegenerateScale(factor));
        }
        if !pointer.0.is_finite() {
            return Err(CanvasError::NonFinite(format!("zoom pointer {:?}", pointer)));
        }
        let target = self.scale * factor;
        if !is_valid_scale(target) {
            return Err(CanvasError::DegenerateScale(target));
        }

        let clamped = self.config.clamp_scale(target);
        if clamped == self.scale {
            return Ok(ZoomOutcome::Unchanged);
        }

        let step = if clamped == target {
            factor - 1.0
        } else {
            clamped / self.scale - 1.0
        };
        let anchor = pointer.0 - self.offset.0;
        let offset = ScreenDelta(self.offset.0 - anchor * step);
        if !offset.0.is_finite() {
            return Err(CanvasError::NonFinite(format!("zoom offset {:?}", offset)));
        }
        self.offset = offset;
        self.scale = clamped;

        Ok(if clamped == target {
            ZoomOutcome::Applied
        } else {
            ZoomOutcome::Clamped
        })
    }

    /// Convert a point from screen coordinates to canvas coordinates.
    pub fn screen_to_canvas(&self, screen_point: ScreenPoint) -> CanvasPoint {
        CanvasPoint((screen_point.0 - self.offset.0) / self.scale)
    }

    /// Convert a point from canvas coordinates to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: CanvasPoint) -> ScreenPoint {
        ScreenPoint(canvas_point.0 * self.scale + self.offset.0)
    }

    /// CSS transform for the canvas layer. While the canvas itself is
    /// being dragged the uncommitted movement is shown as a translation.
    pub fn css_transform(&self, preview: Option<ScreenDelta>) -> String {
        match preview {
            Some(delta) => format!(
                "translate3d({}px, {}px, 0) scale({})",
                delta.dx(),
                delta.dy(),
                self.scale
            ),
            None => format!("scale({})", self.scale),
        }
    }

    /// Reset to default view.
    pub fn reset(&mut self) {
        self.offset = ScreenDelta::ZERO;
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_close(actual: f32, expected: f32) {
        let tolerance = EPS * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_point_close(actual: CanvasPoint, expected: CanvasPoint) {
        assert_close(actual.x(), expected.x());
        assert_close(actual.y(), expected.y());
    }

    #[test]
    fn starts_at_identity() {
        let viewport = Viewport::default();
        let state = viewport.transform();
        assert_eq!(state.offset, ScreenDelta::ZERO);
        assert_eq!(state.scale, 1.0);
    }

    #[test]
    fn pan_sums_deltas() {
        let mut viewport = Viewport::default();
        let deltas = [
            ScreenDelta::new(10.0, -5.0),
            ScreenDelta::new(-3.5, 2.0),
            ScreenDelta::new(100.0, 0.25),
        ];
        for delta in deltas {
            viewport.pan(delta).unwrap();
        }
        assert_eq!(viewport.offset(), ScreenDelta::new(106.5, -2.75));
    }

    #[test]
    fn pan_ignores_scale() {
        let mut viewport = Viewport::default();
        viewport.zoom_by(ScreenPoint::default(), 2.0).unwrap();
        viewport.pan(ScreenDelta::new(10.0, 10.0)).unwrap();
        assert_eq!(viewport.offset(), ScreenDelta::new(10.0, 10.0));
    }

    #[test]
    fn pan_then_zoom_in_scenario() {
        let mut viewport = Viewport::default();
        viewport.pan(ScreenDelta::new(10.0, -5.0)).unwrap();
        assert_eq!(viewport.offset(), ScreenDelta::new(10.0, -5.0));

        let outcome = viewport
            .zoom(ScreenPoint::new(100.0, 100.0), ZoomDirection::In)
            .unwrap();
        assert_eq!(outcome, ZoomOutcome::Applied);
        assert_close(viewport.scale(), 1.1);
        assert_close(viewport.offset().dx(), 1.0);
        assert_close(viewport.offset().dy(), -15.5);
    }

    #[test]
    fn zoom_keeps_pointer_anchor() {
        let mut viewport = Viewport::default();
        viewport.pan(ScreenDelta::new(-40.0, 25.0)).unwrap();
        viewport.zoom_by(ScreenPoint::default(), 1.7).unwrap();

        for pointer in [
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(320.0, 240.0),
            ScreenPoint::new(-15.0, 900.0),
        ] {
            for direction in [ZoomDirection::In, ZoomDirection::Out] {
                let before = viewport.screen_to_canvas(pointer);
                viewport.zoom(pointer, direction).unwrap();
                let after = viewport.screen_to_canvas(pointer);
                assert_point_close(after, before);
            }
        }
    }

    #[test]
    fn wheel_tick_out_uses_reference_step() {
        let mut viewport = Viewport::default();
        viewport
            .zoom(ScreenPoint::new(50.0, 50.0), ZoomDirection::Out)
            .unwrap();
        assert_close(viewport.scale(), 0.9);
        assert_close(viewport.offset().dx(), 5.0);
        assert_close(viewport.offset().dy(), 5.0);
    }

    #[test]
    fn inverse_factor_restores_view() {
        let mut viewport = Viewport::default();
        viewport.pan(ScreenDelta::new(12.0, -7.0)).unwrap();
        let original = viewport.transform();
        let pointer = ScreenPoint::new(200.0, 150.0);

        viewport.zoom_by(pointer, 1.25).unwrap();
        viewport.zoom_by(pointer, 1.0 / 1.25).unwrap();

        let restored = viewport.transform();
        assert_close(restored.scale, original.scale);
        assert_close(restored.offset.dx(), original.offset.dx());
        assert_close(restored.offset.dy(), original.offset.dy());
    }

    #[test]
    fn rejects_degenerate_factor() {
        let mut viewport = Viewport::default();
        viewport.pan(ScreenDelta::new(3.0, 4.0)).unwrap();
        let before = viewport.transform();

        for factor in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let result = viewport.zoom_by(ScreenPoint::new(10.0, 10.0), factor);
            assert!(matches!(result, Err(CanvasError::DegenerateScale(_))));
            assert_eq!(viewport.transform(), before);
        }
    }

    #[test]
    fn clamps_to_max_and_keeps_anchor() {
        let mut viewport = Viewport::new(CanvasConfig {
            max_scale: 2.0,
            ..CanvasConfig::default()
        })
        .unwrap();
        let pointer = ScreenPoint::new(80.0, 60.0);
        let before = viewport.screen_to_canvas(pointer);

        let outcome = viewport.zoom_by(pointer, 5.0).unwrap();
        assert_eq!(outcome, ZoomOutcome::Clamped);
        assert_eq!(viewport.scale(), 2.0);
        assert_point_close(viewport.screen_to_canvas(pointer), before);

        let before = viewport.transform();
        let outcome = viewport.zoom(pointer, ZoomDirection::In).unwrap();
        assert_eq!(outcome, ZoomOutcome::Unchanged);
        assert_eq!(viewport.transform(), before);
    }

    #[test]
    fn repeated_zoom_out_stays_positive() {
        let mut viewport = Viewport::default();
        for _ in 0..500 {
            viewport
                .zoom(ScreenPoint::new(10.0, 10.0), ZoomDirection::Out)
                .unwrap();
        }
        assert_eq!(viewport.scale(), viewport.config().min_scale);
    }

    #[test]
    fn screen_canvas_round_trip() {
        let mut viewport = Viewport::default();
        viewport.pan(ScreenDelta::new(30.0, -10.0)).unwrap();
        viewport.zoom_by(ScreenPoint::new(5.0, 5.0), 1.5).unwrap();

        let canvas = CanvasPoint::new(42.0, -17.0);
        let screen = viewport.canvas_to_screen(canvas);
        assert_point_close(viewport.screen_to_canvas(screen), canvas);
    }

    #[test]
    fn css_transform_formats() {
        let mut viewport = Viewport::default();
        assert_eq!(viewport.css_transform(None), "scale(1)");
        viewport.zoom_by(ScreenPoint::default(), 2.0).unwrap();
        assert_eq!(
            viewport.css_transform(Some(ScreenDelta::new(4.0, -3.0))),
            "translate3d(4px, -3px, 0) scale(2)"
        );
    }

    #[test]
    fn wheel_direction_mapping() {
        assert_eq!(ZoomDirection::from_wheel(-120.0), Some(ZoomDirection::In));
        assert_eq!(ZoomDirection::from_wheel(3.0), Some(ZoomDirection::Out));
        assert_eq!(ZoomDirection::from_wheel(0.0), None);
    }

    #[test]
    fn rejects_non_finite_pan() {
        let mut viewport = Viewport::default();
        viewport.pan(ScreenDelta::new(5.0, 0.0)).unwrap();

        let result = viewport.pan(ScreenDelta::new(f32::INFINITY, 0.0));
        assert!(matches!(result, Err(CanvasError::NonFinite(_))));
        let result = viewport.pan(ScreenDelta::new(f32::NAN, 0.0));
        assert!(matches!(result, Err(CanvasError::NonFinite(_))));

        viewport.pan(ScreenDelta::new(f32::MAX, 0.0)).unwrap();
        let result = viewport.pan(ScreenDelta::new(f32::MAX, 0.0));
        assert!(matches!(result, Err(CanvasError::NonFinite(_))));
        assert!(viewport.offset().dx().is_finite());
    }

    #[test]
    fn rejects_non_finite_zoom_pointer() {
        let mut viewport = Viewport::default();
        let before = viewport.transform();
        let result = viewport.zoom(ScreenPoint::new(f32::INFINITY, 0.0), ZoomDirection::In);
        assert!(matches!(result, Err(CanvasError::NonFinite(_))));
        assert_eq!(viewport.transform(), before);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let result = Viewport::new(CanvasConfig {
            zoom_step: 0.1,
            min_scale: 2.0,
            max_scale: 1.0,
        });
        assert!(matches!(result, Err(CanvasError::InvalidConfig(_))));

        let result = Viewport::new(CanvasConfig {
            max_scale: f32::NAN,
            ..CanvasConfig::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn reset_returns_to_identity() {
        let mut viewport = Viewport::default();
        viewport.pan(ScreenDelta::new(1.0, 2.0)).unwrap();
        viewport.zoom(ScreenPoint::new(9.0, 9.0), ZoomDirection::In).unwrap();
        viewport.reset();
        assert_eq!(viewport.transform().scale, 1.0);
        assert_eq!(viewport.transform().offset, ScreenDelta::ZERO);
    }
}
