//! Type-safe coordinate system for the schema canvas.
//!
//! Provides distinct types for the two coordinate spaces so that a raw
//! pointer delta can never be written into a table position by accident.
//!
//! # Coordinate Spaces
//!
//! - **Canvas space**: Where table cards live (unbounded, zoom independent)
//! - **Screen space**: Pixels as delivered by pointer and wheel events
//!
//! The viewport maps between them with `screen = canvas * scale + offset`.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Neg, Sub};

/// Position in canvas space (where table cards live).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasPoint(pub Vec2);

/// Movement in canvas space (not a position).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasDelta(pub Vec2);

/// Position in screen space, as reported by the input source.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint(pub Vec2);

/// Movement in screen space.
///
/// Drag gestures report their accumulated movement this way. It is also
/// the unit of the viewport offset, which is never scaled.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenDelta(pub Vec2);

// === CanvasPoint ===

impl CanvasPoint {
    pub const ORIGIN: Self = Self(Vec2::ZERO);

    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }
}

impl From<Vec2> for CanvasPoint {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<CanvasPoint> for Vec2 {
    fn from(p: CanvasPoint) -> Self {
        p.0
    }
}

impl Add<CanvasDelta> for CanvasPoint {
    type Output = CanvasPoint;

    fn add(self, delta: CanvasDelta) -> Self::Output {
        CanvasPoint(self.0 + delta.0)
    }
}

impl Sub for CanvasPoint {
    type Output = CanvasDelta;

    /// Subtracting two points gives a delta.
    fn sub(self, other: CanvasPoint) -> Self::Output {
        CanvasDelta(self.0 - other.0)
    }
}

// === CanvasDelta ===

impl CanvasDelta {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self(Vec2::new(dx, dy))
    }

    pub fn dx(&self) -> f32 {
        self.0.x
    }

    pub fn dy(&self) -> f32 {
        self.0.y
    }
}

impl From<Vec2> for CanvasDelta {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

// === ScreenPoint ===

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }
}

impl From<Vec2> for ScreenPoint {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<ScreenPoint> for Vec2 {
    fn from(p: ScreenPoint) -> Self {
        p.0
    }
}

impl Add<ScreenDelta> for ScreenPoint {
    type Output = ScreenPoint;

    fn add(self, delta: ScreenDelta) -> Self::Output {
        ScreenPoint(self.0 + delta.0)
    }
}

impl Sub<ScreenDelta> for ScreenPoint {
    type Output = ScreenPoint;

    fn sub(self, delta: ScreenDelta) -> Self::Output {
        ScreenPoint(self.0 - delta.0)
    }
}

impl Sub for ScreenPoint {
    type Output = ScreenDelta;

    fn sub(self, other: ScreenPoint) -> Self::Output {
        ScreenDelta(self.0 - other.0)
    }
}

// === ScreenDelta ===

impl ScreenDelta {
    pub const ZERO: Self = Self(Vec2::ZERO);

    pub fn new(dx: f32, dy: f32) -> Self {
        Self(Vec2::new(dx, dy))
    }

    pub fn dx(&self) -> f32 {
        self.0.x
    }

    pub fn dy(&self) -> f32 {
        self.0.y
    }

    /// Convert to a canvas-space movement at the given zoom scale.
    ///
    /// The caller guarantees `scale > 0`.
    pub fn to_canvas(self, scale: f32) -> CanvasDelta {
        CanvasDelta(self.0 / scale)
    }
}

impl From<Vec2> for ScreenDelta {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<ScreenDelta> for Vec2 {
    fn from(d: ScreenDelta) -> Self {
        d.0
    }
}

impl Add for ScreenDelta {
    type Output = ScreenDelta;

    fn add(self, other: ScreenDelta) -> Self::Output {
        ScreenDelta(self.0 + other.0)
    }
}

impl AddAssign for ScreenDelta {
    fn add_assign(&mut self, other: ScreenDelta) {
        self.0 += other.0;
    }
}

impl Sub for ScreenDelta {
    type Output = ScreenDelta;

    fn sub(self, other: ScreenDelta) -> Self::Output {
        ScreenDelta(self.0 - other.0)
    }
}

impl Neg for ScreenDelta {
    type Output = ScreenDelta;

    fn neg(self) -> Self::Output {
        ScreenDelta(-self.0)
    }
}
