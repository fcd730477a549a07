//! Points in data space and canvas space
//!
//! The two spaces are kept as distinct types so a canvas position can never
//! be fed where a data sample is expected.

use serde::{Deserialize, Serialize};

/// One sample of the response curve: time `t` and value `y`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub t: f64,
    pub y: f64,
}

impl DataPoint {
    pub fn new(t: f64, y: f64) -> Self {
        Self { t, y }
    }

    pub fn is_finite(&self) -> bool {
        self.t.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for DataPoint {
    fn from([t, y]: [f64; 2]) -> Self {
        Self { t, y }
    }
}

impl From<DataPoint> for [f64; 2] {
    fn from(p: DataPoint) -> Self {
        [p.t, p.y]
    }
}

/// A position in render space: origin at the canvas centre, y grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: CanvasPoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl std::ops::Neg for CanvasPoint {
    type Output = CanvasPoint;

    fn neg(self) -> Self::Output {
        CanvasPoint::new(-self.x, -self.y)
    }
}
