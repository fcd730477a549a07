//! Scene camera
//!
//! The camera is a zoom about the canvas origin followed by a pan, both in
//! canvas units. At rest it is the identity.

use serde::{Deserialize, Serialize};

use crate::axis::AxisConfig;
use crate::point::{CanvasPoint, DataPoint};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl CameraState {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }

    /// Where a canvas point ends up on screen.
    pub fn project(&self, p: CanvasPoint) -> CanvasPoint {
        CanvasPoint::new(p.x * self.scale + self.x, p.y * self.scale + self.y)
    }

    /// Inverse of [`project`](Self::project). A zero scale maps everything
    /// back to the origin.
    pub fn unproject(&self, p: CanvasPoint) -> CanvasPoint {
        if self.scale == 0.0 {
            return CanvasPoint::ZERO;
        }
        CanvasPoint::new((p.x - self.x) / self.scale, (p.y - self.y) / self.scale)
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// How far the camera leans into the peak while the curve rises.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraEmphasis {
    pub zoom: f64,
    /// Fraction of the peak's canvas offset the camera pans back by
    pub follow: f64,
}

impl CameraEmphasis {
    pub fn new(zoom: f64, follow: f64) -> Self {
        Self { zoom, follow }
    }

    /// Camera pose at the peak: pan by `-to_canvas(peak) * follow`, zoom in
    /// by `zoom`.
    pub fn target(&self, axis: &AxisConfig, peak: DataPoint) -> CameraState {
        let offset = (-axis.to_canvas(peak)).scale(self.follow);
        CameraState::new(offset.x, offset.y, self.zoom)
    }
}

impl Default for CameraEmphasis {
    fn default() -> Self {
        Self::new(1.5, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_projects_unchanged() {
        let p = CanvasPoint::new(12.0, -7.5);
        assert_eq!(CameraState::default().project(p), p);
    }

    #[test]
    fn project_and_unproject_agree() {
        let camera = CameraState::new(30.0, -20.0, 1.5);
        let p = CanvasPoint::new(-100.0, 80.0);
        let back = camera.unproject(camera.project(p));
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn target_pans_against_the_peak() {
        let axis = AxisConfig::new(0.0, 10.0, 0.0, 2.0, 1000.0, 600.0, 60.0).unwrap();
        let target = CameraEmphasis::new(1.5, 0.5).target(&axis, DataPoint::new(0.0, 0.0));
        // Data origin sits at (-440, 240) on the canvas.
        assert_eq!(target, CameraState::new(220.0, -120.0, 1.5));
    }
}
