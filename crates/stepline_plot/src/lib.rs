//! stepline_plot
//!
//! Data-to-canvas mapping and progressive drawing for step-response plots.
//!
//! - `AxisConfig` maps data samples `(t, y)` onto a centred canvas (y down)
//!   and back, and lays out the axis lines and ticks.
//! - `Polyline` samples a point by arc-length fraction, so a curve can be
//!   revealed at constant pen speed.
//! - `ProgressTracker` derives the moving dot, its readouts and axis feet
//!   from a progress signal.
//! - `ResponsePlotScene` animates progress and camera over a timeline and
//!   yields per-frame state.

mod format;
mod interpolate;
mod scale;

pub mod axis;
pub mod camera;
pub mod error;
pub mod point;
pub mod polyline;
pub mod response;
pub mod scene;
pub mod tracker;

pub use axis::{AxisConfig, AxisSpec, AxisTick, PlotRect};
pub use camera::{CameraEmphasis, CameraState};
pub use error::{EmptyCurveError, PlotError, ResponseError, Result};
pub use format::format_fixed;
pub use interpolate::{lerp_f64, lerp_point};
pub use point::{CanvasPoint, DataPoint};
pub use polyline::Polyline;
pub use response::ResponseData;
pub use scale::LinearScale;
pub use scene::{ResponsePlotScene, SceneFrame, SceneTiming, MAX_FPS};
pub use tracker::{current_point, current_value, ProgressTracker, TrackerPhase, TrackerReadout};

/// Common imports for plot users.
pub mod prelude {
    pub use crate::axis::{AxisConfig, AxisSpec};
    pub use crate::error::{EmptyCurveError, PlotError};
    pub use crate::point::{CanvasPoint, DataPoint};
    pub use crate::polyline::Polyline;
    pub use crate::response::ResponseData;
    pub use crate::scene::{ResponsePlotScene, SceneFrame, SceneTiming};
    pub use crate::tracker::{ProgressTracker, TrackerPhase};
}
