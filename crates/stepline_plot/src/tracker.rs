//! Progress tracker: the moving dot on a partially drawn curve
//!
//! A progress fraction (owned by whoever animates the curve) selects a
//! point by arc length; everything else the scene shows about that point is
//! derived from it: the value readout, the foot points on both axes and the
//! label text. The tracker lives inside a [`ReactiveGraph`] so those values
//! recompute only when progress actually changes.

use std::cell::Cell;
use std::rc::Rc;

use stepline_core::{Derived, ReactiveGraph, Signal};

use crate::axis::AxisConfig;
use crate::error::{EmptyCurveError, PlotError, Result};
use crate::format::format_fixed;
use crate::point::{CanvasPoint, DataPoint};
use crate::polyline::Polyline;

/// Decimal places shown in the live readouts.
const READOUT_DECIMALS: usize = 2;
/// Readout label offsets from the axes, in data units.
const T_LABEL_OFFSET: f64 = 0.2;
const Y_LABEL_OFFSET: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackerPhase {
    /// Progress has never left zero; the dot sits on the first sample.
    Idle,
    /// Progress has advanced at least once.
    Tracking,
}

/// Everything the scene draws for the current point.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackerReadout {
    pub point: CanvasPoint,
    pub data: DataPoint,
    /// Projection of the point onto the time axis
    pub t_foot: CanvasPoint,
    /// Projection of the point onto the value axis
    pub y_foot: CanvasPoint,
    pub t_label: String,
    pub t_label_position: CanvasPoint,
    pub y_label: String,
    pub y_label_position: CanvasPoint,
}

impl TrackerReadout {
    fn build(axis: &AxisConfig, point: CanvasPoint) -> Self {
        let data = axis.to_data(point);
        let (t0, y0) = (axis.x_min(), axis.y_min());
        Self {
            point,
            data,
            t_foot: axis.map(data.t, y0),
            y_foot: axis.map(t0, data.y),
            t_label: format_fixed(data.t, READOUT_DECIMALS),
            t_label_position: axis.map(data.t, y0 - T_LABEL_OFFSET),
            y_label: format_fixed(data.y, READOUT_DECIMALS),
            y_label_position: axis.map(t0 - Y_LABEL_OFFSET, data.y),
        }
    }
}

/// The current canvas point at progress `f`.
pub fn current_point(
    curve: &Polyline,
    f: f64,
) -> std::result::Result<CanvasPoint, EmptyCurveError> {
    curve.point_at_percentage(f)
}

/// The current point mapped back to data space.
pub fn current_value(
    curve: &Polyline,
    axis: &AxisConfig,
    f: f64,
) -> std::result::Result<DataPoint, EmptyCurveError> {
    current_point(curve, f).map(|p| axis.to_data(p))
}

/// Reactive readouts for a curve driven by a progress signal.
pub struct ProgressTracker {
    axis: AxisConfig,
    start: CanvasPoint,
    progress: Signal<f64>,
    current_point: Derived<CanvasPoint>,
    current_data: Derived<DataPoint>,
    readout: Derived<TrackerReadout>,
    phase: Rc<Cell<TrackerPhase>>,
}

impl ProgressTracker {
    /// Register the tracker's signal and derived values in `graph`.
    ///
    /// Fails with [`EmptyCurveError`] if `curve` has no points.
    pub fn new(graph: &mut ReactiveGraph, axis: AxisConfig, curve: Polyline) -> Result<Self> {
        let start = curve.first().ok_or(EmptyCurveError)?;
        let curve = Rc::new(curve);

        let progress = graph.create_signal(0.0f64);

        let current_point = graph.create_derived(move |g| {
            let f = g.get(progress).unwrap_or(0.0);
            curve.point_at_percentage(f).unwrap_or(start)
        });
        let current_data = graph.create_derived(move |g| {
            axis.to_data(g.get_derived(current_point).unwrap_or(start))
        });
        let readout = graph.create_derived(move |g| {
            TrackerReadout::build(&axis, g.get_derived(current_point).unwrap_or(start))
        });

        // Latches once progress leaves zero; there is no way back to idle.
        let phase = Rc::new(Cell::new(TrackerPhase::Idle));
        let phase_latch = phase.clone();
        graph.create_effect(move |g| {
            if g.get(progress).unwrap_or(0.0) > 0.0 && phase_latch.get() == TrackerPhase::Idle {
                tracing::debug!("progress tracker started tracking");
                phase_latch.set(TrackerPhase::Tracking);
            }
        });

        Ok(Self {
            axis,
            start,
            progress,
            current_point,
            current_data,
            readout,
            phase,
        })
    }

    pub fn axis(&self) -> &AxisConfig {
        &self.axis
    }

    /// The signal an animation timeline should write progress into.
    pub fn progress_signal(&self) -> Signal<f64> {
        self.progress
    }

    pub fn progress(&self, graph: &ReactiveGraph) -> f64 {
        graph.get(self.progress).unwrap_or(0.0)
    }

    /// Advance progress by hand. Values are clamped to `[0, 1]`; moving
    /// backwards is rejected.
    pub fn set_progress(&self, graph: &mut ReactiveGraph, f: f64) -> Result<()> {
        if f.is_nan() {
            return Err(PlotError::InvalidProgress(f));
        }
        let f = f.clamp(0.0, 1.0);
        let current = self.progress(graph);
        if f < current {
            return Err(PlotError::ProgressRegressed {
                current,
                requested: f,
            });
        }
        graph.set(self.progress, f);
        Ok(())
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase.get()
    }

    pub fn current_point(&self, graph: &ReactiveGraph) -> CanvasPoint {
        graph.get_derived(self.current_point).unwrap_or(self.start)
    }

    pub fn current_data(&self, graph: &ReactiveGraph) -> DataPoint {
        graph
            .get_derived(self.current_data)
            .unwrap_or_else(|| self.axis.to_data(self.start))
    }

    pub fn current_t(&self, graph: &ReactiveGraph) -> f64 {
        self.current_data(graph).t
    }

    pub fn current_y(&self, graph: &ReactiveGraph) -> f64 {
        self.current_data(graph).y
    }

    pub fn readout(&self, graph: &ReactiveGraph) -> TrackerReadout {
        graph
            .get_derived(self.readout)
            .unwrap_or_else(|| TrackerReadout::build(&self.axis, self.start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis() -> AxisConfig {
        AxisConfig::new(0.0, 10.0, 0.0, 2.0, 1000.0, 600.0, 60.0).unwrap()
    }

    fn ramp(axis: &AxisConfig) -> Polyline {
        Polyline::from_data(
            [DataPoint::new(0.0, 0.0), DataPoint::new(10.0, 2.0)],
            axis,
        )
    }

    #[test]
    fn empty_curve_is_rejected() {
        let mut graph = ReactiveGraph::new();
        let err = ProgressTracker::new(&mut graph, axis(), Polyline::default()).err();
        assert_eq!(err, Some(PlotError::EmptyCurve(EmptyCurveError)));
    }

    #[test]
    fn starts_idle_on_first_sample() {
        let mut graph = ReactiveGraph::new();
        let axis = axis();
        let tracker = ProgressTracker::new(&mut graph, axis, ramp(&axis)).unwrap();
        assert_eq!(tracker.phase(), TrackerPhase::Idle);
        assert_eq!(tracker.current_point(&graph), CanvasPoint::new(-440.0, 240.0));
        assert_eq!(tracker.current_data(&graph), DataPoint::new(0.0, 0.0));
    }

    #[test]
    fn readouts_follow_progress() {
        let mut graph = ReactiveGraph::new();
        let axis = axis();
        let tracker = ProgressTracker::new(&mut graph, axis, ramp(&axis)).unwrap();

        tracker.set_progress(&mut graph, 0.5).unwrap();
        assert_eq!(tracker.phase(), TrackerPhase::Tracking);
        assert!((tracker.current_t(&graph) - 5.0).abs() < 1e-9);
        assert!((tracker.current_y(&graph) - 1.0).abs() < 1e-9);

        let readout = tracker.readout(&graph);
        assert_eq!(readout.t_label, "5.00");
        assert_eq!(readout.y_label, "1.00");
        assert!((readout.t_foot.y - 240.0).abs() < 1e-9);
        assert!((readout.y_foot.x + 440.0).abs() < 1e-9);
    }

    #[test]
    fn progress_cannot_regress() {
        let mut graph = ReactiveGraph::new();
        let axis = axis();
        let tracker = ProgressTracker::new(&mut graph, axis, ramp(&axis)).unwrap();
        tracker.set_progress(&mut graph, 0.6).unwrap();
        assert!(matches!(
            tracker.set_progress(&mut graph, 0.2),
            Err(PlotError::ProgressRegressed { .. })
        ));
        assert!(matches!(
            tracker.set_progress(&mut graph, f64::NAN),
            Err(PlotError::InvalidProgress(_))
        ));
        tracker.set_progress(&mut graph, 4.0).unwrap();
        assert_eq!(tracker.progress(&graph), 1.0);
        assert_eq!(tracker.current_point(&graph), CanvasPoint::new(440.0, -240.0));
    }

    #[test]
    fn external_writes_drive_the_tracker() {
        let mut graph = ReactiveGraph::new();
        let axis = axis();
        let tracker = ProgressTracker::new(&mut graph, axis, ramp(&axis)).unwrap();
        graph.set(tracker.progress_signal(), 1.0);
        assert_eq!(tracker.phase(), TrackerPhase::Tracking);
        // Zero again does not return to idle.
        graph.set(tracker.progress_signal(), 0.0);
        assert_eq!(tracker.phase(), TrackerPhase::Tracking);
    }

    #[test]
    fn free_functions_match_tracker() {
        let axis = axis();
        let curve = ramp(&axis);
        let value = current_value(&curve, &axis, 0.25).unwrap();
        assert!((value.t - 2.5).abs() < 1e-9);
        assert!((value.y - 0.5).abs() < 1e-9);
        assert_eq!(
            current_point(&Polyline::default(), 0.25),
            Err(EmptyCurveError)
        );
    }
}
