//! Response-plot scene
//!
//! Ties the pieces together: a timeline draws the curve up to its peak while
//! the camera leans in, holds, then draws the rest while the camera returns.
//! The timeline writes into signals on a private [`ReactiveGraph`]; the
//! tracker derives its readouts from the progress signal.
//!
//! Frames are sampled by seeking rather than by accumulating ticks, so frame
//! `i` at a given rate is always evaluated at exactly `i / fps`.

use serde::{Deserialize, Serialize};
use stepline_animation::{AnimationScheduler, Easing, Timeline, TimelineId, TrackId};
use stepline_core::{ReactiveGraph, Signal};

use crate::axis::AxisConfig;
use crate::camera::{CameraEmphasis, CameraState};
use crate::error::{EmptyCurveError, Result};
use crate::response::ResponseData;
use crate::tracker::{ProgressTracker, TrackerPhase, TrackerReadout};

/// Highest frame rate the scene will sample at.
pub const MAX_FPS: u32 = 1000;

/// Scene pacing, in seconds, plus the camera emphasis at the peak.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneTiming {
    pub lead_in: f64,
    /// Time spent drawing the whole curve, split at the peak
    pub draw_duration: f64,
    pub hold: f64,
    pub tail: f64,
    pub zoom: f64,
    pub follow: f64,
    pub fps: u32,
}

impl Default for SceneTiming {
    fn default() -> Self {
        Self {
            lead_in: 0.5,
            draw_duration: 6.0,
            hold: 0.2,
            tail: 0.8,
            zoom: 1.5,
            follow: 0.5,
            fps: 60,
        }
    }
}

impl SceneTiming {
    pub fn emphasis(&self) -> CameraEmphasis {
        CameraEmphasis::new(self.zoom, self.follow)
    }
}

/// Everything needed to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneFrame {
    pub index: usize,
    pub time: f64,
    pub progress: f64,
    pub camera: CameraState,
    pub readout: TrackerReadout,
    pub phase: TrackerPhase,
}

struct SceneTracks {
    progress: TrackId,
    camera_x: TrackId,
    camera_y: TrackId,
    scale: TrackId,
}

struct CameraSignals {
    x: Signal<f64>,
    y: Signal<f64>,
    scale: Signal<f64>,
}

pub struct ResponsePlotScene {
    axis: AxisConfig,
    timing: SceneTiming,
    graph: ReactiveGraph,
    tracker: ProgressTracker,
    camera: CameraSignals,
    scheduler: AnimationScheduler,
    timeline: TimelineId,
    tracks: SceneTracks,
    camera_target: CameraState,
}

impl ResponsePlotScene {
    pub fn new(axis: AxisConfig, data: &ResponseData, timing: SceneTiming) -> Result<Self> {
        let curve = data.to_polyline(&axis);
        if curve.is_empty() {
            return Err(EmptyCurveError.into());
        }

        let mut graph = ReactiveGraph::new();
        let tracker = ProgressTracker::new(&mut graph, axis, curve)?;
        let camera = CameraSignals {
            x: graph.create_signal(0.0f64),
            y: graph.create_signal(0.0f64),
            scale: graph.create_signal(1.0f64),
        };

        let camera_target = timing.emphasis().target(&axis, data.peak_point());
        let (timeline, tracks) = build_timeline(&timing, data.peak_time_percentage, camera_target);
        tracing::debug!(
            duration = timeline.duration(),
            peak_fraction = data.peak_time_percentage,
            "response plot timeline built"
        );

        let mut scheduler = AnimationScheduler::new();
        scheduler.set_target_fps(timing.fps);
        let timeline = scheduler.add_timeline(timeline);
        scheduler.bind(timeline, tracks.progress, tracker.progress_signal());
        scheduler.bind(timeline, tracks.camera_x, camera.x);
        scheduler.bind(timeline, tracks.camera_y, camera.y);
        scheduler.bind(timeline, tracks.scale, camera.scale);

        Ok(Self {
            axis,
            timing,
            graph,
            tracker,
            camera,
            scheduler,
            timeline,
            tracks,
            camera_target,
        })
    }

    pub fn axis(&self) -> &AxisConfig {
        &self.axis
    }

    pub fn timing(&self) -> &SceneTiming {
        &self.timing
    }

    /// Camera pose at the end of the approach to the peak.
    pub fn camera_target(&self) -> CameraState {
        self.camera_target
    }

    pub fn duration(&self) -> f64 {
        self.scheduler
            .get_timeline(self.timeline)
            .map(Timeline::duration)
            .unwrap_or(0.0)
    }

    /// Progress the timeline would publish at `time`, without touching the
    /// scene state.
    pub fn progress_at(&self, time: f64) -> f64 {
        self.scheduler
            .get_timeline(self.timeline)
            .and_then(|t| t.value_at(self.tracks.progress, time))
            .unwrap_or(0.0)
    }

    /// Evaluate the scene at `time` (clamped to the scene duration, NaN
    /// reads as zero). The frame index is the nearest frame at the scene's
    /// own rate.
    ///
    /// Seeking backwards is allowed here: the scene republishes the
    /// timeline's value rather than advancing the tracker by hand.
    pub fn frame_at(&mut self, time: f64) -> SceneFrame {
        let time = if time.is_nan() {
            0.0
        } else {
            time.clamp(0.0, self.duration())
        };
        let index = (time * self.timing.fps.max(1) as f64).round() as usize;
        self.frame(index, time)
    }

    /// Number of frames [`frame_iter`](Self::frame_iter) yields at `fps`.
    pub fn frame_count(&self, fps: u32) -> usize {
        let fps = fps.clamp(1, MAX_FPS);
        // Rounding noise in the duration must not add a frame.
        (self.duration() * fps as f64 - 1e-9).ceil().max(0.0) as usize + 1
    }

    /// Frames at `fps` from time zero through the end of the scene, evaluated
    /// lazily. `fps` is clamped to `1..=MAX_FPS`.
    pub fn frame_iter(&mut self, fps: u32) -> impl Iterator<Item = SceneFrame> + '_ {
        let fps = fps.clamp(1, MAX_FPS);
        let count = self.frame_count(fps);
        let duration = self.duration();
        (0..count).map(move |i| {
            let time = (i as f64 / fps as f64).min(duration);
            self.frame(i, time)
        })
    }

    /// Every frame at `fps`, collected.
    pub fn frames(&mut self, fps: u32) -> Vec<SceneFrame> {
        self.frame_iter(fps).collect()
    }

    fn frame(&mut self, index: usize, time: f64) -> SceneFrame {
        if let Some(timeline) = self.scheduler.get_timeline_mut(self.timeline) {
            timeline.seek(time);
        }
        self.scheduler.sync(&mut self.graph);

        let g = &self.graph;
        SceneFrame {
            index,
            time,
            progress: self.tracker.progress(g),
            camera: CameraState::new(
                g.get(self.camera.x).unwrap_or(0.0),
                g.get(self.camera.y).unwrap_or(0.0),
                g.get(self.camera.scale).unwrap_or(1.0),
            ),
            readout: self.tracker.readout(g),
            phase: self.tracker.phase(),
        }
    }
}

fn build_timeline(
    timing: &SceneTiming,
    peak_fraction: f64,
    target: CameraState,
) -> (Timeline, SceneTracks) {
    let mut timeline = Timeline::new();
    let tracks = SceneTracks {
        progress: timeline.add_track("progress", 0.0),
        camera_x: timeline.add_track("camera.x", 0.0),
        camera_y: timeline.add_track("camera.y", 0.0),
        scale: timeline.add_track("camera.scale", 1.0),
    };

    let peak_time = peak_fraction * timing.draw_duration;
    let rest = timing.draw_duration - peak_time;
    let camera_ease = Easing::EaseInOutQuad;

    timeline.wait(timing.lead_in);
    timeline.all(|p| {
        p.tween(tracks.progress, peak_fraction, peak_time, Easing::Linear)
            .tween(tracks.camera_x, target.x, peak_time, camera_ease)
            .tween(tracks.camera_y, target.y, peak_time, camera_ease)
            .tween(tracks.scale, target.scale, peak_time, camera_ease);
    });
    timeline.wait(timing.hold);
    timeline.all(|p| {
        p.tween(tracks.progress, 1.0, rest, Easing::Linear)
            .tween(tracks.camera_x, 0.0, rest, camera_ease)
            .tween(tracks.camera_y, 0.0, rest, camera_ease)
            .tween(tracks.scale, 1.0, rest, camera_ease);
    });
    timeline.wait(timing.tail);

    (timeline, tracks)
}
