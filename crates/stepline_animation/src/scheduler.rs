//! Animation scheduler
//!
//! Owns the active timelines, advances them each frame and writes bound
//! track values into the reactive graph.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use stepline_core::{ReactiveGraph, Signal};

use crate::timeline::{Timeline, TrackId};

new_key_type! {
    pub struct TimelineId;
}

/// A track whose value is mirrored into a signal
struct Binding {
    track: TrackId,
    signal: Signal<f64>,
}

struct ScheduledTimeline {
    timeline: Timeline,
    bindings: SmallVec<[Binding; 4]>,
}

/// The animation scheduler that ticks all active timelines
pub struct AnimationScheduler {
    timelines: SlotMap<TimelineId, ScheduledTimeline>,
    target_fps: u32,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            timelines: SlotMap::with_key(),
            target_fps: 60,
        }
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.max(1);
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Length of one fixed frame in seconds
    pub fn frame_duration(&self) -> f64 {
        1.0 / self.target_fps as f64
    }

    pub fn add_timeline(&mut self, timeline: Timeline) -> TimelineId {
        self.timelines.insert(ScheduledTimeline {
            timeline,
            bindings: SmallVec::new(),
        })
    }

    pub fn get_timeline(&self, id: TimelineId) -> Option<&Timeline> {
        self.timelines.get(id).map(|s| &s.timeline)
    }

    pub fn get_timeline_mut(&mut self, id: TimelineId) -> Option<&mut Timeline> {
        self.timelines.get_mut(id).map(|s| &mut s.timeline)
    }

    pub fn remove_timeline(&mut self, id: TimelineId) -> Option<Timeline> {
        self.timelines.remove(id).map(|s| s.timeline)
    }

    /// Mirror a track of a timeline into `signal` on every tick.
    ///
    /// Returns `false` if the timeline does not exist.
    pub fn bind(&mut self, id: TimelineId, track: TrackId, signal: Signal<f64>) -> bool {
        let Some(scheduled) = self.timelines.get_mut(id) else {
            return false;
        };
        scheduled.bindings.push(Binding { track, signal });
        true
    }

    /// Advance by exactly one frame at the target frame rate
    pub fn tick_frame(&mut self, graph: &mut ReactiveGraph) {
        self.advance(self.frame_duration(), graph);
    }

    /// Advance every timeline by `dt` seconds and publish bound values
    pub fn advance(&mut self, dt: f64, graph: &mut ReactiveGraph) {
        for (_, scheduled) in self.timelines.iter_mut() {
            scheduled.timeline.tick(dt);
        }
        self.sync(graph);
    }

    /// Write the current value of every bound track into its signal
    pub fn sync(&self, graph: &mut ReactiveGraph) {
        graph.batch(|g| {
            for (_, scheduled) in self.timelines.iter() {
                for binding in &scheduled.bindings {
                    if let Some(value) = scheduled.timeline.value(binding.track) {
                        g.set(binding.signal, value);
                    }
                }
            }
        });
    }

    /// Check if any timelines are still playing
    pub fn has_active_animations(&self) -> bool {
        self.timelines.iter().any(|(_, s)| s.timeline.is_playing())
    }

    /// Get the number of timelines in the scheduler
    pub fn timeline_count(&self) -> usize {
        self.timelines.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
