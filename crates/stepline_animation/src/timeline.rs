//! Timeline orchestration for tweened tracks
//!
//! A timeline owns named tracks (one scalar each) and a sequencing cursor.
//! `wait` moves the cursor, `tween` animates one track starting at the
//! cursor and then moves past it, and `all` starts several tweens at the
//! cursor and moves past the longest one. Each tween starts from whatever
//! value its track has at that moment, so sequences compose without the
//! caller tracking intermediate values.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::easing::Easing;

new_key_type! {
    pub struct TrackId;
}

/// One tween on a track
#[derive(Clone, Copy, Debug)]
struct Segment {
    /// Start time in seconds from timeline start
    start: f64,
    duration: f64,
    from: f64,
    to: f64,
    easing: Easing,
}

impl Segment {
    fn end(&self) -> f64 {
        self.start + self.duration
    }

    fn sample(&self, time: f64) -> f64 {
        if self.duration <= 0.0 || time >= self.end() {
            return self.to;
        }
        let t = ((time - self.start) / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * self.easing.apply(t)
    }
}

struct Track {
    name: String,
    initial: f64,
    /// Sorted by start time; later insertions win ties.
    segments: SmallVec<[Segment; 4]>,
}

impl Track {
    fn sample(&self, time: f64) -> f64 {
        match self.segments.iter().rev().find(|s| s.start <= time) {
            Some(segment) => segment.sample(time),
            None => self.initial,
        }
    }

    fn insert(&mut self, segment: Segment) {
        let idx = self
            .segments
            .iter()
            .position(|s| s.start > segment.start)
            .unwrap_or(self.segments.len());
        self.segments.insert(idx, segment);
    }
}

/// A timeline of tweened tracks with a playhead
pub struct Timeline {
    tracks: SlotMap<TrackId, Track>,
    cursor: f64,
    duration: f64,
    current_time: f64,
    playing: bool,
    loop_count: i32, // -1 for infinite
    current_loop: i32,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            tracks: SlotMap::with_key(),
            cursor: 0.0,
            duration: 0.0,
            current_time: 0.0,
            playing: false,
            loop_count: 1,
            current_loop: 0,
        }
    }

    /// Add a track holding `initial` until its first tween starts
    pub fn add_track(&mut self, name: impl Into<String>, initial: f64) -> TrackId {
        self.tracks.insert(Track {
            name: name.into(),
            initial,
            segments: SmallVec::new(),
        })
    }

    pub fn track_id(&self, name: &str) -> Option<TrackId> {
        self.tracks
            .iter()
            .find(|(_, track)| track.name == name)
            .map(|(id, _)| id)
    }

    pub fn track_name(&self, id: TrackId) -> Option<&str> {
        self.tracks.get(id).map(|t| t.name.as_str())
    }

    pub fn tracks(&self) -> impl Iterator<Item = (TrackId, &str)> {
        self.tracks.iter().map(|(id, t)| (id, t.name.as_str()))
    }

    // ------------------------------------------------------------------
    // Sequencing
    // ------------------------------------------------------------------

    /// Where the next `wait`/`tween`/`all` starts, in seconds
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    /// Advance the cursor without animating anything
    pub fn wait(&mut self, seconds: f64) -> &mut Self {
        self.cursor += sanitize_duration(seconds);
        self.duration = self.duration.max(self.cursor);
        self
    }

    /// Tween one track from the cursor, then move the cursor past it
    pub fn tween(&mut self, track: TrackId, to: f64, duration: f64, easing: Easing) -> &mut Self {
        let start = self.cursor;
        let duration = self.push_segment(track, start, to, duration, easing);
        self.cursor = start + duration;
        self
    }

    /// Run a group of tweens in parallel from the cursor
    ///
    /// The cursor ends up after the longest tween of the group.
    pub fn all<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Parallel<'_>),
    {
        let start = self.cursor;
        let mut group = Parallel {
            timeline: self,
            start,
            longest: 0.0,
        };
        build(&mut group);
        let longest = group.longest;
        self.cursor = start + longest;
        self.duration = self.duration.max(self.cursor);
        tracing::trace!(start, longest, "parallel group sequenced");
        self
    }

    fn push_segment(
        &mut self,
        track: TrackId,
        start: f64,
        to: f64,
        duration: f64,
        easing: Easing,
    ) -> f64 {
        let duration = sanitize_duration(duration);
        let Some(from) = self.value_at(track, start) else {
            tracing::warn!(?track, "tween on unknown track ignored");
            return 0.0;
        };
        if let Some(t) = self.tracks.get_mut(track) {
            t.insert(Segment {
                start,
                duration,
                from,
                to,
                easing,
            });
        }
        self.duration = self.duration.max(start + duration);
        duration
    }

    // ------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------

    pub fn start(&mut self) {
        self.current_time = 0.0;
        self.current_loop = 0;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn set_loop(&mut self, count: i32) {
        self.loop_count = count;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_finished(&self) -> bool {
        !self.playing && self.current_time >= self.duration
    }

    /// Total length in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Move the playhead without changing the playing state. NaN seeks to
    /// the start.
    pub fn seek(&mut self, time: f64) {
        let time = if time.is_nan() { 0.0 } else { time };
        self.current_time = time.clamp(0.0, self.duration);
    }

    /// Advance the timeline by `dt` seconds
    pub fn tick(&mut self, dt: f64) {
        if !self.playing {
            return;
        }

        self.current_time += dt.max(0.0);

        if self.current_time >= self.duration {
            if self.loop_count == -1 || self.current_loop < self.loop_count - 1 {
                self.current_time = if self.duration > 0.0 {
                    self.current_time % self.duration
                } else {
                    0.0
                };
                self.current_loop += 1;
            } else {
                self.current_time = self.duration;
                self.playing = false;
            }
        }
    }

    /// Value of a track at the playhead
    pub fn value(&self, id: TrackId) -> Option<f64> {
        self.value_at(id, self.current_time)
    }

    /// Value of a track at an arbitrary time
    pub fn value_at(&self, id: TrackId, time: f64) -> Option<f64> {
        self.tracks.get(id).map(|track| track.sample(time))
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a group of tweens that start together
pub struct Parallel<'a> {
    timeline: &'a mut Timeline,
    start: f64,
    longest: f64,
}

impl Parallel<'_> {
    pub fn tween(&mut self, track: TrackId, to: f64, duration: f64, easing: Easing) -> &mut Self {
        let duration = self
            .timeline
            .push_segment(track, self.start, to, duration, easing);
        self.longest = self.longest.max(duration);
        self
    }

    /// Start time shared by every tween in the group
    pub fn start(&self) -> f64 {
        self.start
    }
}

fn sanitize_duration(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds >= 0.0 {
        seconds
    } else {
        tracing::warn!(seconds, "invalid duration clamped to zero");
        0.0
    }
}
