//! Stepline Animation System
//!
//! Easing curves, tweened timelines and frame scheduling.
//!
//! # Features
//!
//! - **Easing**: the usual polynomial curves plus CSS-style cubic beziers
//! - **Timelines**: named tracks sequenced with `wait`, `tween` and `all`
//! - **Scheduling**: fixed-step or wall-clock ticking that writes track
//!   values into reactive signals

pub mod easing;
pub mod scheduler;
pub mod timeline;

pub use easing::Easing;
pub use scheduler::{AnimationScheduler, TimelineId};
pub use timeline::{Parallel, Timeline, TrackId};
