//! Stepline Core Runtime
//!
//! Foundational primitives shared by the Stepline crates:
//!
//! - **Reactive Signals**: input values owned by the animation timeline
//! - **Derived Values**: lazily recomputed quantities read by a scene
//! - **Effects**: callbacks re-run whenever a value they read changes
//!
//! # Example
//!
//! ```rust
//! use stepline_core::reactive::ReactiveGraph;
//!
//! let mut graph = ReactiveGraph::new();
//!
//! // Create a signal
//! let progress = graph.create_signal(0.0f64);
//!
//! // Create a derived value
//! let percent = graph.create_derived(move |g| {
//!     g.get(progress).unwrap_or(0.0) * 100.0
//! });
//!
//! // Update the signal
//! graph.set(progress, 0.25);
//! assert_eq!(graph.get_derived(percent), Some(25.0));
//! ```

pub mod reactive;

pub use reactive::{Derived, DerivedId, Effect, EffectId, ReactiveGraph, Signal, SignalId};
