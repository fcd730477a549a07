//! Integration tests for reactive signals + timeline animation
//!
//! These tests verify that:
//! - Timelines drive signals through the scheduler
//! - Derived values follow animated signals frame by frame
//! - Effects observe every published frame, once per frame

use std::cell::RefCell;
use std::rc::Rc;

use stepline_animation::{AnimationScheduler, Easing, Timeline};
use stepline_core::reactive::ReactiveGraph;

/// A derived value recomputes from an animated signal on every frame
#[test]
fn test_timeline_drives_derived_value() {
    let mut graph = ReactiveGraph::new();
    let progress = graph.create_signal(0.0f64);
    let percent = graph.create_derived(move |g| g.get(progress).unwrap_or(0.0) * 100.0);

    let mut timeline = Timeline::new();
    let track = timeline.add_track("progress", 0.0);
    timeline.wait(0.5).tween(track, 1.0, 1.0, Easing::Linear);
    timeline.start();

    let mut scheduler = AnimationScheduler::new();
    scheduler.set_target_fps(4);
    let id = scheduler.add_timeline(timeline);
    scheduler.bind(id, track, progress);

    // Two frames cover the lead-in.
    scheduler.tick_frame(&mut graph);
    scheduler.tick_frame(&mut graph);
    assert_eq!(graph.get_derived(percent), Some(0.0));

    scheduler.tick_frame(&mut graph);
    let value = graph.get_derived(percent).unwrap();
    assert!((value - 25.0).abs() < 1e-9);

    while scheduler.has_active_animations() {
        scheduler.tick_frame(&mut graph);
    }
    assert_eq!(graph.get_derived(percent), Some(100.0));
}

/// Parallel tracks bound to separate signals update in the same batch
#[test]
fn test_parallel_tracks_publish_once_per_frame() {
    let mut graph = ReactiveGraph::new();
    let x = graph.create_signal(0.0f64);
    let scale = graph.create_signal(1.0f64);
    let frames = Rc::new(RefCell::new(Vec::new()));

    let frames_clone = frames.clone();
    let _effect = graph.create_effect(move |g| {
        let x = g.get(x).unwrap_or(0.0);
        let scale = g.get(scale).unwrap_or(0.0);
        frames_clone.borrow_mut().push((x, scale));
    });

    let mut timeline = Timeline::new();
    let x_track = timeline.add_track("camera.x", 0.0);
    let scale_track = timeline.add_track("camera.scale", 1.0);
    timeline.all(|p| {
        p.tween(x_track, 100.0, 1.0, Easing::Linear)
            .tween(scale_track, 2.0, 1.0, Easing::Linear);
    });
    timeline.start();

    let mut scheduler = AnimationScheduler::new();
    scheduler.set_target_fps(2);
    let id = scheduler.add_timeline(timeline);
    scheduler.bind(id, x_track, x);
    scheduler.bind(id, scale_track, scale);

    scheduler.tick_frame(&mut graph);
    scheduler.tick_frame(&mut graph);

    let frames = frames.borrow();
    // Initial run plus one run per frame.
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[1], (50.0, 1.5));
    assert_eq!(frames[2], (100.0, 2.0));
}

/// Seeking and syncing publishes values without advancing time
#[test]
fn test_seek_then_sync() {
    let mut graph = ReactiveGraph::new();
    let value = graph.create_signal(0.0f64);

    let mut timeline = Timeline::new();
    let track = timeline.add_track("v", 0.0);
    timeline.tween(track, 10.0, 2.0, Easing::EaseInOutCubic);

    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.add_timeline(timeline);
    scheduler.bind(id, track, value);

    if let Some(t) = scheduler.get_timeline_mut(id) {
        t.seek(1.0);
    }
    scheduler.sync(&mut graph);
    let v = graph.get(value).unwrap();
    assert!((v - 5.0).abs() < 1e-9);
    assert!(!scheduler.has_active_animations());
}
