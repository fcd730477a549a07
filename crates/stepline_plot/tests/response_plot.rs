use stepline_plot::prelude::*;
use stepline_plot::{current_point, current_value, CameraState};

fn reference_axis() -> AxisConfig {
    AxisConfig::new(0.0, 10.0, 0.0, 2.0, 1000.0, 600.0, 60.0).unwrap()
}

/// Underdamped-looking samples: rise, overshoot, settle.
fn sample_response() -> ResponseData {
    let points = (0..=200)
        .map(|i| {
            let t = i as f64 * 0.05;
            let y = 1.0 - (-t).exp() * (2.0 * t).cos();
            DataPoint::new(t, y)
        })
        .collect();
    ResponseData::new(points, 0.157, 1.208).unwrap()
}

#[test]
fn reference_corners() {
    let axis = reference_axis();
    assert_eq!(axis.to_canvas(DataPoint::new(0.0, 0.0)), CanvasPoint::new(-440.0, 240.0));
    assert_eq!(axis.to_canvas(DataPoint::new(10.0, 2.0)), CanvasPoint::new(440.0, -240.0));
}

#[test]
fn round_trip_over_a_grid() {
    let configs = [
        reference_axis(),
        AxisConfig::new(-3.5, 7.25, -1.0, 1.0, 640.0, 480.0, 32.0).unwrap(),
        AxisConfig::new(0.0, 1e-3, 1e4, 1e4 + 5.0, 333.0, 777.0, 1.0).unwrap(),
    ];
    for axis in configs {
        for i in 0..=20 {
            for j in 0..=20 {
                let t = axis.x_min() + (axis.x_max() - axis.x_min()) * i as f64 / 20.0;
                let y = axis.y_min() + (axis.y_max() - axis.y_min()) * j as f64 / 20.0;
                let back = axis.to_data(axis.to_canvas(DataPoint::new(t, y)));
                assert!((back.t - t).abs() < 1e-9, "t {t} came back as {}", back.t);
                assert!((back.y - y).abs() < 1e-9, "y {y} came back as {}", back.y);
            }
        }
    }
}

#[test]
fn boundaries_land_on_padded_rectangle() {
    let axis = AxisConfig::new(-1.0, 1.0, 5.0, 6.0, 800.0, 400.0, 40.0).unwrap();
    let rect = axis.plot_rect();
    let bottom_left = axis.to_canvas(DataPoint::new(-1.0, 5.0));
    let top_right = axis.to_canvas(DataPoint::new(1.0, 6.0));
    assert_eq!(bottom_left, CanvasPoint::new(rect.left, rect.bottom));
    assert_eq!(top_right, CanvasPoint::new(rect.right, rect.top));

    let narrow = AxisConfig::new(0.0, 5e-13, 0.0, 5e-13, 1000.0, 600.0, 60.0).unwrap();
    assert_eq!(narrow.to_canvas(DataPoint::new(0.0, 0.0)), CanvasPoint::new(-440.0, 240.0));
    assert_eq!(narrow.to_canvas(DataPoint::new(5e-13, 5e-13)), CanvasPoint::new(440.0, -240.0));
    let mid = narrow.to_canvas(DataPoint::new(2.5e-13, 2.5e-13));
    assert!(mid.x.abs() < 1e-9 && mid.y.abs() < 1e-9);
}

#[test]
fn mapping_is_monotonic() {
    let axis = reference_axis();
    let xs: Vec<f64> = (0..=10)
        .map(|i| axis.to_canvas(DataPoint::new(i as f64, 1.0)).x)
        .collect();
    assert!(xs.windows(2).all(|w| w[0] < w[1]));

    let ys: Vec<f64> = (0..=10)
        .map(|i| axis.to_canvas(DataPoint::new(5.0, i as f64 * 0.2)).y)
        .collect();
    assert!(ys.windows(2).all(|w| w[0] > w[1]));
}

#[test]
fn degenerate_axis_is_rejected_at_construction() {
    assert!(matches!(
        AxisConfig::new(0.0, 10.0, 0.0, 2.0, 1000.0, 600.0, 300.0),
        Err(PlotError::InvalidAxis(_))
    ));
    assert!(AxisConfig::new(5.0, 5.0, 0.0, 2.0, 1000.0, 600.0, 60.0).is_err());
}

#[test]
fn progress_bounds_hit_the_ends() {
    let axis = reference_axis();
    let data = sample_response();
    let curve = data.to_polyline(&axis);
    assert_eq!(current_point(&curve, 0.0), Ok(curve.points()[0]));
    assert_eq!(current_point(&curve, 1.0), curve.last().ok_or(EmptyCurveError));

    let end = current_value(&curve, &axis, 1.0).unwrap();
    assert!((end.t - 10.0).abs() < 1e-9);
}

#[test]
fn empty_curve_yields_no_point() {
    let axis = reference_axis();
    let curve = Polyline::from_data(Vec::new(), &axis);
    assert_eq!(current_point(&curve, 0.5), Err(EmptyCurveError));
    assert_eq!(current_value(&curve, &axis, 0.5), Err(EmptyCurveError));
}

#[test]
fn tracker_values_follow_the_curve() {
    let axis = reference_axis();
    let data = sample_response();
    let mut graph = stepline_core::ReactiveGraph::new();
    let tracker = ProgressTracker::new(&mut graph, axis, data.to_polyline(&axis)).unwrap();

    let mut last_t = tracker.current_t(&graph);
    for step in 1..=50 {
        tracker.set_progress(&mut graph, step as f64 / 50.0).unwrap();
        let t = tracker.current_t(&graph);
        assert!(t >= last_t, "time went backwards at step {step}");
        last_t = t;
    }
    assert_eq!(tracker.phase(), TrackerPhase::Tracking);
    assert!((last_t - 10.0).abs() < 1e-9);
}

#[test]
fn scene_plays_through_from_json() {
    let json = sample_response().to_json_string().unwrap();
    let data = ResponseData::from_json_str(&json).unwrap();
    let mut scene =
        ResponsePlotScene::new(reference_axis(), &data, SceneTiming::default()).unwrap();

    let frames = scene.frames(30);
    let first = &frames[0];
    assert_eq!(first.progress, 0.0);
    assert_eq!(first.phase, TrackerPhase::Idle);
    assert_eq!(first.readout.point, CanvasPoint::new(-440.0, 240.0));

    let last = frames.last().unwrap();
    assert_eq!(last.progress, 1.0);
    assert_eq!(last.camera, CameraState::IDENTITY);
    assert!(frames.windows(2).all(|w| w[1].progress >= w[0].progress));

    let zoomed = frames.iter().map(|f| f.camera.scale).fold(0.0, f64::max);
    assert!((zoomed - 1.5).abs() < 1e-3);
}
