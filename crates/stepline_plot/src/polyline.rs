//! Polyline with arc-length sampling
//!
//! Cumulative segment lengths are computed once, so sampling is a binary
//! search plus one interpolation.

use crate::axis::AxisConfig;
use crate::error::EmptyCurveError;
use crate::interpolate::lerp_point;
use crate::point::{CanvasPoint, DataPoint};

/// An open polyline in canvas space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    points: Vec<CanvasPoint>,
    /// `cumulative[i]` is the path length from the first vertex to vertex `i`.
    cumulative: Vec<f64>,
}

impl Polyline {
    pub fn new(points: Vec<CanvasPoint>) -> Self {
        let mut cumulative = Vec::with_capacity(points.len());
        let mut acc = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                acc += points[i - 1].distance(*p);
            }
            cumulative.push(acc);
        }
        Self { points, cumulative }
    }

    /// Map data samples through `axis` and connect them in order.
    pub fn from_data<I>(samples: I, axis: &AxisConfig) -> Self
    where
        I: IntoIterator<Item = DataPoint>,
    {
        Self::new(samples.into_iter().map(|p| axis.to_canvas(p)).collect())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[CanvasPoint] {
        &self.points
    }

    pub fn first(&self) -> Option<CanvasPoint> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<CanvasPoint> {
        self.points.last().copied()
    }

    pub fn total_length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// The point at fraction `f` of the total path length.
    ///
    /// `f` is clamped to `[0, 1]` (NaN counts as 0). `f = 0` and `f = 1`
    /// return the first and last vertex exactly.
    pub fn point_at_percentage(&self, f: f64) -> Result<CanvasPoint, EmptyCurveError> {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return Err(EmptyCurveError);
        };

        let f = if f.is_nan() { 0.0 } else { f.clamp(0.0, 1.0) };
        if f <= 0.0 {
            return Ok(first);
        }
        if f >= 1.0 {
            return Ok(last);
        }

        let total = self.total_length();
        if total <= 0.0 {
            return Ok(first);
        }

        let target = f * total;
        let i = self.segment_end(target);
        let start_len = self.cumulative[i - 1];
        let seg_len = self.cumulative[i] - start_len;
        if seg_len <= 0.0 {
            return Ok(self.points[i]);
        }
        let local = (target - start_len) / seg_len;
        Ok(lerp_point(self.points[i - 1], self.points[i], local))
    }

    /// The drawn prefix of the curve at fraction `f`: every vertex before
    /// the sampled point, then the sampled point itself.
    pub fn visible_points(&self, f: f64) -> Result<Vec<CanvasPoint>, EmptyCurveError> {
        let end = self.point_at_percentage(f)?;
        let f = if f.is_nan() { 0.0 } else { f.clamp(0.0, 1.0) };
        let target = f * self.total_length();

        let mut out: Vec<CanvasPoint> = self
            .points
            .iter()
            .zip(&self.cumulative)
            .take_while(|(_, len)| **len < target)
            .map(|(p, _)| *p)
            .collect();
        out.push(end);
        Ok(out)
    }

    /// Index of the first vertex whose cumulative length reaches `target`.
    ///
    /// Callers guarantee `0 < target < total`, so the result is in `1..len`.
    fn segment_end(&self, target: f64) -> usize {
        let mut lo = 1usize;
        let mut hi = self.cumulative.len() - 1;
        while lo < hi {
            let mid = (lo + hi) / 2;
            if self.cumulative[mid] < target {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> CanvasPoint {
        CanvasPoint::new(x, y)
    }

    #[test]
    fn endpoints_are_exact() {
        let line = Polyline::new(vec![p(0.0, 0.0), p(3.0, 4.0), p(3.0, 10.0)]);
        assert_eq!(line.point_at_percentage(0.0), Ok(p(0.0, 0.0)));
        assert_eq!(line.point_at_percentage(1.0), Ok(p(3.0, 10.0)));
        assert_eq!(line.point_at_percentage(-2.0), Ok(p(0.0, 0.0)));
        assert_eq!(line.point_at_percentage(7.0), Ok(p(3.0, 10.0)));
        assert_eq!(line.total_length(), 11.0);
    }

    #[test]
    fn samples_by_length_not_by_index() {
        let line = Polyline::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(10.0, 0.0)]);
        let mid = line.point_at_percentage(0.5).unwrap();
        assert!((mid.x - 5.0).abs() < 1e-12);
        assert_eq!(mid.y, 0.0);
    }

    #[test]
    fn sample_lands_on_second_segment() {
        let line = Polyline::new(vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0)]);
        let q = line.point_at_percentage(0.75).unwrap();
        assert!((q.x - 4.0).abs() < 1e-12);
        assert!((q.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_curve_fails() {
        let line = Polyline::new(Vec::new());
        assert_eq!(line.point_at_percentage(0.5), Err(EmptyCurveError));
        assert_eq!(line.visible_points(0.5), Err(EmptyCurveError));
    }

    #[test]
    fn degenerate_curves_return_first_point() {
        let single = Polyline::new(vec![p(2.0, 2.0)]);
        assert_eq!(single.point_at_percentage(0.5), Ok(p(2.0, 2.0)));

        let stacked = Polyline::new(vec![p(1.0, 1.0), p(1.0, 1.0)]);
        assert_eq!(stacked.point_at_percentage(0.3), Ok(p(1.0, 1.0)));
    }

    #[test]
    fn zero_length_segments_are_skipped() {
        let line = Polyline::new(vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 0.0), p(4.0, 0.0)]);
        let q = line.point_at_percentage(0.75).unwrap();
        assert!((q.x - 3.0).abs() < 1e-12);
    }

    #[test]
    fn visible_prefix_ends_at_sample() {
        let line = Polyline::new(vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0)]);
        assert_eq!(line.visible_points(0.0), Ok(vec![p(0.0, 0.0)]));

        let half = line.visible_points(0.5).unwrap();
        assert_eq!(half, vec![p(0.0, 0.0), p(4.0, 0.0)]);

        let all = line.visible_points(1.0).unwrap();
        assert_eq!(all, vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0)]);
    }
}
