use crate::point::CanvasPoint;

pub fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

pub fn lerp_point(a: CanvasPoint, b: CanvasPoint, t: f64) -> CanvasPoint {
    CanvasPoint::new(lerp_f64(a.x, b.x, t), lerp_f64(a.y, b.y, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_clamps_t() {
        assert_eq!(lerp_f64(0.0, 10.0, -1.0), 0.0);
        assert_eq!(lerp_f64(0.0, 10.0, 2.0), 10.0);
    }

    #[test]
    fn lerp_point_hits_midpoint() {
        let mid = lerp_point(CanvasPoint::new(0.0, 0.0), CanvasPoint::new(4.0, -2.0), 0.5);
        assert_eq!(mid, CanvasPoint::new(2.0, -1.0));
    }
}
