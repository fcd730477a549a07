#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    pub fn new(domain_min: f64, domain_max: f64, range_min: f64, range_max: f64) -> Self {
        Self {
            domain_min,
            domain_max,
            range_min,
            range_max,
        }
    }

    pub fn map(&self, value: f64) -> f64 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    pub fn invert(&self, px: f64) -> f64 {
        let t = (px - self.range_min) / (self.range_max - self.range_min);
        self.domain_min + t * (self.domain_max - self.domain_min)
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let n = count.max(2);
        let mut out = Vec::with_capacity(n);
        let span = self.domain_max - self.domain_min;
        for i in 0..n {
            let t = i as f64 / (n - 1) as f64;
            out.push(self.domain_min + span * t);
        }
        out
    }
}
