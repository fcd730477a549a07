//! Closed-form facts about the standard second-order system
//!
//! `G(s) = wn^2 / (s^2 + 2 zeta wn s + wn^2)` driven by a unit step.

use std::f64::consts::PI;

use crate::error::{ControlError, Result};
use crate::transfer::TransferFunction;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SecondOrder {
    /// Natural frequency, rad/s
    pub wn: f64,
    /// Damping ratio
    pub zeta: f64,
}

impl SecondOrder {
    pub fn new(wn: f64, zeta: f64) -> Result<Self> {
        if !(wn.is_finite() && wn > 0.0) {
            return Err(ControlError::InvalidParameter(format!(
                "natural frequency must be positive, got {wn}"
            )));
        }
        if !(zeta.is_finite() && zeta >= 0.0) {
            return Err(ControlError::InvalidParameter(format!(
                "damping ratio must be non-negative, got {zeta}"
            )));
        }
        Ok(Self { wn, zeta })
    }

    pub fn transfer_function(&self) -> TransferFunction {
        TransferFunction::second_order(self.wn, self.zeta)
    }

    pub fn is_underdamped(&self) -> bool {
        self.zeta < 1.0
    }

    /// `wn sqrt(1 - zeta^2)`, zero unless underdamped.
    pub fn damped_frequency(&self) -> f64 {
        if self.is_underdamped() {
            self.wn * (1.0 - self.zeta * self.zeta).sqrt()
        } else {
            0.0
        }
    }

    /// Time of the first overshoot peak. Zero when there is no overshoot.
    pub fn peak_time(&self) -> f64 {
        if self.is_underdamped() {
            PI / self.damped_frequency()
        } else {
            0.0
        }
    }

    /// Value at the first peak. One when there is no overshoot.
    pub fn peak_value(&self) -> f64 {
        1.0 + self.overshoot()
    }

    /// Fractional overshoot, `exp(-pi zeta / sqrt(1 - zeta^2))`.
    pub fn overshoot(&self) -> f64 {
        if self.is_underdamped() {
            let z = self.zeta;
            (-PI * z / (1.0 - z * z).sqrt()).exp()
        } else {
            0.0
        }
    }

    /// 2% settling time estimate, `4 / (zeta wn)`. Infinite when undamped.
    pub fn settling_time(&self) -> f64 {
        if self.zeta == 0.0 {
            f64::INFINITY
        } else {
            4.0 / (self.zeta * self.wn)
        }
    }

    /// Analytic unit-step response at `t >= 0`.
    pub fn step_value(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let (wn, z) = (self.wn, self.zeta);
        if z < 1.0 {
            let wd = self.damped_frequency();
            let s = (1.0 - z * z).sqrt();
            1.0 - (-z * wn * t).exp() * ((wd * t).cos() + z / s * (wd * t).sin())
        } else if z == 1.0 {
            1.0 - (-wn * t).exp() * (1.0 + wn * t)
        } else {
            let r = (z * z - 1.0).sqrt();
            let s1 = -wn * (z - r);
            let s2 = -wn * (z + r);
            1.0 + (s2 * (s1 * t).exp() - s1 * (s2 * t).exp()) / (s1 - s2)
        }
    }
}
