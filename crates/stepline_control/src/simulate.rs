//! Numerical step response
//!
//! A proper transfer function is realised in controllable canonical form and
//! integrated with classic fourth-order Runge-Kutta under a unit step input.
//! Output samples sit on an evenly spaced grid over `[0, duration]`; the
//! integrator takes as many sub-steps between samples as needed to keep its
//! step at or below [`MAX_STEP`].

use smallvec::SmallVec;

use crate::error::{ControlError, Result};
use crate::transfer::TransferFunction;

/// Largest internal integration step, in seconds.
pub const MAX_STEP: f64 = 1e-3;

type State = SmallVec<[f64; 4]>;

/// `x' = A x + B u`, `y = C x + D u` with `A` in companion form.
#[derive(Clone, Debug, PartialEq)]
pub struct StateSpace {
    /// Denominator coefficients `a1..an` after normalising `a0` to one
    a: State,
    /// Output weights, one per state
    c: State,
    d: f64,
}

impl StateSpace {
    pub fn from_transfer(tf: &TransferFunction) -> Result<Self> {
        if !tf.is_proper() {
            return Err(ControlError::Improper {
                numerator: tf.numerator().degree(),
                denominator: tf.denominator().degree(),
            });
        }
        let den = tf.denominator();
        let n = den.degree();
        let a0 = den.leading();

        let a: State = den.coeffs()[1..].iter().map(|c| c / a0).collect();
        let b: State = tf.numerator().padded(n + 1).iter().map(|c| c / a0).collect();
        let d = b[0];
        // c[i] weighs state x_(i+1), which carries s^i of the numerator.
        let c: State = (0..n).map(|i| b[n - i] - d * a[n - 1 - i]).collect();

        Ok(Self { a, c, d })
    }

    pub fn order(&self) -> usize {
        self.a.len()
    }

    fn derivative(&self, x: &[f64], u: f64, out: &mut [f64]) {
        let n = x.len();
        if n == 0 {
            return;
        }
        out[..n - 1].copy_from_slice(&x[1..]);
        let feedback: f64 = (0..n).map(|i| self.a[n - 1 - i] * x[i]).sum();
        out[n - 1] = u - feedback;
    }

    fn output(&self, x: &[f64], u: f64) -> f64 {
        self.c.iter().zip(x).map(|(c, x)| c * x).sum::<f64>() + self.d * u
    }

    fn rk4_step(&self, x: &mut State, u: f64, h: f64, scratch: &mut [State; 5]) {
        let n = x.len();
        let [k1, k2, k3, k4, tmp] = scratch;

        self.derivative(x, u, k1);
        for i in 0..n {
            tmp[i] = x[i] + 0.5 * h * k1[i];
        }
        self.derivative(tmp, u, k2);
        for i in 0..n {
            tmp[i] = x[i] + 0.5 * h * k2[i];
        }
        self.derivative(tmp, u, k3);
        for i in 0..n {
            tmp[i] = x[i] + h * k3[i];
        }
        self.derivative(tmp, u, k4);
        for i in 0..n {
            x[i] += h / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
        }
    }
}

/// Unit-step response of `tf` sampled at `samples` evenly spaced times
/// from `0` to `duration` inclusive, as `[time, value]` pairs.
pub fn step_response(
    tf: &TransferFunction,
    duration: f64,
    samples: usize,
) -> Result<Vec<[f64; 2]>> {
    if samples < 2 {
        return Err(ControlError::TooFewSamples(samples));
    }
    if !(duration.is_finite() && duration > 0.0) {
        return Err(ControlError::InvalidDuration(duration));
    }
    let sys = StateSpace::from_transfer(tf)?;
    let n = sys.order();

    let dt = duration / (samples - 1) as f64;
    let substeps = (dt / MAX_STEP).ceil().max(1.0) as usize;
    let h = dt / substeps as f64;
    tracing::debug!(order = n, samples, substeps, "simulating step response");

    let u = 1.0;
    let mut x: State = SmallVec::from_elem(0.0, n);
    let mut scratch: [State; 5] = std::array::from_fn(|_| SmallVec::from_elem(0.0, n));
    let mut out = Vec::with_capacity(samples);
    // The step arrives at t = 0, so a direct feedthrough shows at once.
    out.push([0.0, sys.output(&x, u)]);
    for i in 1..samples {
        for _ in 0..substeps {
            sys.rk4_step(&mut x, u, h, &mut scratch);
        }
        let t = if i == samples - 1 {
            duration
        } else {
            i as f64 * dt
        };
        out.push([t, sys.output(&x, u)]);
    }
    Ok(out)
}

/// The sample with the largest value. Ties keep the earliest.
pub fn peak(samples: &[[f64; 2]]) -> Option<[f64; 2]> {
    samples
        .iter()
        .copied()
        .fold(None, |best: Option<[f64; 2]>, p| match best {
            Some(b) if b[1] >= p[1] => Some(b),
            _ => Some(p),
        })
}
