//! Transfer functions as ratios of polynomials
//!
//! Combinators never cancel common factors, so `series` followed by
//! `unity_feedback` yields exactly the textbook closed-loop expression.

use std::fmt;

use crate::error::{ControlError, Result};
use crate::polynomial::Polynomial;

#[derive(Clone, Debug, PartialEq)]
pub struct TransferFunction {
    num: Polynomial,
    den: Polynomial,
}

impl TransferFunction {
    pub fn new(num: Polynomial, den: Polynomial) -> Result<Self> {
        if den.is_zero() {
            return Err(ControlError::ZeroDenominator);
        }
        Ok(Self { num, den })
    }

    /// A constant gain.
    pub fn gain(k: f64) -> Self {
        Self {
            num: Polynomial::constant(k),
            den: Polynomial::constant(1.0),
        }
    }

    /// `Kp + Ki / s + Kd s`, written over the common denominator `s`.
    pub fn pid(kp: f64, ki: f64, kd: f64) -> Self {
        Self {
            num: Polynomial::new([kd, kp, ki]),
            den: Polynomial::s(),
        }
    }

    /// `wn^2 / (s^2 + 2 zeta wn s + wn^2)`
    pub fn second_order(wn: f64, zeta: f64) -> Self {
        let wn2 = wn * wn;
        Self {
            num: Polynomial::constant(wn2),
            den: Polynomial::new([1.0, 2.0 * zeta * wn, wn2]),
        }
    }

    pub fn numerator(&self) -> &Polynomial {
        &self.num
    }

    pub fn denominator(&self) -> &Polynomial {
        &self.den
    }

    /// `self` followed by `next`.
    pub fn series(&self, next: &TransferFunction) -> Self {
        Self {
            num: &self.num * &next.num,
            den: &self.den * &next.den,
        }
    }

    pub fn parallel(&self, other: &TransferFunction) -> Self {
        Self {
            num: &(&self.num * &other.den) + &(&other.num * &self.den),
            den: &self.den * &other.den,
        }
    }

    /// Negative feedback through `h`: `G / (1 + G H)`.
    pub fn feedback(&self, h: &TransferFunction) -> Self {
        Self {
            num: &self.num * &h.den,
            den: &(&self.den * &h.den) + &(&self.num * &h.num),
        }
    }

    /// `G / (1 + G)`
    pub fn unity_feedback(&self) -> Self {
        Self {
            num: self.num.clone(),
            den: &self.den + &self.num,
        }
    }

    /// Real-valued evaluation at `s`. `None` at a pole.
    pub fn eval(&self, s: f64) -> Option<f64> {
        let d = self.den.eval(s);
        if d == 0.0 {
            None
        } else {
            Some(self.num.eval(s) / d)
        }
    }

    /// Steady-state gain for a unit step, `H(0)`. Factors of `s` shared by
    /// numerator and denominator cancel first; `None` when a pole at the
    /// origin remains.
    pub fn dc_gain(&self) -> Option<f64> {
        let shift = self.num.trailing_zeros().min(self.den.trailing_zeros());
        let d = self.den.coeff(shift);
        if d == 0.0 {
            None
        } else {
            Some(self.num.coeff(shift) / d)
        }
    }

    pub fn is_proper(&self) -> bool {
        self.num.degree() <= self.den.degree()
    }

    pub fn is_strictly_proper(&self) -> bool {
        self.num.degree() < self.den.degree() || self.num.is_zero()
    }

    pub fn order(&self) -> usize {
        self.den.degree()
    }
}

impl fmt::Display for TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) / ({})", self.num, self.den)
    }
}
