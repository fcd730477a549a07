//! Real polynomials in `s`
//!
//! Coefficients are stored in descending powers, `[a0, a1, .., an]` for
//! `a0 s^n + a1 s^(n-1) + .. + an`. Leading zeros are trimmed on
//! construction so the degree is always the index of the first nonzero
//! coefficient. The zero polynomial is `[0]` with degree 0.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use smallvec::{smallvec, SmallVec};

#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    coeffs: SmallVec<[f64; 4]>,
}

impl Polynomial {
    pub fn new(coeffs: impl IntoIterator<Item = f64>) -> Self {
        let mut coeffs: SmallVec<[f64; 4]> = coeffs.into_iter().collect();
        let leading = coeffs.iter().position(|c| *c != 0.0);
        match leading {
            Some(0) => {}
            Some(i) => {
                coeffs.drain(..i);
            }
            None => coeffs = smallvec![0.0],
        }
        Self { coeffs }
    }

    pub fn zero() -> Self {
        Self::constant(0.0)
    }

    pub fn constant(c: f64) -> Self {
        Self {
            coeffs: smallvec![c],
        }
    }

    /// `c s^power`
    pub fn monomial(c: f64, power: usize) -> Self {
        let mut coeffs: SmallVec<[f64; 4]> = smallvec![0.0; power + 1];
        coeffs[0] = c;
        Self::new(coeffs)
    }

    /// The polynomial `s`.
    pub fn s() -> Self {
        Self::monomial(1.0, 1)
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|c| *c == 0.0)
    }

    pub fn leading(&self) -> f64 {
        self.coeffs[0]
    }

    /// Coefficient of `s^power`.
    pub fn coeff(&self, power: usize) -> f64 {
        let n = self.degree();
        if power > n {
            0.0
        } else {
            self.coeffs[n - power]
        }
    }

    /// Multiplicity of the root at `s = 0`.
    pub fn trailing_zeros(&self) -> usize {
        self.coeffs.iter().rev().take_while(|c| **c == 0.0).count()
    }

    /// Horner evaluation.
    pub fn eval(&self, s: f64) -> f64 {
        self.coeffs.iter().fold(0.0, |acc, c| acc * s + c)
    }

    pub fn scale(&self, k: f64) -> Self {
        Self::new(self.coeffs.iter().map(|c| c * k))
    }

    /// Coefficients padded with leading zeros to `len` entries.
    pub(crate) fn padded(&self, len: usize) -> SmallVec<[f64; 4]> {
        let mut out: SmallVec<[f64; 4]> = smallvec![0.0; len.saturating_sub(self.coeffs.len())];
        out.extend_from_slice(&self.coeffs);
        out
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<f64> for Polynomial {
    fn from(c: f64) -> Self {
        Self::constant(c)
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let a = self.padded(len);
        let b = rhs.padded(len);
        Polynomial::new(a.iter().zip(&b).map(|(x, y)| x + y))
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        self + &(-rhs)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        let mut out: SmallVec<[f64; 4]> = smallvec![0.0; self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                out[i + j] += a * b;
            }
        }
        Polynomial::new(out)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(-1.0)
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Polynomial) -> Polynomial {
        &self + &rhs
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Polynomial) -> Polynomial {
        &self - &rhs
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Polynomial {
        &self * &rhs
    }
}

impl fmt::Display for Polynomial {
    /// Renders as `2s^2 - s + 0.5`; unit coefficients are elided.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let n = self.degree();
        let mut first = true;
        for (i, &c) in self.coeffs.iter().enumerate() {
            if c == 0.0 {
                continue;
            }
            let power = n - i;
            let magnitude = c.abs();
            if first {
                if c < 0.0 {
                    write!(f, "-")?;
                }
            } else {
                write!(f, " {} ", if c < 0.0 { '-' } else { '+' })?;
            }
            first = false;

            if magnitude != 1.0 || power == 0 {
                write!(f, "{magnitude}")?;
            }
            match power {
                0 => {}
                1 => write!(f, "s")?,
                _ => write!(f, "s^{power}")?,
            }
        }
        Ok(())
    }
}
