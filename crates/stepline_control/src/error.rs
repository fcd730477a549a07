//! Control algebra errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControlError {
    #[error("transfer function denominator is zero")]
    ZeroDenominator,

    /// Numerator degree exceeds denominator degree
    #[error("improper transfer function: numerator degree {numerator} > {denominator}")]
    Improper { numerator: usize, denominator: usize },

    #[error("a step response needs at least 2 samples, got {0}")]
    TooFewSamples(usize),

    #[error("simulation duration must be positive and finite, got {0}")]
    InvalidDuration(f64),

    #[error("invalid system parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, ControlError>;
