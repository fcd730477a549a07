//! Plot error types

use thiserror::Error;

/// Sampling was requested on a curve with no points.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot sample a point on an empty curve")]
pub struct EmptyCurveError;

/// Errors raised while configuring or driving a response plot
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    /// Axis ranges or canvas dimensions cannot produce a drawing region
    #[error("invalid axis configuration: {0}")]
    InvalidAxis(String),

    #[error(transparent)]
    EmptyCurve(#[from] EmptyCurveError),

    /// Progress only moves forward once tracking has started
    #[error("progress cannot move backwards (current {current}, requested {requested})")]
    ProgressRegressed { current: f64, requested: f64 },

    #[error("progress must be a number, got {0}")]
    InvalidProgress(f64),
}

/// Errors raised while reading or writing a response data file
#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("response data I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed response data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid response data: {0}")]
    Invalid(String),
}

/// Result type for plot operations
pub type Result<T> = std::result::Result<T, PlotError>;
