//! Response data file
//!
//! The file is a JSON object:
//!
//! ```json
//! { "points": [[0.0, 0.0], [0.002, 0.00001], ...],
//!   "peak_time_percentage": 0.1814,
//!   "peak_value": 1.163 }
//! ```
//!
//! `points` are `[time, value]` pairs in ascending time. The peak scalars
//! only steer the scene's camera; the mapper never reads them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::axis::AxisConfig;
use crate::error::ResponseError;
use crate::point::DataPoint;
use crate::polyline::Polyline;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseData {
    pub points: Vec<[f64; 2]>,
    /// Time of the peak as a fraction of the simulated duration
    pub peak_time_percentage: f64,
    pub peak_value: f64,
}

impl ResponseData {
    pub fn new(
        points: Vec<DataPoint>,
        peak_time_percentage: f64,
        peak_value: f64,
    ) -> Result<Self, ResponseError> {
        let data = Self {
            points: points.into_iter().map(Into::into).collect(),
            peak_time_percentage,
            peak_value,
        };
        data.validate()?;
        Ok(data)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ResponseError> {
        let data: ResponseData = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    pub fn load(path: &Path) -> Result<Self, ResponseError> {
        let content = fs::read_to_string(path)?;
        let data = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            points = data.points.len(),
            "response data loaded"
        );
        Ok(data)
    }

    pub fn to_json_string(&self) -> Result<String, ResponseError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ResponseError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    pub fn data_points(&self) -> Vec<DataPoint> {
        self.points.iter().map(|&p| DataPoint::from(p)).collect()
    }

    /// First and last sample time, if there are samples.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some((first[0], last[0])),
            _ => None,
        }
    }

    /// The peak as a data point, placing the peak fraction on the sampled
    /// time span.
    pub fn peak_point(&self) -> DataPoint {
        let t = self
            .time_span()
            .map(|(start, end)| start + self.peak_time_percentage * (end - start))
            .unwrap_or(0.0);
        DataPoint::new(t, self.peak_value)
    }

    /// The samples mapped onto the canvas, in order.
    pub fn to_polyline(&self, axis: &AxisConfig) -> Polyline {
        Polyline::from_data(self.data_points(), axis)
    }

    fn validate(&self) -> Result<(), ResponseError> {
        if !(0.0..=1.0).contains(&self.peak_time_percentage) {
            return Err(ResponseError::Invalid(format!(
                "peak_time_percentage must be within [0, 1], got {}",
                self.peak_time_percentage
            )));
        }
        if !self.peak_value.is_finite() {
            return Err(ResponseError::Invalid(format!(
                "peak_value must be finite, got {}",
                self.peak_value
            )));
        }
        if let Some(i) = self
            .points
            .iter()
            .position(|p| !p[0].is_finite() || !p[1].is_finite())
        {
            return Err(ResponseError::Invalid(format!(
                "point {i} is not finite"
            )));
        }
        Ok(())
    }
}
