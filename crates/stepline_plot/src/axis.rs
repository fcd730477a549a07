//! Axis configuration and the data <-> canvas mapping
//!
//! The canvas origin sits at the centre of a `width` x `height` canvas and
//! y grows downward. Data are drawn inside the canvas inset by `padding` on
//! every side: `x_min` lands on the left edge of that rectangle, `x_max` on
//! the right edge, `y_min` on the bottom edge and `y_max` on the top edge.

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, Result};
use crate::format::format_fixed;
use crate::point::{CanvasPoint, DataPoint};
use crate::scale::LinearScale;

/// Length of an x tick mark below the axis, in y data units.
const X_TICK_LENGTH: f64 = 0.05;
/// Offset of an x tick label below the axis, in y data units.
const X_LABEL_OFFSET: f64 = 0.15;
/// Length of a y tick mark left of the axis, in x data units.
const Y_TICK_LENGTH: f64 = 0.2;
/// Offset of a y tick label left of the axis, in x data units.
const Y_LABEL_OFFSET: f64 = 0.5;
/// How far the axis arrows extend past the data range.
const X_ARROW_OVERHANG: f64 = 0.2;
const Y_ARROW_OVERHANG: f64 = 0.1;

/// Unvalidated axis settings, as read from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    #[serde(default = "default_x_min")]
    pub x_min: f64,
    #[serde(default = "default_x_max")]
    pub x_max: f64,
    #[serde(default = "default_y_min")]
    pub y_min: f64,
    #[serde(default = "default_y_max")]
    pub y_max: f64,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_padding")]
    pub padding: f64,
}

fn default_x_min() -> f64 {
    0.0
}

fn default_x_max() -> f64 {
    10.0
}

fn default_y_min() -> f64 {
    0.0
}

fn default_y_max() -> f64 {
    2.0
}

fn default_width() -> f64 {
    1000.0
}

fn default_height() -> f64 {
    600.0
}

fn default_padding() -> f64 {
    60.0
}

impl Default for AxisSpec {
    fn default() -> Self {
        Self {
            x_min: default_x_min(),
            x_max: default_x_max(),
            y_min: default_y_min(),
            y_max: default_y_max(),
            width: default_width(),
            height: default_height(),
            padding: default_padding(),
        }
    }
}

/// Validated, immutable mapping between data space and canvas space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisConfig {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    width: f64,
    height: f64,
    padding: f64,
}

/// The padded drawing rectangle in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotRect {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn contains(&self, p: CanvasPoint) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

/// A tick mark with its label, all in canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    /// Where the tick meets the axis
    pub anchor: CanvasPoint,
    /// Outer end of the tick mark
    pub tick_end: CanvasPoint,
    pub label_position: CanvasPoint,
    pub label: String,
}

impl AxisConfig {
    pub fn new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        width: f64,
        height: f64,
        padding: f64,
    ) -> Result<Self> {
        let values = [x_min, x_max, y_min, y_max, width, height, padding];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(PlotError::InvalidAxis(
                "all axis values must be finite".to_string(),
            ));
        }
        if x_max <= x_min {
            return Err(PlotError::InvalidAxis(format!(
                "x_max ({x_max}) must be greater than x_min ({x_min})"
            )));
        }
        if y_max <= y_min {
            return Err(PlotError::InvalidAxis(format!(
                "y_max ({y_max}) must be greater than y_min ({y_min})"
            )));
        }
        if width <= 0.0 || height <= 0.0 || padding <= 0.0 {
            return Err(PlotError::InvalidAxis(format!(
                "width ({width}), height ({height}) and padding ({padding}) must be positive"
            )));
        }
        if padding >= width.min(height) / 2.0 {
            return Err(PlotError::InvalidAxis(format!(
                "padding ({padding}) leaves no drawing area in a {width}x{height} canvas"
            )));
        }

        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
            width,
            height,
            padding,
        })
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn plot_rect(&self) -> PlotRect {
        PlotRect {
            left: -self.width / 2.0 + self.padding,
            top: -self.height / 2.0 + self.padding,
            right: self.width / 2.0 - self.padding,
            bottom: self.height / 2.0 - self.padding,
        }
    }

    pub fn x_scale(&self) -> LinearScale {
        let rect = self.plot_rect();
        LinearScale::new(self.x_min, self.x_max, rect.left, rect.right)
    }

    /// Inverted so larger values are visually higher.
    pub fn y_scale(&self) -> LinearScale {
        let rect = self.plot_rect();
        LinearScale::new(self.y_min, self.y_max, rect.bottom, rect.top)
    }

    /// Forward mapping. Values outside the axis range land outside the
    /// drawing rectangle; they are not clamped.
    pub fn to_canvas(&self, p: DataPoint) -> CanvasPoint {
        CanvasPoint::new(self.x_scale().map(p.t), self.y_scale().map(p.y))
    }

    /// Exact inverse of [`AxisConfig::to_canvas`].
    pub fn to_data(&self, p: CanvasPoint) -> DataPoint {
        DataPoint::new(self.x_scale().invert(p.x), self.y_scale().invert(p.y))
    }

    /// Shorthand for `to_canvas(DataPoint::new(t, y))`.
    pub fn map(&self, t: f64, y: f64) -> CanvasPoint {
        self.to_canvas(DataPoint::new(t, y))
    }

    /// Horizontal axis arrow, from the origin corner past `x_max`.
    pub fn x_axis_line(&self) -> [CanvasPoint; 2] {
        [
            self.map(self.x_min, self.y_min),
            self.map(self.x_max + X_ARROW_OVERHANG, self.y_min),
        ]
    }

    /// Vertical axis arrow, from the origin corner past `y_max`.
    pub fn y_axis_line(&self) -> [CanvasPoint; 2] {
        [
            self.map(self.x_min, self.y_min),
            self.map(self.x_min, self.y_max + Y_ARROW_OVERHANG),
        ]
    }

    /// `count` evenly spaced ticks along the time axis.
    pub fn default_x_ticks(&self, count: usize, decimals: usize) -> Vec<AxisTick> {
        self.x_ticks(&self.x_scale().ticks(count), decimals)
    }

    /// `count` evenly spaced ticks along the value axis.
    pub fn default_y_ticks(&self, count: usize, decimals: usize) -> Vec<AxisTick> {
        self.y_ticks(&self.y_scale().ticks(count), decimals)
    }

    pub fn x_ticks(&self, values: &[f64], decimals: usize) -> Vec<AxisTick> {
        let base = self.y_min;
        values
            .iter()
            .map(|&v| AxisTick {
                value: v,
                anchor: self.map(v, base),
                tick_end: self.map(v, base - X_TICK_LENGTH),
                label_position: self.map(v, base - X_LABEL_OFFSET),
                label: format_fixed(v, decimals),
            })
            .collect()
    }

    pub fn y_ticks(&self, values: &[f64], decimals: usize) -> Vec<AxisTick> {
        let base = self.x_min;
        values
            .iter()
            .map(|&v| AxisTick {
                value: v,
                anchor: self.map(base, v),
                tick_end: self.map(base - Y_TICK_LENGTH, v),
                label_position: self.map(base - Y_LABEL_OFFSET, v),
                label: format_fixed(v, decimals),
            })
            .collect()
    }
}

impl TryFrom<AxisSpec> for AxisConfig {
    type Error = PlotError;

    fn try_from(spec: AxisSpec) -> Result<Self> {
        AxisConfig::new(
            spec.x_min,
            spec.x_max,
            spec.y_min,
            spec.y_max,
            spec.width,
            spec.height,
            spec.padding,
        )
    }
}

impl From<AxisConfig> for AxisSpec {
    fn from(cfg: AxisConfig) -> Self {
        Self {
            x_min: cfg.x_min,
            x_max: cfg.x_max,
            y_min: cfg.y_min,
            y_max: cfg.y_max,
            width: cfg.width,
            height: cfg.height,
            padding: cfg.padding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> AxisConfig {
        AxisConfig::new(0.0, 10.0, 0.0, 2.0, 1000.0, 600.0, 60.0).unwrap()
    }

    #[test]
    fn maps_reference_corners() {
        let cfg = reference();
        assert_eq!(cfg.map(0.0, 0.0), CanvasPoint::new(-440.0, 240.0));
        assert_eq!(cfg.map(10.0, 2.0), CanvasPoint::new(440.0, -240.0));
    }

    #[test]
    fn rejects_degenerate_configs() {
        assert!(AxisConfig::new(1.0, 1.0, 0.0, 2.0, 100.0, 100.0, 10.0).is_err());
        assert!(AxisConfig::new(0.0, 1.0, 2.0, 0.0, 100.0, 100.0, 10.0).is_err());
        assert!(AxisConfig::new(0.0, 1.0, 0.0, 2.0, 0.0, 100.0, 10.0).is_err());
        assert!(AxisConfig::new(0.0, 1.0, 0.0, 2.0, 100.0, 100.0, 0.0).is_err());
        assert!(AxisConfig::new(0.0, 1.0, 0.0, 2.0, 100.0, 60.0, 30.0).is_err());
        assert!(AxisConfig::new(0.0, f64::NAN, 0.0, 2.0, 100.0, 60.0, 10.0).is_err());
    }

    #[test]
    fn out_of_range_values_are_not_clamped() {
        let cfg = reference();
        let p = cfg.map(-1.0, 3.0);
        assert!(!cfg.plot_rect().contains(p));
        let back = cfg.to_data(p);
        assert!((back.t + 1.0).abs() < 1e-9);
        assert!((back.y - 3.0).abs() < 1e-9);
    }

    #[test]
    fn ticks_sit_on_the_axes() {
        let cfg = reference();
        let xs = cfg.default_x_ticks(6, 0);
        let labels: Vec<_> = xs.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["0", "2", "4", "6", "8", "10"]);
        assert!(xs.iter().all(|t| t.anchor.y == 240.0 && t.tick_end.y > t.anchor.y));

        let ys = cfg.default_y_ticks(5, 1);
        assert_eq!(ys[1].label, "0.5");
        assert!(ys.iter().all(|t| t.anchor.x == -440.0 && t.tick_end.x < t.anchor.x));
    }

    #[test]
    fn axis_arrows_overhang_the_range() {
        let cfg = reference();
        let [start, end] = cfg.x_axis_line();
        assert_eq!(start, CanvasPoint::new(-440.0, 240.0));
        assert!(end.x > 440.0);
        let [_, top] = cfg.y_axis_line();
        assert!(top.y < -240.0);
    }

    #[test]
    fn axis_spec_defaults_from_toml() {
        let spec: AxisSpec = toml::from_str("padding = 40.0").unwrap();
        assert_eq!(spec.padding, 40.0);
        assert_eq!(spec.width, 1000.0);
        let cfg = AxisConfig::try_from(spec).unwrap();
        assert_eq!(AxisSpec::from(cfg), spec);
    }
}
