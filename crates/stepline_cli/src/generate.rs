//! `stepline generate`: simulate a step response and write the data file

use anyhow::{Context, Result};
use std::path::Path;

use stepline_control::{closed_loop, peak, step_response, TransferFunction};
use stepline_plot::{DataPoint, ResponseData};

use crate::config::StepConfig;

/// Where the peak lands, in the units the data file and summary use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakSummary {
    pub time: f64,
    pub value: f64,
    /// `time / duration`, clamped to `[0, 1]`
    pub fraction: f64,
}

impl PeakSummary {
    pub fn describe(&self) -> String {
        format!(
            "Peak occurs at {:.2}s ({:.1}% of animation)\nPeak value: {:.3}",
            self.time,
            self.fraction * 100.0,
            self.value
        )
    }
}

/// Simulate the configured system.
///
/// The open plant uses the closed-form peak; the closed loop has no simple
/// formula, so its peak is read off the samples.
pub fn simulate(config: &StepConfig, closed: bool) -> Result<(ResponseData, PeakSummary)> {
    let plant = config.plant()?;
    let duration = config.system.duration;

    let tf: TransferFunction = if closed {
        closed_loop(config.gains(), plant)
    } else {
        plant.transfer_function()
    };
    tracing::info!(system = %tf, "simulating step response");

    let samples = step_response(&tf, duration, config.system.samples)
        .context("Step response simulation failed")?;

    let (time, value) = if closed {
        let [t, y] = peak(&samples).unwrap_or([0.0, 0.0]);
        (t, y)
    } else {
        (plant.peak_time(), plant.peak_value())
    };
    let summary = PeakSummary {
        time,
        value,
        fraction: (time / duration).clamp(0.0, 1.0),
    };

    let points = samples.into_iter().map(DataPoint::from).collect();
    let data = ResponseData::new(points, summary.fraction, summary.value)
        .context("Simulated response is not a valid data file")?;
    Ok((data, summary))
}

pub fn run(config: &StepConfig, output: &Path, closed: bool) -> Result<()> {
    let (data, summary) = simulate(config, closed)?;
    data.save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!(
        "wrote {} points to {}",
        data.points.len(),
        output.display()
    );
    println!("{}", summary.describe());
    Ok(())
}
