//! Stepline configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use stepline_control::{PidGains, SecondOrder};
use stepline_plot::{AxisConfig, AxisSpec, SceneTiming};

pub const CONFIG_FILE: &str = "stepline.toml";

/// Top-level Stepline configuration (stepline.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StepConfig {
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub axis: AxisSpec,
    #[serde(default)]
    pub scene: SceneTiming,
}

/// The simulated plant and its sampling
#[derive(Debug, Deserialize, Serialize)]
pub struct SystemConfig {
    #[serde(default = "default_natural_frequency")]
    pub natural_frequency: f64,
    #[serde(default = "default_damping_ratio")]
    pub damping_ratio: f64,
    /// Simulated time span in seconds
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default = "default_samples")]
    pub samples: usize,
}

fn default_natural_frequency() -> f64 {
    2.0
}

fn default_damping_ratio() -> f64 {
    0.5
}

fn default_duration() -> f64 {
    10.0
}

fn default_samples() -> usize {
    5000
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            natural_frequency: default_natural_frequency(),
            damping_ratio: default_damping_ratio(),
            duration: default_duration(),
            samples: default_samples(),
        }
    }
}

/// PID gains for the closed loop
#[derive(Debug, Deserialize, Serialize)]
pub struct ControllerConfig {
    #[serde(default = "default_kp")]
    pub kp: f64,
    #[serde(default)]
    pub ki: f64,
    #[serde(default)]
    pub kd: f64,
}

fn default_kp() -> f64 {
    1.0
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            kp: default_kp(),
            ki: 0.0,
            kd: 0.0,
        }
    }
}

impl StepConfig {
    /// Load configuration from a directory (looks for stepline.toml) or an
    /// explicit file. A directory without one yields the defaults.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        if path.is_file() {
            return Self::load_file(path);
        }

        let config_path = path.join(CONFIG_FILE);
        if !config_path.exists() {
            tracing::debug!(
                "no {} in {}, using defaults",
                CONFIG_FILE,
                path.display()
            );
            return Ok(Self::default());
        }
        Self::load_file(&config_path)
    }

    /// Load a specific file; it must exist.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn plant(&self) -> Result<SecondOrder> {
        SecondOrder::new(self.system.natural_frequency, self.system.damping_ratio)
            .context("Invalid [system] section")
    }

    pub fn gains(&self) -> PidGains {
        PidGains::new(self.controller.kp, self.controller.ki, self.controller.kd)
    }

    pub fn axis_config(&self) -> Result<AxisConfig> {
        AxisConfig::try_from(self.axis).context("Invalid [axis] section")
    }
}
