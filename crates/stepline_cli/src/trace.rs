//! `stepline trace`: evaluate the response-plot scene frame by frame

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::Path;

use stepline_plot::{ResponseData, ResponsePlotScene, SceneFrame, MAX_FPS};

use crate::config::StepConfig;

pub const CSV_HEADER: &str = "frame,time,progress,t,y,camera_x,camera_y,scale";

pub fn csv_row(frame: &SceneFrame) -> String {
    format!(
        "{},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
        frame.index,
        frame.time,
        frame.progress,
        frame.readout.data.t,
        frame.readout.data.y,
        frame.camera.x,
        frame.camera.y,
        frame.camera.scale
    )
}

/// Build the scene for `data` with the configured axis and timing.
pub fn build_scene(config: &StepConfig, data: &ResponseData) -> Result<ResponsePlotScene> {
    let axis = config.axis_config()?;
    ResponsePlotScene::new(axis, data, config.scene).context("Failed to build the scene")
}

/// Write one CSV row per frame, evaluating frames as they are written.
pub fn write_frames(scene: &mut ResponsePlotScene, fps: u32, out: &mut impl Write) -> Result<()> {
    if fps == 0 || fps > MAX_FPS {
        bail!("fps must be between 1 and {MAX_FPS}, got {fps}");
    }
    tracing::debug!(
        frames = scene.frame_count(fps),
        duration = scene.duration(),
        "tracing scene"
    );
    writeln!(out, "{CSV_HEADER}")?;
    for frame in scene.frame_iter(fps) {
        writeln!(out, "{}", csv_row(&frame))?;
    }
    Ok(())
}

pub fn run(
    config: &StepConfig,
    data_path: &Path,
    fps: Option<u32>,
    out: &mut impl Write,
) -> Result<()> {
    let data = ResponseData::load(data_path)
        .with_context(|| format!("Failed to load {}", data_path.display()))?;
    let mut scene = build_scene(config, &data)?;
    write_frames(&mut scene, fps.unwrap_or(config.scene.fps), out)
}
