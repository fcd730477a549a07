//! Stepline CLI
//!
//! Generates second-order step responses and traces the animated
//! response-plot scene built on them.

mod config;
mod generate;
mod project;
mod reduce;
mod trace;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::StepConfig;

/// Step-response plots, from simulation to animated frames
#[derive(Parser, Debug)]
#[command(name = "stepline")]
#[command(about = "Simulate step responses and trace animated response plots")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./stepline.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default stepline.toml
    Init {
        /// Directory to create it in
        #[arg(long, default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Simulate the configured system and write the response data file
    Generate {
        /// Output JSON file
        #[arg(short, long, default_value = "response_points.json")]
        output: PathBuf,

        /// Simulate the PID loop instead of the bare plant
        #[arg(long)]
        closed_loop: bool,
    },

    /// Print per-frame scene state as CSV
    Trace {
        /// Response data file produced by `generate`
        #[arg(short, long)]
        data: PathBuf,

        /// Frames per second (defaults to [scene] fps)
        #[arg(long)]
        fps: Option<u32>,
    },

    /// Print the PID loop reduction
    Reduce,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Init { path, force } = &cli.command {
        project::init_project(path, *force)?;
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => StepConfig::load_file(path)?,
        None => StepConfig::load_from_dir(&std::env::current_dir()?)?,
    };

    match cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Generate {
            output,
            closed_loop,
        } => generate::run(&config, &output, closed_loop),
        Commands::Trace { data, fps } => {
            let stdout = std::io::stdout();
            trace::run(&config, &data, fps, &mut stdout.lock())
        }
        Commands::Reduce => {
            print!("{}", reduce::render(&config)?);
            Ok(())
        }
    }
}
