//! Command-line interface
//!
//! ```text
//! double-pendulum [CONFIG] [OUTPUT] [ANGLES] [--positions-only] [--stride N]
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::config::SimulationConfig;
use crate::error::Error;
use crate::output::{derive_angle_path, TrajectoryWriter};
use crate::simulation::{SimulationOptions, Simulator};
use crate::utils::constants::{DEFAULT_CONFIG_PATH, DEFAULT_OUTPUT_PATH, SAMPLE_STRIDE};

/// Simulate a double pendulum and write its sampled trajectory
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "double-pendulum")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file with KEY=value lines; defaults are used if it can't be read
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Position output file (time x1 y1 x2 y2)
    #[arg(default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Angle output file (time theta1 theta2) [default: OUTPUT with "_angles" before the extension]
    pub angles: Option<PathBuf>,

    /// Only write the position file
    #[arg(long)]
    pub positions_only: bool,

    /// Write every N-th step
    #[arg(long, value_name = "N", default_value_t = SAMPLE_STRIDE, value_parser = parse_stride)]
    pub stride: usize,
}

impl Cli {
    /// Angle file to write, if any
    pub fn angle_path(&self) -> Option<PathBuf> {
        self.options().emit_angles.then(|| {
            self.angles
                .clone()
                .unwrap_or_else(|| derive_angle_path(&self.output))
        })
    }

    pub fn options(&self) -> SimulationOptions {
        SimulationOptions {
            sample_stride: self.stride,
            emit_angles: !self.positions_only,
        }
    }
}

/// Load the configuration, run the simulation and write the output files
///
/// Returns the number of samples written.
pub fn run(cli: &Cli) -> Result<usize, Error> {
    let config = SimulationConfig::load(&cli.config)?;
    let options = cli.options();
    let angle_path = cli.angle_path();

    let simulator = Simulator::new(&config, options)?;
    let writer = TrajectoryWriter::create(&cli.output, angle_path.as_deref(), &config)?;
    let rows = simulator.write_to(writer)?;

    log::info!("wrote {} samples to {}", rows, cli.output.display());
    if let Some(path) = angle_path {
        log::info!("wrote angles to {}", path.display());
    }
    Ok(rows)
}

fn parse_stride(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("stride must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
