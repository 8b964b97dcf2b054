//! Simulation driver
//!
//! Runs a [`Solver`] for the configured number of steps and samples the
//! trajectory at a fixed stride. Sampling is lazy: [`Simulator::run`]
//! returns an iterator that advances the solver only as far as needed to
//! produce the next [`SampleRecord`].

use std::io::Write;

use nalgebra::Point2;

use crate::config::{ConfigError, SimulationConfig};
use crate::dynamics::{total_energy, Kinematics};
use crate::error::Error;
use crate::output::TrajectoryWriter;
use crate::solvers::{Solver, SolverError, Verlet};
use crate::utils::constants::SAMPLE_STRIDE;

/// Options controlling what a run emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationOptions {
    /// A sample is taken every `sample_stride` steps (at least 1)
    pub sample_stride: usize,
    /// Write the angle file next to the position file
    pub emit_angles: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            sample_stride: SAMPLE_STRIDE,
            emit_angles: true,
        }
    }
}

/// One sampled point of the trajectory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRecord {
    /// Step index the sample was taken at
    pub step: usize,
    /// Simulated time, accumulated as a running sum of `dt`
    pub time: f64,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub theta1: f64,
    pub theta2: f64,
}

impl SampleRecord {
    pub fn position1(&self) -> Point2<f64> {
        Point2::new(self.x1, self.y1)
    }

    pub fn position2(&self) -> Point2<f64> {
        Point2::new(self.x2, self.y2)
    }
}

/// Single batch run of the double pendulum
///
/// # Example
///
/// ```
/// use double_pendulum::{SimulationConfig, SimulationOptions, Simulator};
///
/// let config = SimulationConfig { total_time: 1.0, ..Default::default() };
/// let samples = Simulator::new(&config, SimulationOptions::default())
///     .unwrap()
///     .run()
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
///
/// // 100 steps at dt = 0.01, sampled at steps 0 and 100
/// assert_eq!(samples.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator<S: Solver = Verlet> {
    config: SimulationConfig,
    options: SimulationOptions,
    solver: S,
}

impl Simulator<Verlet> {
    /// Create a run using the Verlet solver
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`SimulationConfig::validate`].
    pub fn new(config: &SimulationConfig, options: SimulationOptions) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::with_solver(config, options, Verlet::new(config))
    }
}

impl<S: Solver> Simulator<S> {
    /// Create a run around an existing solver, which is reset first
    ///
    /// A zero or non-finite `dt` would make the step count unbounded, so the
    /// configuration is validated here.
    pub fn with_solver(
        config: &SimulationConfig,
        options: SimulationOptions,
        mut solver: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        solver.reset();
        Ok(Self {
            config: *config,
            options,
            solver,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    /// Number of samples the run will produce
    pub fn sample_count(&self) -> usize {
        self.config.steps() / self.stride() + 1
    }

    fn stride(&self) -> usize {
        self.options.sample_stride.max(1)
    }

    /// Start the run
    ///
    /// The simulator is consumed; a new run needs a new simulator.
    pub fn run(self) -> Samples<S> {
        let stride = self.stride();
        let steps = self.config.steps();
        let state = self.solver.state();
        let initial_energy = total_energy(&self.config, &state.theta, &state.omega);

        log::info!(
            "simulating {} steps of dt={} ({} samples, stride {})",
            steps,
            self.config.dt,
            steps / stride + 1,
            stride
        );

        Samples {
            kinematics: Kinematics::new(&self.config),
            config: self.config,
            solver: self.solver,
            stride,
            steps,
            index: 0,
            time: 0.0,
            emitted: 0,
            initial_energy,
        }
    }

    /// Run to completion, streaming every sample into `writer`
    ///
    /// Returns the number of samples written.
    pub fn write_to<W: Write>(self, mut writer: TrajectoryWriter<W>) -> Result<usize, Error> {
        for record in self.run() {
            writer.write(&record?)?;
        }
        Ok(writer.finish()?)
    }
}

/// Lazy sequence of samples from one run
///
/// Step 0 bootstraps the solver, steps `1..=steps` advance it. A record is
/// produced after every step whose index is a multiple of the stride.
#[derive(Debug)]
pub struct Samples<S: Solver> {
    config: SimulationConfig,
    kinematics: Kinematics,
    solver: S,
    stride: usize,
    steps: usize,
    index: usize,
    time: f64,
    emitted: usize,
    initial_energy: f64,
}

impl<S: Solver> Samples<S> {
    /// Solver driving this run
    pub fn solver(&self) -> &S {
        &self.solver
    }

    fn advance(&mut self) -> Result<(), SolverError> {
        if self.index == 0 {
            self.solver.bootstrap()
        } else {
            self.solver.step()
        }
    }

    fn record(&self) -> SampleRecord {
        let theta = self.solver.state().theta;
        let p1 = self.kinematics.position1(theta[0]);
        let p2 = self.kinematics.position2(theta[0], theta[1]);

        SampleRecord {
            step: self.index,
            time: self.time,
            x1: p1.x,
            y1: p1.y,
            x2: p2.x,
            y2: p2.y,
            theta1: theta[0],
            theta2: theta[1],
        }
    }

    fn log_summary(&self) {
        let state = self.solver.state();
        let energy = total_energy(&self.config, &state.theta, &state.omega);
        let drift = relative_drift(self.initial_energy, energy);

        log::info!(
            "simulation finished: {} steps, {} samples, relative energy drift {:.3e}",
            self.steps,
            self.emitted,
            drift
        );
    }
}

impl<S: Solver> Iterator for Samples<S> {
    type Item = Result<SampleRecord, SolverError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index <= self.steps {
            if let Err(err) = self.advance() {
                // Stop the run for good
                self.index = self.steps + 1;
                return Some(Err(err));
            }

            let sample = (self.index % self.stride == 0).then(|| self.record());
            if sample.is_some() {
                self.emitted += 1;
            }

            self.time += self.solver.dt();
            self.index += 1;
            if self.index > self.steps {
                self.log_summary();
            }

            if let Some(record) = sample {
                return Some(Ok(record));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.index > self.steps {
            return (0, Some(0));
        }
        let remaining = (self.steps / self.stride + 1).saturating_sub(self.emitted);
        (remaining, Some(remaining))
    }
}

/// `|e − e0| / |e0|`, or the absolute change when `e0` is zero
fn relative_drift(initial: f64, current: f64) -> f64 {
    let change = (current - initial).abs();
    if initial == 0.0 {
        change
    } else {
        change / initial.abs()
    }
}
