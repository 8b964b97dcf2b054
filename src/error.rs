//! Crate-level error type

use thiserror::Error;

use crate::config::ConfigError;
use crate::output::OutputError;
use crate::solvers::SolverError;

/// Any error that can end a simulation run
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("output error: {0}")]
    Output(#[from] OutputError),
}
