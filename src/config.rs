//! Simulation configuration
//!
//! Parameters are read from a plain `KEY=value` text file:
//!
//! ```text
//! # Link lengths [m]
//! L1=1.0
//! L2=1.0
//! THETA1 = 1.5   # initial angle of the upper link [rad]
//! ```
//!
//! A missing or unreadable file is not an error: the documented defaults
//! are used instead and a warning is logged.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("line {line}: invalid value {value:?} for {key}")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },

    #[error("{key} must be strictly positive, got {value}")]
    NonPositive { key: &'static str, value: f64 },

    #[error("{key} must be finite, got {value}")]
    NonFinite { key: &'static str, value: f64 },
}

/// Physical parameters, initial conditions and run length of one simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Length of the upper link [m]
    pub l1: f64,
    /// Length of the lower link [m]
    pub l2: f64,
    /// Mass of the upper bob [kg]
    pub m1: f64,
    /// Mass of the lower bob [kg]
    pub m2: f64,
    /// Gravitational acceleration [m/s²]
    pub g: f64,
    /// Initial angle of the upper link, from the downward vertical [rad]
    pub theta1: f64,
    /// Initial angle of the lower link, from the downward vertical [rad]
    pub theta2: f64,
    /// Initial angular velocity of the upper link [rad/s]
    pub omega1: f64,
    /// Initial angular velocity of the lower link [rad/s]
    pub omega2: f64,
    /// Time step [s]
    pub dt: f64,
    /// Simulated duration [s]
    pub total_time: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            l1: 1.0,
            l2: 1.0,
            m1: 1.0,
            m2: 1.0,
            g: 9.81,
            theta1: 1.5,
            theta2: 1.0,
            omega1: 0.0,
            omega2: 0.0,
            dt: 0.01,
            total_time: 20.0,
        }
    }
}

impl SimulationConfig {
    /// Load a configuration file, falling back to defaults if it can't be read
    ///
    /// Keys missing from the file keep their default value. Bytes that are
    /// not valid UTF-8 are replaced, so comments in other encodings are
    /// harmless. The result is validated before it is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if a recognized key carries an unparseable value or
    /// if the resulting configuration fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::warn!(
                    "cannot read config file {}: {}; using default configuration",
                    path.display(),
                    err
                );
                return Ok(Self::default());
            }
        };

        // Comments may be in any encoding; keys and values are ASCII
        let config = Self::parse(&String::from_utf8_lossy(&bytes))?;
        config.validate()?;
        log::debug!("loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Parse configuration text on top of the defaults
    ///
    /// Blank lines, `#` comment lines, lines without `=` and unknown keys
    /// are skipped. Anything after a `#` in a value is dropped. Later
    /// occurrences of a key override earlier ones. No validation is done.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.split('#').next().unwrap_or_default().trim();

            let Some(slot) = config.field_mut(key) else {
                log::debug!("ignoring unknown config key {:?} on line {}", key, index + 1);
                continue;
            };

            *slot = value.parse().map_err(|_| ConfigError::InvalidValue {
                line: index + 1,
                key: key.to_string(),
                value: value.to_string(),
            })?;
        }

        Ok(config)
    }

    /// Check that every value is finite and that lengths, masses, the time
    /// step and the duration are strictly positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in self.entries() {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { key, value });
            }
        }

        let positive = [
            ("L1", self.l1),
            ("L2", self.l2),
            ("M1", self.m1),
            ("M2", self.m2),
            ("DT", self.dt),
            ("TOTAL_TIME", self.total_time),
        ];
        for (key, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { key, value });
            }
        }

        Ok(())
    }

    /// Number of integration steps, `floor(total_time / dt)`
    pub fn steps(&self) -> usize {
        (self.total_time / self.dt).floor() as usize
    }

    /// All values keyed by their config-file name, in file order
    pub fn entries(&self) -> [(&'static str, f64); 11] {
        [
            ("L1", self.l1),
            ("L2", self.l2),
            ("M1", self.m1),
            ("M2", self.m2),
            ("G", self.g),
            ("THETA1", self.theta1),
            ("THETA2", self.theta2),
            ("OMEGA1", self.omega1),
            ("OMEGA2", self.omega2),
            ("DT", self.dt),
            ("TOTAL_TIME", self.total_time),
        ]
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut f64> {
        let slot = match key {
            "L1" => &mut self.l1,
            "L2" => &mut self.l2,
            "M1" => &mut self.m1,
            "M2" => &mut self.m2,
            "G" => &mut self.g,
            "THETA1" => &mut self.theta1,
            "THETA2" => &mut self.theta2,
            "OMEGA1" => &mut self.omega1,
            "OMEGA2" => &mut self.omega2,
            "DT" => &mut self.dt,
            "TOTAL_TIME" => &mut self.total_time,
            _ => return None,
        };
        Some(slot)
    }
}
