//! Trajectory output files
//!
//! Samples are written as whitespace-separated text, one row per sample,
//! preceded by `#` comment lines echoing the configuration:
//!
//! ```text
//! # Double pendulum simulation data
//! # L1=1 L2=1
//! # M1=1 M2=1
//! # G=9.81 dt=0.01
//! # THETA1=1.5 THETA2=1 OMEGA1=0 OMEGA2=0 TOTAL_TIME=20
//! # Format: time x1 y1 x2 y2
//! 0.0 0.9974949866040544 -0.0707372016677029 1.8389659714119508 -0.6110395075358427
//! ```
//!
//! The position file holds `time x1 y1 x2 y2`; the optional angle file
//! holds `time theta1 theta2` for the same samples. Plotting tools parse
//! the `L1=`/`L2=` header line and the numeric rows, so this layout must
//! not change.

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::config::SimulationConfig;
use crate::simulation::SampleRecord;
use crate::utils::constants::ANGLE_FILE_SUFFIX;

/// Column line of the position file
pub const POSITION_COLUMNS: &str = "time x1 y1 x2 y2";

/// Column line of the angle file
pub const ANGLE_COLUMNS: &str = "time theta1 theta2";

/// Output errors
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("cannot create output file {path:?}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("angle file {path:?} is the position file")]
    SamePath { path: PathBuf },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

#[derive(Serialize)]
struct PositionRow {
    time: f64,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

#[derive(Serialize)]
struct AngleRow {
    time: f64,
    theta1: f64,
    theta2: f64,
}

impl From<&SampleRecord> for PositionRow {
    fn from(r: &SampleRecord) -> Self {
        Self {
            time: r.time,
            x1: r.x1,
            y1: r.y1,
            x2: r.x2,
            y2: r.y2,
        }
    }
}

impl From<&SampleRecord> for AngleRow {
    fn from(r: &SampleRecord) -> Self {
        Self {
            time: r.time,
            theta1: r.theta1,
            theta2: r.theta2,
        }
    }
}

/// Streams samples into a position writer and an optional angle writer
///
/// Headers are written on construction. Rows are buffered by the
/// underlying writers; call [`finish`](Self::finish) to flush them.
///
/// # Example
///
/// ```
/// use double_pendulum::output::TrajectoryWriter;
/// use double_pendulum::SimulationConfig;
///
/// let config = SimulationConfig::default();
/// let writer = TrajectoryWriter::new(Vec::new(), None, &config).unwrap();
/// let (positions, angles) = writer.into_inner().unwrap();
///
/// let text = String::from_utf8(positions).unwrap();
/// assert!(text.contains("# L1=1 L2=1"));
/// assert!(angles.is_none());
/// ```
#[derive(Debug)]
pub struct TrajectoryWriter<W: Write> {
    positions: csv::Writer<W>,
    angles: Option<csv::Writer<W>>,
    rows: usize,
}

impl TrajectoryWriter<BufWriter<File>> {
    /// Create (or truncate) the output files
    ///
    /// No angle file is written when `angle_path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::SamePath`] if both paths name the same file
    /// and [`OutputError::Create`] if either file cannot be created.
    pub fn create(
        position_path: &Path,
        angle_path: Option<&Path>,
        config: &SimulationConfig,
    ) -> Result<Self, OutputError> {
        if let Some(angle_path) = angle_path {
            if resolve(angle_path) == resolve(position_path) {
                return Err(OutputError::SamePath {
                    path: angle_path.to_path_buf(),
                });
            }
        }

        let positions = create_file(position_path)?;
        let angles = angle_path.map(create_file).transpose()?;

        log::debug!(
            "writing positions to {}{}",
            position_path.display(),
            angle_path
                .map(|p| format!(", angles to {}", p.display()))
                .unwrap_or_default()
        );

        Self::new(positions, angles, config)
    }
}

impl<W: Write> TrajectoryWriter<W> {
    /// Wrap existing writers, writing the headers immediately
    pub fn new(
        mut positions: W,
        angles: Option<W>,
        config: &SimulationConfig,
    ) -> Result<Self, OutputError> {
        write_header(&mut positions, config, POSITION_COLUMNS)?;
        let angles = match angles {
            Some(mut w) => {
                write_header(&mut w, config, ANGLE_COLUMNS)?;
                Some(row_writer(w))
            }
            None => None,
        };

        Ok(Self {
            positions: row_writer(positions),
            angles,
            rows: 0,
        })
    }

    /// Append one sample
    pub fn write(&mut self, record: &SampleRecord) -> Result<(), OutputError> {
        self.positions.serialize(PositionRow::from(record))?;
        if let Some(angles) = self.angles.as_mut() {
            angles.serialize(AngleRow::from(record))?;
        }
        self.rows += 1;
        Ok(())
    }

    /// Number of samples written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Whether an angle file is being written
    pub fn has_angles(&self) -> bool {
        self.angles.is_some()
    }

    /// Flush both writers and return the number of samples written
    pub fn finish(mut self) -> Result<usize, OutputError> {
        self.positions.flush()?;
        if let Some(angles) = self.angles.as_mut() {
            angles.flush()?;
        }
        Ok(self.rows)
    }

    /// Flush and hand back the underlying writers
    pub fn into_inner(self) -> Result<(W, Option<W>), OutputError> {
        let positions = self.positions.into_inner().map_err(|e| e.into_error())?;
        let angles = match self.angles {
            Some(w) => Some(w.into_inner().map_err(|e| e.into_error())?),
            None => None,
        };
        Ok((positions, angles))
    }
}

/// Angle file path derived from the position file path
///
/// `dir/data.txt` becomes `dir/data_angles.txt`; a path without an
/// extension just gets the suffix appended.
pub fn derive_angle_path(position_path: &Path) -> PathBuf {
    let mut name = position_path
        .file_stem()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(ANGLE_FILE_SUFFIX);
    if let Some(ext) = position_path.extension() {
        name.push(".");
        name.push(ext);
    }
    position_path.with_file_name(name)
}

/// Canonical directory plus file name; the file itself may not exist yet
fn resolve(path: &Path) -> PathBuf {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    match (dir.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

fn create_file(path: &Path) -> Result<BufWriter<File>, OutputError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| OutputError::Create {
            path: path.to_path_buf(),
            source,
        })
}

fn row_writer<W: Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_writer(inner)
}

fn write_header<W: Write>(out: &mut W, config: &SimulationConfig, columns: &str) -> io::Result<()> {
    writeln!(out, "# Double pendulum simulation data")?;
    writeln!(out, "# L1={} L2={}", config.l1, config.l2)?;
    writeln!(out, "# M1={} M2={}", config.m1, config.m2)?;
    writeln!(out, "# G={} dt={}", config.g, config.dt)?;
    writeln!(
        out,
        "# THETA1={} THETA2={} OMEGA1={} OMEGA2={} TOTAL_TIME={}",
        config.theta1, config.theta2, config.omega1, config.omega2, config.total_time
    )?;
    writeln!(out, "# Format: {}", columns)
}
