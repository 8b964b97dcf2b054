//! Simulation constants and defaults

/// Every `SAMPLE_STRIDE`-th step is written to the output files
pub const SAMPLE_STRIDE: usize = 100;

/// Smallest magnitude an acceleration denominator may take
///
/// Denominators closer to zero are replaced by this value, keeping their sign.
pub const DENOMINATOR_FLOOR: f64 = 1e-10;

/// Bound on the magnitude of either angular acceleration [rad/s²]
pub const ACCELERATION_LIMIT: f64 = 1000.0;

/// Config file read when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "./config/config";

/// Position output file written when no path is given on the command line
pub const DEFAULT_OUTPUT_PATH: &str = "pendulum_data.txt";

/// Inserted before the extension of the position file to name the angle file
pub const ANGLE_FILE_SUFFIX: &str = "_angles";
