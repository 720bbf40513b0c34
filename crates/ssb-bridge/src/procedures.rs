//! Names and arities of the engine-side procedures
//!
//! These live on the engine's search path once the procedure root has
//! been registered (see [`GENPATH`] and [`ADDPATH`]).

/// Expand a directory into itself plus all subdirectories
pub const GENPATH: &str = "genpath";
/// Add directories to the engine search path
pub const ADDPATH: &str = "addpath";

/// `[rx, tx] = configureSDR(platform, serialNumber)`
pub const CONFIGURE_SDR: &str = "configureSDR";
/// Outputs of [`CONFIGURE_SDR`]
pub const CONFIGURE_SDR_NARGOUT: usize = 2;

/// `[ssbFrequencies, firstSsbTimestamps] = frequencySweep(rx, frequencies, captureDuration)`
pub const FREQUENCY_SWEEP: &str = "frequencySweep";
/// Outputs of [`FREQUENCY_SWEEP`]
pub const FREQUENCY_SWEEP_NARGOUT: usize = 2;

/// `smartSSBJam(rx, tx, frequency, duration, ofdm)`
pub const SMART_SSB_JAM: &str = "smartSSBJam";
/// `dumbSSBJam(rx, tx, frequency, duration)`
pub const DUMB_SSB_JAM: &str = "dumbSSBJam";
