//! Error types for raster conversions

use thiserror::Error;

/// Errors that can occur while converting channel numbers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// NR-ARFCN outside `0..3279166`
    #[error("invalid ARFCN {0}: must be in 0..3279166")]
    InvalidArfcn(i64),

    /// GSCN outside every synchronization raster range
    #[error("invalid GSCN {0}: must be in 2..=26639")]
    InvalidGscn(i64),

    /// Frequency does not sit on the global raster
    #[error("frequency {0} Hz is not on the NR global raster")]
    OffRaster(u64),
}
