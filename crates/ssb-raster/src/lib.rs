//! 5G NR Channel Raster Library
//!
//! This crate converts between the 5G New Radio channel numbering schemes
//! and absolute RF frequency:
//!
//! - **NR-ARFCN**: Absolute Radio-Frequency Channel Number on the global
//!   frequency raster (5 kHz, 15 kHz and 60 kHz granularity)
//! - **GSCN**: Global Synchronization Channel Number, the raster that
//!   SS/PBCH blocks are broadcast on
//!
//! All conversions are pure and integer-exact. Batch conversions are
//! all-or-nothing: one invalid channel rejects the whole list.
//!
//! # Example
//!
//! ```rust
//! use ssb_raster::{arfcn_to_frequency, gscn_to_frequency, ChannelNumber};
//!
//! assert_eq!(arfcn_to_frequency(371_570).unwrap(), 1_857_850_000);
//! assert_eq!(gscn_to_frequency(5279).unwrap(), 2_112_050_000);
//!
//! let ch = ChannelNumber::Arfcn(628_032);
//! assert_eq!(ch.to_frequency().unwrap(), 3_420_480_000);
//! ```

pub mod arfcn;
pub mod channel;
pub mod error;
pub mod gscn;

pub use arfcn::{arfcn_to_frequency, arfcns_to_frequencies, frequency_to_arfcn, ARFCN_MAX};
pub use channel::{channels_to_frequencies, ChannelNumber};
pub use error::RasterError;
pub use gscn::{gscn_to_frequency, gscns_to_frequencies, GSCN_MAX, GSCN_MIN};

/// Frequency range a raster position belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrequencyRange {
    /// Sub-3 GHz portion of FR1
    LowFr1,
    /// 3 GHz to 24.25 GHz
    HighFr1,
    /// Millimetre wave (FR2)
    Fr2,
}

impl FrequencyRange {
    /// Returns a human-readable name for the range
    pub fn name(&self) -> &'static str {
        match self {
            FrequencyRange::LowFr1 => "FR1 (0-3 GHz)",
            FrequencyRange::HighFr1 => "FR1 (3-24.25 GHz)",
            FrequencyRange::Fr2 => "FR2 (24.25-100 GHz)",
        }
    }
}

impl std::fmt::Display for FrequencyRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
