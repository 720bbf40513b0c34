//! NR-ARFCN conversions on the global frequency raster
//!
//! The global raster is split into three segments, each with its own
//! reference frequency, reference channel and channel spacing:
//!
//! | NR-ARFCN            | F_REF-Offs   | N_REF-Offs | ΔF_Global |
//! |---------------------|--------------|------------|-----------|
//! | 0 – 599999          | 0 Hz         | 0          | 5 kHz     |
//! | 600000 – 2016666    | 3 GHz        | 600000     | 15 kHz    |
//! | 2016667 – 3279165   | 242500800 Hz | 2016667    | 60 kHz    |
//!
//! `F_REF = F_REF-Offs + ΔF_Global × (N_REF − N_REF-Offs)`

use tracing::trace;

use crate::error::RasterError;
use crate::FrequencyRange;

/// One past the highest valid NR-ARFCN
pub const ARFCN_MAX: i64 = 3_279_166;

/// A contiguous segment of the global raster
#[derive(Debug, Clone, Copy)]
struct RasterSegment {
    /// First channel in the segment (also the reference channel)
    first: i64,
    /// One past the last channel in the segment
    end: i64,
    /// Frequency of `first` in Hz
    offset_hz: u64,
    /// Channel spacing in Hz
    step_hz: u64,
    range: FrequencyRange,
}

impl RasterSegment {
    fn contains(&self, arfcn: i64) -> bool {
        (self.first..self.end).contains(&arfcn)
    }

    fn frequency(&self, arfcn: i64) -> u64 {
        // `arfcn >= first` is guaranteed by `contains`
        self.offset_hz + self.step_hz * (arfcn - self.first) as u64
    }

    fn channel(&self, hz: u64) -> Option<i64> {
        let delta = hz.checked_sub(self.offset_hz)?;
        if delta % self.step_hz != 0 {
            return None;
        }
        let arfcn = self.first.checked_add(i64::try_from(delta / self.step_hz).ok()?)?;
        self.contains(arfcn).then_some(arfcn)
    }
}

const SEGMENTS: [RasterSegment; 3] = [
    RasterSegment {
        first: 0,
        end: 600_000,
        offset_hz: 0,
        step_hz: 5_000,
        range: FrequencyRange::LowFr1,
    },
    RasterSegment {
        first: 600_000,
        end: 2_016_667,
        offset_hz: 3_000_000_000,
        step_hz: 15_000,
        range: FrequencyRange::HighFr1,
    },
    RasterSegment {
        first: 2_016_667,
        end: ARFCN_MAX,
        offset_hz: 242_500_800,
        step_hz: 60_000,
        range: FrequencyRange::Fr2,
    },
];

fn segment_for(arfcn: i64) -> Result<&'static RasterSegment, RasterError> {
    SEGMENTS
        .iter()
        .find(|s| s.contains(arfcn))
        .ok_or(RasterError::InvalidArfcn(arfcn))
}

/// Convert a single NR-ARFCN to its reference frequency in Hz
pub fn arfcn_to_frequency(arfcn: i64) -> Result<u64, RasterError> {
    let hz = segment_for(arfcn)?.frequency(arfcn);
    trace!("ARFCN {} -> {} Hz", arfcn, hz);
    Ok(hz)
}

/// Convert a list of NR-ARFCNs, preserving order
///
/// Fails on the first invalid channel without returning partial results.
pub fn arfcns_to_frequencies(arfcns: &[i64]) -> Result<Vec<u64>, RasterError> {
    arfcns.iter().map(|&n| arfcn_to_frequency(n)).collect()
}

/// Find the NR-ARFCN whose reference frequency is exactly `hz`
pub fn frequency_to_arfcn(hz: u64) -> Result<i64, RasterError> {
    SEGMENTS
        .iter()
        .find_map(|s| s.channel(hz))
        .ok_or(RasterError::OffRaster(hz))
}

/// Which raster segment an NR-ARFCN falls in
pub fn arfcn_range(arfcn: i64) -> Result<FrequencyRange, RasterError> {
    segment_for(arfcn).map(|s| s.range)
}
