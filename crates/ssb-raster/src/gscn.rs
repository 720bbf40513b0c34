//! GSCN conversions on the synchronization raster
//!
//! SS/PBCH blocks may only be placed on the synchronization raster. Below
//! 3 GHz each GSCN encodes a pair `(N, M)` with
//! `GSCN = 3N + (M − 3) / 2` and `SS_REF = N × 1200 kHz + M × 50 kHz`.
//! Above 3 GHz the raster is uniform.

use tracing::trace;

use crate::error::RasterError;

/// Lowest valid GSCN
pub const GSCN_MIN: i64 = 2;
/// Highest valid GSCN
pub const GSCN_MAX: i64 = 26_639;

const LOW_END: i64 = 7_498;
const MID_FIRST: i64 = 7_499;
const MID_END: i64 = 22_255;
const HIGH_FIRST: i64 = 22_256;

/// Convert a single GSCN to its SS block reference frequency in Hz
pub fn gscn_to_frequency(gscn: i64) -> Result<u64, RasterError> {
    let hz = match gscn {
        GSCN_MIN..=LOW_END => {
            // (M - 3) / 2 is -1, 0 or 1 for M = 1, 3, 5
            let (n, m) = match gscn.rem_euclid(3) {
                2 => ((gscn + 1) / 3, 1),
                0 => (gscn / 3, 3),
                _ => ((gscn - 1) / 3, 5),
            };
            n as u64 * 1_200_000 + m * 50_000
        }
        MID_FIRST..=MID_END => 3_000_000_000 + (gscn - MID_FIRST) as u64 * 1_440_000,
        HIGH_FIRST..=GSCN_MAX => 24_250_080_000 + (gscn - HIGH_FIRST) as u64 * 17_280_000,
        _ => return Err(RasterError::InvalidGscn(gscn)),
    };

    trace!("GSCN {} -> {} Hz", gscn, hz);
    Ok(hz)
}

/// Convert a list of GSCNs, preserving order
///
/// Fails on the first invalid channel without returning partial results.
pub fn gscns_to_frequencies(gscns: &[i64]) -> Result<Vec<u64>, RasterError> {
    gscns.iter().map(|&n| gscn_to_frequency(n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ssb_positions() {
        let gscns = [5279, 4829, 4517, 2177, 2183, 6554, 2318, 1828];
        let expected = [
            2_112_050_000,
            1_932_050_000,
            1_807_250_000,
            871_250_000,
            873_650_000,
            2_622_050_000,
            927_650_000,
            731_050_000,
        ];

        assert_eq!(gscns_to_frequencies(&gscns).unwrap(), expected);
    }

    #[test]
    fn test_low_range_offsets() {
        // N = 1 with M = 1, 3, 5
        assert_eq!(gscn_to_frequency(2).unwrap(), 1_250_000);
        assert_eq!(gscn_to_frequency(3).unwrap(), 1_350_000);
        assert_eq!(gscn_to_frequency(4).unwrap(), 1_450_000);
        // N = 2499, M = 5
        assert_eq!(gscn_to_frequency(7498).unwrap(), 2_999_050_000);
    }

    #[test]
    fn test_range_boundaries() {
        assert_eq!(gscn_to_frequency(7499).unwrap(), 3_000_000_000);
        assert_eq!(gscn_to_frequency(22_255).unwrap(), 24_248_640_000);
        assert_eq!(gscn_to_frequency(22_256).unwrap(), 24_250_080_000);
        assert_eq!(gscn_to_frequency(26_639).unwrap(), 99_988_320_000);
    }

    #[test]
    fn test_out_of_range_rejected() {
        for gscn in [-1, 0, 1, 26_640, i64::MAX] {
            assert_eq!(gscn_to_frequency(gscn), Err(RasterError::InvalidGscn(gscn)));
        }
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        assert_eq!(
            gscns_to_frequencies(&[5279, 0]),
            Err(RasterError::InvalidGscn(0))
        );
    }
}
