//! Property tests for the raster conversions

use proptest::prelude::*;
use ssb_raster::{
    arfcn_to_frequency, arfcns_to_frequencies, frequency_to_arfcn, gscn_to_frequency,
    RasterError, ARFCN_MAX, GSCN_MAX, GSCN_MIN,
};

fn valid_arfcn() -> impl Strategy<Value = i64> {
    prop_oneof![
        0i64..600_000i64,
        600_000i64..2_016_667i64,
        2_016_667i64..ARFCN_MAX,
    ]
}

fn invalid_arfcn() -> impl Strategy<Value = i64> {
    prop_oneof![i64::MIN..0i64, ARFCN_MAX..i64::MAX]
}

proptest! {
    #[test]
    fn low_segment_is_linear(arfcn in 0i64..600_000i64) {
        prop_assert_eq!(arfcn_to_frequency(arfcn).unwrap(), 5_000 * arfcn as u64);
    }

    #[test]
    fn valid_arfcn_round_trips(arfcn in valid_arfcn()) {
        let hz = arfcn_to_frequency(arfcn).unwrap();
        prop_assert_eq!(frequency_to_arfcn(hz).unwrap(), arfcn);
    }

    #[test]
    fn invalid_arfcn_rejected(arfcn in invalid_arfcn()) {
        prop_assert_eq!(arfcn_to_frequency(arfcn), Err(RasterError::InvalidArfcn(arfcn)));
    }

    #[test]
    fn batch_preserves_order(arfcns in prop::collection::vec(valid_arfcn(), 0..32)) {
        let batch = arfcns_to_frequencies(&arfcns).unwrap();
        prop_assert_eq!(batch.len(), arfcns.len());
        for (n, hz) in arfcns.iter().zip(&batch) {
            prop_assert_eq!(arfcn_to_frequency(*n).unwrap(), *hz);
        }
    }

    #[test]
    fn batch_with_one_invalid_fails(
        mut arfcns in prop::collection::vec(valid_arfcn(), 1..16),
        bad in invalid_arfcn(),
        pos in any::<prop::sample::Index>()
    ) {
        let at = pos.index(arfcns.len() + 1);
        arfcns.insert(at, bad);
        prop_assert_eq!(arfcns_to_frequencies(&arfcns), Err(RasterError::InvalidArfcn(bad)));
    }

    #[test]
    fn gscn_is_strictly_increasing(gscn in GSCN_MIN..GSCN_MAX) {
        let lo = gscn_to_frequency(gscn).unwrap();
        let hi = gscn_to_frequency(gscn + 1).unwrap();
        prop_assert!(hi > lo);
    }
}
