use cortex_core::memory::{Confidence, Importance};
use proptest::prelude::*;

proptest! {
    /// Confidence is always clamped to [0.0, 1.0] regardless of input.
    #[test]
    fn prop_confidence_always_in_unit_range(raw in -100.0f64..100.0) {
        let c = Confidence::new(raw);
        prop_assert!(c.value() >= 0.0);
        prop_assert!(c.value() <= 1.0);
    }

    /// Importance's numeric score is always in [0.2, 1.0] and monotonic with ordinal.
    #[test]
    fn prop_importance_score_monotonic(a in 1u8..=5, b in 1u8..=5) {
        let ia = Importance::from_ordinal(a).unwrap();
        let ib = Importance::from_ordinal(b).unwrap();
        if a < b {
            prop_assert!(ia.score() < ib.score());
        } else if a > b {
            prop_assert!(ia.score() > ib.score());
        } else {
            prop_assert_eq!(ia.score(), ib.score());
        }
    }
}
