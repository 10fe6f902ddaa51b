//! Numeric score -> rating label.

use crate::domain::Rating;

/// Thresholds evaluated highest-first; each bound is inclusive.
const THRESHOLDS: [(f64, Rating); 5] = [
    (950.0, Rating::Aaa),
    (900.0, Rating::Aa),
    (850.0, Rating::A),
    (750.0, Rating::Bbb),
    (650.0, Rating::Bb),
];

/// Classify a score.
///
/// Total over every input: anything below the last threshold (NaN included)
/// falls through to `B`.
pub fn classify(score: f64) -> Rating {
    THRESHOLDS
        .iter()
        .find(|(bound, _)| score >= *bound)
        .map(|&(_, rating)| rating)
        .unwrap_or(Rating::B)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clamp_score;
    use proptest::prelude::*;

    #[test]
    fn boundaries_are_inclusive() {
        let cases = [
            (950.0, Rating::Aaa),
            (949.0, Rating::Aa),
            (900.0, Rating::Aa),
            (899.0, Rating::A),
            (850.0, Rating::A),
            (849.0, Rating::Bbb),
            (750.0, Rating::Bbb),
            (749.0, Rating::Bb),
            (650.0, Rating::Bb),
            (649.0, Rating::B),
        ];
        for (score, expected) in cases {
            assert_eq!(classify(score), expected, "classify({score})");
        }
    }

    #[test]
    fn out_of_domain_inputs_still_classify() {
        assert_eq!(classify(1500.0), Rating::Aaa);
        assert_eq!(classify(-3.0), Rating::B);
        assert_eq!(classify(f64::NAN), Rating::B);
        assert_eq!(classify(f64::INFINITY), Rating::Aaa);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn classify_is_monotone(a in -2000.0f64..3000.0, b in -2000.0f64..3000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            // Rating orders best-first, so a higher score never gets a "larger" rating.
            prop_assert!(classify(hi) <= classify(lo));
        }

        #[test]
        fn clamped_scores_map_to_a_known_label(s in -1.0e6f64..1.0e6) {
            let rating = classify(clamp_score(s));
            prop_assert!(Rating::ALL.contains(&rating));
        }
    }
}
