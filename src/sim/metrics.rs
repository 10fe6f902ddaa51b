//! Synthetic model-performance readings for the metrics panel.

use rand::Rng;

use crate::domain::ModelMetrics;

/// Draw a fresh set of readings.
///
/// Ranges: accuracy 94-98 %, precision 91-97 %, recall 95-99 %, latency 200-300 ms.
pub fn sample_metrics<R: Rng + ?Sized>(rng: &mut R) -> ModelMetrics {
    ModelMetrics {
        accuracy: 94.0 + rng.gen_range(0.0..=4.0),
        precision: 91.0 + rng.gen_range(0.0..=6.0),
        recall: 95.0 + rng.gen_range(0.0..=4.0),
        latency_ms: 200.0 + rng.gen_range(0.0..=100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn readings_stay_in_panel_ranges() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            let m = sample_metrics(&mut rng);
            assert!((94.0..=98.0).contains(&m.accuracy));
            assert!((91.0..=97.0).contains(&m.precision));
            assert!((95.0..=99.0).contains(&m.recall));
            assert!((200.0..=300.0).contains(&m.latency_ms));
        }
    }
}
