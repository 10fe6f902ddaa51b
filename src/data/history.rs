//! Synthetic score-trend series.
//!
//! Each point is the base score plus two independent uniform noise draws and
//! a small index-proportional pull downward, so earlier points skew slightly
//! higher than later ones. Nothing is cached: every call draws fresh noise.

use rand::Rng;

use crate::domain::{HistoryPoint, Period, clamp_score};

/// Half-width of the first noise draw, `U(-10, 10)`.
const BASE_NOISE: f64 = 10.0;
/// Half-width of the second noise draw, `U(-5, 5)`.
const JITTER_NOISE: f64 = 5.0;
/// Total trend pull across the series.
const TREND_SCALE: f64 = 10.0;

/// Generate the history series for `period` around `base_score`.
pub fn generate<R: Rng + ?Sized>(base_score: f64, period: Period, rng: &mut R) -> Vec<HistoryPoint> {
    let points = period.points();
    (0..points)
        .map(|i| {
            let base_variation = rng.gen_range(-BASE_NOISE..=BASE_NOISE);
            let trend = (i as f64 / points as f64) * TREND_SCALE;
            let jitter = rng.gen_range(-JITTER_NOISE..=JITTER_NOISE);
            let score = clamp_score(base_score + base_variation - trend + jitter);
            HistoryPoint {
                label: period.label(i),
                score: score.round() as i64,
            }
        })
        .collect()
}
