//! Bounded random perturbations that imitate live updates.
//!
//! One tick:
//! - drifts every issuer's score by `U(-span/2, span/2)` (clamped, rating refreshed)
//! - perturbs each feature with some probability by at most `span/2` of its value
//! - occasionally pushes one canned event onto the feed

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Event;
use crate::models::ScoreModel;
use crate::models::score::apply_score;
use crate::sim::EventLog;

/// Tunables for one mutation tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    /// Full width of the score drift draw (10 => `U(-5, 5)`).
    pub score_drift_span: f64,
    /// Probability that a given feature changes on a tick.
    pub feature_mutation_probability: f64,
    /// Full width of the relative feature perturbation (0.1 => `±5%`).
    pub feature_mutation_span: f64,
    /// Probability (per tick, not per issuer) of inserting a new event.
    pub event_probability: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            score_drift_span: 10.0,
            feature_mutation_probability: 0.3,
            feature_mutation_span: 0.1,
            event_probability: 0.3,
        }
    }
}

impl MutationConfig {
    pub fn validate(&self) -> Result<(), String> {
        for (name, p) in [
            ("feature_mutation_probability", self.feature_mutation_probability),
            ("event_probability", self.event_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{name} must be within [0, 1], got {p}"));
            }
        }
        for (name, span) in [
            ("score_drift_span", self.score_drift_span),
            ("feature_mutation_span", self.feature_mutation_span),
        ] {
            if !(span.is_finite() && span >= 0.0) {
                return Err(format!("{name} must be a finite non-negative number, got {span}"));
            }
        }
        Ok(())
    }
}

/// What a tick changed (for logging and tests).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub issuers: usize,
    pub features_changed: usize,
    pub event: Option<Event>,
}

#[derive(Debug, Clone)]
pub struct MutationEngine {
    config: MutationConfig,
    pool: Vec<Event>,
}

impl MutationEngine {
    pub fn new(config: MutationConfig, pool: Vec<Event>) -> Self {
        Self { config, pool }
    }

    pub fn config(&self) -> &MutationConfig {
        &self.config
    }

    /// Apply one round of perturbations in place.
    pub fn tick<R: Rng + ?Sized>(
        &self,
        scores: &mut ScoreModel,
        events: &mut EventLog,
        rng: &mut R,
    ) -> TickReport {
        let drift = self.config.score_drift_span / 2.0;
        let relative = self.config.feature_mutation_span / 2.0;
        let mut report = TickReport::default();

        for issuer in scores.issuers_mut() {
            let score_change = rng.gen_range(-drift..=drift);
            let next = issuer.current_score + score_change;
            apply_score(issuer, next);
            report.issuers += 1;

            for (_, feature) in issuer.features.iter_mut() {
                if rng.r#gen::<f64>() < self.config.feature_mutation_probability {
                    let change = rng.gen_range(-relative..=relative) * feature.value;
                    feature.value = (feature.value + change).max(0.0);
                    report.features_changed += 1;
                }
            }
        }

        if rng.r#gen::<f64>() < self.config.event_probability {
            if let Some(event) = self.pool.choose(rng) {
                events.insert(event.clone());
                report.event = Some(event.clone());
            }
        }

        debug!(
            issuers = report.issuers,
            features_changed = report.features_changed,
            event = report.event.as_ref().map(|e| e.title.as_str()),
            "mutation tick"
        );
        report
    }
}
