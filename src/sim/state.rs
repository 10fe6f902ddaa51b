//! The single owned simulation-state object.
//!
//! Lifecycle: `create` -> any number of `tick`s -> `teardown`. After teardown
//! the state stays readable but further ticks are no-ops.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::data::history;
use crate::data::{live_event_pool, seed_events, seed_issuers};
use crate::domain::{HistoryPoint, Issuer, Period};
use crate::error::CoreError;
use crate::models::ScoreModel;
use crate::sim::{EventLog, MutationEngine, TickReport};

/// Random source: seeded when a seed is given, entropy otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[derive(Debug, Clone)]
pub struct Simulation {
    scores: ScoreModel,
    events: EventLog,
    engine: MutationEngine,
    rng: StdRng,
    ticks: u64,
    live: bool,
}

impl Simulation {
    /// Build the simulation from the hardcoded catalog.
    pub fn create(config: &DashboardConfig) -> Self {
        let sim = Self::from_parts(
            ScoreModel::new(seed_issuers()),
            EventLog::seeded(seed_events(), config.event_capacity),
            MutationEngine::new(config.mutation, live_event_pool()),
            rng_from_seed(config.seed),
        );
        info!(
            issuers = sim.scores.len(),
            events = sim.events.len(),
            seeded = config.seed.is_some(),
            "simulation created"
        );
        sim
    }

    pub fn from_parts(scores: ScoreModel, events: EventLog, engine: MutationEngine, rng: StdRng) -> Self {
        Self {
            scores,
            events,
            engine,
            rng,
            ticks: 0,
            live: true,
        }
    }

    /// Run one mutation round. Returns `None` once torn down.
    pub fn tick(&mut self) -> Option<TickReport> {
        if !self.live {
            debug!("tick ignored after teardown");
            return None;
        }
        let report = self.engine.tick(&mut self.scores, &mut self.events, &mut self.rng);
        self.ticks += 1;
        Some(report)
    }

    pub fn teardown(&mut self) {
        if self.live {
            self.live = false;
            info!(ticks = self.ticks, "simulation torn down");
        }
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn scores(&self) -> &ScoreModel {
        &self.scores
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn issuer(&self, code: &str) -> Result<&Issuer, CoreError> {
        self.scores.get(code)
    }

    /// Fresh history series around the issuer's current score.
    pub fn history(&mut self, code: &str, period: Period) -> Result<Vec<HistoryPoint>, CoreError> {
        let base = self.scores.get(code)?.current_score;
        Ok(history::generate(base, period, &mut self.rng))
    }

    pub(crate) fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
