//! Dashboard configuration.
//!
//! Defaults reproduce the stock dashboard (30s live tick at 30%, 10s metrics
//! refresh, 2s simulated refresh latency). A TOML file can override any
//! field; CLI flags are applied on top by the app layer.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::data::DEFAULT_ISSUER;
use crate::domain::Period;
use crate::error::AppError;
use crate::sim::{DEFAULT_EVENT_CAPACITY, MutationConfig};

/// Longest accepted timer interval or refresh delay.
pub const MAX_TIMER_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Seed for the random source; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub initial_issuer: String,
    pub initial_period: Period,

    pub live_tick_every_secs: u64,
    /// Chance that a live-tick firing actually mutates the data.
    pub live_tick_probability: f64,
    pub metrics_every_secs: u64,
    pub refresh_delay_ms: u64,

    pub event_capacity: usize,
    pub mutation: MutationConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            seed: None,
            initial_issuer: DEFAULT_ISSUER.to_string(),
            initial_period: Period::Day,
            live_tick_every_secs: 30,
            live_tick_probability: 0.3,
            metrics_every_secs: 10,
            refresh_delay_ms: 2000,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            mutation: MutationConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load a TOML file; missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::new(2, format!("Failed to read config '{}': {e}", path.display())))?;
        let config: DashboardConfig = toml::from_str(&content)
            .map_err(|e| AppError::new(2, format!("Invalid config '{}': {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !(0.0..=1.0).contains(&self.live_tick_probability) {
            return Err(AppError::new(
                2,
                format!(
                    "live_tick_probability must be within [0, 1], got {}",
                    self.live_tick_probability
                ),
            ));
        }
        if self.live_tick_every_secs == 0 || self.metrics_every_secs == 0 {
            return Err(AppError::new(2, "Timer intervals must be > 0 seconds."));
        }
        if self.live_tick_every_secs > MAX_TIMER_SECS
            || self.metrics_every_secs > MAX_TIMER_SECS
            || self.refresh_delay_ms > MAX_TIMER_SECS * 1000
        {
            return Err(AppError::new(
                2,
                format!("Timer intervals and refresh_delay_ms must not exceed {MAX_TIMER_SECS} seconds."),
            ));
        }
        if self.event_capacity == 0 {
            return Err(AppError::new(2, "event_capacity must be > 0."));
        }
        self.mutation
            .validate()
            .map_err(|msg| AppError::new(2, format!("Invalid mutation settings: {msg}")))
    }

    pub fn live_tick_every(&self) -> Duration {
        Duration::from_secs(self.live_tick_every_secs)
    }

    pub fn metrics_every(&self) -> Duration {
        Duration::from_secs(self.metrics_every_secs)
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }
}
