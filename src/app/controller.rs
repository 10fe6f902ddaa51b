//! Dashboard controller shared by the CLI and TUI front-ends.
//!
//! Owns the simulation, the scheduled tasks, and the UI-facing selection
//! state (issuer, period, loading flag, notifications). Front-ends call the
//! operations here and then re-query the read accessors; nothing in this
//! module draws anything.

use std::collections::VecDeque;
use std::time::Instant;

use chrono::{DateTime, Local, Utc};
use rand::Rng;
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::domain::{AlertKind, HistoryPoint, Issuer, ModelMetrics, Notification, Period};
use crate::error::CoreError;
use crate::io::export::Snapshot;
use crate::sim::{EventLog, Scheduler, Simulation, TaskHandle, sample_metrics};

/// Work items the controller schedules for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTask {
    /// Periodic: maybe mutate the data (see `live_tick_probability`).
    LiveTick,
    /// Periodic: regenerate the model-metrics panel.
    MetricsRefresh,
    /// One-shot: finish a manual refresh.
    RefreshComplete,
}

#[derive(Debug)]
pub struct DashboardController {
    config: DashboardConfig,
    sim: Simulation,
    scheduler: Scheduler<DashboardTask>,
    selected: String,
    period: Period,
    metrics: ModelMetrics,
    pending_refresh: Option<TaskHandle>,
    last_updated: DateTime<Local>,
    notifications: VecDeque<Notification>,
}

impl DashboardController {
    /// Create the simulation and arm the periodic tasks relative to `now`.
    ///
    /// Fails with `InvalidConfig` if `config` doesn't validate and with
    /// `NotFound` if `config.initial_issuer` isn't in the catalog.
    pub fn new(config: DashboardConfig, now: Instant) -> Result<Self, CoreError> {
        config
            .validate()
            .map_err(|e| CoreError::invalid_config(e.to_string()))?;

        let mut sim = Simulation::create(&config);
        sim.issuer(&config.initial_issuer)?;

        let metrics = sample_metrics(sim.rng_mut());
        let mut scheduler = Scheduler::new();
        scheduler.every(now, config.live_tick_every(), DashboardTask::LiveTick);
        scheduler.every(now, config.metrics_every(), DashboardTask::MetricsRefresh);

        Ok(Self {
            selected: config.initial_issuer.clone(),
            period: config.initial_period,
            config,
            sim,
            scheduler,
            metrics,
            pending_refresh: None,
            last_updated: Local::now(),
            notifications: VecDeque::new(),
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn selected_issuer(&self) -> &str {
        &self.selected
    }

    /// Switch the active issuer. Unknown codes leave the selection unchanged.
    pub fn select_issuer(&mut self, code: &str) -> Result<&Issuer, CoreError> {
        let issuer = self.sim.issuer(code)?;
        if self.selected != code {
            info!(from = %self.selected, to = code, "issuer selected");
            self.selected = code.to_string();
        }
        Ok(issuer)
    }

    /// Step through issuers in catalog order, wrapping around.
    pub fn cycle_issuer(&mut self, step: isize) -> Result<&Issuer, CoreError> {
        let codes: Vec<String> = self
            .sim
            .scores()
            .codes()
            .into_iter()
            .map(str::to_string)
            .collect();
        if codes.is_empty() {
            return Err(CoreError::not_found(self.selected.clone()));
        }
        let pos = codes.iter().position(|c| *c == self.selected).unwrap_or(0) as isize;
        let next = (pos + step).rem_euclid(codes.len() as isize) as usize;
        self.select_issuer(&codes[next])
    }

    pub fn selected_period(&self) -> Period {
        self.period
    }

    pub fn select_period(&mut self, period: Period) {
        self.period = period;
    }

    pub fn current(&self) -> Result<&Issuer, CoreError> {
        self.sim.issuer(&self.selected)
    }

    pub fn issuers(&self) -> impl Iterator<Item = &Issuer> {
        self.sim.scores().issuers()
    }

    /// Fresh trend series for the selected issuer and period.
    pub fn history(&mut self) -> Result<Vec<HistoryPoint>, CoreError> {
        let code = self.selected.clone();
        self.sim.history(&code, self.period)
    }

    pub fn events(&self) -> &EventLog {
        self.sim.events()
    }

    pub fn metrics(&self) -> &ModelMetrics {
        &self.metrics
    }

    pub fn last_updated(&self) -> DateTime<Local> {
        self.last_updated
    }

    pub fn is_loading(&self) -> bool {
        self.pending_refresh.is_some()
    }

    /// Start a manual refresh that completes after `refresh_delay`.
    ///
    /// While one is pending, the pending handle is returned and nothing new is
    /// scheduled.
    pub fn refresh(&mut self, now: Instant) -> TaskHandle {
        if let Some(handle) = self.pending_refresh {
            debug!("refresh already pending");
            return handle;
        }
        let handle = self
            .scheduler
            .once(now, self.config.refresh_delay(), DashboardTask::RefreshComplete);
        self.pending_refresh = Some(handle);
        info!(delay_ms = self.config.refresh_delay_ms, "refresh started");
        handle
    }

    /// Fire every task due at `now`; returns what ran.
    pub fn advance(&mut self, now: Instant) -> Vec<DashboardTask> {
        let fired = self.scheduler.poll(now);
        let mut ran = Vec::with_capacity(fired.len());

        for (handle, task) in fired {
            match task {
                DashboardTask::LiveTick => {
                    self.last_updated = Local::now();
                    let roll: f64 = self.sim.rng_mut().r#gen();
                    if roll < self.config.live_tick_probability {
                        self.sim.tick();
                    }
                }
                DashboardTask::MetricsRefresh => {
                    self.metrics = sample_metrics(self.sim.rng_mut());
                }
                DashboardTask::RefreshComplete => {
                    if self.pending_refresh == Some(handle) {
                        self.pending_refresh = None;
                    }
                    self.sim.tick();
                    self.last_updated = Local::now();
                    self.notify(Notification::success("Data refreshed successfully!"));
                    info!(ticks = self.sim.ticks(), "refresh complete");
                }
            }
            ran.push(task);
        }
        ran
    }

    /// Build the export record for `code`.
    pub fn export_snapshot(&self, code: &str) -> Result<Snapshot, CoreError> {
        self.export_snapshot_at(code, Utc::now())
    }

    pub fn export_snapshot_at(&self, code: &str, at: DateTime<Utc>) -> Result<Snapshot, CoreError> {
        let issuer = self.sim.issuer(code)?;
        Ok(Snapshot::capture(issuer, at))
    }

    /// Accept an alert request and return its confirmation. Nothing is stored.
    pub fn submit_alert(&mut self, kind: AlertKind, threshold: f64) -> String {
        let message = format!("Alert set: Score {kind} {threshold}");
        info!(%kind, threshold, "alert accepted");
        self.notify(Notification::success(message.clone()));
        message
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    /// Cancel every scheduled task and stop the simulation.
    pub fn teardown(&mut self) {
        let cancelled = self.scheduler.cancel_all();
        self.pending_refresh = None;
        self.sim.teardown();
        debug!(cancelled, "controller torn down");
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        if !self.scheduler.is_empty() {
            self.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;

    use crate::domain::{NotificationLevel, Rating};
    use crate::models::classify;
    use crate::sim::MutationConfig;

    fn controller(seed: u64) -> (DashboardController, Instant) {
        let config = DashboardConfig {
            seed: Some(seed),
            ..DashboardConfig::default()
        };
        let t0 = Instant::now();
        (DashboardController::new(config, t0).unwrap(), t0)
    }

    #[test]
    fn unknown_initial_issuer_is_rejected() {
        let config = DashboardConfig {
            initial_issuer: "MSFT".to_string(),
            ..DashboardConfig::default()
        };
        assert!(matches!(
            DashboardController::new(config, Instant::now()),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn invalid_config_is_rejected_before_any_tick() {
        let config = DashboardConfig {
            live_tick_probability: 1.0,
            mutation: MutationConfig {
                score_drift_span: -10.0,
                ..MutationConfig::default()
            },
            ..DashboardConfig::default()
        };
        assert!(matches!(
            DashboardController::new(config, Instant::now()),
            Err(CoreError::InvalidConfig { .. })
        ));

        let config = DashboardConfig {
            live_tick_every_secs: u64::MAX,
            ..DashboardConfig::default()
        };
        assert!(matches!(
            DashboardController::new(config, Instant::now()),
            Err(CoreError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn select_unknown_keeps_previous() {
        let (mut c, _) = controller(1);
        c.select_issuer("TSLA").unwrap();
        let err = c.select_issuer("NOPE").unwrap_err();
        assert_eq!(err, CoreError::not_found("NOPE"));
        assert_eq!(c.selected_issuer(), "TSLA");
    }

    #[test]
    fn cycle_wraps_in_catalog_order() {
        let (mut c, _) = controller(1);
        assert_eq!(c.cycle_issuer(1).unwrap().code, "TSLA");
        assert_eq!(c.cycle_issuer(1).unwrap().code, "JPM");
        assert_eq!(c.cycle_issuer(1).unwrap().code, "AAPL");
        assert_eq!(c.cycle_issuer(-1).unwrap().code, "JPM");
    }

    #[test]
    fn history_follows_selected_period() {
        let (mut c, _) = controller(2);
        assert_eq!(c.history().unwrap().len(), 24);
        c.select_period(Period::Year);
        c.select_issuer("JPM").unwrap();
        let series = c.history().unwrap();
        assert_eq!(series.len(), 12);
        assert_eq!(series[0].label, "12m ago");
    }

    #[test]
    fn export_rating_matches_score() {
        let (mut c, t0) = controller(3);
        c.refresh(t0);
        c.advance(t0 + Duration::from_secs(3));

        let at = Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap();
        for code in ["AAPL", "TSLA", "JPM"] {
            let snap = c.export_snapshot_at(code, at).unwrap();
            assert_eq!(snap.rating, classify(snap.score));
        }
        assert_eq!(
            c.export_snapshot("NOPE").unwrap_err(),
            CoreError::not_found("NOPE")
        );
    }

    #[test]
    fn refresh_sets_loading_until_completion() {
        let (mut c, t0) = controller(4);
        assert!(!c.is_loading());

        let first = c.refresh(t0);
        assert!(c.is_loading());
        let second = c.refresh(t0 + Duration::from_millis(500));
        assert_eq!(first, second);

        assert!(c.advance(t0 + Duration::from_millis(1999)).is_empty());
        assert!(c.is_loading());

        let ran = c.advance(t0 + Duration::from_millis(2000));
        assert_eq!(ran, vec![DashboardTask::RefreshComplete]);
        assert!(!c.is_loading());
        assert_eq!(c.simulation().ticks(), 1);

        let notes = c.take_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, "Data refreshed successfully!");
        assert_eq!(notes[0].level, NotificationLevel::Success);
        assert!(c.take_notifications().is_empty());
    }

    #[test]
    fn live_tick_respects_probability() {
        let config = DashboardConfig {
            seed: Some(5),
            live_tick_probability: 1.0,
            ..DashboardConfig::default()
        };
        let t0 = Instant::now();
        let mut c = DashboardController::new(config, t0).unwrap();
        c.advance(t0 + Duration::from_secs(90));
        assert_eq!(c.simulation().ticks(), 3);

        let config = DashboardConfig {
            seed: Some(5),
            live_tick_probability: 0.0,
            ..DashboardConfig::default()
        };
        let mut c = DashboardController::new(config, t0).unwrap();
        let ran = c.advance(t0 + Duration::from_secs(90));
        assert_eq!(c.simulation().ticks(), 0);
        assert_eq!(
            ran.iter().filter(|t| **t == DashboardTask::MetricsRefresh).count(),
            9
        );
    }

    #[test]
    fn teardown_silences_timers() {
        let (mut c, t0) = controller(6);
        c.refresh(t0);
        c.teardown();
        assert!(!c.is_loading());
        assert!(c.advance(t0 + Duration::from_secs(3600)).is_empty());
        assert!(!c.simulation().is_live());
    }

    #[test]
    fn alert_confirmation_echoes_input() {
        let (mut c, _) = controller(7);
        let msg = c.submit_alert(AlertKind::Below, 800.0);
        assert_eq!(msg, "Alert set: Score below 800");
        assert_eq!(c.take_notifications()[0].message, msg);
    }

    #[test]
    fn seeded_data_mutation_stays_bounded() {
        let config = DashboardConfig {
            seed: Some(8),
            live_tick_probability: 1.0,
            mutation: MutationConfig {
                score_drift_span: 400.0,
                ..MutationConfig::default()
            },
            ..DashboardConfig::default()
        };
        let t0 = Instant::now();
        let mut c = DashboardController::new(config, t0).unwrap();
        c.advance(t0 + Duration::from_secs(30 * 200));
        for issuer in c.issuers() {
            assert!((600.0..=1000.0).contains(&issuer.current_score));
            assert!(Rating::ALL.contains(&issuer.rating));
        }
    }
}
