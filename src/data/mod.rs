//! Synthetic data sources.
//!
//! - seed issuers and events (`catalog`)
//! - score-trend series generation (`history`)

pub mod catalog;
pub mod history;

pub use catalog::{DEFAULT_ISSUER, live_event_pool, seed_events, seed_issuers};
