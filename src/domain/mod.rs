//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - rating and level enums (`Rating`, `Impact`, `RiskLevel`, `Period`)
//! - per-issuer records (`Issuer`, `Feature`, `FeatureSet`, `RiskFactor`)
//! - feed and chart items (`Event`, `HistoryPoint`)

pub mod types;

pub use types::*;
