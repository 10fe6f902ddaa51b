//! Snapshot export: the one artifact the dashboard writes.
//!
//! The document is pretty-printed JSON with the keys
//! `issuer, score, rating, timestamp, features, riskFactors`, named
//! `credit_report_{CODE}_{YYYY-MM-DD}.json`.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{FeatureSet, Issuer, Rating, RiskFactor};
use crate::error::AppError;

/// Point-in-time serialization of one issuer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Display name of the issuer.
    pub issuer: String,
    pub score: f64,
    pub rating: Rating,
    /// ISO-8601, UTC, millisecond precision.
    pub timestamp: String,
    pub features: FeatureSet,
    #[serde(rename = "riskFactors")]
    pub risk_factors: Vec<RiskFactor>,
}

impl Snapshot {
    pub fn capture(issuer: &Issuer, at: DateTime<Utc>) -> Self {
        Self {
            issuer: issuer.name.clone(),
            score: issuer.current_score,
            rating: issuer.rating,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            features: issuer.features.clone(),
            risk_factors: issuer.risk_factors.clone(),
        }
    }
}

/// `credit_report_{code}_{YYYY-MM-DD}.json`
pub fn snapshot_file_name(code: &str, at: DateTime<Utc>) -> String {
    format!("credit_report_{code}_{}.json", at.format("%Y-%m-%d"))
}

/// Write `snapshot` into `dir` and return the file path.
pub fn write_snapshot_json(
    dir: &Path,
    code: &str,
    snapshot: &Snapshot,
    at: DateTime<Utc>,
) -> Result<PathBuf, AppError> {
    let path = dir.join(snapshot_file_name(code, at));
    let file = File::create(&path)
        .map_err(|e| AppError::new(2, format!("Failed to create report '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, snapshot)
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))?;

    info!(path = %path.display(), issuer = code, "snapshot exported");
    Ok(path)
}

/// Read a previously exported snapshot.
pub fn read_snapshot_json(path: &Path) -> Result<Snapshot, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open report '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid report JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::data::seed_issuers;
    use crate::models::ScoreModel;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn snapshot_uses_document_keys() {
        let model = ScoreModel::new(seed_issuers());
        let snapshot = Snapshot::capture(model.get("AAPL").unwrap(), at());
        let value = serde_json::to_value(&snapshot).unwrap();

        let obj = value.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["features", "issuer", "rating", "riskFactors", "score", "timestamp"]
        );
        assert_eq!(obj["issuer"], "Apple Inc.");
        assert_eq!(obj["rating"], "AAA");
        assert_eq!(obj["timestamp"], "2026-10-14T09:30:00.000Z");
        assert_eq!(obj["features"]["Debt-to-Equity"]["impact"], "positive");
        assert_eq!(obj["riskFactors"][0]["level"], "low");
    }

    #[test]
    fn write_then_read_preserves_feature_order() {
        let dir = tempfile::tempdir().unwrap();
        let model = ScoreModel::new(seed_issuers());
        let snapshot = Snapshot::capture(model.get("JPM").unwrap(), at());

        let path = write_snapshot_json(dir.path(), "JPM", &snapshot, at()).unwrap();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("credit_report_JPM_2026-10-14.json")
        );

        let back = read_snapshot_json(&path).unwrap();
        assert_eq!(back, snapshot);
        let names: Vec<&str> = back.features.iter().map(|(n, _)| n).collect();
        assert_eq!(names.first(), Some(&"Tier 1 Capital"));
        assert_eq!(names.last(), Some(&"Regulatory Compliance"));
    }

    #[test]
    fn unwritable_directory_is_reported() {
        let model = ScoreModel::new(seed_issuers());
        let snapshot = Snapshot::capture(model.get("TSLA").unwrap(), at());
        let err = write_snapshot_json(Path::new("/definitely/not/here"), "TSLA", &snapshot, at())
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
