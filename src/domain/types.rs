//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - mutated in-memory by the simulation
//! - read by the terminal front-ends
//! - exported to the JSON snapshot document

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lower bound of the score domain.
pub const SCORE_MIN: f64 = 600.0;
/// Upper bound of the score domain.
pub const SCORE_MAX: f64 = 1000.0;

/// Clamp a raw score into `[SCORE_MIN, SCORE_MAX]`.
///
/// NaN collapses to the lower bound so downstream code only ever sees a
/// finite score.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return SCORE_MIN;
    }
    score.clamp(SCORE_MIN, SCORE_MAX)
}

/// Discrete credit-quality label derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rating {
    Aaa,
    Aa,
    A,
    Bbb,
    Bb,
    B,
}

impl Rating {
    /// All ratings, best first.
    pub const ALL: [Rating; 6] = [
        Rating::Aaa,
        Rating::Aa,
        Rating::A,
        Rating::Bbb,
        Rating::Bb,
        Rating::B,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rating::Aaa => "AAA",
            Rating::Aa => "AA",
            Rating::A => "A",
            Rating::Bbb => "BBB",
            Rating::Bb => "BB",
            Rating::B => "B",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction in which a feature or event pushes the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

impl Impact {
    pub fn as_str(self) -> &'static str {
        match self {
            Impact::Positive => "positive",
            Impact::Negative => "negative",
            Impact::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weighted input signal contributing to a score.
///
/// `weight` lives in `[0, 1]`; weights are compared relatively and don't need
/// to sum to one across a feature set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub value: f64,
    pub weight: f64,
    pub impact: Impact,
}

impl Feature {
    pub fn new(value: f64, weight: f64, impact: Impact) -> Self {
        Self {
            value,
            weight,
            impact,
        }
    }
}

/// Ordered `name -> Feature` mapping.
///
/// Insertion order is the stored order and survives a JSON round trip (the
/// export writes it as an object whose keys follow that order).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    entries: Vec<(String, Feature)>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a feature, keeping its position on replace.
    pub fn insert(&mut self, name: impl Into<String>, feature: Feature) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = feature,
            None => self.entries.push((name, feature)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Feature> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Feature)> {
        self.entries.iter().map(|(n, f)| (n.as_str(), f))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Feature)> {
        self.entries.iter_mut().map(|(n, f)| (n.as_str(), f))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Features sorted by descending weight (importance bars order).
    ///
    /// Ties keep stored order.
    pub fn by_weight(&self) -> Vec<(&str, &Feature)> {
        let mut out: Vec<(&str, &Feature)> = self.iter().collect();
        out.sort_by(|a, b| {
            b.1.weight
                .partial_cmp(&a.1.weight)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        out
    }
}

impl<N: Into<String>> FromIterator<(N, Feature)> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = (N, Feature)>>(iter: I) -> Self {
        let mut set = FeatureSet::new();
        for (name, feature) in iter {
            set.insert(name, feature);
        }
        set
    }
}

impl Serialize for FeatureSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(n, f)| (n, f)))
    }
}

impl<'de> Deserialize<'de> for FeatureSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FeatureSetVisitor;

        impl<'de> Visitor<'de> for FeatureSetVisitor {
            type Value = FeatureSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of feature name to feature")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FeatureSet, A::Error> {
                let mut set = FeatureSet::new();
                while let Some((name, feature)) = access.next_entry::<String, Feature>()? {
                    set.insert(name, feature);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(FeatureSetVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub level: RiskLevel,
}

impl RiskFactor {
    pub fn new(name: impl Into<String>, level: RiskLevel) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}

/// An entity being credit-scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issuer {
    pub code: String,
    pub name: String,
    pub current_score: f64,
    pub rating: Rating,
    /// Signed delta since the previous observation.
    pub change: f64,
    pub features: FeatureSet,
    pub risk_factors: Vec<RiskFactor>,
}

impl Issuer {
    /// Display form of `change`: `+5`, `-15`, `0`.
    pub fn change_label(&self) -> String {
        format_change(self.change)
    }
}

/// Format a score delta with its sign kept.
///
/// Positive deltas always carry a `+` (even when they round to zero), which
/// matches how the 24h change badge reads.
pub fn format_change(delta: f64) -> String {
    let rounded = delta.round() as i64;
    if delta > 0.0 {
        format!("+{rounded}")
    } else {
        format!("{rounded}")
    }
}

/// A market event shown in the events feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub time: String,
    pub title: String,
    pub impact: Impact,
    pub description: String,
}

impl Event {
    pub fn new(
        time: impl Into<String>,
        title: impl Into<String>,
        impact: Impact,
        description: impl Into<String>,
    ) -> Self {
        Self {
            time: time.into(),
            title: title.into(),
            impact,
            description: description.into(),
        }
    }
}

/// One point of the synthetic score-trend series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryPoint {
    pub label: String,
    pub score: i64,
}

/// Window shown by the score-trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    #[default]
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "1y")]
    Year,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Day, Period::Week, Period::Month, Period::Year];

    /// Parse a period code; anything unrecognised falls back to `24h`.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.trim() {
            "24h" => Period::Day,
            "7d" => Period::Week,
            "30d" => Period::Month,
            "1y" => Period::Year,
            _ => Period::Day,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Day => "24h",
            Period::Week => "7d",
            Period::Month => "30d",
            Period::Year => "1y",
        }
    }

    /// Number of points the history series has for this period.
    pub fn points(self) -> usize {
        match self {
            Period::Day => 24,
            Period::Week => 7,
            Period::Month => 30,
            Period::Year => 12,
        }
    }

    /// Label for point `i`, counting backward from now.
    pub fn label(self, i: usize) -> String {
        let i = i as i64;
        match self {
            Period::Day => format!("{}:00", 23 - i),
            Period::Week => format!("{}d ago", 7 - i),
            Period::Month => format!("{}d ago", 30 - i),
            Period::Year => format!("{}m ago", 12 - i),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a score alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Above,
    Below,
}

impl AlertKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::Above => "above",
            AlertKind::Below => "below",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            AlertKind::Above => AlertKind::Below,
            AlertKind::Below => AlertKind::Above,
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A transient message for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Synthetic model-performance panel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub latency_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_features() -> FeatureSet {
        [
            ("Current Ratio", Feature::new(1.8, 0.20, Impact::Positive)),
            ("Debt-to-Equity", Feature::new(0.23, 0.25, Impact::Positive)),
            ("ROE", Feature::new(0.14, 0.20, Impact::Neutral)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn change_label_keeps_sign() {
        assert_eq!(format_change(5.0), "+5");
        assert_eq!(format_change(-15.0), "-15");
        assert_eq!(format_change(0.0), "0");
        assert_eq!(format_change(2.6), "+3");
        assert_eq!(format_change(-0.3), "0");
    }

    #[test]
    fn feature_set_by_weight_is_stable_on_ties() {
        let set = sample_features();
        let names: Vec<&str> = set.by_weight().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Debt-to-Equity", "Current Ratio", "ROE"]);
    }

    #[test]
    fn feature_set_json_keeps_stored_order() {
        let set = sample_features();
        let json = serde_json::to_string(&set).unwrap();
        let cr = json.find("Current Ratio").unwrap();
        let de = json.find("Debt-to-Equity").unwrap();
        let roe = json.find("ROE").unwrap();
        assert!(cr < de && de < roe, "unexpected key order: {json}");

        let back: FeatureSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn feature_set_insert_replaces_in_place() {
        let mut set = sample_features();
        set.insert("Current Ratio", Feature::new(2.0, 0.20, Impact::Positive));
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().next().map(|(n, f)| (n, f.value)), Some(("Current Ratio", 2.0)));
    }

    #[test]
    fn period_parse_falls_back_to_day() {
        assert_eq!(Period::parse_or_default("7d"), Period::Week);
        assert_eq!(Period::parse_or_default("1y"), Period::Year);
        assert_eq!(Period::parse_or_default("90d"), Period::Day);
        assert_eq!(Period::parse_or_default(""), Period::Day);
    }

    #[test]
    fn clamp_score_handles_nan() {
        assert_eq!(clamp_score(f64::NAN), SCORE_MIN);
        assert_eq!(clamp_score(1200.0), SCORE_MAX);
        assert_eq!(clamp_score(512.0), SCORE_MIN);
        assert_eq!(clamp_score(777.5), 777.5);
    }

    #[test]
    fn rating_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Rating::Bbb).unwrap(), "\"BBB\"");
    }
}
