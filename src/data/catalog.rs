//! Hardcoded seed data: issuers, initial events feed, and the pool of canned
//! "new" events the simulation draws from.

use crate::domain::{Event, Feature, FeatureSet, Impact, Issuer, Rating, RiskFactor, RiskLevel};

/// Issuer selected when nothing else is configured.
pub const DEFAULT_ISSUER: &str = "AAPL";

fn features(rows: [(&str, f64, f64, Impact); 6]) -> FeatureSet {
    rows.into_iter()
        .map(|(name, value, weight, impact)| (name, Feature::new(value, weight, impact)))
        .collect()
}

fn risks(rows: [(&str, RiskLevel); 4]) -> Vec<RiskFactor> {
    rows.into_iter()
        .map(|(name, level)| RiskFactor::new(name, level))
        .collect()
}

/// Seed issuer records.
///
/// The ratings written here are only starting hints; `ScoreModel::new`
/// re-derives them from the scores.
pub fn seed_issuers() -> Vec<Issuer> {
    use Impact::{Negative, Neutral, Positive};
    use RiskLevel::{High, Low, Medium};

    vec![
        Issuer {
            code: "AAPL".to_string(),
            name: "Apple Inc.".to_string(),
            current_score: 950.0,
            rating: Rating::Aaa,
            change: 5.0,
            features: features([
                ("Debt-to-Equity", 0.23, 0.25, Positive),
                ("Current Ratio", 1.8, 0.20, Positive),
                ("Revenue Growth", 0.08, 0.18, Positive),
                ("Interest Coverage", 28.5, 0.15, Positive),
                ("Market Sentiment", 0.75, 0.12, Positive),
                ("Sector Performance", 0.65, 0.10, Positive),
            ]),
            risk_factors: risks([
                ("Market Volatility", Low),
                ("Regulatory Risk", Low),
                ("Technology Disruption", Medium),
                ("Supply Chain", Low),
            ]),
        },
        Issuer {
            code: "TSLA".to_string(),
            name: "Tesla Inc.".to_string(),
            current_score: 720.0,
            rating: Rating::A,
            change: -15.0,
            features: features([
                ("Debt-to-Equity", 0.45, 0.25, Negative),
                ("Current Ratio", 1.1, 0.20, Negative),
                ("Revenue Growth", 0.35, 0.18, Positive),
                ("Interest Coverage", 8.2, 0.15, Neutral),
                ("Market Sentiment", 0.65, 0.12, Positive),
                ("Sector Performance", 0.55, 0.10, Neutral),
            ]),
            risk_factors: risks([
                ("Market Volatility", High),
                ("Regulatory Risk", Medium),
                ("Production Scaling", Medium),
                ("Competition", High),
            ]),
        },
        Issuer {
            code: "JPM".to_string(),
            name: "JPMorgan Chase".to_string(),
            current_score: 890.0,
            rating: Rating::Aa,
            change: 2.0,
            features: features([
                ("Tier 1 Capital", 0.155, 0.30, Positive),
                ("ROE", 0.14, 0.20, Positive),
                ("Loan Loss Provision", 0.008, 0.18, Positive),
                ("Net Interest Margin", 0.025, 0.15, Positive),
                ("Market Sentiment", 0.70, 0.10, Positive),
                ("Regulatory Compliance", 0.95, 0.07, Positive),
            ]),
            risk_factors: risks([
                ("Interest Rate Risk", Medium),
                ("Credit Risk", Low),
                ("Regulatory Changes", Medium),
                ("Market Risk", Low),
            ]),
        },
    ]
}

/// Initial events feed, newest first.
pub fn seed_events() -> Vec<Event> {
    vec![
        Event::new(
            "2 hours ago",
            "Q3 Earnings Beat Expectations",
            Impact::Positive,
            "Revenue up 12% YoY, EPS exceeded forecast by $0.15",
        ),
        Event::new(
            "5 hours ago",
            "Fed Interest Rate Decision",
            Impact::Neutral,
            "Federal Reserve maintains current rates, signals potential cuts",
        ),
        Event::new(
            "1 day ago",
            "Supply Chain Disruption Alert",
            Impact::Negative,
            "Key supplier facing production delays due to labor strikes",
        ),
        Event::new(
            "2 days ago",
            "New Product Launch Announcement",
            Impact::Positive,
            "Major product unveiling drives positive analyst sentiment",
        ),
        Event::new(
            "3 days ago",
            "Regulatory Compliance Update",
            Impact::Neutral,
            "Company files required regulatory documentation on time",
        ),
    ]
}

/// Canned events a tick may push onto the feed.
pub fn live_event_pool() -> Vec<Event> {
    vec![
        Event::new(
            "Just now",
            "Market Volatility Spike Detected",
            Impact::Negative,
            "VIX index increased by 8% in the last hour",
        ),
        Event::new(
            "Just now",
            "Positive Analyst Upgrade",
            Impact::Positive,
            "Goldman Sachs upgrades target price by 15%",
        ),
        Event::new(
            "Just now",
            "Economic Indicator Update",
            Impact::Neutral,
            "GDP growth data released, in line with expectations",
        ),
    ]
}
