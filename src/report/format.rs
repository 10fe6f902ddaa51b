//! Formatted terminal output for the CLI subcommands.
//!
//! We keep formatting code in one place so:
//! - the simulation code stays free of presentation concerns
//! - output changes are localized (important for snapshot-style tests)

use crate::domain::{Event, FeatureSet, HistoryPoint, Impact, Issuer, ModelMetrics, Period, RiskFactor};
use crate::sim::EventLog;

/// Width of the feature importance bars, in characters, at weight 1.0.
const BAR_WIDTH: usize = 40;

/// Score card: rating, score, 24h change.
pub fn format_score_card(issuer: &Issuer) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {} ({}) ===\n", issuer.name, issuer.code));
    out.push_str(&format!("Rating: {}\n", issuer.rating));
    out.push_str(&format!("Score:  {:.0}\n", issuer.current_score));
    out.push_str(&format!("Change: {}\n", format_change_badge(issuer.change)));
    out
}

/// `↑ 5 points (24h)` / `↓ 15 points (24h)`.
pub fn format_change_badge(change: f64) -> String {
    let rounded = change.round() as i64;
    let arrow = if rounded > 0 { '↑' } else { '↓' };
    format!("{arrow} {} points (24h)", rounded.abs())
}

/// Feature importance bars, heaviest weight first.
pub fn format_features(features: &FeatureSet) -> String {
    let mut out = String::new();
    out.push_str("Feature importance:\n");

    let rows = features.by_weight();
    let bar_width = BAR_WIDTH;
    let name_width = rows.iter().map(|(n, _)| n.chars().count()).max().unwrap_or(0);

    for (name, f) in rows {
        let filled = ((f.weight.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        let bar = impact_glyph(f.impact).to_string().repeat(filled);
        out.push_str(&format!(
            "  {name:<name_width$}  {bar:<bar_width$}  {:>5.1}%  {:<8}  {}\n",
            f.weight * 100.0,
            f.impact.as_str(),
            fmt_value(f.value),
        ));
    }
    out
}

fn impact_glyph(impact: Impact) -> char {
    match impact {
        Impact::Positive => '█',
        Impact::Negative => '▓',
        Impact::Neutral => '░',
    }
}

/// Compact value rendering: up to four decimals, trailing zeros dropped.
pub fn fmt_value(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" { "0".to_string() } else { s.to_string() }
}

pub fn format_risk_factors(risks: &[RiskFactor]) -> String {
    let mut out = String::new();
    out.push_str("Risk factors:\n");
    let name_width = risks.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
    for r in risks {
        out.push_str(&format!(
            "  {:<name_width$}  {}\n",
            r.name,
            r.level.as_str().to_uppercase()
        ));
    }
    out
}

pub fn format_event(event: &Event) -> String {
    format!(
        "  [{}] {} ({})\n      {}\n",
        event.time,
        event.title,
        event.impact.as_str().to_uppercase(),
        event.description
    )
}

pub fn format_events(events: &EventLog) -> String {
    let mut out = String::new();
    out.push_str(&format!("Events ({}):\n", events.len()));
    for e in events.all() {
        out.push_str(&format_event(e));
    }
    out
}

pub fn format_metrics(m: &ModelMetrics) -> String {
    format!(
        "Model: accuracy {:.1}% | precision {:.1}% | recall {:.1}% | latency {:.0}ms\n",
        m.accuracy, m.precision, m.recall, m.latency_ms
    )
}

/// Full issuer report: score card, features, risk factors.
pub fn format_issuer_report(issuer: &Issuer) -> String {
    let mut out = format_score_card(issuer);
    out.push('\n');
    out.push_str(&format_features(&issuer.features));
    out.push('\n');
    out.push_str(&format_risk_factors(&issuer.risk_factors));
    out
}

/// Two-column label/score table.
pub fn format_history_table(points: &[HistoryPoint], period: Period) -> String {
    let mut out = String::new();
    out.push_str(&format!("Score trend ({period}):\n"));
    let label_width = points.iter().map(|p| p.label.len()).max().unwrap_or(0);
    for p in points {
        out.push_str(&format!("  {:>label_width$}  {}\n", p.label, p.score));
    }
    out
}
