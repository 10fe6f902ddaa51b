//! Command-line parsing for the credit-score dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the simulation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::AlertKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pulse", version, about = "Simulated credit-scoring dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard (default).
    Tui(TuiArgs),
    /// Print the score card, feature bars, risk factors and events feed.
    Report(CommonArgs),
    /// Print a synthesized score trend as a table and an ASCII plot.
    History(HistoryArgs),
    /// Run a batch of simulation ticks and print every issuer afterwards.
    Simulate(SimulateArgs),
    /// Write the snapshot JSON document for one issuer.
    Export(ExportArgs),
    /// Echo the confirmation for a score alert (needs no config or seed).
    Alert(AlertArgs),
}

/// Options shared by every command that builds a dashboard.
#[derive(Debug, Parser, Clone, Default)]
pub struct CommonArgs {
    /// Issuer code (AAPL, TSLA, JPM).
    #[arg(short = 'i', long)]
    pub issuer: Option<String>,

    /// Random seed; omitted means a fresh entropy-seeded run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// TOML config file. Flags override its values.
    #[arg(short = 'c', long, value_name = "TOML")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Append tracing output to this file (the TUI does not log otherwise).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Directory for exported reports.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out: PathBuf,
}

#[derive(Debug, Parser, Clone)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Period code: 24h, 7d, 30d or 1y. Anything else means 24h.
    #[arg(short = 'p', long, default_value = "24h")]
    pub period: String,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,
}

#[derive(Debug, Parser, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Number of ticks to run.
    #[arg(short = 'n', long, default_value_t = 10)]
    pub ticks: usize,
}

#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output directory.
    #[arg(short = 'o', long, value_name = "DIR", default_value = ".")]
    pub out: PathBuf,
}

#[derive(Debug, Parser, Clone)]
pub struct AlertArgs {
    #[arg(long, value_enum)]
    pub kind: AlertKind,

    /// Score threshold; must be a finite number.
    #[arg(long, allow_negative_numbers = true, value_parser = parse_threshold)]
    pub threshold: f64,
}

/// Parse an alert threshold, rejecting `NaN` and infinities.
pub fn parse_threshold(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("threshold must be finite, got '{raw}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_period_is_free_text() {
        let cli = Cli::parse_from(["pulse", "history", "--period", "90d", "-i", "JPM"]);
        let Command::History(args) = cli.command else {
            panic!("expected history");
        };
        assert_eq!(args.period, "90d");
        assert_eq!(args.common.issuer.as_deref(), Some("JPM"));
        assert_eq!(args.width, 72);
    }

    #[test]
    fn alert_kind_is_a_value_enum() {
        let cli = Cli::parse_from(["pulse", "alert", "--kind", "below", "--threshold", "800"]);
        let Command::Alert(args) = cli.command else {
            panic!("expected alert");
        };
        assert_eq!(args.kind, AlertKind::Below);
        assert_eq!(args.threshold, 800.0);

        assert!(Cli::try_parse_from(["pulse", "alert", "--kind", "sideways", "--threshold", "1"]).is_err());
    }

    #[test]
    fn non_finite_thresholds_are_rejected() {
        for raw in ["NaN", "inf", "-inf", "abc"] {
            assert!(
                Cli::try_parse_from(["pulse", "alert", "--kind", "above", "--threshold", raw]).is_err(),
                "{raw}"
            );
            assert!(parse_threshold(raw).is_err(), "{raw}");
        }
        assert_eq!(parse_threshold("-12.5"), Ok(-12.5));
    }
}
