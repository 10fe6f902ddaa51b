//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the dashboard config (file, then flags)
//! - dispatches to the CLI printers or the TUI

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use clap::Parser;
use tracing::{debug, info};

use crate::cli::{AlertArgs, Command, CommonArgs, ExportArgs, HistoryArgs, SimulateArgs, TuiArgs};
use crate::config::DashboardConfig;
use crate::domain::Period;
use crate::error::AppError;
use crate::sim::Simulation;

pub mod controller;

pub use controller::{DashboardController, DashboardTask};

/// Entry point for the `pulse` binary.
pub fn run() -> Result<(), AppError> {
    // `pulse` and `pulse -i TSLA` behave like `pulse tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        command => {
            crate::logging::init_stderr();
            match command {
                Command::Report(args) => handle_report(args),
                Command::History(args) => handle_history(args),
                Command::Simulate(args) => handle_simulate(args),
                Command::Export(args) => handle_export(args),
                Command::Alert(args) => handle_alert(args),
                Command::Tui(_) => Ok(()),
            }
        }
    }
}

/// Config file (if any) with command-line overrides applied.
pub fn dashboard_config(args: &CommonArgs) -> Result<DashboardConfig, AppError> {
    let mut config = match &args.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(code) = &args.issuer {
        config.initial_issuer = code.trim().to_uppercase();
    }
    config.validate()?;
    debug!(?config, "dashboard config resolved");
    Ok(config)
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    if let Some(path) = &args.log_file {
        crate::logging::init_file(path)?;
    }
    let config = dashboard_config(&args.common)?;
    crate::tui::run(config, args.out)
}

fn handle_report(args: CommonArgs) -> Result<(), AppError> {
    let config = dashboard_config(&args)?;
    let controller = DashboardController::new(config, Instant::now())?;
    println!("{}", render_report(&controller)?);
    Ok(())
}

/// Score card, features, risk factors, events feed and the metrics line.
pub fn render_report(controller: &DashboardController) -> Result<String, AppError> {
    let issuer = controller.current()?;
    let mut out = crate::report::format_issuer_report(issuer);
    out.push('\n');
    out.push_str(&crate::report::format_events(controller.events()));
    out.push('\n');
    out.push_str(&crate::report::format_metrics(controller.metrics()));
    Ok(out)
}

fn handle_history(args: HistoryArgs) -> Result<(), AppError> {
    let mut config = dashboard_config(&args.common)?;
    config.initial_period = Period::parse_or_default(&args.period);

    let mut controller = DashboardController::new(config, Instant::now())?;
    let points = controller.history()?;
    let period = controller.selected_period();

    println!("{}", crate::report::format_history_table(&points, period));
    println!(
        "{}",
        crate::plot::render_history_plot(&points, args.width, args.height)
    );
    Ok(())
}

fn handle_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let config = dashboard_config(&args.common)?;
    let mut sim = Simulation::create(&config);

    for i in 1..=args.ticks {
        let Some(report) = sim.tick() else {
            break;
        };
        let event = report
            .event
            .as_ref()
            .map(|e| e.title.as_str())
            .unwrap_or("-");
        println!(
            "tick {i:>3}: {} issuers, {} features changed, event: {event}",
            report.issuers, report.features_changed
        );
    }
    println!();

    for issuer in sim.scores().issuers() {
        println!("{}", crate::report::format_issuer_report(issuer));
    }
    println!("{}", crate::report::format_events(sim.events()));

    info!(ticks = sim.ticks(), "simulation batch finished");
    sim.teardown();
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let config = dashboard_config(&args.common)?;
    let controller = DashboardController::new(config, Instant::now())?;
    let path = export_selected(&controller, &args.out)?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Write the snapshot for the selected issuer into `dir`.
pub fn export_selected(controller: &DashboardController, dir: &Path) -> Result<std::path::PathBuf, AppError> {
    let code = controller.selected_issuer();
    let now = Utc::now();
    let snapshot = controller.export_snapshot_at(code, now)?;
    crate::io::export::write_snapshot_json(dir, code, &snapshot, now)
}

/// The confirmation doesn't depend on simulation state, so no config is read.
fn handle_alert(args: AlertArgs) -> Result<(), AppError> {
    let config = DashboardConfig::default();
    let mut controller = DashboardController::new(config, Instant::now())?;
    println!("{}", controller.submit_alert(args.kind, args.threshold));
    Ok(())
}

/// Rewrite argv so `pulse` defaults to `pulse tui`.
///
/// Rules:
/// - `pulse`                      -> `pulse tui`
/// - `pulse -i TSLA ...`          -> `pulse tui -i TSLA ...`
/// - `pulse --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "tui" | "report" | "history" | "simulate" | "export" | "alert"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["pulse"])), argv(&["pulse", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["pulse", "-i", "TSLA"])),
            argv(&["pulse", "tui", "-i", "TSLA"])
        );
        assert_eq!(rewrite_args(argv(&["pulse", "--help"])), argv(&["pulse", "--help"]));
        assert_eq!(
            rewrite_args(argv(&["pulse", "report", "--seed", "1"])),
            argv(&["pulse", "report", "--seed", "1"])
        );
    }

    #[test]
    fn flags_override_defaults() {
        let args = CommonArgs {
            issuer: Some(" jpm ".to_string()),
            seed: Some(11),
            config: None,
        };
        let config = dashboard_config(&args).unwrap();
        assert_eq!(config.initial_issuer, "JPM");
        assert_eq!(config.seed, Some(11));
    }

    #[test]
    fn unknown_issuer_is_a_usage_error() {
        let args = CommonArgs {
            issuer: Some("MSFT".to_string()),
            seed: Some(1),
            config: None,
        };
        let config = dashboard_config(&args).unwrap();
        let err = DashboardController::new(config, Instant::now())
            .map_err(AppError::from)
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn report_and_export_for_seeded_run() {
        let args = CommonArgs {
            issuer: Some("TSLA".to_string()),
            seed: Some(3),
            config: None,
        };
        let controller = DashboardController::new(dashboard_config(&args).unwrap(), Instant::now()).unwrap();

        let txt = render_report(&controller).unwrap();
        assert!(txt.starts_with("=== Tesla Inc. (TSLA) ==="));
        assert!(txt.contains("Events (5):"));
        assert!(txt.contains("Model: accuracy"));

        let dir = tempfile::tempdir().unwrap();
        let path = export_selected(&controller, dir.path()).unwrap();
        let snap = crate::io::export::read_snapshot_json(&path).unwrap();
        assert_eq!(snap.issuer, "Tesla Inc.");
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("credit_report_TSLA_"));
    }
}
