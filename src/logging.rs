//! Tracing subscriber setup.
//!
//! CLI commands log to stderr. The TUI owns the terminal, so it only logs when
//! given a file.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::AppError;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "credit_pulse=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a stderr subscriber. A second call is a no-op.
pub fn init_stderr() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

/// Install a subscriber appending plain-text lines to `path`.
pub fn init_file(path: &Path) -> Result<(), AppError> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open log file '{}': {e}", path.display())))?;

    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .try_init();
    Ok(())
}
