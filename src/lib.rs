//! `credit-pulse` library crate.
//!
//! The binary (`pulse`) is a thin wrapper around this library so that:
//!
//! - the simulation core is testable without a terminal
//! - the CLI and TUI front-ends share one controller

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod models;
pub mod plot;
pub mod report;
pub mod sim;
pub mod tui;
