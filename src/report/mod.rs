//! Reporting utilities: formatted terminal output for issuers, history and events.

pub mod format;

pub use format::*;
