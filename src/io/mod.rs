//! Input/output helpers.
//!
//! - snapshot JSON export/readback (`export`)

pub mod export;

pub use export::*;
