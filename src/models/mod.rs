//! Score records and the rating classifier.
//!
//! The classifier is a small, pure function so the score model and the
//! mutation engine can share it without holding any state.

pub mod rating;
pub mod score;

pub use rating::*;
pub use score::*;
