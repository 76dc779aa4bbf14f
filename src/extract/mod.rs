// src/extract/mod.rs
//! Event extraction: play list → typed events.
//!
//! Filtering (team, play type, marker) happens here; the narrative grammar
//! itself lives in `specs`.
pub mod assists;
pub mod season;
pub mod substitutions;

pub use assists::extract_assists;
pub use season::{GameFailure, SeasonEvents, extract_season};
pub use substitutions::extract_substitutions;
