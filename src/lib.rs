// src/lib.rs
//! Play-by-play narrative parsing and team stats.
//!
//! ```text
//! game JSON / plays.csv → store → extract (specs) → events → analysis → file / report
//! ```

use std::path::PathBuf;

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod extract;
pub mod file;
pub mod model;
pub mod progress;
pub mod report;
pub mod runner;
pub mod specs;
pub mod store;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("required input not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("no game files found in {}", .0.display())]
    NoGames(PathBuf),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV error on {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
