// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub season_dir: PathBuf,
    pub team: String,
    /// Where tables land. `None` writes next to the inputs.
    pub out_dir: Option<PathBuf>,
    pub assist_source: AssistSource,
    pub stages: Stages,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            season_dir: PathBuf::new(),
            team: s!(DEFAULT_TEAM),
            out_dir: None,
            assist_source: AssistSource::PlaysCsv,
            stages: Stages::All,
        }
    }
}

impl RunOptions {
    pub fn for_season(dir: impl Into<PathBuf>) -> Self {
        Self { season_dir: dir.into(), ..Self::default() }
    }

    pub fn out_dir(&self) -> &Path {
        self.out_dir.as_deref().unwrap_or(&self.season_dir)
    }

    pub fn out_path(&self, file: &str) -> PathBuf {
        self.out_dir().join(file)
    }
}

/// Where assist narratives are read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssistSource {
    /// Flattened `plays.csv` produced by the flattening stage.
    PlaysCsv,
    /// Straight from the per-game JSON documents.
    GameJson,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stages {
    Assists,
    Rotations,
    All,
}

impl Stages {
    pub fn assists(self) -> bool {
        matches!(self, Stages::Assists | Stages::All)
    }
    pub fn rotations(self) -> bool {
        matches!(self, Stages::Rotations | Stages::All)
    }
}
