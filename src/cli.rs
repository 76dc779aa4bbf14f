// src/cli.rs
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::consts::DEFAULT_TEAM;
use crate::config::options::{AssistSource, RunOptions, Stages};
use crate::progress::LogProgress;
use crate::runner::{self, RunSummary};

#[derive(Parser, Debug)]
#[command(name = "pbp_stats")]
#[command(version)]
#[command(about = "Assist networks and rotation patterns from play-by-play feeds")]
pub struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Team of interest, as named in the game header
    #[arg(long, default_value = DEFAULT_TEAM, global = true)]
    pub team: String,

    /// Output directory (defaults to each season directory)
    #[arg(short, long, global = true)]
    pub out: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract assists and write the assist network tables
    Assists(ExtractArgs),
    /// Extract substitutions and write the rotation tables and report
    Rotations(Seasons),
    /// Both stages
    All(ExtractArgs),
    /// Rebuild the assist tables from an existing assists.csv
    AnalyzeAssists(Seasons),
    /// Rebuild the rotation tables and report from an existing substitutions.csv
    AnalyzeRotations(Seasons),
}

#[derive(Args, Debug)]
pub struct Seasons {
    /// Season directories, e.g. 2024-25
    #[arg(required = true)]
    pub seasons: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub seasons: Seasons,

    /// Read assists from the game JSON files instead of plays.csv
    #[arg(long)]
    pub from_json: bool,
}

impl Cli {
    fn seasons(&self) -> &[PathBuf] {
        match &self.command {
            Command::Assists(a) | Command::All(a) => &a.seasons.seasons,
            Command::Rotations(s) | Command::AnalyzeAssists(s) | Command::AnalyzeRotations(s) => &s.seasons,
        }
    }

    /// Options for one season directory.
    pub fn options_for(&self, season: &Path) -> RunOptions {
        let (stages, from_json) = match &self.command {
            Command::Assists(a) => (Stages::Assists, a.from_json),
            Command::All(a) => (Stages::All, a.from_json),
            Command::Rotations(_) | Command::AnalyzeRotations(_) => (Stages::Rotations, false),
            Command::AnalyzeAssists(_) => (Stages::Assists, false),
        };
        RunOptions {
            season_dir: season.to_path_buf(),
            team: self.team.clone(),
            // several seasons into one --out would overwrite each other
            out_dir: self.out.as_ref().map(|o| {
                if self.seasons().len() > 1 {
                    o.join(season.file_name().unwrap_or(season.as_os_str()))
                } else {
                    o.clone()
                }
            }),
            assist_source: if from_json { AssistSource::GameJson } else { AssistSource::PlaysCsv },
            stages,
        }
    }
}

fn print_summary(season: &Path, s: &RunSummary) {
    println!("{}:", season.display());
    if s.assists > 0 {
        println!("  assists:        {}", s.assists);
    }
    if s.substitutions > 0 {
        println!("  substitutions:  {}", s.substitutions);
    }
    for f in &s.files_written {
        println!("  wrote {}", f.display());
    }
    for g in &s.failed_games {
        println!("  skipped {}: {}", g.file.display(), g.reason);
    }
}

fn run_season(cli: &Cli, season: &Path) -> crate::Result<RunSummary> {
    let opts = cli.options_for(season);
    logf!("== {} ({}) ==", season.display(), opts.team);
    match &cli.command {
        Command::AnalyzeAssists(_) => runner::analyze_assists_csv(&opts),
        Command::AnalyzeRotations(_) => runner::analyze_rotations_csv(&opts),
        _ => runner::run(&opts, &mut LogProgress::default()),
    }
}

/// Every season named on the command line. A failed season is logged and
/// skipped; the returned list holds the ones that failed.
pub fn run_seasons(cli: &Cli) -> Vec<(PathBuf, crate::PipelineError)> {
    let mut failed = Vec::new();
    for season in cli.seasons() {
        match run_season(cli, season) {
            Ok(summary) => print_summary(season, &summary),
            Err(e) => {
                loge!("{}: {e}", season.display());
                failed.push((season.clone(), e));
            }
        }
    }
    failed
}

pub fn run() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    crate::log::init(cli.verbose);

    let total = cli.seasons().len();
    let failed = run_seasons(&cli);
    println!("Processed {}/{total} seasons successfully", total - failed.len());

    match failed.as_slice() {
        [] => Ok(()),
        [(season, e)] => Err(color_eyre::eyre::eyre!("{}: {e}", season.display())),
        _ => Err(color_eyre::eyre::eyre!("{} of {total} seasons failed", failed.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::{SUB_PAIRS_FILE, SUBSTITUTIONS_FILE};
    use std::ffi::OsStr;

    #[test]
    fn parses_stage_and_flags() {
        let cli = Cli::try_parse_from(["pbp_stats", "-v", "assists", "--from-json", "2024-25"]).unwrap();
        assert_eq!(cli.verbose, 1);
        let opts = cli.options_for(Path::new("2024-25"));
        assert_eq!(opts.stages, Stages::Assists);
        assert_eq!(opts.assist_source, AssistSource::GameJson);
        assert_eq!(opts.team, DEFAULT_TEAM);
        assert_eq!(opts.out_dir, None);
    }

    #[test]
    fn multiple_seasons_get_their_own_out_subdir() {
        let cli = Cli::try_parse_from([
            "pbp_stats", "--team", "Iowa", "--out", "out", "rotations", "2023-24", "2024-25",
        ])
        .unwrap();
        let opts = cli.options_for(Path::new("data/2023-24"));
        assert_eq!(opts.out_dir, Some(PathBuf::from("out/2023-24")));
        assert_eq!(opts.team, "Iowa");
        assert_eq!(opts.stages, Stages::Rotations);
    }

    const GAME: &str = r#"{
        "Game": { "HomeTeam": { "Name": "Maryland" }, "VisitingTeam": { "Name": "Iowa" } },
        "Plays": [
            { "Period": 1, "ClockSeconds": 580, "Team": "HomeTeam", "Type": "SUBS",
              "Narrative": "02 A OUT; 14 B IN", "Score": { "HomeTeam": 0, "VisitingTeam": 0 } }
        ]
    }"#;

    #[test]
    fn failed_season_does_not_stop_the_next() {
        let tmp = tempfile::tempdir().unwrap();
        let empty = tmp.path().join("2023-24");
        let good = tmp.path().join("2024-25");
        std::fs::create_dir(&empty).unwrap();
        std::fs::create_dir(&good).unwrap();
        std::fs::write(good.join("18730.json"), GAME).unwrap();

        let cli = Cli::try_parse_from([
            OsStr::new("pbp_stats"),
            OsStr::new("rotations"),
            empty.as_os_str(),
            good.as_os_str(),
        ])
        .unwrap();
        let failed = run_seasons(&cli);

        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, empty);
        assert!(matches!(failed[0].1, crate::PipelineError::NoGames(_)));
        assert!(good.join(SUBSTITUTIONS_FILE).exists());
        assert!(good.join(SUB_PAIRS_FILE).exists());
        assert!(!empty.join(SUB_PAIRS_FILE).exists());
    }

    #[test]
    fn season_is_required() {
        assert!(Cli::try_parse_from(["pbp_stats", "all"]).is_err());
        assert!(Cli::try_parse_from(["pbp_stats", "analyze-rotations", "2024-25"]).is_ok());
    }
}
