// src/runner.rs
use std::path::PathBuf;

use crate::{
    Result,
    analysis::{assists::analyze_assists, rotations::analyze_rotations},
    config::{
        consts::*,
        options::{AssistSource, RunOptions},
    },
    extract::{GameFailure, SeasonEvents, extract_assists, extract_season},
    file::{write_table, write_text},
    model::{AssistEvent, SubstitutionEvent},
    progress::Progress,
    report, store,
};

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
    /// Games skipped during the batch; the rest of the season still counted.
    pub failed_games: Vec<GameFailure>,
    pub assists: usize,
    pub substitutions: usize,
}

impl RunSummary {
    fn wrote(&mut self, path: Option<PathBuf>) {
        self.files_written.extend(path);
    }
}

/// Top-level runner: the stages named in `opts`, for one season directory.
pub fn run(opts: &RunOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    // one pass over the game files serves both stages
    let needs_games = opts.stages.rotations()
        || (opts.stages.assists() && opts.assist_source == AssistSource::GameJson);
    let season = if needs_games {
        Some(extract_season(&opts.season_dir, &opts.team, progress)?)
    } else {
        None
    };

    if opts.stages.assists() {
        let events = match (&season, opts.assist_source) {
            (Some(s), AssistSource::GameJson) => s.assists.clone(),
            _ => assists_from_plays(opts)?,
        };
        write_assists(opts, &events, &mut summary)?;
    }

    if let Some(SeasonEvents { substitutions, failures, .. }) = season {
        if opts.stages.rotations() {
            write_rotations(opts, &substitutions, &mut summary)?;
        }
        summary.failed_games = failures;
    }

    if !summary.failed_games.is_empty() {
        logw!("{} game file(s) skipped", summary.failed_games.len());
    }
    Ok(summary)
}

/* ---------------- Assists ---------------- */

fn assists_from_plays(opts: &RunOptions) -> Result<Vec<AssistEvent>> {
    let path = opts.season_dir.join(PLAYS_FILE);
    logf!("Reading plays from {}", path.display());
    let plays = store::load_plays_csv(&path)?;
    let events = extract_assists(&plays, &opts.team);
    logf!("Found {} assists for {} in {} plays", events.len(), opts.team, plays.len());
    Ok(events)
}

fn write_assists(opts: &RunOptions, events: &[AssistEvent], summary: &mut RunSummary) -> Result<()> {
    summary.assists = events.len();
    summary.wrote(write_table(&opts.out_path(ASSISTS_FILE), events, "assists")?);
    write_assist_tables(opts, events, summary)
}

fn write_assist_tables(opts: &RunOptions, events: &[AssistEvent], summary: &mut RunSummary) -> Result<()> {
    let t = analyze_assists(events);
    summary.wrote(write_table(&opts.out_path(ASSIST_NETWORK_FILE), &t.network, "assist combinations")?);
    summary.wrote(write_table(&opts.out_path(ASSIST_LEADERS_FILE), &t.leaders, "assister stats")?);
    summary.wrote(write_table(&opts.out_path(ASSIST_RECEIVERS_FILE), &t.receivers, "scorer stats")?);
    for line in report::assist_summary(events, &t).lines() {
        logf!("{line}");
    }
    Ok(())
}

/// Re-run the assist tables from a previously written assists.csv.
pub fn analyze_assists_csv(opts: &RunOptions) -> Result<RunSummary> {
    let path = opts.out_path(ASSISTS_FILE);
    let events = store::load_assists_csv(&path)?;
    logf!("Loaded {} assists from {}", events.len(), path.display());

    let mut summary = RunSummary { assists: events.len(), ..Default::default() };
    write_assist_tables(opts, &events, &mut summary)?;
    Ok(summary)
}

/* ---------------- Rotations ---------------- */

fn write_rotations(opts: &RunOptions, events: &[SubstitutionEvent], summary: &mut RunSummary) -> Result<()> {
    summary.substitutions = events.len();
    summary.wrote(write_table(&opts.out_path(SUBSTITUTIONS_FILE), events, "substitutions")?);
    write_rotation_tables(opts, events, summary)
}

fn write_rotation_tables(
    opts: &RunOptions,
    events: &[SubstitutionEvent],
    summary: &mut RunSummary,
) -> Result<()> {
    let t = analyze_rotations(events);
    summary.wrote(write_table(&opts.out_path(SUB_PAIRS_FILE), &t.pairs, "substitution pairs")?);
    summary.wrote(write_table(&opts.out_path(PLAYER_SUB_FREQUENCY_FILE), &t.frequency, "player frequency rows")?);
    summary.wrote(write_table(&opts.out_path(TIMING_PATTERNS_FILE), &t.timing, "timing patterns")?);
    summary.wrote(write_table(&opts.out_path(SITUATIONAL_FILE), &t.situational, "situational patterns")?);
    summary.wrote(write_table(&opts.out_path(MULTI_PLAYER_FILE), &t.multi_player, "multi-player substitutions")?);
    summary.wrote(write_table(&opts.out_path(PERIOD_TRANSITIONS_FILE), &t.period_starts, "period transition patterns")?);

    let text = report::rotation_report(&opts.team, events, &t);
    summary.files_written.push(write_text(&opts.out_path(ROTATION_REPORT_FILE), &text)?);
    Ok(())
}

/// Re-run the rotation tables and report from a previously written
/// substitutions.csv.
pub fn analyze_rotations_csv(opts: &RunOptions) -> Result<RunSummary> {
    let path = opts.out_path(SUBSTITUTIONS_FILE);
    let events = store::load_substitutions_csv(&path)?;
    logf!("Loaded {} substitutions from {}", events.len(), path.display());

    let mut summary = RunSummary { substitutions: events.len(), ..Default::default() };
    write_rotation_tables(opts, &events, &mut summary)?;
    Ok(summary)
}
