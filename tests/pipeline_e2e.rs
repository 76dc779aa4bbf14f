// tests/pipeline_e2e.rs
use std::fs;
use std::path::{Path, PathBuf};

use pbp_stats::config::consts::*;
use pbp_stats::config::options::{AssistSource, RunOptions, Stages};
use pbp_stats::progress::{NullProgress, Progress};
use pbp_stats::runner;

fn season_dir(root: &Path) -> PathBuf {
    let dir = root.join("2024-25");
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn game(home: &str, visiting: &str, plays: &str) -> String {
    format!(
        r#"{{ "Game": {{ "HomeTeam": {{ "Name": "{home}" }}, "VisitingTeam": {{ "Name": "{visiting}" }} }},
             "Plays": [ {plays} ] }}"#
    )
}

const HOME_PLAYS: &str = r#"
    { "Period": 1, "ClockSeconds": 600, "Team": "HomeTeam", "Type": "SUBS",
      "Narrative": "02 Kaylene Smikle OUT; 14 Sarah Te-Biasu OUT; 06 Saylor Poffenbarger IN; 10 Shyanne Sellers IN" },
    { "Period": 1, "ClockSeconds": 520, "Team": "HomeTeam", "Type": "GOOD", "Action": "LAYUP",
      "Narrative": "06 Saylor Poffenbarger LAYUP GOOD (2 Pt); 10 Shyanne Sellers Assist (1 Asst)",
      "Score": { "HomeTeam": 2, "VisitingTeam": 0 } },
    { "Period": 2, "ClockSeconds": 300, "Team": "HomeTeam", "Type": "SUBS",
      "Narrative": "06 Saylor Poffenbarger OUT; 02 Kaylene Smikle IN",
      "Score": { "Home": 30, "Visiting": 18 } },
    { "Period": 2, "ClockSeconds": 280, "Team": "VisitingTeam", "Type": "SUBS",
      "Narrative": "01 Someone Else OUT; 03 Other Player IN" }
"#;

const AWAY_PLAYS: &str = r#"
    { "Period": 3, "ClockSeconds": 410, "Team": "VisitingTeam", "Type": "SUBS",
      "Narrative": "02 Kaylene Smikle OUT; 06 Saylor Poffenbarger IN",
      "Score": { "HomeTeam": 50, "VisitingTeam": 44 } },
    { "Period": 3, "ClockSeconds": 390, "Team": "VisitingTeam", "Type": "GOOD",
      "Narrative": "02 Kaylene Smikle 3PTR GOOD (9 Pt); 06 Saylor Poffenbarger Assist (2 Asst)",
      "Score": { "HomeTeam": 50, "VisitingTeam": 47 } }
"#;

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<String>,
    failed: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn item_done(&mut self, id: &str) { self.done.push(id.to_string()); }
    fn item_failed(&mut self, id: &str, _reason: &str) { self.failed.push(id.to_string()); }
    fn finish(&mut self) { self.finished = true; }
}

#[test]
fn malformed_middle_game_is_skipped_and_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = season_dir(tmp.path());
    fs::write(dir.join("100.json"), game("Maryland", "Iowa", HOME_PLAYS)).unwrap();
    fs::write(dir.join("200.json"), r#"{ "Game": { "HomeTeam": { "Name": "Maryland" } } }"#).unwrap();
    fs::write(dir.join("300.json"), game("Ohio State", "Maryland", AWAY_PLAYS)).unwrap();

    let mut opts = RunOptions::for_season(&dir);
    opts.assist_source = AssistSource::GameJson;
    let mut rec = Recorder::default();
    let summary = runner::run(&opts, &mut rec).unwrap();

    assert_eq!(rec.total, 3);
    assert_eq!(rec.done, vec!["100", "300"]);
    assert_eq!(rec.failed, vec!["200.json"]);
    assert!(rec.finished);

    assert_eq!(summary.failed_games.len(), 1);
    assert!(summary.failed_games[0].file.ends_with("200.json"));
    // 2 + 1 pairs at home (visiting SUBS ignored), 1 away
    assert_eq!(summary.substitutions, 4);
    assert_eq!(summary.assists, 2);

    let subs = fs::read_to_string(dir.join(SUBSTITUTIONS_FILE)).unwrap();
    assert!(!subs.contains("Someone Else"));
    assert!(!subs.contains("\"200\""));

    let report = fs::read_to_string(dir.join(ROTATION_REPORT_FILE)).unwrap();
    assert!(report.contains("Total Games Analyzed: 2"));
    assert!(report.contains("Total Substitutions: 4"));

    for f in [SUB_PAIRS_FILE, PLAYER_SUB_FREQUENCY_FILE, TIMING_PATTERNS_FILE, SITUATIONAL_FILE,
              MULTI_PLAYER_FILE, PERIOD_TRANSITIONS_FILE, ASSIST_NETWORK_FILE] {
        assert!(dir.join(f).exists(), "{f} missing");
    }
}

#[test]
fn score_diff_follows_team_side() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = season_dir(tmp.path());
    fs::write(dir.join("300.json"), game("Ohio State", "Maryland", AWAY_PLAYS)).unwrap();

    let mut opts = RunOptions::for_season(&dir);
    opts.stages = Stages::Rotations;
    runner::run(&opts, &mut NullProgress).unwrap();

    let mut rdr = csv::Reader::from_path(dir.join(SUBSTITUTIONS_FILE)).unwrap();
    let headers = rdr.headers().unwrap().clone();
    let row = rdr.records().next().unwrap().unwrap();
    let col = |name: &str| row.get(headers.iter().position(|h| h == name).unwrap()).unwrap().to_string();
    assert_eq!(col("team_score"), "44");
    assert_eq!(col("opponent_score"), "50");
    assert_eq!(col("score_diff"), "-6");
    assert_eq!(col("time_remaining"), "06:50");
}

#[test]
fn multi_player_and_period_start_tables() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = season_dir(tmp.path());
    fs::write(dir.join("100.json"), game("Maryland", "Iowa", HOME_PLAYS)).unwrap();

    let mut opts = RunOptions::for_season(&dir);
    opts.stages = Stages::Rotations;
    runner::run(&opts, &mut NullProgress).unwrap();

    let multi = fs::read_to_string(dir.join(MULTI_PLAYER_FILE)).unwrap();
    let lines: Vec<_> = multi.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("\"Kaylene Smikle, Sarah Te-Biasu\""));
    assert!(lines[1].contains(",2,"));

    let starts = fs::read_to_string(dir.join(PERIOD_TRANSITIONS_FILE)).unwrap();
    assert_eq!(starts.lines().count(), 2);
}

#[test]
fn analyze_only_rebuilds_from_written_events() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = season_dir(tmp.path());
    fs::write(dir.join("100.json"), game("Maryland", "Iowa", HOME_PLAYS)).unwrap();

    let out = tmp.path().join("out");
    let mut opts = RunOptions::for_season(&dir);
    opts.out_dir = Some(out.clone());
    opts.stages = Stages::Rotations;
    runner::run(&opts, &mut NullProgress).unwrap();
    let first = fs::read_to_string(out.join(SUB_PAIRS_FILE)).unwrap();

    fs::remove_file(out.join(SUB_PAIRS_FILE)).unwrap();
    let summary = runner::analyze_rotations_csv(&opts).unwrap();
    assert_eq!(summary.substitutions, 3);
    assert_eq!(fs::read_to_string(out.join(SUB_PAIRS_FILE)).unwrap(), first);
}

#[test]
fn missing_inputs_halt_the_stage() {
    let tmp = tempfile::tempdir().unwrap();
    let opts = RunOptions::for_season(tmp.path().join("nope"));
    assert!(runner::run(&opts, &mut NullProgress).is_err());
    assert!(runner::analyze_assists_csv(&opts).is_err());
    assert!(runner::analyze_rotations_csv(&opts).is_err());
}
