// src/store.rs
//
// Input boundary. Everything the pipeline reads from disk comes through here:
// - per-game JSON documents (one file per game, scraped upstream)
// - plays.csv from the flattening stage
// - assists.csv / substitutions.csv written by an earlier run

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::consts::{GAME_EXT, HOME_SIDE, VISITING_SIDE};
use crate::core::sanitize::{is_blank, normalize_ws};
use crate::model::{AssistEvent, PlayRecord, Player, ScoreSnapshot, Side, SubstitutionEvent};
use crate::{PipelineError, Result};

/* ---------------- Game JSON ---------------- */

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameDoc {
    pub game: GameHeader,
    pub plays: Vec<FeedPlay>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameHeader {
    pub home_team: FeedTeam,
    pub visiting_team: FeedTeam,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeedTeam {
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FeedPlay {
    pub period: Option<u32>,
    pub clock_seconds: Option<i64>,
    /// "HomeTeam" | "VisitingTeam"
    pub team: Option<String>,
    #[serde(rename = "Type")]
    pub play_type: Option<String>,
    pub narrative: Option<String>,
    /// Often null on substitution plays.
    pub score: Option<FeedScore>,
    pub player: Option<FeedPlayer>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FeedScore {
    #[serde(alias = "HomeTeam")]
    pub home: Option<i32>,
    #[serde(alias = "VisitingTeam")]
    pub visiting: Option<i32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FeedPlayer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub uniform_number: Option<serde_json::Value>,
}

impl FeedScore {
    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            home: self.home.unwrap_or(0),
            visiting: self.visiting.unwrap_or(0),
        }
    }
}

impl FeedPlayer {
    fn to_player(&self) -> Player {
        let first = self.first_name.as_deref().unwrap_or("");
        let last = self.last_name.as_deref().unwrap_or("");
        let number = match &self.uniform_number {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => s!(),
        };
        Player::new(number, normalize_ws(&format!("{first} {last}")))
    }
}

impl FeedPlay {
    pub fn side(&self) -> Option<Side> {
        match self.team.as_deref() {
            Some(HOME_SIDE) => Some(Side::Home),
            Some(VISITING_SIDE) => Some(Side::Visiting),
            _ => None,
        }
    }

    pub fn play_type(&self) -> &str {
        self.play_type.as_deref().unwrap_or("")
    }

    pub fn narrative(&self) -> &str {
        self.narrative.as_deref().unwrap_or("")
    }
}

impl GameDoc {
    pub fn home_name(&self) -> &str {
        &self.game.home_team.name
    }

    pub fn visiting_name(&self) -> &str {
        &self.game.visiting_team.name
    }

    /// Side of `team`, decided once per game by name. A team that is not the
    /// home team is taken to be the visitor.
    pub fn side_of(&self, team: &str) -> Side {
        if self.home_name() == team { Side::Home } else { Side::Visiting }
    }

    fn team_name_for(&self, play: &FeedPlay) -> String {
        match play.side() {
            Some(Side::Home) => s!(self.home_name()),
            Some(Side::Visiting) => s!(self.visiting_name()),
            None => play.team.clone().unwrap_or_default(),
        }
    }

    /// Feed order preserved.
    pub fn play_records(&self, source_id: &str, game_id: &str) -> Vec<PlayRecord> {
        self.plays
            .iter()
            .map(|p| PlayRecord {
                source_id: s!(source_id),
                game_id: s!(game_id),
                team: self.team_name_for(p),
                side: p.side(),
                period: p.period.unwrap_or(0),
                clock_seconds: p.clock_seconds.unwrap_or(0),
                play_type: s!(p.play_type()),
                narrative: s!(p.narrative()),
                score: p.score.map(|s| s.snapshot()),
                player: p.player.as_ref().map(FeedPlayer::to_player),
            })
            .collect()
    }
}

/// A parsed game document plus where it came from.
#[derive(Clone, Debug)]
pub struct LoadedGame {
    pub path: PathBuf,
    /// Season directory name, e.g. "2024-25".
    pub source_id: String,
    /// File stem, e.g. "18730".
    pub game_id: String,
    pub doc: GameDoc,
}

impl LoadedGame {
    pub fn play_records(&self) -> Vec<PlayRecord> {
        self.doc.play_records(&self.source_id, &self.game_id)
    }
}

/// (source_id, game_id) from `<season>/<game>.json`.
pub fn game_ids(path: &Path) -> (String, String) {
    let source_id = path
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let game_id = path
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    (source_id, game_id)
}

/// Game files of a season directory, sorted by file name.
pub fn list_game_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(PipelineError::MissingInput(dir.to_path_buf()));
    }
    let io_err = |source| PipelineError::Io { path: dir.to_path_buf(), source };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if !path.is_file() { continue; }
        if path.extension().and_then(|s| s.to_str()) != Some(GAME_EXT) { continue; }
        files.push(path);
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

pub fn parse_game(text: &str) -> serde_json::Result<GameDoc> {
    serde_json::from_str(text)
}

pub fn load_game(path: &Path) -> Result<LoadedGame> {
    let text = fs::read_to_string(path)
        .map_err(|source| PipelineError::Io { path: path.to_path_buf(), source })?;
    let doc = parse_game(&text)
        .map_err(|source| PipelineError::Json { path: path.to_path_buf(), source })?;
    let (source_id, game_id) = game_ids(path);
    Ok(LoadedGame { path: path.to_path_buf(), source_id, game_id, doc })
}

/* ---------------- plays.csv ---------------- */

/// One row of plays.csv. Everything optional: the flattening stage writes
/// blanks (and pandas floats like "45.0") freely.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct PlaysCsvRow {
    source_id: Option<String>,
    file_id: Option<String>,
    period: Option<String>,
    time_remaining: Option<String>,
    team: Option<String>,
    play_type: Option<String>,
    narrative: Option<String>,
    player_name: Option<String>,
    player_number: Option<String>,
    home_team_score: Option<String>,
    visiting_team_score: Option<String>,
}

/// "12", "12.0", " 12 " → 12. Blank or junk → None.
fn lenient_int(cell: &Option<String>) -> Option<i64> {
    let t = cell.as_deref()?.trim();
    if t.is_empty() { return None; }
    t.parse::<i64>().ok().or_else(|| t.parse::<f64>().ok().map(|f| f as i64))
}

impl PlaysCsvRow {
    fn into_record(self) -> PlayRecord {
        let score = match (lenient_int(&self.home_team_score), lenient_int(&self.visiting_team_score)) {
            (None, None) => None,
            (h, v) => Some(ScoreSnapshot {
                home: h.unwrap_or(0) as i32,
                visiting: v.unwrap_or(0) as i32,
            }),
        };
        let player = self.player_name.as_ref().filter(|n| !is_blank(n)).map(|name| {
            let number = lenient_int(&self.player_number)
                .map(|n| n.to_string())
                .unwrap_or_default();
            Player::new(number, name.trim())
        });

        PlayRecord {
            period: lenient_int(&self.period).unwrap_or(0).max(0) as u32,
            clock_seconds: lenient_int(&self.time_remaining).unwrap_or(0),
            source_id: self.source_id.unwrap_or_default(),
            game_id: self.file_id.unwrap_or_default().trim().to_string(),
            team: self.team.unwrap_or_default(),
            side: None,
            play_type: self.play_type.unwrap_or_default(),
            narrative: self.narrative.unwrap_or_default(),
            score,
            player,
        }
    }
}

/// Load plays.csv in file order. Rows without a file id are duplicates left
/// behind by the flattening stage and are dropped here.
pub fn load_plays_csv(path: &Path) -> Result<Vec<PlayRecord>> {
    let rows: Vec<PlaysCsvRow> = read_records(path)?;
    let total = rows.len();
    let plays: Vec<PlayRecord> = rows
        .into_iter()
        .filter(|r| r.file_id.as_deref().is_some_and(|id| !is_blank(id)))
        .map(PlaysCsvRow::into_record)
        .collect();
    if plays.len() < total {
        logd!("plays.csv: skipped {} row(s) without file_id", total - plays.len());
    }
    Ok(plays)
}

/* ---------------- Event CSVs ---------------- */

pub fn load_assists_csv(path: &Path) -> Result<Vec<AssistEvent>> {
    read_records(path)
}

pub fn load_substitutions_csv(path: &Path) -> Result<Vec<SubstitutionEvent>> {
    read_records(path)
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.is_file() {
        return Err(PipelineError::MissingInput(path.to_path_buf()));
    }
    let csv_err = |source| PipelineError::Csv { path: path.to_path_buf(), source };
    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(csv_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME: &str = r#"{
        "Game": { "HomeTeam": { "Name": "Maryland" }, "VisitingTeam": { "Name": "Ohio State" } },
        "Plays": [
            { "Period": 1, "ClockSeconds": 590, "Team": "HomeTeam", "Type": "SUBS",
              "Narrative": "02 A OUT; 06 C IN", "Score": null },
            { "Period": 1, "ClockSeconds": 560, "Team": "VisitingTeam", "Type": "GOOD",
              "Action": "LAYUP", "Narrative": "x", "Score": { "HomeTeam": 0, "VisitingTeam": 2 },
              "Player": { "FirstName": "Jo", "LastName": "Smith", "UniformNumber": "11" } },
            { "Period": 1, "ClockSeconds": 540, "Team": "HomeTeam", "Type": "GOOD",
              "Narrative": "y", "Score": { "Home": 3, "Visiting": 2 } }
        ]
    }"#;

    #[test]
    fn parses_game_document() {
        let doc = parse_game(GAME).unwrap();
        assert_eq!(doc.home_name(), "Maryland");
        assert_eq!(doc.visiting_name(), "Ohio State");
        assert_eq!(doc.plays.len(), 3);
        assert_eq!(doc.plays[0].side(), Some(Side::Home));
        assert!(doc.plays[0].score.is_none());
    }

    #[test]
    fn both_score_key_spellings() {
        let doc = parse_game(GAME).unwrap();
        let s1 = doc.plays[1].score.unwrap().snapshot();
        let s2 = doc.plays[2].score.unwrap().snapshot();
        assert_eq!((s1.home, s1.visiting), (0, 2));
        assert_eq!((s2.home, s2.visiting), (3, 2));
    }

    #[test]
    fn side_of_team_defaults_to_visiting() {
        let doc = parse_game(GAME).unwrap();
        assert_eq!(doc.side_of("Maryland"), Side::Home);
        assert_eq!(doc.side_of("Ohio State"), Side::Visiting);
        assert_eq!(doc.side_of("Nobody"), Side::Visiting);
    }

    #[test]
    fn play_records_resolve_team_names() {
        let doc = parse_game(GAME).unwrap();
        let recs = doc.play_records("2024-25", "18730");
        assert_eq!(recs[0].team, "Maryland");
        assert_eq!(recs[1].team, "Ohio State");
        assert_eq!(recs[1].player, Some(Player::new("11", "Jo Smith")));
        assert_eq!(recs[0].game_id, "18730");
        assert_eq!(recs[0].clock_seconds, 590);
    }

    #[test]
    fn missing_keys_are_malformed() {
        assert!(parse_game(r#"{ "Plays": [] }"#).is_err());
        assert!(parse_game(r#"{ "Game": { "HomeTeam": { "Name": "A" } }, "Plays": [] }"#).is_err());
        assert!(parse_game("not json").is_err());
    }

    #[test]
    fn ids_from_path() {
        let (s, g) = game_ids(Path::new("data/2024-25/18730.json"));
        assert_eq!((s.as_str(), g.as_str()), ("2024-25", "18730"));
    }

    #[test]
    fn lenient_numbers() {
        assert_eq!(lenient_int(&Some(s!("45.0"))), Some(45));
        assert_eq!(lenient_int(&Some(s!(" 7 "))), Some(7));
        assert_eq!(lenient_int(&Some(s!(""))), None);
        assert_eq!(lenient_int(&None), None);
    }
}
