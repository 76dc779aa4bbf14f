// src/extract/season.rs
use std::path::{Path, PathBuf};

use crate::model::{AssistEvent, SubstitutionEvent};
use crate::progress::Progress;
use crate::store::{self, LoadedGame};
use crate::{PipelineError, Result};

use super::{extract_assists, substitutions::extract_game_substitutions};

/// A game that was skipped; the rest of the season still counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameFailure {
    pub file: PathBuf,
    pub reason: String,
}

/// Events of every readable game of one season directory, in file order.
#[derive(Debug, Default)]
pub struct SeasonEvents {
    pub source_id: String,
    pub games_read: usize,
    pub assists: Vec<AssistEvent>,
    pub substitutions: Vec<SubstitutionEvent>,
    pub failures: Vec<GameFailure>,
}

/// Walk `<dir>/*.json` in sorted order and extract `team`'s events.
///
/// A missing or empty directory is fatal. A game that fails to read or parse
/// is recorded in `failures` and the batch goes on.
pub fn extract_season(
    dir: &Path,
    team: &str,
    progress: &mut dyn Progress,
) -> Result<SeasonEvents> {
    let files = store::list_game_files(dir)?;
    if files.is_empty() {
        return Err(PipelineError::NoGames(dir.to_path_buf()));
    }

    let mut season = SeasonEvents {
        source_id: dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        ..Default::default()
    };

    progress.begin(files.len());
    progress.log(&format!("Reading {} game(s) from {}", files.len(), dir.display()));

    for path in &files {
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match store::load_game(path) {
            Ok(game) => {
                absorb(&mut season, &game, team);
                progress.item_done(&game.game_id);
            }
            Err(e) => {
                let reason = e.to_string();
                progress.item_failed(&label, &reason);
                season.failures.push(GameFailure { file: path.clone(), reason });
            }
        }
    }

    progress.finish();
    logf!(
        "{}: {} game(s), {} assist(s), {} substitution(s), {} failure(s)",
        season.source_id,
        season.games_read,
        season.assists.len(),
        season.substitutions.len(),
        season.failures.len()
    );
    Ok(season)
}

fn absorb(season: &mut SeasonEvents, game: &LoadedGame, team: &str) {
    let plays = game.play_records();
    let assists = extract_assists(&plays, team);
    let subs = extract_game_substitutions(game, team);
    logd!(
        "game {}: {} play(s), {} assist(s), {} substitution(s)",
        game.game_id,
        plays.len(),
        assists.len(),
        subs.len()
    );
    season.games_read += 1;
    season.assists.extend(assists);
    season.substitutions.extend(subs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullProgress;
    use std::fs;

    const GOOD_GAME: &str = r#"{
        "Game": { "HomeTeam": { "Name": "Maryland" }, "VisitingTeam": { "Name": "Iowa" } },
        "Plays": [
            { "Period": 1, "ClockSeconds": 590, "Team": "HomeTeam", "Type": "SUBS", "Narrative": "02 A OUT; 06 C IN" },
            { "Period": 1, "ClockSeconds": 500, "Team": "HomeTeam", "Type": "GOOD",
              "Narrative": "24 B LAYUP GOOD (2 Pt); 02 A Assist (1 Asst)", "Score": { "HomeTeam": 2, "VisitingTeam": 0 } }
        ]
    }"#;

    #[test]
    fn malformed_game_is_isolated() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("2024-25");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("1.json"), GOOD_GAME).unwrap();
        fs::write(dir.join("2.json"), "{ broken").unwrap();
        fs::write(dir.join("3.json"), GOOD_GAME).unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let season = extract_season(&dir, "Maryland", &mut NullProgress).unwrap();
        assert_eq!(season.source_id, "2024-25");
        assert_eq!(season.games_read, 2);
        assert_eq!(season.substitutions.len(), 2);
        assert_eq!(season.assists.len(), 2);
        assert_eq!(season.failures.len(), 1);
        assert!(season.failures[0].file.ends_with("2.json"));
        assert_eq!(season.substitutions[0].file_id, "1");
        assert_eq!(season.substitutions[1].file_id, "3");
    }

    #[test]
    fn empty_or_missing_dir_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            extract_season(tmp.path(), "Maryland", &mut NullProgress),
            Err(PipelineError::NoGames(_))
        ));
        assert!(matches!(
            extract_season(&tmp.path().join("nope"), "Maryland", &mut NullProgress),
            Err(PipelineError::MissingInput(_))
        ));
    }
}
