// src/extract/substitutions.rs
use crate::core::clock::format_clock;
use crate::model::{PlayRecord, Side, SubstitutionEvent};
use crate::specs::{self, Narrative, SubPair};
use crate::store::LoadedGame;

/// Substitutions of `team` in one game. The side is fixed once from the
/// game header, then every SUBS play on that side is read.
pub fn extract_game_substitutions(game: &LoadedGame, team: &str) -> Vec<SubstitutionEvent> {
    let side = game.doc.side_of(team);
    logd!("game {}: {team} is {side:?}", game.game_id);
    extract_substitutions(&game.play_records(), side)
}

/// One event per OUT/IN pair, in play order then narrative order.
pub fn extract_substitutions(plays: &[PlayRecord], side: Side) -> Vec<SubstitutionEvent> {
    let mut out = Vec::new();
    for play in plays.iter().filter(|p| p.side == Some(side)) {
        let Narrative::Substitution(pairs) = specs::classify(&play.play_type, &play.narrative) else {
            continue;
        };
        // score is often null on SUBS plays
        let (ours, theirs) = play.score.unwrap_or_default().for_side(side);
        out.extend(pairs.into_iter().map(|pair| to_event(play, pair, ours, theirs)));
    }
    out
}

fn to_event(play: &PlayRecord, pair: SubPair, ours: i32, theirs: i32) -> SubstitutionEvent {
    SubstitutionEvent {
        source_id: play.source_id.clone(),
        file_id: play.game_id.clone(),
        period: play.period,
        clock_seconds: play.clock_seconds,
        time_remaining: format_clock(play.clock_seconds),
        player_out_number: pair.player_out.number,
        player_out_name: pair.player_out.name,
        player_in_number: pair.player_in.number,
        player_in_name: pair.player_in.name,
        team_score: ours,
        opponent_score: theirs,
        score_diff: ours - theirs,
        narrative: play.narrative.clone(),
    }
}
