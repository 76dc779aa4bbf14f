// src/extract/assists.rs
use crate::config::consts::ASSIST_MARKER;
use crate::model::{AssistEvent, PlayRecord};
use crate::specs::{self, Narrative};

/// Assist events of `team`, in play order. Zero or one per play.
pub fn extract_assists(plays: &[PlayRecord], team: &str) -> Vec<AssistEvent> {
    plays
        .iter()
        .filter(|p| p.team == team && p.narrative.contains(ASSIST_MARKER))
        .filter_map(|p| match specs::classify(&p.play_type, &p.narrative) {
            Narrative::Assist(m) => Some(to_event(p, m)),
            _ => {
                logd!("no assist in game {} P{} {}: {:?}", p.game_id, p.period, p.clock_seconds, p.narrative);
                None
            }
        })
        .collect()
}

fn to_event(play: &PlayRecord, m: specs::AssistMatch) -> AssistEvent {
    AssistEvent {
        source_id: play.source_id.clone(),
        file_id: play.game_id.clone(),
        period: play.period,
        time_remaining: play.clock_seconds,
        assister_number: m.assister.number,
        assister_name: m.assister.name,
        assister_assist_count: m.assister_assist_count,
        scorer_number: m.scorer.number,
        scorer_name: m.scorer.name,
        scorer_point_total: m.scorer_point_total,
        shot_type: m.shot,
        points: m.points,
        home_score: play.score.map(|s| s.home),
        visiting_score: play.score.map(|s| s.visiting),
        narrative: play.narrative.clone(),
    }
}
