// src/specs/assist.rs
//! Assist grammar.
//!
//! ```text
//! {num} {scorer} {SHOT} GOOD ({pts} Pt); {num} {assister} Assist ({n} Asst)
//! ```
//!
//! Anchored at the start of the narrative, case-insensitive. Anything that
//! does not fit is simply "no assist" (most narratives are not assists).

use std::sync::LazyLock;

use regex::Regex;

use super::vocab::{self, ASSIST, ASSISTS, GOOD, POINTS};
use crate::model::{Player, ShotType};

static ASSIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    let shots = vocab::shot_alternation();
    let pattern = format!(
        r"(?i)^(?P<scorer_num>\d+)\s+(?P<scorer>[^;]+?)\s+(?P<shot>{shots})\s+{GOOD}\s+\((?P<pts>\d+)\s+{POINTS}\);\s+(?P<assister_num>\d+)\s+(?P<assister>[^;]+?)\s+{ASSIST}\s+\((?P<asst>\d+)\s+{ASSISTS}\)"
    );
    Regex::new(&pattern).expect("assist grammar is built from the fixed vocabulary")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssistMatch {
    pub scorer: Player,
    pub assister: Player,
    pub shot: ShotType,
    /// Shot keyword as written in the narrative.
    pub shot_text: String,
    /// Scorer's running point total, "(pts Pt)".
    pub scorer_point_total: u32,
    /// Assister's running assist count, "(n Asst)".
    pub assister_assist_count: u32,
    /// Value of the made shot, 2 or 3.
    pub points: u8,
}

/// Match one narrative. `None` when the text is not an assisted make, or when
/// it credits the scorer with their own assist.
pub fn parse(narrative: &str) -> Option<AssistMatch> {
    let caps = ASSIST_RE.captures(narrative)?;

    let scorer = Player::new(&caps["scorer_num"], caps["scorer"].trim());
    let assister = Player::new(&caps["assister_num"], caps["assister"].trim());
    if scorer == assister {
        logd!("assist: self-assist ignored in '{}'", narrative);
        return None;
    }

    let shot_text = caps["shot"].to_string();
    let shot = vocab::shot_from_token(&shot_text);

    Some(AssistMatch {
        scorer,
        assister,
        shot,
        shot_text,
        scorer_point_total: caps["pts"].parse().ok()?,
        assister_assist_count: caps["asst"].parse().ok()?,
        points: shot.points(),
    })
}
