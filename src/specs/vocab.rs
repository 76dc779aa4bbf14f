// src/specs/vocab.rs
//! Fixed vocabulary of the play-by-play narratives.
//!
//! Every literal token the grammars match lives here; `assist.rs` and
//! `substitution.rs` build their patterns from this table.

use crate::model::ShotType;

pub const GOOD: &str = "GOOD";
pub const POINTS: &str = "Pt";
pub const ASSIST: &str = "Assist";
pub const ASSISTS: &str = "Asst";
pub const OUT: &str = "OUT";
pub const IN: &str = "IN";

/// Shot keywords in the order the feed uses them.
pub const SHOTS: &[(&str, ShotType)] = &[
    ("LAYUP", ShotType::Layup),
    ("3PTR", ShotType::Three),
    ("JUMPER", ShotType::Jumper),
    ("DUNK", ShotType::Dunk),
    ("TIP IN", ShotType::TipIn),
];

/// Case-insensitive keyword lookup; anything unknown is `Other`.
pub fn shot_from_token(token: &str) -> ShotType {
    let token = crate::core::sanitize::normalize_ws(token);
    SHOTS
        .iter()
        .find(|(kw, _)| kw.eq_ignore_ascii_case(&token))
        .map(|(_, shot)| *shot)
        .unwrap_or(ShotType::Other)
}

/// Regex alternation of the shot keywords (`LAYUP|3PTR|…`).
pub fn shot_alternation() -> String {
    SHOTS
        .iter()
        .map(|(kw, _)| regex::escape(kw))
        .collect::<Vec<_>>()
        .join("|")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Out,
    In,
}

impl Direction {
    /// Exact-case match; the feed always upper-cases these.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            OUT => Some(Direction::Out),
            IN => Some(Direction::In),
            _ => None,
        }
    }
}
