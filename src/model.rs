// src/model.rs
//
// Domain records shared by the extract and analysis layers.
//
// - PlayRecord: one play as the feed delivered it (input, immutable).
// - AssistEvent / SubstitutionEvent: typed events derived from narratives.
//   Both are flat so they round-trip through assists.csv / substitutions.csv.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Jersey number + display name. Either may be blank on a partial narrative.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Player {
    pub number: String,
    pub name: String,
}

impl Player {
    pub fn new(number: impl Into<String>, name: impl Into<String>) -> Self {
        Self { number: number.into(), name: name.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.number.is_empty() && self.name.is_empty()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.number, self.name)
    }
}

/// Which side of the box score a play belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Visiting,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreSnapshot {
    pub home: i32,
    pub visiting: i32,
}

impl ScoreSnapshot {
    /// (ours, theirs) from the point of view of `side`.
    pub fn for_side(&self, side: Side) -> (i32, i32) {
        match side {
            Side::Home => (self.home, self.visiting),
            Side::Visiting => (self.visiting, self.home),
        }
    }
}

/// One play, normalized from either the game JSON or plays.csv.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayRecord {
    pub source_id: String,
    pub game_id: String,
    /// Resolved team name (not the "HomeTeam"/"VisitingTeam" reference).
    pub team: String,
    /// Known when the play came from a game document.
    pub side: Option<Side>,
    pub period: u32,
    pub clock_seconds: i64,
    pub play_type: String,
    pub narrative: String,
    pub score: Option<ScoreSnapshot>,
    pub player: Option<Player>,
}

/// Shot vocabulary of the assist grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotType {
    #[serde(rename = "LAYUP")]
    Layup,
    #[serde(rename = "JUMPER")]
    Jumper,
    #[serde(rename = "DUNK")]
    Dunk,
    #[serde(rename = "3PTR")]
    Three,
    #[serde(rename = "TIP IN")]
    TipIn,
    #[serde(rename = "OTHER")]
    Other,
}

impl ShotType {
    /// Canonical feed token.
    pub fn token(self) -> &'static str {
        match self {
            ShotType::Layup => "LAYUP",
            ShotType::Jumper => "JUMPER",
            ShotType::Dunk => "DUNK",
            ShotType::Three => "3PTR",
            ShotType::TipIn => "TIP IN",
            ShotType::Other => "OTHER",
        }
    }

    pub fn points(self) -> u8 {
        match self {
            ShotType::Three => 3,
            _ => 2,
        }
    }
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Shot-type columns of the assist network. Threes and tip-ins land in none.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotBucket {
    Layup,
    Jumper,
    Dunk,
}

impl ShotBucket {
    /// Substring match on the lowered shot text.
    pub fn classify(shot_text: &str) -> Option<Self> {
        let lower = shot_text.to_lowercase();
        if lower.contains("layup") {
            Some(ShotBucket::Layup)
        } else if lower.contains("jumper") {
            Some(ShotBucket::Jumper)
        } else if lower.contains("dunk") {
            Some(ShotBucket::Dunk)
        } else {
            None
        }
    }
}

/// Made shot credited with an assist. Columns of assists.csv.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssistEvent {
    pub source_id: String,
    pub file_id: String,
    pub period: u32,
    pub time_remaining: i64,
    pub assister_number: String,
    pub assister_name: String,
    pub assister_assist_count: u32,
    pub scorer_number: String,
    pub scorer_name: String,
    pub scorer_point_total: u32,
    pub shot_type: ShotType,
    pub points: u8,
    pub home_score: Option<i32>,
    pub visiting_score: Option<i32>,
    pub narrative: String,
}

impl AssistEvent {
    pub fn is_three(&self) -> bool {
        self.points == 3
    }
}

/// One OUT paired (by position) with one IN. Columns of substitutions.csv.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionEvent {
    pub source_id: String,
    pub file_id: String,
    pub period: u32,
    pub clock_seconds: i64,
    pub time_remaining: String,
    pub player_out_number: String,
    pub player_out_name: String,
    pub player_in_number: String,
    pub player_in_name: String,
    #[serde(alias = "maryland_score")]
    pub team_score: i32,
    pub opponent_score: i32,
    pub score_diff: i32,
    pub narrative: String,
}

impl SubstitutionEvent {
    pub fn player_out(&self) -> Player {
        Player::new(&self.player_out_number, &self.player_out_name)
    }
    pub fn player_in(&self) -> Player {
        Player::new(&self.player_in_number, &self.player_in_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_from_each_side() {
        let s = ScoreSnapshot { home: 40, visiting: 33 };
        assert_eq!(s.for_side(Side::Home), (40, 33));
        assert_eq!(s.for_side(Side::Visiting), (33, 40));
    }

    #[test]
    fn shot_points_and_tokens() {
        assert_eq!(ShotType::Three.points(), 3);
        assert_eq!(ShotType::TipIn.points(), 2);
        assert_eq!(ShotType::Layup.to_string(), "LAYUP");
    }

    #[test]
    fn bucket_is_substring_based_and_skips_threes() {
        assert_eq!(ShotBucket::classify("LAYUP"), Some(ShotBucket::Layup));
        assert_eq!(ShotBucket::classify("jumper"), Some(ShotBucket::Jumper));
        assert_eq!(ShotBucket::classify("DUNK"), Some(ShotBucket::Dunk));
        assert_eq!(ShotBucket::classify("3PTR"), None);
        assert_eq!(ShotBucket::classify("TIP IN"), None);
    }

    #[test]
    fn player_display() {
        assert_eq!(Player::new("02", "Kaylene Smikle").to_string(), "#02 Kaylene Smikle");
        assert!(Player::default().is_empty());
    }
}
