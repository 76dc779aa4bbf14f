// src/config/consts.rs
use std::ops::RangeInclusive;

// Team of interest
pub const DEFAULT_TEAM: &str = "Maryland";

// Feed markers
pub const ASSIST_MARKER: &str = "Assist";
pub const SUBS_PLAY_TYPE: &str = "SUBS";
pub const HOME_SIDE: &str = "HomeTeam";
pub const VISITING_SIDE: &str = "VisitingTeam";

// Rotation analysis
pub const PERIOD_START_WINDOW: RangeInclusive<u32> = 570..=600; // last 30s before 10:00
pub const TIME_BUCKET_MINUTES: u32 = 2;
pub const RECIPROCAL_MIN_SWAPS: u32 = 30;
pub const NO_PLAYER: &str = "None";

// Inputs
pub const PLAYS_FILE: &str = "plays.csv";
pub const GAME_EXT: &str = "json";

// Outputs: assists
pub const ASSISTS_FILE: &str = "assists.csv";
pub const ASSIST_NETWORK_FILE: &str = "assist_network.csv";
pub const ASSIST_LEADERS_FILE: &str = "assist_leaders.csv";
pub const ASSIST_RECEIVERS_FILE: &str = "assist_receivers.csv";

// Outputs: rotations
pub const SUBSTITUTIONS_FILE: &str = "substitutions.csv";
pub const SUB_PAIRS_FILE: &str = "substitution_pairs.csv";
pub const PLAYER_SUB_FREQUENCY_FILE: &str = "player_sub_frequency.csv";
pub const TIMING_PATTERNS_FILE: &str = "rotation_timing_patterns.csv";
pub const SITUATIONAL_FILE: &str = "situational_substitutions.csv";
pub const MULTI_PLAYER_FILE: &str = "multi_player_substitutions.csv";
pub const PERIOD_TRANSITIONS_FILE: &str = "period_transition_subs.csv";
pub const ROTATION_REPORT_FILE: &str = "substitution_report.txt";
