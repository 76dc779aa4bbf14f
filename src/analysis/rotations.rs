// src/analysis/rotations.rs
//
// Rotation tables over substitution events:
// - pairs / per-player frequency (keyed by number + name)
// - timing buckets, situational bands, period starts (keyed by context)
// - multi-player groups (keyed by the play they came from)
//
// Every table carries the season id of the first event in its leading column.

use std::fmt;

use serde::Serialize;

use super::{GameSet, Grouped, Tally, leading_source_id, mean, ratio, round_to};
use crate::config::consts::{PERIOD_START_WINDOW, TIME_BUCKET_MINUTES};
use crate::model::{Player, SubstitutionEvent};

fn source_id(events: &[SubstitutionEvent]) -> String {
    leading_source_id(events.iter().map(|e| e.source_id.as_str()))
}

/// Distinct games among `events`.
pub fn games_in(events: &[SubstitutionEvent]) -> usize {
    events.iter().map(|e| e.file_id.as_str()).collect::<rustc_hash::FxHashSet<_>>().len()
}

/// count / games / who went out and in. Shared by the context tables.
#[derive(Default)]
struct ContextAcc {
    count: u32,
    games: GameSet,
    outs: Tally<String>,
    ins: Tally<String>,
    periods: Vec<u32>,
}

impl ContextAcc {
    fn add(&mut self, e: &SubstitutionEvent) {
        self.count += 1;
        self.games.insert(e.file_id.clone());
        self.outs.add_name(&e.player_out_name);
        self.ins.add_name(&e.player_in_name);
        self.periods.push(e.period);
    }

    fn per_game(&self) -> f64 {
        round_to(ratio(self.count as f64, self.games.len() as f64), 2)
    }
}

/* ---------------- Pairs ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PairRow {
    pub source_id: String,
    pub player_out_number: String,
    pub player_out_name: String,
    pub player_in_number: String,
    pub player_in_name: String,
    pub times_occurred: u32,
    pub games: usize,
    pub avg_period: f64,
    pub avg_clock_seconds: f64,
}

#[derive(Default)]
struct PairAcc {
    count: u32,
    periods: Vec<u32>,
    clocks: Vec<i32>,
    games: GameSet,
}

/// (out, in) pairs by frequency. Events with either name blank are left out.
pub fn sub_pairs(events: &[SubstitutionEvent]) -> Vec<PairRow> {
    let mut g: Grouped<(Player, Player), PairAcc> = Grouped::new();
    for e in events {
        if e.player_out_name.is_empty() || e.player_in_name.is_empty() {
            continue;
        }
        let acc = g.entry((e.player_out(), e.player_in()));
        acc.count += 1;
        acc.periods.push(e.period);
        acc.clocks.push(e.clock_seconds as i32);
        acc.games.insert(e.file_id.clone());
    }

    let sid = source_id(events);
    g.into_ranked_by(|a| a.count as u64)
        .into_iter()
        .map(|e| {
            let ((out, inn), a) = (e.key, e.acc);
            PairRow {
                source_id: sid.clone(),
                player_out_number: out.number,
                player_out_name: out.name,
                player_in_number: inn.number,
                player_in_name: inn.name,
                times_occurred: a.count,
                games: a.games.len(),
                avg_period: round_to(mean(&a.periods), 1),
                avg_clock_seconds: round_to(mean(&a.clocks), 0),
            }
        })
        .collect()
}

/* ---------------- Player frequency ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrequencyRow {
    pub source_id: String,
    pub player_number: String,
    pub player_name: String,
    pub games_with_subs: usize,
    pub total_subs_in: u32,
    pub total_subs_out: u32,
    pub avg_subs_in_per_game: f64,
    pub avg_subs_out_per_game: f64,
}

#[derive(Default)]
struct FrequencyAcc {
    subs_in: u32,
    subs_out: u32,
    games: GameSet,
}

/// Per player, both roles merged; ranked by total involvement.
pub fn player_frequency(events: &[SubstitutionEvent]) -> Vec<FrequencyRow> {
    let mut g: Grouped<Player, FrequencyAcc> = Grouped::new();
    for e in events {
        if !e.player_out_name.is_empty() {
            let acc = g.entry(e.player_out());
            acc.subs_out += 1;
            acc.games.insert(e.file_id.clone());
        }
        if !e.player_in_name.is_empty() {
            let acc = g.entry(e.player_in());
            acc.subs_in += 1;
            acc.games.insert(e.file_id.clone());
        }
    }

    let sid = source_id(events);
    g.into_ranked_by(|a| (a.subs_in + a.subs_out) as u64)
        .into_iter()
        .map(|e| {
            let games = e.acc.games.len() as f64;
            FrequencyRow {
                source_id: sid.clone(),
                player_number: e.key.number,
                player_name: e.key.name,
                games_with_subs: e.acc.games.len(),
                total_subs_in: e.acc.subs_in,
                total_subs_out: e.acc.subs_out,
                avg_subs_in_per_game: round_to(ratio(e.acc.subs_in as f64, games), 2),
                avg_subs_out_per_game: round_to(ratio(e.acc.subs_out as f64, games), 2),
            }
        })
        .collect()
}

/* ---------------- Timing buckets ---------------- */

/// Clock bucket of `TIME_BUCKET_MINUTES` width, by minutes remaining.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeBucket {
    pub start_minute: u32,
}

impl TimeBucket {
    pub fn of(clock_seconds: i64) -> Self {
        let width = (TIME_BUCKET_MINUTES * 60) as i64;
        let n = clock_seconds.max(0) / width;
        Self { start_minute: n as u32 * TIME_BUCKET_MINUTES }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}min", self.start_minute, self.start_minute + TIME_BUCKET_MINUTES)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimingRow {
    pub source_id: String,
    pub period: u32,
    pub time_bucket: String,
    pub total_subs: u32,
    pub games: usize,
    pub avg_subs_per_game: f64,
    pub most_common_out: String,
    pub times_out: u32,
    pub most_common_in: String,
    pub times_in: u32,
}

/// (period, bucket) ascending, bucket compared numerically.
pub fn timing_patterns(events: &[SubstitutionEvent]) -> Vec<TimingRow> {
    let mut g: Grouped<(u32, TimeBucket), ContextAcc> = Grouped::new();
    for e in events {
        g.entry((e.period, TimeBucket::of(e.clock_seconds))).add(e);
    }

    let sid = source_id(events);
    let mut entries = g.into_entries();
    entries.sort_by_key(|e| e.key);
    entries
        .into_iter()
        .map(|e| {
            let (period, bucket) = e.key;
            let (out, times_out) = e.acc.outs.modal_or_none();
            let (inn, times_in) = e.acc.ins.modal_or_none();
            TimingRow {
                source_id: sid.clone(),
                period,
                time_bucket: bucket.to_string(),
                total_subs: e.acc.count,
                games: e.acc.games.len(),
                avg_subs_per_game: e.acc.per_game(),
                most_common_out: out,
                times_out,
                most_common_in: inn,
                times_in,
            }
        })
        .collect()
}

/* ---------------- Situational bands ---------------- */

/// Score-differential band, ours minus theirs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Situation {
    LeadingBig,
    LeadingMid,
    LeadingSmall,
    Tied,
    TrailingSmall,
    TrailingMid,
    TrailingBig,
}

impl Situation {
    /// Checked in this order; first match wins.
    pub const ALL: [Situation; 7] = [
        Situation::LeadingBig,
        Situation::LeadingMid,
        Situation::LeadingSmall,
        Situation::Tied,
        Situation::TrailingSmall,
        Situation::TrailingMid,
        Situation::TrailingBig,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Situation::LeadingBig => "Leading by 10+",
            Situation::LeadingMid => "Leading by 5-9",
            Situation::LeadingSmall => "Leading by 1-4",
            Situation::Tied => "Tied",
            Situation::TrailingSmall => "Trailing by 1-4",
            Situation::TrailingMid => "Trailing by 5-9",
            Situation::TrailingBig => "Trailing by 10+",
        }
    }

    pub fn contains(self, diff: i32) -> bool {
        match self {
            Situation::LeadingBig => diff >= 10,
            Situation::LeadingMid => (5..10).contains(&diff),
            Situation::LeadingSmall => (1..5).contains(&diff),
            Situation::Tied => diff == 0,
            Situation::TrailingSmall => (-4..0).contains(&diff),
            Situation::TrailingMid => (-9..-4).contains(&diff),
            Situation::TrailingBig => diff <= -10,
        }
    }

    pub fn of(diff: i32) -> Situation {
        Self::ALL
            .into_iter()
            .find(|s| s.contains(diff))
            .unwrap_or(Situation::TrailingBig)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SituationalRow {
    pub source_id: String,
    pub situation: String,
    pub total_subs: u32,
    pub games: usize,
    pub avg_subs_per_game: f64,
    pub avg_period: f64,
    pub most_common_out: String,
    pub times_out: u32,
    pub most_common_in: String,
    pub times_in: u32,
}

/// One row per band that occurred, in order of first occurrence.
pub fn situational_subs(events: &[SubstitutionEvent]) -> Vec<SituationalRow> {
    let mut g: Grouped<Situation, ContextAcc> = Grouped::new();
    for e in events {
        g.entry(Situation::of(e.score_diff)).add(e);
    }

    let sid = source_id(events);
    g.into_entries()
        .into_iter()
        .map(|e| {
            let (out, times_out) = e.acc.outs.modal_or_none();
            let (inn, times_in) = e.acc.ins.modal_or_none();
            SituationalRow {
                source_id: sid.clone(),
                situation: e.key.label().to_string(),
                total_subs: e.acc.count,
                games: e.acc.games.len(),
                avg_subs_per_game: e.acc.per_game(),
                avg_period: round_to(mean(&e.acc.periods), 1),
                most_common_out: out,
                times_out,
                most_common_in: inn,
                times_in,
            }
        })
        .collect()
}

/* ---------------- Multi-player groups ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MultiPlayerRow {
    pub source_id: String,
    pub file_id: String,
    pub period: u32,
    pub clock_seconds: i64,
    pub num_players: usize,
    pub players_out: String,
    pub players_in: String,
    pub score_diff: i32,
}

#[derive(Default)]
struct GroupAcc {
    outs: Vec<String>,
    ins: Vec<String>,
    score_diff: i32,
}

fn join_named(names: &[String]) -> String {
    names.iter().filter(|n| !n.is_empty()).map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Plays that swapped two or more players at once, largest first.
pub fn multi_player_subs(events: &[SubstitutionEvent]) -> Vec<MultiPlayerRow> {
    let mut g: Grouped<(String, u32, i64, String), GroupAcc> = Grouped::new();
    for e in events {
        let key = (e.file_id.clone(), e.period, e.clock_seconds, e.narrative.clone());
        let acc = g.entry(key);
        acc.outs.push(e.player_out_name.clone());
        acc.ins.push(e.player_in_name.clone());
        acc.score_diff = e.score_diff;
    }

    let sid = source_id(events);
    let mut rows: Vec<MultiPlayerRow> = g
        .into_entries()
        .into_iter()
        .map(|e| {
            let (file_id, period, clock_seconds, _) = e.key;
            MultiPlayerRow {
                source_id: sid.clone(),
                file_id,
                period,
                clock_seconds,
                num_players: e.acc.outs.iter().filter(|n| !n.is_empty()).count(),
                players_out: join_named(&e.acc.outs),
                players_in: join_named(&e.acc.ins),
                score_diff: e.acc.score_diff,
            }
        })
        .filter(|r| r.num_players >= 2)
        .collect();
    // stable: equal sizes keep play order
    rows.sort_by(|a, b| b.num_players.cmp(&a.num_players));
    rows
}

/* ---------------- Period starts ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PeriodStartRow {
    pub source_id: String,
    pub period: u32,
    pub total_subs: u32,
    pub games: usize,
    pub avg_subs_per_game: f64,
    pub most_common_out: String,
    pub times_out: u32,
    pub most_common_in: String,
    pub times_in: u32,
}

pub fn in_period_start_window(clock_seconds: i64) -> bool {
    u32::try_from(clock_seconds).is_ok_and(|c| PERIOD_START_WINDOW.contains(&c))
}

/// Substitutions made with 570..=600 seconds left, per period ascending.
pub fn period_start_subs(events: &[SubstitutionEvent]) -> Vec<PeriodStartRow> {
    let mut g: Grouped<u32, ContextAcc> = Grouped::new();
    for e in events.iter().filter(|e| in_period_start_window(e.clock_seconds)) {
        g.entry(e.period).add(e);
    }

    let sid = source_id(events);
    let mut entries = g.into_entries();
    entries.sort_by_key(|e| e.key);
    entries
        .into_iter()
        .map(|e| {
            let (out, times_out) = e.acc.outs.modal_or_none();
            let (inn, times_in) = e.acc.ins.modal_or_none();
            PeriodStartRow {
                source_id: sid.clone(),
                period: e.key,
                total_subs: e.acc.count,
                games: e.acc.games.len(),
                avg_subs_per_game: e.acc.per_game(),
                most_common_out: out,
                times_out,
                most_common_in: inn,
                times_in,
            }
        })
        .collect()
}

/// Every rotation table of one event stream.
#[derive(Clone, Debug, Default)]
pub struct RotationTables {
    pub pairs: Vec<PairRow>,
    pub frequency: Vec<FrequencyRow>,
    pub timing: Vec<TimingRow>,
    pub situational: Vec<SituationalRow>,
    pub multi_player: Vec<MultiPlayerRow>,
    pub period_starts: Vec<PeriodStartRow>,
}

pub fn analyze_rotations(events: &[SubstitutionEvent]) -> RotationTables {
    RotationTables {
        pairs: sub_pairs(events),
        frequency: player_frequency(events),
        timing: timing_patterns(events),
        situational: situational_subs(events),
        multi_player: multi_player_subs(events),
        period_starts: period_start_subs(events),
    }
}
