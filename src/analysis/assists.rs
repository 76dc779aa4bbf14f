// src/analysis/assists.rs
//
// Assist network, leaders and receivers. Players are keyed by name.

use rustc_hash::FxHashSet;
use serde::Serialize;

use super::{Grouped, ratio, round_to};
use crate::model::{AssistEvent, ShotBucket};

/// Count + two/three split shared by all three tables.
#[derive(Clone, Debug, Default)]
struct Split {
    count: u32,
    threes: u32,
    twos: u32,
    points: u32,
}

impl Split {
    fn add(&mut self, e: &AssistEvent) {
        self.count += 1;
        self.points += e.points as u32;
        if e.is_three() { self.threes += 1 } else { self.twos += 1 }
    }

    fn avg_points(&self) -> f64 {
        round_to(ratio(self.points as f64, self.count as f64), 2)
    }
}

/* ---------------- Network ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NetworkRow {
    pub assister: String,
    pub scorer: String,
    pub assists: u32,
    pub total_points: u32,
    pub avg_points_per_assist: f64,
    pub threes: u32,
    pub twos: u32,
    pub layups: u32,
    pub jumpers: u32,
    pub dunks: u32,
}

#[derive(Default)]
struct NetworkAcc {
    split: Split,
    layups: u32,
    jumpers: u32,
    dunks: u32,
}

/// (assister, scorer) pairs by assists descending.
pub fn assist_network(events: &[AssistEvent]) -> Vec<NetworkRow> {
    let mut g: Grouped<(String, String), NetworkAcc> = Grouped::new();
    for e in events {
        let acc = g.entry((e.assister_name.clone(), e.scorer_name.clone()));
        acc.split.add(e);
        // threes and tip-ins only count in the split
        match ShotBucket::classify(e.shot_type.token()) {
            Some(ShotBucket::Layup) => acc.layups += 1,
            Some(ShotBucket::Jumper) => acc.jumpers += 1,
            Some(ShotBucket::Dunk) => acc.dunks += 1,
            None => {}
        }
    }

    g.into_ranked_by(|a| a.split.count as u64)
        .into_iter()
        .map(|e| {
            let ((assister, scorer), a) = (e.key, e.acc);
            NetworkRow {
                assister,
                scorer,
                assists: a.split.count,
                total_points: a.split.points,
                avg_points_per_assist: a.split.avg_points(),
                threes: a.split.threes,
                twos: a.split.twos,
                layups: a.layups,
                jumpers: a.jumpers,
                dunks: a.dunks,
            }
        })
        .collect()
}

/* ---------------- Leaders / receivers ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LeaderRow {
    pub assister: String,
    pub total_assists: u32,
    pub unique_teammates: usize,
    pub threes_assisted: u32,
    pub twos_assisted: u32,
    pub points_created: u32,
    pub avg_points_per_assist: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReceiverRow {
    pub scorer: String,
    pub assists_received: u32,
    pub unique_assisters: usize,
    pub threes_assisted: u32,
    pub twos_assisted: u32,
    pub points_from_assists: u32,
    pub avg_points_per_assist: f64,
}

#[derive(Default)]
struct PlayerAcc {
    split: Split,
    partners: FxHashSet<String>,
}

fn by_player<'a>(
    events: &'a [AssistEvent],
    key: impl Fn(&'a AssistEvent) -> &'a str,
    partner: impl Fn(&'a AssistEvent) -> &'a str,
) -> Vec<(String, PlayerAcc)> {
    let mut g: Grouped<String, PlayerAcc> = Grouped::new();
    for e in events {
        let acc = g.entry(key(e).to_string());
        acc.split.add(e);
        acc.partners.insert(partner(e).to_string());
    }
    g.into_ranked_by(|a| a.split.count as u64)
        .into_iter()
        .map(|e| (e.key, e.acc))
        .collect()
}

pub fn assist_leaders(events: &[AssistEvent]) -> Vec<LeaderRow> {
    by_player(events, |e| e.assister_name.as_str(), |e| e.scorer_name.as_str())
        .into_iter()
        .map(|(assister, a)| LeaderRow {
            assister,
            total_assists: a.split.count,
            unique_teammates: a.partners.len(),
            threes_assisted: a.split.threes,
            twos_assisted: a.split.twos,
            points_created: a.split.points,
            avg_points_per_assist: a.split.avg_points(),
        })
        .collect()
}

pub fn assist_receivers(events: &[AssistEvent]) -> Vec<ReceiverRow> {
    by_player(events, |e| e.scorer_name.as_str(), |e| e.assister_name.as_str())
        .into_iter()
        .map(|(scorer, a)| ReceiverRow {
            scorer,
            assists_received: a.split.count,
            unique_assisters: a.partners.len(),
            threes_assisted: a.split.threes,
            twos_assisted: a.split.twos,
            points_from_assists: a.split.points,
            avg_points_per_assist: a.split.avg_points(),
        })
        .collect()
}

/// All three assist tables of one event stream.
#[derive(Clone, Debug, Default)]
pub struct AssistTables {
    pub network: Vec<NetworkRow>,
    pub leaders: Vec<LeaderRow>,
    pub receivers: Vec<ReceiverRow>,
}

pub fn analyze_assists(events: &[AssistEvent]) -> AssistTables {
    AssistTables {
        network: assist_network(events),
        leaders: assist_leaders(events),
        receivers: assist_receivers(events),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::ShotType;

    pub(crate) fn assist(assister: &str, scorer: &str, shot: ShotType) -> AssistEvent {
        AssistEvent {
            source_id: s!("2024-25"),
            file_id: s!("1"),
            period: 1,
            time_remaining: 300,
            assister_number: s!("02"),
            assister_name: s!(assister),
            assister_assist_count: 1,
            scorer_number: s!("24"),
            scorer_name: s!(scorer),
            scorer_point_total: 2,
            shot_type: shot,
            points: shot.points(),
            home_score: None,
            visiting_score: None,
            narrative: s!(),
        }
    }

    #[test]
    fn network_rate_and_shot_buckets() {
        let events = vec![
            assist("A", "B", ShotType::Layup),
            assist("A", "B", ShotType::Jumper),
            assist("A", "B", ShotType::Three),
            assist("C", "B", ShotType::TipIn),
        ];
        let net = assist_network(&events);
        assert_eq!(net.len(), 2);
        let ab = &net[0];
        assert_eq!((ab.assister.as_str(), ab.scorer.as_str()), ("A", "B"));
        assert_eq!((ab.assists, ab.total_points), (3, 7));
        assert_eq!(ab.avg_points_per_assist, 2.33);
        assert_eq!((ab.threes, ab.twos), (1, 2));
        assert_eq!((ab.layups, ab.jumpers, ab.dunks), (1, 1, 0));
        // tip-in: split only
        let cb = &net[1];
        assert_eq!((cb.twos, cb.layups, cb.jumpers, cb.dunks), (1, 0, 0, 0));
    }

    #[test]
    fn leaders_count_distinct_teammates() {
        let events = vec![
            assist("A", "B", ShotType::Layup),
            assist("C", "B", ShotType::Layup),
            assist("C", "D", ShotType::Three),
            assist("C", "B", ShotType::Dunk),
        ];
        let leaders = assist_leaders(&events);
        assert_eq!(leaders[0].assister, "C");
        assert_eq!(leaders[0].total_assists, 3);
        assert_eq!(leaders[0].unique_teammates, 2);
        assert_eq!(leaders[0].points_created, 7);
        assert_eq!(leaders[1].assister, "A");

        let receivers = assist_receivers(&events);
        assert_eq!(receivers[0].scorer, "B");
        assert_eq!(receivers[0].unique_assisters, 2);
        assert_eq!(receivers[0].assists_received, 3);
        assert_eq!(receivers[1].threes_assisted, 1);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let events = vec![
            assist("Z", "Y", ShotType::Layup),
            assist("A", "B", ShotType::Layup),
        ];
        let net = assist_network(&events);
        assert_eq!(net[0].assister, "Z");
        assert_eq!(net[1].assister, "A");
    }

    #[test]
    fn empty_input_empty_tables() {
        let t = analyze_assists(&[]);
        assert!(t.network.is_empty() && t.leaders.is_empty() && t.receivers.is_empty());
    }
}
