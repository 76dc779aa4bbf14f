// src/report.rs
//
// Human-readable text built from the aggregated tables. Fixed-width columns,
// no computation beyond picking rows.

use rustc_hash::FxHashSet;

use crate::analysis::assists::AssistTables;
use crate::analysis::rotations::{PairRow, RotationTables, games_in};
use crate::analysis::ratio;
use crate::config::consts::RECIPROCAL_MIN_SWAPS;
use crate::core::clock::short_clock;
use crate::model::{AssistEvent, SubstitutionEvent};

const WIDTH: usize = 80;

fn rule(c: char) -> String {
    c.to_string().repeat(WIDTH)
}

fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(s!(title));
    lines.push(rule('-'));
}

/* ---------------- Rotation report ---------------- */

/// Two players who keep replacing each other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reciprocal {
    pub first: String,
    pub second: String,
    pub total: u32,
}

fn pair_label(number: &str, name: &str) -> String {
    format!("#{number} {name}")
}

/// Pairs whose swaps in both directions add up to the threshold, each
/// unordered pair once, biggest first.
pub fn reciprocal_pairs(pairs: &[PairRow], min_total: u32, limit: usize) -> Vec<Reciprocal> {
    let mut seen: FxHashSet<(String, String)> = FxHashSet::default();
    let mut found = Vec::new();
    for p in pairs {
        let Some(rev) = pairs.iter().find(|r| {
            r.player_out_number == p.player_in_number
                && r.player_out_name == p.player_in_name
                && r.player_in_number == p.player_out_number
                && r.player_in_name == p.player_out_name
        }) else {
            continue;
        };
        let total = p.times_occurred + rev.times_occurred;
        if total < min_total {
            continue;
        }
        let first = pair_label(&p.player_out_number, &p.player_out_name);
        let second = pair_label(&p.player_in_number, &p.player_in_name);
        let key = if first <= second { (first.clone(), second.clone()) } else { (second.clone(), first.clone()) };
        if seen.insert(key) {
            found.push(Reciprocal { first, second, total });
        }
    }
    found.sort_by(|a, b| b.total.cmp(&a.total));
    found.truncate(limit);
    found
}

pub fn rotation_report(team: &str, events: &[SubstitutionEvent], t: &RotationTables) -> String {
    let mut lines = Vec::new();
    lines.push(rule('='));
    lines.push(format!("{} - SUBSTITUTION PATTERN REPORT", team.to_uppercase()));
    if let Some(first) = events.first() {
        lines.push(format!("Season: {}", first.source_id));
    }
    lines.push(rule('='));
    lines.push(s!());

    if events.is_empty() {
        lines.push(s!("No substitutions found."));
        lines.push(s!());
        lines.push(rule('='));
        return lines.join("\n");
    }

    // Overview
    let games = games_in(events);
    section(&mut lines, "OVERVIEW");
    lines.push(format!("Total Games Analyzed: {games}"));
    lines.push(format!("Total Substitutions: {}", events.len()));
    lines.push(format!(
        "Average Substitutions per Game: {:.1}",
        ratio(events.len() as f64, games as f64)
    ));
    lines.push(s!());

    // Player frequency
    section(&mut lines, "PLAYER SUBSTITUTION FREQUENCY (Top 10)");
    lines.push(format!("{:<25} {:<8} {:<10} {:<10} {:<10}", "Player", "Games", "Subs In", "Subs Out", "Avg/Game"));
    lines.push(rule('-'));
    for p in t.frequency.iter().take(10) {
        lines.push(format!(
            "{:<25} {:<8} {:<10} {:<10} {:<10.2}",
            pair_label(&p.player_number, &p.player_name),
            p.games_with_subs,
            p.total_subs_in,
            p.total_subs_out,
            p.avg_subs_in_per_game
        ));
    }
    lines.push(s!());

    // Pairs
    section(&mut lines, "MOST COMMON SUBSTITUTION PAIRS (Top 15)");
    lines.push(format!("{:<25} {:<25} {:<8} {:<8}", "OUT", "IN", "Count", "Games"));
    lines.push(rule('-'));
    for p in t.pairs.iter().take(15) {
        lines.push(format!(
            "{:<25} {:<25} {:<8} {:<8}",
            pair_label(&p.player_out_number, &p.player_out_name),
            pair_label(&p.player_in_number, &p.player_in_name),
            p.times_occurred,
            p.games
        ));
    }
    lines.push(s!());

    // Multi-player groups
    section(&mut lines, "MULTI-PLAYER SUBSTITUTIONS");
    let of_size = |n: usize| t.multi_player.iter().filter(|m| m.num_players == n).count();
    for n in (2..=5).rev() {
        lines.push(format!("{n}-Player Substitutions: {}", of_size(n)));
    }
    lines.push(s!());
    if of_size(5) > 0 {
        lines.push(s!("Notable 5-Player Substitutions:"));
        for m in t.multi_player.iter().take(5).filter(|m| m.num_players == 5) {
            lines.push(format!("  Game {}, Q{}, {}", m.file_id, m.period, short_clock(m.clock_seconds)));
            lines.push(format!("    OUT: {}", m.players_out));
            lines.push(format!("    IN:  {}", m.players_in));
        }
        lines.push(s!());
    }

    // Timing
    section(&mut lines, "SUBSTITUTION TIMING BY QUARTER");
    for period in 1..=4u32 {
        let mut rows: Vec<_> = t.timing.iter().filter(|r| r.period == period).collect();
        if rows.is_empty() {
            continue;
        }
        rows.sort_by(|a, b| b.total_subs.cmp(&a.total_subs));
        lines.push(format!("\nQuarter {period}:"));
        lines.push(s!("  Peak substitution times:"));
        for r in rows.iter().take(3) {
            lines.push(format!(
                "    {} remaining: {} subs across {} games",
                r.time_bucket, r.total_subs, r.games
            ));
        }
    }
    lines.push(s!());

    // Period starts
    section(&mut lines, "PERIOD TRANSITION SUBSTITUTIONS");
    lines.push(format!("{:<10} {:<12} {:<8} {:<10}", "Period", "Total Subs", "Games", "Avg/Game"));
    lines.push(rule('-'));
    for p in &t.period_starts {
        lines.push(format!(
            "{:<10} {:<12} {:<8} {:<10}",
            format!("Start of Q{}", p.period),
            p.total_subs,
            p.games,
            p.avg_subs_per_game
        ));
    }
    lines.push(s!());

    // Insights
    section(&mut lines, "KEY INSIGHTS");
    if let Some(top) = t.frequency.first() {
        lines.push(format!("• Most active substitute: {}", pair_label(&top.player_number, &top.player_name)));
        lines.push(format!(
            "  ({} total subs in {} games)",
            top.total_subs_in + top.total_subs_out,
            top.games_with_subs
        ));
    }
    if let Some(top) = t.pairs.first() {
        lines.push(format!(
            "• Most common substitution: {} → {}",
            pair_label(&top.player_out_number, &top.player_out_name),
            pair_label(&top.player_in_number, &top.player_in_name)
        ));
        lines.push(format!("  (Occurred {} times across {} games)", top.times_occurred, top.games));
    }
    let recips = reciprocal_pairs(&t.pairs, RECIPROCAL_MIN_SWAPS, 5);
    if !recips.is_empty() {
        lines.push(s!("• Players who frequently rotate for each other:"));
        for r in recips {
            lines.push(format!("  {} ↔ {} ({} total swaps)", r.first, r.second, r.total));
        }
    }

    lines.push(s!());
    lines.push(rule('='));
    lines.join("\n")
}

/* ---------------- Assist summary ---------------- */

pub fn assist_summary(events: &[AssistEvent], t: &AssistTables) -> String {
    let mut lines = Vec::new();
    lines.push(rule('='));
    lines.push(s!("ASSIST NETWORK SUMMARY"));
    lines.push(rule('='));

    if events.is_empty() {
        lines.push(s!("No assists found."));
        lines.push(rule('='));
        return lines.join("\n");
    }

    lines.push(format!("Total assists: {}", events.len()));
    lines.push(format!("Unique combinations: {}", t.network.len()));
    lines.push(format!("Unique assisters: {}", t.leaders.len()));
    lines.push(format!("Unique scorers: {}", t.receivers.len()));

    lines.push(s!("\nTop 5 Assist Leaders:"));
    for (i, p) in t.leaders.iter().take(5).enumerate() {
        lines.push(format!(
            "  {}. {}: {} assists ({} points created)",
            i + 1,
            p.assister,
            p.total_assists,
            p.points_created
        ));
    }

    lines.push(s!("\nTop 10 Assist Combinations:"));
    for (i, c) in t.network.iter().take(10).enumerate() {
        lines.push(format!(
            "  {}. {} → {}: {} assists ({} points)",
            i + 1,
            c.assister,
            c.scorer,
            c.assists,
            c.total_points
        ));
    }

    lines.push(s!());
    lines.push(rule('='));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::assists::analyze_assists;
    use crate::analysis::assists::tests::assist;
    use crate::analysis::rotations::analyze_rotations;
    use crate::analysis::rotations::tests::sub;
    use crate::model::ShotType;

    fn pair(out: (&str, &str), inn: (&str, &str), n: u32) -> PairRow {
        PairRow {
            source_id: s!("2024-25"),
            player_out_number: s!(out.0),
            player_out_name: s!(out.1),
            player_in_number: s!(inn.0),
            player_in_name: s!(inn.1),
            times_occurred: n,
            games: 1,
            avg_period: 1.0,
            avg_clock_seconds: 0.0,
        }
    }

    #[test]
    fn reciprocals_are_deduped_and_thresholded() {
        let a = ("02", "A");
        let b = ("14", "B");
        let c = ("06", "C");
        let pairs = vec![pair(a, b, 20), pair(b, a, 12), pair(a, c, 10), pair(c, a, 5)];
        let r = reciprocal_pairs(&pairs, 30, 5);
        assert_eq!(r, vec![Reciprocal { first: s!("#02 A"), second: s!("#14 B"), total: 32 }]);
        assert_eq!(reciprocal_pairs(&pairs, 10, 5).len(), 2);
        assert_eq!(reciprocal_pairs(&pairs, 10, 1).len(), 1);
    }

    #[test]
    fn rotation_report_sections() {
        let events = vec![
            sub("1", 1, 590, "A", "B", 0),
            sub("1", 2, 300, "B", "A", 4),
            sub("2", 1, 580, "A", "B", -2),
        ];
        let t = analyze_rotations(&events);
        let text = rotation_report("Maryland", &events, &t);
        assert!(text.contains("MARYLAND - SUBSTITUTION PATTERN REPORT"));
        assert!(text.contains("Season: 2024-25"));
        assert!(text.contains("Total Games Analyzed: 2"));
        assert!(text.contains("Average Substitutions per Game: 1.5"));
        assert!(text.contains("Quarter 1:"));
        assert!(text.contains("Start of Q1"));
        assert!(text.contains("Most common substitution: #65 A → #66 B"));
    }

    #[test]
    fn empty_inputs_say_so() {
        let t = analyze_rotations(&[]);
        assert!(rotation_report("Maryland", &[], &t).contains("No substitutions found."));
        let a = analyze_assists(&[]);
        assert!(assist_summary(&[], &a).contains("No assists found."));
    }

    #[test]
    fn assist_summary_lists_leaders() {
        let events = vec![assist("A", "B", ShotType::Layup), assist("A", "C", ShotType::Three)];
        let t = analyze_assists(&events);
        let text = assist_summary(&events, &t);
        assert!(text.contains("Total assists: 2"));
        assert!(text.contains("1. A: 2 assists (5 points created)"));
        assert!(text.contains("A → C: 1 assists (3 points)"));
    }
}
