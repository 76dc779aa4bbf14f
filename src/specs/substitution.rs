// src/specs/substitution.rs
//! Substitution grammar.
//!
//! A SUBS narrative is a `;`-separated list of clauses, each
//! `{num} {name} OUT` or `{num} {name} IN`, in any order and any count:
//!
//! ```text
//! 02 Kaylene Smikle OUT; 14 Allie Kubek OUT; 06 Saylor Poffenbarger IN; 10 Mir McLean IN
//! ```
//!
//! Pairing is positional: the i-th OUT goes with the i-th IN. Nothing in the
//! narrative ties a specific OUT to a specific IN, so this is an
//! approximation and reports built on it inherit that. When the lists differ
//! in length the missing side is a blank `Player`; no clause is dropped.

use std::sync::LazyLock;

use regex::Regex;

use super::vocab::{Direction, IN, OUT};
use crate::core::sanitize::split_clauses;
use crate::model::Player;

static CLAUSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"^(?P<num>\d+)\s+(?P<name>.+?)\s+(?P<dir>{OUT}|{IN})$");
    Regex::new(&pattern).expect("clause grammar is built from the fixed vocabulary")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubClause {
    pub direction: Direction,
    pub player: Player,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubPair {
    pub player_out: Player,
    pub player_in: Player,
}

/// One clause, e.g. "02 Kaylene Smikle OUT". `None` for anything else.
pub fn parse_clause(clause: &str) -> Option<SubClause> {
    let caps = CLAUSE_RE.captures(clause.trim())?;
    let direction = Direction::from_token(&caps["dir"])?;
    Some(SubClause {
        direction,
        player: Player::new(&caps["num"], caps["name"].trim()),
    })
}

/// All recognised clauses in narrative order.
pub fn parse_clauses(narrative: &str) -> Vec<SubClause> {
    split_clauses(narrative)
        .filter_map(|part| {
            let clause = parse_clause(part);
            if clause.is_none() {
                logd!("subs: unrecognised clause '{}'", part);
            }
            clause
        })
        .collect()
}

/// Zip OUTs with INs by position; length = max(|OUT|, |IN|).
pub fn pair(clauses: Vec<SubClause>) -> Vec<SubPair> {
    let (outs, ins): (Vec<_>, Vec<_>) = clauses
        .into_iter()
        .partition(|c| c.direction == Direction::Out);

    let len = outs.len().max(ins.len());
    let mut outs = outs.into_iter().map(|c| c.player);
    let mut ins = ins.into_iter().map(|c| c.player);

    (0..len)
        .map(|_| SubPair {
            player_out: outs.next().unwrap_or_default(),
            player_in: ins.next().unwrap_or_default(),
        })
        .collect()
}

/// Narrative → positional OUT/IN pairs. Empty when nothing matched.
pub fn parse(narrative: &str) -> Vec<SubPair> {
    pair(parse_clauses(narrative))
}
