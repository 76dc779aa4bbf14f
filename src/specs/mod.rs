// src/specs/mod.rs
//! # Narrative “specs” module
//!
//! This module hosts the **grammar of the play-by-play narratives**: the
//! free-text line the feed attaches to every play. Each spec focuses on one
//! kind of narrative and encodes *which tokens carry the ground truth* and
//! *how to pull them out robustly*.
//!
//! ## What lives here
//! - **Pure text matching**: `&str` in, typed match out. No I/O.
//! - **The fixed vocabulary** (`vocab`): `GOOD`, `Pt`, `Assist`, `Asst`,
//!   `OUT`, `IN` and the shot keywords. Patterns are built from that table.
//! - **Tolerant extraction**: a narrative that does not fit is "no event",
//!   never an error.
//!
//! ## What does **not** live here
//! - **Play filtering** (team of interest, play type, "Assist" marker) – that
//!   is `extract`.
//! - **Game context** (score snapshot, period, clock) – also `extract`.
//! - **Grouping/aggregation** – `analysis`.
//!
//! ## Typical call chain
//! ```text
//! extract::{assists,substitutions} → specs::classify(play_type, narrative)
//!                                  ↘  Narrative::{Assist, Substitution, NoMatch}
//! ```
//!
//! ## Current specs
//! - `assist` – made shot + assist credit, one event or none.
//! - `substitution` – multi-clause OUT/IN lists, positional pairing.
pub mod assist;
pub mod substitution;
pub mod vocab;

use crate::config::consts::{ASSIST_MARKER, SUBS_PLAY_TYPE};

pub use assist::AssistMatch;
pub use substitution::SubPair;

/// Tagged result of reading one narrative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Narrative {
    NoMatch,
    Assist(AssistMatch),
    /// Positional OUT/IN pairs, never empty.
    Substitution(Vec<SubPair>),
}

/// Pick the grammar by play type / marker and apply it.
pub fn classify(play_type: &str, narrative: &str) -> Narrative {
    if play_type == SUBS_PLAY_TYPE {
        let pairs = substitution::parse(narrative);
        return if pairs.is_empty() { Narrative::NoMatch } else { Narrative::Substitution(pairs) };
    }
    if narrative.contains(ASSIST_MARKER) {
        if let Some(m) = assist::parse(narrative) {
            return Narrative::Assist(m);
        }
    }
    Narrative::NoMatch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_subs_by_play_type() {
        match classify("SUBS", "02 A OUT; 06 C IN") {
            Narrative::Substitution(pairs) => assert_eq!(pairs.len(), 1),
            other => panic!("expected substitution, got {other:?}"),
        }
    }

    #[test]
    fn assist_requires_literal_marker() {
        let text = "24 A B LAYUP GOOD (2 Pt); 02 C D Assist (1 Asst)";
        assert!(matches!(classify("GOOD", text), Narrative::Assist(_)));
        // grammar is case-insensitive, the marker filter is not
        let lower = "24 A B LAYUP GOOD (2 Pt); 02 C D assist (1 Asst)";
        assert_eq!(classify("GOOD", lower), Narrative::NoMatch);
    }

    #[test]
    fn subs_play_with_no_clauses_is_no_match() {
        assert_eq!(classify("SUBS", "Team timeout"), Narrative::NoMatch);
        assert_eq!(classify("TIMEOUT", "02 A OUT; 06 C IN"), Narrative::NoMatch);
    }
}
