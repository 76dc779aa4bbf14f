// src/analysis/mod.rs
//! Aggregation over flat event streams.
//!
//! Every table is a single pass into a [`Grouped`] map followed by a sort.
//! `Grouped` remembers the order in which keys first appeared, so a
//! descending sort on a count always breaks ties by first-seen index and the
//! output is reproducible for a given file order.
pub mod assists;
pub mod rotations;

use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::consts::NO_PLAYER;

/// Map from key to accumulator that keeps insertion order.
#[derive(Clone, Debug)]
pub struct Grouped<K, A> {
    index: FxHashMap<K, usize>,
    entries: Vec<Entry<K, A>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entry<K, A> {
    pub key: K,
    pub first_seen: usize,
    pub acc: A,
}

impl<K, A> Default for Grouped<K, A> {
    fn default() -> Self {
        Self { index: FxHashMap::default(), entries: Vec::new() }
    }
}

impl<K: Hash + Eq + Clone, A: Default> Grouped<K, A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulator for `key`, created with `A::default()` on first sight.
    pub fn entry(&mut self, key: K) -> &mut A {
        let idx = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.index.insert(key.clone(), i);
                self.entries.push(Entry { key, first_seen: i, acc: A::default() });
                i
            }
        };
        &mut self.entries[idx].acc
    }

    pub fn get(&self, key: &K) -> Option<&A> {
        self.index.get(key).map(|&i| &self.entries[i].acc)
    }
}

impl<K, A> Grouped<K, A> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<K, A>> {
        self.entries.iter()
    }

    /// Entries in first-seen order.
    pub fn into_entries(self) -> Vec<Entry<K, A>> {
        self.entries
    }

    /// Entries by `count` descending, ties by first-seen index.
    pub fn into_ranked_by<F>(self, count: F) -> Vec<Entry<K, A>>
    where
        F: Fn(&A) -> u64,
    {
        let mut v = self.entries;
        v.sort_by(|a, b| count(&b.acc).cmp(&count(&a.acc)).then(a.first_seen.cmp(&b.first_seen)));
        v
    }
}

/// Occurrence counter with a modal lookup.
#[derive(Clone, Debug)]
pub struct Tally<K> {
    counts: Grouped<K, u32>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self { counts: Grouped::default() }
    }
}

impl<K: Hash + Eq + Clone> Tally<K> {
    pub fn add(&mut self, key: K) {
        *self.counts.entry(key) += 1;
    }

    pub fn count(&self, key: &K) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Highest count; among equals the earliest key seen.
    pub fn modal(&self) -> Option<(&K, u32)> {
        let mut best: Option<(&K, u32)> = None;
        for e in self.counts.iter() {
            if best.is_none_or(|(_, n)| e.acc > n) {
                best = Some((&e.key, e.acc));
            }
        }
        best
    }
}

impl Tally<String> {
    /// Non-empty names only.
    pub fn add_name(&mut self, name: &str) {
        if !name.is_empty() {
            self.add(name.to_string());
        }
    }

    /// `(name, count)` or `("None", 0)` for an empty tally.
    pub fn modal_or_none(&self) -> (String, u32) {
        self.modal()
            .map(|(k, n)| (k.clone(), n))
            .unwrap_or_else(|| (NO_PLAYER.to_string(), 0))
    }
}

/// Distinct game ids.
pub type GameSet = FxHashSet<String>;

/// `num / den`, or 0 when there is nothing to divide by.
pub fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 { 0.0 } else { num / den }
}

/// Round to `places` decimals, exact halves to even.
pub fn round_to(x: f64, places: i32) -> f64 {
    let m = 10f64.powi(places);
    (x * m).round_ties_even() / m
}

/// Mean of integer samples; 0 for none.
pub fn mean<T: Copy + Into<f64>>(xs: &[T]) -> f64 {
    let sum: f64 = xs.iter().map(|&x| x.into()).sum();
    ratio(sum, xs.len() as f64)
}

/// Source id stamped on rotation tables: the season of the first event.
pub fn leading_source_id<'a, I: IntoIterator<Item = &'a str>>(ids: I) -> String {
    ids.into_iter().next().map(str::to_string).unwrap_or_default()
}
