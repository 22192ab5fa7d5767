//! Ranking helpers shared by the leaderboards
//!
//! Groups are accumulated in first-encounter order (`IndexMap`) and ranked
//! with a stable sort, so equal metrics keep the order in which their keys
//! first appeared in the input.

use indexmap::IndexMap;
use serde::Serialize;
use std::hash::Hash;

/// Round to two decimal places, halves to even
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// A metric value on a leaderboard
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(untagged)]
pub enum MetricValue {
    Count(u64),
    Rate(f64),
}

impl From<u64> for MetricValue {
    fn from(value: u64) -> Self {
        MetricValue::Count(value)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Rate(value)
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Count(n) => write!(f, "{}", n),
            MetricValue::Rate(r) => write!(f, "{:.2}", r),
        }
    }
}

/// One ranked row
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedEntry {
    /// 1-based position
    pub rank: usize,
    pub label: String,
    pub value: MetricValue,
}

/// Turn already-ordered `(label, value)` pairs into ranked entries
pub fn rank<L, V>(pairs: impl IntoIterator<Item = (L, V)>) -> Vec<RankedEntry>
where
    L: Into<String>,
    V: Into<MetricValue>,
{
    pairs
        .into_iter()
        .enumerate()
        .map(|(idx, (label, value))| RankedEntry {
            rank: idx + 1,
            label: label.into(),
            value: value.into(),
        })
        .collect()
}

/// Counter keyed in first-encounter order
#[derive(Debug, Clone)]
pub struct Tally<K: Hash + Eq> {
    counts: IndexMap<K, u64>,
}

impl<K: Hash + Eq> Default for Tally<K> {
    fn default() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq> Tally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K, amount: u64) {
        *self.counts.entry(key).or_insert(0) += amount;
    }

    pub fn increment(&mut self, key: K) {
        self.add(key, 1);
    }

    pub fn get(&self, key: &K) -> Option<u64> {
        self.counts.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate in first-encounter order
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.counts.iter().map(|(k, v)| (k, *v))
    }

    /// Highest totals first; ties keep encounter order
    pub fn top(self, limit: Option<usize>) -> Vec<(K, u64)> {
        let mut rows: Vec<(K, u64)> = self.counts.into_iter().collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        rows
    }
}

impl<K: Hash + Eq> FromIterator<K> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for key in iter {
            tally.increment(key);
        }
        tally
    }
}
