//! Franchise identity table
//!
//! Maps historical franchise display names to one canonical name per active
//! period, and records the seasons each canonical franchise took part in.
//! The table is plain data so it can be overridden from the config file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Inclusive range of seasons; an open `end` means "still active"
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearSpan {
    pub start: i32,
    #[serde(default)]
    pub end: Option<i32>,
}

impl YearSpan {
    pub const fn between(start: i32, end: i32) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub const fn since(start: i32) -> Self {
        Self { start, end: None }
    }

    pub const fn single(year: i32) -> Self {
        Self::between(year, year)
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.start && self.end.map_or(true, |end| year <= end)
    }
}

impl std::fmt::Display for YearSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.end {
            Some(end) if end == self.start => write!(f, "{}", self.start),
            Some(end) => write!(f, "{}-{}", self.start, end),
            None => write!(f, "{}-present", self.start),
        }
    }
}

/// One canonical franchise and the names it appeared under
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FranchiseEntry {
    pub canonical: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Seasons the franchise played; empty means no restriction
    #[serde(default)]
    pub active: Vec<YearSpan>,
}

impl FranchiseEntry {
    pub fn new(canonical: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            aliases: Vec::new(),
            active: Vec::new(),
        }
    }

    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.aliases.push(name.into());
        self
    }

    pub fn active(mut self, span: YearSpan) -> Self {
        self.active.push(span);
        self
    }
}

/// Lookup table from any known franchise name to its canonical entry
#[derive(Debug, Clone)]
pub struct FranchiseTable {
    entries: Vec<FranchiseEntry>,
    by_name: HashMap<String, usize>,
}

impl Default for FranchiseTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FranchiseTable {
    /// Build a table from entries. The canonical name of each entry is also
    /// registered as an alias of itself; the first entry claiming a name wins.
    pub fn new(entries: Vec<FranchiseEntry>) -> Self {
        let mut by_name: HashMap<String, usize> = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            for name in std::iter::once(&entry.canonical).chain(entry.aliases.iter()) {
                if let Some(existing) = by_name.get(name.as_str()) {
                    if *existing != idx {
                        tracing::warn!(
                            "Franchise name {:?} claimed by both {:?} and {:?}, keeping the first",
                            name,
                            entries[*existing].canonical,
                            entry.canonical
                        );
                    }
                    continue;
                }
                by_name.insert(name.clone(), idx);
            }
        }
        Self { entries, by_name }
    }

    /// The league's franchise history
    pub fn builtin() -> Self {
        Self::new(vec![
            FranchiseEntry::new("Chennai Super Kings")
                .active(YearSpan::between(2008, 2015))
                .active(YearSpan::since(2018)),
            FranchiseEntry::new("Rajasthan Royals")
                .active(YearSpan::between(2008, 2015))
                .active(YearSpan::since(2018)),
            FranchiseEntry::new("Delhi Daredevils (2008-2018)")
                .alias("Delhi Daredevils")
                .active(YearSpan::between(2008, 2018)),
            FranchiseEntry::new("Delhi Capitals (2019-Present)")
                .alias("Delhi Capitals")
                .active(YearSpan::since(2019)),
            FranchiseEntry::new("Kings XI Punjab (2008-2020)")
                .alias("Kings XI Punjab")
                .active(YearSpan::between(2008, 2020)),
            FranchiseEntry::new("Punjab Kings (2021-Present)")
                .alias("Punjab Kings")
                .active(YearSpan::since(2021)),
            FranchiseEntry::new("Deccan Chargers (2008-2012)")
                .alias("Deccan Chargers")
                .active(YearSpan::between(2008, 2012)),
            FranchiseEntry::new("Kochi Tuskers Kerala (2011)")
                .alias("Kochi Tuskers Kerala")
                .active(YearSpan::single(2011)),
            FranchiseEntry::new("Pune Warriors India (2011-2013)")
                .alias("Pune Warriors India")
                .alias("Pune Warriors")
                .active(YearSpan::between(2011, 2013)),
            FranchiseEntry::new("Gujarat Lions (2016-2017)")
                .alias("Gujarat Lions")
                .active(YearSpan::between(2016, 2017)),
            FranchiseEntry::new("Rising Pune Supergiants (2016)")
                .alias("Rising Pune Supergiants")
                .active(YearSpan::single(2016)),
            FranchiseEntry::new("Rising Pune Supergiant (2017)")
                .alias("Rising Pune Supergiant")
                .active(YearSpan::single(2017)),
            FranchiseEntry::new("Royal Challengers Bengaluru").alias("Royal Challengers Bangalore"),
            FranchiseEntry::new("Mumbai Indians"),
            FranchiseEntry::new("Kolkata Knight Riders"),
            FranchiseEntry::new("Sunrisers Hyderabad"),
            FranchiseEntry::new("Gujarat Titans"),
            FranchiseEntry::new("Lucknow Super Giants"),
        ])
    }

    /// Canonical name for a known franchise name, `None` if unmapped
    pub fn canonicalize(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .map(|idx| self.entries[*idx].canonical.as_str())
    }

    /// Canonical name, passing unknown names through unchanged
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.canonicalize(name).unwrap_or(name)
    }

    pub fn entry(&self, canonical: &str) -> Option<&FranchiseEntry> {
        self.entries.iter().find(|e| e.canonical == canonical)
    }

    /// Active spans of a canonical franchise (empty when unrestricted or unknown)
    pub fn active_spans(&self, canonical: &str) -> &[YearSpan] {
        self.entry(canonical)
            .map(|e| e.active.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the franchise took part in the given season.
    /// Franchises without recorded spans are assumed to have played.
    pub fn played_in(&self, canonical: &str, year: i32) -> bool {
        let spans = self.active_spans(canonical);
        spans.is_empty() || spans.iter().any(|span| span.contains(year))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
