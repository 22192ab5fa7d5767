//! Directories
//!
//! Lists backing the selection inputs: players, teams and seasons.

use serde::Serialize;
use std::collections::HashMap;

use crate::data::{Dataset, YearSpan, FIRST_SEASON};

/// Sorted player names, optionally narrowed by a case-insensitive substring
pub fn players(data: &Dataset, filter: Option<&str>) -> Vec<String> {
    let needle = filter
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty());

    let all = data.players();
    match needle {
        Some(needle) => all
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect(),
        None => all,
    }
}

/// A canonical franchise as it appears in the match table
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TeamSummary {
    pub name: String,
    /// Seasons the franchise is recorded as active; empty means unrestricted
    pub active: Vec<YearSpan>,
    pub matches: usize,
    /// Whether the name is missing from the franchise table
    pub unmapped: bool,
}

/// Every team in the match table, sorted by name
pub fn teams(data: &Dataset) -> Vec<TeamSummary> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for m in &data.matches {
        *counts.entry(m.team1.as_str()).or_default() += 1;
        *counts.entry(m.team2.as_str()).or_default() += 1;
    }

    data.teams()
        .into_iter()
        .map(|name| TeamSummary {
            active: data.franchises.active_spans(&name).to_vec(),
            matches: counts.get(name.as_str()).copied().unwrap_or(0),
            unmapped: data.franchises.canonicalize(&name).is_none(),
            name,
        })
        .collect()
}

/// Season range on record
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeasonSummary {
    /// Lowest year accepted by squad lookups
    pub first: i32,
    pub latest: Option<i32>,
    /// Distinct seasons with at least one match
    pub seasons: Vec<i32>,
}

pub fn seasons(data: &Dataset) -> SeasonSummary {
    let mut seasons: Vec<i32> = data.matches.iter().filter_map(|m| m.season).collect();
    seasons.sort_unstable();
    seasons.dedup();

    SeasonSummary {
        first: FIRST_SEASON,
        latest: seasons.last().copied(),
        seasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{build, delivery_record, match_record};

    fn sample() -> Dataset {
        build(
            vec![
                match_record(1, "2009", "Deccan Chargers", "Mumbai Indians"),
                match_record(2, "2008", "Mumbai Indians", "Chennai Super Kings"),
                match_record(3, "2008", "Pune Panthers", "Mumbai Indians"),
            ],
            vec![
                delivery_record(1, "RG Sharma", "PP Ojha", 1),
                delivery_record(2, "ST Jayasuriya", "M Muralitharan", 1),
            ],
        )
    }

    #[test]
    fn test_player_filter() {
        let data = sample();
        assert_eq!(players(&data, None).len(), 4);
        assert_eq!(players(&data, Some("sharma")), vec!["RG Sharma"]);
        assert_eq!(
            players(&data, Some("  M ")),
            vec!["M Muralitharan", "RG Sharma"]
        );
        assert_eq!(players(&data, Some("")).len(), 4);
    }

    #[test]
    fn test_team_directory() {
        let data = sample();
        let teams = teams(&data);
        let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Chennai Super Kings",
                "Deccan Chargers (2008-2012)",
                "Mumbai Indians",
                "Pune Panthers"
            ]
        );

        let mi = &teams[2];
        assert_eq!(mi.matches, 3);
        assert!(mi.active.is_empty());

        let deccan = &teams[1];
        assert_eq!(deccan.active, vec![YearSpan::between(2008, 2012)]);
        assert!(!deccan.unmapped);
        assert!(teams[3].unmapped);
    }

    #[test]
    fn test_seasons() {
        let data = sample();
        let summary = seasons(&data);
        assert_eq!(summary.first, 2008);
        assert_eq!(summary.latest, Some(2009));
        assert_eq!(summary.seasons, vec![2008, 2009]);
    }
}
