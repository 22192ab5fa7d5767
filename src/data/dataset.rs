//! Loaded, normalized dataset
//!
//! Built once from the raw CSV records and treated as read-only afterwards.
//! Every query in [`crate::query`] reads from a shared `Dataset`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use super::franchise::FranchiseTable;
use super::season::normalize_season;
use super::types::{Delivery, DeliveryRecord, Match, MatchRecord};

/// Maximum number of row-level error messages kept in a report
const MAX_REPORTED_ERRORS: usize = 100;

/// Summary of what happened while loading
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub matches: usize,
    pub deliveries: usize,
    /// Rows that could not be deserialized
    pub rows_failed: usize,
    /// Matches whose season had no year token
    pub invalid_seasons: usize,
    /// Matches dropped because their id was already seen
    pub duplicate_matches: usize,
    /// Deliveries whose match id has no match row
    pub dangling_deliveries: usize,
    /// Team names not present in the franchise table
    pub unmapped_teams: BTreeSet<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl LoadReport {
    pub(crate) fn record_error(&mut self, message: String) {
        self.rows_failed += 1;
        if self.errors.len() < MAX_REPORTED_ERRORS {
            self.errors.push(message);
        }
    }
}

impl std::fmt::Display for LoadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} matches, {} deliveries, {} failed rows, {} invalid seasons, {} dangling deliveries, {} unmapped teams",
            self.matches,
            self.deliveries,
            self.rows_failed,
            self.invalid_seasons,
            self.dangling_deliveries,
            self.unmapped_teams.len()
        )
    }
}

/// Normalized match and delivery tables
#[derive(Debug, Clone)]
pub struct Dataset {
    pub matches: Vec<Match>,
    pub deliveries: Vec<Delivery>,
    pub franchises: Arc<FranchiseTable>,
    pub report: LoadReport,
    pub loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Normalize raw records: parse seasons, rename franchises and join each
    /// delivery to its match's season.
    pub fn from_records(
        match_records: Vec<MatchRecord>,
        delivery_records: Vec<DeliveryRecord>,
        franchises: Arc<FranchiseTable>,
    ) -> Self {
        Self::build(match_records, delivery_records, franchises, LoadReport::default())
    }

    pub(crate) fn build(
        match_records: Vec<MatchRecord>,
        delivery_records: Vec<DeliveryRecord>,
        franchises: Arc<FranchiseTable>,
        mut report: LoadReport,
    ) -> Self {
        let mut unmapped = BTreeSet::new();
        let mut canonical = |name: String| -> String {
            match franchises.canonicalize(&name) {
                Some(mapped) => mapped.to_string(),
                None => {
                    unmapped.insert(name.clone());
                    name
                }
            }
        };

        let mut seasons: HashMap<u64, Option<i32>> = HashMap::with_capacity(match_records.len());
        let mut matches = Vec::with_capacity(match_records.len());

        for record in match_records {
            if seasons.contains_key(&record.id) {
                report.duplicate_matches += 1;
                report.record_error(format!("Duplicate match id {}", record.id));
                continue;
            }

            let season = match normalize_season(&record.season) {
                Ok(year) => Some(year),
                Err(e) => {
                    report.invalid_seasons += 1;
                    tracing::debug!("Match {}: {}", record.id, e);
                    None
                }
            };
            seasons.insert(record.id, season);

            matches.push(Match {
                id: record.id,
                season,
                team1: canonical(record.team1),
                team2: canonical(record.team2),
                winner: record.winner,
                player_of_match: record.player_of_match,
            });
        }

        let mut deliveries = Vec::with_capacity(delivery_records.len());
        for record in delivery_records {
            let season = match seasons.get(&record.match_id) {
                Some(season) => *season,
                None => {
                    report.dangling_deliveries += 1;
                    None
                }
            };

            deliveries.push(Delivery {
                match_id: record.match_id,
                season,
                over: record.over,
                ball: record.ball,
                batting_team: canonical(record.batting_team),
                bowling_team: canonical(record.bowling_team),
                batter: record.batter,
                non_striker: record.non_striker,
                bowler: record.bowler,
                batsman_runs: record.batsman_runs,
                total_runs: record.total_runs,
                is_wicket: record.is_wicket,
                dismissal_kind: record.dismissal_kind,
                player_dismissed: record.player_dismissed,
            });
        }

        report.matches = matches.len();
        report.deliveries = deliveries.len();
        report.unmapped_teams = unmapped;

        Self {
            matches,
            deliveries,
            franchises,
            report,
            loaded_at: Utc::now(),
        }
    }

    /// Latest season present in the match table
    pub fn max_season(&self) -> Option<i32> {
        self.matches.iter().filter_map(|m| m.season).max()
    }

    /// Earliest season present in the match table
    pub fn min_season(&self) -> Option<i32> {
        self.matches.iter().filter_map(|m| m.season).min()
    }

    /// Sorted distinct canonical team names from the match table
    pub fn teams(&self) -> Vec<String> {
        let teams: BTreeSet<&str> = self
            .matches
            .iter()
            .flat_map(|m| [m.team1.as_str(), m.team2.as_str()])
            .collect();
        teams.into_iter().map(str::to_string).collect()
    }

    /// Sorted distinct names of everyone who batted or bowled
    pub fn players(&self) -> Vec<String> {
        let players: BTreeSet<&str> = self
            .deliveries
            .iter()
            .flat_map(|d| [d.batter.as_str(), d.bowler.as_str()])
            .filter(|name| !name.is_empty())
            .collect();
        players.into_iter().map(str::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.deliveries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{delivery_record, match_record};

    fn dataset(matches: Vec<MatchRecord>, deliveries: Vec<DeliveryRecord>) -> Dataset {
        Dataset::from_records(matches, deliveries, Arc::new(FranchiseTable::builtin()))
    }

    #[test]
    fn test_delivery_inherits_match_season() {
        let data = dataset(
            vec![
                match_record(1, "2007/08", "Mumbai Indians", "Chennai Super Kings"),
                match_record(2, "09", "Mumbai Indians", "Rajasthan Royals"),
            ],
            vec![
                delivery_record(1, "A", "B", 4),
                delivery_record(2, "A", "B", 1),
            ],
        );

        assert_eq!(data.matches[0].season, Some(2008));
        assert_eq!(data.matches[1].season, Some(2009));
        for delivery in &data.deliveries {
            let parent = data.matches.iter().find(|m| m.id == delivery.match_id).unwrap();
            assert_eq!(delivery.season, parent.season);
        }
    }

    #[test]
    fn test_dangling_delivery_has_no_season() {
        let data = dataset(
            vec![match_record(1, "2008", "Mumbai Indians", "Chennai Super Kings")],
            vec![delivery_record(1, "A", "B", 4), delivery_record(99, "A", "B", 6)],
        );

        assert_eq!(data.deliveries[1].season, None);
        assert_eq!(data.report.dangling_deliveries, 1);
        assert_eq!(data.report.deliveries, 2);
    }

    #[test]
    fn test_invalid_season_is_kept_undefined() {
        let data = dataset(
            vec![match_record(1, "unknown", "Mumbai Indians", "Chennai Super Kings")],
            vec![delivery_record(1, "A", "B", 4)],
        );

        assert_eq!(data.matches.len(), 1);
        assert_eq!(data.matches[0].season, None);
        assert_eq!(data.deliveries[0].season, None);
        assert_eq!(data.report.invalid_seasons, 1);
        assert_eq!(data.report.dangling_deliveries, 0);
    }

    #[test]
    fn test_franchise_names_normalized() {
        let mut record = delivery_record(1, "A", "B", 4);
        record.batting_team = "Kings XI Punjab".to_string();
        record.bowling_team = "Delhi Daredevils".to_string();

        let data = dataset(
            vec![match_record(1, "2010", "Delhi Daredevils", "Kings XI Punjab")],
            vec![record],
        );

        assert_eq!(data.matches[0].team1, "Delhi Daredevils (2008-2018)");
        assert_eq!(data.matches[0].team2, "Kings XI Punjab (2008-2020)");
        assert_eq!(data.deliveries[0].batting_team, "Kings XI Punjab (2008-2020)");
        assert_eq!(data.deliveries[0].bowling_team, "Delhi Daredevils (2008-2018)");
        assert!(data.report.unmapped_teams.is_empty());
    }

    #[test]
    fn test_winner_left_as_recorded() {
        let mut record = match_record(1, "2008", "Delhi Daredevils", "Mumbai Indians");
        record.winner = Some("Delhi Daredevils".to_string());
        let data = dataset(vec![record], vec![]);
        assert_eq!(data.matches[0].winner.as_deref(), Some("Delhi Daredevils"));
    }

    #[test]
    fn test_unmapped_team_recorded() {
        let data = dataset(
            vec![match_record(1, "2008", "Pune Panthers", "Mumbai Indians")],
            vec![],
        );
        assert_eq!(data.matches[0].team1, "Pune Panthers");
        assert!(data.report.unmapped_teams.contains("Pune Panthers"));
    }

    #[test]
    fn test_duplicate_match_id_first_wins() {
        let data = dataset(
            vec![
                match_record(1, "2008", "Mumbai Indians", "Chennai Super Kings"),
                match_record(1, "2012", "Rajasthan Royals", "Chennai Super Kings"),
            ],
            vec![delivery_record(1, "A", "B", 1)],
        );
        assert_eq!(data.matches.len(), 1);
        assert_eq!(data.report.duplicate_matches, 1);
        assert_eq!(data.report.rows_failed, 1);
        assert_eq!(data.deliveries[0].season, Some(2008));
    }

    #[test]
    fn test_directories() {
        let data = dataset(
            vec![
                match_record(1, "2008", "Mumbai Indians", "Chennai Super Kings"),
                match_record(2, "2011", "Rajasthan Royals", "Mumbai Indians"),
            ],
            vec![delivery_record(1, "Zed", "Amy", 1), delivery_record(1, "Amy", "Bob", 1)],
        );

        assert_eq!(
            data.teams(),
            vec!["Chennai Super Kings", "Mumbai Indians", "Rajasthan Royals"]
        );
        assert_eq!(data.players(), vec!["Amy", "Bob", "Zed"]);
        assert_eq!(data.min_season(), Some(2008));
        assert_eq!(data.max_season(), Some(2011));
    }
}
