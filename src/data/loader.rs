//! CSV loader
//!
//! Reads the match and delivery tables, validates their headers, skips rows
//! that fail to deserialize, and hands the records to [`Dataset::build`].

use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::dataset::{Dataset, LoadReport};
use super::error::{DataError, DataResult};
use super::franchise::FranchiseTable;
use super::types::{DeliveryRecord, MatchRecord, DELIVERY_COLUMNS, MATCH_COLUMNS};

/// Locations of the two input tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    pub matches_path: PathBuf,
    pub deliveries_path: PathBuf,
}

impl DataSource {
    pub fn new(matches_path: impl Into<PathBuf>, deliveries_path: impl Into<PathBuf>) -> Self {
        Self {
            matches_path: matches_path.into(),
            deliveries_path: deliveries_path.into(),
        }
    }
}

/// Loads and normalizes the datasets
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    franchises: Arc<FranchiseTable>,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new(Arc::new(FranchiseTable::builtin()))
    }
}

impl DatasetLoader {
    pub fn new(franchises: Arc<FranchiseTable>) -> Self {
        Self { franchises }
    }

    /// Load both tables from disk
    pub fn load(&self, source: &DataSource) -> DataResult<Dataset> {
        tracing::info!(
            "Loading matches from {:?} and deliveries from {:?}",
            source.matches_path,
            source.deliveries_path
        );

        let matches = open(&source.matches_path)?;
        let deliveries = open(&source.deliveries_path)?;
        self.load_from_readers(matches, deliveries)
    }

    /// Load both tables from any readers (files, in-memory buffers)
    pub fn load_from_readers<M: Read, D: Read>(
        &self,
        matches: M,
        deliveries: D,
    ) -> DataResult<Dataset> {
        let mut report = LoadReport::default();

        let match_records: Vec<MatchRecord> =
            read_table(matches, "matches", MATCH_COLUMNS, &mut report)?;
        let delivery_records: Vec<DeliveryRecord> =
            read_table(deliveries, "deliveries", DELIVERY_COLUMNS, &mut report)?;

        let dataset = Dataset::build(
            match_records,
            delivery_records,
            Arc::clone(&self.franchises),
            report,
        );

        let report = &dataset.report;
        if report.rows_failed > 0 {
            tracing::warn!("Skipped {} malformed rows", report.rows_failed);
        }
        if report.invalid_seasons > 0 {
            tracing::warn!(
                "{} matches have no parseable season and are excluded from season views",
                report.invalid_seasons
            );
        }
        if report.dangling_deliveries > 0 {
            tracing::warn!(
                "{} deliveries reference unknown match ids",
                report.dangling_deliveries
            );
        }
        if !report.unmapped_teams.is_empty() {
            tracing::warn!(
                "Team names missing from the franchise table: {:?}",
                report.unmapped_teams
            );
        }
        tracing::info!("Dataset loaded: {}", report);

        Ok(dataset)
    }
}

fn open(path: &Path) -> DataResult<std::fs::File> {
    std::fs::File::open(path).map_err(|e| DataError::io(path, e))
}

/// Deserialize every row of a table, collecting row-level failures in the report
fn read_table<T, R>(
    reader: R,
    table: &'static str,
    required: &[&'static str],
    report: &mut LoadReport,
) -> DataResult<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(DataError::MissingColumn { table, column });
        }
    }

    let mut rows = Vec::new();
    for (line_num, result) in reader.deserialize::<T>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => report.record_error(format!("{} line {}: {}", table, line_num + 2, e)),
        }
    }

    Ok(rows)
}
