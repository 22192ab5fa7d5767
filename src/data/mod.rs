//! IPL Insights Data Layer
//!
//! Loads the match and delivery tables and prepares them for querying:
//!
//! - **types**: Raw CSV records and normalized rows
//! - **season**: Season text → four-digit year
//! - **franchise**: Historical franchise names → canonical names and active years
//! - **loader**: CSV reading, header validation, row error collection
//! - **dataset**: The normalized, joined, read-only tables
//! - **cache**: Load-once snapshot, reloaded when the input files change
//!
//! # Load Path
//!
//! ```text
//! matches.csv ─┐
//!              ├→ deserialize → season parse → franchise rename → season join → Dataset
//! deliveries.csv┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use ipl_insights::data::{DataSource, DatasetLoader};
//!
//! let loader = DatasetLoader::default();
//! let dataset = loader.load(&DataSource::new("matches.csv", "deliveries.csv"))?;
//! println!("{}", dataset.report);
//! # Ok::<(), ipl_insights::data::DataError>(())
//! ```

pub mod cache;
pub mod dataset;
pub mod error;
pub mod franchise;
pub mod loader;
pub mod season;
pub mod types;

pub use cache::DatasetCache;
pub use dataset::{Dataset, LoadReport};
pub use error::{DataError, DataResult};
pub use franchise::{FranchiseEntry, FranchiseTable, YearSpan};
pub use loader::{DataSource, DatasetLoader};
pub use season::{normalize_season, FIRST_SEASON};
pub use types::{
    Delivery, DeliveryRecord, Match, MatchRecord, CREDITED_DISMISSALS, NO_RESULT,
};
