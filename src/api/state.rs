//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::data::{Dataset, DatasetCache};

pub use crate::config::ApiConfig;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Dataset snapshot, reloaded when the input files change
    pub cache: Arc<DatasetCache>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(cache: Arc<DatasetCache>, config: ApiConfig) -> Self {
        Self {
            cache,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// State serving a dataset that is already in memory
    pub fn with_dataset(dataset: Dataset, config: ApiConfig) -> Self {
        Self::new(Arc::new(DatasetCache::fixed(dataset)), config)
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
