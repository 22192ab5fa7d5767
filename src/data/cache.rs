//! Dataset cache
//!
//! Keeps the loaded [`Dataset`] behind an `Arc` and reloads it only when the
//! modification time of either input file changes. Readers that already hold
//! a snapshot keep using it until they drop it.

use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::RwLock;

use super::dataset::Dataset;
use super::error::{DataError, DataResult};
use super::loader::{DataSource, DatasetLoader};

/// Modification times of the two input files at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    matches: SystemTime,
    deliveries: SystemTime,
}

impl Fingerprint {
    fn of(source: &DataSource) -> DataResult<Self> {
        Ok(Self {
            matches: modified(&source.matches_path)?,
            deliveries: modified(&source.deliveries_path)?,
        })
    }
}

fn modified(path: &std::path::Path) -> DataResult<SystemTime> {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|e| DataError::io(path, e))
}

struct Snapshot {
    dataset: Arc<Dataset>,
    fingerprint: Option<Fingerprint>,
}

/// Shared, lazily loaded dataset
pub struct DatasetCache {
    source: Option<DataSource>,
    loader: DatasetLoader,
    current: RwLock<Option<Snapshot>>,
}

impl DatasetCache {
    /// Cache backed by files on disk; nothing is read until the first snapshot
    pub fn new(source: DataSource, loader: DatasetLoader) -> Self {
        Self {
            source: Some(source),
            loader,
            current: RwLock::new(None),
        }
    }

    /// Cache holding an already built dataset that never reloads
    pub fn fixed(dataset: Dataset) -> Self {
        Self {
            source: None,
            loader: DatasetLoader::new(Arc::clone(&dataset.franchises)),
            current: RwLock::new(Some(Snapshot {
                dataset: Arc::new(dataset),
                fingerprint: None,
            })),
        }
    }

    /// Current dataset, loading or reloading it if the input files changed
    pub async fn snapshot(&self) -> DataResult<Arc<Dataset>> {
        let Some(source) = &self.source else {
            return self
                .current()
                .await
                .ok_or_else(|| DataError::Task("no dataset loaded".to_string()));
        };

        let fingerprint = match Fingerprint::of(source) {
            Ok(fp) => fp,
            Err(e) => {
                // Keep serving the last good snapshot if the files disappear
                if let Some(existing) = self.current().await {
                    tracing::warn!("Cannot stat input files, serving cached dataset: {}", e);
                    return Ok(existing);
                }
                return Err(e);
            }
        };

        {
            let guard = self.current.read().await;
            if let Some(snapshot) = guard.as_ref() {
                if snapshot.fingerprint == Some(fingerprint) {
                    tracing::debug!("Dataset cache hit");
                    return Ok(Arc::clone(&snapshot.dataset));
                }
            }
        }

        let mut guard = self.current.write().await;
        // Another task may have reloaded while we waited for the write lock
        if let Some(snapshot) = guard.as_ref() {
            if snapshot.fingerprint == Some(fingerprint) {
                return Ok(Arc::clone(&snapshot.dataset));
            }
            tracing::info!("Input files changed, reloading dataset");
        }

        let loader = self.loader.clone();
        let source = source.clone();
        let dataset = tokio::task::spawn_blocking(move || loader.load(&source))
            .await
            .map_err(|e| DataError::Task(e.to_string()))??;

        let dataset = Arc::new(dataset);
        *guard = Some(Snapshot {
            dataset: Arc::clone(&dataset),
            fingerprint: Some(fingerprint),
        });

        Ok(dataset)
    }

    /// Last loaded dataset without checking the files
    pub async fn current(&self) -> Option<Arc<Dataset>> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|snapshot| Arc::clone(&snapshot.dataset))
    }

    pub async fn is_loaded(&self) -> bool {
        self.current.read().await.is_some()
    }

    pub fn source(&self) -> Option<&DataSource> {
        self.source.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::Duration;

    const MATCHES: &str = "id,season,team1,team2,winner,player_of_match
1,2008,Mumbai Indians,Chennai Super Kings,Mumbai Indians,A";

    const DELIVERIES: &str = "match_id,over,ball,batting_team,bowling_team,batter,non_striker,bowler,batsman_runs,total_runs,is_wicket,dismissal_kind,player_dismissed
1,0,1,Mumbai Indians,Chennai Super Kings,A,C,B,6,6,0,NA,NA";

    fn write(path: &Path, content: &str) {
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn test_snapshot_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let source = DataSource::new(dir.path().join("m.csv"), dir.path().join("d.csv"));
        write(&source.matches_path, MATCHES);
        write(&source.deliveries_path, DELIVERIES);

        let cache = DatasetCache::new(source, DatasetLoader::default());
        assert!(!cache.is_loaded().await);

        let first = cache.snapshot().await.unwrap();
        let second = cache.snapshot().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_loaded().await);
    }

    #[tokio::test]
    async fn test_reload_after_file_change() {
        let dir = tempfile::tempdir().unwrap();
        let source = DataSource::new(dir.path().join("m.csv"), dir.path().join("d.csv"));
        write(&source.matches_path, MATCHES);
        write(&source.deliveries_path, DELIVERIES);

        let cache = DatasetCache::new(source.clone(), DatasetLoader::default());
        let first = cache.snapshot().await.unwrap();
        assert_eq!(first.deliveries.len(), 1);

        write(
            &source.deliveries_path,
            &format!(
                "{}\n1,0,2,Mumbai Indians,Chennai Super Kings,A,C,B,4,4,0,NA,NA",
                DELIVERIES
            ),
        );
        // Make the change visible even on filesystems with coarse timestamps
        let later = SystemTime::now() + Duration::from_secs(5);
        std::fs::File::options()
            .write(true)
            .open(&source.deliveries_path)
            .unwrap()
            .set_modified(later)
            .unwrap();

        let second = cache.snapshot().await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.deliveries.len(), 2);
        // The old snapshot is untouched
        assert_eq!(first.deliveries.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_files_error_before_first_load() {
        let dir = tempfile::tempdir().unwrap();
        let source = DataSource::new(dir.path().join("m.csv"), dir.path().join("d.csv"));
        let cache = DatasetCache::new(source, DatasetLoader::default());
        assert!(matches!(cache.snapshot().await, Err(DataError::Io { .. })));
    }

    #[tokio::test]
    async fn test_fixed_cache() {
        let loader = DatasetLoader::default();
        let dataset = loader
            .load_from_readers(MATCHES.as_bytes(), DELIVERIES.as_bytes())
            .unwrap();
        let cache = DatasetCache::fixed(dataset);
        let snapshot = cache.snapshot().await.unwrap();
        assert_eq!(snapshot.matches.len(), 1);
        assert!(cache.source().is_none());
    }
}
