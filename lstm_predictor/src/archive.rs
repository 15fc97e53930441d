//! Keyed storage of model pools
//!
//! The validator reads the candidate pool of an iteration and overwrites the
//! same key with the selected pool, so after a completed run the key holds
//! the winners that later merge points read back as history.

use crate::error::{ForecastError, Result};
use crate::models::{HorizonKind, ModelPool, SeasonalPool, TrendPool};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Storage key of one pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArchiveKey {
    pub iteration: u32,
    pub horizon: HorizonKind,
}

impl ArchiveKey {
    pub fn seasonal(iteration: u32) -> Self {
        Self {
            iteration,
            horizon: HorizonKind::Seasonal,
        }
    }

    pub fn trend(iteration: u32) -> Self {
        Self {
            iteration,
            horizon: HorizonKind::Trend,
        }
    }
}

/// Keyed read/write access to archived model pools
pub trait ModelArchive {
    /// Read the pool stored under `key`
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::ArchiveNotFound`] when nothing is stored
    /// under the key, or an I/O / decoding error from the backend.
    fn get(&self, key: &ArchiveKey) -> Result<ModelPool>;

    /// Store `pool` under `key`, replacing any previous pool
    fn put(&mut self, key: &ArchiveKey, pool: &ModelPool) -> Result<()>;
}

/// Archive held in memory, used by tests and short-lived runs
#[derive(Debug, Clone, Default)]
pub struct InMemoryArchive {
    pools: HashMap<ArchiveKey, ModelPool>,
}

impl InMemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &ArchiveKey) -> bool {
        self.pools.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

impl ModelArchive for InMemoryArchive {
    fn get(&self, key: &ArchiveKey) -> Result<ModelPool> {
        self.pools
            .get(key)
            .cloned()
            .ok_or(ForecastError::ArchiveNotFound {
                iteration: key.iteration,
                horizon: key.horizon,
            })
    }

    fn put(&mut self, key: &ArchiveKey, pool: &ModelPool) -> Result<()> {
        if pool.horizon() != key.horizon {
            return Err(ForecastError::ArchiveShapeMismatch(format!(
                "Cannot store a {} pool under a {} key",
                pool.horizon(),
                key.horizon
            )));
        }
        self.pools.insert(*key, pool.clone());
        Ok(())
    }
}

/// Archive with one JSON file per key in a directory
///
/// Files are named `<iteration>seasonality.json` and `<iteration>trend.json`.
#[derive(Debug, Clone)]
pub struct JsonFileArchive {
    dir: PathBuf,
    pretty: bool,
}

impl JsonFileArchive {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            pretty: false,
        }
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`
    pub fn path_for(&self, key: &ArchiveKey) -> PathBuf {
        let suffix = match key.horizon {
            HorizonKind::Seasonal => "seasonality",
            HorizonKind::Trend => "trend",
        };
        self.dir.join(format!("{}{}.json", key.iteration, suffix))
    }
}

impl ModelArchive for JsonFileArchive {
    fn get(&self, key: &ArchiveKey) -> Result<ModelPool> {
        let path = self.path_for(key);
        if !path.exists() {
            return Err(ForecastError::ArchiveNotFound {
                iteration: key.iteration,
                horizon: key.horizon,
            });
        }

        let json = fs::read_to_string(&path)?;
        let pool = match key.horizon {
            HorizonKind::Seasonal => {
                ModelPool::Seasonal(serde_json::from_str::<SeasonalPool>(&json)?)
            }
            HorizonKind::Trend => ModelPool::Trend(serde_json::from_str::<TrendPool>(&json)?),
        };

        debug!(path = %path.display(), iteration = key.iteration, "Model pool read");
        Ok(pool)
    }

    fn put(&mut self, key: &ArchiveKey, pool: &ModelPool) -> Result<()> {
        if pool.horizon() != key.horizon {
            return Err(ForecastError::ArchiveShapeMismatch(format!(
                "Cannot store a {} pool under a {} key",
                pool.horizon(),
                key.horizon
            )));
        }

        fs::create_dir_all(&self.dir)?;

        let json = match (pool, self.pretty) {
            (ModelPool::Seasonal(pool), true) => serde_json::to_string_pretty(pool)?,
            (ModelPool::Seasonal(pool), false) => serde_json::to_string(pool)?,
            (ModelPool::Trend(pool), true) => serde_json::to_string_pretty(pool)?,
            (ModelPool::Trend(pool), false) => serde_json::to_string(pool)?,
        };

        // Write beside the target first so a failed write never truncates
        // the previously archived pool.
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json)?;
        fs::rename(&staging, &path)?;

        info!(
            path = %path.display(),
            iteration = key.iteration,
            horizon = %key.horizon,
            "Model pool archived"
        );
        Ok(())
    }
}
