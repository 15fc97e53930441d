//! Model pools: the archived collections of candidate models

use super::{CandidateModel, HorizonKind};
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// `groups × buckets` grid of seasonal models
///
/// Column `k` of every group belongs to the `k`-th bucket of the flattened
/// hour/minute ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<CandidateModel>>", into = "Vec<Vec<CandidateModel>>")]
pub struct SeasonalPool {
    groups: Vec<Vec<CandidateModel>>,
}

impl TryFrom<Vec<Vec<CandidateModel>>> for SeasonalPool {
    type Error = ForecastError;

    fn try_from(groups: Vec<Vec<CandidateModel>>) -> Result<Self> {
        SeasonalPool::new(groups)
    }
}

impl From<SeasonalPool> for Vec<Vec<CandidateModel>> {
    fn from(pool: SeasonalPool) -> Self {
        pool.groups
    }
}

impl SeasonalPool {
    /// Create a pool, checking that every group has the same bucket count
    pub fn new(groups: Vec<Vec<CandidateModel>>) -> Result<Self> {
        if let Some(first) = groups.first() {
            let buckets = first.len();
            if let Some((g, row)) = groups
                .iter()
                .enumerate()
                .find(|(_, row)| row.len() != buckets)
            {
                return Err(ForecastError::ArchiveShapeMismatch(format!(
                    "Group {} has {} buckets, group 0 has {}",
                    g,
                    row.len(),
                    buckets
                )));
            }
        }

        Ok(Self { groups })
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Buckets per group, zero for an empty pool
    pub fn bucket_count(&self) -> usize {
        self.groups.first().map_or(0, Vec::len)
    }

    pub fn groups(&self) -> &[Vec<CandidateModel>] {
        &self.groups
    }

    pub fn group(&self, group: usize) -> Option<&[CandidateModel]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    pub fn model(&self, group: usize, bucket: usize) -> Option<&CandidateModel> {
        self.groups.get(group).and_then(|row| row.get(bucket))
    }

    pub fn into_groups(self) -> Vec<Vec<CandidateModel>> {
        self.groups
    }
}

/// Flat sequence of trend models, one per group
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrendPool {
    models: Vec<CandidateModel>,
}

impl TrendPool {
    pub fn new(models: Vec<CandidateModel>) -> Self {
        Self { models }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn models(&self) -> &[CandidateModel] {
        &self.models
    }

    pub fn get(&self, group: usize) -> Option<&CandidateModel> {
        self.models.get(group)
    }

    /// Append models after the existing ones
    pub fn extend(&mut self, models: impl IntoIterator<Item = CandidateModel>) {
        self.models.extend(models);
    }

    pub fn into_models(self) -> Vec<CandidateModel> {
        self.models
    }
}

/// Archived value of either horizon
#[derive(Debug, Clone, PartialEq)]
pub enum ModelPool {
    Seasonal(SeasonalPool),
    Trend(TrendPool),
}

impl ModelPool {
    pub fn horizon(&self) -> HorizonKind {
        match self {
            ModelPool::Seasonal(_) => HorizonKind::Seasonal,
            ModelPool::Trend(_) => HorizonKind::Trend,
        }
    }

    pub fn into_seasonal(self) -> Result<SeasonalPool> {
        match self {
            ModelPool::Seasonal(pool) => Ok(pool),
            ModelPool::Trend(_) => Err(ForecastError::ArchiveShapeMismatch(
                "Expected a seasonal pool, found a trend pool".to_string(),
            )),
        }
    }

    pub fn into_trend(self) -> Result<TrendPool> {
        match self {
            ModelPool::Trend(pool) => Ok(pool),
            ModelPool::Seasonal(_) => Err(ForecastError::ArchiveShapeMismatch(
                "Expected a trend pool, found a seasonal pool".to_string(),
            )),
        }
    }
}

impl From<SeasonalPool> for ModelPool {
    fn from(pool: SeasonalPool) -> Self {
        ModelPool::Seasonal(pool)
    }
}

impl From<TrendPool> for ModelPool {
    fn from(pool: TrendPool) -> Self {
        ModelPool::Trend(pool)
    }
}
