//! Candidate recurrent models and the pools they are archived in

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Horizon a model pool forecasts for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizonKind {
    /// One model per time-of-day bucket
    Seasonal,
    /// One global model
    Trend,
}

impl fmt::Display for HorizonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HorizonKind::Seasonal => write!(f, "seasonal"),
            HorizonKind::Trend => write!(f, "trend"),
        }
    }
}

/// One trained parameter set of the recurrent cell
///
/// All eight vectors hold one entry per lag of the feature window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCandidateModel", into = "RawCandidateModel")]
pub struct CandidateModel {
    wi: Vec<f64>,
    wo: Vec<f64>,
    wz: Vec<f64>,
    r_i: Vec<f64>,
    r_o: Vec<f64>,
    r_z: Vec<f64>,
    yt: Vec<f64>,
    ct: Vec<f64>,
}

/// Unchecked wire form of [`CandidateModel`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCandidateModel {
    wi: Vec<f64>,
    wo: Vec<f64>,
    wz: Vec<f64>,
    #[serde(rename = "rI")]
    r_i: Vec<f64>,
    #[serde(rename = "rO")]
    r_o: Vec<f64>,
    #[serde(rename = "rZ")]
    r_z: Vec<f64>,
    yt: Vec<f64>,
    ct: Vec<f64>,
}

impl TryFrom<RawCandidateModel> for CandidateModel {
    type Error = ForecastError;

    fn try_from(raw: RawCandidateModel) -> Result<Self> {
        CandidateModel::new(raw.wi, raw.wo, raw.wz, raw.r_i, raw.r_o, raw.r_z, raw.yt, raw.ct)
    }
}

impl From<CandidateModel> for RawCandidateModel {
    fn from(model: CandidateModel) -> Self {
        RawCandidateModel {
            wi: model.wi,
            wo: model.wo,
            wz: model.wz,
            r_i: model.r_i,
            r_o: model.r_o,
            r_z: model.r_z,
            yt: model.yt,
            ct: model.ct,
        }
    }
}

impl CandidateModel {
    /// Create a model, checking that all vectors share one non-zero length
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        wi: Vec<f64>,
        wo: Vec<f64>,
        wz: Vec<f64>,
        r_i: Vec<f64>,
        r_o: Vec<f64>,
        r_z: Vec<f64>,
        yt: Vec<f64>,
        ct: Vec<f64>,
    ) -> Result<Self> {
        let expected = wi.len();
        if expected == 0 {
            return Err(ForecastError::ArchiveShapeMismatch(
                "Candidate model vectors must not be empty".to_string(),
            ));
        }

        let named = [
            ("wo", &wo),
            ("wz", &wz),
            ("rI", &r_i),
            ("rO", &r_o),
            ("rZ", &r_z),
            ("yt", &yt),
            ("ct", &ct),
        ];
        for (name, vector) in named {
            if vector.len() != expected {
                return Err(ForecastError::ArchiveShapeMismatch(format!(
                    "Vector {} has {} entries, wi has {}",
                    name,
                    vector.len(),
                    expected
                )));
            }
        }

        Ok(Self {
            wi,
            wo,
            wz,
            r_i,
            r_o,
            r_z,
            yt,
            ct,
        })
    }

    /// Model with every weight set to `value`
    pub fn uniform(window_size: usize, value: f64) -> Result<Self> {
        let v = vec![value; window_size];
        Self::new(v.clone(), v.clone(), v.clone(), v.clone(), v.clone(), v.clone(), v.clone(), v)
    }

    /// Number of lags this model consumes
    pub fn window_size(&self) -> usize {
        self.wi.len()
    }

    pub fn wi(&self) -> &[f64] {
        &self.wi
    }

    pub fn wo(&self) -> &[f64] {
        &self.wo
    }

    pub fn wz(&self) -> &[f64] {
        &self.wz
    }

    pub fn r_i(&self) -> &[f64] {
        &self.r_i
    }

    pub fn r_o(&self) -> &[f64] {
        &self.r_o
    }

    pub fn r_z(&self) -> &[f64] {
        &self.r_z
    }

    /// Last-output seed saved by training
    pub fn yt(&self) -> &[f64] {
        &self.yt
    }

    /// Last-cell-state seed saved by training
    pub fn ct(&self) -> &[f64] {
        &self.ct
    }
}

pub mod pool;
pub mod recurrent;

pub use pool::{ModelPool, SeasonalPool, TrendPool};
