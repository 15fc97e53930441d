//! # Edge Predictor
//!
//! Umbrella crate for the forecasting model validator.
//!
//! - [`lstm_predictor`]: data model, recurrent scorer, selection, archive and validator
//! - [`predictor_math`]: activations, statistics, scaling and error metrics
//!
//! ## Example
//!
//! ```
//! use edge_predictor_workspace::lstm_predictor::{score, CandidateModel};
//!
//! let model = CandidateModel::uniform(3, 0.5).unwrap();
//! assert_eq!(score(&[2.0, 2.0, 2.0], &model).unwrap(), 2.0);
//! ```

pub use lstm_predictor;
pub use predictor_math;
