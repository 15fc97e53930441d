//! Joint shuffling of feature windows and their targets

use crate::error::{ForecastError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Random generator for one unit of scoring work
///
/// With a seed, each `stream` gets its own reproducible sequence so that
/// cells scored on different threads do not share state.
pub fn rng_for(seed: Option<u64>, stream: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)),
        None => StdRng::from_entropy(),
    }
}

/// Permute `(feature, target)` pairs with one shared permutation
pub fn shuffle_pairs<R: Rng + ?Sized>(
    features: Vec<Vec<f64>>,
    targets: Vec<f64>,
    rng: &mut R,
) -> Result<(Vec<Vec<f64>>, Vec<f64>)> {
    if features.len() != targets.len() {
        return Err(ForecastError::DataError(format!(
            "Features length ({}) doesn't match targets length ({})",
            features.len(),
            targets.len()
        )));
    }

    let mut pairs: Vec<(Vec<f64>, f64)> = features.into_iter().zip(targets).collect();
    pairs.shuffle(rng);

    Ok(pairs.into_iter().unzip())
}
