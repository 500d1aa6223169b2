//! Score vectors to sampled indices.
//!
//! Scores are `f64` and may be `-inf`, meaning the candidate is never chosen
//! unless every candidate is `-inf`.
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

/// Softmax over `scores`; `-inf` entries get probability zero.
///
/// If every score is `-inf` the result is uniform.
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return vec![1.0 / scores.len() as f64; scores.len()];
    }
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Maps the maxima to 1 and everything else to `-inf`.
pub fn collapse_to_max(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    scores
        .iter()
        .map(|&s| if s == max { 1.0 } else { f64::NEG_INFINITY })
        .collect()
}

/// Draws one index with probability proportional to `weights`.
///
/// Falls back to a uniform draw when the weights are not a usable
/// distribution (all zero, or containing NaN).
pub fn sample_categorical<R: Rng + ?Sized>(rng: &mut R, weights: &[f64]) -> usize {
    match WeightedIndex::new(weights) {
        Ok(dist) => dist.sample(rng),
        Err(_) => rng.gen_range(0..weights.len().max(1)),
    }
}
