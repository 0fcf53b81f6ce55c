//! Reconstruction error for autoencoder-style scoring.
//!
//! An autoencoder trained on normal data reconstructs normal inputs well and
//! anomalous ones poorly, so the error between a sample and its
//! reconstruction serves as the anomaly score.

use crate::detector::Verdict;
use crate::error::{DetectError, Result};

/// Mean squared error between `x` and its reconstruction `x_hat`.
///
/// Averages over `x.len()` entries; `x_hat` must be at least as long. An empty
/// `x` yields NaN.
#[must_use]
pub fn calc_mse(x: &[f64], x_hat: &[f64]) -> f64 {
    debug_assert!(x_hat.len() >= x.len(), "calc_mse: reconstruction shorter than input");

    let sum: f64 = x
        .iter()
        .zip(x_hat.iter())
        .map(|(a, b)| (a - b).powi(2))
        .sum();

    sum / x.len() as f64
}

/// Root mean squared error, in the units of the input.
#[must_use]
pub fn calc_rmse(x: &[f64], x_hat: &[f64]) -> f64 {
    calc_mse(x, x_hat).sqrt()
}

/// Thresholds reconstruction MSE into a [`Verdict`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconstructionScorer {
    threshold: f64,
}

impl ReconstructionScorer {
    /// Create a scorer flagging MSE values above `threshold`.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidConfig`] if `threshold` is not a
    /// positive finite number.
    pub fn new(threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(DetectError::invalid_config(
                "reconstruction threshold must be positive and finite",
            ));
        }
        Ok(Self { threshold })
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score `x` against its reconstruction.
    #[must_use]
    pub fn score(&self, x: &[f64], x_hat: &[f64]) -> Verdict {
        Verdict::new(calc_mse(x, x_hat), self.threshold)
    }
}
