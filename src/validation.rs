//! Inverse-covariance sanity checks.
//!
//! A usable Mahalanobis model needs a symmetric, positive-definite inverse
//! covariance: otherwise distances can go negative and thresholds stop
//! meaning anything. This module inspects the spectrum of the matrix with
//! nalgebra; it reports on a supplied matrix and never estimates one.

use crate::error::{DetectError, Result};
use crate::math::compare::compare_floats;
use crate::model::MdModel;
use nalgebra::{DMatrix, SymmetricEigen};

/// Relative tolerance on `|a_ij - a_ji|`, scaled by the largest magnitude
/// entry. Tables exported from float64 training code differ by a few ulps.
pub const SYMMETRY_RTOL: f64 = 1e-9;

/// Spectral report on an inverse-covariance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAnalysis {
    /// Matrix dimension.
    pub dim: usize,

    /// Largest absolute difference between mirrored entries.
    pub max_asymmetry: f64,

    /// Whether `max_asymmetry` is within [`SYMMETRY_RTOL`].
    pub is_symmetric: bool,

    /// Eigenvalues of the symmetric part, sorted ascending.
    pub eigenvalues: Vec<f64>,

    /// Ratio of largest to smallest eigenvalue (infinite if not positive definite).
    pub condition_number: f64,

    /// Whether every eigenvalue is strictly positive.
    pub is_positive_definite: bool,
}

impl ModelAnalysis {
    /// Whether the matrix can back a Mahalanobis model.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        self.is_symmetric && self.is_positive_definite
    }
}

/// Analyze a row-major `dim x dim` inverse covariance.
///
/// # Errors
///
/// Returns [`DetectError::LengthMismatch`] if `inv_cov` does not hold
/// `dim * dim` values, [`DetectError::EmptyInput`] if `dim` is zero, or
/// [`DetectError::InvalidModel`] if any entry is NaN or infinite.
pub fn analyze_inverse_covariance(inv_cov: &[f64], dim: usize) -> Result<ModelAnalysis> {
    if dim == 0 {
        return Err(DetectError::empty_input("zero-dimensional inverse covariance"));
    }
    if inv_cov.len() != dim * dim {
        return Err(DetectError::length_mismatch(dim * dim, inv_cov.len()));
    }
    // amax() and the eigen solver both pass NaN through silently
    if !inv_cov.iter().all(|v| v.is_finite()) {
        return Err(DetectError::invalid_model(
            "inverse covariance",
            "non-finite value",
        ));
    }

    let m = DMatrix::from_row_slice(dim, dim, inv_cov);

    let max_asymmetry = (&m - m.transpose()).amax();
    let scale = m.amax().max(f64::MIN_POSITIVE);
    let is_symmetric = max_asymmetry <= SYMMETRY_RTOL * scale;

    let symmetric_part = (&m + m.transpose()) * 0.5;
    let eigen = SymmetricEigen::new(symmetric_part);
    let mut eigenvalues: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
    eigenvalues.sort_unstable_by(compare_floats);

    let min_eig = eigenvalues[0];
    let max_eig = eigenvalues[dim - 1];
    let is_positive_definite = eigenvalues.iter().all(|e| *e > 0.0);
    let condition_number = if is_positive_definite {
        max_eig / min_eig
    } else {
        f64::INFINITY
    };

    Ok(ModelAnalysis {
        dim,
        max_asymmetry,
        is_symmetric,
        eigenvalues,
        condition_number,
        is_positive_definite,
    })
}

/// Analyze the inverse covariance of a model.
///
/// # Errors
///
/// See [`analyze_inverse_covariance`].
pub fn analyze_model(model: &MdModel) -> Result<ModelAnalysis> {
    analyze_inverse_covariance(model.inv_cov(), model.dim())
}
