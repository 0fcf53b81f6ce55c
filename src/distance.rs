//! Mahalanobis distance against a precomputed mean / inverse-covariance model.
//!
//! The distance is evaluated as a fixed three-stage product:
//!
//! 1. `d = x - mu` as a `1 x len` row
//! 2. `left = d * inv_cov` (`1 x len` times `len x len`)
//! 3. `result = left * d^T` (`1 x len` times `len x 1`)
//!
//! `d^T` is the same buffer as `d` viewed as a column; nothing is copied.
//! The value returned is the squared form `(x - mu) inv_cov (x - mu)^T`, with
//! no square root, which is what the deployed thresholds are calibrated on.

use crate::error::Result;
use crate::math::linalg::MatrixView;

/// Mahalanobis distance of `x` from the model (`mu`, `inv_cov`).
///
/// `x` and `mu` must hold at least `len` values and `inv_cov` at least
/// `len * len` values in row-major order. Scratch space is allocated for the
/// duration of the call only.
///
/// # Errors
///
/// Propagates a [`crate::DetectError::ShapeMismatch`] from the matrix kernel.
/// With consistent `len` the geometry guarantees this never fires.
pub fn mahalanobis(x: &[f64], mu: &[f64], inv_cov: &[f64], len: usize) -> Result<f64> {
    debug_assert!(inv_cov.len() >= len * len, "mahalanobis: inverse covariance too small");

    let x_minus_mu: Vec<f64> = x[..len]
        .iter()
        .zip(&mu[..len])
        .map(|(xi, mi)| xi - mi)
        .collect();

    let mut left_term = vec![0.0; len];
    let inv_cov = MatrixView::new(&inv_cov[..len * len], len, len)?;
    MatrixView::as_row(&x_minus_mu).matmul(&inv_cov, &mut left_term)?;

    let mut mahal = [0.0; 1];
    MatrixView::as_row(&left_term).matmul(&MatrixView::as_column(&x_minus_mu), &mut mahal)?;

    Ok(mahal[0])
}

/// Mahalanobis distance for a dimension known at compile time.
///
/// Same pipeline as [`mahalanobis`], on stack arrays. The array types fix the
/// geometry, so there is nothing to fail.
#[must_use]
pub fn mahalanobis_fixed<const N: usize>(
    x: &[f64; N],
    mu: &[f64; N],
    inv_cov: &[[f64; N]; N],
) -> f64 {
    let mut x_minus_mu = [0.0; N];
    for i in 0..N {
        x_minus_mu[i] = x[i] - mu[i];
    }

    let mut left_term = [0.0; N];
    for (j, out) in left_term.iter_mut().enumerate() {
        *out = (0..N).map(|k| x_minus_mu[k] * inv_cov[k][j]).sum();
    }

    left_term
        .iter()
        .zip(x_minus_mu.iter())
        .map(|(l, d)| l * d)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const MU: [f64; 3] = [0.5, -1.0, 2.0];
    const INV_COV: [[f64; 3]; 3] = [[2.0, 0.5, 0.0], [0.5, 1.0, 0.25], [0.0, 0.25, 3.0]];

    fn flat() -> Vec<f64> {
        INV_COV.iter().flatten().copied().collect()
    }

    #[test]
    fn test_self_distance_zero() {
        let d = mahalanobis(&MU, &MU, &flat(), 3).unwrap();
        assert_relative_eq!(d, 0.0);
        assert_relative_eq!(mahalanobis_fixed(&MU, &MU, &INV_COV), 0.0);
    }

    #[test]
    fn test_identity_is_squared_euclidean() {
        let eye = [1.0, 0.0, 0.0, 1.0];
        let d = mahalanobis(&[3.0, 4.0], &[0.0, 0.0], &eye, 2).unwrap();
        assert_relative_eq!(d, 25.0);
    }

    #[test]
    fn test_diagonal_scales_each_axis() {
        // inv_cov = diag(1/4, 1/9): sigma = (2, 3)
        let inv = [0.25, 0.0, 0.0, 1.0 / 9.0];
        let d = mahalanobis(&[2.0, 3.0], &[0.0, 0.0], &inv, 2).unwrap();
        assert_relative_eq!(d, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_positive_definite_non_negative() {
        let samples = [[0.0, 0.0, 0.0], [1.0, -1.0, 3.0], [-4.0, 2.5, 0.1], [10.0, 10.0, -10.0]];
        for x in &samples {
            let d = mahalanobis(x, &MU, &flat(), 3).unwrap();
            assert!(d >= 0.0, "distance {d} negative for {x:?}");
        }
    }

    #[test]
    fn test_fixed_matches_runtime() {
        let x = [1.25, 0.0, -3.0];
        let runtime = mahalanobis(&x, &MU, &flat(), 3).unwrap();
        let fixed = mahalanobis_fixed(&x, &MU, &INV_COV);
        assert_relative_eq!(runtime, fixed, epsilon = 1e-12);
    }

    #[test]
    fn test_symmetric_in_sample_and_mean() {
        let x = [1.0, 2.0, 3.0];
        let a = mahalanobis(&x, &MU, &flat(), 3).unwrap();
        let b = mahalanobis(&MU, &x, &flat(), 3).unwrap();
        assert_relative_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn test_uses_only_len_prefix() {
        let x = [1.0, 2.0, 99.0];
        let mu = [0.0, 0.0, -99.0];
        let eye = [1.0, 0.0, 0.0, 1.0];
        assert_relative_eq!(mahalanobis(&x, &mu, &eye, 2).unwrap(), 5.0);
    }
}
