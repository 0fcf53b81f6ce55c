//! Robust statistics: median and median absolute deviation.
//!
//! The in-place variants reorder and overwrite the caller's buffer so that no
//! allocation happens on the hot path. Use [`median_copied`] / [`mad_copied`]
//! when the original samples are still needed afterwards.

use crate::error::{DetectError, Result};
use crate::math::compare::compare_floats;

/// Scale factor making MAD a consistent estimator of the standard deviation
/// for normally distributed data.
pub const MAD_NORMAL_CONSISTENCY: f64 = 1.4826;

/// Median of `buf`.
///
/// Sorts `buf` ascending in place. For an even number of values the result is
/// the mean of the two middle elements.
///
/// # Errors
///
/// Returns [`DetectError::EmptyInput`] if `buf` is empty.
pub fn median(buf: &mut [f64]) -> Result<f64> {
    let n = buf.len();
    if n == 0 {
        return Err(DetectError::empty_input("median of zero values"));
    }

    buf.sort_unstable_by(compare_floats);

    if n % 2 == 0 {
        Ok((buf[(n - 1) / 2] + buf[n / 2]) / 2.0)
    } else {
        Ok(buf[n / 2])
    }
}

/// Median absolute deviation of `buf`.
///
/// After the call `buf` holds the sorted absolute deviations from the median,
/// not the original values.
///
/// # Errors
///
/// Returns [`DetectError::EmptyInput`] if `buf` is empty.
pub fn calc_mad(buf: &mut [f64]) -> Result<f64> {
    let med = median(buf)?;

    for v in buf.iter_mut() {
        *v = (*v - med).abs();
    }

    median(buf)
}

/// Median of `values` without touching the caller's buffer.
///
/// # Errors
///
/// Returns [`DetectError::EmptyInput`] if `values` is empty.
pub fn median_copied(values: &[f64]) -> Result<f64> {
    let mut scratch = values.to_vec();
    median(&mut scratch)
}

/// Median absolute deviation of `values` without touching the caller's buffer.
///
/// # Errors
///
/// Returns [`DetectError::EmptyInput`] if `values` is empty.
pub fn mad_copied(values: &[f64]) -> Result<f64> {
    let mut scratch = values.to_vec();
    calc_mad(&mut scratch)
}
