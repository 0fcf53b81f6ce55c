//! Feature extraction from raw sensor windows.
//!
//! A window is a run of multi-axis readings (e.g. 128 accelerometer samples of
//! `[x, y, z]`). Its feature vector is the median absolute deviation of each
//! axis, which is the input the Mahalanobis models are trained on.

use crate::error::{DetectError, Result};
use crate::math::robust::calc_mad;

/// Per-axis MAD of the first `max_measurements` rows of `window`.
///
/// `max_measurements == 0` uses every row. Each MAD is multiplied by `scale`
/// (1.0 for the raw statistic). The window itself is not modified; one
/// column-sized scratch buffer is reused across axes.
///
/// # Errors
///
/// Returns [`DetectError::EmptyInput`] if `window` is empty.
pub fn extract_mad_features<const N: usize>(
    window: &[[f64; N]],
    max_measurements: usize,
    scale: f64,
) -> Result<[f64; N]> {
    if window.is_empty() {
        return Err(DetectError::empty_input("feature window"));
    }

    let rows = if max_measurements == 0 {
        window.len()
    } else {
        window.len().min(max_measurements)
    };
    let window = &window[..rows];

    let mut column = Vec::with_capacity(rows);
    let mut features = [0.0; N];
    for (axis, feature) in features.iter_mut().enumerate() {
        column.clear();
        column.extend(window.iter().map(|row| row[axis]));
        *feature = calc_mad(&mut column)? * scale;
    }

    Ok(features)
}
