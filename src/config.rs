//! Configuration for window scoring.
//!
//! This module provides the [`DetectorConfig`] struct which centralizes the
//! tunable parameters of the detector, along with deployment presets.
//!
//! # Example
//!
//! ```
//! use anomaly_md::DetectorConfig;
//!
//! // Use default configuration (embedded kernel behaviour)
//! let config = DetectorConfig::default();
//! assert_eq!(config.max_measurements, 128);
//!
//! // Derive the window from sensor timing
//! let config = DetectorConfig::from_sampling(200.0, 0.64).with_anomaly_threshold(12.0);
//! assert_eq!(config.max_measurements, 128);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DetectError, Result};
use crate::math::robust::MAD_NORMAL_CONSISTENCY;

/// Configuration for scoring sensor windows against a Mahalanobis model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectorConfig {
    /// Number of leading rows of each window used for features.
    /// `0` uses the whole window.
    pub max_measurements: usize,

    /// Mahalanobis distance above which a window is anomalous.
    pub anomaly_threshold: f64,

    /// Multiplier applied to each per-axis MAD.
    /// - 1.0: raw MAD, as computed on the device
    /// - 1.4826: normal-consistent MAD, as produced by scipy
    pub mad_scale: f64,

    /// Standard deviations above the mean used by threshold calibration.
    pub threshold_sigmas: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_measurements: 128,
            anomaly_threshold: 9.0,
            mad_scale: 1.0,
            threshold_sigmas: 3.0,
        }
    }
}

impl DetectorConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if !self.anomaly_threshold.is_finite() || self.anomaly_threshold <= 0.0 {
            return Err(DetectError::invalid_config(
                "anomaly_threshold must be positive and finite",
            ));
        }
        if !self.mad_scale.is_finite() || self.mad_scale <= 0.0 {
            return Err(DetectError::invalid_config(
                "mad_scale must be positive and finite",
            ));
        }
        if !self.threshold_sigmas.is_finite() || self.threshold_sigmas < 0.0 {
            return Err(DetectError::invalid_config(
                "threshold_sigmas must be non-negative",
            ));
        }
        Ok(())
    }

    /// Window length derived from a sample rate (Hz) and window duration (s).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_sampling(sample_rate_hz: f64, window_seconds: f64) -> Self {
        Self {
            max_measurements: (sample_rate_hz * window_seconds).round().max(0.0) as usize,
            ..Self::default()
        }
    }

    /// Preset matching features computed offline with scipy's MAD.
    #[must_use]
    pub fn scipy_compatible() -> Self {
        Self {
            mad_scale: MAD_NORMAL_CONSISTENCY,
            ..Self::default()
        }
    }

    /// Set the window truncation length.
    #[must_use]
    pub const fn with_max_measurements(mut self, n: usize) -> Self {
        self.max_measurements = n;
        self
    }

    /// Set the anomaly threshold.
    #[must_use]
    pub const fn with_anomaly_threshold(mut self, threshold: f64) -> Self {
        self.anomaly_threshold = threshold;
        self
    }

    /// Set the MAD scale factor.
    #[must_use]
    pub const fn with_mad_scale(mut self, scale: f64) -> Self {
        self.mad_scale = scale;
        self
    }

    /// Set the calibration sigma multiplier.
    #[must_use]
    pub const fn with_threshold_sigmas(mut self, k: f64) -> Self {
        self.threshold_sigmas = k;
        self
    }
}
