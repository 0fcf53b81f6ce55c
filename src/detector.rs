//! Window scoring against a Mahalanobis model.
//!
//! [`MdDetector`] pairs a validated [`MdModel`] with a [`DetectorConfig`]:
//! raw window → per-axis MAD features → Mahalanobis distance → [`Verdict`].
//! Thresholds are calibrated from distances of known-normal data with
//! [`recommend_threshold`].

use tracing::{debug, trace};

use crate::config::DetectorConfig;
use crate::distance::mahalanobis;
use crate::error::{DetectError, Result};
use crate::features::extract_mad_features;
use crate::model::{MdModel, ModelRegistry};

/// Outcome of scoring one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    /// Anomaly score (Mahalanobis distance or reconstruction MSE).
    pub score: f64,
    /// Threshold the score was compared against.
    pub threshold: f64,
    /// `score > threshold`.
    pub is_anomaly: bool,
}

impl Verdict {
    #[must_use]
    pub fn new(score: f64, threshold: f64) -> Self {
        Self {
            score,
            threshold,
            is_anomaly: score > threshold,
        }
    }
}

/// Mahalanobis-distance anomaly detector.
#[derive(Debug, Clone)]
pub struct MdDetector {
    model: MdModel,
    config: DetectorConfig,
}

impl MdDetector {
    /// Create a detector.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `model` or `config`.
    pub fn new(model: MdModel, config: DetectorConfig) -> Result<Self> {
        model.validate()?;
        config.validate()?;
        debug!(
            model = %model.name(),
            version = model.version(),
            threshold = config.anomaly_threshold,
            "detector ready"
        );
        Ok(Self { model, config })
    }

    /// Create a detector for the model registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidConfig`] if no such model is registered.
    pub fn from_registry(
        registry: &ModelRegistry,
        name: &str,
        config: DetectorConfig,
    ) -> Result<Self> {
        let model = registry
            .get(name)
            .ok_or_else(|| DetectError::invalid_config(format!("unknown model '{name}'")))?;
        Self::new(model.clone(), config)
    }

    #[must_use]
    pub const fn model(&self) -> &MdModel {
        &self.model
    }

    #[must_use]
    pub const fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Replace the anomaly threshold.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidConfig`] for a non-positive threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self> {
        self.config.anomaly_threshold = threshold;
        self.config.validate()?;
        Ok(self)
    }

    /// Mahalanobis distance of a feature vector from the model mean.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::LengthMismatch`] if `features` does not match
    /// the model dimension.
    pub fn distance(&self, features: &[f64]) -> Result<f64> {
        let dim = self.model.dim();
        if features.len() != dim {
            return Err(DetectError::length_mismatch(dim, features.len()));
        }
        mahalanobis(features, self.model.mu(), self.model.inv_cov(), dim)
    }

    /// Score a feature vector.
    ///
    /// # Errors
    ///
    /// See [`MdDetector::distance`].
    pub fn classify(&self, features: &[f64]) -> Result<Verdict> {
        let verdict = Verdict::new(self.distance(features)?, self.config.anomaly_threshold);
        if verdict.is_anomaly {
            debug!(
                model = %self.model.name(),
                distance = verdict.score,
                threshold = verdict.threshold,
                "anomaly detected"
            );
        } else {
            trace!(distance = verdict.score, "normal");
        }
        Ok(verdict)
    }

    /// Extract features from a raw window and score them.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::EmptyInput`] for an empty window and
    /// [`DetectError::LengthMismatch`] if `N` differs from the model dimension.
    pub fn score_window<const N: usize>(&self, window: &[[f64; N]]) -> Result<Verdict> {
        let features =
            extract_mad_features(window, self.config.max_measurements, self.config.mad_scale)?;
        self.classify(&features)
    }

    /// Threshold recommended from feature vectors of known-normal operation,
    /// using `config.threshold_sigmas`.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::EmptyInput`] if `normal_features` is empty, or
    /// the [`MdDetector::distance`] error of any vector.
    pub fn calibrate<F: AsRef<[f64]>>(&self, normal_features: &[F]) -> Result<f64> {
        let distances = normal_features
            .iter()
            .map(|f| self.distance(f.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let threshold = recommend_threshold(&distances, self.config.threshold_sigmas)?;
        debug!(
            model = %self.model.name(),
            samples = distances.len(),
            threshold,
            "calibrated threshold"
        );
        Ok(threshold)
    }
}

/// `mean + k * std` of distances observed on normal data.
///
/// Uses the population standard deviation.
///
/// # Errors
///
/// Returns [`DetectError::EmptyInput`] if `distances` is empty.
pub fn recommend_threshold(distances: &[f64], k: f64) -> Result<f64> {
    if distances.is_empty() {
        return Err(DetectError::empty_input("threshold calibration distances"));
    }

    let n = distances.len() as f64;
    let mean = distances.iter().sum::<f64>() / n;
    let variance = distances.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;

    Ok(k.mul_add(variance.sqrt(), mean))
}
