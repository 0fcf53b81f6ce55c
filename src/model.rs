//! Mahalanobis model records.
//!
//! A model is the mean feature vector and inverse covariance of "normal"
//! operation, computed offline and shipped as data. Each record carries a
//! name and version so deployments can swap models without code changes.
//!
//! # Example
//!
//! ```
//! use anomaly_md::{MdModel, ModelRegistry};
//!
//! let registry = ModelRegistry::builtin();
//! let model = registry.get("md_model-moving").unwrap();
//! assert_eq!(model.dim(), 3);
//!
//! let custom = MdModel::new("bench", 1, vec![0.0, 0.0], vec![1.0, 0.0, 0.0, 1.0])?;
//! assert_eq!(custom.version(), 1);
//! # Ok::<(), anomaly_md::DetectError>(())
//! ```

use std::collections::BTreeMap;

use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DetectError, Result};
use crate::validation::analyze_model;

/// Mean vector and row-major inverse covariance for one deployment scenario.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MdModel {
    name: String,
    version: u32,
    mu: Vec<f64>,
    inv_cov: Vec<f64>,
}

impl MdModel {
    /// Build and validate a model.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::EmptyInput`] for an empty mean,
    /// [`DetectError::LengthMismatch`] if `inv_cov` is not `dim x dim`, and
    /// [`DetectError::InvalidModel`] for non-finite values or an inverse
    /// covariance that is not symmetric positive definite.
    pub fn new(
        name: impl Into<String>,
        version: u32,
        mu: Vec<f64>,
        inv_cov: Vec<f64>,
    ) -> Result<Self> {
        let model = Self {
            name: name.into(),
            version,
            mu,
            inv_cov,
        };
        model.validate()?;
        Ok(model)
    }

    /// Ceiling fan running at low speed ("md_model").
    #[must_use]
    #[allow(clippy::excessive_precision)]
    pub fn ceiling_fan() -> Self {
        Self {
            name: "md_model".to_owned(),
            version: 1,
            mu: vec![0.012_049_953_994_017_095, 0.007_095_831_310_256_41, 0.004_973_618_240_170_936],
            inv_cov: vec![
                1_927_196.257_823_728_7, -324_748.889_694_161_54, -199_864.163_168_002_24,
                -324_748.889_694_161_54, 2_157_143.906_105_444, -40_965.820_677_248_97,
                -199_864.163_168_002_24, -40_965.820_677_248_97, 3_192_311.649_781_269,
            ],
        }
    }

    /// Ceiling fan with the housing in motion ("md_model-moving").
    #[must_use]
    #[allow(clippy::excessive_precision)]
    pub fn ceiling_fan_moving() -> Self {
        Self {
            name: "md_model-moving".to_owned(),
            version: 1,
            mu: vec![0.007_695_169_087_292_815, 0.004_149_572_143_093_924, 0.004_909_478_363_535_906],
            inv_cov: vec![
                94_214.387_385_457_8, -49_201.813_707_458_52, 2_827.109_137_369_988_7,
                -49_201.813_707_458_496, 152_282.547_241_853_96, -213_180.621_241_893_97,
                2_827.109_137_369_931, -213_180.621_241_893_9, 804_506.687_758_383_6,
            ],
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Feature dimension (length of the mean vector).
    #[must_use]
    pub fn dim(&self) -> usize {
        self.mu.len()
    }

    #[must_use]
    pub fn mu(&self) -> &[f64] {
        &self.mu
    }

    /// Row-major `dim x dim` inverse covariance.
    #[must_use]
    pub fn inv_cov(&self) -> &[f64] {
        &self.inv_cov
    }

    /// Check shape, finiteness and definiteness.
    ///
    /// # Errors
    ///
    /// See [`MdModel::new`].
    pub fn validate(&self) -> Result<()> {
        let dim = self.dim();
        if dim == 0 {
            return Err(DetectError::empty_input("model mean vector"));
        }
        if self.inv_cov.len() != dim * dim {
            return Err(DetectError::length_mismatch(dim * dim, self.inv_cov.len()));
        }
        if !self.mu.iter().chain(&self.inv_cov).all(|v| v.is_finite()) {
            return Err(DetectError::invalid_model(&self.name, "non-finite value"));
        }

        let analysis = analyze_model(self)?;
        if !analysis.is_symmetric {
            warn!(model = %self.name, asymmetry = analysis.max_asymmetry, "inverse covariance not symmetric");
            return Err(DetectError::invalid_model(
                &self.name,
                "inverse covariance is not symmetric",
            ));
        }
        if !analysis.is_positive_definite {
            warn!(model = %self.name, eigenvalues = ?analysis.eigenvalues, "inverse covariance not positive definite");
            return Err(DetectError::invalid_model(
                &self.name,
                "inverse covariance is not positive definite",
            ));
        }
        Ok(())
    }

    /// Decode and validate a model from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::Json`] on malformed input and the
    /// [`MdModel::validate`] errors on a well-formed but unusable model.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Encode the model as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::Json`] if serialization fails.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Named collection of models, filled once at startup and read afterwards.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, MdModel>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in ceiling fan models.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert(MdModel::ceiling_fan());
        registry.insert(MdModel::ceiling_fan_moving());
        registry
    }

    /// Register `model` under its name, returning any model it replaces.
    pub fn insert(&mut self, model: MdModel) -> Option<MdModel> {
        debug!(model = %model.name, version = model.version, dim = model.dim(), "registering model");
        let previous = self.models.insert(model.name.clone(), model);
        if let Some(old) = &previous {
            debug!(model = %old.name, version = old.version, "replaced model");
        }
        previous
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MdModel> {
        self.models.get(name)
    }

    /// Registered model names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
