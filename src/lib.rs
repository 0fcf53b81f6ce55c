//! Anomaly MD Library
//!
//! Small numeric toolkit for embedded anomaly detection.
//!
//! This library scores sensor data against a "normal operation" model: robust
//! statistics (median, median absolute deviation) turn a raw window into a
//! feature vector, and the Mahalanobis distance of that vector from a
//! precomputed mean / inverse-covariance model is the anomaly score. A
//! mean-squared-error metric covers autoencoder-style reconstruction scoring.
//!
//! # Features
//!
//! - **Allocation-aware**: median/MAD sort the caller's buffer in place;
//!   copying variants are available when the input must survive
//! - **Checked shapes where it matters**: matrix products reject mismatched
//!   inner dimensions without touching the output
//! - **Data-driven models**: named, versioned model records, validated for
//!   symmetry and positive definiteness on load
//!
//! # Quick Start
//!
//! ```
//! use anomaly_md::{DetectorConfig, MdDetector, MdModel};
//!
//! // 128 accelerometer readings of [x, y, z]
//! let window: Vec<[f64; 3]> = (0..128_i32)
//!     .map(|i| {
//!         let t = f64::from(i) * 0.05;
//!         [0.01 * t.sin(), 0.006 * t.cos(), 0.007 * (2.0 * t).sin()]
//!     })
//!     .collect();
//!
//! let detector = MdDetector::new(MdModel::ceiling_fan_moving(), DetectorConfig::default())?;
//! let verdict = detector.score_window(&window)?;
//! println!("distance {:.3} (anomaly: {})", verdict.score, verdict.is_anomaly);
//! # Ok::<(), anomaly_md::DetectError>(())
//! ```
//!
//! # Kernels
//!
//! | Function | Mutates input | Failure |
//! |----------|---------------|---------|
//! | [`median`] | yes (sorted) | empty input |
//! | [`calc_mad`] | yes (deviations) | empty input |
//! | [`dot_product`] | no | none |
//! | [`matrix_multiply`] | writes `out` | inner dimension mismatch |
//! | [`mahalanobis`] | no | propagated from [`matrix_multiply`] |
//! | [`calc_mse`] | no | none |

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]

pub mod config;
pub mod detector;
pub mod distance;
pub mod error;
pub mod features;
pub mod math;
pub mod model;
pub mod reconstruction;
pub mod validation;

// Re-exports for convenient access
pub use config::DetectorConfig;
pub use detector::{recommend_threshold, MdDetector, Verdict};
pub use distance::{mahalanobis, mahalanobis_fixed};
pub use error::{DetectError, Result};
pub use features::extract_mad_features;
pub use math::{
    calc_mad, compare_floats, dot_product, mad_copied, matrix_multiply, median, median_copied,
    MatrixView, MAD_NORMAL_CONSISTENCY,
};
pub use model::{MdModel, ModelRegistry};
pub use reconstruction::{calc_mse, calc_rmse, ReconstructionScorer};
pub use validation::{analyze_inverse_covariance, analyze_model, ModelAnalysis};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
