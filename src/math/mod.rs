//! Numeric building blocks.
//!
//! This module provides:
//! - [`compare`]: total-order float comparator used for sorting
//! - [`robust`]: median and median absolute deviation
//! - [`linalg`]: dot product, checked matrix multiply, matrix views

pub mod compare;
pub mod linalg;
pub mod robust;

pub use compare::compare_floats;
pub use linalg::{dot_product, matrix_multiply, MatrixView};
pub use robust::{calc_mad, mad_copied, median, median_copied, MAD_NORMAL_CONSISTENCY};
