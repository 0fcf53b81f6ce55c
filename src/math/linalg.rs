//! Linear algebra kernels over row-major flattened buffers.
//!
//! These are deliberately small: a dot product, a checked matrix product and a
//! borrowed matrix view. Matrices are stored row-major, so element `(i, j)` of
//! an `r x c` matrix lives at `data[i * c + j]`.

use crate::error::{DetectError, Result};

/// Dot product of `a` and `b` over `a.len()` entries.
///
/// `b` must hold at least as many values as `a`.
#[must_use]
#[inline]
pub fn dot_product(a: &[f64], b: &[f64]) -> f64 {
    debug_assert!(b.len() >= a.len(), "dot_product: b shorter than a");
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Multiply `a` (`a_rows x a_cols`) by `b` (`b_rows x b_cols`) into `out`.
///
/// Writes all `a_rows * b_cols` entries of `out` in row-major order. The
/// capacity of `out` is the caller's responsibility.
///
/// # Errors
///
/// Returns [`DetectError::ShapeMismatch`] when `a_cols != b_rows`; `out` is
/// left untouched in that case.
pub fn matrix_multiply(
    a: &[f64],
    b: &[f64],
    a_rows: usize,
    a_cols: usize,
    b_rows: usize,
    b_cols: usize,
    out: &mut [f64],
) -> Result<()> {
    if a_cols != b_rows {
        return Err(DetectError::shape_mismatch(a_cols, b_rows));
    }
    debug_assert!(out.len() >= a_rows * b_cols, "matrix_multiply: output too small");

    for i in 0..a_rows {
        let a_row = &a[i * a_cols..(i + 1) * a_cols];
        for j in 0..b_cols {
            let mut sum = 0.0;
            for (k, &a_ik) in a_row.iter().enumerate() {
                sum += a_ik * b[k * b_cols + j];
            }
            out[i * b_cols + j] = sum;
        }
    }

    Ok(())
}

/// Borrowed row-major matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixView<'a> {
    data: &'a [f64],
    rows: usize,
    cols: usize,
}

impl<'a> MatrixView<'a> {
    /// Wrap `data` as a `rows x cols` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::LengthMismatch`] unless `rows * cols == data.len()`.
    pub fn new(data: &'a [f64], rows: usize, cols: usize) -> Result<Self> {
        if rows * cols != data.len() {
            return Err(DetectError::length_mismatch(rows * cols, data.len()));
        }
        Ok(Self { data, rows, cols })
    }

    /// View a vector as a `1 x n` row.
    #[must_use]
    pub const fn as_row(data: &'a [f64]) -> Self {
        Self {
            data,
            rows: 1,
            cols: data.len(),
        }
    }

    /// View a vector as an `n x 1` column.
    ///
    /// This is the transpose of [`MatrixView::as_row`] over the same buffer;
    /// no values move.
    #[must_use]
    pub const fn as_column(data: &'a [f64]) -> Self {
        Self {
            data,
            rows: data.len(),
            cols: 1,
        }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub const fn as_slice(&self) -> &'a [f64] {
        self.data
    }

    /// Row `i` as a slice.
    #[must_use]
    pub fn row(&self, i: usize) -> &'a [f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Element at `(i, j)`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    /// Multiply `self` by `rhs` into `out` (`self.rows() * rhs.cols()` values).
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::ShapeMismatch`] when the inner dimensions differ.
    pub fn matmul(&self, rhs: &MatrixView<'_>, out: &mut [f64]) -> Result<()> {
        matrix_multiply(
            self.data, rhs.data, self.rows, self.cols, rhs.rows, rhs.cols, out,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    #[test]
    fn test_dot_orthogonal() {
        assert_relative_eq!(dot_product(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_dot_self_is_sum_of_squares() {
        let a = [1.5, -2.0, 3.0, 0.25];
        let expected: f64 = a.iter().map(|x| x * x).sum();
        assert_relative_eq!(dot_product(&a, &a), expected);
    }

    #[test]
    fn test_identity_multiply() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let eye = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        let mut out = [0.0; 6];
        matrix_multiply(&a, &eye, 2, 3, 3, 3, &mut out).unwrap();
        assert_eq!(out, a);
    }

    #[test]
    fn test_shape_mismatch_leaves_output() {
        let a = [1.0; 6]; // 2x3
        let b = [1.0; 4]; // 2x2
        let mut out = [-7.0; 4];
        let err = matrix_multiply(&a, &b, 2, 3, 2, 2, &mut out).unwrap_err();
        assert!(matches!(err, DetectError::ShapeMismatch { a_cols: 3, b_rows: 2 }));
        assert_eq!(out, [-7.0; 4]);
    }

    #[test]
    fn test_matches_nalgebra() {
        let a = [1.0, -2.0, 0.5, 3.0, 4.0, -1.0]; // 2x3
        let b = [2.0, 1.0, 0.0, -1.0, 3.0, 0.5, 1.0, 1.0]; // 2x4
        let c = [0.5, 1.5, -2.0, 1.0, 0.0, 2.0]; // 3x2

        let mut out = [0.0; 4];
        matrix_multiply(&a, &c, 2, 3, 3, 2, &mut out).unwrap();
        let expected = DMatrix::from_row_slice(2, 3, &a) * DMatrix::from_row_slice(3, 2, &c);
        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(out[i * 2 + j], expected[(i, j)], epsilon = 1e-12);
            }
        }

        let mut out = [0.0; 12];
        matrix_multiply(&c, &b, 3, 2, 2, 4, &mut out).unwrap();
        let expected = DMatrix::from_row_slice(3, 2, &c) * DMatrix::from_row_slice(2, 4, &b);
        for i in 0..3 {
            for j in 0..4 {
                assert_relative_eq!(out[i * 4 + j], expected[(i, j)], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_view_shape_checked() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert!(MatrixView::new(&data, 2, 3).is_ok());
        assert!(matches!(
            MatrixView::new(&data, 2, 2),
            Err(DetectError::LengthMismatch { expected: 4, actual: 6 })
        ));

        let m = MatrixView::new(&data, 2, 3).unwrap();
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
        assert_relative_eq!(m.get(0, 2), 3.0);
    }

    #[test]
    fn test_row_times_column_is_dot() {
        let v = [1.0, 2.0, 3.0];
        let mut out = [0.0];
        MatrixView::as_row(&v)
            .matmul(&MatrixView::as_column(&v), &mut out)
            .unwrap();
        assert_relative_eq!(out[0], dot_product(&v, &v));
    }
}
