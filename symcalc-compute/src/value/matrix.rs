//! Dense real matrices.

use crate::error::{error, kind::{DimensionMismatch, NotSquare, SingularMatrix}, Error};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pivots smaller than this are treated as zero when eliminating.
const PIVOT_EPSILON: f64 = 1e-12;

/// A dense matrix of real numbers, stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a matrix from row-major data. The data must hold exactly `rows * cols` elements.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    /// Creates a matrix from a list of rows, or returns [`None`] if the rows have different
    /// lengths.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        let row_count = rows.len();
        Some(Self::new(row_count, cols, rows.into_iter().flatten().collect()))
    }

    /// Creates the `n` by `n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self::new(n, n, data)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the element at the given row and column.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Returns the given row as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Returns the shape of the matrix, formatted as `rows x cols`.
    pub fn shape(&self) -> String {
        format!("{}x{}", self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    fn require_square(&self) -> Result<(), Error> {
        if self.is_square() {
            Ok(())
        } else {
            Err(error(NotSquare { rows: self.rows, cols: self.cols }))
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self.get(row, col));
            }
        }
        Self::new(self.cols, self.rows, data)
    }

    /// Applies the function to every element.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Matrix {
        Self::new(self.rows, self.cols, self.data.iter().copied().map(f).collect())
    }

    /// Combines two matrices of the same shape element by element.
    pub fn zip_with(
        &self,
        other: &Matrix,
        op: &'static str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Matrix, Error> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(error(DimensionMismatch { op, left: self.shape(), right: other.shape() }));
        }
        let data = self.data.iter().zip(&other.data).map(|(a, b)| f(*a, *b)).collect();
        Ok(Self::new(self.rows, self.cols, data))
    }

    /// Computes the matrix product `self * other`.
    pub fn mul(&self, other: &Matrix) -> Result<Matrix, Error> {
        if self.cols != other.rows {
            return Err(error(DimensionMismatch {
                op: "multiply",
                left: self.shape(),
                right: other.shape(),
            }));
        }
        let mut data = vec![0.0; self.rows * other.cols];
        for i in 0..self.rows {
            for j in 0..other.cols {
                data[i * other.cols + j] = (0..self.cols)
                    .map(|k| self.get(i, k) * other.get(k, j))
                    .sum();
            }
        }
        Ok(Self::new(self.rows, other.cols, data))
    }

    /// Multiplies the matrix by a column vector.
    pub fn mul_vector(&self, vector: &[f64]) -> Result<Vec<f64>, Error> {
        if self.cols != vector.len() {
            return Err(error(DimensionMismatch {
                op: "multiply",
                left: self.shape(),
                right: format!("{}x1", vector.len()),
            }));
        }
        Ok((0..self.rows)
            .map(|i| self.row(i).iter().zip(vector).map(|(a, b)| a * b).sum())
            .collect())
    }

    /// Computes the determinant through LU decomposition with partial pivoting.
    pub fn determinant(&self) -> Result<f64, Error> {
        self.require_square()?;
        let n = self.rows;
        let mut lu = self.data.clone();
        let mut det = 1.0;

        for col in 0..n {
            let pivot = (col..n)
                .max_by(|a, b| lu[a * n + col].abs().total_cmp(&lu[b * n + col].abs()))
                .unwrap_or(col);
            if lu[pivot * n + col].abs() < PIVOT_EPSILON {
                return Ok(0.0);
            }
            if pivot != col {
                for k in 0..n {
                    lu.swap(pivot * n + k, col * n + k);
                }
                det = -det;
            }

            let diagonal = lu[col * n + col];
            det *= diagonal;
            for row in col + 1..n {
                let factor = lu[row * n + col] / diagonal;
                for k in col..n {
                    lu[row * n + k] -= factor * lu[col * n + k];
                }
            }
        }

        Ok(det)
    }

    /// Computes the inverse through Gauss-Jordan elimination.
    pub fn inverse(&self) -> Result<Matrix, Error> {
        self.require_square()?;
        let n = self.rows;
        let mut a = self.data.clone();
        let mut inv = Matrix::identity(n).data;

        for col in 0..n {
            let pivot = (col..n)
                .max_by(|x, y| a[x * n + col].abs().total_cmp(&a[y * n + col].abs()))
                .unwrap_or(col);
            if a[pivot * n + col].abs() < PIVOT_EPSILON {
                return Err(error(SingularMatrix));
            }
            if pivot != col {
                for k in 0..n {
                    a.swap(pivot * n + k, col * n + k);
                    inv.swap(pivot * n + k, col * n + k);
                }
            }

            let diagonal = a[col * n + col];
            for k in 0..n {
                a[col * n + k] /= diagonal;
                inv[col * n + k] /= diagonal;
            }

            for row in (0..n).filter(|row| *row != col) {
                let factor = a[row * n + col];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..n {
                    a[row * n + k] -= factor * a[col * n + k];
                    inv[row * n + k] -= factor * inv[col * n + k];
                }
            }
        }

        Ok(Self::new(n, n, inv))
    }

    /// Raises the matrix to an integer power by repeated squaring. Negative powers invert the
    /// matrix first.
    pub fn pow(&self, exponent: i64) -> Result<Matrix, Error> {
        self.require_square()?;
        let mut base = if exponent < 0 { self.inverse()? } else { self.clone() };
        let mut exponent = exponent.unsigned_abs();
        let mut result = Matrix::identity(self.rows);
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = result.mul(&base)?;
            }
            base = base.mul(&base)?;
            exponent >>= 1;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_relative_error_msg, afe_is_relative_eq, assert_float_relative_eq};
    use super::*;

    fn matrix(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|row| row.to_vec()).collect()).unwrap()
    }

    #[test]
    fn ragged_rows() {
        assert!(Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_none());
    }

    #[test]
    fn determinant() {
        assert_float_relative_eq!(matrix(&[&[1.0, 2.0], &[3.0, 4.0]]).determinant().unwrap(), -2.0);
        assert_float_relative_eq!(
            matrix(&[&[0.0, 2.0, 1.0], &[1.0, 0.0, 3.0], &[4.0, 1.0, 0.0]]).determinant().unwrap(),
            25.0
        );
        assert_eq!(matrix(&[&[1.0, 2.0], &[2.0, 4.0]]).determinant().unwrap(), 0.0);
    }

    #[test]
    fn inverse() {
        let m = matrix(&[&[4.0, 7.0], &[2.0, 6.0]]);
        let product = m.mul(&m.inverse().unwrap()).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((product.get(i, j) - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn singular_inverse() {
        let err = matrix(&[&[1.0, 2.0], &[2.0, 4.0]]).inverse().unwrap_err();
        assert!(err.is::<SingularMatrix>());
    }

    #[test]
    fn shape_mismatch() {
        let a = matrix(&[&[1.0, 2.0, 3.0]]);
        let err = a.mul(&a).unwrap_err();
        assert!(err.is::<DimensionMismatch>());
        assert_eq!(a.transpose().shape(), "3x1");
    }

    #[test]
    fn power() {
        let m = matrix(&[&[1.0, 1.0], &[1.0, 0.0]]);
        // fibonacci
        assert_eq!(m.pow(10).unwrap().get(0, 1), 55.0);
        assert_eq!(m.pow(0).unwrap(), Matrix::identity(2));
    }
}
