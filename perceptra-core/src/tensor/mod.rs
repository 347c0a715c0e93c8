//! Dense `f32` tensor storage.
//!
//! Row-major contiguous data plus a shape vector. Only ranks 1 and 2 are
//! used in practice (vectors and `[batch, features]` matrices); the
//! operations below check shapes and report [`PerceptraError`] instead of
//! panicking at API boundaries.

use crate::error::PerceptraError;

pub mod create;

#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    data: Vec<f32>,
    shape: Vec<usize>,
}

impl Tensor {
    /// Creates a tensor from raw data and a shape.
    ///
    /// # Errors
    ///
    /// Returns [`PerceptraError::TensorCreation`] if `data.len()` does not
    /// equal the product of `shape`.
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Result<Self, PerceptraError> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(PerceptraError::TensorCreation {
                data_len: data.len(),
                shape,
            });
        }
        Ok(Tensor { data, shape })
    }

    /// Internal constructor for callers that build `data` to match `shape`.
    pub(crate) fn from_raw(data: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(data.len(), shape.iter().product::<usize>());
        Tensor { data, shape }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Row `index` of a rank-2 tensor as a contiguous slice.
    ///
    /// Internal accessor: callers validate rank and bounds beforehand.
    pub fn row(&self, index: usize) -> &[f32] {
        debug_assert_eq!(self.rank(), 2);
        let cols = self.shape[1];
        &self.data[index * cols..(index + 1) * cols]
    }

    /// Matrix product `self · other` for rank-2 tensors.
    ///
    /// # Errors
    ///
    /// [`PerceptraError::RankMismatch`] unless both operands are rank 2,
    /// [`PerceptraError::ShapeMismatch`] unless the inner dimensions agree.
    pub fn matmul(&self, other: &Tensor) -> Result<Tensor, PerceptraError> {
        if self.rank() != 2 {
            return Err(PerceptraError::RankMismatch {
                expected: 2,
                actual: self.rank(),
                operation: "matmul (lhs)".to_string(),
            });
        }
        if other.rank() != 2 {
            return Err(PerceptraError::RankMismatch {
                expected: 2,
                actual: other.rank(),
                operation: "matmul (rhs)".to_string(),
            });
        }
        let (m, k) = (self.shape[0], self.shape[1]);
        let (k2, n) = (other.shape[0], other.shape[1]);
        if k != k2 {
            return Err(PerceptraError::ShapeMismatch {
                expected: vec![k, n],
                actual: vec![k2, n],
                operation: "matmul".to_string(),
            });
        }
        let mut out = vec![0.0f32; m * n];
        for i in 0..m {
            for l in 0..k {
                let lhs_val = self.data[i * k + l];
                if lhs_val == 0.0 {
                    continue;
                }
                let rhs_row = &other.data[l * n..(l + 1) * n];
                for j in 0..n {
                    out[i * n + j] += lhs_val * rhs_row[j];
                }
            }
        }
        Ok(Tensor::from_raw(out, vec![m, n]))
    }

    /// Transpose of a rank-2 tensor.
    pub fn transpose(&self) -> Result<Tensor, PerceptraError> {
        if self.rank() != 2 {
            return Err(PerceptraError::RankMismatch {
                expected: 2,
                actual: self.rank(),
                operation: "transpose".to_string(),
            });
        }
        let (rows, cols) = (self.shape[0], self.shape[1]);
        let mut out = vec![0.0f32; self.data.len()];
        for r in 0..rows {
            for c in 0..cols {
                out[c * rows + r] = self.data[r * cols + c];
            }
        }
        Ok(Tensor::from_raw(out, vec![cols, rows]))
    }

    /// Sums a rank-2 tensor over its row axis, yielding a rank-1 tensor of
    /// length `cols`.
    pub fn sum_rows(&self) -> Result<Tensor, PerceptraError> {
        if self.rank() != 2 {
            return Err(PerceptraError::RankMismatch {
                expected: 2,
                actual: self.rank(),
                operation: "sum_rows".to_string(),
            });
        }
        let (rows, cols) = (self.shape[0], self.shape[1]);
        let mut out = vec![0.0f32; cols];
        for r in 0..rows {
            for (acc, &v) in out.iter_mut().zip(&self.data[r * cols..(r + 1) * cols]) {
                *acc += v;
            }
        }
        Ok(Tensor::from_raw(out, vec![cols]))
    }

    /// True when every element is finite (no NaN, no infinities).
    pub fn all_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests;
