use rand::prelude::*;
use serde::{Serialize, Deserialize};

use crate::error::LossError;

/// Dense row-major f64 tensor.
///
/// Losses treat this as a batch of row vectors: `rows` is the batch size and
/// `cols` the vector length. Elementwise operations require both operands to
/// have identical shapes; a mismatch is reported as
/// [`LossError::ShapeMismatch`] before any element is touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Tensor {
    pub fn zeros(rows: usize, cols: usize) -> Tensor {
        Tensor {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Tensor {
        Tensor {
            rows: data.len(),
            cols: data.first().map_or(0, |row| row.len()),
            data,
        }
    }

    /// Uniform random values in (-1, 1). Handy for test fixtures.
    pub fn random(rows: usize, cols: usize) -> Tensor {
        let mut rng = rand::thread_rng();
        let mut res = Tensor::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() * 2.0 - 1.0;
            }
        }

        res
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total element count.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i]
    }

    /// Fails if `other` does not share this tensor's shape.
    pub fn check_shape(&self, other: &Tensor) -> Result<(), LossError> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(LossError::ShapeMismatch {
                expected: self.shape(),
                got: other.shape(),
            });
        }
        Ok(())
    }

    pub fn map<F>(&self, functor: F) -> Tensor
    where
        F: Fn(f64) -> f64,
    {
        Tensor {
            rows: self.rows,
            cols: self.cols,
            data: self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Elementwise combination with `rhs`; shape-checked.
    pub fn zip_map<F>(&self, rhs: &Tensor, functor: F) -> Result<Tensor, LossError>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.check_shape(rhs)?;

        let data = self.data
            .iter()
            .zip(rhs.data.iter())
            .map(|(a, b)| {
                a.iter().zip(b.iter()).map(|(&x, &y)| functor(x, y)).collect()
            })
            .collect();

        Ok(Tensor { rows: self.rows, cols: self.cols, data })
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().flatten().sum()
    }

    /// Reshapes in place, zero-filling, unless the shape already matches.
    /// Used by the backward passes to size a caller-provided gradient buffer.
    pub fn resize_to(&mut self, rows: usize, cols: usize) {
        if self.rows != rows || self.cols != cols {
            *self = Tensor::zeros(rows, cols);
        }
    }
}
