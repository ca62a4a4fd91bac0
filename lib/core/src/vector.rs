use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A dense feature vector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// True when every component is finite (no NaN or infinity)
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    /// Elementwise product, used to apply per-column weights
    pub fn hadamard(&self, weights: &[f32]) -> Result<Vector> {
        if self.dim() != weights.len() {
            return Err(Error::InvalidDimension {
                expected: self.dim(),
                actual: weights.len(),
            });
        }
        Ok(Vector::new(
            self.data
                .iter()
                .zip(weights.iter())
                .map(|(x, w)| x * w)
                .collect(),
        ))
    }
}
