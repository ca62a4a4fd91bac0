//! Exact nearest-neighbor index
//!
//! [`NeighborIndex`] is the query contract the recommendation layer relies on;
//! [`FlatIndex`] implements it with a linear scan over a contiguous row-major
//! matrix. Any other implementation (a tree or graph index) can be swapped in
//! as long as it returns the same neighbors in the same order.

use crate::distance::l2_distance;
use crate::{Error, Result, Vector};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BinaryHeap;

/// Populations at or above this size are scanned with rayon
const PARALLEL_SCAN_THRESHOLD: usize = 4096;

/// One neighbor of a query row
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor {
    /// Ordinal position of the neighbor row
    pub position: usize,
    /// Euclidean distance to the query row
    pub distance: f32,
}

/// Read-only k-nearest-neighbor lookup over a fixed set of rows
pub trait NeighborIndex: Send + Sync {
    /// Number of indexed rows
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of every indexed row
    fn dim(&self) -> usize;

    /// Borrow the row stored at `position`
    fn vector(&self, position: usize) -> Option<&[f32]>;

    /// The `k` rows closest to the row at `position`, excluding that row.
    ///
    /// Results are sorted by ascending distance, ties by ascending position.
    /// Fewer than `k` rows are returned when the population is smaller than
    /// `k + 1`.
    fn k_nearest(&self, position: usize, k: usize) -> Result<Vec<Neighbor>>;
}

/// Bounded max-heap keeping the best `limit` (distance, position) pairs
struct TopK {
    limit: usize,
    heap: BinaryHeap<(OrderedFloat<f32>, usize)>,
}

impl TopK {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            heap: BinaryHeap::with_capacity(limit + 1),
        }
    }

    #[inline]
    fn offer(&mut self, position: usize, distance: f32) {
        if self.limit == 0 {
            return;
        }
        let candidate = (OrderedFloat(distance), position);
        if self.heap.len() < self.limit {
            self.heap.push(candidate);
        } else if let Some(worst) = self.heap.peek() {
            if candidate < *worst {
                self.heap.pop();
                self.heap.push(candidate);
            }
        }
    }

    fn merge(mut self, other: TopK) -> TopK {
        for (distance, position) in other.heap {
            self.offer(position, distance.0);
        }
        self
    }

    fn into_sorted(self) -> Vec<Neighbor> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|(distance, position)| Neighbor {
                position,
                distance: distance.0,
            })
            .collect()
    }
}

/// Brute-force Euclidean index over a dense matrix
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dim: usize,
    len: usize,
    /// Row-major storage, `len * dim` values
    vectors: Vec<f32>,
}

impl FlatIndex {
    /// Build the index from equally sized, finite vectors
    pub fn build(rows: &[Vector]) -> Result<Self> {
        let first = rows.first().ok_or(Error::EmptyIndex)?;
        let dim = first.dim();
        if dim == 0 {
            return Err(Error::InvalidDimension {
                expected: 1,
                actual: 0,
            });
        }

        let mut vectors = Vec::with_capacity(rows.len() * dim);
        for (row, vector) in rows.iter().enumerate() {
            if vector.dim() != dim {
                return Err(Error::InvalidDimension {
                    expected: dim,
                    actual: vector.dim(),
                });
            }
            if let Some(column) = vector.as_slice().iter().position(|x| !x.is_finite()) {
                return Err(Error::NonFiniteValue { row, column });
            }
            vectors.extend_from_slice(vector.as_slice());
        }

        Ok(Self {
            dim,
            len: rows.len(),
            vectors,
        })
    }

    #[inline]
    fn row(&self, position: usize) -> &[f32] {
        let start = position * self.dim;
        &self.vectors[start..start + self.dim]
    }

    /// The `limit` rows closest to `query`, self included
    pub fn search(&self, query: &[f32], limit: usize) -> Vec<Neighbor> {
        let limit = limit.min(self.len);
        if self.len >= PARALLEL_SCAN_THRESHOLD {
            self.vectors
                .par_chunks_exact(self.dim)
                .enumerate()
                .fold(
                    || TopK::new(limit),
                    |mut top, (position, row)| {
                        top.offer(position, l2_distance(query, row));
                        top
                    },
                )
                .reduce(|| TopK::new(limit), TopK::merge)
                .into_sorted()
        } else {
            let mut top = TopK::new(limit);
            for (position, row) in self.vectors.chunks_exact(self.dim).enumerate() {
                top.offer(position, l2_distance(query, row));
            }
            top.into_sorted()
        }
    }
}

impl NeighborIndex for FlatIndex {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn dim(&self) -> usize {
        self.dim
    }

    fn vector(&self, position: usize) -> Option<&[f32]> {
        (position < self.len).then(|| self.row(position))
    }

    fn k_nearest(&self, position: usize, k: usize) -> Result<Vec<Neighbor>> {
        if position >= self.len {
            return Err(Error::PositionOutOfRange {
                position,
                len: self.len,
            });
        }

        // At most every other row; `build` guarantees len >= 1
        let k = k.min(self.len - 1);

        // The query row is its own nearest neighbor, so fetch one extra
        let mut neighbors = self.search(self.row(position), k + 1);
        neighbors.retain(|n| n.position != position);
        neighbors.truncate(k);
        Ok(neighbors)
    }
}
