//! # RecX Core
//!
//! Core data structures for the RecX recommendation service.
//!
//! - [`Vector`] - Dense feature vector
//! - [`NeighborIndex`] - k-nearest-neighbor query contract
//! - [`FlatIndex`] - Exact Euclidean linear-scan index
//!
//! ## Example
//!
//! ```rust
//! use recx_core::{FlatIndex, NeighborIndex, Vector};
//!
//! let rows = vec![
//!     Vector::new(vec![0.0, 0.0]),
//!     Vector::new(vec![1.0, 0.0]),
//!     Vector::new(vec![5.0, 5.0]),
//! ];
//! let index = FlatIndex::build(&rows).unwrap();
//!
//! let neighbors = index.k_nearest(0, 2).unwrap();
//! assert_eq!(neighbors[0].position, 1);
//! assert_eq!(neighbors[1].position, 2);
//! ```

pub mod vector;
pub mod error;
pub mod index;

/// Euclidean distance kernels and the distance-to-similarity transform
pub mod distance;

pub use vector::Vector;
pub use error::{Error, Result};
pub use index::{FlatIndex, Neighbor, NeighborIndex};
pub use distance::{l2_distance, similarity_from_distance};
