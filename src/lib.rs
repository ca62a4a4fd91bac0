//! # RecX
//!
//! Item-to-item product recommendations.
//!
//! RecX reads a product catalog, encodes each product as a weighted feature
//! vector (price, rating, rating popularity, category) and answers "which
//! products are most like this one?" with an exact Euclidean nearest-neighbor
//! search.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! recx --dataset data/amazon.csv --http-port 3000
//! curl http://localhost:3000/api/recommendations/product/B07JW9H4J1
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use recx::prelude::*;
//!
//! let config = ModelConfig::default();
//! let service = RecommendationService::new();
//! service.initialize(&config).unwrap();
//!
//! let response = service.recommend_by_position(0).unwrap();
//! for rec in &response.recommendations {
//!     println!("{} ({:.3})", rec.product_name, rec.similarity_score);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `recx-core` - Vectors, Euclidean distance, exact neighbor index
//! - `recx-catalog` - Dataset loading, feature pipeline, recommendation service
//! - `recx-api` - REST API

// Re-export core types
pub use recx_core::{
    FlatIndex, Neighbor, NeighborIndex, Vector,
    Error, Result,
};

// Re-export catalog
pub use recx_catalog::{
    ProductRecord, CleanedFeatures, FeatureBuilder, FeatureScaler, FeatureWeights, FeatureColumn,
    ModelConfig, RecommendationModel, RecommendationService, RecommendationResponse,
    Readiness, ReadinessState, CatalogError, QueryError, CatalogEntry, CategoryCount,
};

// Re-export API
pub use recx_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        FlatIndex, Neighbor, NeighborIndex, Vector,
        ProductRecord, FeatureWeights,
        ModelConfig, RecommendationModel, RecommendationService, RecommendationResponse,
        CatalogError, QueryError,
        RestApi,
    };
}
