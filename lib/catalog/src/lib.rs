//! # RecX Catalog
//!
//! Turns a product catalog into item-to-item recommendations.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Loader    │────>│  Features   │────>│   Scaler    │────>│ FlatIndex   │
//! │   (CSV)     │     │ (clean+enc) │     │ (z + weight)│     │ (exact kNN) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                                                                    │
//!                                                             ┌──────┴──────┐
//!                                                             │   Service   │
//!                                                             │  (queries)  │
//!                                                             └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use recx_catalog::{ModelConfig, ProductRecord, RecommendationModel};
//!
//! let records = vec![
//!     ProductRecord::new("A", "Cable", "Electronics", "₹100", "₹150", "4.5", "10"),
//!     ProductRecord::new("B", "Cable XL", "Electronics", "₹110", "₹150", "4.4", "12"),
//!     ProductRecord::new("C", "Television", "Home", "₹5,000", "₹7,000", "2.0", "1"),
//! ];
//! let model = RecommendationModel::from_records(records, &ModelConfig::default()).unwrap();
//!
//! let response = model.recommend_by_id("A").unwrap();
//! assert_eq!(response.recommendations[0].product_id, "B");
//! assert!(response.recommendations[0].same_category);
//! ```

pub mod error;
pub mod record;
pub mod loader;
pub mod features;
pub mod weights;
pub mod scaler;
pub mod response;
pub mod browse;
pub mod model;
pub mod service;

// Re-export main types
pub use error::{CatalogError, QueryError, Result};
pub use record::ProductRecord;
pub use loader::{load_products, load_products_from_reader};
pub use features::{BuildReport, CleanedFeatures, DropCounts, DropReason, FeatureBuilder, FeatureSet};
pub use weights::{FeatureColumn, FeatureWeights};
pub use scaler::{ColumnStats, FeatureScaler, ScalerStats};
pub use response::{QueryProduct, Recommendation, RecommendationResponse};
pub use browse::{top_level_category, CatalogEntry, CategoryCount, FEATURED_MIN_RATING};
pub use model::{ModelConfig, RecommendationModel, DEFAULT_TOP_K};
pub use service::{ModelState, Readiness, ReadinessState, RecommendationService};
