use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while building a recommendation model
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Dataset not readable at {path:?}: {source}")]
    DatasetMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No usable products: all {rows_read} rows were dropped during cleaning")]
    EmptyPopulation { rows_read: usize },

    #[error("Invalid feature weights: {0}")]
    InvalidWeights(String),

    #[error("Non-finite scaled feature at row {row}, column '{column}'")]
    NonFiniteFeature { row: usize, column: &'static str },

    #[error("Index error: {0}")]
    Index(#[from] recx_core::Error),
}

/// Errors raised by a single recommendation query
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid product index {position}: expected 0..{len}")]
    InvalidIndex { position: i64, len: usize },

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Model not initialized: {0}")]
    ModelNotReady(String),

    #[error("Index error: {0}")]
    Index(#[from] recx_core::Error),
}
