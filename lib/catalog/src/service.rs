//! Recommendation service lifecycle
//!
//! The service starts out not ready, becomes ready once a model is installed,
//! and records a failure if the build fails. Queries never see a half-built
//! model: the lock guards only the lifecycle slot, and each query works on
//! its own `Arc` clone of the immutable model.

use crate::browse::{CatalogEntry, CategoryCount};
use crate::error::{CatalogError, QueryError};
use crate::model::{ModelConfig, RecommendationModel};
use crate::response::RecommendationResponse;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

/// Lifecycle slot holding the model
#[derive(Debug, Clone)]
pub enum ModelState {
    NotReady,
    Ready(Arc<RecommendationModel>),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessState {
    NotReady,
    Ready,
    Failed,
}

/// Health summary for external checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Readiness {
    pub state: ReadinessState,
    pub products: usize,
    pub categories: usize,
    pub dropped_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        self.state == ReadinessState::Ready
    }
}

/// Shared entry point for recommendation queries
#[derive(Debug)]
pub struct RecommendationService {
    state: RwLock<ModelState>,
}

impl Default for RecommendationService {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationService {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ModelState::NotReady),
        }
    }

    /// A service that is ready from the start
    pub fn with_model(model: RecommendationModel) -> Self {
        Self {
            state: RwLock::new(ModelState::Ready(Arc::new(model))),
        }
    }

    /// Build the model from the configured dataset and install it.
    ///
    /// On failure the service is left in the failed state and the build
    /// error is returned.
    pub fn initialize(&self, config: &ModelConfig) -> Result<(), CatalogError> {
        info!("Building recommendation model from {}", config.dataset_path.display());
        match RecommendationModel::load(config) {
            Ok(model) => {
                self.install(model);
                Ok(())
            }
            Err(e) => {
                self.mark_failed(e.to_string());
                Err(e)
            }
        }
    }

    pub fn install(&self, model: RecommendationModel) {
        *self.state.write() = ModelState::Ready(Arc::new(model));
    }

    pub fn mark_failed(&self, message: impl Into<String>) {
        let message = message.into();
        error!("Recommendation model failed to build: {}", message);
        *self.state.write() = ModelState::Failed(message);
    }

    pub fn state(&self) -> ModelState {
        self.state.read().clone()
    }

    /// The installed model, or `ModelNotReady`
    pub fn model(&self) -> Result<Arc<RecommendationModel>, QueryError> {
        match &*self.state.read() {
            ModelState::Ready(model) => Ok(Arc::clone(model)),
            ModelState::NotReady => Err(QueryError::ModelNotReady(
                "model is still being built".to_string(),
            )),
            ModelState::Failed(message) => Err(QueryError::ModelNotReady(format!(
                "model build failed: {}",
                message
            ))),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(&*self.state.read(), ModelState::Ready(_))
    }

    pub fn readiness(&self) -> Readiness {
        match self.state() {
            ModelState::Ready(model) => Readiness {
                state: ReadinessState::Ready,
                products: model.len(),
                categories: model.categories().len(),
                dropped_rows: model.report().rows_dropped,
                message: None,
            },
            ModelState::NotReady => Readiness {
                state: ReadinessState::NotReady,
                products: 0,
                categories: 0,
                dropped_rows: 0,
                message: Some("model not initialized".to_string()),
            },
            ModelState::Failed(message) => Readiness {
                state: ReadinessState::Failed,
                products: 0,
                categories: 0,
                dropped_rows: 0,
                message: Some(message),
            },
        }
    }

    pub fn recommend_by_position(&self, position: i64) -> Result<RecommendationResponse, QueryError> {
        self.model()?.recommend_by_position(position)
    }

    pub fn recommend_by_id(&self, product_id: &str) -> Result<RecommendationResponse, QueryError> {
        self.model()?.recommend_by_id(product_id)
    }

    pub fn categories(&self) -> Result<Vec<CategoryCount>, QueryError> {
        Ok(self.model()?.category_counts())
    }

    pub fn top_level_categories(&self) -> Result<Vec<CategoryCount>, QueryError> {
        Ok(self.model()?.top_level_categories())
    }

    pub fn product(&self, product_id: &str) -> Result<CatalogEntry, QueryError> {
        self.model()?.product(product_id)
    }

    pub fn catalog(&self, limit: Option<usize>) -> Result<Vec<CatalogEntry>, QueryError> {
        Ok(self.model()?.catalog(limit))
    }

    pub fn catalog_in_category(&self, name: &str) -> Result<Vec<CatalogEntry>, QueryError> {
        Ok(self.model()?.catalog_in_category(name))
    }

    pub fn featured(&self, count: usize) -> Result<Vec<CatalogEntry>, QueryError> {
        Ok(self.model()?.featured(count))
    }
}
