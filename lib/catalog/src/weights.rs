//! Feature columns and their importance weights
//!
//! Weights are configuration, not learned from data. They are expected to sum
//! to 1.0 but are applied as given.

use crate::error::{CatalogError, Result};
use crate::features::CleanedFeatures;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A numeric axis of the feature space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureColumn {
    Price,
    Rating,
    RatingCount,
    Category,
}

impl FeatureColumn {
    pub fn name(&self) -> &'static str {
        match self {
            FeatureColumn::Price => "price",
            FeatureColumn::Rating => "rating",
            FeatureColumn::RatingCount => "rating_count",
            FeatureColumn::Category => "category",
        }
    }

    /// Raw column value before log transform and price inversion
    pub fn extract(&self, features: &CleanedFeatures) -> f64 {
        match self {
            FeatureColumn::Price => features.price,
            FeatureColumn::Rating => features.rating,
            FeatureColumn::RatingCount => features.rating_count,
            FeatureColumn::Category => f64::from(features.category_code),
        }
    }
}

/// Per-column importance weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeights {
    pub price: f32,
    pub rating: f32,
    pub rating_count: f32,
    /// `None` leaves category out of the feature space entirely
    pub category: Option<f32>,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self::with_category()
    }
}

impl FeatureWeights {
    /// 35% price, 25% rating, 20% rating count, 20% category
    pub fn with_category() -> Self {
        Self {
            price: 0.35,
            rating: 0.25,
            rating_count: 0.20,
            category: Some(0.20),
        }
    }

    /// 40% price, 30% rating, 30% rating count
    pub fn without_category() -> Self {
        Self {
            price: 0.40,
            rating: 0.30,
            rating_count: 0.30,
            category: None,
        }
    }

    /// Columns in vector order
    pub fn columns(&self) -> Vec<FeatureColumn> {
        let mut columns = vec![
            FeatureColumn::Price,
            FeatureColumn::Rating,
            FeatureColumn::RatingCount,
        ];
        if self.category.is_some() {
            columns.push(FeatureColumn::Category);
        }
        columns
    }

    /// Weights in vector order
    pub fn as_vec(&self) -> Vec<f32> {
        let mut weights = vec![self.price, self.rating, self.rating_count];
        if let Some(category) = self.category {
            weights.push(category);
        }
        weights
    }

    pub fn dim(&self) -> usize {
        if self.category.is_some() { 4 } else { 3 }
    }

    pub fn sum(&self) -> f32 {
        self.as_vec().iter().sum()
    }

    /// Reject negative or non-finite weights; warn when they do not sum to 1
    pub fn validate(&self) -> Result<()> {
        for (column, weight) in self.columns().iter().zip(self.as_vec()) {
            if !weight.is_finite() || weight < 0.0 {
                return Err(CatalogError::InvalidWeights(format!(
                    "weight for '{}' must be finite and non-negative, got {}",
                    column.name(),
                    weight
                )));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > 0.001 {
            warn!("Feature weights sum to {:.3}, expected 1.0; applying as given", sum);
        }
        Ok(())
    }
}
