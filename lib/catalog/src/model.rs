//! The built recommendation model
//!
//! A [`RecommendationModel`] is produced once from a dataset snapshot by
//! [`RecommendationModel::load`] (or [`RecommendationModel::from_records`]) and
//! never mutated afterwards. Positions in the model are the ordinal positions
//! of the retained records.

use crate::browse::{
    matches_category_path, top_level_category, CatalogEntry, CategoryCount, FEATURED_MIN_RATING,
};
use crate::error::{CatalogError, QueryError, Result};
use crate::features::{BuildReport, CleanedFeatures, FeatureBuilder};
use crate::loader::load_products;
use crate::record::ProductRecord;
use crate::response::{QueryProduct, Recommendation, RecommendationResponse};
use crate::scaler::{FeatureScaler, ScalerStats};
use crate::weights::FeatureWeights;
use ahash::AHashMap;
use recx_core::{FlatIndex, Neighbor, NeighborIndex, Vector};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// Number of recommendations returned per query
pub const DEFAULT_TOP_K: usize = 5;

/// Settings for building a model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub dataset_path: PathBuf,
    pub weights: FeatureWeights,
    pub top_k: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/amazon.csv"),
            weights: FeatureWeights::default(),
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Immutable catalog, features and neighbor index
pub struct RecommendationModel {
    records: Vec<ProductRecord>,
    features: Vec<CleanedFeatures>,
    vectors: Vec<Vector>,
    categories: Vec<String>,
    index: Box<dyn NeighborIndex>,
    /// First retained position for each product id
    positions_by_id: AHashMap<String, usize>,
    report: BuildReport,
    scaler_stats: ScalerStats,
    weights: FeatureWeights,
    top_k: usize,
}

impl std::fmt::Debug for RecommendationModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationModel")
            .field("products", &self.records.len())
            .field("categories", &self.categories.len())
            .field("dim", &self.index.dim())
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl RecommendationModel {
    /// Read the dataset and build the model
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let records = load_products(&config.dataset_path)?;
        Self::from_records(records, config)
    }

    /// Build the model from already loaded records
    pub fn from_records(records: Vec<ProductRecord>, config: &ModelConfig) -> Result<Self> {
        let set = FeatureBuilder::new().build(records);
        if set.is_empty() {
            return Err(CatalogError::EmptyPopulation {
                rows_read: set.report.rows_read,
            });
        }

        let scaler = FeatureScaler::new(config.weights);
        let (vectors, scaler_stats) = scaler.fit_transform(&set.features)?;
        let index = FlatIndex::build(&vectors)?;

        let mut positions_by_id = AHashMap::with_capacity(set.records.len());
        for (position, record) in set.records.iter().enumerate() {
            positions_by_id
                .entry(record.product_id.clone())
                .or_insert(position);
        }

        info!(
            "Model trained with {} products ({} dims, {} categories)",
            set.records.len(),
            index.dim(),
            set.categories.len()
        );

        Ok(Self {
            records: set.records,
            features: set.features,
            vectors,
            categories: set.categories,
            index: Box::new(index),
            positions_by_id,
            report: set.report,
            scaler_stats,
            weights: config.weights,
            top_k: config.top_k,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, position: usize) -> Option<&ProductRecord> {
        self.records.get(position)
    }

    pub fn features(&self, position: usize) -> Option<&CleanedFeatures> {
        self.features.get(position)
    }

    pub fn vectors(&self) -> &[Vector] {
        &self.vectors
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn scaler_stats(&self) -> &ScalerStats {
        &self.scaler_stats
    }

    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Position of the first retained record with this id
    pub fn position_of(&self, product_id: &str) -> Option<usize> {
        self.positions_by_id.get(product_id).copied()
    }

    /// Validate a caller-supplied position
    pub fn resolve_position(&self, position: i64) -> std::result::Result<usize, QueryError> {
        usize::try_from(position)
            .ok()
            .filter(|p| *p < self.len())
            .ok_or(QueryError::InvalidIndex {
                position,
                len: self.len(),
            })
    }

    /// Raw neighbors of a position, self excluded
    pub fn neighbors(&self, position: usize, k: usize) -> std::result::Result<Vec<Neighbor>, QueryError> {
        Ok(self.index.k_nearest(position, k)?)
    }

    /// Recommendations for the product at `position`
    pub fn recommend_by_position(
        &self,
        position: i64,
    ) -> std::result::Result<RecommendationResponse, QueryError> {
        let position = self.resolve_position(position)?;
        self.recommend_at(position)
    }

    /// Recommendations for the product with this external id
    pub fn recommend_by_id(
        &self,
        product_id: &str,
    ) -> std::result::Result<RecommendationResponse, QueryError> {
        let position = self
            .position_of(product_id)
            .ok_or_else(|| QueryError::NotFound(product_id.to_string()))?;
        self.recommend_at(position)
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.records
    }

    /// The retained product with this external id
    pub fn product(&self, product_id: &str) -> std::result::Result<CatalogEntry, QueryError> {
        let position = self
            .position_of(product_id)
            .ok_or_else(|| QueryError::NotFound(product_id.to_string()))?;
        Ok(CatalogEntry::new(position, &self.records[position]))
    }

    /// Distinct cleaned categories with product counts, sorted by name
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let mut counts = vec![0usize; self.categories.len()];
        for features in &self.features {
            counts[features.category_code as usize] += 1;
        }
        self.categories
            .iter()
            .zip(counts)
            .map(|(category, count)| CategoryCount {
                category: category.clone(),
                count,
            })
            .collect()
    }

    /// Top-level departments with product counts, sorted by name
    pub fn top_level_categories(&self) -> Vec<CategoryCount> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for features in &self.features {
            *counts.entry(top_level_category(&features.category)).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.to_string(),
                count,
            })
            .collect()
    }

    /// Retained products in position order, at most `limit` of them
    pub fn catalog(&self, limit: Option<usize>) -> Vec<CatalogEntry> {
        self.records
            .iter()
            .enumerate()
            .take(limit.unwrap_or(usize::MAX))
            .map(|(position, record)| CatalogEntry::new(position, record))
            .collect()
    }

    /// Retained products whose category starts with the browse path `name`
    pub fn catalog_in_category(&self, name: &str) -> Vec<CatalogEntry> {
        self.features
            .iter()
            .enumerate()
            .filter(|(_, features)| matches_category_path(&features.category, name))
            .map(|(position, _)| CatalogEntry::new(position, &self.records[position]))
            .collect()
    }

    /// Up to `count` products rated above [`FEATURED_MIN_RATING`], most
    /// reviewed first
    pub fn featured(&self, count: usize) -> Vec<CatalogEntry> {
        let mut candidates: Vec<usize> = (0..self.len())
            .filter(|&p| self.features[p].rating > FEATURED_MIN_RATING)
            .collect();
        candidates.sort_by(|&a, &b| {
            self.features[b]
                .rating_count
                .total_cmp(&self.features[a].rating_count)
                .then(a.cmp(&b))
        });
        candidates
            .into_iter()
            .take(count)
            .map(|position| CatalogEntry::new(position, &self.records[position]))
            .collect()
    }

    fn recommend_at(&self, position: usize) -> std::result::Result<RecommendationResponse, QueryError> {
        let query_record = &self.records[position];
        let query_category = &self.features[position].category;

        let recommendations = self
            .neighbors(position, self.top_k)?
            .into_iter()
            .map(|neighbor| {
                let same_category = self.features[neighbor.position].category == *query_category;
                Recommendation::new(
                    neighbor.position,
                    &self.records[neighbor.position],
                    neighbor.distance,
                    same_category,
                )
            })
            .collect();

        let response = RecommendationResponse {
            query_product: QueryProduct::new(position, query_record, query_category),
            recommendations,
        };
        debug!(
            "Recommended {} products for {} ({} in the same category)",
            response.recommendations.len(),
            query_record.product_id,
            response.same_category_count()
        );
        Ok(response)
    }
}
