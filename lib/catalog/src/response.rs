//! Query output structures
//!
//! These are what callers of the recommendation service receive, serialized
//! as-is by the REST layer.

use crate::record::ProductRecord;
use recx_core::similarity_from_distance;
use serde::Serialize;

/// The product a recommendation query was made for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryProduct {
    pub position: usize,
    pub product_id: String,
    pub product_name: String,
    pub discounted_price: String,
    pub rating: String,
    /// Cleaned (trimmed) category
    pub category: String,
}

impl QueryProduct {
    pub fn new(position: usize, record: &ProductRecord, category: &str) -> Self {
        Self {
            position,
            product_id: record.product_id.clone(),
            product_name: record.product_name.clone(),
            discounted_price: record.discounted_price.clone(),
            rating: record.rating.clone(),
            category: category.to_string(),
        }
    }
}

/// One recommended product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub position: usize,
    pub product_id: String,
    pub product_name: String,
    pub discounted_price: String,
    pub actual_price: String,
    pub rating: String,
    pub rating_count: String,
    /// Raw category as it appears in the dataset
    pub category: String,
    pub img_link: String,
    pub same_category: bool,
    /// `1 / (1 + distance)`, rounded to 3 decimals
    pub similarity_score: f64,
    pub distance: f32,
}

impl Recommendation {
    pub fn new(position: usize, record: &ProductRecord, distance: f32, same_category: bool) -> Self {
        Self {
            position,
            product_id: record.product_id.clone(),
            product_name: record.product_name.clone(),
            discounted_price: record.discounted_price.clone(),
            actual_price: record.actual_price.clone(),
            rating: record.rating.clone(),
            rating_count: record.rating_count.clone(),
            category: record.category.clone(),
            img_link: record.img_link.clone(),
            same_category,
            similarity_score: similarity_score(distance),
            distance,
        }
    }
}

/// Display similarity for a raw distance, rounded to 3 decimals
pub fn similarity_score(distance: f32) -> f64 {
    let similarity = f64::from(similarity_from_distance(distance));
    (similarity * 1000.0).round() / 1000.0
}

/// Full answer to a recommendation query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResponse {
    pub query_product: QueryProduct,
    /// Ascending distance (descending similarity)
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationResponse {
    pub fn same_category_count(&self) -> usize {
        self.recommendations.iter().filter(|r| r.same_category).count()
    }
}
