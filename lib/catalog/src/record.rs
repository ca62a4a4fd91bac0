//! Raw catalog rows as they appear in the dataset

use serde::{Deserialize, Serialize};

/// One catalog entry, exactly as read from the dataset.
///
/// Price, rating and count fields stay as the raw display strings; the
/// numeric forms live in [`CleanedFeatures`](crate::features::CleanedFeatures).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: String,
    pub product_name: String,
    /// Free-text hierarchical category, e.g. `Electronics|Mobiles|Cases`
    pub category: String,
    /// Currency-prefixed, thousands-separated, e.g. `₹1,099`
    pub discounted_price: String,
    pub actual_price: String,
    #[serde(default)]
    pub discount_percentage: String,
    pub rating: String,
    #[serde(default)]
    pub rating_count: String,
    #[serde(default)]
    pub img_link: String,
    #[serde(default)]
    pub product_link: String,
}

impl ProductRecord {
    /// Convenience constructor for the fields the pipeline reads
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        category: impl Into<String>,
        discounted_price: impl Into<String>,
        actual_price: impl Into<String>,
        rating: impl Into<String>,
        rating_count: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            category: category.into(),
            discounted_price: discounted_price.into(),
            actual_price: actual_price.into(),
            discount_percentage: String::new(),
            rating: rating.into(),
            rating_count: rating_count.into(),
            img_link: String::new(),
            product_link: String::new(),
        }
    }

    /// Set the image reference
    pub fn with_image(mut self, img_link: impl Into<String>) -> Self {
        self.img_link = img_link.into();
        self
    }
}
