//! Read-only catalog views over the retained population
//!
//! Category listings, product lookup and category browsing share the model's
//! immutable records, so they see exactly the products that can be
//! recommended.

use crate::record::ProductRecord;
use serde::Serialize;

/// Minimum cleaned rating for a product to be featured
pub const FEATURED_MIN_RATING: f64 = 4.4;

/// A category label and how many retained products carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// A retained product together with its ordinal position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub position: usize,
    #[serde(flatten)]
    pub product: ProductRecord,
}

impl CatalogEntry {
    pub fn new(position: usize, product: &ProductRecord) -> Self {
        Self {
            position,
            product: product.clone(),
        }
    }
}

/// Coarse department of a category path.
///
/// Takes the first `|` segment, cuts it at `&`, then keeps the leading word
/// of a CamelCase run: `Computers&Accessories|Cables` gives `Computers`,
/// `HomeImprovement|Lighting` gives `Home`.
pub fn top_level_category(category: &str) -> &str {
    let head = category.split('|').next().unwrap_or_default();
    let head = head.split('&').next().unwrap_or_default();
    let word_end = head
        .char_indices()
        .skip(1)
        .find(|(_, c)| c.is_uppercase())
        .map_or(head.len(), |(i, _)| i);
    &head[..word_end]
}

/// Whether `category` falls under the browse path `name`.
///
/// A space in `name` stands for either `&` or nothing, so both
/// `Computers Accessories` and `Home Improvement` find their departments.
pub fn matches_category_path(category: &str, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() {
        return false;
    }
    category.starts_with(&name.replacen(' ', "&", 1))
        || category.starts_with(&name.replacen(' ', "", 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_category() {
        assert_eq!(top_level_category("Computers&Accessories|Cables|USBCables"), "Computers");
        assert_eq!(top_level_category("HomeImprovement|Electrical"), "Home");
        assert_eq!(top_level_category("Electronics|Mobiles"), "Electronics");
        assert_eq!(top_level_category("Toys&Games"), "Toys");
        assert_eq!(top_level_category(""), "");
    }

    #[test]
    fn test_matches_category_path() {
        let cables = "Computers&Accessories|Cables|USBCables";
        assert!(matches_category_path(cables, "Computers Accessories"));
        assert!(matches_category_path(cables, "Computers"));
        assert!(matches_category_path("HomeImprovement|Electrical", "Home Improvement"));
        assert!(!matches_category_path(cables, "Electronics"));
        assert!(!matches_category_path(cables, "  "));
    }

    #[test]
    fn test_catalog_entry_flattens_record() {
        let record = ProductRecord::new("A", "Alpha", "X", "₹100", "₹120", "4.5", "10");
        let json = serde_json::to_value(CatalogEntry::new(3, &record)).unwrap();
        assert_eq!(json["position"], 3);
        assert_eq!(json["product_id"], "A");
        assert_eq!(json["discounted_price"], "₹100");
    }
}
