//! Feature cleaning and category encoding
//!
//! Turns raw [`ProductRecord`]s into numeric [`CleanedFeatures`]. Rows with an
//! unusable price, rating, rating count or category are dropped before any
//! ordinal position is assigned, so positions in the output are dense.

use crate::record::ProductRecord;
use ahash::AHashMap;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Currency markers stripped from price strings
const CURRENCY_SYMBOLS: &[char] = &['₹', '$', '€', '£'];

/// Numeric features derived from one retained record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedFeatures {
    pub price: f64,
    pub rating: f64,
    /// Raw count; the log transform is applied by the scaler
    pub rating_count: f64,
    /// Trimmed category string
    pub category: String,
    pub category_code: u32,
}

/// Why a record was dropped. A record is attributed to the first rule it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    InvalidPrice,
    InvalidRating,
    InvalidRatingCount,
    MissingCategory,
}

/// Per-reason drop counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DropCounts {
    pub invalid_price: usize,
    pub invalid_rating: usize,
    pub invalid_rating_count: usize,
    pub missing_category: usize,
}

impl DropCounts {
    fn record(&mut self, reason: DropReason) {
        match reason {
            DropReason::InvalidPrice => self.invalid_price += 1,
            DropReason::InvalidRating => self.invalid_rating += 1,
            DropReason::InvalidRatingCount => self.invalid_rating_count += 1,
            DropReason::MissingCategory => self.missing_category += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.invalid_price + self.invalid_rating + self.invalid_rating_count + self.missing_category
    }
}

/// Summary of one cleaning pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub rows_read: usize,
    pub rows_retained: usize,
    pub rows_dropped: usize,
    pub dropped: DropCounts,
    pub category_count: usize,
}

/// Retained records with their aligned features
#[derive(Debug, Clone)]
pub struct FeatureSet {
    pub records: Vec<ProductRecord>,
    pub features: Vec<CleanedFeatures>,
    /// Distinct categories, index == category code
    pub categories: Vec<String>,
    pub report: BuildReport,
}

impl FeatureSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse a price like `₹1,099` into `1099.0`
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && !CURRENCY_SYMBOLS.contains(c))
        .collect();
    parse_finite(&cleaned).filter(|p| *p >= 0.0)
}

/// Parse a rating; anything non-numeric is treated as missing
pub fn parse_rating(raw: &str) -> Option<f64> {
    parse_finite(raw)
}

/// Parse a count like `24,269` into `24269.0`
pub fn parse_rating_count(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");
    parse_finite(&cleaned).filter(|c| *c >= 0.0)
}

/// Trim a category; blank categories are missing
pub fn clean_category(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Cleans records into features, in input order
#[derive(Debug, Clone, Default)]
pub struct FeatureBuilder;

impl FeatureBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Clean a single record, or report the first rule it fails
    pub fn clean(&self, record: &ProductRecord) -> Result<(f64, f64, f64, String), DropReason> {
        let price = parse_price(&record.discounted_price).ok_or(DropReason::InvalidPrice)?;
        let rating = parse_rating(&record.rating).ok_or(DropReason::InvalidRating)?;
        let rating_count =
            parse_rating_count(&record.rating_count).ok_or(DropReason::InvalidRatingCount)?;
        let category = clean_category(&record.category).ok_or(DropReason::MissingCategory)?;
        Ok((price, rating, rating_count, category.to_string()))
    }

    /// Clean every record, drop failures and encode categories
    pub fn build(&self, records: Vec<ProductRecord>) -> FeatureSet {
        let rows_read = records.len();
        let mut dropped = DropCounts::default();
        let mut retained = Vec::with_capacity(rows_read);
        let mut cleaned = Vec::with_capacity(rows_read);

        for record in records {
            match self.clean(&record) {
                Ok(values) => {
                    retained.push(record);
                    cleaned.push(values);
                }
                Err(reason) => {
                    debug!("Dropping product {:?}: {:?}", record.product_id, reason);
                    dropped.record(reason);
                }
            }
        }

        // Sorted distinct categories give a stable code per string within a run
        let categories: Vec<String> = cleaned
            .iter()
            .map(|(_, _, _, category)| category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let codes: AHashMap<&str, u32> = categories
            .iter()
            .enumerate()
            .map(|(code, category)| (category.as_str(), code as u32))
            .collect();

        let features: Vec<CleanedFeatures> = cleaned
            .into_iter()
            .map(|(price, rating, rating_count, category)| {
                let category_code = codes[category.as_str()];
                CleanedFeatures {
                    price,
                    rating,
                    rating_count,
                    category,
                    category_code,
                }
            })
            .collect();

        let report = BuildReport {
            rows_read,
            rows_retained: retained.len(),
            rows_dropped: dropped.total(),
            dropped,
            category_count: categories.len(),
        };

        info!(
            "Cleaned {} rows: {} retained, {} categories",
            report.rows_read, report.rows_retained, report.category_count
        );
        if report.rows_dropped > 0 {
            warn!(
                "Dropped {} rows with unusable fields ({:?})",
                report.rows_dropped, report.dropped
            );
        }

        FeatureSet {
            records: retained,
            features,
            categories,
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, price: &str, rating: &str, count: &str, category: &str) -> ProductRecord {
        ProductRecord::new(id, format!("Product {}", id), category, price, price, rating, count)
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("₹1,099"), Some(1099.0));
        assert_eq!(parse_price(" ₹399.50 "), Some(399.5));
        assert_eq!(parse_price("$12"), Some(12.0));
        assert_eq!(parse_price("₹"), None);
        assert_eq!(parse_price("free"), None);
        assert_eq!(parse_price("-5"), None);
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("4.2"), Some(4.2));
        assert_eq!(parse_rating(" 3 "), Some(3.0));
        assert_eq!(parse_rating("|"), None);
        assert_eq!(parse_rating(""), None);
        assert_eq!(parse_rating("NaN"), None);
    }

    #[test]
    fn test_parse_rating_count() {
        assert_eq!(parse_rating_count("24,269"), Some(24269.0));
        assert_eq!(parse_rating_count("0"), Some(0.0));
        assert_eq!(parse_rating_count(""), None);
        assert_eq!(parse_rating_count("many"), None);
        assert_eq!(parse_rating_count("inf"), None);
    }

    #[test]
    fn test_clean_category() {
        assert_eq!(clean_category("  Home|Kitchen  "), Some("Home|Kitchen"));
        assert_eq!(clean_category("   "), None);
    }

    #[test]
    fn test_build_drops_and_preserves_order() {
        let records = vec![
            record("a", "₹100", "4.5", "1,000", "X"),
            record("b", "n/a", "4.0", "10", "X"),
            record("c", "₹50", "|", "10", "Y"),
            record("d", "₹75", "3.9", "", "Y"),
            record("e", "₹20", "4.1", "5", "  "),
            record("f", "₹30", "2.0", "7", " Y "),
        ];
        let set = FeatureBuilder::new().build(records);

        let ids: Vec<&str> = set.records.iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "f"]);
        assert_eq!(set.features.len(), set.records.len());
        assert_eq!(set.features[0].rating_count, 1000.0);
        assert_eq!(set.features[1].category, "Y");

        assert_eq!(set.report.rows_read, 6);
        assert_eq!(set.report.rows_retained, 2);
        assert_eq!(set.report.rows_dropped, 4);
        assert_eq!(
            set.report.dropped,
            DropCounts {
                invalid_price: 1,
                invalid_rating: 1,
                invalid_rating_count: 1,
                missing_category: 1,
            }
        );
    }

    #[test]
    fn test_every_dropped_record_fails_a_rule() {
        let builder = FeatureBuilder::new();
        let records = vec![
            record("a", "₹100", "4.5", "10", "X"),
            record("b", "₹abc", "4.5", "10", "X"),
            record("c", "₹100", "", "10", "X"),
        ];
        let set = builder.build(records.clone());
        assert!(set.len() <= records.len());
        for r in &records {
            let kept = set.records.iter().any(|k| k.product_id == r.product_id);
            assert_eq!(kept, builder.clean(r).is_ok());
        }
    }

    #[test]
    fn test_category_codes_sorted_and_stable() {
        let records = vec![
            record("a", "1", "1", "1", "Zeta"),
            record("b", "1", "1", "1", "Alpha"),
            record("c", "1", "1", "1", "Mid"),
            record("d", "1", "1", "1", "Alpha"),
        ];
        let set = FeatureBuilder::new().build(records);
        assert_eq!(set.categories, vec!["Alpha", "Mid", "Zeta"]);
        let codes: Vec<u32> = set.features.iter().map(|f| f.category_code).collect();
        assert_eq!(codes, vec![2, 0, 1, 0]);
        assert_eq!(set.report.category_count, 3);
    }

    #[test]
    fn test_retained_features_are_finite() {
        let records = vec![
            record("a", "₹1,299", "4.3", "12,000", "A"),
            record("b", "₹0", "0", "0", "B"),
        ];
        let set = FeatureBuilder::new().build(records);
        for f in &set.features {
            assert!(f.price.is_finite() && f.price >= 0.0);
            assert!(f.rating.is_finite());
            assert!(f.rating_count.is_finite() && f.rating_count >= 0.0);
        }
    }
}
