//! Feature scaling
//!
//! Maps cleaned features into the weighted metric space:
//!
//! 1. `rating_count` becomes `ln(1 + rating_count)`
//! 2. `price` becomes `max_price - price`, so cheap items sit together at the
//!    high end of the axis
//! 3. every column is standardized with population mean and std
//! 4. every column is multiplied by its weight
//!
//! A column with zero variance (std at or below `1e-12`) cannot be
//! standardized; it is centered to all zeros instead and reported in
//! [`ScalerStats`].

use crate::error::{CatalogError, Result};
use crate::features::CleanedFeatures;
use crate::weights::{FeatureColumn, FeatureWeights};
use recx_core::Vector;
use serde::Serialize;
use tracing::{debug, warn};

/// Standard deviation at or below which a column counts as constant
const DEGENERATE_STD: f64 = 1e-12;

/// Fitted statistics of one column (after log transform / inversion)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: FeatureColumn,
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
    /// True when the column had no variance and was zeroed
    pub degenerate: bool,
}

/// Statistics fitted over the retained population
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalerStats {
    pub max_price: f64,
    pub columns: Vec<ColumnStats>,
}

impl ScalerStats {
    pub fn degenerate_columns(&self) -> Vec<FeatureColumn> {
        self.columns
            .iter()
            .filter(|c| c.degenerate)
            .map(|c| c.column)
            .collect()
    }
}

/// Standardizes and weights cleaned features
#[derive(Debug, Clone)]
pub struct FeatureScaler {
    weights: FeatureWeights,
}

impl FeatureScaler {
    pub fn new(weights: FeatureWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }

    /// Column-major values after log transform and price inversion
    fn prepared_columns(&self, features: &[CleanedFeatures]) -> (Vec<Vec<f64>>, f64) {
        let max_price = features
            .iter()
            .map(|f| f.price)
            .fold(f64::NEG_INFINITY, f64::max);

        let columns = self
            .weights
            .columns()
            .into_iter()
            .map(|column| {
                features
                    .iter()
                    .map(|f| {
                        let value = column.extract(f);
                        match column {
                            FeatureColumn::Price => max_price - value,
                            FeatureColumn::RatingCount => value.ln_1p(),
                            _ => value,
                        }
                    })
                    .collect()
            })
            .collect();

        (columns, max_price)
    }

    /// Standardized, unweighted columns (column-major) and their statistics
    pub fn standardized_columns(
        &self,
        features: &[CleanedFeatures],
    ) -> Result<(Vec<Vec<f64>>, ScalerStats)> {
        if features.is_empty() {
            return Err(CatalogError::EmptyPopulation { rows_read: 0 });
        }

        let (mut columns, max_price) = self.prepared_columns(features);
        let n = features.len() as f64;
        let mut stats = Vec::with_capacity(columns.len());

        for (column, values) in self.weights.columns().into_iter().zip(columns.iter_mut()) {
            let mean = values.iter().sum::<f64>() / n;
            // Population variance (divide by n)
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            let std = variance.sqrt();
            let degenerate = std <= DEGENERATE_STD;

            if degenerate {
                warn!(
                    "Column '{}' has zero variance (mean {:.4}); using 0.0 for every row",
                    column.name(),
                    mean
                );
                values.iter_mut().for_each(|v| *v = 0.0);
            } else {
                values.iter_mut().for_each(|v| *v = (*v - mean) / std);
            }

            debug!("Column '{}': mean={:.4} std={:.4}", column.name(), mean, std);
            stats.push(ColumnStats {
                column,
                mean,
                std,
                degenerate,
            });
        }

        Ok((
            columns,
            ScalerStats {
                max_price,
                columns: stats,
            },
        ))
    }

    /// Produce one weighted vector per record, in input order
    pub fn fit_transform(&self, features: &[CleanedFeatures]) -> Result<(Vec<Vector>, ScalerStats)> {
        self.weights.validate()?;
        let (columns, stats) = self.standardized_columns(features)?;
        let weights = self.weights.as_vec();
        let column_ids = self.weights.columns();

        let mut vectors = Vec::with_capacity(features.len());
        for row in 0..features.len() {
            let standardized = Vector::new(columns.iter().map(|values| values[row] as f32).collect());
            let weighted = standardized.hadamard(&weights)?;
            if !weighted.is_finite() {
                let c = weighted
                    .as_slice()
                    .iter()
                    .position(|v| !v.is_finite())
                    .unwrap_or(0);
                return Err(CatalogError::NonFiniteFeature {
                    row,
                    column: column_ids[c].name(),
                });
            }
            vectors.push(weighted);
        }

        Ok((vectors, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(rows: &[(f64, f64, f64, u32)]) -> Vec<CleanedFeatures> {
        rows.iter()
            .map(|&(price, rating, rating_count, category_code)| CleanedFeatures {
                price,
                rating,
                rating_count,
                category: format!("cat-{}", category_code),
                category_code,
            })
            .collect()
    }

    fn sample() -> Vec<CleanedFeatures> {
        features(&[
            (100.0, 4.5, 10.0, 0),
            (110.0, 4.4, 12.0, 0),
            (5000.0, 2.0, 1.0, 1),
            (250.0, 3.9, 1500.0, 2),
            (999.0, 4.1, 80.0, 1),
        ])
    }

    #[test]
    fn test_standardized_columns_have_zero_mean_unit_std() {
        let scaler = FeatureScaler::new(FeatureWeights::with_category());
        let (columns, stats) = scaler.standardized_columns(&sample()).unwrap();

        assert_eq!(columns.len(), 4);
        assert!(stats.degenerate_columns().is_empty());
        for values in &columns {
            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;
            let std = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
            assert!(mean.abs() < 1e-9, "mean {}", mean);
            assert!((std - 1.0).abs() < 1e-9, "std {}", std);
        }
    }

    #[test]
    fn test_price_inverted_and_count_logged() {
        let scaler = FeatureScaler::new(FeatureWeights::with_category());
        let (_, stats) = scaler.standardized_columns(&sample()).unwrap();

        assert_eq!(stats.max_price, 5000.0);
        // Inverted prices: 4900, 4890, 0, 4750, 4001
        let expected_mean = (4900.0 + 4890.0 + 0.0 + 4750.0 + 4001.0) / 5.0;
        assert!((stats.columns[0].mean - expected_mean).abs() < 1e-9);

        let logged: f64 = [10.0f64, 12.0, 1.0, 1500.0, 80.0].iter().map(|c| c.ln_1p()).sum();
        assert!((stats.columns[2].mean - logged / 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_cheaper_items_score_higher_on_price_axis() {
        let scaler = FeatureScaler::new(FeatureWeights::with_category());
        let (vectors, _) = scaler.fit_transform(&sample()).unwrap();
        assert!(vectors[0].as_slice()[0] > vectors[2].as_slice()[0]);
    }

    #[test]
    fn test_weights_applied() {
        let scaler = FeatureScaler::new(FeatureWeights::with_category());
        let data = sample();
        let (columns, _) = scaler.standardized_columns(&data).unwrap();
        let (vectors, _) = scaler.fit_transform(&data).unwrap();

        let weights = FeatureWeights::with_category().as_vec();
        for (row, vector) in vectors.iter().enumerate() {
            assert_eq!(vector.dim(), 4);
            for c in 0..4 {
                let expected = columns[c][row] as f32 * weights[c];
                assert!((vector.as_slice()[c] - expected).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_without_category_has_three_dims() {
        let scaler = FeatureScaler::new(FeatureWeights::without_category());
        let (vectors, stats) = scaler.fit_transform(&sample()).unwrap();
        assert!(vectors.iter().all(|v| v.dim() == 3));
        assert_eq!(stats.columns.len(), 3);
    }

    #[test]
    fn test_degenerate_column_is_zeroed() {
        let data = features(&[
            (100.0, 4.0, 10.0, 0),
            (200.0, 4.0, 20.0, 0),
            (300.0, 4.0, 30.0, 0),
        ]);
        let scaler = FeatureScaler::new(FeatureWeights::with_category());
        let (vectors, stats) = scaler.fit_transform(&data).unwrap();

        assert_eq!(
            stats.degenerate_columns(),
            vec![FeatureColumn::Rating, FeatureColumn::Category]
        );
        for v in &vectors {
            assert!(v.is_finite());
            assert_eq!(v.as_slice()[1], 0.0);
            assert_eq!(v.as_slice()[3], 0.0);
        }
    }

    #[test]
    fn test_small_spread_at_large_magnitude_is_kept() {
        let data = features(&[
            (100.0, 1e6, 10.0, 0),
            (200.0, 1e6 + 0.0005, 20.0, 1),
            (300.0, 1e6 + 0.001, 30.0, 2),
        ]);
        let scaler = FeatureScaler::new(FeatureWeights::with_category());
        let (columns, stats) = scaler.standardized_columns(&data).unwrap();

        assert!(stats.degenerate_columns().is_empty());
        assert!(columns[1][0] < 0.0 && columns[1][2] > 0.0);
    }

    #[test]
    fn test_single_row_is_fully_degenerate() {
        let data = features(&[(42.0, 3.0, 7.0, 0)]);
        let scaler = FeatureScaler::new(FeatureWeights::with_category());
        let (vectors, stats) = scaler.fit_transform(&data).unwrap();
        assert_eq!(stats.degenerate_columns().len(), 4);
        assert_eq!(vectors[0].as_slice(), &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_population_rejected() {
        let scaler = FeatureScaler::new(FeatureWeights::default());
        assert!(matches!(
            scaler.fit_transform(&[]),
            Err(CatalogError::EmptyPopulation { .. })
        ));
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let mut weights = FeatureWeights::default();
        weights.price = -1.0;
        let scaler = FeatureScaler::new(weights);
        assert!(matches!(
            scaler.fit_transform(&sample()),
            Err(CatalogError::InvalidWeights(_))
        ));
    }
}
