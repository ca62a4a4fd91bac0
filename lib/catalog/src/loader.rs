//! CSV dataset loading

use crate::error::{CatalogError, Result};
use crate::record::ProductRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Load every product row from a CSV file with a header line.
///
/// Columns are matched by header name and extra columns are ignored.
/// Unparseable values are kept as-is; cleaning happens later.
pub fn load_products<P: AsRef<Path>>(path: P) -> Result<Vec<ProductRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CatalogError::DatasetMissing {
        path: path.to_path_buf(),
        source,
    })?;

    let records = load_products_from_reader(file)?;
    info!("Loaded {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// Load product rows from any CSV source
pub fn load_products_from_reader<R: Read>(reader: R) -> Result<Vec<ProductRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in reader.deserialize::<ProductRecord>() {
        records.push(row?);
    }
    Ok(records)
}
