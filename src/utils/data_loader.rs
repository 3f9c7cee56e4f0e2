//! Data loading utilities

use crate::error::{Result, SkewError};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Load a CSV file with a header row
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|e| SkewError::DataError(e.to_string()))?;

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(1000))
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|e| SkewError::DataError(e.to_string()))
}

/// Load a Parquet file
pub fn load_parquet(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|e| SkewError::DataError(e.to_string()))?;

    ParquetReader::new(file)
        .finish()
        .map_err(|e| SkewError::DataError(e.to_string()))
}

/// Load a JSON file
pub fn load_json(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|e| SkewError::DataError(e.to_string()))?;

    JsonReader::new(file)
        .finish()
        .map_err(|e| SkewError::DataError(e.to_string()))
}

/// Detect file format from extension and load
pub fn load_auto(path: &Path) -> Result<DataFrame> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        _ => load_csv(path),
    }
}

/// Save a frame as CSV
pub fn save_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|e| SkewError::DataError(e.to_string()))?;

    CsvWriter::new(&mut file)
        .finish(df)
        .map_err(|e| SkewError::DataError(e.to_string()))
}
