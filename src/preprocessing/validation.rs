//! Input validation for the skewness transformers
//!
//! Coerces inputs to a frame, resolves the target columns and enforces the
//! finiteness, row-count and test-set column checks. Every check runs
//! before any numeric work starts.

use crate::error::{Result, SkewError};
use ndarray::{Array2, ArrayView2};
use polars::prelude::*;
use std::collections::HashSet;

/// Data accepted by `fit` and `transform`
#[derive(Debug, Clone, Copy)]
pub enum TableInput<'a> {
    /// A labelled frame
    Frame(&'a DataFrame),
    /// A bare matrix; columns are named `"0"`, `"1"`, ...
    Matrix(ArrayView2<'a, f64>),
    /// Row records; every row must have the same length
    Records(&'a [Vec<f64>]),
}

impl<'a> From<&'a DataFrame> for TableInput<'a> {
    fn from(df: &'a DataFrame) -> Self {
        TableInput::Frame(df)
    }
}

impl<'a> From<&'a Array2<f64>> for TableInput<'a> {
    fn from(matrix: &'a Array2<f64>) -> Self {
        TableInput::Matrix(matrix.view())
    }
}

impl<'a> From<ArrayView2<'a, f64>> for TableInput<'a> {
    fn from(matrix: ArrayView2<'a, f64>) -> Self {
        TableInput::Matrix(matrix)
    }
}

impl<'a> From<&'a [Vec<f64>]> for TableInput<'a> {
    fn from(records: &'a [Vec<f64>]) -> Self {
        TableInput::Records(records)
    }
}

impl<'a> From<&'a Vec<Vec<f64>>> for TableInput<'a> {
    fn from(records: &'a Vec<Vec<f64>>) -> Self {
        TableInput::Records(records.as_slice())
    }
}

impl TableInput<'_> {
    /// Whether the input already carries column labels
    pub fn is_frame(&self) -> bool {
        matches!(self, TableInput::Frame(_))
    }

    /// Copy the input into a frame
    pub fn to_frame(&self) -> Result<DataFrame> {
        match self {
            TableInput::Frame(df) => Ok((*df).clone()),
            TableInput::Matrix(matrix) => {
                let columns: Vec<Column> = matrix
                    .columns()
                    .into_iter()
                    .enumerate()
                    .map(|(j, col)| Series::new(j.to_string().into(), col.to_vec()).into())
                    .collect();
                Ok(DataFrame::new(columns)?)
            }
            TableInput::Records(records) => {
                let width = records.first().map_or(0, |row| row.len());
                if let Some((i, row)) = records.iter().enumerate().find(|(_, r)| r.len() != width) {
                    return Err(SkewError::StructuralError(format!(
                        "record {} has {} values, expected {}",
                        i,
                        row.len(),
                        width
                    )));
                }
                let columns: Vec<Column> = (0..width)
                    .map(|j| {
                        let values: Vec<f64> = records.iter().map(|row| row[j]).collect();
                        Series::new(j.to_string().into(), values).into()
                    })
                    .collect();
                Ok(DataFrame::new(columns)?)
            }
        }
    }
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Names of all columns, in frame order
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}

/// Names of the integer and float columns, in frame order
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|c| is_numeric(c.dtype()))
        .map(|c| c.name().to_string())
        .collect()
}

/// Values of a numeric column as `f64`; nulls read as NaN.
///
/// Integer and `Float32` columns are cast on read; the frame itself is not
/// modified.
pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .map_err(|_| SkewError::SchemaError(format!("column '{}' not found", name)))?;
    if !is_numeric(column.dtype()) {
        return Err(SkewError::StructuralError(format!("column '{}' is not numeric", name)));
    }
    let casted = column.cast(&DataType::Float64)?;
    let ca = casted.as_materialized_series().f64()?;
    Ok(ca.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// Fail with `NonFiniteValue` if any listed column holds NaN, infinity or null.
pub fn assert_all_finite(df: &DataFrame, columns: &[String]) -> Result<()> {
    for name in columns {
        let values = column_values(df, name)?;
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SkewError::NonFiniteValue(name.clone()));
        }
    }
    Ok(())
}

/// Coerce `input` to a frame and resolve the columns to work on.
///
/// Returns a copy of the data with every column dtype preserved, and the
/// resolved column list: `columns` when given, otherwise every numeric
/// column. Explicit columns are only allowed for frame inputs.
pub fn check_dataframe(
    input: TableInput<'_>,
    columns: Option<&[String]>,
    require_finite: bool,
) -> Result<(DataFrame, Vec<String>)> {
    if columns.is_some() && !input.is_frame() {
        return Err(SkewError::StructuralError(
            "explicit columns require a DataFrame input; pass columns = None for matrix or record input"
                .to_string(),
        ));
    }

    let df = input.to_frame()?;

    let resolved = match columns {
        Some(requested) => {
            let present: HashSet<String> = column_names(&df).into_iter().collect();
            let missing: Vec<&String> = requested.iter().filter(|c| !present.contains(*c)).collect();
            if !missing.is_empty() {
                return Err(SkewError::SchemaError(format!(
                    "columns {:?} not present in data (columns = {:?})",
                    missing,
                    column_names(&df)
                )));
            }

            let mut seen = HashSet::new();
            if let Some(dup) = requested.iter().find(|c| !seen.insert(c.as_str())) {
                return Err(SkewError::InvalidParameter {
                    name: "columns".to_string(),
                    value: dup.clone(),
                    reason: "column listed more than once".to_string(),
                });
            }

            for name in requested {
                if !is_numeric(df.column(name)?.dtype()) {
                    return Err(SkewError::StructuralError(format!(
                        "column '{}' is not numeric",
                        name
                    )));
                }
            }
            requested.to_vec()
        }
        None => numeric_columns(&df),
    };

    if require_finite {
        assert_all_finite(&df, &resolved)?;
    }

    Ok((df, resolved))
}

/// Require at least two rows, as needed for a sample variance.
pub fn validate_multiple_rows(transformer: &str, df: &DataFrame) -> Result<()> {
    let n_samples = df.height();
    if n_samples < 2 {
        return Err(SkewError::InsufficientData {
            transformer: transformer.to_string(),
            required: 2,
            got: n_samples,
        });
    }
    Ok(())
}

/// Require every fit-time column to be present at transform time.
pub fn validate_test_set_columns(fit_columns: &[String], test_columns: &[String]) -> Result<()> {
    let present: HashSet<&str> = test_columns.iter().map(|s| s.as_str()).collect();
    let missing: Vec<&String> = fit_columns
        .iter()
        .filter(|c| !present.contains(c.as_str()))
        .collect();
    if !missing.is_empty() {
        return Err(SkewError::SchemaError(format!(
            "fit columns {:?} missing from test data (present = {:?})",
            missing, test_columns
        )));
    }
    Ok(())
}
