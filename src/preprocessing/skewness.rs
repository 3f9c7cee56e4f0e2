//! Skewness correction with per-column Box-Cox or Yeo-Johnson transforms
//!
//! [`PowerTransformer`] estimates one lambda per column during `fit` and
//! applies the forward transform with the stored lambdas in `transform`.
//! Column estimation is independent, so it fans out over a worker pool
//! when `n_jobs != 1`.

use super::config::PowerTransformConfig;
use super::estimator::PowerMethod;
use super::validation::{
    assert_all_finite, check_dataframe, column_names, column_values, validate_multiple_rows,
    validate_test_set_columns, TableInput,
};
use crate::error::{Result, SkewError};
use crate::utils::{try_parallel_map, ParallelConfig};
use ndarray::Array2;
use polars::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

/// Lambdas estimated by one `fit` call, in resolved column order
#[derive(Debug, Clone, PartialEq)]
pub struct FittedPowerModel {
    method: PowerMethod,
    columns: Vec<String>,
    lambdas: Vec<f64>,
}

impl FittedPowerModel {
    /// Transform variant the lambdas belong to
    pub fn method(&self) -> PowerMethod {
        self.method
    }

    /// Fit-time column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Estimated lambdas, parallel to [`columns`](Self::columns)
    pub fn lambdas(&self) -> &[f64] {
        &self.lambdas
    }

    /// Lambda fitted for `column`
    pub fn lambda_for(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.lambdas[i])
    }

    /// `(column, lambda)` pairs in fit order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.columns
            .iter()
            .map(|c| c.as_str())
            .zip(self.lambdas.iter().copied())
    }

    /// Number of fitted columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no column was fitted
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Output of [`PowerTransformer::transform`]
#[derive(Debug, Clone)]
pub enum TransformOutput {
    /// Labelled frame (`as_df = true`)
    Frame(DataFrame),
    /// Row-major values of every column (`as_df = false`)
    Matrix(Array2<f64>),
}

impl TransformOutput {
    /// The frame, if this is frame output
    pub fn into_frame(self) -> Option<DataFrame> {
        match self {
            TransformOutput::Frame(df) => Some(df),
            TransformOutput::Matrix(_) => None,
        }
    }

    /// The matrix, if this is matrix output
    pub fn into_matrix(self) -> Option<Array2<f64>> {
        match self {
            TransformOutput::Matrix(m) => Some(m),
            TransformOutput::Frame(_) => None,
        }
    }
}

/// Box-Cox / Yeo-Johnson skewness transformer
#[derive(Debug, Clone)]
pub struct PowerTransformer {
    config: PowerTransformConfig,
    fitted: Option<FittedPowerModel>,
}

impl PowerTransformer {
    /// Create a transformer from a configuration
    pub fn new(config: PowerTransformConfig) -> Self {
        Self {
            config,
            fitted: None,
        }
    }

    /// Box-Cox transformer with default settings
    pub fn box_cox() -> Self {
        Self::new(PowerTransformConfig::box_cox())
    }

    /// Yeo-Johnson transformer with default settings
    pub fn yeo_johnson() -> Self {
        Self::new(PowerTransformConfig::yeo_johnson())
    }

    /// Active configuration
    pub fn config(&self) -> &PowerTransformConfig {
        &self.config
    }

    /// Whether `fit` has succeeded at least once
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// The fitted model, if `fit` has succeeded
    pub fn fitted(&self) -> Option<&FittedPowerModel> {
        self.fitted.as_ref()
    }

    /// Fitted lambdas, in fit column order
    pub fn lambdas(&self) -> Option<&[f64]> {
        self.fitted.as_ref().map(|m| m.lambdas())
    }

    /// Fit-time columns
    pub fn fit_columns(&self) -> Option<&[String]> {
        self.fitted.as_ref().map(|m| m.columns())
    }

    /// Estimate one lambda per target column.
    ///
    /// All validation happens before estimation. On error the previously
    /// fitted model, if any, is kept.
    pub fn fit<'a>(&mut self, data: impl Into<TableInput<'a>>) -> Result<&mut Self> {
        let start = Instant::now();
        self.config.validate()?;

        let method = self.config.method;
        let (df, columns) = check_dataframe(data.into(), self.config.columns.as_deref(), true)?;
        validate_multiple_rows(method.name(), &df)?;
        let workers = ParallelConfig::new(self.config.n_jobs).num_workers()?;

        let tasks: Vec<(&str, Vec<f64>)> = columns
            .iter()
            .map(|name| column_values(&df, name).map(|values| (name.as_str(), values)))
            .collect::<Result<_>>()?;

        let lambdas = try_parallel_map(&tasks, workers, |(name, values)| {
            let lambda = method.estimate(values).map_err(|e| e.in_column(name))?;
            debug!(column = %name, lambda, "estimated lambda");
            Ok(lambda)
        })?;

        info!(
            transformer = method.name(),
            n_columns = columns.len(),
            n_rows = df.height(),
            workers,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "fit complete"
        );

        self.fitted = Some(FittedPowerModel {
            method,
            columns,
            lambdas,
        });
        Ok(self)
    }

    /// Apply the fitted transform to a copy of `data`.
    ///
    /// Fit columns are replaced by their transformed values; all other
    /// columns pass through unchanged.
    pub fn transform<'a>(&self, data: impl Into<TableInput<'a>>) -> Result<TransformOutput> {
        let start = Instant::now();
        let model = self.fitted.as_ref().ok_or(SkewError::ModelNotFitted)?;

        let (mut result, _) = check_dataframe(data.into(), self.config.columns.as_deref(), false)?;
        validate_test_set_columns(&model.columns, &column_names(&result))?;
        assert_all_finite(&result, &model.columns)?;

        let replacements: Vec<Series> = model
            .iter()
            .map(|(name, lambda)| {
                column_values(&result, name)
                    .map(|values| Series::new(name.into(), model.method.apply(&values, lambda)))
            })
            .collect::<Result<_>>()?;

        for series in replacements {
            result.with_column(series)?;
        }

        debug!(
            n_columns = model.len(),
            n_rows = result.height(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "transform complete"
        );

        if self.config.as_df {
            Ok(TransformOutput::Frame(result))
        } else {
            Ok(TransformOutput::Matrix(to_matrix(&result)?))
        }
    }

    /// Fit and transform in one step
    pub fn fit_transform<'a>(&mut self, data: impl Into<TableInput<'a>>) -> Result<TransformOutput> {
        let input: TableInput<'a> = data.into();
        self.fit(input)?;
        self.transform(input)
    }
}

/// Stack every column of a numeric frame into a row-major matrix.
fn to_matrix(df: &DataFrame) -> Result<Array2<f64>> {
    let columns: Vec<Vec<f64>> = column_names(df)
        .iter()
        .map(|name| column_values(df, name))
        .collect::<Result<_>>()?;

    Ok(Array2::from_shape_fn((df.height(), columns.len()), |(i, j)| {
        columns[j][i]
    }))
}
