//! Integration test: skewness transformers end-to-end

use kolosal_skew::prelude::*;
use kolosal_skew::preprocessing::{box_cox, yeo_johnson, DEFAULT_MIN_VALUE};
use ndarray::array;
use polars::prelude::*;

fn skewed_df() -> DataFrame {
    df!(
        "income" => &[1.0, 2.0, 3.0, 4.0, 5.0, 100.0],
        "delta" => &[-5.0, -1.0, 0.0, 1.0, 5.0, 2.0],
        "visits" => &[1i64, 1, 2, 3, 8, 40],
        "clicks" => &[0.5, 0.25, 4.0, 8.0, 16.0, 64.0],
        "region" => &["n", "s", "e", "w", "n", "s"],
    )
    .unwrap()
}

fn values(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect()
}

#[test]
fn test_box_cox_on_skewed_column() {
    let df = df!("x" => &[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
    let mut transformer = PowerTransformer::box_cox();
    transformer.fit(&df).unwrap();

    let lambda = transformer.lambdas().unwrap()[0];
    assert!(lambda.is_finite());
    assert!(lambda < 1.0, "right-skewed data should shrink, got {}", lambda);

    // constant data at transform time is fine: no variance or row checks
    let flat = df!("x" => &[5.0, 5.0, 5.0, 5.0, 5.0]).unwrap();
    let first = transformer.transform(&flat).unwrap().into_frame().unwrap();
    let second = transformer.transform(&flat).unwrap().into_frame().unwrap();
    let out = values(&first, "x");
    assert_eq!(out.len(), 5);
    assert!(out.iter().all(|v| *v == out[0]));
    assert!(first.equals(&second));
}

#[test]
fn test_yeo_johnson_on_symmetric_column() {
    let df = df!("x" => &[-5.0, -1.0, 0.0, 1.0, 5.0]).unwrap();
    let mut transformer = PowerTransformer::yeo_johnson();
    let out = transformer.fit_transform(&df).unwrap().into_frame().unwrap();

    let lambda = transformer.lambdas().unwrap()[0];
    assert!(lambda.is_finite());
    assert_eq!(values(&out, "x")[2], 0.0);
}

#[test]
fn test_default_columns_skip_text() {
    let df = skewed_df();
    let mut transformer = PowerTransformer::yeo_johnson();
    let out = transformer.fit_transform(&df).unwrap().into_frame().unwrap();

    assert_eq!(
        transformer.fit_columns().unwrap(),
        &["income", "delta", "visits", "clicks"].map(String::from)
    );
    assert_eq!(out.get_column_names(), df.get_column_names());
    assert_eq!(out.column("visits").unwrap().dtype(), &DataType::Float64);
    assert!(out
        .column("region")
        .unwrap()
        .as_materialized_series()
        .equals(df.column("region").unwrap().as_materialized_series()));
}

#[test]
fn test_transform_matches_direct_formula() {
    let df = skewed_df();
    let config = PowerTransformConfig::box_cox().with_columns(["income", "clicks"]);
    let mut transformer = PowerTransformer::new(config);
    let out = transformer.fit_transform(&df).unwrap().into_frame().unwrap();

    let model = transformer.fitted().unwrap();
    for (name, lambda) in model.iter() {
        let expected = box_cox(&values(&df, name), lambda, DEFAULT_MIN_VALUE);
        assert_eq!(values(&out, name), expected);
    }
    // untouched numeric column keeps its values
    assert_eq!(values(&out, "delta"), values(&df, "delta"));
}

#[test]
fn test_box_cox_floors_non_positive_values() {
    let df = df!("delta" => &[-5.0, -1.0, 0.0, 1.0, 5.0, 2.0]).unwrap();
    let mut transformer = PowerTransformer::box_cox();
    let out = transformer.fit_transform(&df).unwrap().into_frame().unwrap();

    let lambda = transformer.lambdas().unwrap()[0];
    assert!(lambda.is_finite());
    let out = values(&out, "delta");
    assert!(out.iter().all(|v| v.is_finite()));
    // -5, -1 and 0 share the floor
    assert_eq!(out[0], out[1]);
    assert_eq!(out[1], out[2]);
}

#[test]
fn test_parallel_matches_sequential() {
    let df = skewed_df();

    let mut sequential = PowerTransformer::new(PowerTransformConfig::yeo_johnson().with_n_jobs(1));
    let mut parallel = PowerTransformer::new(PowerTransformConfig::yeo_johnson().with_n_jobs(4));
    let mut all = PowerTransformer::new(PowerTransformConfig::yeo_johnson().with_n_jobs(-1));

    sequential.fit(&df).unwrap();
    parallel.fit(&df).unwrap();
    all.fit(&df).unwrap();

    assert_eq!(sequential.fitted(), parallel.fitted());
    assert_eq!(sequential.fitted(), all.fitted());
}

#[test]
fn test_repeated_transform_is_identical() {
    let df = skewed_df();
    let mut transformer = PowerTransformer::yeo_johnson();
    transformer.fit(&df).unwrap();

    let a = transformer.transform(&df).unwrap().into_frame().unwrap();
    let b = transformer.transform(&df).unwrap().into_frame().unwrap();
    assert!(a.equals(&b));

    let expected = yeo_johnson(&values(&df, "delta"), transformer.fitted().unwrap().lambda_for("delta").unwrap());
    assert_eq!(values(&a, "delta"), expected);
}

#[test]
fn test_transform_before_fit_errors() {
    let err = PowerTransformer::yeo_johnson().transform(&skewed_df()).unwrap_err();
    assert!(matches!(err, SkewError::ModelNotFitted));
    assert_eq!(err.to_string(), "Model not fitted");
}

#[test]
fn test_missing_column_errors() {
    let df = skewed_df();
    let config = PowerTransformConfig::yeo_johnson().with_columns(["income", "age"]);
    let err = PowerTransformer::new(config).fit(&df).unwrap_err();
    assert!(matches!(err, SkewError::SchemaError(_)));

    // fit columns must be present at transform time
    let config = PowerTransformConfig::yeo_johnson().with_columns(["income"]);
    let mut transformer = PowerTransformer::new(config);
    transformer.fit(&df).unwrap();
    let other = df!("delta" => &[1.0, 2.0]).unwrap();
    let err = transformer.transform(&other).unwrap_err();
    assert!(matches!(err, SkewError::SchemaError(_)));
}

#[test]
fn test_single_row_is_insufficient() {
    let df = df!("x" => &[3.0]).unwrap();
    let err = PowerTransformer::box_cox().fit(&df).unwrap_err();
    match &err {
        SkewError::InsufficientData { transformer, required, got } => {
            assert_eq!(transformer, "BoxCoxTransformer");
            assert_eq!(*required, 2);
            assert_eq!(*got, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.to_string(), "BoxCoxTransformer requires at least 2 samples, got 1");
}

#[test]
fn test_non_finite_values_rejected() {
    let bad = df!("x" => &[1.0, f64::NAN, 3.0]).unwrap();
    let err = PowerTransformer::yeo_johnson().fit(&bad).unwrap_err();
    assert!(matches!(err, SkewError::NonFiniteValue(_)));

    let good = df!("x" => &[1.0, 2.0, 9.0]).unwrap();
    let mut transformer = PowerTransformer::yeo_johnson();
    transformer.fit(&good).unwrap();
    let err = transformer.transform(&bad).unwrap_err();
    assert!(matches!(err, SkewError::NonFiniteValue(_)));
}

#[test]
fn test_constant_column_is_degenerate() {
    let df = df!("x" => &[2.0, 2.0, 2.0, 2.0]).unwrap();
    for mut transformer in [PowerTransformer::box_cox(), PowerTransformer::yeo_johnson()] {
        let err = transformer.fit(&df).unwrap_err();
        assert!(matches!(err, SkewError::EstimationDegeneracy(_)));
        assert!(!transformer.is_fitted());
    }
}

#[test]
fn test_matrix_input_and_output() {
    let matrix = array![[1.0, 0.5], [2.0, 0.25], [3.0, 4.0], [10.0, 8.0]];
    let config = PowerTransformConfig::yeo_johnson().with_as_df(false);
    let mut transformer = PowerTransformer::new(config);
    let out = transformer.fit_transform(&matrix).unwrap().into_matrix().unwrap();

    assert_eq!(transformer.fit_columns().unwrap(), &["0".to_string(), "1".to_string()]);
    assert_eq!(out.dim(), (4, 2));

    let lambda = transformer.lambdas().unwrap()[0];
    assert_eq!(out.column(0).to_vec(), yeo_johnson(&[1.0, 2.0, 3.0, 10.0], lambda));
}

#[test]
fn test_records_input() {
    let records = vec![
        vec![1.0, 0.5],
        vec![2.0, 0.25],
        vec![3.0, 4.0],
        vec![10.0, 8.0],
    ];
    let mut transformer = PowerTransformer::box_cox();
    let out = transformer.fit_transform(&records).unwrap().into_frame().unwrap();
    assert_eq!(out.shape(), (4, 2));

    // explicit columns need labelled input
    let config = PowerTransformConfig::box_cox().with_columns(["0"]);
    let err = PowerTransformer::new(config).fit(&records).unwrap_err();
    assert!(matches!(err, SkewError::StructuralError(_)));
}

#[test]
fn test_config_from_json_drives_transformer() {
    let config = PowerTransformConfig::from_json(
        r#"{"columns": ["income"], "n_jobs": 2, "method": {"BoxCox": {"min_value": 0.001}}}"#,
    )
    .unwrap();
    let mut transformer = PowerTransformer::new(config);
    transformer.fit(&skewed_df()).unwrap();

    let model = transformer.fitted().unwrap();
    assert_eq!(model.method(), PowerMethod::BoxCox { min_value: 0.001 });
    assert_eq!(model.len(), 1);
}

#[test]
fn test_invalid_bracket_rejected_before_fit() {
    let config = PowerTransformConfig::default().with_bracket(Bracket::Interval(1.0, 1.0));
    let err = PowerTransformer::new(config).fit(&skewed_df()).unwrap_err();
    assert!(matches!(err, SkewError::InvalidParameter { .. }));
}
