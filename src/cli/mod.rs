//! Kolosal Skew CLI Module
//!
//! Command-line interface for fitting power transforms on tabular files.

use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::optimizer::Bracket;
use crate::preprocessing::{FittedPowerModel, PowerMethod, PowerTransformConfig, PowerTransformer};
use crate::utils::{load_auto, save_csv};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString    { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn kv(key: &str, val: &str) -> String {
    format!("{} {}", muted(key), val.white())
}

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "kolosal-skew")]
#[command(author = "KolosalAI")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Box-Cox and Yeo-Johnson skewness correction for tabular data")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fit lambdas on a file and write the transformed data as CSV
    FitTransform {
        #[command(flatten)]
        args: TransformArgs,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Fit lambdas on a file and print them as JSON
    Lambdas {
        #[command(flatten)]
        args: TransformArgs,
    },
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct TransformArgs {
    /// Input data file (CSV, JSON, or Parquet)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Transform (box-cox, yeo-johnson)
    #[arg(short, long)]
    pub method: Option<String>,

    /// Comma-separated columns to transform (default: every numeric column)
    #[arg(short, long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Parallel estimation jobs (-1 = all threads)
    #[arg(short = 'j', long, allow_hyphen_values = true)]
    pub n_jobs: Option<i32>,

    /// Box-Cox floor applied before fitting and transforming
    #[arg(long)]
    pub min_value: Option<f64>,

    /// Yeo-Johnson search start, `a,b` or `a,b,c`
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub bracket: Option<Vec<f64>>,

    /// JSON configuration file; flags given on the command line override it
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl TransformArgs {
    /// Resolve the transformer configuration from the config file and flags.
    pub fn to_config(&self) -> anyhow::Result<PowerTransformConfig> {
        let mut config = match &self.config {
            Some(path) => PowerTransformConfig::from_json(&std::fs::read_to_string(path)?)?,
            None => PowerTransformConfig::default(),
        };

        if let Some(method) = &self.method {
            config = config.with_method(parse_method(method)?);
        }

        if let Some(min_value) = self.min_value {
            if !matches!(config.method, PowerMethod::BoxCox { .. }) {
                anyhow::bail!("--min-value only applies to box-cox");
            }
            config = config.with_min_value(min_value);
        }

        if let Some(points) = &self.bracket {
            if !matches!(config.method, PowerMethod::YeoJohnson { .. }) {
                anyhow::bail!("--bracket only applies to yeo-johnson");
            }
            config = config.with_bracket(parse_bracket(points)?);
        }

        if let Some(columns) = &self.columns {
            config = config.with_columns(columns.iter().map(|c| c.trim().to_string()));
        }

        if let Some(n_jobs) = self.n_jobs {
            config = config.with_n_jobs(n_jobs);
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_method(name: &str) -> anyhow::Result<PowerMethod> {
    match name.to_lowercase().replace('_', "-").as_str() {
        "box-cox" | "boxcox" => Ok(PowerMethod::box_cox()),
        "yeo-johnson" | "yeojohnson" => Ok(PowerMethod::yeo_johnson()),
        other => anyhow::bail!("Invalid method: {} (expected box-cox or yeo-johnson)", other),
    }
}

fn parse_bracket(points: &[f64]) -> anyhow::Result<Bracket> {
    match *points {
        [a, b] => Ok(Bracket::Interval(a, b)),
        [a, b, c] => Ok(Bracket::Triple(a, b, c)),
        _ => anyhow::bail!("--bracket takes 2 or 3 values, got {}", points.len()),
    }
}

fn fit_file(args: &TransformArgs) -> anyhow::Result<(PowerTransformer, polars::prelude::DataFrame)> {
    // output is written as CSV, so always keep the labelled frame
    let config = args.to_config()?.with_as_df(true);

    step_run("Loading data");
    let df = load_auto(&args.data)?;
    step_done(&format!("{} rows × {} cols", df.height(), df.width()));

    step_run(&format!("Fitting {}", config.method.name()));
    let start = Instant::now();
    let mut transformer = PowerTransformer::new(config);
    transformer.fit(&df)?;
    step_done(&format!("{:?}", start.elapsed()));

    Ok((transformer, df))
}

fn print_lambdas(model: &FittedPowerModel) {
    section("Lambdas");
    for (column, lambda) in model.iter() {
        println!("  {}", kv(&format!("{:<24}", column), &format!("{:>12.6}", lambda)));
    }
}

/// Serialize fitted lambdas as a `{column: lambda}` JSON object
pub fn lambdas_json(model: &FittedPowerModel) -> anyhow::Result<String> {
    let map: serde_json::Map<String, serde_json::Value> = model
        .iter()
        .map(|(column, lambda)| (column.to_string(), serde_json::json!(lambda)))
        .collect();
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "transformer": model.method().name(),
        "lambdas": map,
    }))?)
}

pub fn cmd_fit_transform(args: &TransformArgs, output_path: &Path) -> anyhow::Result<()> {
    section("Fit & transform");

    let (transformer, df) = fit_file(args)?;

    step_run("Transforming");
    let start = Instant::now();
    let mut transformed = transformer
        .transform(&df)?
        .into_frame()
        .ok_or_else(|| anyhow::anyhow!("transform returned a matrix; set as_df = true"))?;
    step_done(&format!("{:?}", start.elapsed()));

    step_run(&format!("Saving → {}", output_path.display()));
    save_csv(&mut transformed, output_path)?;
    step_done(&format!("{} rows × {} cols", transformed.height(), transformed.width()));

    if let Some(model) = transformer.fitted() {
        print_lambdas(model);
    }

    println!();
    Ok(())
}

pub fn cmd_lambdas(args: &TransformArgs) -> anyhow::Result<()> {
    let config = args.to_config()?;
    let df = load_auto(&args.data)?;
    let mut transformer = PowerTransformer::new(config);
    transformer.fit(&df)?;

    let model = transformer
        .fitted()
        .ok_or_else(|| anyhow::anyhow!("fit produced no model"))?;
    println!("{}", lambdas_json(model)?);
    Ok(())
}
