//! Kolosal Skew - Main Entry Point
//!
//! Fits Box-Cox or Yeo-Johnson transforms on tabular files from the command line.

use clap::Parser;
use kolosal_skew::cli::{cmd_fit_transform, cmd_lambdas, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kolosal_skew=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::FitTransform { args, output } => {
            cmd_fit_transform(&args, &output)?;
        }
        Commands::Lambdas { args } => {
            cmd_lambdas(&args)?;
        }
    }

    Ok(())
}
