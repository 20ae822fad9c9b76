mod report;
mod scheduler;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lidlwatch_core::{format_minor_units, load_catalog, AppConfig};
use tracing_subscriber::EnvFilter;

use crate::scheduler::{run_cycle, watch, CycleContext};

#[derive(Debug, Parser)]
#[command(name = "lidlwatch")]
#[command(about = "Watch Lidl Hellas product prices and report discounts")]
struct Cli {
    /// Catalog file to use instead of `LIDLWATCH_CATALOG_PATH`.
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check now, then again every `LIDLWATCH_CHECK_INTERVAL_SECS` (default).
    Watch,
    /// Run a single check and exit.
    Check,
    /// Print the parsed catalog and exit.
    Catalog,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = lidlwatch_core::load_app_config()?;
    if let Some(path) = cli.catalog {
        config.catalog_path = path;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Watch => {
            let interval = Duration::from_secs(config.check_interval_secs);
            watch(build_context(&config)?, interval).await
        }
        Commands::Check => {
            run_cycle(&build_context(&config)?, &mut std::io::stdout()).await?;
            Ok(())
        }
        Commands::Catalog => print_catalog(&config),
    }
}

fn build_context(config: &AppConfig) -> anyhow::Result<CycleContext> {
    CycleContext::from_config(config).context("failed to build price resolver")
}

fn print_catalog(config: &AppConfig) -> anyhow::Result<()> {
    let specs = load_catalog(&config.catalog_path, &config.merchant_origin)?;
    for spec in &specs {
        println!(
            "{}\t{}\t{}",
            spec.identifier,
            format_minor_units(spec.alert_threshold_minor),
            spec.source_url
        );
    }
    println!("{} products", specs.len());
    Ok(())
}
