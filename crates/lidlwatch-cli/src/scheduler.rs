//! Check cycles and the recurring watch job.
//!
//! A cycle reloads the catalog, resolves every product and prints the
//! report. `watch` runs one cycle straight away and then hands the rest to a
//! [`JobScheduler`] repeating at the configured interval.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use lidlwatch_core::{load_catalog, AppConfig, CatalogError};
use lidlwatch_scraper::{run_batch, BatchResult, PriceResolver, ResolutionError, ResolverConfig};
use tokio::sync::{mpsc, Mutex};
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::report::{log_failures, render_report, timestamp_now};

/// Everything a cycle needs, shared by every run of the watch job.
pub(crate) struct CycleContext {
    pub(crate) catalog_path: PathBuf,
    pub(crate) merchant_origin: String,
    pub(crate) max_concurrent: usize,
    pub(crate) resolver: PriceResolver,
}

impl CycleContext {
    pub(crate) fn from_config(config: &AppConfig) -> Result<Self, ResolutionError> {
        Ok(Self {
            catalog_path: config.catalog_path.clone(),
            merchant_origin: config.merchant_origin.clone(),
            max_concurrent: config.max_concurrent,
            resolver: PriceResolver::new(&ResolverConfig::from(config))?,
        })
    }
}

/// Runs one check: load catalog, resolve, report to `out`.
///
/// Product failures are logged and kept in the returned result; they never
/// fail the cycle. A report that cannot be written is logged too.
///
/// # Errors
///
/// Returns [`CatalogError`] when the catalog cannot be loaded.
pub(crate) async fn run_cycle<W: Write + Send>(
    ctx: &CycleContext,
    out: &mut W,
) -> Result<BatchResult, CatalogError> {
    let specs = load_catalog(&ctx.catalog_path, &ctx.merchant_origin)?;
    tracing::info!(
        products = specs.len(),
        catalog = %ctx.catalog_path.display(),
        "starting price check"
    );

    let result = run_batch(&ctx.resolver, &specs, ctx.max_concurrent).await;

    log_failures(&result);
    if let Err(e) = render_report(out, &result, &timestamp_now()) {
        tracing::error!(error = %e, "failed to write report");
    }

    tracing::info!(
        checked = result.checked,
        discounted = result.discounted.len(),
        failed = result.failures.len(),
        "price check complete"
    );
    Ok(result)
}

/// Checks immediately, then every `interval` until a shutdown signal.
///
/// # Errors
///
/// Returns an error when the catalog cannot be loaded, on the first cycle or
/// any later one, or when the scheduler fails.
pub(crate) async fn watch(ctx: CycleContext, interval: Duration) -> anyhow::Result<()> {
    let ctx = Arc::new(ctx);
    run_cycle(&ctx, &mut std::io::stdout()).await?;

    let (fatal_tx, mut fatal_rx) = mpsc::channel::<CatalogError>(1);
    let mut scheduler = JobScheduler::new().await?;
    register_check_job(&scheduler, Arc::clone(&ctx), interval, fatal_tx).await?;
    scheduler.start().await?;
    tracing::info!(interval_secs = interval.as_secs(), "watching for discounts");

    let outcome = tokio::select! {
        () = shutdown_signal() => Ok(()),
        Some(err) = fatal_rx.recv() => Err(anyhow::Error::new(err).context("stopping watch")),
    };

    scheduler.shutdown().await?;
    outcome
}

/// Registers the repeating check.
///
/// A tick that fires while the previous cycle is still running is skipped.
async fn register_check_job(
    scheduler: &JobScheduler,
    ctx: Arc<CycleContext>,
    interval: Duration,
    fatal_tx: mpsc::Sender<CatalogError>,
) -> Result<(), JobSchedulerError> {
    let running = Arc::new(Mutex::new(()));

    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let ctx = Arc::clone(&ctx);
        let running = Arc::clone(&running);
        let fatal_tx = fatal_tx.clone();

        Box::pin(async move {
            let Ok(_guard) = running.try_lock_owned() else {
                tracing::warn!("scheduler: previous check still running; skipping tick");
                return;
            };

            if let Err(err) = run_cycle(&ctx, &mut std::io::stdout()).await {
                tracing::error!(error = %err, "scheduler: catalog could not be loaded");
                // a full channel means shutdown is already under way
                let _ = fatal_tx.try_send(err);
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping scheduler");
}

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod tests;
