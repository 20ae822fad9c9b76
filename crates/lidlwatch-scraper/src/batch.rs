//! Batch runner: resolves a whole catalog and keeps the discounted items.
//!
//! Failures are isolated per product. A product that cannot be resolved is
//! recorded in [`BatchResult::failures`] and the batch moves on; nothing a
//! single product does can abort the run.

use std::fmt;
use std::future::Future;

use futures::stream::{self, StreamExt};
use lidlwatch_core::{ProductSpec, ResolvedProduct};

use crate::client::PriceResolver;
use crate::error::ResolutionError;

/// A product that could not be resolved, with the reason.
#[derive(Debug)]
pub struct ItemFailure {
    pub spec: ProductSpec,
    pub error: ResolutionError,
}

impl fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.spec.source_url, self.error)
    }
}

/// Outcome of one batch over the catalog.
///
/// Resolved products priced above their threshold appear in neither list.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Products at or below their alert threshold, in catalog order.
    pub discounted: Vec<ResolvedProduct>,
    /// Products that failed to resolve, in catalog order.
    pub failures: Vec<ItemFailure>,
    /// Number of catalog entries processed.
    pub checked: usize,
}

impl BatchResult {
    /// Resolved products that were above their threshold.
    #[must_use]
    pub fn not_discounted(&self) -> usize {
        self.checked
            .saturating_sub(self.discounted.len() + self.failures.len())
    }

    /// All failures joined into one multi-line diagnostic, or `None` when
    /// every product resolved.
    #[must_use]
    pub fn failure_report(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }

        let mut report = format!(
            "{} of {} products could not be checked:",
            self.failures.len(),
            self.checked
        );
        for failure in &self.failures {
            report.push_str("\n  - ");
            report.push_str(&failure.to_string());
        }
        Some(report)
    }
}

/// Resolves every spec with `resolver`, at most `max_concurrent` at a time.
pub async fn run_batch(
    resolver: &PriceResolver,
    specs: &[ProductSpec],
    max_concurrent: usize,
) -> BatchResult {
    run_batch_with(specs, max_concurrent, |spec| resolver.resolve(spec)).await
}

/// Batch driver with a pluggable resolve step.
///
/// Results keep catalog order regardless of which resolution finishes first.
/// `max_concurrent` below 1 is treated as 1.
pub async fn run_batch_with<'a, F, Fut>(
    specs: &'a [ProductSpec],
    max_concurrent: usize,
    resolve: F,
) -> BatchResult
where
    F: Fn(&'a ProductSpec) -> Fut,
    Fut: Future<Output = Result<ResolvedProduct, ResolutionError>> + 'a,
{
    // built before streaming so the batch future is `Send` for spawned tasks
    let pending: Vec<_> = specs
        .iter()
        .map(|spec| {
            let fut = resolve(spec);
            async move { (spec, fut.await) }
        })
        .collect();

    let outcomes: Vec<(&ProductSpec, Result<ResolvedProduct, ResolutionError>)> =
        stream::iter(pending)
            .buffered(max_concurrent.max(1))
            .collect()
            .await;

    let mut result = BatchResult {
        checked: outcomes.len(),
        ..BatchResult::default()
    };

    for (spec, outcome) in outcomes {
        match outcome {
            Ok(product) if product.is_discounted() => {
                tracing::info!(
                    code = %spec.identifier,
                    price_minor = product.current_price_minor,
                    threshold_minor = spec.alert_threshold_minor,
                    "discount found"
                );
                result.discounted.push(product);
            }
            Ok(product) => {
                tracing::debug!(
                    code = %spec.identifier,
                    price_minor = product.current_price_minor,
                    threshold_minor = spec.alert_threshold_minor,
                    "price above alert threshold"
                );
            }
            Err(error) => {
                tracing::warn!(
                    code = %spec.identifier,
                    url = %spec.source_url,
                    error = %error,
                    "failed to resolve product"
                );
                result.failures.push(ItemFailure {
                    spec: spec.clone(),
                    error,
                });
            }
        }
    }

    tracing::info!(
        checked = result.checked,
        discounted = result.discounted.len(),
        failed = result.failures.len(),
        not_discounted = result.not_discounted(),
        "batch complete"
    );

    result
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
