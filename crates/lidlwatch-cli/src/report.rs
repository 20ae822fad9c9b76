//! Console rendering of a batch result.

use std::io::{self, Write};

use chrono::Local;
use lidlwatch_core::format_minor_units;
use lidlwatch_scraper::BatchResult;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in the report header format.
pub(crate) fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Writes the discount report for one cycle.
///
/// ```text
/// 2026-10-16 09:00:00 - Discounts:
/// Greek Yogurt 1kg -> 4.50
/// Olive Oil 1L -> 3.99 (loyalty)
/// ```
///
/// or a single `<timestamp> - No discounts found` line.
pub(crate) fn render_report<W: Write>(
    out: &mut W,
    result: &BatchResult,
    timestamp: &str,
) -> io::Result<()> {
    if result.discounted.is_empty() {
        writeln!(out, "{timestamp} - No discounts found")?;
        return Ok(());
    }

    writeln!(out, "{timestamp} - Discounts:")?;
    for product in &result.discounted {
        let suffix = if product.is_loyalty_price {
            " (loyalty)"
        } else {
            ""
        };
        writeln!(
            out,
            "{} -> {}{suffix}",
            product.display_name,
            format_minor_units(product.current_price_minor)
        )?;
    }
    out.flush()
}

/// Emits the combined failure diagnostic, if any, at `warn`.
pub(crate) fn log_failures(result: &BatchResult) {
    if let Some(report) = result.failure_report() {
        tracing::warn!(failed = result.failures.len(), "{report}");
    }
}
