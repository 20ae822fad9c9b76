//! Catalog loader: turns the plain-text watch list into [`ProductSpec`]s.
//!
//! One product per line, `<url-or-path> <threshold>`, e.g.
//!
//! ```text
//! -- dairy
//! https://www.lidl-hellas.gr/p/giaourti-straggisto/p10012345 2.49
//! /p/A123456 4.99
//! ```
//!
//! Blank lines and lines starting with `--` or `#` are skipped.

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::CatalogError;
use crate::money::to_minor_units;
use crate::products::ProductSpec;

/// Origin prepended to catalog entries given as bare paths.
pub const DEFAULT_MERCHANT_ORIGIN: &str = "https://www.lidl-hellas.gr";

const COMMENT_MARKERS: [&str; 2] = ["--", "#"];

/// Read and parse a catalog file.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the file cannot be read, otherwise any
/// error from [`parse_catalog`].
pub fn load_catalog(path: &Path, merchant_origin: &str) -> Result<Vec<ProductSpec>, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_catalog(&content, merchant_origin)
}

/// Parse catalog text into product specs, preserving line order.
///
/// Parsing is all-or-nothing: the first malformed line fails the whole
/// catalog.
///
/// # Errors
///
/// - [`CatalogError::Format`] for a line without exactly two fields, a
///   threshold that is not a non-negative decimal, or a URL with no usable
///   product code.
/// - [`CatalogError::Empty`] when no product lines remain.
pub fn parse_catalog(text: &str, merchant_origin: &str) -> Result<Vec<ProductSpec>, CatalogError> {
    let mut products = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || COMMENT_MARKERS.iter().any(|m| line.starts_with(m)) {
            continue;
        }
        products.push(parse_line(line, index + 1, merchant_origin)?);
    }

    if products.is_empty() {
        return Err(CatalogError::Empty);
    }

    Ok(products)
}

fn parse_line(
    line: &str,
    line_number: usize,
    merchant_origin: &str,
) -> Result<ProductSpec, CatalogError> {
    let format_err = |reason: &str| CatalogError::Format {
        line_number,
        line: line.to_string(),
        reason: reason.to_string(),
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    let [url_token, threshold_token] = fields.as_slice() else {
        return Err(format_err("expected \"<url> <threshold>\""));
    };

    let threshold =
        Decimal::from_str(threshold_token).map_err(|_| format_err("threshold is not numeric"))?;
    if threshold.is_sign_negative() && !threshold.is_zero() {
        return Err(format_err("threshold must not be negative"));
    }
    let alert_threshold_minor =
        to_minor_units(threshold).ok_or_else(|| format_err("threshold is out of range"))?;

    let identifier = extract_identifier(url_token)
        .ok_or_else(|| format_err("URL does not end in a product code"))?;

    Ok(ProductSpec {
        identifier,
        source_url: absolute_url(url_token, merchant_origin),
        alert_threshold_minor,
    })
}

/// Takes the last `/` segment of the URL path and drops its one-character
/// merchant prefix (`p10012345` → `10012345`).
fn extract_identifier(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.trim_end_matches('/').rsplit('/').next()?;

    let mut chars = segment.chars();
    chars.next()?;
    let code = chars.as_str();
    if code.is_empty() {
        None
    } else {
        Some(code.to_string())
    }
}

fn absolute_url(token: &str, merchant_origin: &str) -> String {
    if token.starts_with("http://") || token.starts_with("https://") {
        return token.to_string();
    }
    format!(
        "{}/{}",
        merchant_origin.trim_end_matches('/'),
        token.trim_start_matches('/')
    )
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
