//! Price selection from search results.
//!
//! The search is free text, so it can return several loosely related items.
//! Only the item whose `code` equals the catalog identifier is trusted.

use crate::error::ResolutionError;
use crate::types::{SearchIndexEntry, SearchResponse};

/// The price chosen for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    pub label: String,
    pub price_minor: i64,
    pub is_loyalty_price: bool,
}

impl SearchIndexEntry {
    /// Standard price when strictly positive, otherwise the first non-negative
    /// Lidl Plus price. `None` when neither is usable.
    #[must_use]
    pub fn quote(&self) -> Option<PriceQuote> {
        if self.standard_price_minor > 0 {
            return Some(PriceQuote {
                label: self.label.clone(),
                price_minor: self.standard_price_minor,
                is_loyalty_price: false,
            });
        }

        self.loyalty_price_minor
            .filter(|price| *price >= 0)
            .map(|price_minor| PriceQuote {
                label: self.label.clone(),
                price_minor,
                is_loyalty_price: true,
            })
    }
}

/// Finds the item with the given catalog code and picks its price.
///
/// # Errors
///
/// - [`ResolutionError::ItemNotFound`] if no item carries `code`.
/// - [`ResolutionError::MalformedItem`] if the item has neither a positive
///   standard price nor a Lidl Plus price, or its standard price is out of
///   range.
pub fn select_price(response: &SearchResponse, code: &str) -> Result<PriceQuote, ResolutionError> {
    let item = response
        .items
        .iter()
        .find(|item| item.code == code)
        .ok_or_else(|| ResolutionError::ItemNotFound {
            code: code.to_owned(),
        })?;

    SearchIndexEntry::try_from(item)?
        .quote()
        .ok_or_else(|| ResolutionError::MalformedItem {
            code: code.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(value: &serde_json::Value) -> SearchResponse {
        serde_json::from_value(value.clone()).expect("fixture should deserialize")
    }

    fn item(code: &str, price: f64, lidl_plus: &[f64]) -> serde_json::Value {
        let offers: Vec<_> = lidl_plus
            .iter()
            .map(|p| json!({ "price": { "price": p } }))
            .collect();
        json!({
            "code": code,
            "label": "Greek Yogurt",
            "gridbox": { "data": { "price": { "price": price }, "lidlPlus": offers } }
        })
    }

    #[test]
    fn standard_price_wins_when_positive() {
        let resp = response(&json!({ "items": [item("123456", 4.50, &[3.99])] }));
        let quote = select_price(&resp, "123456").unwrap();
        assert_eq!(
            quote,
            PriceQuote {
                label: "Greek Yogurt".to_string(),
                price_minor: 450,
                is_loyalty_price: false,
            }
        );
    }

    #[test]
    fn loyalty_price_used_when_standard_is_zero() {
        let resp = response(&json!({ "items": [item("123456", 0.0, &[3.99, 2.50])] }));
        let quote = select_price(&resp, "123456").unwrap();
        assert_eq!(quote.price_minor, 399);
        assert!(quote.is_loyalty_price);
    }

    #[test]
    fn sub_cent_standard_price_counts_as_zero() {
        let resp = response(&json!({ "items": [item("123456", 0.004, &[1.00])] }));
        let quote = select_price(&resp, "123456").unwrap();
        assert_eq!(quote.price_minor, 100);
        assert!(quote.is_loyalty_price);
    }

    #[test]
    fn matches_by_code_not_by_position() {
        let resp = response(&json!({
            "items": [item("999999", 1.00, &[]), item("123456", 2.49, &[])]
        }));
        assert_eq!(select_price(&resp, "123456").unwrap().price_minor, 249);
    }

    #[test]
    fn missing_code_is_item_not_found() {
        let resp = response(&json!({ "items": [item("999999", 1.00, &[])] }));
        let err = select_price(&resp, "123456").unwrap_err();
        assert!(
            matches!(err, ResolutionError::ItemNotFound { ref code } if code == "123456"),
            "expected ItemNotFound, got: {err:?}"
        );
    }

    #[test]
    fn empty_item_list_is_item_not_found() {
        let resp = response(&json!({ "items": [] }));
        assert!(matches!(
            select_price(&resp, "123456"),
            Err(ResolutionError::ItemNotFound { .. })
        ));
    }

    #[test]
    fn zero_price_without_loyalty_is_malformed() {
        let resp = response(&json!({ "items": [item("123456", 0.0, &[])] }));
        let err = select_price(&resp, "123456").unwrap_err();
        assert!(
            matches!(err, ResolutionError::MalformedItem { .. }),
            "expected MalformedItem, got: {err:?}"
        );
    }

    #[test]
    fn item_without_gridbox_is_malformed() {
        let resp = response(&json!({ "items": [{ "code": "123456", "label": "Recipe" }] }));
        assert!(matches!(
            select_price(&resp, "123456"),
            Err(ResolutionError::MalformedItem { .. })
        ));
    }

    #[test]
    fn null_lidl_plus_is_tolerated() {
        let resp = response(&json!({
            "items": [{
                "code": "123456",
                "label": "Greek Yogurt",
                "gridbox": { "data": { "price": { "price": 1.29 }, "lidlPlus": null } }
            }]
        }));
        assert_eq!(select_price(&resp, "123456").unwrap().price_minor, 129);
    }

    #[test]
    fn negative_loyalty_price_is_malformed() {
        let resp = response(&json!({ "items": [item("123456", 0.0, &[-1.0])] }));
        assert!(matches!(
            select_price(&resp, "123456"),
            Err(ResolutionError::MalformedItem { .. })
        ));
    }

    #[test]
    fn index_entry_keeps_first_loyalty_price() {
        let resp = response(&json!({ "items": [item("1", 2.0, &[1.5, 1.0])] }));
        let entry = SearchIndexEntry::try_from(&resp.items[0]).unwrap();
        assert_eq!(entry.standard_price_minor, 200);
        assert_eq!(entry.loyalty_price_minor, Some(150));
    }

    #[test]
    fn out_of_range_standard_price_is_malformed_not_loyalty() {
        let resp = response(&json!({ "items": [item("123456", 1e20, &[3.99])] }));
        let err = select_price(&resp, "123456").unwrap_err();
        assert!(
            matches!(err, ResolutionError::MalformedItem { ref code } if code == "123456"),
            "expected MalformedItem, got: {err:?}"
        );
    }
}
