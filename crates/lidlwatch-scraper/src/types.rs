//! Response types for the merchant search API.
//!
//! ## Observed shape
//!
//! ```json
//! { "items": [ { "code": "10012345", "label": "Greek Yogurt",
//!     "gridbox": { "data": {
//!         "price": { "price": 4.5 },
//!         "lidlPlus": [ { "price": { "price": 3.99 } } ] } } } ] }
//! ```
//!
//! Only the fields used for price resolution are modelled. Everything below
//! `items[]` is optional: non-product tiles (recipes, campaign banners) come
//! back without a `gridbox.data.price`, and `lidlPlus` is either absent,
//! `null`, or an empty array when there is no loyalty offer.

use lidlwatch_core::minor_units_from_f64;
use serde::Deserialize;

use crate::error::ResolutionError;

/// Top-level response from the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    /// Merchant catalog code; matches [`lidlwatch_core::ProductSpec::identifier`].
    pub code: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub gridbox: Option<Gridbox>,
}

#[derive(Debug, Deserialize)]
pub struct Gridbox {
    #[serde(default)]
    pub data: Option<GridboxData>,
}

#[derive(Debug, Deserialize)]
pub struct GridboxData {
    #[serde(default)]
    pub price: Option<PriceValue>,
    #[serde(default, rename = "lidlPlus")]
    pub lidl_plus: Option<Vec<LoyaltyOffer>>,
}

#[derive(Debug, Deserialize)]
pub struct PriceValue {
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct LoyaltyOffer {
    #[serde(default)]
    pub price: Option<PriceValue>,
}

/// Pricing for one search item, reduced to integer cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIndexEntry {
    pub code: String,
    pub label: String,
    /// `0` when the item carries no standard price.
    pub standard_price_minor: i64,
    /// First Lidl Plus price, if any.
    pub loyalty_price_minor: Option<i64>,
}

impl TryFrom<&SearchItem> for SearchIndexEntry {
    type Error = ResolutionError;

    /// # Errors
    ///
    /// Returns [`ResolutionError::MalformedItem`] when the item carries a
    /// standard price that cannot be expressed in minor units (NaN, infinite
    /// or beyond `i64`).
    fn try_from(item: &SearchItem) -> Result<Self, Self::Error> {
        let data = item.gridbox.as_ref().and_then(|g| g.data.as_ref());

        let standard_price_minor = match data.and_then(|d| d.price.as_ref()).and_then(|p| p.price)
        {
            Some(price) => {
                minor_units_from_f64(price).ok_or_else(|| ResolutionError::MalformedItem {
                    code: item.code.clone(),
                })?
            }
            None => 0,
        };

        let loyalty_price_minor = data
            .and_then(|d| d.lidl_plus.as_deref())
            .and_then(<[LoyaltyOffer]>::first)
            .and_then(|offer| offer.price.as_ref())
            .and_then(|p| p.price)
            .and_then(minor_units_from_f64);

        Ok(Self {
            code: item.code.clone(),
            label: item.label.trim().to_string(),
            standard_price_minor,
            loyalty_price_minor,
        })
    }
}
