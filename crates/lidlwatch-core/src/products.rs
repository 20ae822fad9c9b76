/// One watched product, as read from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSpec {
    /// Merchant catalog code, e.g. `"123456"` for `/p/A123456`.
    pub identifier: String,
    /// Absolute URL of the product page.
    pub source_url: String,
    /// Alert when the price is at or below this amount, in cents.
    pub alert_threshold_minor: i64,
}

/// A product whose current price was resolved from the merchant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProduct {
    pub spec: ProductSpec,
    pub display_name: String,
    pub current_price_minor: i64,
    /// `true` when the price is the Lidl Plus (loyalty) price rather than the
    /// standard shelf price.
    pub is_loyalty_price: bool,
}

impl ResolvedProduct {
    /// Whether the current price has fallen to or below the alert threshold.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.spec.alert_threshold_minor >= self.current_price_minor
    }
}
