//! HTTP side of price resolution.
//!
//! Resolving a product takes two requests: the product page, which only
//! yields a human-readable title, and the search API, which yields prices
//! but has to be queried by that title. Both requests go through the same
//! pacing gate and retry policy.

mod label;
mod search;

use std::time::Duration;

use lidlwatch_core::{AppConfig, ProductSpec, ResolvedProduct};
use reqwest::{Client, StatusCode, Url};

use crate::error::ResolutionError;
use crate::pacing::RequestPacer;
use crate::pricing::select_price;
use crate::rate_limit::retry_with_backoff;

/// Settings for [`PriceResolver`].
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Per-request timeout, covering connect through body read.
    pub timeout: Duration,
    pub user_agent: String,
    /// Minimum spacing between requests to the same host.
    pub request_delay: Duration,
    /// Search endpoint including its fixed query parameters; `q` is added per product.
    pub search_url: String,
    /// Additional attempts after a transient failure. `0` disables retries.
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl From<&AppConfig> for ResolverConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.request_timeout_secs),
            user_agent: config.user_agent.clone(),
            request_delay: Duration::from_millis(config.request_delay_ms),
            search_url: config.search_url.clone(),
            max_retries: config.max_retries,
            retry_backoff_base_ms: config.retry_backoff_base_ms,
        }
    }
}

/// Maps a catalog entry to its current price.
///
/// Holds no per-product state: every [`resolve`](Self::resolve) call is
/// independent, and the only thing shared between calls is the pacing gate.
pub struct PriceResolver {
    client: Client,
    search_url: Url,
    pacer: RequestPacer,
    max_retries: u32,
    retry_backoff_base_ms: u64,
}

impl PriceResolver {
    /// Creates a resolver with the configured timeout, `User-Agent`, pacing
    /// and retry policy.
    ///
    /// # Errors
    ///
    /// - [`ResolutionError::InvalidUrl`] if `search_url` is not an absolute URL.
    /// - [`ResolutionError::Client`] if the `reqwest::Client` cannot be built.
    pub fn new(config: &ResolverConfig) -> Result<Self, ResolutionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            search_url: Self::search_base(&config.search_url)?,
            pacer: RequestPacer::new(config.request_delay),
            max_retries: config.max_retries,
            retry_backoff_base_ms: config.retry_backoff_base_ms,
        })
    }

    /// Resolves one product: scrape its page title, search for it, then pick
    /// the price of the search item whose code matches the catalog identifier.
    ///
    /// # Errors
    ///
    /// - [`ResolutionError::InvalidUrl`] if `spec.source_url` cannot be parsed.
    /// - [`ResolutionError::Transport`] on network failure or timeout.
    /// - [`ResolutionError::HttpStatus`] if either response is not `200 OK`.
    /// - [`ResolutionError::Parse`] if the page has no single `<title>`.
    /// - [`ResolutionError::Decode`] if the search body is not the expected JSON.
    /// - [`ResolutionError::ItemNotFound`] / [`ResolutionError::MalformedItem`]
    ///   from [`select_price`].
    pub async fn resolve(&self, spec: &ProductSpec) -> Result<ResolvedProduct, ResolutionError> {
        let page_label = self.fetch_label(&spec.source_url).await?;
        let results = self.search(&page_label).await?;
        let quote = select_price(&results, &spec.identifier)?;

        let display_name = if quote.label.is_empty() {
            page_label
        } else {
            quote.label
        };

        tracing::debug!(
            code = %spec.identifier,
            price_minor = quote.price_minor,
            loyalty = quote.is_loyalty_price,
            "resolved product price"
        );

        Ok(ResolvedProduct {
            spec: spec.clone(),
            display_name,
            current_price_minor: quote.price_minor,
            is_loyalty_price: quote.is_loyalty_price,
        })
    }

    /// Paced, retried `GET` returning the body of a `200 OK` response.
    async fn get_text(&self, url: &Url, accept: &str) -> Result<String, ResolutionError> {
        let host = url.host_str().unwrap_or_default();

        retry_with_backoff(self.max_retries, self.retry_backoff_base_ms, || async move {
            self.pacer.wait(host).await;
            tracing::debug!(%url, "GET");

            let response = self
                .client
                .get(url.clone())
                .header(reqwest::header::ACCEPT, accept)
                .header(reqwest::header::ACCEPT_LANGUAGE, "el-GR,el;q=0.9,en;q=0.8")
                .send()
                .await
                .map_err(|e| ResolutionError::Transport {
                    url: url.to_string(),
                    source: e,
                })?;

            let status = response.status();
            if status != StatusCode::OK {
                return Err(ResolutionError::HttpStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            response
                .text()
                .await
                .map_err(|e| ResolutionError::Transport {
                    url: url.to_string(),
                    source: e,
                })
        })
        .await
    }

    /// Parses the configured search endpoint and drops any `q` parameter so
    /// the per-product query can be appended.
    fn search_base(raw: &str) -> Result<Url, ResolutionError> {
        let mut url = Url::parse(raw).map_err(|e| ResolutionError::InvalidUrl {
            url: raw.to_owned(),
            reason: e.to_string(),
        })?;

        let retained: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "q")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        if retained.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(&retained);
        }
        Ok(url)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
