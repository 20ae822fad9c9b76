//! Stage one: product page → search label.

use reqwest::Url;

use crate::error::ResolutionError;
use crate::title::extract_title;

use super::PriceResolver;

const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

impl PriceResolver {
    /// Fetches the product page and returns its `<title>` text.
    ///
    /// # Errors
    ///
    /// [`ResolutionError::InvalidUrl`], [`ResolutionError::Transport`],
    /// [`ResolutionError::HttpStatus`] or [`ResolutionError::Parse`].
    pub(super) async fn fetch_label(&self, source_url: &str) -> Result<String, ResolutionError> {
        let url = Url::parse(source_url).map_err(|e| ResolutionError::InvalidUrl {
            url: source_url.to_owned(),
            reason: e.to_string(),
        })?;

        let html = self.get_text(&url, HTML_ACCEPT).await?;
        let label = extract_title(&html).map_err(|source| ResolutionError::Parse {
            url: source_url.to_owned(),
            source,
        })?;

        tracing::debug!(url = source_url, %label, "found product label");
        Ok(label)
    }
}
