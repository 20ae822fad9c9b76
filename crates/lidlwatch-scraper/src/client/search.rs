//! Stage two: search label → structured price list.

use reqwest::Url;

use crate::error::ResolutionError;
use crate::types::SearchResponse;

use super::PriceResolver;

const JSON_ACCEPT: &str = "application/json,text/plain;q=0.9,*/*;q=0.8";

impl PriceResolver {
    /// Queries the search API with `label` as the free-text term.
    ///
    /// # Errors
    ///
    /// [`ResolutionError::Transport`], [`ResolutionError::HttpStatus`] or
    /// [`ResolutionError::Decode`].
    pub(super) async fn search(&self, label: &str) -> Result<SearchResponse, ResolutionError> {
        let url = self.search_url_for(label);
        let body = self.get_text(&url, JSON_ACCEPT).await?;

        serde_json::from_str::<SearchResponse>(&body).map_err(|e| ResolutionError::Decode {
            context: format!("search results for \"{label}\""),
            source: e,
        })
    }

    /// Search endpoint with `q` set to the form-encoded label.
    pub(super) fn search_url_for(&self, label: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut().append_pair("q", label);
        url
    }
}
