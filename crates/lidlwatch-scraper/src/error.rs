use thiserror::Error;

use crate::title::TitleError;

/// Why a single product could not be resolved to a price.
///
/// Every variant is scoped to one product; the batch runner records it and
/// moves on to the next.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("could not read product title from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: TitleError,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("item {code} not found in search results")]
    ItemNotFound { code: String },

    #[error("item {code} has neither a standard nor a Lidl Plus price")]
    MalformedItem { code: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
