pub mod batch;
pub mod client;
pub mod error;
pub mod pacing;
pub mod pricing;
pub(crate) mod rate_limit;
pub mod title;
pub mod types;

pub use batch::{run_batch, run_batch_with, BatchResult, ItemFailure};
pub use client::{PriceResolver, ResolverConfig};
pub use error::ResolutionError;
pub use pacing::RequestPacer;
pub use pricing::select_price;
pub use title::{extract_title, TitleError};
pub use types::{SearchIndexEntry, SearchItem, SearchResponse};
