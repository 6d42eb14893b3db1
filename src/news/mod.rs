//! Headline news: fetching titles and keeping the ticker text fresh.
//!
//! - [`HeadlineSource`]: anything that can produce a list of titles
//! - [`NewsApiClient`]: the HTTP implementation
//! - [`NewsFetcher`]: background thread publishing into [`SharedState`]
//!
//! [`SharedState`]: crate::state::SharedState

mod api;
mod fetcher;

pub use api::{parse_titles, NewsApiClient};
pub use fetcher::{headline_text, NewsFetcher};

use thiserror::Error;

/// A failed headline fetch. Never fatal: the fetcher substitutes its
/// fallback text.
#[derive(Debug, Error)]
pub enum NewsError {
    /// Connection, TLS, timeout or HTTP status failure.
    #[error("request failed: {0}")]
    Transport(#[from] Box<ureq::Error>),
    /// The response body could not be read.
    #[error("failed to read response: {0}")]
    Read(#[from] std::io::Error),
    /// The response body is not the expected JSON.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The API answered with an error object.
    #[error("api error {code}: {message}")]
    Api {
        /// Machine-readable code.
        code: String,
        /// Human-readable message.
        message: String,
    },
}

/// Produces the current list of headline titles.
pub trait HeadlineSource {
    /// Fetch the titles, in display order.
    fn fetch_titles(&self) -> Result<Vec<String>, NewsError>;
}
