//! API error types.

use thiserror::Error;

/// Errors that can occur when talking to PokeAPI.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds the server asked us to wait.
        retry_after_secs: u64,
    },

    /// The response body is not the JSON shape we expect.
    #[error("parse error: {0}")]
    Parse(String),

    /// A field the record cannot exist without is absent.
    #[error("missing field: {0}")]
    MissingField(&'static str),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
