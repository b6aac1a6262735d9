//! Resolver error types.

/// Errors from a single station or address lookup.
///
/// Constructing or formatting an error has no side effects; failures are
/// logged once by whoever observes them.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message} (body: {body})")]
    Json { message: String, body: String },

    /// Resolution stopped before producing an answer
    #[error("resolution aborted: {0}")]
    Aborted(String),
}
