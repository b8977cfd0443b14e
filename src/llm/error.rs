//! Plan fetcher error taxonomy

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by a [`PlanFetcher`](super::PlanFetcher)
///
/// The playback orchestrator treats every variant uniformly: status goes to
/// Error and the message is stored for display. The split exists for logging
/// and for tests pinning down which failure path fired. None of these are
/// retried; the user resubmits.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider did not answer within the configured timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Non-success HTTP status from the provider
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The provider answered, but not with a usable drawing plan
    #[error("malformed plan response: {0}")]
    Malformed(String),
}
