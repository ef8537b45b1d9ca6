use thiserror::Error;

/// Errors returned by provider adapters.
///
/// The resolver never surfaces these to users; they are logged and mapped to
/// "no result".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The request could not be sent or the connection failed.
    #[error("network error calling {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The provider did not answer in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout.
        timeout_secs: u64,
    },
    /// The provider answered with a non-success status.
    #[error("{url} returned HTTP {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// Status code.
        status: u16,
        /// Response description.
        message: String,
    },
    /// The payload could not be decoded.
    #[error("failed to parse provider response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
    /// The service answered but refused the request in its payload.
    #[error("{provider} rejected the request: {message}")]
    Rejected {
        /// Provider name.
        provider: &'static str,
        /// Service-supplied reason.
        message: String,
    },
    /// The adapter has no API key or account configured.
    #[error("{provider} requires credentials that were not configured")]
    MissingCredentials {
        /// Provider name.
        provider: &'static str,
    },
}
