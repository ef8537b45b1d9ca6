use std::time::Duration;

use thiserror::Error;

/// Error type for adapter construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The base URL does not parse.
    #[error("invalid provider base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// The rejected value.
        url: String,
        /// Parser diagnostic.
        source: url::ParseError,
    },
    /// The base URL parses but cannot carry path segments (e.g. `mailto:`).
    #[error("provider base URL {url:?} cannot be used as a base")]
    OpaqueBaseUrl {
        /// The rejected value.
        url: String,
    },
}

/// Default user agent for provider requests.
///
/// Nominatim rejects anonymous clients, so every request identifies itself.
pub const DEFAULT_USER_AGENT: &str = "wayfare/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration shared by every HTTP adapter.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use wayfare_data::HttpProviderConfig;
///
/// let config = HttpProviderConfig::new("https://api.unsplash.com")
///     .with_api_key("secret")
///     .with_timeout(Duration::from_secs(3));
/// assert_eq!(config.api_key.as_deref(), Some("secret"));
/// ```
#[derive(Clone)]
pub struct HttpProviderConfig {
    /// Base URL of the service; endpoint paths are appended to it.
    pub base_url: String,
    /// Request timeout, also used as the connect timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// API key, access key or account name, depending on the service.
    pub api_key: Option<String>,
}

impl std::fmt::Debug for HttpProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProviderConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl HttpProviderConfig {
    /// Create a configuration for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            api_key: None,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the credential sent to the service.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Replace the base URL, keeping every other setting.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
