use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use url::Url;
use wayfare_core::ProviderError;

use super::config::{HttpProviderConfig, ProviderBuildError};

/// A configured `reqwest` client bound to one service.
#[derive(Debug, Clone)]
pub(crate) struct JsonClient {
    client: Client,
    config: HttpProviderConfig,
    base: Url,
}

impl JsonClient {
    pub(crate) fn new(config: HttpProviderConfig) -> Result<Self, ProviderBuildError> {
        let base = Url::parse(&config.base_url).map_err(|source| {
            ProviderBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            }
        })?;
        if base.cannot_be_a_base() {
            return Err(ProviderBuildError::OpaqueBaseUrl {
                url: config.base_url.clone(),
            });
        }
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self {
            client,
            config,
            base,
        })
    }

    /// The configured credential, or `MissingCredentials` for `provider`.
    pub(crate) fn credential(&self, provider: &'static str) -> Result<&str, ProviderError> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ProviderError::MissingCredentials { provider })
    }

    /// Append `segments` to the base path and `query` to its query string.
    ///
    /// Segments are percent-encoded individually, so a destination name
    /// containing `/` stays a single segment.
    pub(crate) fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    /// `GET` a JSON document.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        authorization: Option<String>,
    ) -> Result<T, ProviderError> {
        let label = display_url(&url);
        let mut request = self.client.get(url);
        if let Some(value) = authorization {
            request = request.header(AUTHORIZATION, value);
        }
        let response = request
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &label))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &label))?;
        response.json::<T>().await.map_err(|err| {
            if err.is_decode() {
                ProviderError::Parse {
                    message: err.to_string(),
                }
            } else {
                self.convert_reqwest_error(&err, &label)
            }
        })
    }

    /// Convert a reqwest error to a `ProviderError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> ProviderError {
        if error.is_timeout() {
            return ProviderError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return ProviderError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        ProviderError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Origin and path of `url`; query strings may carry credentials.
fn display_url(url: &Url) -> String {
    format!("{}{}", url.origin().ascii_serialization(), url.path())
}
