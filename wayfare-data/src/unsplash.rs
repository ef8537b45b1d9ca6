//! Image search over the Unsplash API.

use async_trait::async_trait;
use serde::Deserialize;
use wayfare_core::{ImageResolver, ProviderError};

use crate::http::{HttpProviderConfig, JsonClient, ProviderBuildError};

/// Public Unsplash API endpoint.
pub const BASE_URL: &str = "https://api.unsplash.com";

const PROVIDER: &str = "unsplash";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    #[serde(default)]
    regular: Option<String>,
}

/// [`ImageResolver`] backed by `GET /search/photos`.
///
/// The access key travels in the `Authorization: Client-ID` header; without
/// one every search fails with [`ProviderError::MissingCredentials`].
#[derive(Debug, Clone)]
pub struct UnsplashImageResolver {
    client: JsonClient,
}

impl UnsplashImageResolver {
    /// Create a resolver against the public API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(access_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpProviderConfig::new(BASE_URL).with_api_key(access_key))
    }

    /// Create a resolver with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails to
    /// build.
    pub fn with_config(config: HttpProviderConfig) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            client: JsonClient::new(config)?,
        })
    }
}

#[async_trait(?Send)]
impl ImageResolver for UnsplashImageResolver {
    async fn search(&self, query: &str) -> Result<Option<String>, ProviderError> {
        let key = self.client.credential(PROVIDER)?;
        let url = self
            .client
            .endpoint(&["search", "photos"], &[("query", query), ("per_page", "1")]);
        let response: SearchResponse = self
            .client
            .get_json(url, Some(format!("Client-ID {key}")))
            .await?;
        let image = convert_search(response);
        log::debug!("unsplash {query:?}: {}", image.as_deref().unwrap_or("no match"));
        Ok(image)
    }
}

/// The first usable photo URL.
fn convert_search(response: SearchResponse) -> Option<String> {
    response
        .results
        .into_iter()
        .filter_map(|photo| photo.urls.regular)
        .find(|url| !url.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(json: &str) -> SearchResponse {
        serde_json::from_str(json).expect("should deserialise")
    }

    #[rstest]
    fn picks_the_first_regular_url() {
        let response = parse(
            r#"{"total": 2, "results": [
                {"id": "a", "urls": {"regular": "https://images.unsplash.com/a", "thumb": "t"}},
                {"id": "b", "urls": {"regular": "https://images.unsplash.com/b"}}
            ]}"#,
        );
        assert_eq!(
            convert_search(response).as_deref(),
            Some("https://images.unsplash.com/a")
        );
    }

    #[rstest]
    #[case(r#"{"total": 0, "results": []}"#)]
    #[case(r#"{"errors": ["OAuth error"]}"#)]
    #[case(r#"{"results": [{"urls": {"regular": "  "}}]}"#)]
    #[case(r#"{"results": [{"urls": {"small": "https://images.unsplash.com/s"}}]}"#)]
    fn yields_nothing_without_a_usable_photo(#[case] json: &str) {
        assert_eq!(convert_search(parse(json)), None);
    }

    #[rstest]
    fn skips_photos_without_a_regular_rendition() {
        let response = parse(
            r#"{"results": [
                {"urls": {"thumb": "t"}},
                {"urls": {"regular": "https://images.unsplash.com/second"}}
            ]}"#,
        );
        assert_eq!(
            convert_search(response).as_deref(),
            Some("https://images.unsplash.com/second")
        );
    }
}
