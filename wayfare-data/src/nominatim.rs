//! Geocoding over the OpenStreetMap Nominatim API.

use async_trait::async_trait;
use serde::Deserialize;
use wayfare_core::{Coordinate, CoordinateValue, GeocodeResolver, ProviderError};

use crate::http::{HttpProviderConfig, JsonClient, ProviderBuildError};

/// Public Nominatim endpoint.
pub const BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim answers with string coordinates.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: CoordinateValue,
    lon: CoordinateValue,
}

/// [`GeocodeResolver`] backed by `GET /search`.
///
/// Nominatim needs no key, but its usage policy requires a descriptive user
/// agent; see [`HttpProviderConfig::with_user_agent`].
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: JsonClient,
}

impl NominatimGeocoder {
    /// Create a geocoder against the public instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpProviderConfig::new(BASE_URL))
    }

    /// Create a geocoder with explicit configuration.
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
impl GeocodeResolver for NominatimGeocoder {
    async fn for_city(&self, city: &str) -> Result<Option<Coordinate>, ProviderError> {
        let url = self.client.endpoint(
            &["search"],
            &[("q", city), ("format", "json"), ("limit", "1")],
        );
        let hits: Vec<SearchHit> = self.client.get_json(url, None).await?;
        let coordinate = convert_hits(&hits);
        log::debug!("nominatim {city:?}: {coordinate:?}");
        Ok(coordinate)
    }
}

/// The first hit, when its coordinates parse and are in range.
fn convert_hits(hits: &[SearchHit]) -> Option<Coordinate> {
    let first = hits.first()?;
    Coordinate::from_values(Some(&first.lat), Some(&first.lon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(json: &str) -> Vec<SearchHit> {
        serde_json::from_str(json).expect("should deserialise")
    }

    #[rstest]
    fn parses_string_coordinates() {
        let hits = parse(
            r#"[{"place_id": 88066702, "lat": "48.8588897", "lon": "2.3200410",
                 "display_name": "Paris, Ile-de-France, France"}]"#,
        );
        assert_eq!(convert_hits(&hits), Coordinate::new(48.858_889_7, 2.320_041).ok());
    }

    #[rstest]
    #[case("[]")]
    #[case(r#"[{"lat": "north", "lon": "2.3"}]"#)]
    #[case(r#"[{"lat": "95.0", "lon": "2.3"}]"#)]
    #[case(r#"[{"lat": "10.0", "lon": "-181"}]"#)]
    fn unusable_results_are_none(#[case] json: &str) {
        assert_eq!(convert_hits(&parse(json)), None);
    }
}
