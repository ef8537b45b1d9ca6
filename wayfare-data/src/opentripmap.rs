//! Point-of-interest discovery over the OpenTripMap API.
//!
//! A city is first located with the `geoname` endpoint, then its notable
//! features are listed with a `radius` search around that point.

use async_trait::async_trait;
use serde::Deserialize;
use wayfare_core::{PlaceCandidate, PlaceFinder, ProviderError};

use crate::http::{HttpProviderConfig, JsonClient, ProviderBuildError};

/// Public OpenTripMap endpoint (English locale).
pub const BASE_URL: &str = "https://api.opentripmap.com/0.1/en/places";

const PROVIDER: &str = "opentripmap";
const CARD_URL: &str = "https://opentripmap.com/en/card";
const SEARCH_RADIUS_METRES: &str = "5000";
const MAX_FEATURES: &str = "12";
/// Popularity floor; `3` keeps only features with a heritage or Wikipedia entry.
const MIN_RATE: &str = "3";
const FALLBACK_DESCRIPTOR: &str = "Point of Interest";

#[derive(Debug, Deserialize)]
struct GeonameResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

impl GeonameResponse {
    fn centre(&self) -> Option<(f64, f64)> {
        if self.status.as_deref() != Some("OK") {
            return None;
        }
        Some((self.lat?, self.lon?))
    }
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    xid: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    kinds: String,
    point: Option<Point>,
}

#[derive(Debug, Deserialize)]
struct Point {
    lat: f64,
    lon: f64,
}

/// [`PlaceFinder`] backed by OpenTripMap.
///
/// The API key is sent as the `apikey` query parameter.
#[derive(Debug, Clone)]
pub struct OpenTripMapPlaceFinder {
    client: JsonClient,
}

impl OpenTripMapPlaceFinder {
    /// Create a finder against the public API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpProviderConfig::new(BASE_URL).with_api_key(api_key))
    }

    /// Create a finder with explicit configuration.
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
impl PlaceFinder for OpenTripMapPlaceFinder {
    async fn for_city(&self, city: &str) -> Result<Vec<PlaceCandidate>, ProviderError> {
        let key = self.client.credential(PROVIDER)?;
        let url = self
            .client
            .endpoint(&["geoname"], &[("name", city), ("apikey", key)]);
        let geoname: GeonameResponse = self.client.get_json(url, None).await?;
        let Some((lat, lon)) = geoname.centre() else {
            log::debug!("opentripmap does not know {city:?}");
            return Ok(Vec::new());
        };

        let (lat_text, lon_text) = (lat.to_string(), lon.to_string());
        let url = self.client.endpoint(
            &["radius"],
            &[
                ("radius", SEARCH_RADIUS_METRES),
                ("lon", lon_text.as_str()),
                ("lat", lat_text.as_str()),
                ("rate", MIN_RATE),
                ("format", "json"),
                ("limit", MAX_FEATURES),
                ("apikey", key),
            ],
        );
        let features: Vec<Feature> = self.client.get_json(url, None).await?;
        let places = convert_features(features);
        log::debug!("opentripmap found {} places in {city:?}", places.len());
        Ok(places)
    }
}

fn convert_features(features: Vec<Feature>) -> Vec<PlaceCandidate> {
    features.into_iter().filter_map(convert_feature).collect()
}

/// Unnamed features are dropped; they would render as blank cards.
fn convert_feature(feature: Feature) -> Option<PlaceCandidate> {
    let name = feature.name.trim();
    if name.is_empty() {
        return None;
    }
    let mut place = PlaceCandidate::new(name, descriptor(&feature.kinds));
    if let Some(point) = feature.point {
        place = place.with_position(point.lat, point.lon);
    }
    let xid = feature.xid.trim();
    if !xid.is_empty() {
        place = place.with_link(format!("{CARD_URL}/{xid}"));
    }
    Some(place)
}

/// Human label for the most specific kind, e.g. `historic_architecture`
/// becomes `Historic Architecture`.
fn descriptor(kinds: &str) -> String {
    let label = kinds
        .split(',')
        .map(str::trim)
        .find(|kind| !kind.is_empty())
        .map(|kind| {
            kind.split('_')
                .filter(|word| !word.is_empty())
                .map(capitalise)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default();
    if label.is_empty() {
        FALLBACK_DESCRIPTOR.to_owned()
    } else {
        label
    }
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
