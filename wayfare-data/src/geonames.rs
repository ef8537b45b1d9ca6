//! Neighbouring places and city listings over the GeoNames web services.
//!
//! GeoNames authenticates by account name (`username` query parameter) and
//! reports most failures inside a `200 OK` body, so every response is checked
//! for a `status` object before its records are used.

use async_trait::async_trait;
use serde::Deserialize;
use wayfare_core::{
    CoordinateValue, NeighborCandidate, NeighborFinder, PlaceCandidate, ProviderError,
    format_population,
};

use crate::http::{HttpProviderConfig, JsonClient, ProviderBuildError};

/// Public GeoNames endpoint.
pub const BASE_URL: &str = "https://secure.geonames.org";

const PROVIDER: &str = "geonames";
/// The free tier caps nearby searches at 300 km.
const NEARBY_RADIUS_KM: &str = "300";
const MAX_NEIGHBORS: &str = "10";
const MAX_CITIES: &str = "10";
/// Only places with more than 15 000 inhabitants count as neighbours.
const NEARBY_CITY_SET: &str = "cities15000";
/// Populated places (cities, towns, villages).
const POPULATED_PLACE: &str = "P";
const CITY_DESCRIPTOR: &str = "City";

#[derive(Debug, Deserialize)]
struct Listing {
    #[serde(default)]
    geonames: Vec<GeoName>,
    #[serde(default)]
    status: Option<ServiceStatus>,
}

#[derive(Debug, Deserialize)]
struct ServiceStatus {
    message: String,
    #[serde(default)]
    value: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeoName {
    #[serde(default)]
    geoname_id: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    lat: Option<CoordinateValue>,
    #[serde(default)]
    lng: Option<CoordinateValue>,
    #[serde(default)]
    country_name: Option<String>,
    #[serde(default)]
    population: Option<u64>,
    /// Kilometres from the search origin, as a decimal string.
    #[serde(default)]
    distance: Option<String>,
}

impl Listing {
    fn into_records(self) -> Result<Vec<GeoName>, ProviderError> {
        match self.status {
            Some(status) => Err(ProviderError::Rejected {
                provider: PROVIDER,
                message: match status.value {
                    Some(code) => format!("{} (code {code})", status.message),
                    None => status.message,
                },
            }),
            None => Ok(self.geonames),
        }
    }
}

/// GeoNames client: a [`NeighborFinder`] and the city directory used by
/// [`crate::RestCountriesSource`].
#[derive(Debug, Clone)]
pub struct GeoNamesDirectory {
    client: JsonClient,
}

impl GeoNamesDirectory {
    /// Create a directory against the public service for `username`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(username: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpProviderConfig::new(BASE_URL).with_api_key(username))
    }

    /// Create a directory with explicit configuration; the account name is
    /// the configured API key.
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

    /// The most populous places of a country, largest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::MissingCredentials`] without an account name,
    /// or any transport or service error.
    pub async fn cities(&self, country_code: &str) -> Result<Vec<PlaceCandidate>, ProviderError> {
        let username = self.client.credential(PROVIDER)?;
        let url = self.client.endpoint(
            &["searchJSON"],
            &[
                ("country", country_code),
                ("featureClass", POPULATED_PLACE),
                ("orderby", "population"),
                ("maxRows", MAX_CITIES),
                ("username", username),
            ],
        );
        let listing: Listing = self.client.get_json(url, None).await?;
        let cities = convert_cities(listing.into_records()?);
        log::debug!("geonames lists {} cities for {country_code}", cities.len());
        Ok(cities)
    }

    async fn locate(&self, city: &str, username: &str) -> Result<Option<GeoName>, ProviderError> {
        let url = self.client.endpoint(
            &["searchJSON"],
            &[
                ("q", city),
                ("featureClass", POPULATED_PLACE),
                ("maxRows", "1"),
                ("username", username),
            ],
        );
        let listing: Listing = self.client.get_json(url, None).await?;
        Ok(listing.into_records()?.into_iter().next())
    }
}

#[async_trait(?Send)]
impl NeighborFinder for GeoNamesDirectory {
    async fn near(&self, city: &str) -> Result<Vec<NeighborCandidate>, ProviderError> {
        let username = self.client.credential(PROVIDER)?;
        let Some(origin) = self.locate(city, username).await? else {
            log::debug!("geonames does not know {city:?}");
            return Ok(Vec::new());
        };
        let (Some(lat), Some(lng)) = (
            origin.lat.as_ref().and_then(CoordinateValue::parse),
            origin.lng.as_ref().and_then(CoordinateValue::parse),
        ) else {
            return Ok(Vec::new());
        };

        let (lat_text, lng_text) = (lat.to_string(), lng.to_string());
        let url = self.client.endpoint(
            &["findNearbyPlaceNameJSON"],
            &[
                ("lat", lat_text.as_str()),
                ("lng", lng_text.as_str()),
                ("radius", NEARBY_RADIUS_KM),
                ("maxRows", MAX_NEIGHBORS),
                ("cities", NEARBY_CITY_SET),
                ("username", username),
            ],
        );
        let listing: Listing = self.client.get_json(url, None).await?;
        let neighbors = convert_neighbors(city, &origin, listing.into_records()?);
        log::debug!("geonames found {} neighbours of {city:?}", neighbors.len());
        Ok(neighbors)
    }
}

/// Nearby places, without the origin itself.
fn convert_neighbors(
    city: &str,
    origin: &GeoName,
    records: Vec<GeoName>,
) -> Vec<NeighborCandidate> {
    records
        .into_iter()
        .filter(|record| !record.name.trim().is_empty())
        .filter(|record| {
            record.geoname_id != origin.geoname_id && !record.name.eq_ignore_ascii_case(city.trim())
        })
        .map(|record| {
            let distance = record
                .distance
                .as_deref()
                .and_then(|km| km.trim().parse::<f64>().ok())
                .filter(|km| km.is_finite())
                .map_or_else(|| "Nearby".to_owned(), |km| format!("{km:.0} km"));
            let description = record.country_name.as_deref().map_or_else(
                || "A nearby city.".to_owned(),
                |country| format!("A nearby city in {country}."),
            );
            let mut neighbor = NeighborCandidate::new(record.name, distance, description);
            neighbor.lat = record.lat;
            neighbor.lon = record.lng;
            neighbor
        })
        .collect()
}

fn convert_cities(records: Vec<GeoName>) -> Vec<PlaceCandidate> {
    records
        .into_iter()
        .filter(|record| !record.name.trim().is_empty())
        .map(|record| {
            let mut city = PlaceCandidate::new(record.name.trim(), CITY_DESCRIPTOR);
            if let Some(population) = record.population.filter(|&count| count > 0) {
                city = city.with_description(format!(
                    "Home to about {} people.",
                    format_population(population)
                ));
            }
            if let (Some(lat), Some(lng)) = (record.lat, record.lng) {
                city = city.with_position(lat, lng);
            }
            city
        })
        .collect()
}
