//! Country facts over the REST Countries v3.1 API.

use async_trait::async_trait;
use serde::Deserialize;
use wayfare_core::{
    Coordinate, CountryDataSource, CountryProfile, PlaceCandidate, ProviderError, slugify,
};

use crate::geonames::GeoNamesDirectory;
use crate::http::{HttpProviderConfig, JsonClient, ProviderBuildError};

/// Public REST Countries endpoint.
pub const BASE_URL: &str = "https://restcountries.com/v3.1";

/// Only the fields a [`CountryProfile`] needs.
const FIELDS: &str = "name,capital,region,subregion,population,capitalInfo,cca2";
const NOT_FOUND: u16 = 404;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountryRecord {
    name: CountryName,
    #[serde(default)]
    capital: Vec<String>,
    #[serde(default)]
    region: String,
    #[serde(default)]
    subregion: Option<String>,
    #[serde(default)]
    population: u64,
    #[serde(default)]
    capital_info: CapitalInfo,
    #[serde(default)]
    cca2: String,
}

#[derive(Debug, Deserialize)]
struct CountryName {
    common: String,
}

#[derive(Debug, Default, Deserialize)]
struct CapitalInfo {
    /// `[lat, lng]`.
    #[serde(default)]
    latlng: Vec<f64>,
}

/// [`CountryDataSource`] backed by `GET /name/{name}`.
///
/// City listings come from an optional [`GeoNamesDirectory`]; without one,
/// [`CountryDataSource::cities_for`] fails with
/// [`ProviderError::MissingCredentials`] and the resolver falls back to the
/// capital.
#[derive(Debug, Clone)]
pub struct RestCountriesSource {
    client: JsonClient,
    cities: Option<GeoNamesDirectory>,
}

impl RestCountriesSource {
    /// Create a source against the public API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpProviderConfig::new(BASE_URL))
    }

    /// Create a source with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails to
    /// build.
    pub fn with_config(config: HttpProviderConfig) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            client: JsonClient::new(config)?,
            cities: None,
        })
    }

    /// List cities through `directory`.
    #[must_use]
    pub fn with_city_directory(mut self, directory: GeoNamesDirectory) -> Self {
        self.cities = Some(directory);
        self
    }
}

#[async_trait(?Send)]
impl CountryDataSource for RestCountriesSource {
    async fn fetch(&self, country_slug: &str) -> Result<Option<CountryProfile>, ProviderError> {
        let name = country_slug.replace('-', " ");
        let url = self
            .client
            .endpoint(&["name", name.trim()], &[("fields", FIELDS)]);
        let records: Vec<CountryRecord> = match self.client.get_json(url, None).await {
            Ok(records) => records,
            Err(ProviderError::Http { status: NOT_FOUND, .. }) => {
                log::debug!("restcountries does not know {country_slug:?}");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        Ok(convert_records(country_slug, records))
    }

    async fn cities_for(
        &self,
        common_name: &str,
        country_code: &str,
    ) -> Result<Vec<PlaceCandidate>, ProviderError> {
        let Some(directory) = &self.cities else {
            return Err(ProviderError::MissingCredentials {
                provider: "geonames",
            });
        };
        log::debug!("listing cities of {common_name} ({country_code})");
        directory.cities(country_code).await
    }
}

/// The record whose common name matches `slug`, otherwise the first one.
///
/// Name searches are fuzzy: `/name/india` also returns British Indian Ocean
/// Territory.
fn convert_records(slug: &str, records: Vec<CountryRecord>) -> Option<CountryProfile> {
    let wanted = slugify(slug);
    let position = records
        .iter()
        .position(|record| slugify(&record.name.common) == wanted)
        .unwrap_or_default();
    records.into_iter().nth(position).map(convert_record)
}

fn convert_record(record: CountryRecord) -> CountryProfile {
    let capital_coordinate = match record.capital_info.latlng.as_slice() {
        [lat, lng, ..] => Coordinate::new(*lat, *lng).ok(),
        _ => None,
    };
    CountryProfile {
        name: record.name.common,
        capital: record
            .capital
            .into_iter()
            .map(|capital| capital.trim().to_owned())
            .find(|capital| !capital.is_empty()),
        region: record.region,
        subregion: record.subregion.filter(|subregion| !subregion.trim().is_empty()),
        population: record.population,
        capital_coordinate,
        country_code: record.cca2,
    }
}
