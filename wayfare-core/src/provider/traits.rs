//! Provider traits consumed by the resolver.

use async_trait::async_trait;

use crate::coordinate::Coordinate;
use crate::destination::{CountryProfile, NeighborCandidate, PlaceCandidate};

use super::error::ProviderError;

/// Find one representative image for a free-text query.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use wayfare_core::{ImageResolver, ProviderError};
///
/// struct Fixed;
///
/// #[async_trait(?Send)]
/// impl ImageResolver for Fixed {
///     async fn search(&self, query: &str) -> Result<Option<String>, ProviderError> {
///         Ok(Some(format!("https://img.example/{}", query.replace(' ', "-"))))
///     }
/// }
/// ```
#[async_trait(?Send)]
pub trait ImageResolver {
    /// Return an image URL, `None` when nothing matched.
    async fn search(&self, query: &str) -> Result<Option<String>, ProviderError>;
}

/// Discover points of interest for a city.
#[async_trait(?Send)]
pub trait PlaceFinder {
    /// Return points of interest; an empty list when none were found.
    async fn for_city(&self, city: &str) -> Result<Vec<PlaceCandidate>, ProviderError>;
}

/// Resolve a destination name to a representative coordinate.
#[async_trait(?Send)]
pub trait GeocodeResolver {
    /// Return the coordinate, `None` when the name is unknown.
    async fn for_city(&self, city: &str) -> Result<Option<Coordinate>, ProviderError>;
}

/// Discover destinations near a city.
#[async_trait(?Send)]
pub trait NeighborFinder {
    /// Return nearby destinations, excluding the city itself.
    async fn near(&self, city: &str) -> Result<Vec<NeighborCandidate>, ProviderError>;
}

/// Live country facts and city enumeration.
#[async_trait(?Send)]
pub trait CountryDataSource {
    /// Fetch the profile for a country slug, `None` when unknown.
    async fn fetch(&self, country_slug: &str) -> Result<Option<CountryProfile>, ProviderError>;

    /// List notable cities of a country.
    ///
    /// `common_name` is the profile name and `country_code` its ISO alpha-2
    /// code.
    async fn cities_for(
        &self,
        common_name: &str,
        country_code: &str,
    ) -> Result<Vec<PlaceCandidate>, ProviderError>;
}
