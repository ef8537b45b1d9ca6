//! HTTP adapters for the Wayfare content providers.
//!
//! Responsibilities:
//! - Implement every provider contract from `wayfare-core` against a public
//!   web service.
//! - Translate wire payloads into domain candidates through pure conversion
//!   functions.
//!
//! Boundaries:
//! - No precedence or fallback rules; those live in `wayfare-resolver`.
//! - No retries. A failed call is reported as a [`ProviderError`] and the
//!   caller decides what to do with it.
//!
//! Invariants:
//! - Adapters that need credentials fail with
//!   [`ProviderError::MissingCredentials`] before touching the network.
//!
//! [`ProviderError`]: wayfare_core::ProviderError
//! [`ProviderError::MissingCredentials`]: wayfare_core::ProviderError::MissingCredentials

#![forbid(unsafe_code)]

mod geonames;
pub mod http;
mod nominatim;
mod opentripmap;
mod restcountries;
mod unsplash;

pub use geonames::{BASE_URL as GEONAMES_BASE_URL, GeoNamesDirectory};
pub use http::{DEFAULT_USER_AGENT, HttpProviderConfig, ProviderBuildError};
pub use nominatim::{BASE_URL as NOMINATIM_BASE_URL, NominatimGeocoder};
pub use opentripmap::{BASE_URL as OPENTRIPMAP_BASE_URL, OpenTripMapPlaceFinder};
pub use restcountries::{BASE_URL as RESTCOUNTRIES_BASE_URL, RestCountriesSource};
pub use unsplash::{BASE_URL as UNSPLASH_BASE_URL, UnsplashImageResolver};
