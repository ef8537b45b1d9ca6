//! Facade crate for the Wayfare destination engine.
//!
//! This crate re-exports the core domain types and exposes the resolver, the
//! map view and the HTTP providers behind feature flags.

#![forbid(unsafe_code)]

pub use wayfare_core::{
    Category, CountryDataSource, CuratedDestination, DestinationKind, GeocodeResolver,
    ImageResolver, NeighborFinder, NeighborRef, Place, PlaceFinder, PlaceholderImage,
    ProviderError, QuickFacts, ResolvedViewModel, StaticCatalog,
};

#[cfg(feature = "test-support")]
pub use wayfare_core::test_support;

#[cfg(feature = "resolver")]
pub use wayfare_resolver::{
    DestinationNotFound, DestinationResolver, DisplaySlot, PageState, Providers, ResolveRequest,
    ResolverConfig, navigate,
};

#[cfg(feature = "map")]
pub use wayfare_map::{Frame, InfoPanel, MapConfig, MapView, Marker, ViewState};

#[cfg(feature = "http")]
pub use wayfare_data::{
    GeoNamesDirectory, HttpProviderConfig, NominatimGeocoder, OpenTripMapPlaceFinder,
    ProviderBuildError, RestCountriesSource, UnsplashImageResolver,
};
