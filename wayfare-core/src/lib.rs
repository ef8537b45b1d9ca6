//! Core domain types for the Wayfare destination engine.
//!
//! The crate defines the entities exchanged between the static catalog, the
//! external content providers, the resolver and the map layer. Providers are
//! modelled as async traits so adapters can be swapped for stubs in tests.
//!
//! Unresolved entries (`*Candidate`) may lack an image; resolved entries
//! ([`Place`], [`Category`], [`NeighborRef`]) always carry one, so a
//! [`ResolvedViewModel`] can never contain a missing image.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod catalog;
mod coordinate;
mod destination;
pub mod placeholder;
pub mod provider;
mod slug;
mod view_model;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use catalog::{CatalogError, StaticCatalog};
pub use coordinate::{Coordinate, CoordinateError, CoordinateValue};
pub use destination::{
    Category, CategoryCandidate, CountryProfile, CuratedDestination, DestinationKind,
    NeighborCandidate, NeighborRef, Place, PlaceCandidate, QuickFacts, format_population,
};
pub use placeholder::PlaceholderImage;
pub use provider::{
    CountryDataSource, GeocodeResolver, ImageResolver, NeighborFinder, PlaceFinder,
    ProviderError,
};
pub use slug::{attraction_link, display_name, slugify};
pub use view_model::ResolvedViewModel;
