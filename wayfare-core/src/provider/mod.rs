//! Contracts for the external content providers.
//!
//! Every provider is unreliable: it may be unreachable, slow, or return
//! malformed data. The traits therefore return [`ProviderError`] rather than
//! panicking, and the resolver treats any error as "no result" for the one
//! field or item it was fetching.
//!
//! The traits are `?Send`: resolution runs on a single-threaded cooperative
//! executor where concurrent calls interleave but never run in parallel.

mod error;
mod traits;

pub use error::ProviderError;
pub use traits::{CountryDataSource, GeocodeResolver, ImageResolver, NeighborFinder, PlaceFinder};
