//! Destination page resolution for the Wayfare engine.
//!
//! Responsibilities:
//! - Merge the static catalog with live provider data into a
//!   [`wayfare_core::ResolvedViewModel`].
//! - Fan provider calls out concurrently, each bounded by a timeout, and
//!   degrade to curated, generic or placeholder content when they fail.
//! - Guard the display against results of superseded navigations.
//!
//! Boundaries:
//! - No I/O of its own; providers are injected as trait objects.
//! - Provider failures never escape; [`DestinationNotFound`] is the only error.
//!
//! Invariants:
//! - Every image in a resolved model is a non-empty URL.
//! - Curated lists are used verbatim and suppress the matching provider call.
//! - Resolution is idempotent under identical provider responses.

#![forbid(unsafe_code)]

mod city;
mod config;
mod country;
mod fanout;
pub mod generation;
mod merge;
mod request;
mod resolver;
pub mod templates;
pub mod tier;

pub use config::{DEFAULT_CALL_TIMEOUT, ResolverConfig};
pub use fanout::Providers;
pub use generation::{DisplaySlot, GenerationToken, PageState, navigate};
pub use request::{DestinationNotFound, HOME_LINK, ResolveRequest};
pub use resolver::{DestinationResolver, ResolutionObserver};
