//! Map presentation state for Wayfare destination pages.
//!
//! Responsibilities:
//! - Decide which entities can be placed on a map and build their markers.
//! - Fit the camera to the markers in Web Mercator, or fall back to a focus
//!   point or a neutral default view.
//! - Track marker selection, the info panel and fly-to transitions.
//!
//! Boundaries:
//! - No rendering. [`MapView::frame`] describes what a renderer should draw.
//! - No I/O; tiles are referenced by URL template only.
//!
//! Invariants:
//! - An entity is mapped only when both coordinates parse as finite, in-range
//!   numbers. Unmappable entities are dropped silently.
//! - The camera is recomputed synchronously inside [`MapView::update`], so a
//!   frame never shows a fit computed for earlier inputs.

#![forbid(unsafe_code)]

mod config;
mod flight;
mod marker;
pub mod projection;
mod view;

pub use config::{MapConfig, Viewport};
pub use flight::{Camera, FlyTo};
pub use marker::{InfoPanel, Marker, Thumbnail, directions_url};
pub use view::{Bounds, Frame, Interaction, MapView, TileLayer, ViewState};
