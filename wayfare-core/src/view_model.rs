use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::destination::{Category, DestinationKind, NeighborRef, Place, QuickFacts};

/// The merged result of one resolution, handed to presentation.
///
/// A view model is built fresh for every navigation and never mutated once
/// committed for display. For countries `places` holds the city list and
/// `categories` the category grid; for cities they hold the points of interest
/// and the interest tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedViewModel {
    /// Page kind.
    pub kind: DestinationKind,
    /// Lower-cased identifier the model was resolved for.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Hero tagline.
    pub identity: String,
    /// Long description.
    pub description: String,
    /// Hero image URL; never empty.
    pub image: String,
    /// Map focus when no point can be fitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<Coordinate>,
    /// Snapshot facts.
    pub quick_facts: QuickFacts,
    /// Places (cities) or cities (countries).
    pub places: Vec<Place>,
    /// Interests (cities) or categories (countries).
    pub categories: Vec<Category>,
    /// Nearby destinations; empty hides the section.
    pub neighbors: Vec<NeighborRef>,
    /// Travel tips.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tips: Vec<String>,
}

impl ResolvedViewModel {
    /// City list of a country page; empty for city pages.
    #[must_use]
    pub fn cities(&self) -> &[Place] {
        match self.kind {
            DestinationKind::Country => &self.places,
            DestinationKind::City => &[],
        }
    }

    /// Interest tiles of a city page; empty for country pages.
    #[must_use]
    pub fn interests(&self) -> &[Category] {
        match self.kind {
            DestinationKind::City => &self.categories,
            DestinationKind::Country => &[],
        }
    }

    /// Points handed to the map layer.
    #[must_use]
    pub fn map_points(&self) -> &[Place] {
        &self.places
    }

    /// Every image URL in the model, hero first.
    pub fn images(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.image.as_str())
            .chain(self.places.iter().map(|place| place.image.as_str()))
            .chain(self.categories.iter().map(|tile| tile.image.as_str()))
            .chain(self.neighbors.iter().map(|neighbor| neighbor.image.as_str()))
    }
}
