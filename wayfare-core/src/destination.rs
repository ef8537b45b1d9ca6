//! Destination entities, in their unresolved and resolved forms.

use serde::{Deserialize, Serialize};

use crate::coordinate::{Coordinate, CoordinateValue};
use crate::slug::{attraction_link, slugify};

/// Which kind of page a destination renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    /// A country page listing cities and categories.
    Country,
    /// A city page listing places and interests.
    City,
}

impl DestinationKind {
    /// Lower-case label used in logs and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::City => "city",
        }
    }
}

impl std::fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A place or city entry before its image has been resolved.
///
/// Generic template entries carry a `query` used for image search instead of
/// an image.
///
/// # Examples
///
/// ```
/// use wayfare_core::PlaceCandidate;
///
/// let market = PlaceCandidate::new("Local Market", "Shopping & Cuisine")
///     .with_query("market food");
/// assert!(market.image.is_none());
/// assert!(market.coordinate().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlaceCandidate {
    /// Display name.
    pub name: String,
    /// Short tag shown above the name.
    #[serde(default)]
    pub descriptor: String,
    /// Optional one-line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Raw latitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<CoordinateValue>,
    /// Raw longitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<CoordinateValue>,
    /// Image URL, when already known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Explicit details link overriding the slug-derived one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Image search hint for template entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl PlaceCandidate {
    /// Construct a candidate with a name and descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
            ..Self::default()
        }
    }

    /// Attach an image search hint.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Attach a known image.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach raw coordinates.
    #[must_use]
    pub fn with_position(
        mut self,
        lat: impl Into<CoordinateValue>,
        lon: impl Into<CoordinateValue>,
    ) -> Self {
        self.lat = Some(lat.into());
        self.lon = Some(lon.into());
        self
    }

    /// Attach a validated coordinate.
    #[must_use]
    pub fn with_coordinate(self, coordinate: Coordinate) -> Self {
        self.with_position(coordinate.lat, coordinate.lon)
    }

    /// Attach an explicit details link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// The parsed coordinate, when both components are usable.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_values(self.lat.as_ref(), self.lon.as_ref())
    }

    /// Finish the candidate with its resolved image.
    #[must_use]
    pub fn resolve(self, image: String) -> Place {
        Place {
            name: self.name,
            descriptor: self.descriptor,
            description: self.description,
            lat: self.lat,
            lon: self.lon,
            image,
            link: self.link,
        }
    }
}

/// A place or city ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Display name.
    pub name: String,
    /// Short tag shown above the name.
    pub descriptor: String,
    /// Optional one-line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Raw latitude, kept so list views can show unmappable places.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<CoordinateValue>,
    /// Raw longitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<CoordinateValue>,
    /// Image URL; never empty.
    pub image: String,
    /// Explicit details link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Place {
    /// The parsed coordinate, when both components are usable.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_values(self.lat.as_ref(), self.lon.as_ref())
    }

    /// The explicit link, or `/attraction/{slug}`.
    #[must_use]
    pub fn details_link(&self) -> String {
        self.link
            .clone()
            .unwrap_or_else(|| attraction_link(&self.name))
    }
}

/// A category or interest tile before its image has been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CategoryCandidate {
    /// Tile title.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Image search hint.
    #[serde(default)]
    pub query: String,
    /// Known image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Marks the single featured (map) tile.
    #[serde(default)]
    pub featured: bool,
}

impl CategoryCandidate {
    /// Construct a tile with its search hint.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        query: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            query: query.into(),
            image: None,
            featured: false,
        }
    }

    /// Mark the tile as featured.
    #[must_use]
    pub const fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Finish the tile with its resolved image.
    #[must_use]
    pub fn resolve(self, image: String) -> Category {
        Category {
            name: self.name,
            description: self.description,
            image,
            featured: self.featured,
        }
    }
}

/// A resolved category or interest tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Tile title.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Image URL; never empty.
    pub image: String,
    /// Marks the single featured (map) tile.
    pub featured: bool,
}

/// A nearby destination before its image has been resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NeighborCandidate {
    /// Display name.
    pub name: String,
    /// Human-readable distance, e.g. `"42 km"`.
    #[serde(default)]
    pub distance: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Raw latitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<CoordinateValue>,
    /// Raw longitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<CoordinateValue>,
    /// Known image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl NeighborCandidate {
    /// Construct a neighbour with a distance label and description.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        distance: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            distance: distance.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Finish the neighbour with its resolved image.
    #[must_use]
    pub fn resolve(self, image: String) -> NeighborRef {
        NeighborRef {
            name: self.name,
            distance: self.distance,
            description: self.description,
            lat: self.lat,
            lon: self.lon,
            image,
        }
    }
}

/// A resolved entry for the "explore nearby" panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborRef {
    /// Display name.
    pub name: String,
    /// Human-readable distance.
    pub distance: String,
    /// Short description.
    pub description: String,
    /// Raw latitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<CoordinateValue>,
    /// Raw longitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<CoordinateValue>,
    /// Image URL; never empty.
    pub image: String,
}

impl NeighborRef {
    /// City page link within `country`.
    #[must_use]
    pub fn link(&self, country: &str) -> String {
        format!("/country/{}/city/{}", slugify(country), slugify(&self.name))
    }
}

/// Headline facts shown in the snapshot strip.
///
/// Every field is optional; [`QuickFacts::or`] fills gaps without overwriting
/// populated fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QuickFacts {
    /// Region or subregion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Capital city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital: Option<String>,
    /// Population, formatted as millions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<String>,
    /// Best time to visit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time: Option<String>,
    /// What the destination is known for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_for: Option<String>,
    /// Suggested stay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// One-line mood.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibe: Option<String>,
}

impl QuickFacts {
    /// Keep populated fields of `self`, taking the rest from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            region: self.region.or(fallback.region),
            capital: self.capital.or(fallback.capital),
            population: self.population.or(fallback.population),
            best_time: self.best_time.or(fallback.best_time),
            known_for: self.known_for.or(fallback.known_for),
            duration: self.duration.or(fallback.duration),
            vibe: self.vibe.or(fallback.vibe),
        }
    }
}

/// Format a head count as millions with one decimal, e.g. `"67.4M"`.
#[must_use]
pub fn format_population(population: u64) -> String {
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "population figures are displayed with one decimal"
    )]
    let millions = population as f64 / 1_000_000.0;
    format!("{millions:.1}M")
}

/// A hand-curated static catalog record.
///
/// Identity fields (`name`, `description`, curated lists) are authoritative
/// over anything a provider returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CuratedDestination {
    /// Display name.
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Hero tagline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    /// Curated hero image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Raw latitude of the destination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<CoordinateValue>,
    /// Raw longitude of the destination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<CoordinateValue>,
    /// Capital city, for countries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital: Option<String>,
    /// Curated facts.
    #[serde(default)]
    pub quick_facts: QuickFacts,
    /// Cities (countries) or places (cities).
    #[serde(default, alias = "cities")]
    pub places: Vec<PlaceCandidate>,
    /// Category or interest tiles.
    #[serde(default)]
    pub categories: Vec<CategoryCandidate>,
    /// Nearby destinations.
    #[serde(default)]
    pub neighbors: Vec<NeighborCandidate>,
    /// Travel tips.
    #[serde(default)]
    pub tips: Vec<String>,
}

impl CuratedDestination {
    /// Construct a record with a name and description.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Replace the curated place or city list.
    #[must_use]
    pub fn with_places(mut self, places: Vec<PlaceCandidate>) -> Self {
        self.places = places;
        self
    }

    /// Replace the curated category list.
    #[must_use]
    pub fn with_categories(mut self, categories: Vec<CategoryCandidate>) -> Self {
        self.categories = categories;
        self
    }

    /// Replace the curated neighbour list.
    #[must_use]
    pub fn with_neighbors(mut self, neighbors: Vec<NeighborCandidate>) -> Self {
        self.neighbors = neighbors;
        self
    }

    /// Set the curated hero image.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the capital city.
    #[must_use]
    pub fn with_capital(mut self, capital: impl Into<String>) -> Self {
        self.capital = Some(capital.into());
        self
    }

    /// The curated coordinate, when both components are usable.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_values(self.lat.as_ref(), self.lon.as_ref())
    }
}

/// Live country facts returned by a [`crate::CountryDataSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryProfile {
    /// Common English name.
    pub name: String,
    /// Capital city.
    pub capital: Option<String>,
    /// Continental region.
    pub region: String,
    /// Subregion, when the source knows one.
    pub subregion: Option<String>,
    /// Head count.
    pub population: u64,
    /// Position of the capital.
    pub capital_coordinate: Option<Coordinate>,
    /// ISO 3166-1 alpha-2 code.
    pub country_code: String,
}

impl CountryProfile {
    /// Subregion when known, otherwise the region.
    #[must_use]
    pub fn location_label(&self) -> &str {
        self.subregion
            .as_deref()
            .filter(|subregion| !subregion.is_empty())
            .unwrap_or(&self.region)
    }
}
