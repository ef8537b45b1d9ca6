//! The hand-curated static catalog.
//!
//! The catalog maps lower-cased slugs to [`CuratedDestination`] records,
//! split into countries and cities. It is loaded once, either from the
//! dataset embedded in this crate or from a JSON document with the same
//! shape, and is read-only afterwards.
//!
//! ```json
//! {
//!   "countries": { "japan": { "name": "Japan", "cities": [ ... ] } },
//!   "cities": { "kyoto": { "name": "Kyoto", "places": [ ... ] } }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::io::Read;

use serde::Deserialize;
use thiserror::Error;

use crate::destination::{CuratedDestination, DestinationKind};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Errors raised while loading a catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not valid catalog JSON.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two keys normalise to the same slug.
    #[error("duplicate {kind} slug {slug:?} in catalog")]
    DuplicateSlug {
        /// Section containing the duplicate.
        kind: DestinationKind,
        /// Normalised slug.
        slug: String,
    },
    /// A record has an empty name.
    #[error("{kind} {slug:?} has no name")]
    MissingName {
        /// Section containing the record.
        kind: DestinationKind,
        /// Normalised slug.
        slug: String,
    },
}

#[derive(Debug, Default, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    countries: BTreeMap<String, CuratedDestination>,
    #[serde(default)]
    cities: BTreeMap<String, CuratedDestination>,
}

/// Read-only lookup of curated destinations.
///
/// # Examples
///
/// ```
/// use wayfare_core::{CuratedDestination, StaticCatalog};
///
/// let catalog = StaticCatalog::empty()
///     .with_country("France", CuratedDestination::new("France", "Wine and art."));
/// assert!(catalog.country("FRANCE").is_some());
/// assert!(catalog.city("paris").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    countries: HashMap<String, CuratedDestination>,
    cities: HashMap<String, CuratedDestination>,
}

impl StaticCatalog {
    /// A catalog with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The dataset shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the embedded dataset is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Parse a catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the JSON is malformed, a record has no
    /// name, or two keys collide after normalisation.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Parse a catalog document from a reader.
    ///
    /// # Errors
    ///
    /// See [`StaticCatalog::from_json_str`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        let catalog = Self {
            countries: normalise(DestinationKind::Country, document.countries)?,
            cities: normalise(DestinationKind::City, document.cities)?,
        };
        log::debug!(
            "loaded catalog: {} countries, {} cities",
            catalog.countries.len(),
            catalog.cities.len()
        );
        Ok(catalog)
    }

    /// Add or replace a country record.
    #[must_use]
    pub fn with_country(mut self, slug: &str, record: CuratedDestination) -> Self {
        self.countries.insert(normalise_slug(slug), record);
        self
    }

    /// Add or replace a city record.
    #[must_use]
    pub fn with_city(mut self, slug: &str, record: CuratedDestination) -> Self {
        self.cities.insert(normalise_slug(slug), record);
        self
    }

    /// Look up a country by slug, ignoring case.
    #[must_use]
    pub fn country(&self, slug: &str) -> Option<&CuratedDestination> {
        self.countries.get(&normalise_slug(slug))
    }

    /// Look up a city by slug, ignoring case.
    #[must_use]
    pub fn city(&self, slug: &str) -> Option<&CuratedDestination> {
        self.cities.get(&normalise_slug(slug))
    }

    /// Look up a record of the given kind.
    #[must_use]
    pub fn lookup(&self, kind: DestinationKind, slug: &str) -> Option<&CuratedDestination> {
        match kind {
            DestinationKind::Country => self.country(slug),
            DestinationKind::City => self.city(slug),
        }
    }

    /// Total number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.countries.len() + self.cities.len()
    }

    /// Whether the catalog has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty() && self.cities.is_empty()
    }

    /// Country slugs in lexical order.
    #[must_use]
    pub fn country_slugs(&self) -> Vec<&str> {
        let mut slugs: Vec<&str> = self.countries.keys().map(String::as_str).collect();
        slugs.sort_unstable();
        slugs
    }
}

fn normalise_slug(slug: &str) -> String {
    slug.trim().to_lowercase()
}

fn normalise(
    kind: DestinationKind,
    records: BTreeMap<String, CuratedDestination>,
) -> Result<HashMap<String, CuratedDestination>, CatalogError> {
    let mut normalised = HashMap::with_capacity(records.len());
    for (key, record) in records {
        let slug = normalise_slug(&key);
        if record.name.trim().is_empty() {
            return Err(CatalogError::MissingName { kind, slug });
        }
        if normalised.contains_key(&slug) {
            return Err(CatalogError::DuplicateSlug { kind, slug });
        }
        normalised.insert(slug, record);
    }
    Ok(normalised)
}
