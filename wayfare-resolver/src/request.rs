use thiserror::Error;
use wayfare_core::DestinationKind;

/// Where a reader goes when a destination cannot be shown.
pub const HOME_LINK: &str = "/";

/// A request to resolve one destination page.
///
/// Identifiers are normalised (trimmed, lower-cased) on construction.
///
/// # Examples
///
/// ```
/// use wayfare_core::DestinationKind;
/// use wayfare_resolver::ResolveRequest;
///
/// let request = ResolveRequest::city(" Kyoto ").with_parent("Japan");
/// assert_eq!(request.kind, DestinationKind::City);
/// assert_eq!(request.identifier, "kyoto");
/// assert_eq!(request.parent.as_deref(), Some("japan"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolveRequest {
    /// Page kind.
    pub kind: DestinationKind,
    /// Normalised destination slug.
    pub identifier: String,
    /// Normalised country slug for city pages.
    pub parent: Option<String>,
}

impl ResolveRequest {
    /// Build a request of the given kind.
    #[must_use]
    pub fn new(kind: DestinationKind, identifier: &str) -> Self {
        Self {
            kind,
            identifier: normalise(identifier),
            parent: None,
        }
    }

    /// A country page request.
    #[must_use]
    pub fn country(identifier: &str) -> Self {
        Self::new(DestinationKind::Country, identifier)
    }

    /// A city page request.
    #[must_use]
    pub fn city(identifier: &str) -> Self {
        Self::new(DestinationKind::City, identifier)
    }

    /// Attach the parent country; blank values are ignored.
    #[must_use]
    pub fn with_parent(mut self, country: &str) -> Self {
        let parent = normalise(country);
        self.parent = (!parent.is_empty()).then_some(parent);
        self
    }
}

fn normalise(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

/// The only failure a resolution can report.
///
/// Raised when the identifier is empty, or when a country has neither a
/// curated record nor a live profile. The display offers a way home.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("destination \"{identifier}\" not found (go home: {home})", home = HOME_LINK)]
pub struct DestinationNotFound {
    /// Page kind that was requested.
    pub kind: DestinationKind,
    /// Normalised identifier that could not be resolved.
    pub identifier: String,
}

impl DestinationNotFound {
    pub(crate) fn for_request(request: &ResolveRequest) -> Self {
        Self {
            kind: request.kind,
            identifier: request.identifier.clone(),
        }
    }

    /// Recovery link offered alongside the error.
    #[must_use]
    pub const fn home_link(&self) -> &'static str {
        HOME_LINK
    }
}
