use serde::Serialize;
use wayfare_core::{Coordinate, Place};

/// Base of the Google Maps directions deep link.
const DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/?api=1&destination=";

/// Directions deep link for `coordinate`.
///
/// # Examples
///
/// ```
/// use wayfare_core::Coordinate;
/// use wayfare_map::directions_url;
///
/// let url = directions_url(Coordinate { lat: 10.0, lon: 20.5 });
/// assert_eq!(url, "https://www.google.com/maps/dir/?api=1&destination=10,20.5");
/// ```
#[must_use]
pub fn directions_url(coordinate: Coordinate) -> String {
    format!("{DIRECTIONS_URL}{},{}", coordinate.lat, coordinate.lon)
}

/// The entity image drawn as the marker badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    /// Image URL.
    pub url: String,
    /// Edge length in pixels.
    pub size: u32,
    /// Offset from the top-left corner to the anchored coordinate.
    pub anchor: (u32, u32),
}

/// A mappable entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Position of the entity in the list handed to the map.
    pub index: usize,
    /// Display name.
    pub name: String,
    /// Short tag.
    pub descriptor: String,
    /// Parsed position.
    pub position: Coordinate,
    /// Badge image.
    pub thumbnail: Thumbnail,
    /// Details link: the explicit one or `/attraction/{slug}`.
    pub details_link: String,
}

impl Marker {
    /// A marker for `place`, `None` when its coordinates are unusable.
    pub(crate) fn for_place(index: usize, place: &Place, size: u32, anchor: u32) -> Option<Self> {
        let position = place.coordinate()?;
        Some(Self {
            index,
            name: place.name.clone(),
            descriptor: place.descriptor.clone(),
            position,
            thumbnail: Thumbnail {
                url: place.image.clone(),
                size,
                anchor: (anchor, anchor),
            },
            details_link: place.details_link(),
        })
    }

    /// The info panel shown when this marker is selected.
    #[must_use]
    pub fn panel(&self) -> InfoPanel {
        InfoPanel {
            name: self.name.clone(),
            descriptor: self.descriptor.clone(),
            image: self.thumbnail.url.clone(),
            directions_url: directions_url(self.position),
            details_link: self.details_link.clone(),
        }
    }
}

/// Details of the selected marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoPanel {
    /// Display name.
    pub name: String,
    /// Short tag.
    pub descriptor: String,
    /// Header image.
    pub image: String,
    /// Google Maps directions link.
    pub directions_url: String,
    /// Link to the entity's own page.
    pub details_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use wayfare_core::PlaceCandidate;

    #[rstest]
    fn panels_link_to_directions_and_details() {
        let place = PlaceCandidate::new("Eiffel Tower", "Landmark")
            .with_position("48.8584", "2.2945")
            .resolve("https://img/eiffel".into());
        let marker = Marker::for_place(3, &place, 48, 24).expect("mappable");

        let panel = marker.panel();

        assert_eq!(marker.index, 3);
        assert_eq!(marker.thumbnail.anchor, (24, 24));
        assert_eq!(
            panel.directions_url,
            "https://www.google.com/maps/dir/?api=1&destination=48.8584,2.2945"
        );
        assert_eq!(panel.details_link, "/attraction/eiffel-tower");
        assert_eq!(panel.image, "https://img/eiffel");
    }

    #[rstest]
    fn explicit_links_win() {
        let place = PlaceCandidate::new("Louvre", "Museum")
            .with_position(48.86, 2.33)
            .with_link("https://opentripmap.com/en/card/W1")
            .resolve("https://img/louvre".into());
        let marker = Marker::for_place(0, &place, 48, 24).expect("mappable");
        assert_eq!(marker.details_link, "https://opentripmap.com/en/card/W1");
    }

    #[rstest]
    #[case(None, Some("5"))]
    #[case(Some("bad"), Some("5"))]
    #[case(Some("95"), Some("5"))]
    fn unusable_positions_have_no_marker(#[case] lat: Option<&str>, #[case] lon: Option<&str>) {
        let mut place = PlaceCandidate::new("Nowhere", "Mystery").resolve("https://img/x".into());
        place.lat = lat.map(Into::into);
        place.lon = lon.map(Into::into);
        assert!(Marker::for_place(0, &place, 48, 24).is_none());
    }
}
