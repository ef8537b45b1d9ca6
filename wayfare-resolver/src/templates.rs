//! Generic content for destinations the catalog does not know.

use wayfare_core::{CategoryCandidate, PlaceCandidate, QuickFacts};

/// Six generic city sights, each with an image search hint.
pub fn city_places() -> Vec<PlaceCandidate> {
    [
        ("City Center", "downtown square", "Heart of the City"),
        ("National Museum", "museum architecture", "History & Art"),
        ("Central Park", "park garden", "Nature & Relax"),
        ("Local Market", "market food", "Shopping & Cuisine"),
        ("Historic Old Town", "old street", "Heritage"),
        ("Waterfront / Viewpoint", "river view", "Scenic Views"),
    ]
    .into_iter()
    .map(|(name, query, descriptor)| PlaceCandidate::new(name, descriptor).with_query(query))
    .collect()
}

/// The four interest tiles of a city page.
pub fn city_interests() -> Vec<CategoryCandidate> {
    [
        ("History & Landmarks", "history landmark"),
        ("Food & Dining", "food restaurant"),
        ("Art & Culture", "art gallery"),
        ("Nightlife", "night city"),
    ]
    .into_iter()
    .map(|(name, query)| CategoryCandidate::new(name, query, ""))
    .collect()
}

/// The four category tiles of a country page; culture is featured.
pub fn country_categories() -> Vec<CategoryCandidate> {
    vec![
        CategoryCandidate::new(
            "Culture",
            "culture tradition",
            "Heritage, arts, and local traditions",
        )
        .featured(),
        CategoryCandidate::new(
            "Nature",
            "nature landscape",
            "Scenic landscapes and natural wonders",
        ),
        CategoryCandidate::new("Food", "food cuisine", "Local cuisine and culinary delights"),
        CategoryCandidate::new(
            "Adventure",
            "adventure travel",
            "Outdoor activities and exploration",
        ),
    ]
}

/// Snapshot facts for an unknown city.
pub fn city_facts(country: Option<&str>) -> QuickFacts {
    QuickFacts {
        region: Some(country.unwrap_or("Local Region").to_owned()),
        best_time: Some("Year-round".to_owned()),
        known_for: Some("Culture & Sights".to_owned()),
        duration: Some("3–4 Days".to_owned()),
        vibe: Some("Vibrant & Welcoming".to_owned()),
        ..QuickFacts::default()
    }
}

/// Hero tagline for a city.
pub fn city_identity(country: Option<&str>) -> String {
    format!("The heartbeat of {}", country.unwrap_or("the region"))
}

/// Long description for a city.
pub fn city_description(city: &str) -> String {
    format!(
        "Explore the best of {city}. Top attractions, food, culture, and travel tips for your {city} adventure."
    )
}

/// Travel tips for a city.
pub fn city_tips(city: &str) -> Vec<String> {
    vec![
        format!("Explore {city} by walking to soak in the atmosphere."),
        "Try the local street food for authentic flavors.".to_owned(),
        "Visit main attractions early to avoid crowds.".to_owned(),
    ]
}

/// Long description for a country nobody describes.
pub fn country_description(country: &str) -> String {
    format!("Discover the cities, landscapes and traditions of {country}.")
}

/// Name used for a synthesised capital when no source knows it.
pub const UNKNOWN_CAPITAL: &str = "Capital City";

/// Description of a synthesised capital entry.
pub fn capital_description(country: &str) -> String {
    format!("The bustling heart of {country}, full of history and life.")
}

/// Fallback `known_for` fact for countries.
pub const COUNTRY_KNOWN_FOR: &str = "Culture & Heritage";
