//! Deterministic placeholder image URLs.
//!
//! When no provider supplies an image, entities fall back to a URL built
//! purely from their name, a tag list and the requested size:
//! `https://loremflickr.com/{width}/{height}/{slug},{tag1},{tag2}`.
//! No network call is made and the same inputs always produce the same URL.

use crate::slug::slugify;

/// Host serving placeholder images.
pub const PLACEHOLDER_BASE_URL: &str = "https://loremflickr.com";

/// Requested placeholder dimensions.
///
/// # Examples
///
/// ```
/// use wayfare_core::PlaceholderImage;
///
/// let url = PlaceholderImage::CARD.url("paris", ["downtown square"]);
/// assert_eq!(url, "https://loremflickr.com/800/600/paris,downtown,square");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PlaceholderImage {
    /// Hero banners.
    pub const HERO: Self = Self::new(1600, 900);
    /// Landscape cards: places, cities, neighbours and country categories.
    pub const CARD: Self = Self::new(800, 600);
    /// Portrait tiles used by city interests.
    pub const PORTRAIT: Self = Self::new(600, 800);

    /// Construct a size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build the placeholder URL for `name` tagged with `tags`.
    ///
    /// Each tag is split on whitespace and every word is slugified, so a
    /// search query such as `"downtown square"` contributes two tags.
    #[must_use]
    pub fn url<I, S>(&self, name: &str, tags: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parts = vec![slugify(name)];
        parts.extend(
            tags.into_iter()
                .flat_map(|tag| {
                    tag.as_ref()
                        .split_whitespace()
                        .map(slugify)
                        .collect::<Vec<_>>()
                })
                .filter(|tag| !tag.is_empty()),
        );
        parts.retain(|part| !part.is_empty());
        format!(
            "{PLACEHOLDER_BASE_URL}/{}/{}/{}",
            self.width,
            self.height,
            parts.join(",")
        )
    }
}

/// Whether `url` was produced by [`PlaceholderImage::url`].
#[must_use]
pub fn is_placeholder(url: &str) -> bool {
    url.starts_with(PLACEHOLDER_BASE_URL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hero_urls_include_size_and_tags() {
        let url = PlaceholderImage::HERO.url("Paris", ["city", "landmark"]);
        assert_eq!(url, "https://loremflickr.com/1600/900/paris,city,landmark");
    }

    #[rstest]
    fn urls_are_pure() {
        let first = PlaceholderImage::PORTRAIT.url("Kyoto", ["art gallery"]);
        let second = PlaceholderImage::PORTRAIT.url("Kyoto", ["art gallery"]);
        assert_eq!(first, second);
        assert!(is_placeholder(&first));
    }

    #[rstest]
    fn empty_tags_are_dropped() {
        let url = PlaceholderImage::CARD.url("New Delhi", ["", "  ", "Food & Dining"]);
        assert_eq!(url, "https://loremflickr.com/800/600/new-delhi,food,dining");
    }

    #[rstest]
    fn provider_urls_are_not_placeholders() {
        assert!(!is_placeholder("https://images.unsplash.com/photo-1"));
    }
}
