//! Slug and display-name helpers shared by links, placeholders and lookups.

/// Lower-case `name` and collapse every run of non-alphanumeric characters
/// into a single dash.
///
/// # Examples
///
/// ```
/// use wayfare_core::slugify;
///
/// assert_eq!(slugify("Waterfront / Viewpoint"), "waterfront-viewpoint");
/// assert_eq!(slugify("  Fushimi Inari-taisha "), "fushimi-inari-taisha");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Turn a URL slug back into a human-readable title.
///
/// # Examples
///
/// ```
/// use wayfare_core::display_name;
///
/// assert_eq!(display_name("paris"), "Paris");
/// assert_eq!(display_name("new-delhi"), "New Delhi");
/// ```
#[must_use]
pub fn display_name(slug: &str) -> String {
    slug.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalise)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Default details link for an attraction without an explicit override.
#[must_use]
pub fn attraction_link(name: &str) -> String {
    format!("/attraction/{}", slugify(name))
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
