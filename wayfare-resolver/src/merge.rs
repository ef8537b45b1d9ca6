//! Precedence tiers shared by city and country pages.

use wayfare_core::{Category, Coordinate};

use crate::tier::{Tier, first_tier, first_tier_or, non_blank, non_empty};

/// A curated list and whatever a provider discovered to replace it.
///
/// Curated entries are used verbatim when present; providers are only asked
/// when the curated list is empty, so `discovered` is empty otherwise.
pub(crate) struct ListInput<'a, T> {
    pub(crate) curated: &'a [T],
    pub(crate) discovered: Vec<T>,
}

fn curated_list<T: Clone>(input: &ListInput<'_, T>) -> Option<Vec<T>> {
    non_empty(input.curated)
}

fn discovered_list<T: Clone>(input: &ListInput<'_, T>) -> Option<Vec<T>> {
    non_empty(&input.discovered)
}

/// Pick `static → dynamic`, else `fallback`.
pub(crate) fn pick_list<T: Clone>(
    field: &str,
    input: &ListInput<'_, T>,
    fallback: fn(&ListInput<'_, T>) -> Vec<T>,
) -> Vec<T> {
    let tiers: [Tier<ListInput<'_, T>, Vec<T>>; 2] = [
        Tier::new("static", curated_list),
        Tier::new("dynamic", discovered_list),
    ];
    first_tier_or(field, input, &tiers, fallback)
}

/// Sources for the hero image.
pub(crate) struct HeroInput<'a> {
    pub(crate) discovered: Option<String>,
    pub(crate) curated: Option<&'a str>,
    pub(crate) placeholder: String,
}

fn discovered_hero(input: &HeroInput<'_>) -> Option<String> {
    non_blank(input.discovered.as_deref())
}

fn curated_hero(input: &HeroInput<'_>) -> Option<String> {
    non_blank(input.curated)
}

fn placeholder_hero(input: &HeroInput<'_>) -> String {
    input.placeholder.clone()
}

/// Pick `dynamic → static → placeholder`.
pub(crate) fn pick_hero(input: &HeroInput<'_>) -> String {
    let tiers = [
        Tier::new("dynamic", discovered_hero),
        Tier::new("static", curated_hero),
    ];
    first_tier_or("hero image", input, &tiers, placeholder_hero)
}

/// Sources for the map focus.
#[derive(Debug, Default)]
pub(crate) struct FocusInput {
    pub(crate) curated: Option<Coordinate>,
    pub(crate) geocoded: Option<Coordinate>,
    pub(crate) capital: Option<Coordinate>,
}

fn curated_focus(input: &FocusInput) -> Option<Coordinate> {
    input.curated
}

fn geocoded_focus(input: &FocusInput) -> Option<Coordinate> {
    input.geocoded
}

fn capital_focus(input: &FocusInput) -> Option<Coordinate> {
    input.capital
}

const FOCUS_TIERS: [Tier<FocusInput, Coordinate>; 3] = [
    Tier::new("static", curated_focus),
    Tier::new("geocoded", geocoded_focus),
    Tier::new("capital", capital_focus),
];

/// Pick `static → geocoded → capital`, or no focus at all.
pub(crate) fn pick_focus(input: &FocusInput) -> Option<Coordinate> {
    first_tier("focus", input, &FOCUS_TIERS)
}

/// Keep the first featured tile and clear the flag on the rest.
pub(crate) fn single_featured(tiles: &mut [Category]) {
    let mut seen = false;
    for tile in tiles.iter_mut().filter(|tile| tile.featured) {
        tile.featured = !seen;
        seen = true;
    }
}
