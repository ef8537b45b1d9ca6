//! Country page resolution.

use futures_util::join;
use wayfare_core::{
    CategoryCandidate, CountryProfile, CuratedDestination, DestinationKind, Place,
    PlaceCandidate, PlaceholderImage, QuickFacts, ResolvedViewModel, StaticCatalog, display_name,
    format_population,
};

use crate::fanout::Enricher;
use crate::merge::{
    FocusInput, HeroInput, ListInput, pick_focus, pick_hero, pick_list, single_featured,
};
use crate::request::ResolveRequest;
use crate::resolver::ResolutionObserver;
use crate::templates;
use crate::tier::{Tier, first_tier_or, non_blank};

/// What is known about a country before any provider is asked.
pub(crate) struct CountryContext<'a> {
    slug: &'a str,
    name: String,
    curated: Option<&'a CuratedDestination>,
}

/// Everything the merged text fields are chosen from.
struct CountryInput<'a> {
    slug: &'a str,
    curated: Option<&'a CuratedDestination>,
    profile: Option<&'a CountryProfile>,
}

fn curated_name(input: &CountryInput<'_>) -> Option<String> {
    non_blank(input.curated.map(|record| record.name.as_str()))
}

fn profile_name(input: &CountryInput<'_>) -> Option<String> {
    non_blank(input.profile.map(|profile| profile.name.as_str()))
}

fn slug_name(input: &CountryInput<'_>) -> String {
    display_name(input.slug)
}

fn curated_description(input: &CountryInput<'_>) -> Option<String> {
    non_blank(input.curated.map(|record| record.description.as_str()))
}

fn profile_description(input: &CountryInput<'_>) -> Option<String> {
    input.profile.map(|profile| {
        format!(
            "Explore {} located in {}.",
            profile.name,
            profile.location_label()
        )
    })
}

fn generic_description(input: &CountryInput<'_>) -> String {
    templates::country_description(&display_name(input.slug))
}

fn curated_capital(input: &CountryInput<'_>) -> Option<String> {
    non_blank(input.curated.and_then(|record| record.capital.as_deref()))
}

fn profile_capital(input: &CountryInput<'_>) -> Option<String> {
    non_blank(input.profile.and_then(|profile| profile.capital.as_deref()))
}

fn unknown_capital(_: &CountryInput<'_>) -> String {
    templates::UNKNOWN_CAPITAL.to_owned()
}

fn pick_name(input: &CountryInput<'_>) -> String {
    let tiers = [
        Tier::new("static", curated_name),
        Tier::new("dynamic", profile_name),
    ];
    first_tier_or("name", input, &tiers, slug_name)
}

fn pick_description(input: &CountryInput<'_>) -> String {
    let tiers = [
        Tier::new("static", curated_description),
        Tier::new("dynamic", profile_description),
    ];
    first_tier_or("description", input, &tiers, generic_description)
}

fn pick_capital(input: &CountryInput<'_>) -> String {
    let tiers = [
        Tier::new("dynamic", profile_capital),
        Tier::new("static", curated_capital),
    ];
    first_tier_or("capital", input, &tiers, unknown_capital)
}

/// Live facts first, then curated facts, then generic ones.
fn merge_facts(input: &CountryInput<'_>) -> QuickFacts {
    let live = input.profile.map_or_else(QuickFacts::default, |profile| QuickFacts {
        region: non_blank(Some(profile.region.as_str())),
        capital: non_blank(profile.capital.as_deref()),
        population: (profile.population > 0).then(|| format_population(profile.population)),
        ..QuickFacts::default()
    });
    let curated = input.curated.map_or_else(QuickFacts::default, |record| {
        let facts = record.quick_facts.clone();
        QuickFacts {
            capital: facts.capital.clone().or_else(|| record.capital.clone()),
            ..facts
        }
    });
    live.or(curated).or(QuickFacts {
        known_for: Some(templates::COUNTRY_KNOWN_FOR.to_owned()),
        ..QuickFacts::default()
    })
}

/// The capital as the single city entry of an otherwise empty list.
fn synthesize_capital(input: &CountryInput<'_>, country: &str) -> Place {
    let capital = pick_capital(input);
    let image_name = if capital == templates::UNKNOWN_CAPITAL {
        input.slug.to_owned()
    } else {
        capital.clone()
    };
    let mut candidate = PlaceCandidate::new(capital, "Capital")
        .with_description(templates::capital_description(country));
    if let Some(position) = input.profile.and_then(|profile| profile.capital_coordinate) {
        candidate = candidate.with_coordinate(position);
    }
    candidate.resolve(PlaceholderImage::CARD.url(&image_name, ["city"]))
}

impl<'a> CountryContext<'a> {
    pub(crate) fn new(catalog: &'a StaticCatalog, request: &'a ResolveRequest) -> Self {
        let curated = catalog.country(&request.identifier);
        let name = curated.map_or_else(
            || display_name(&request.identifier),
            |record| record.name.clone(),
        );
        Self {
            slug: &request.identifier,
            name,
            curated,
        }
    }

    fn curated_cities(&self) -> &'a [PlaceCandidate] {
        self.curated
            .map(|record| record.places.as_slice())
            .unwrap_or_default()
    }

    fn curated_categories(&self) -> &'a [CategoryCandidate] {
        self.curated
            .map(|record| record.categories.as_slice())
            .unwrap_or_default()
    }

    fn input(&self, profile: Option<&'a CountryProfile>) -> CountryInput<'a> {
        CountryInput {
            slug: self.slug,
            curated: self.curated,
            profile,
        }
    }

    fn hero_placeholder(&self) -> String {
        PlaceholderImage::HERO.url(&self.name, ["landmark"])
    }

    fn city_query(&self, city: &PlaceCandidate) -> String {
        format!("{} {}", self.name, city.name)
    }

    fn category_query(&self, tile: &CategoryCandidate) -> String {
        let hint = if tile.query.trim().is_empty() {
            &tile.name
        } else {
            &tile.query
        };
        format!("{} {hint}", self.name)
    }

    fn category_placeholder(&self, tile: &CategoryCandidate) -> String {
        PlaceholderImage::CARD.url(&self.name, [tile.name.to_lowercase()])
    }

    fn categories(&self) -> Vec<CategoryCandidate> {
        let input = ListInput {
            curated: self.curated_categories(),
            discovered: Vec::new(),
        };
        pick_list("categories", &input, |_| templates::country_categories())
    }

    /// The page as it can be shown immediately, from local data only.
    pub(crate) fn seed(&self) -> ResolvedViewModel {
        let input = self.input(None);
        let mut categories: Vec<_> = self
            .categories()
            .into_iter()
            .map(|tile| {
                let image = non_blank(tile.image.as_deref())
                    .unwrap_or_else(|| self.category_placeholder(&tile));
                tile.resolve(image)
            })
            .collect();
        single_featured(&mut categories);

        ResolvedViewModel {
            kind: DestinationKind::Country,
            slug: self.slug.to_owned(),
            name: self.name.clone(),
            identity: self.identity(None),
            description: pick_description(&input),
            image: non_blank(self.curated.and_then(|record| record.image.as_deref()))
                .unwrap_or_else(|| self.hero_placeholder()),
            focus: self.curated.and_then(CuratedDestination::coordinate),
            quick_facts: merge_facts(&input),
            places: self
                .curated_cities()
                .iter()
                .cloned()
                .map(|city| {
                    let image = non_blank(city.image.as_deref())
                        .unwrap_or_else(|| city_placeholder(&city));
                    city.resolve(image)
                })
                .collect(),
            categories,
            neighbors: Vec::new(),
            tips: self
                .curated
                .map(|record| record.tips.clone())
                .unwrap_or_default(),
        }
    }

    fn identity(&self, profile: Option<&CountryProfile>) -> String {
        non_blank(self.curated.and_then(|record| record.identity.as_deref()))
            .or_else(|| profile.map(|found| found.location_label().to_owned()))
            .unwrap_or_default()
    }

    /// Enrich the seeded page from the providers.
    ///
    /// Returns `None` when neither the catalog nor the country source knows
    /// the identifier.
    pub(crate) async fn resolve(
        &self,
        enricher: &Enricher<'_>,
        seed: ResolvedViewModel,
        observer: &dyn ResolutionObserver,
    ) -> Option<ResolvedViewModel> {
        let providers = enricher.providers();
        let slug = self.slug;
        let name = self.name.as_str();
        let curated_focus = seed.focus;
        let has_curated_cities = !self.curated_cities().is_empty();

        let profile = async {
            let fetched = enricher
                .settle("country profile", slug, providers.countries.fetch(slug))
                .await
                .flatten();
            let listed = match fetched.as_ref() {
                Some(found) if !has_curated_cities => enricher
                    .settle(
                        "city listing",
                        &found.name,
                        providers.countries.cities_for(&found.name, &found.country_code),
                    )
                    .await
                    .unwrap_or_default(),
                _ => Vec::new(),
            };
            let discovered = enricher
                .resolve_all(listed, |city| self.city_query(city), city_placeholder)
                .await;
            (fetched, discovered)
        };

        let hero = async {
            let url = enricher.image(&format!("{name} country landmark")).await;
            if let Some(found) = url.as_deref() {
                observer.hero_image(found);
            }
            url
        };

        let geocoded = async {
            if curated_focus.is_some() {
                return None;
            }
            enricher
                .settle("geocode", name, providers.geocoder.for_city(name))
                .await
                .flatten()
        };

        let categories = async {
            let mut tiles = enricher
                .resolve_all(
                    self.categories(),
                    |tile| self.category_query(tile),
                    |tile| self.category_placeholder(tile),
                )
                .await;
            single_featured(&mut tiles);
            tiles
        };

        let curated_cities = enricher.resolve_all(
            self.curated_cities().to_vec(),
            |city| self.city_query(city),
            city_placeholder,
        );

        let ((profile, discovered), hero, geocoded, categories, curated_cities) =
            join!(profile, hero, geocoded, categories, curated_cities);

        if self.curated.is_none() && profile.is_none() {
            log::warn!("country {slug:?} is unknown to the catalog and the country source");
            return None;
        }

        let input = self.input(profile.as_ref());
        let country_name = pick_name(&input);
        let cities = ListInput {
            curated: &curated_cities,
            discovered,
        };
        let places = if cities.curated.is_empty() && cities.discovered.is_empty() {
            log::debug!("no cities for {slug:?}; synthesising the capital");
            vec![synthesize_capital(&input, &country_name)]
        } else {
            pick_list("cities", &cities, |_| Vec::new())
        };

        let image = pick_hero(&HeroInput {
            discovered: hero,
            curated: self.curated.and_then(|record| record.image.as_deref()),
            placeholder: self.hero_placeholder(),
        });
        let focus = pick_focus(&FocusInput {
            curated: curated_focus,
            geocoded,
            capital: profile.as_ref().and_then(|found| found.capital_coordinate),
        });

        Some(ResolvedViewModel {
            name: country_name,
            identity: self.identity(profile.as_ref()),
            description: pick_description(&input),
            image,
            focus,
            quick_facts: merge_facts(&input),
            places,
            categories,
            ..seed
        })
    }
}

fn city_placeholder(city: &PlaceCandidate) -> String {
    PlaceholderImage::CARD.url(&city.name, ["city"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use wayfare_core::Coordinate;

    #[fixture]
    fn profile() -> CountryProfile {
        CountryProfile {
            name: "France".into(),
            capital: Some("Paris".into()),
            region: "Europe".into(),
            subregion: Some("Western Europe".into()),
            population: 67_391_582,
            capital_coordinate: Coordinate::new(48.87, 2.33).ok(),
            country_code: "FR".into(),
        }
    }

    #[fixture]
    fn curated() -> CuratedDestination {
        CuratedDestination::new("République", "Curated words.").with_capital("Lutèce")
    }

    #[rstest]
    fn names_prefer_the_catalog(profile: CountryProfile, curated: CuratedDestination) {
        let both = CountryInput {
            slug: "france",
            curated: Some(&curated),
            profile: Some(&profile),
        };
        assert_eq!(pick_name(&both), "République");
        let live = CountryInput {
            curated: None,
            ..both
        };
        assert_eq!(pick_name(&live), "France");
        let neither = CountryInput {
            slug: "new-caledonia",
            curated: None,
            profile: None,
        };
        assert_eq!(pick_name(&neither), "New Caledonia");
    }

    #[rstest]
    fn descriptions_fall_back_to_the_location(profile: CountryProfile) {
        let input = CountryInput {
            slug: "france",
            curated: None,
            profile: Some(&profile),
        };
        assert_eq!(
            pick_description(&input),
            "Explore France located in Western Europe."
        );
    }

    #[rstest]
    fn live_facts_override_curated_ones(profile: CountryProfile, curated: CuratedDestination) {
        let input = CountryInput {
            slug: "france",
            curated: Some(&curated),
            profile: Some(&profile),
        };
        let facts = merge_facts(&input);
        assert_eq!(facts.capital.as_deref(), Some("Paris"));
        assert_eq!(facts.population.as_deref(), Some("67.4M"));
        assert_eq!(facts.region.as_deref(), Some("Europe"));
        assert_eq!(facts.known_for.as_deref(), Some("Culture & Heritage"));
    }

    #[rstest]
    fn curated_capital_fills_in_without_a_profile(curated: CuratedDestination) {
        let input = CountryInput {
            slug: "france",
            curated: Some(&curated),
            profile: None,
        };
        assert_eq!(merge_facts(&input).capital.as_deref(), Some("Lutèce"));
    }

    #[rstest]
    fn synthesised_capital_uses_the_capital_position(profile: CountryProfile) {
        let input = CountryInput {
            slug: "france",
            curated: None,
            profile: Some(&profile),
        };
        let capital = synthesize_capital(&input, "France");
        assert_eq!(capital.name, "Paris");
        assert_eq!(capital.image, "https://loremflickr.com/800/600/paris,city");
        assert_eq!(
            capital.description.as_deref(),
            Some("The bustling heart of France, full of history and life.")
        );
        assert_eq!(capital.coordinate(), profile.capital_coordinate);
    }

    #[rstest]
    fn unknown_capitals_get_a_generic_name() {
        let input = CountryInput {
            slug: "atlantis",
            curated: None,
            profile: None,
        };
        let capital = synthesize_capital(&input, "Atlantis");
        assert_eq!(capital.name, "Capital City");
        assert_eq!(capital.image, "https://loremflickr.com/800/600/atlantis,city");
        assert!(capital.coordinate().is_none());
    }
}
