//! City page resolution.

use futures_util::join;
use wayfare_core::{
    CategoryCandidate, CuratedDestination, DestinationKind, NeighborCandidate, PlaceCandidate,
    PlaceholderImage, ResolvedViewModel, StaticCatalog, display_name,
};

use crate::fanout::Enricher;
use crate::merge::{
    FocusInput, HeroInput, ListInput, pick_focus, pick_hero, pick_list, single_featured,
};
use crate::request::ResolveRequest;
use crate::resolver::ResolutionObserver;
use crate::templates;
use crate::tier::non_blank;

/// What is known about a city before any provider is asked.
pub(crate) struct CityContext<'a> {
    slug: &'a str,
    name: String,
    country: Option<String>,
    curated: Option<&'a CuratedDestination>,
}

impl<'a> CityContext<'a> {
    pub(crate) fn new(catalog: &'a StaticCatalog, request: &'a ResolveRequest) -> Self {
        let curated = catalog.city(&request.identifier);
        let name = curated.map_or_else(
            || display_name(&request.identifier),
            |record| record.name.clone(),
        );
        let country = request.parent.as_deref().map(|parent| {
            catalog
                .country(parent)
                .map_or_else(|| display_name(parent), |record| record.name.clone())
        });
        Self {
            slug: &request.identifier,
            name,
            country,
            curated,
        }
    }

    fn curated_places(&self) -> &'a [PlaceCandidate] {
        self.curated
            .map(|record| record.places.as_slice())
            .unwrap_or_default()
    }

    fn curated_interests(&self) -> &'a [CategoryCandidate] {
        self.curated
            .map(|record| record.categories.as_slice())
            .unwrap_or_default()
    }

    fn curated_neighbors(&self) -> &'a [NeighborCandidate] {
        self.curated
            .map(|record| record.neighbors.as_slice())
            .unwrap_or_default()
    }

    fn hero_placeholder(&self) -> String {
        PlaceholderImage::HERO.url(&self.name, ["city", "landmark"])
    }

    fn place_query(&self, place: &PlaceCandidate) -> String {
        format!("{} {}", self.name, place_hint(place))
    }

    fn place_placeholder(&self, place: &PlaceCandidate) -> String {
        PlaceholderImage::CARD.url(&self.name, [place_hint(place)])
    }

    fn interest_query(&self, tile: &CategoryCandidate) -> String {
        format!("{} {}", self.name, tile_hint(tile))
    }

    fn interest_placeholder(&self, tile: &CategoryCandidate) -> String {
        PlaceholderImage::PORTRAIT.url(&self.name, [tile_hint(tile)])
    }

    /// The page as it can be shown immediately, from local data only.
    pub(crate) fn seed(&self) -> ResolvedViewModel {
        let curated = self.curated;
        let country = self.country.as_deref();
        let places = match self.curated_places() {
            [] => templates::city_places(),
            listed => listed.to_vec(),
        };
        let interests = match self.curated_interests() {
            [] => templates::city_interests(),
            listed => listed.to_vec(),
        };
        let mut categories: Vec<_> = interests
            .into_iter()
            .map(|tile| {
                let image = non_blank(tile.image.as_deref())
                    .unwrap_or_else(|| self.interest_placeholder(&tile));
                tile.resolve(image)
            })
            .collect();
        single_featured(&mut categories);

        ResolvedViewModel {
            kind: DestinationKind::City,
            slug: self.slug.to_owned(),
            name: self.name.clone(),
            identity: non_blank(curated.and_then(|record| record.identity.as_deref()))
                .unwrap_or_else(|| templates::city_identity(country)),
            description: non_blank(curated.map(|record| record.description.as_str()))
                .unwrap_or_else(|| templates::city_description(&self.name)),
            image: non_blank(curated.and_then(|record| record.image.as_deref()))
                .unwrap_or_else(|| self.hero_placeholder()),
            focus: curated.and_then(CuratedDestination::coordinate),
            quick_facts: curated
                .map(|record| record.quick_facts.clone())
                .unwrap_or_default()
                .or(templates::city_facts(country)),
            places: places
                .into_iter()
                .map(|place| {
                    let image = non_blank(place.image.as_deref())
                        .unwrap_or_else(|| self.place_placeholder(&place));
                    place.resolve(image)
                })
                .collect(),
            categories,
            neighbors: self
                .curated_neighbors()
                .iter()
                .cloned()
                .map(|neighbor| {
                    let image = non_blank(neighbor.image.as_deref())
                        .unwrap_or_else(|| neighbor_placeholder(&neighbor));
                    neighbor.resolve(image)
                })
                .collect(),
            tips: match curated.map(|record| record.tips.as_slice()) {
                Some(tips) if !tips.is_empty() => tips.to_vec(),
                _ => templates::city_tips(&self.name),
            },
        }
    }

    /// Enrich the seeded page from the providers.
    pub(crate) async fn resolve(
        &self,
        enricher: &Enricher<'_>,
        seed: ResolvedViewModel,
        observer: &dyn ResolutionObserver,
    ) -> ResolvedViewModel {
        let providers = enricher.providers();
        let name = self.name.as_str();
        let curated_focus = seed.focus;

        let hero = async {
            let url = enricher.image(&format!("{name} city landmark")).await;
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

        let places = async {
            let curated = self.curated_places();
            let discovered = if curated.is_empty() {
                enricher
                    .settle("place search", name, providers.places.for_city(name))
                    .await
                    .unwrap_or_default()
            } else {
                Vec::new()
            };
            let input = ListInput {
                curated,
                discovered,
            };
            let candidates = pick_list("places", &input, |_| templates::city_places());
            enricher
                .resolve_all(
                    candidates,
                    |place| self.place_query(place),
                    |place| self.place_placeholder(place),
                )
                .await
        };

        let interests = async {
            let input = ListInput {
                curated: self.curated_interests(),
                discovered: Vec::new(),
            };
            let candidates = pick_list("interests", &input, |_| templates::city_interests());
            let mut tiles = enricher
                .resolve_all(
                    candidates,
                    |tile| self.interest_query(tile),
                    |tile| self.interest_placeholder(tile),
                )
                .await;
            single_featured(&mut tiles);
            tiles
        };

        let neighbors = async {
            let curated = self.curated_neighbors();
            let discovered = if curated.is_empty() {
                enricher
                    .settle("neighbour search", name, providers.neighbors.near(name))
                    .await
                    .unwrap_or_default()
            } else {
                Vec::new()
            };
            let input = ListInput {
                curated,
                discovered,
            };
            let candidates = pick_list("neighbours", &input, |_| Vec::new());
            enricher
                .resolve_all(
                    candidates,
                    |neighbor| format!("{} city", neighbor.name),
                    neighbor_placeholder,
                )
                .await
        };

        let (hero, geocoded, places, categories, neighbors) =
            join!(hero, geocoded, places, interests, neighbors);

        let image = pick_hero(&HeroInput {
            discovered: hero,
            curated: self.curated.and_then(|record| record.image.as_deref()),
            placeholder: self.hero_placeholder(),
        });
        let focus = pick_focus(&FocusInput {
            curated: curated_focus,
            geocoded,
            capital: None,
        });

        ResolvedViewModel {
            image,
            focus,
            places,
            categories,
            neighbors,
            ..seed
        }
    }
}

fn place_hint(place: &PlaceCandidate) -> &str {
    place.query.as_deref().unwrap_or(&place.name)
}

fn tile_hint(tile: &CategoryCandidate) -> &str {
    if tile.query.trim().is_empty() {
        &tile.name
    } else {
        &tile.query
    }
}

fn neighbor_placeholder(neighbor: &NeighborCandidate) -> String {
    PlaceholderImage::CARD.url(&neighbor.name, ["city"])
}
