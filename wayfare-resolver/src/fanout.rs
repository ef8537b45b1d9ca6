//! Bounded, failure-tolerant provider calls.
//!
//! Every call goes through [`Enricher::settle`], which applies the configured
//! timeout and turns errors and overruns into `None`. Callers combine settled
//! calls with `join!`/`join_all`, so one slow or failing provider never holds
//! back or fails its siblings.

use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use futures_util::future::join_all;
use wayfare_core::{
    Category, CategoryCandidate, CountryDataSource, GeocodeResolver, ImageResolver,
    NeighborCandidate, NeighborFinder, NeighborRef, Place, PlaceCandidate, PlaceFinder,
    ProviderError,
};

use crate::config::ResolverConfig;

/// The external providers a resolver enriches pages from.
#[derive(Clone)]
pub struct Providers {
    /// Image search.
    pub images: Rc<dyn ImageResolver>,
    /// Point-of-interest discovery.
    pub places: Rc<dyn PlaceFinder>,
    /// Name to coordinate lookup.
    pub geocoder: Rc<dyn GeocodeResolver>,
    /// Nearby destination discovery.
    pub neighbors: Rc<dyn NeighborFinder>,
    /// Country facts and city listings.
    pub countries: Rc<dyn CountryDataSource>,
}

impl std::fmt::Debug for Providers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Providers").finish_non_exhaustive()
    }
}

/// Provider access bound to a resolver configuration.
pub(crate) struct Enricher<'a> {
    providers: &'a Providers,
    timeout: Duration,
}

impl<'a> Enricher<'a> {
    pub(crate) const fn new(providers: &'a Providers, config: &ResolverConfig) -> Self {
        Self {
            providers,
            timeout: config.call_timeout,
        }
    }

    pub(crate) const fn providers(&self) -> &'a Providers {
        self.providers
    }

    /// Await `call` within the timeout, mapping failure to `None`.
    pub(crate) async fn settle<T>(
        &self,
        what: &str,
        target: &str,
        call: impl Future<Output = Result<T, ProviderError>>,
    ) -> Option<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => {
                log::debug!("{what} for {target:?} succeeded");
                Some(value)
            }
            Ok(Err(err @ ProviderError::MissingCredentials { .. })) => {
                log::debug!("{what} for {target:?} skipped: {err}");
                None
            }
            Ok(Err(err)) => {
                log::warn!("{what} for {target:?} failed: {err}");
                None
            }
            Err(_) => {
                log::warn!(
                    "{what} for {target:?} timed out after {:?}",
                    self.timeout
                );
                None
            }
        }
    }

    /// Search an image, yielding `None` on failure or an empty answer.
    pub(crate) async fn image(&self, query: &str) -> Option<String> {
        self.settle("image search", query, self.providers.images.search(query))
            .await
            .flatten()
            .filter(|url| !url.trim().is_empty())
    }

    /// Keep a known image, otherwise search `query`, otherwise `placeholder`.
    pub(crate) async fn image_or(
        &self,
        known: Option<String>,
        query: &str,
        placeholder: impl FnOnce() -> String,
    ) -> String {
        if let Some(url) = known.filter(|url| !url.trim().is_empty()) {
            return url;
        }
        self.image(query).await.unwrap_or_else(placeholder)
    }

    /// Resolve missing images of a list concurrently.
    ///
    /// Entries that already carry an image are kept as they are; the rest
    /// are searched with `query` and fall back to `placeholder`.
    pub(crate) async fn resolve_all<C: NeedsImage>(
        &self,
        candidates: Vec<C>,
        query: impl Fn(&C) -> String,
        placeholder: impl Fn(&C) -> String,
    ) -> Vec<C::Resolved> {
        join_all(candidates.into_iter().map(|candidate| {
            let search = query(&candidate);
            let fallback = placeholder(&candidate);
            async move {
                let image = self
                    .image_or(candidate.known_image(), &search, || fallback)
                    .await;
                candidate.finish(image)
            }
        }))
        .await
    }
}

/// An unresolved entry that becomes presentable once it has an image.
pub(crate) trait NeedsImage {
    type Resolved;

    fn known_image(&self) -> Option<String>;

    fn finish(self, image: String) -> Self::Resolved;
}

impl NeedsImage for PlaceCandidate {
    type Resolved = Place;

    fn known_image(&self) -> Option<String> {
        self.image.clone()
    }

    fn finish(self, image: String) -> Place {
        self.resolve(image)
    }
}

impl NeedsImage for CategoryCandidate {
    type Resolved = Category;

    fn known_image(&self) -> Option<String> {
        self.image.clone()
    }

    fn finish(self, image: String) -> Category {
        self.resolve(image)
    }
}

impl NeedsImage for NeighborCandidate {
    type Resolved = NeighborRef;

    fn known_image(&self) -> Option<String> {
        self.image.clone()
    }

    fn finish(self, image: String) -> NeighborRef {
        self.resolve(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use wayfare_core::test_support::{
        StubCountries, StubGeocoder, StubImages, StubNeighbors, StubPlaces,
    };

    #[fixture]
    fn images() -> Rc<StubImages> {
        Rc::new(
            StubImages::failing()
                .with_image("kyoto gion", "https://img/gion")
                .with_image("blank", " "),
        )
    }

    fn providers(images: Rc<StubImages>) -> Providers {
        Providers {
            images,
            places: Rc::new(StubPlaces::empty()),
            geocoder: Rc::new(StubGeocoder::empty()),
            neighbors: Rc::new(StubNeighbors::empty()),
            countries: Rc::new(StubCountries::empty()),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn known_images_skip_the_search(images: Rc<StubImages>) {
        let providers = providers(Rc::clone(&images));
        let enricher = Enricher::new(&providers, &ResolverConfig::default());
        let url = enricher
            .image_or(Some("https://img/known".into()), "kyoto gion", || "p".into())
            .await;
        assert_eq!(url, "https://img/known");
        assert!(images.calls().is_empty());
    }

    #[rstest]
    #[case("kyoto gion", "https://img/gion")]
    #[case("blank", "placeholder")]
    #[case("unknown", "placeholder")]
    #[tokio::test]
    async fn searches_then_falls_back(
        images: Rc<StubImages>,
        #[case] query: &str,
        #[case] expected: &str,
    ) {
        let providers = providers(images);
        let enricher = Enricher::new(&providers, &ResolverConfig::default());
        let url = enricher.image_or(None, query, || "placeholder".into()).await;
        assert_eq!(url, expected);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn overrunning_calls_settle_to_none() {
        let slow = Rc::new(
            StubImages::always("https://img/late").with_delay(Duration::from_secs(10)),
        );
        let providers = providers(slow);
        let config = ResolverConfig::default().with_call_timeout(Duration::from_secs(1));
        let enricher = Enricher::new(&providers, &config);
        assert_eq!(enricher.image("anything").await, None);
    }
}
