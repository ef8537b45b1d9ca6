use wayfare_core::{DestinationKind, ResolvedViewModel, StaticCatalog};

use crate::city::CityContext;
use crate::config::ResolverConfig;
use crate::country::CountryContext;
use crate::fanout::{Enricher, Providers};
use crate::request::{DestinationNotFound, ResolveRequest};

/// Progress callbacks fired while a resolution runs.
///
/// Both methods default to doing nothing; `()` is the silent observer.
pub trait ResolutionObserver {
    /// The locally built page is ready, before any provider is asked.
    fn seeded(&self, model: &ResolvedViewModel) {
        let _ = model;
    }

    /// A fresh hero image arrived and can replace the seeded one.
    fn hero_image(&self, url: &str) {
        let _ = url;
    }
}

impl ResolutionObserver for () {}

/// Builds destination pages from the static catalog and live providers.
///
/// Resolution never fails because of a provider: each call is bounded by
/// [`ResolverConfig::call_timeout`] and any error or overrun simply defers to
/// the next precedence tier. The only failure is [`DestinationNotFound`].
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use wayfare_core::StaticCatalog;
/// use wayfare_core::test_support::FailingProviders;
/// use wayfare_resolver::{DestinationResolver, Providers, ResolveRequest};
///
/// let failing = FailingProviders::new();
/// let providers = Providers {
///     images: failing.images.clone(),
///     places: failing.places.clone(),
///     geocoder: failing.geocoder.clone(),
///     neighbors: failing.neighbors.clone(),
///     countries: failing.countries.clone(),
/// };
/// let resolver = DestinationResolver::new(StaticCatalog::empty(), providers);
/// let runtime = tokio::runtime::Builder::new_current_thread()
///     .enable_time()
///     .build()?;
/// let page = runtime.block_on(resolver.resolve(&ResolveRequest::city("paris")))?;
/// assert_eq!(page.places.len(), 6);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct DestinationResolver {
    catalog: StaticCatalog,
    providers: Providers,
    config: ResolverConfig,
}

impl DestinationResolver {
    /// Create a resolver with the default configuration.
    #[must_use]
    pub fn new(catalog: StaticCatalog, providers: Providers) -> Self {
        Self {
            catalog,
            providers,
            config: ResolverConfig::default(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub const fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The catalog consulted before any provider.
    #[must_use]
    pub const fn catalog(&self) -> &StaticCatalog {
        &self.catalog
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Build the page from local data only.
    ///
    /// The seed is what a reader sees while providers are consulted: curated
    /// content where it exists, generic content and placeholder images
    /// everywhere else.
    ///
    /// # Errors
    ///
    /// Returns [`DestinationNotFound`] when the identifier is empty.
    pub fn seed(&self, request: &ResolveRequest) -> Result<ResolvedViewModel, DestinationNotFound> {
        if request.identifier.is_empty() {
            return Err(DestinationNotFound::for_request(request));
        }
        Ok(match request.kind {
            DestinationKind::Country => CountryContext::new(&self.catalog, request).seed(),
            DestinationKind::City => CityContext::new(&self.catalog, request).seed(),
        })
    }

    /// Resolve a page.
    ///
    /// # Errors
    ///
    /// Returns [`DestinationNotFound`] when the identifier is empty, or when a
    /// country is unknown to both the catalog and the country source.
    pub async fn resolve(
        &self,
        request: &ResolveRequest,
    ) -> Result<ResolvedViewModel, DestinationNotFound> {
        self.resolve_observed(request, &()).await
    }

    /// Resolve a page, reporting progress to `observer`.
    ///
    /// # Errors
    ///
    /// See [`DestinationResolver::resolve`].
    pub async fn resolve_observed(
        &self,
        request: &ResolveRequest,
        observer: &dyn ResolutionObserver,
    ) -> Result<ResolvedViewModel, DestinationNotFound> {
        let seed = self.seed(request)?;
        observer.seeded(&seed);
        let enricher = Enricher::new(&self.providers, &self.config);
        log::debug!("resolving {} {:?}", request.kind, request.identifier);
        match request.kind {
            DestinationKind::City => {
                let context = CityContext::new(&self.catalog, request);
                Ok(context.resolve(&enricher, seed, observer).await)
            }
            DestinationKind::Country => {
                let context = CountryContext::new(&self.catalog, request);
                context
                    .resolve(&enricher, seed, observer)
                    .await
                    .ok_or_else(|| DestinationNotFound::for_request(request))
            }
        }
    }
}
