//! Deterministic provider doubles for unit and behaviour tests.
//!
//! Each stub returns a pre-configured response, records the arguments it was
//! called with, and can optionally sleep before answering so tests can
//! exercise timeouts and out-of-order completion under Tokio's paused clock.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    Coordinate, CountryDataSource, CountryProfile, GeocodeResolver, ImageResolver,
    NeighborCandidate, NeighborFinder, PlaceCandidate, PlaceFinder, ProviderError,
};

/// A canned answer: a value or an error.
#[derive(Debug, Clone)]
enum Canned<T> {
    Value(T),
    Error(ProviderError),
}

impl<T: Clone> Canned<T> {
    fn get(&self) -> Result<T, ProviderError> {
        match self {
            Self::Value(value) => Ok(value.clone()),
            Self::Error(error) => Err(error.clone()),
        }
    }
}

/// Arguments received by a stub, in call order.
#[derive(Debug, Default)]
struct CallLog(RefCell<Vec<String>>);

impl CallLog {
    fn record(&self, argument: &str) {
        self.0.borrow_mut().push(argument.to_owned());
    }

    fn calls(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

async fn pause(delay: Option<Duration>) {
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

/// The error stubs use when told to fail.
#[must_use]
pub fn network_failure() -> ProviderError {
    ProviderError::Network {
        url: "http://stub.invalid".to_owned(),
        message: "connection refused".to_owned(),
    }
}

/// Stub [`ImageResolver`] answering from a query table.
#[derive(Debug)]
pub struct StubImages {
    by_query: HashMap<String, String>,
    fallback: Canned<Option<String>>,
    delay: Option<Duration>,
    log: CallLog,
}

impl StubImages {
    /// Answer `None` for every query.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            by_query: HashMap::new(),
            fallback: Canned::Value(None),
            delay: None,
            log: CallLog::default(),
        }
    }

    /// Fail every query not listed in the table.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fallback: Canned::Error(network_failure()),
            ..Self::empty()
        }
    }

    /// Answer `url` for queries not listed in the table.
    #[must_use]
    pub fn always(url: impl Into<String>) -> Self {
        Self {
            fallback: Canned::Value(Some(url.into())),
            ..Self::empty()
        }
    }

    /// Answer `url` for exactly `query`.
    #[must_use]
    pub fn with_image(mut self, query: impl Into<String>, url: impl Into<String>) -> Self {
        self.by_query.insert(query.into(), url.into());
        self
    }

    /// Sleep before every answer.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queries received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.log.calls()
    }
}

#[async_trait(?Send)]
impl ImageResolver for StubImages {
    async fn search(&self, query: &str) -> Result<Option<String>, ProviderError> {
        self.log.record(query);
        pause(self.delay).await;
        match self.by_query.get(query) {
            Some(url) => Ok(Some(url.clone())),
            None => self.fallback.get(),
        }
    }
}

/// Stub [`PlaceFinder`].
#[derive(Debug)]
pub struct StubPlaces {
    response: Canned<Vec<PlaceCandidate>>,
    delay: Option<Duration>,
    log: CallLog,
}

impl StubPlaces {
    /// Return `places` for every city.
    #[must_use]
    pub fn with_places(places: Vec<PlaceCandidate>) -> Self {
        Self {
            response: Canned::Value(places),
            delay: None,
            log: CallLog::default(),
        }
    }

    /// Return no places.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_places(Vec::new())
    }

    /// Fail every call.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            response: Canned::Error(network_failure()),
            ..Self::empty()
        }
    }

    /// Sleep before every answer.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Cities requested so far.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.log.calls()
    }
}

#[async_trait(?Send)]
impl PlaceFinder for StubPlaces {
    async fn for_city(&self, city: &str) -> Result<Vec<PlaceCandidate>, ProviderError> {
        self.log.record(city);
        pause(self.delay).await;
        self.response.get()
    }
}

/// Stub [`GeocodeResolver`].
#[derive(Debug)]
pub struct StubGeocoder {
    response: Canned<Option<Coordinate>>,
    delay: Option<Duration>,
    log: CallLog,
}

impl StubGeocoder {
    /// Return `coordinate` for every name.
    #[must_use]
    pub fn at(coordinate: Coordinate) -> Self {
        Self {
            response: Canned::Value(Some(coordinate)),
            delay: None,
            log: CallLog::default(),
        }
    }

    /// Know no names.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            response: Canned::Value(None),
            delay: None,
            log: CallLog::default(),
        }
    }

    /// Fail every call.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            response: Canned::Error(network_failure()),
            ..Self::empty()
        }
    }

    /// Sleep before every answer.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Names requested so far.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.log.calls()
    }
}

#[async_trait(?Send)]
impl GeocodeResolver for StubGeocoder {
    async fn for_city(&self, city: &str) -> Result<Option<Coordinate>, ProviderError> {
        self.log.record(city);
        pause(self.delay).await;
        self.response.get()
    }
}

/// Stub [`NeighborFinder`].
#[derive(Debug)]
pub struct StubNeighbors {
    response: Canned<Vec<NeighborCandidate>>,
    delay: Option<Duration>,
    log: CallLog,
}

impl StubNeighbors {
    /// Return `neighbors` for every city.
    #[must_use]
    pub fn with_neighbors(neighbors: Vec<NeighborCandidate>) -> Self {
        Self {
            response: Canned::Value(neighbors),
            delay: None,
            log: CallLog::default(),
        }
    }

    /// Return no neighbours.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_neighbors(Vec::new())
    }

    /// Fail every call.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            response: Canned::Error(network_failure()),
            ..Self::empty()
        }
    }

    /// Sleep before every answer.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Cities requested so far.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.log.calls()
    }
}

#[async_trait(?Send)]
impl NeighborFinder for StubNeighbors {
    async fn near(&self, city: &str) -> Result<Vec<NeighborCandidate>, ProviderError> {
        self.log.record(city);
        pause(self.delay).await;
        self.response.get()
    }
}

/// Stub [`CountryDataSource`].
#[derive(Debug)]
pub struct StubCountries {
    profile: Canned<Option<CountryProfile>>,
    cities: Canned<Vec<PlaceCandidate>>,
    delay: Option<Duration>,
    fetch_log: CallLog,
    cities_log: CallLog,
}

impl StubCountries {
    /// Return `profile` for every slug and no cities.
    #[must_use]
    pub fn with_profile(profile: CountryProfile) -> Self {
        Self {
            profile: Canned::Value(Some(profile)),
            ..Self::empty()
        }
    }

    /// Know no countries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            profile: Canned::Value(None),
            cities: Canned::Value(Vec::new()),
            delay: None,
            fetch_log: CallLog::default(),
            cities_log: CallLog::default(),
        }
    }

    /// Fail every call.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            profile: Canned::Error(network_failure()),
            cities: Canned::Error(network_failure()),
            ..Self::empty()
        }
    }

    /// Return `cities` from [`CountryDataSource::cities_for`].
    #[must_use]
    pub fn with_cities(mut self, cities: Vec<PlaceCandidate>) -> Self {
        self.cities = Canned::Value(cities);
        self
    }

    /// Fail [`CountryDataSource::cities_for`] only.
    #[must_use]
    pub fn with_failing_cities(mut self) -> Self {
        self.cities = Canned::Error(network_failure());
        self
    }

    /// Sleep before every answer.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Slugs passed to `fetch` so far.
    #[must_use]
    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_log.calls()
    }

    /// `"{name}/{code}"` pairs passed to `cities_for` so far.
    #[must_use]
    pub fn city_calls(&self) -> Vec<String> {
        self.cities_log.calls()
    }
}

#[async_trait(?Send)]
impl CountryDataSource for StubCountries {
    async fn fetch(&self, country_slug: &str) -> Result<Option<CountryProfile>, ProviderError> {
        self.fetch_log.record(country_slug);
        pause(self.delay).await;
        self.profile.get()
    }

    async fn cities_for(
        &self,
        common_name: &str,
        country_code: &str,
    ) -> Result<Vec<PlaceCandidate>, ProviderError> {
        self.cities_log.record(&format!("{common_name}/{country_code}"));
        pause(self.delay).await;
        self.cities.get()
    }
}

/// One failing stub per provider, shared so tests can inspect call logs.
#[derive(Debug, Clone)]
pub struct FailingProviders {
    /// Failing image search.
    pub images: Rc<StubImages>,
    /// Failing place finder.
    pub places: Rc<StubPlaces>,
    /// Failing geocoder.
    pub geocoder: Rc<StubGeocoder>,
    /// Failing neighbour finder.
    pub neighbors: Rc<StubNeighbors>,
    /// Failing country source.
    pub countries: Rc<StubCountries>,
}

impl FailingProviders {
    /// Build a fresh set of failing stubs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            images: Rc::new(StubImages::failing()),
            places: Rc::new(StubPlaces::failing()),
            geocoder: Rc::new(StubGeocoder::failing()),
            neighbors: Rc::new(StubNeighbors::failing()),
            countries: Rc::new(StubCountries::failing()),
        }
    }

    /// Calls received across every stub.
    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.images.calls().len()
            + self.places.calls().len()
            + self.geocoder.calls().len()
            + self.neighbors.calls().len()
            + self.countries.fetch_calls().len()
            + self.countries.city_calls().len()
    }
}

impl Default for FailingProviders {
    fn default() -> Self {
        Self::new()
    }
}

/// A profile for France with Paris as its capital.
#[must_use]
pub fn france_profile() -> CountryProfile {
    CountryProfile {
        name: "France".to_owned(),
        capital: Some("Paris".to_owned()),
        region: "Europe".to_owned(),
        subregion: Some("Western Europe".to_owned()),
        population: 67_391_582,
        capital_coordinate: Coordinate::new(48.87, 2.33).ok(),
        country_code: "FR".to_owned(),
    }
}
