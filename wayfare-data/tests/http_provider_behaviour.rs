//! Behavioural tests for the HTTP adapters' failure paths.
//!
//! None of these scenarios reach a real service: credentials are checked
//! before any request is sent, and the geocoder targets a local port nobody
//! listens on.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use std::time::Duration;
use wayfare_core::{
    CountryDataSource, GeocodeResolver, ImageResolver, PlaceFinder, ProviderError,
};
use wayfare_data::{
    HttpProviderConfig, NOMINATIM_BASE_URL, NominatimGeocoder, OPENTRIPMAP_BASE_URL,
    OpenTripMapPlaceFinder, RestCountriesSource, UNSPLASH_BASE_URL, UnsplashImageResolver,
};

/// Adapter under test.
enum Adapter {
    Images(UnsplashImageResolver),
    Places(OpenTripMapPlaceFinder),
    Countries(RestCountriesSource),
    Geocoder(NominatimGeocoder),
}

type AdapterCell = RefCell<Option<Adapter>>;
type OutcomeCell = RefCell<Option<Result<(), ProviderError>>>;

#[fixture]
fn adapter() -> AdapterCell {
    RefCell::new(None)
}

#[fixture]
fn outcome() -> OutcomeCell {
    RefCell::new(None)
}

fn run<T>(
    future: impl std::future::Future<Output = Result<T, ProviderError>>,
) -> Result<(), ProviderError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime should build");
    runtime.block_on(future).map(|_| ())
}

fn with_adapter(
    cell: &AdapterCell,
    f: impl FnOnce(&Adapter) -> Result<(), ProviderError>,
) -> Result<(), ProviderError> {
    let guard = cell.borrow();
    let adapter = guard.as_ref().expect("adapter must be initialised");
    f(adapter)
}

// --- Given steps ---

#[given("an image resolver without an access key")]
fn image_resolver_without_key(#[from(adapter)] adapter: &AdapterCell) {
    let resolver =
        UnsplashImageResolver::with_config(HttpProviderConfig::new(UNSPLASH_BASE_URL))
            .expect("resolver should build");
    *adapter.borrow_mut() = Some(Adapter::Images(resolver));
}

#[given("a place finder without an api key")]
fn place_finder_without_key(#[from(adapter)] adapter: &AdapterCell) {
    let finder =
        OpenTripMapPlaceFinder::with_config(HttpProviderConfig::new(OPENTRIPMAP_BASE_URL))
            .expect("finder should build");
    *adapter.borrow_mut() = Some(Adapter::Places(finder));
}

#[given("a country source without a city directory")]
fn country_source_without_directory(#[from(adapter)] adapter: &AdapterCell) {
    let source = RestCountriesSource::new().expect("source should build");
    *adapter.borrow_mut() = Some(Adapter::Countries(source));
}

#[given("a geocoder pointed at a closed local port")]
fn geocoder_on_closed_port(#[from(adapter)] adapter: &AdapterCell) {
    let config = HttpProviderConfig::new(NOMINATIM_BASE_URL)
        .with_base_url("http://127.0.0.1:9")
        .with_timeout(Duration::from_secs(2));
    let geocoder = NominatimGeocoder::with_config(config).expect("geocoder should build");
    *adapter.borrow_mut() = Some(Adapter::Geocoder(geocoder));
}

// --- When steps ---

#[when("I search images for {query}")]
fn search_images(
    #[from(adapter)] adapter: &AdapterCell,
    #[from(outcome)] outcome: &OutcomeCell,
    query: String,
) {
    *outcome.borrow_mut() = Some(with_adapter(adapter, |current| match current {
        Adapter::Images(resolver) => run(resolver.search(&query)),
        _ => panic!("expected an image resolver"),
    }));
}

#[when("I look for places in {city}")]
fn find_places(
    #[from(adapter)] adapter: &AdapterCell,
    #[from(outcome)] outcome: &OutcomeCell,
    city: String,
) {
    *outcome.borrow_mut() = Some(with_adapter(adapter, |current| match current {
        Adapter::Places(finder) => run(finder.for_city(&city)),
        _ => panic!("expected a place finder"),
    }));
}

#[when("I list the cities of {country}")]
fn list_cities(
    #[from(adapter)] adapter: &AdapterCell,
    #[from(outcome)] outcome: &OutcomeCell,
    country: String,
) {
    *outcome.borrow_mut() = Some(with_adapter(adapter, |current| match current {
        Adapter::Countries(source) => run(source.cities_for(&country, "FR")),
        _ => panic!("expected a country source"),
    }));
}

#[when("I geocode {city}")]
fn geocode(
    #[from(adapter)] adapter: &AdapterCell,
    #[from(outcome)] outcome: &OutcomeCell,
    city: String,
) {
    *outcome.borrow_mut() = Some(with_adapter(adapter, |current| match current {
        Adapter::Geocoder(geocoder) => run(geocoder.for_city(&city)),
        _ => panic!("expected a geocoder"),
    }));
}

// --- Then steps ---

#[then("the call fails for missing {provider} credentials")]
fn missing_credentials(#[from(outcome)] outcome: &OutcomeCell, provider: String) {
    let borrowed = outcome.borrow();
    match &*borrowed {
        Some(Err(ProviderError::MissingCredentials { provider: name })) => {
            assert_eq!(*name, provider.as_str());
        }
        other => panic!("expected MissingCredentials, got {other:?}"),
    }
}

#[then("the call fails with a transport error")]
fn transport_error(#[from(outcome)] outcome: &OutcomeCell) {
    let borrowed = outcome.borrow();
    assert!(
        matches!(
            &*borrowed,
            Some(Err(
                ProviderError::Network { .. }
                    | ProviderError::Timeout { .. }
                    | ProviderError::Http { .. }
            ))
        ),
        "expected a transport error, got {borrowed:?}"
    );
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $index:literal) => {
        #[scenario(path = "tests/features/http_providers.feature", index = $index)]
        fn $fn_name(adapter: AdapterCell, outcome: OutcomeCell) {
            let _ = (adapter, outcome);
        }
    };
}

register_scenario!(images_without_key, 0);
register_scenario!(places_without_key, 1);
register_scenario!(cities_without_directory, 2);
register_scenario!(geocoder_on_closed_port_fails, 3);
