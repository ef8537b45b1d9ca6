//! Behavioural tests for [`DestinationResolver`].

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use wayfare_core::placeholder::is_placeholder;
use wayfare_core::test_support::FailingProviders;
use wayfare_core::{ResolvedViewModel, StaticCatalog};
use wayfare_resolver::{
    DestinationNotFound, DestinationResolver, Providers, ResolveRequest,
};

type Outcome = RefCell<Option<Result<ResolvedViewModel, DestinationNotFound>>>;

#[fixture]
fn catalog() -> RefCell<StaticCatalog> {
    RefCell::new(StaticCatalog::empty())
}

#[fixture]
fn providers() -> RefCell<Option<FailingProviders>> {
    RefCell::new(None)
}

#[fixture]
fn outcome() -> Outcome {
    RefCell::new(None)
}

fn resolve(
    catalog: &RefCell<StaticCatalog>,
    providers: &RefCell<Option<FailingProviders>>,
    request: &ResolveRequest,
) -> Result<ResolvedViewModel, DestinationNotFound> {
    let guard = providers.borrow();
    let stubs = guard.as_ref().expect("providers must be initialised");
    let resolver = DestinationResolver::new(
        catalog.borrow().clone(),
        Providers {
            images: stubs.images.clone(),
            places: stubs.places.clone(),
            geocoder: stubs.geocoder.clone(),
            neighbors: stubs.neighbors.clone(),
            countries: stubs.countries.clone(),
        },
    );
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("runtime builds");
    runtime.block_on(resolver.resolve(request))
}

fn page(outcome: &Outcome) -> ResolvedViewModel {
    outcome
        .borrow()
        .as_ref()
        .expect("a resolution must have run")
        .clone()
        .expect("expected a resolved page")
}

// --- Given steps ---

#[given("an empty catalog")]
fn given_empty(#[from(catalog)] catalog: &RefCell<StaticCatalog>) {
    *catalog.borrow_mut() = StaticCatalog::empty();
}

#[given("the built-in catalog")]
fn given_builtin(#[from(catalog)] catalog: &RefCell<StaticCatalog>) {
    *catalog.borrow_mut() = StaticCatalog::builtin().expect("embedded catalog parses");
}

#[given("providers that always fail")]
fn given_failing(#[from(providers)] providers: &RefCell<Option<FailingProviders>>) {
    *providers.borrow_mut() = Some(FailingProviders::new());
}

// --- When steps ---

#[when("I resolve the city {slug}")]
fn when_city(
    #[from(catalog)] catalog: &RefCell<StaticCatalog>,
    #[from(providers)] providers: &RefCell<Option<FailingProviders>>,
    #[from(outcome)] outcome: &Outcome,
    slug: String,
) {
    *outcome.borrow_mut() = Some(resolve(catalog, providers, &ResolveRequest::city(&slug)));
}

#[when("I resolve the country {slug}")]
fn when_country(
    #[from(catalog)] catalog: &RefCell<StaticCatalog>,
    #[from(providers)] providers: &RefCell<Option<FailingProviders>>,
    #[from(outcome)] outcome: &Outcome,
    slug: String,
) {
    *outcome.borrow_mut() = Some(resolve(catalog, providers, &ResolveRequest::country(&slug)));
}

// --- Then steps ---

#[then("the page lists {count} places")]
fn then_places(#[from(outcome)] outcome: &Outcome, count: usize) {
    assert_eq!(page(outcome).places.len(), count);
}

#[then("every image on the page is a placeholder")]
fn then_placeholders(#[from(outcome)] outcome: &Outcome) {
    let resolved = page(outcome);
    assert!(
        resolved.images().all(is_placeholder),
        "expected only placeholder images"
    );
}

#[then("the place finder was not asked")]
fn then_no_finder(#[from(providers)] providers: &RefCell<Option<FailingProviders>>) {
    let guard = providers.borrow();
    let stubs = guard.as_ref().expect("providers must be initialised");
    assert!(stubs.places.calls().is_empty());
}

#[then("the destination is not found")]
fn then_not_found(#[from(outcome)] outcome: &Outcome) {
    let borrowed = outcome.borrow();
    assert!(
        matches!(&*borrowed, Some(Err(_))),
        "expected DestinationNotFound, got {borrowed:?}"
    );
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $index:literal) => {
        #[scenario(path = "tests/features/destination_resolution.feature", index = $index)]
        fn $fn_name(
            catalog: RefCell<StaticCatalog>,
            providers: RefCell<Option<FailingProviders>>,
            outcome: Outcome,
        ) {
            let _ = (catalog, providers, outcome);
        }
    };
}

register_scenario!(uncurated_city_with_failing_providers, 0);
register_scenario!(curated_city, 1);
register_scenario!(unknown_country, 2);
