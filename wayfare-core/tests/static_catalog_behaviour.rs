//! Behavioural tests for loading and querying the static catalog.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use wayfare_core::{CatalogError, CuratedDestination, StaticCatalog};

type LoadResult = Result<StaticCatalog, CatalogError>;

#[fixture]
fn catalog() -> RefCell<Option<LoadResult>> {
    RefCell::new(None)
}

#[fixture]
fn record() -> RefCell<Option<CuratedDestination>> {
    RefCell::new(None)
}

fn loaded(catalog: &RefCell<Option<LoadResult>>) -> StaticCatalog {
    catalog
        .borrow()
        .as_ref()
        .expect("catalog must be loaded")
        .as_ref()
        .expect("catalog should parse")
        .clone()
}

#[given("the built-in catalog")]
fn given_builtin(#[from(catalog)] catalog: &RefCell<Option<LoadResult>>) {
    *catalog.borrow_mut() = Some(StaticCatalog::builtin());
}

#[given("a catalog document with a nameless city")]
fn given_nameless(#[from(catalog)] catalog: &RefCell<Option<LoadResult>>) {
    *catalog.borrow_mut() = Some(StaticCatalog::from_json_str(
        r#"{"cities": {"atlantis": {"name": ""}}}"#,
    ));
}

#[when("I look up the country {slug}")]
fn when_country(
    #[from(catalog)] catalog: &RefCell<Option<LoadResult>>,
    #[from(record)] record: &RefCell<Option<CuratedDestination>>,
    slug: String,
) {
    *record.borrow_mut() = loaded(catalog).country(&slug).cloned();
}

#[when("I look up the city {slug}")]
fn when_city(
    #[from(catalog)] catalog: &RefCell<Option<LoadResult>>,
    #[from(record)] record: &RefCell<Option<CuratedDestination>>,
    slug: String,
) {
    *record.borrow_mut() = loaded(catalog).city(&slug).cloned();
}

#[then("a curated record named {name} is returned")]
fn then_named(#[from(record)] record: &RefCell<Option<CuratedDestination>>, name: String) {
    let borrowed = record.borrow();
    let found = borrowed.as_ref().expect("expected a curated record");
    assert_eq!(found.name, name);
}

#[then("the record lists {count} cities")]
fn then_cities(#[from(record)] record: &RefCell<Option<CuratedDestination>>, count: usize) {
    let borrowed = record.borrow();
    let found = borrowed.as_ref().expect("expected a curated record");
    assert_eq!(found.places.len(), count);
}

#[then("no curated record is returned")]
fn then_none(#[from(record)] record: &RefCell<Option<CuratedDestination>>) {
    assert!(record.borrow().is_none(), "expected no curated record");
}

#[then("loading the catalog fails with a missing name error")]
fn then_missing_name(#[from(catalog)] catalog: &RefCell<Option<LoadResult>>) {
    let borrowed = catalog.borrow();
    assert!(
        matches!(&*borrowed, Some(Err(CatalogError::MissingName { .. }))),
        "expected MissingName, got {borrowed:?}"
    );
}

#[scenario(path = "tests/features/static_catalog.feature", index = 0)]
fn scenario_curated_country(
    catalog: RefCell<Option<LoadResult>>,
    record: RefCell<Option<CuratedDestination>>,
) {
    let _ = (catalog, record);
}

#[scenario(path = "tests/features/static_catalog.feature", index = 1)]
fn scenario_uncurated_city(
    catalog: RefCell<Option<LoadResult>>,
    record: RefCell<Option<CuratedDestination>>,
) {
    let _ = (catalog, record);
}

#[scenario(path = "tests/features/static_catalog.feature", index = 2)]
fn scenario_nameless_record(
    catalog: RefCell<Option<LoadResult>>,
    record: RefCell<Option<CuratedDestination>>,
) {
    let _ = (catalog, record);
}
