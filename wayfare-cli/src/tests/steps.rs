//! Behaviour-driven step definitions driving the resolve CLI scenarios.

use super::helpers::{FailingProvidersBuilder, utf8_tempdir, write_utf8};
use super::*;
use crate::resolve::run_resolve_with;
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use std::cell::RefCell;
use tempfile::TempDir;

#[derive(Debug)]
struct ResolveWorld {
    _tmp: TempDir,
    root: Utf8PathBuf,
    catalog: RefCell<Option<Utf8PathBuf>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl ResolveWorld {
    fn new() -> Self {
        let (tmp, root) = utf8_tempdir();
        Self {
            _tmp: tmp,
            root,
            catalog: RefCell::new(None),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self, command: &[&str]) -> Vec<String> {
        let mut argv = vec!["wayfare".to_owned()];
        argv.extend(command.iter().map(|arg| (*arg).to_owned()));
        if let Some(path) = self.catalog.borrow().as_ref() {
            argv.extend([format!("--{ARG_CATALOG}"), path.as_str().to_owned()]);
        }
        argv
    }

    fn printed_json(&self) -> Value {
        let stdout = String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8");
        serde_json::from_str(&stdout).expect("output should be JSON")
    }

    fn error_message(&self) -> String {
        let borrowed = self.result.borrow();
        borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect_err("expected error")
            .to_string()
    }
}

#[fixture]
fn world() -> ResolveWorld {
    ResolveWorld::new()
}

#[given("the built-in catalog")]
fn builtin_catalog(#[from(world)] world: &ResolveWorld) {
    world.catalog.replace(None);
}

#[given("an empty catalog file")]
fn empty_catalog_file(#[from(world)] world: &ResolveWorld) {
    let path = world.root.join("catalog.json");
    write_utf8(&path, b"{}");
    world.catalog.replace(Some(path));
}

#[given("a catalog path that does not exist")]
fn absent_catalog_path(#[from(world)] world: &ResolveWorld) {
    world.catalog.replace(Some(world.root.join("absent.json")));
}

fn run_command(world: &ResolveWorld, command: &[&str]) {
    let invocation = world.build_command_line(command);
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let builder = FailingProvidersBuilder::default();
    let outcome = parsed.and_then(|cli| {
        let mut buffer = world.stdout.borrow_mut();
        match cli.command {
            Command::Country(args) => {
                run_resolve_with(DestinationKind::Country, args, &builder, &mut *buffer)
            }
            Command::City(args) => {
                run_resolve_with(DestinationKind::City, args, &builder, &mut *buffer)
            }
        }
    });
    world.result.replace(Some(outcome));
}

#[when("I run the city command for {slug}")]
fn run_city(#[from(world)] world: &ResolveWorld, slug: String) {
    run_command(world, &["city", &slug]);
}

#[when("I run the country-scoped city command for {slug} in {country}")]
fn run_city_in_country(#[from(world)] world: &ResolveWorld, slug: String, country: String) {
    run_command(world, &["city", &slug, "--country", &country]);
}

#[when("I run the map command for {slug}")]
fn run_city_map(#[from(world)] world: &ResolveWorld, slug: String) {
    run_command(world, &["city", &slug, "--map"]);
}

#[when("I run the country command for {slug}")]
fn run_country(#[from(world)] world: &ResolveWorld, slug: String) {
    run_command(world, &["country", &slug]);
}

#[then("the command succeeds")]
fn command_succeeds(#[from(world)] world: &ResolveWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    if let Err(err) = result {
        panic!("expected success, found {err:?}");
    }
}

#[then("the printed page is named {name} with {count} places")]
fn printed_page_is_named(#[from(world)] world: &ResolveWorld, name: String, count: usize) {
    let page = world.printed_json();
    assert_eq!(page["name"], name.as_str());
    let places = page["places"].as_array().expect("places array");
    assert_eq!(places.len(), count);
}

#[then("the printed frame has a camera")]
fn printed_frame_has_camera(#[from(world)] world: &ResolveWorld) {
    let frame = world.printed_json();
    assert!(frame.get("camera").is_some());
    assert!(frame.get("state").is_some());
}

#[then("the command reports that {slug} was not found")]
fn command_reports_not_found(#[from(world)] world: &ResolveWorld, slug: String) {
    assert_eq!(
        world.error_message(),
        format!("destination \"{slug}\" not found (go home: /)")
    );
}

#[then("the command fails because the catalog is missing")]
fn command_fails_missing_catalog(#[from(world)] world: &ResolveWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingSourceFile { field, .. } => assert_eq!(*field, ARG_CATALOG),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

macro_rules! register_resolve_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/resolve_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: ResolveWorld) {
            let _ = world;
        }
    };
}

register_resolve_scenario!(resolve_curated_city, "printing a curated city page");
register_resolve_scenario!(resolve_placeholder_city, "printing an uncurated city from placeholders");
register_resolve_scenario!(resolve_map_frame, "printing the map frame of a city");
register_resolve_scenario!(resolve_unknown_country, "rejecting an unknown country");
register_resolve_scenario!(resolve_missing_catalog, "rejecting a missing catalog file");
