//! Focused unit tests covering resolve configuration, catalogs and output.

use super::helpers::{FailingProvidersBuilder, utf8_tempdir, write_utf8};
use super::*;
use crate::resolve::{
    OutputFormat, ResolveArgs, ResolveConfig, config_from_layers_for_test, execute_resolve,
    load_catalog,
};
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::{Value, json};
use std::time::Duration;
use wayfare_data::{GEONAMES_BASE_URL, UNSPLASH_BASE_URL};
use wayfare_resolver::DEFAULT_CALL_TIMEOUT;

fn args_for(slug: &str) -> ResolveArgs {
    ResolveArgs {
        slug: Some(slug.to_owned()),
        ..ResolveArgs::default()
    }
}

fn config_for(kind: DestinationKind, args: ResolveArgs) -> ResolveConfig {
    ResolveConfig::from_args(kind, args).expect("config should build")
}

fn run_to_string(config: &ResolveConfig) -> Result<String, CliError> {
    let builder = FailingProvidersBuilder::default();
    let mut buffer = Vec::new();
    execute_resolve(config, &builder, &mut buffer)?;
    Ok(String::from_utf8(buffer).expect("stdout utf-8"))
}

#[rstest]
#[case::absent(None)]
#[case::blank(Some("   "))]
fn converting_without_slug_errors(#[case] slug: Option<&str>) {
    let args = ResolveArgs {
        slug: slug.map(str::to_owned),
        ..ResolveArgs::default()
    };

    let err = ResolveConfig::from_args(DestinationKind::City, args)
        .expect_err("missing slug should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_SLUG);
            assert_eq!(env, ENV_SLUG);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn config_applies_defaults() {
    let config = config_for(DestinationKind::City, args_for(" Kyoto "));

    assert_eq!(config.request.identifier, "kyoto");
    assert_eq!(config.request.parent, None);
    assert_eq!(config.format, OutputFormat::Page);
    assert_eq!(config.timeout, DEFAULT_CALL_TIMEOUT);
    assert_eq!(config.endpoints.unsplash, UNSPLASH_BASE_URL);
    assert_eq!(config.endpoints.geonames, GEONAMES_BASE_URL);
    assert!(config.credentials.unsplash_access_key.is_none());
    assert!(config.output.is_none());
    assert!(config.catalog.is_none());
}

#[rstest]
#[case::city(DestinationKind::City, Some("japan"))]
#[case::country(DestinationKind::Country, None)]
fn parent_country_only_applies_to_cities(
    #[case] kind: DestinationKind,
    #[case] expected: Option<&str>,
) {
    let args = ResolveArgs {
        country: Some("Japan".to_owned()),
        map: true,
        ..args_for("kyoto")
    };

    let config = config_for(kind, args);
    assert_eq!(config.request.kind, kind);
    assert_eq!(config.request.parent.as_deref(), expected);
    assert_eq!(config.format, OutputFormat::Map);
}

#[rstest]
fn zero_timeout_is_rejected() {
    let args = ResolveArgs {
        timeout_secs: Some(0),
        ..args_for("kyoto")
    };

    match ResolveConfig::from_args(DestinationKind::City, args) {
        Err(CliError::ZeroDuration { field }) => assert_eq!(field, ARG_TIMEOUT_SECS),
        other => panic!("expected ZeroDuration, found {other:?}"),
    }
}

#[rstest]
fn credentials_are_redacted_in_debug_output() {
    let args = ResolveArgs {
        unsplash_access_key: Some("very-secret".to_owned()),
        ..args_for("kyoto")
    };

    let config = config_for(DestinationKind::City, args);
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("very-secret"));
    assert!(rendered.contains("<redacted>"));
}

#[rstest]
fn layered_configuration_prefers_cli_over_env_over_file() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "slug": "lisbon",
            "timeout_secs": 7,
            "unsplash_access_key": "from-file",
            "geonames_username": "file-user",
        }),
        None,
    );
    composer.push_environment(json!({
        "timeout_secs": 9,
        "geonames_username": "env-user",
    }));
    composer.push_cli(json!({ "slug": "porto" }));

    let config = config_from_layers_for_test(DestinationKind::City, composer.layers())
        .expect("layers should merge");
    assert_eq!(config.request.identifier, "porto");
    assert_eq!(config.timeout, Duration::from_secs(9));
    assert_eq!(
        config.credentials.unsplash_access_key.as_deref(),
        Some("from-file")
    );
    assert_eq!(
        config.credentials.geonames_username.as_deref(),
        Some("env-user")
    );
}

#[rstest]
fn missing_catalog_path_is_reported() {
    let (_tmp, root) = utf8_tempdir();
    let args = ResolveArgs {
        catalog: Some(root.join("absent.json")),
        ..args_for("kyoto")
    };

    let config = config_for(DestinationKind::City, args);
    match config.validate_sources() {
        Err(CliError::MissingSourceFile { field, .. }) => assert_eq!(field, ARG_CATALOG),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn directory_catalog_path_is_reported() {
    let (_tmp, root) = utf8_tempdir();
    let args = ResolveArgs {
        catalog: Some(root.clone()),
        ..args_for("kyoto")
    };

    let config = config_for(DestinationKind::City, args);
    match config.validate_sources() {
        Err(CliError::SourcePathNotFile { field, path }) => {
            assert_eq!(field, ARG_CATALOG);
            assert_eq!(path, root);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn builtin_catalog_loads_without_a_path() {
    let catalog = load_catalog(None).expect("built-in catalog");
    assert!(catalog.city("kyoto").is_some());
}

#[rstest]
fn custom_catalog_file_is_read() {
    let (_tmp, root) = utf8_tempdir();
    let path = root.join("catalog.json");
    write_utf8(
        &path,
        br#"{"cities": {"Oslo": {"name": "Oslo", "description": "Fjord capital."}}}"#,
    );

    let catalog = load_catalog(Some(path.as_path())).expect("custom catalog");
    let oslo = catalog.city("oslo").expect("oslo is curated");
    assert_eq!(oslo.name, "Oslo");
    assert!(catalog.city("kyoto").is_none());
}

#[rstest]
fn unreadable_catalog_is_reported() {
    let (_tmp, root) = utf8_tempdir();
    let path = root.join("absent.json");

    match load_catalog(Some(path.as_path())) {
        Err(CliError::OpenCatalog { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected OpenCatalog, found {other:?}"),
    }
}

#[rstest]
fn malformed_catalog_is_reported() {
    let (_tmp, root) = utf8_tempdir();
    let path = root.join("catalog.json");
    write_utf8(&path, b"{ not json");

    match load_catalog(Some(path.as_path())) {
        Err(CliError::ParseCatalog { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected ParseCatalog, found {other:?}"),
    }
}

#[rstest]
fn unknown_city_resolves_to_placeholders() {
    let (_tmp, root) = utf8_tempdir();
    let catalog = root.join("catalog.json");
    write_utf8(&catalog, b"{}");
    let args = ResolveArgs {
        catalog: Some(catalog),
        ..args_for("paris")
    };

    let stdout = run_to_string(&config_for(DestinationKind::City, args)).expect("resolves");
    let page: Value = serde_json::from_str(&stdout).expect("page JSON");
    let places = page["places"].as_array().expect("places array");
    assert_eq!(places.len(), 6);
    assert!(stdout.ends_with('\n'));
}

#[rstest]
fn map_output_renders_a_frame() {
    let args = ResolveArgs {
        map: true,
        ..args_for("kyoto")
    };

    let stdout = run_to_string(&config_for(DestinationKind::City, args)).expect("resolves");
    let frame: Value = serde_json::from_str(&stdout).expect("frame JSON");
    assert!(frame.get("camera").is_some());
    assert!(frame.get("markers").is_some());
}

#[rstest]
fn unknown_country_is_not_found() {
    let config = config_for(DestinationKind::Country, args_for("atlantis"));

    let err = run_to_string(&config).expect_err("atlantis does not exist");
    assert!(matches!(err, CliError::NotFound(_)));
    assert_eq!(
        err.to_string(),
        "destination \"atlantis\" not found (go home: /)"
    );
}

#[rstest]
fn output_path_receives_the_payload() {
    let (_tmp, root) = utf8_tempdir();
    let output = root.join("pages").join("kyoto.json");
    let args = ResolveArgs {
        output: Some(output.clone()),
        ..args_for("kyoto")
    };

    let stdout = run_to_string(&config_for(DestinationKind::City, args)).expect("resolves");
    assert!(stdout.is_empty());
    let written = std::fs::read_to_string(output.as_std_path()).expect("output file");
    let page: Value = serde_json::from_str(&written).expect("page JSON");
    assert_eq!(page["name"], "Kyoto");
}
