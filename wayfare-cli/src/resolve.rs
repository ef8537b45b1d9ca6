//! Destination resolution commands for the Wayfare CLI.

use std::io::Write;
use std::rc::Rc;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfare_core::{DestinationKind, ResolvedViewModel, StaticCatalog};
use wayfare_data::{
    GEONAMES_BASE_URL, GeoNamesDirectory, HttpProviderConfig, NOMINATIM_BASE_URL,
    NominatimGeocoder, OPENTRIPMAP_BASE_URL, OpenTripMapPlaceFinder, ProviderBuildError,
    RESTCOUNTRIES_BASE_URL, RestCountriesSource, UNSPLASH_BASE_URL, UnsplashImageResolver,
};
use wayfare_fs::{read_utf8_to_string, write_utf8_file};
use wayfare_map::{MapConfig, MapView};
use wayfare_resolver::{
    DEFAULT_CALL_TIMEOUT, DestinationResolver, Providers, ResolveRequest, ResolverConfig,
};

use crate::{ARG_CATALOG, ARG_COUNTRY, ARG_SLUG, ARG_TIMEOUT_SECS, CliError, ENV_SLUG};

/// CLI arguments shared by the `country` and `city` subcommands.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "resolve",
    long_about = "Resolve a destination page by merging the curated catalog \
                 with live image, place, geocoding, neighbour and country \
                 providers. Credentials and endpoints can come from CLI \
                 flags, configuration files, or environment variables.",
    about = "Resolve a destination page"
)]
#[ortho_config(prefix = "WAYFARE")]
pub(crate) struct ResolveArgs {
    /// Destination slug, e.g. "kyoto".
    #[arg(value_name = "slug")]
    #[serde(default)]
    pub(crate) slug: Option<String>,
    /// Parent country slug of a city.
    #[arg(long = ARG_COUNTRY, value_name = "slug")]
    #[serde(default)]
    pub(crate) country: Option<String>,
    /// Print the rendered map frame instead of the page.
    #[arg(long)]
    #[serde(default)]
    pub(crate) map: bool,
    /// Write the output to a file instead of stdout.
    #[arg(long, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Curated catalog JSON replacing the built-in one.
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Budget for each provider call, in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Unsplash access key for hero and tile images.
    #[arg(long, value_name = "key")]
    #[serde(default)]
    pub(crate) unsplash_access_key: Option<String>,
    /// OpenTripMap API key for city attractions.
    #[arg(long, value_name = "key")]
    #[serde(default)]
    pub(crate) opentripmap_api_key: Option<String>,
    /// GeoNames account for neighbours and country city listings.
    #[arg(long, value_name = "user")]
    #[serde(default)]
    pub(crate) geonames_username: Option<String>,
    /// Override the Unsplash API base URL.
    #[arg(long, value_name = "url")]
    #[serde(default)]
    pub(crate) unsplash_base_url: Option<String>,
    /// Override the OpenTripMap API base URL.
    #[arg(long, value_name = "url")]
    #[serde(default)]
    pub(crate) opentripmap_base_url: Option<String>,
    /// Override the Nominatim base URL.
    #[arg(long, value_name = "url")]
    #[serde(default)]
    pub(crate) nominatim_base_url: Option<String>,
    /// Override the REST Countries base URL.
    #[arg(long, value_name = "url")]
    #[serde(default)]
    pub(crate) restcountries_base_url: Option<String>,
    /// Override the GeoNames base URL.
    #[arg(long, value_name = "url")]
    #[serde(default)]
    pub(crate) geonames_base_url: Option<String>,
}

impl ResolveArgs {
    pub(crate) fn into_config(self, kind: DestinationKind) -> Result<ResolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ResolveConfig::from_args(kind, merged)
    }
}

/// What the command prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    /// The resolved view model.
    Page,
    /// The map frame derived from it.
    Map,
}

/// Provider endpoints after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Endpoints {
    pub(crate) unsplash: String,
    pub(crate) opentripmap: String,
    pub(crate) nominatim: String,
    pub(crate) restcountries: String,
    pub(crate) geonames: String,
}

/// Provider credentials; absent ones make the matching provider decline.
#[derive(Clone, Default, PartialEq, Eq)]
pub(crate) struct Credentials {
    pub(crate) unsplash_access_key: Option<String>,
    pub(crate) opentripmap_api_key: Option<String>,
    pub(crate) geonames_username: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("unsplash_access_key", &redact(&self.unsplash_access_key))
            .field("opentripmap_api_key", &redact(&self.opentripmap_api_key))
            .field("geonames_username", &redact(&self.geonames_username))
            .finish()
    }
}

/// Resolved configuration for one `country` or `city` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolveConfig {
    pub(crate) request: ResolveRequest,
    pub(crate) format: OutputFormat,
    pub(crate) output: Option<Utf8PathBuf>,
    pub(crate) catalog: Option<Utf8PathBuf>,
    pub(crate) timeout: Duration,
    pub(crate) endpoints: Endpoints,
    pub(crate) credentials: Credentials,
}

impl ResolveConfig {
    pub(crate) fn from_args(kind: DestinationKind, args: ResolveArgs) -> Result<Self, CliError> {
        let slug = args
            .slug
            .filter(|slug| !slug.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_SLUG,
                env: ENV_SLUG,
            })?;
        let mut request = ResolveRequest::new(kind, &slug);
        match (kind, args.country.as_deref()) {
            (DestinationKind::City, Some(country)) => request = request.with_parent(country),
            (DestinationKind::Country, Some(country)) => {
                log::warn!("ignoring --{ARG_COUNTRY} {country:?} for a country page");
            }
            (_, None) => {}
        }

        let timeout = match args.timeout_secs {
            Some(0) => {
                return Err(CliError::ZeroDuration {
                    field: ARG_TIMEOUT_SECS,
                });
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_CALL_TIMEOUT,
        };

        let endpoints = Endpoints {
            unsplash: args
                .unsplash_base_url
                .unwrap_or_else(|| UNSPLASH_BASE_URL.to_owned()),
            opentripmap: args
                .opentripmap_base_url
                .unwrap_or_else(|| OPENTRIPMAP_BASE_URL.to_owned()),
            nominatim: args
                .nominatim_base_url
                .unwrap_or_else(|| NOMINATIM_BASE_URL.to_owned()),
            restcountries: args
                .restcountries_base_url
                .unwrap_or_else(|| RESTCOUNTRIES_BASE_URL.to_owned()),
            geonames: args
                .geonames_base_url
                .unwrap_or_else(|| GEONAMES_BASE_URL.to_owned()),
        };

        Ok(Self {
            request,
            format: if args.map {
                OutputFormat::Map
            } else {
                OutputFormat::Page
            },
            output: args.output,
            catalog: args.catalog,
            timeout,
            endpoints,
            credentials: Credentials {
                unsplash_access_key: args.unsplash_access_key,
                opentripmap_api_key: args.opentripmap_api_key,
                geonames_username: args.geonames_username,
            },
        })
    }

    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        self.catalog
            .as_deref()
            .map_or(Ok(()), |path| Self::require_existing(path, ARG_CATALOG))
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match wayfare_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn http_config(&self, base_url: &str, api_key: Option<&str>) -> HttpProviderConfig {
        HttpProviderConfig {
            api_key: api_key.map(str::to_owned),
            ..HttpProviderConfig::new(base_url).with_timeout(self.timeout)
        }
    }
}

/// Builds the providers for the current invocation.
pub(crate) trait ProvidersBuilder {
    fn build(&self, config: &ResolveConfig) -> Result<Providers, CliError>;
}

/// Live HTTP providers.
pub(crate) struct HttpProvidersBuilder;

impl ProvidersBuilder for HttpProvidersBuilder {
    fn build(&self, config: &ResolveConfig) -> Result<Providers, CliError> {
        let endpoints = &config.endpoints;
        let credentials = &config.credentials;
        let failed = |provider: &'static str, base_url: &str| {
            let url = base_url.to_owned();
            move |source: ProviderBuildError| CliError::BuildProvider {
                provider,
                base_url: url,
                source,
            }
        };

        let images = UnsplashImageResolver::with_config(config.http_config(
            &endpoints.unsplash,
            credentials.unsplash_access_key.as_deref(),
        ))
        .map_err(failed("unsplash", &endpoints.unsplash))?;
        let places = OpenTripMapPlaceFinder::with_config(config.http_config(
            &endpoints.opentripmap,
            credentials.opentripmap_api_key.as_deref(),
        ))
        .map_err(failed("opentripmap", &endpoints.opentripmap))?;
        let geocoder =
            NominatimGeocoder::with_config(config.http_config(&endpoints.nominatim, None))
                .map_err(failed("nominatim", &endpoints.nominatim))?;
        let directory = GeoNamesDirectory::with_config(config.http_config(
            &endpoints.geonames,
            credentials.geonames_username.as_deref(),
        ))
        .map_err(failed("geonames", &endpoints.geonames))?;
        let countries =
            RestCountriesSource::with_config(config.http_config(&endpoints.restcountries, None))
                .map_err(failed("restcountries", &endpoints.restcountries))?
                .with_city_directory(directory.clone());

        Ok(Providers {
            images: Rc::new(images),
            places: Rc::new(places),
            geocoder: Rc::new(geocoder),
            neighbors: Rc::new(directory),
            countries: Rc::new(countries),
        })
    }
}

pub(crate) fn run_resolve(kind: DestinationKind, args: ResolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_resolve_with(kind, args, &HttpProvidersBuilder, &mut stdout)
}

pub(crate) fn run_resolve_with(
    kind: DestinationKind,
    args: ResolveArgs,
    builder: &dyn ProvidersBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config(kind)?;
    execute_resolve(&config, builder, writer)
}

pub(crate) fn execute_resolve(
    config: &ResolveConfig,
    builder: &dyn ProvidersBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    config.validate_sources()?;
    let catalog = load_catalog(config.catalog.as_deref())?;
    let providers = builder.build(config)?;
    let resolver = DestinationResolver::new(catalog, providers)
        .with_config(ResolverConfig::default().with_call_timeout(config.timeout));
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::StartRuntime)?;
    let model = runtime.block_on(resolver.resolve(&config.request))?;
    let payload = render(&model, config.format)?;

    if let Some(path) = config.output.as_deref() {
        return write_utf8_file(path, &payload).map_err(|source| CliError::WriteOutputFile {
            path: path.to_path_buf(),
            source,
        });
    }
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)
}

/// Load the catalog at `path`, or the built-in one.
pub(crate) fn load_catalog(path: Option<&Utf8Path>) -> Result<StaticCatalog, CliError> {
    let Some(catalog_path) = path else {
        return StaticCatalog::builtin().map_err(CliError::BuiltinCatalog);
    };
    let document =
        read_utf8_to_string(catalog_path).map_err(|source| CliError::OpenCatalog {
            path: catalog_path.to_path_buf(),
            source,
        })?;
    StaticCatalog::from_json_str(&document).map_err(|source| CliError::ParseCatalog {
        path: catalog_path.to_path_buf(),
        source,
    })
}

fn render(model: &ResolvedViewModel, format: OutputFormat) -> Result<String, CliError> {
    let encoded = match format {
        OutputFormat::Page => serde_json::to_string_pretty(model),
        OutputFormat::Map => {
            let mut view = MapView::new(MapConfig::default());
            view.show(model);
            serde_json::to_string_pretty(&view.frame())
        }
    };
    let mut payload = encoded.map_err(CliError::SerialiseOutput)?;
    payload.push('\n');
    Ok(payload)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    kind: DestinationKind,
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ResolveConfig, CliError> {
    let merged = ResolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ResolveConfig::from_args(kind, merged)
}
