//! Error types emitted by the Wayfare CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use wayfare_core::CatalogError;
use wayfare_data::ProviderBuildError;
use wayfare_resolver::DestinationNotFound;

/// Errors emitted by the Wayfare CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that could supply it.
        env: &'static str,
    },
    /// A duration option was zero.
    #[error("{field} must be at least one second")]
    ZeroDuration {
        /// Option name.
        field: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the catalog file failed.
    #[error("failed to open catalog at {path:?}: {source}")]
    OpenCatalog {
        /// Catalog path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// The catalog file is not a valid catalog document.
    #[error("failed to parse catalog at {path:?}: {source}")]
    ParseCatalog {
        /// Catalog path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: CatalogError,
    },
    /// The catalog compiled into the binary failed to load.
    #[error("built-in catalog is invalid: {0}")]
    BuiltinCatalog(#[source] CatalogError),
    /// Constructing an HTTP provider failed.
    #[error("failed to build {provider} provider for {base_url:?}: {source}")]
    BuildProvider {
        /// Provider name.
        provider: &'static str,
        /// Configured base URL.
        base_url: String,
        /// Underlying failure.
        #[source]
        source: ProviderBuildError,
    },
    /// The async runtime could not start.
    #[error("failed to start runtime: {0}")]
    StartRuntime(#[source] std::io::Error),
    /// The destination does not exist.
    #[error(transparent)]
    NotFound(#[from] DestinationNotFound),
    /// Serialising the output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing to standard output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Writing the output file failed.
    #[error("failed to write output to {path:?}: {source}")]
    WriteOutputFile {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
}
