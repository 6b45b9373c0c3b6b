//! Error types emitted by the catchment CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use catchment_core::{GeoPointError, GeocodeError};
use catchment_data::{CatalogLoadError, ProviderBuildError};
use thiserror::Error;

/// Errors emitted by the catchment CLI.
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
        /// Flag name without dashes.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// Neither coordinates nor an address were supplied.
    #[error("no delivery location given (set --lat and --lng, or --address)")]
    MissingLocation,
    /// Both coordinates and an address were supplied.
    #[error("give either --lat/--lng or --address, not both")]
    AmbiguousLocation,
    /// Supplied coordinates are out of range.
    #[error("invalid delivery coordinates: {0}")]
    InvalidCoordinates(#[source] GeoPointError),
    /// The order type is not recognised.
    #[error("invalid --order-type '{value}': {message}")]
    InvalidOrderType {
        /// Value as supplied.
        value: String,
        /// Parser message.
        message: String,
    },
    /// A quantity of zero was requested.
    #[error("--quantity must be at least 1")]
    ZeroQuantity,
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Path as supplied.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// Path as supplied.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// Path as supplied.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The catalog could not be loaded.
    #[error(transparent)]
    LoadCatalog(#[from] CatalogLoadError),
    /// The requested variant is not in the catalog.
    #[error("variant '{id}' is not in the catalog")]
    UnknownVariant {
        /// Variant identifier as supplied.
        id: String,
    },
    /// Constructing the HTTP geocoder failed.
    #[error("failed to build geocoder for {base_url:?}: {source}")]
    BuildGeocoder {
        /// Configured service URL.
        base_url: String,
        /// Construction failure.
        #[source]
        source: ProviderBuildError,
    },
    /// The delivery address could not be resolved.
    #[error("failed to geocode '{address}': {source}")]
    Geocode {
        /// Address as supplied.
        address: String,
        /// Lookup failure.
        #[source]
        source: GeocodeError,
    },
    /// Serialising the result failed.
    #[error("failed to serialise result: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the result to the output stream failed.
    #[error("failed to write result: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Writing the result file failed.
    #[error("failed to write result to {path:?}: {source}")]
    WriteOutputFile {
        /// Output path as supplied.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
