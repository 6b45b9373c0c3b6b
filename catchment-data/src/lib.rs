//! Adapters feeding the catchment engine from files and HTTP services.
//!
//! Responsibilities:
//! - Load catalog snapshots from JSON files.
//! - Resolve free-text addresses through a Nominatim-compatible service.
//!
//! Boundaries:
//! - Do not encode coverage or ranking rules (live in `catchment-core`).
//! - Keep blocking I/O off async executors.

pub mod catalog;
pub mod geocoding;

pub use catalog::{CatalogLoadError, load_catalog, parse_catalog};
pub use geocoding::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, NominatimGeocoder, NominatimGeocoderConfig,
    ProviderBuildError,
};
