//! Facade crate for the catchment coverage and delivery simulation engine.
//!
//! This crate re-exports the core domain types and exposes the HTTP geocoder
//! and catalog loader behind the `geocoder-http` feature.
//!
//! ```
//! use catchment_engine::{GeoPoint, OrderType, SimulationEngine, SimulationRequest};
//!
//! let request = SimulationRequest::new(GeoPoint::new(40.7128, -74.0060), OrderType::Express);
//! let result = SimulationEngine::new().simulate(&request, &[]);
//! assert!(!result.success);
//! ```

#![forbid(unsafe_code)]

pub use catchment_core::{
    ANY_PRODUCT, Catalog, CoverageResult, DEFAULT_HISTORY_CAPACITY, DeliveryTimeModel,
    EARTH_RADIUS_METRES, Facility, FacilityError, FacilityKind, GeoPoint, GeoPointError,
    GeocodeCandidate, GeocodeError, Geocoder, MAX_ALTERNATIVES, OrderType, OrderTypeFactors,
    SimulationEngine, SimulationFailure, SimulationHistory, SimulationRequest, SimulationResult,
    Simulator, Variant, analyze_coverage, analyze_coverage_with, distance_metres,
    estimate_delivery_minutes, resolve_address,
};

#[cfg(feature = "geocoder-http")]
pub use catchment_data::{
    CatalogLoadError, NominatimGeocoder, NominatimGeocoderConfig, ProviderBuildError,
    load_catalog,
};
