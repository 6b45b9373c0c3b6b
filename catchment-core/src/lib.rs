//! Core domain types and algorithms for the Catchment engine.
//!
//! Given a delivery point and a snapshot of facilities, the engine decides
//! which facilities cover the point, estimates delivery times from distance,
//! load and urgency, and ranks the facilities able to fulfil a request.
//!
//! Everything here is synchronous and free of I/O. Address lookup is
//! abstracted behind the [`Geocoder`] trait; concrete HTTP implementations
//! live in `catchment-data`.
//!
//! # Examples
//!
//! ```
//! use catchment_core::{Facility, FacilityKind, GeoPoint, OrderType, SimulationEngine, SimulationRequest};
//!
//! # fn main() -> Result<(), catchment_core::FacilityError> {
//! let midtown = Facility::new(
//!     "wh-1",
//!     "Midtown Warehouse",
//!     FacilityKind::Warehouse,
//!     GeoPoint::new(40.7580, -73.9855),
//!     6_000.0,
//!     100,
//! )?
//! .with_products(["Coffee Beans"])
//! .with_current_load(50);
//!
//! let request = SimulationRequest::new(GeoPoint::new(40.7128, -74.0060), OrderType::Standard)
//!     .with_product("Coffee Beans");
//! let result = SimulationEngine::new().simulate(&request, &[midtown]);
//! assert_eq!(result.best_option.map(|best| best.delivery_time_minutes), Some(19));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod catalog;
mod coverage;
mod distance;
mod eta;
mod facility;
pub mod geocoding;
mod history;
mod point;
mod request;
mod session;
mod simulation;

#[doc(hidden)]
pub mod test_support;

pub use catalog::{Catalog, Variant};
pub use coverage::{CoverageResult, analyze_coverage, analyze_coverage_with};
pub use distance::{EARTH_RADIUS_METRES, distance_metres};
pub use eta::{DeliveryTimeModel, OrderTypeFactors, estimate_delivery_minutes};
pub use facility::{Facility, FacilityError, FacilityKind};
pub use geocoding::{GeocodeCandidate, GeocodeError, Geocoder, resolve_address};
pub use history::{DEFAULT_HISTORY_CAPACITY, SimulationHistory};
pub use point::{GeoPoint, GeoPointError};
pub use request::{ANY_PRODUCT, OrderType, SimulationRequest};
pub use session::Simulator;
pub use simulation::{MAX_ALTERNATIVES, SimulationEngine, SimulationFailure, SimulationResult};
