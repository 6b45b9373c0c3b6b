//! HTTP geocoding against Nominatim-compatible search services.
//!
//! [`NominatimGeocoder`] implements the synchronous
//! [`catchment_core::Geocoder`] port by blocking on an internal Tokio
//! runtime, so the simulator stays usable from plain synchronous code.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use catchment_core::resolve_address;
//! use catchment_data::{NominatimGeocoder, NominatimGeocoderConfig};
//!
//! let config = NominatimGeocoderConfig::new("https://nominatim.openstreetmap.org")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-shop/1.0");
//! let geocoder = NominatimGeocoder::with_config(config)?;
//! let candidate = resolve_address(&geocoder, "City Hall, New York")?;
//! println!("{} at {}, {}", candidate.display_name, candidate.point.lat, candidate.point.lng);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod nominatim;
mod provider;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, NominatimGeocoder, NominatimGeocoderConfig,
    ProviderBuildError,
};
