//! Response types for the Nominatim `/search` endpoint.
//!
//! Nominatim encodes coordinates as decimal strings; they are parsed and
//! range-checked before becoming [`GeocodeCandidate`]s.
//!
//! See: <https://nominatim.org/release-docs/latest/api/Search/>

use catchment_core::{GeoPoint, GeocodeCandidate, GeocodeError};
use serde::Deserialize;

/// A single entry of a `format=json` search response.
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    /// Latitude as a decimal string.
    pub lat: String,
    /// Longitude as a decimal string.
    pub lon: String,
    /// Full formatted address of the match.
    #[serde(default)]
    pub display_name: String,
}

impl SearchResult {
    /// Parse the coordinates and wrap them as a candidate.
    pub fn into_candidate(self) -> Result<GeocodeCandidate, GeocodeError> {
        let lat = parse_degrees("lat", &self.lat)?;
        let lng = parse_degrees("lon", &self.lon)?;
        let point = GeoPoint::new(lat, lng);
        point
            .validate()
            .map_err(|_| GeocodeError::InvalidCoordinates { lat, lng })?;
        Ok(GeocodeCandidate::new(point, self.display_name))
    }
}

fn parse_degrees(field: &str, raw: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse()
        .map_err(|err| GeocodeError::Parse {
            message: format!("invalid {field} '{raw}': {err}"),
        })
}
