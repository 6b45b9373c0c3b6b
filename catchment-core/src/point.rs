//! Geographic points expressed in decimal degrees.

use geo::Coord;
use thiserror::Error;

/// A WGS84 position in decimal degrees.
///
/// Latitude is expected in `[-90, 90]` and longitude in `[-180, 180]`, but
/// the type does not enforce either range. Distance computations accept any
/// finite value; call [`GeoPoint::validate`] at the edges of the system where
/// coordinates enter from users or external services.
///
/// # Examples
/// ```
/// use catchment_core::GeoPoint;
///
/// let manhattan = GeoPoint::new(40.7128, -74.0060);
/// assert!(manhattan.validate().is_ok());
/// assert!(GeoPoint::new(91.0, 0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Errors returned by [`GeoPoint::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoPointError {
    /// A component was NaN or infinite.
    #[error("coordinates must be finite (lat {lat}, lng {lng})")]
    NonFinite {
        /// Latitude as supplied.
        lat: f64,
        /// Longitude as supplied.
        lng: f64,
    },
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl GeoPoint {
    /// Construct a point from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that both components are finite and within their ranges.
    ///
    /// # Errors
    /// Returns [`GeoPointError`] describing the first violated bound.
    pub fn validate(&self) -> Result<(), GeoPointError> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(GeoPointError::NonFinite {
                lat: self.lat,
                lng: self.lng,
            });
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(GeoPointError::LatitudeOutOfRange(self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(GeoPointError::LongitudeOutOfRange(self.lng));
        }
        Ok(())
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Self {
            x: point.lng,
            y: point.lat,
        }
    }
}

impl From<Coord<f64>> for GeoPoint {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}
