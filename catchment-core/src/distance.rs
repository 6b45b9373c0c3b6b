//! Great-circle distance between geographic points.
//!
//! Uses the haversine formula on a sphere of radius
//! [`EARTH_RADIUS_METRES`]. Inputs are not validated: any finite latitude
//! and longitude produce a finite, non-negative distance.

use crate::GeoPoint;

/// Mean Earth radius used by [`distance_metres`].
pub const EARTH_RADIUS_METRES: f64 = 6_371_000.0;

/// Haversine distance between `a` and `b` in metres.
///
/// The result is symmetric in its arguments and zero when both points are
/// equal.
///
/// # Examples
/// ```
/// use catchment_core::{GeoPoint, distance_metres};
///
/// let a = GeoPoint::new(40.7128, -74.0060);
/// let b = GeoPoint::new(40.7580, -73.9855);
/// let d = distance_metres(a, b);
/// assert!((5_300.0..5_330.0).contains(&d));
/// assert_eq!(d, distance_metres(b, a));
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "haversine distance is defined in floating-point trigonometry"
)]
pub fn distance_metres(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `h` fractionally outside `[0, 1]` for antipodal pairs.
    let h_clamped = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_METRES * h_clamped.sqrt().atan2((1.0 - h_clamped).sqrt())
}
