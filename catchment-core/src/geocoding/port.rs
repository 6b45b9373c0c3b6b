//! Geocoder trait and the address resolution policy built on it.

use crate::GeoPoint;

use super::error::GeocodeError;

/// A location matched for an address.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeocodeCandidate {
    /// Matched location.
    pub point: GeoPoint,
    /// Service-provided description of the match.
    pub display_name: String,
}

impl GeocodeCandidate {
    /// Construct a candidate.
    #[must_use]
    pub fn new(point: GeoPoint, display_name: impl Into<String>) -> Self {
        Self {
            point,
            display_name: display_name.into(),
        }
    }
}

/// Look up candidate locations for a free-text address.
///
/// Implementations return candidates best match first and an empty vector
/// when nothing matches. Failures reaching or decoding the service are
/// reported as transport errors.
///
/// # Examples
///
/// ```rust
/// use catchment_core::{GeoPoint, GeocodeCandidate, GeocodeError, Geocoder, resolve_address};
///
/// struct Fixed;
///
/// impl Geocoder for Fixed {
///     fn geocode(&self, _address: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
///         Ok(vec![GeocodeCandidate::new(GeoPoint::new(51.5, -0.1), "London")])
///     }
/// }
///
/// let candidate = resolve_address(&Fixed, "London")?;
/// assert_eq!(candidate.display_name, "London");
/// assert_eq!(resolve_address(&Fixed, "  "), Err(GeocodeError::EmptyAddress));
/// # Ok::<(), GeocodeError>(())
/// ```
pub trait Geocoder {
    /// Return candidate locations for `address`, best match first.
    fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        (**self).geocode(address)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        (**self).geocode(address)
    }
}

/// Resolve `address` to a single validated candidate.
///
/// # Errors
/// - [`GeocodeError::EmptyAddress`] when `address` is blank; the geocoder is
///   not called.
/// - [`GeocodeError::NotFound`] when the geocoder returns no candidates.
/// - [`GeocodeError::InvalidCoordinates`] when the first candidate lies
///   outside valid latitude/longitude ranges.
/// - Any transport error from the geocoder, unchanged.
pub fn resolve_address<G>(geocoder: &G, address: &str) -> Result<GeocodeCandidate, GeocodeError>
where
    G: Geocoder + ?Sized,
{
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(GeocodeError::EmptyAddress);
    }

    let candidate = geocoder
        .geocode(trimmed)?
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::NotFound {
            address: trimmed.to_owned(),
        })?;

    candidate
        .point
        .validate()
        .map_err(|_| GeocodeError::InvalidCoordinates {
            lat: candidate.point.lat,
            lng: candidate.point.lng,
        })?;
    log::debug!("resolved '{trimmed}' to {}", candidate.point);
    Ok(candidate)
}
