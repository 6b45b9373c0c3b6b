//! Failures raised while turning an address into coordinates.

use thiserror::Error;

/// Errors from [`crate::geocoding::Geocoder::geocode`] and
/// [`crate::geocoding::resolve_address`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeError {
    /// The address was blank.
    #[error("address must not be empty")]
    EmptyAddress,
    /// The geocoder returned no match for the address.
    #[error("no location found for address '{address}'")]
    NotFound {
        /// Address as supplied by the caller.
        address: String,
    },
    /// The request could not reach the geocoding service.
    #[error("network error requesting {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Underlying error description.
        message: String,
    },
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Underlying error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse geocoder response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
    /// A candidate carried coordinates outside the valid range.
    #[error("geocoder returned invalid coordinates ({lat}, {lng})")]
    InvalidCoordinates {
        /// Latitude as returned.
        lat: f64,
        /// Longitude as returned.
        lng: f64,
    },
}

impl GeocodeError {
    /// Whether the lookup itself failed, as opposed to the address being
    /// unusable.
    ///
    /// Transport errors may succeed when retried; input errors will not.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Timeout { .. } | Self::Http { .. } | Self::Parse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(GeocodeError::EmptyAddress, false)]
    #[case(GeocodeError::NotFound { address: "nowhere".into() }, false)]
    #[case(GeocodeError::InvalidCoordinates { lat: 91.0, lng: 0.0 }, false)]
    #[case(GeocodeError::Network { url: "u".into(), message: "refused".into() }, true)]
    #[case(GeocodeError::Timeout { url: "u".into(), timeout_secs: 30 }, true)]
    #[case(GeocodeError::Http { url: "u".into(), status: 503, message: "busy".into() }, true)]
    #[case(GeocodeError::Parse { message: "eof".into() }, true)]
    fn classifies_transport_errors(#[case] error: GeocodeError, #[case] expected: bool) {
        assert_eq!(error.is_transport(), expected);
    }

    #[rstest]
    fn not_found_names_address() {
        let err = GeocodeError::NotFound {
            address: "1 Nowhere Lane".into(),
        };
        assert_eq!(err.to_string(), "no location found for address '1 Nowhere Lane'");
    }
}
