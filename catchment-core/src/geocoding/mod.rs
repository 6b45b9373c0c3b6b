//! Resolve free-text addresses to delivery points.
//!
//! The [`Geocoder`] trait abstracts the address lookup service. Callers pass
//! an address and receive zero or more [`GeocodeCandidate`] values, best match
//! first. [`resolve_address`] applies the engine's policy on top: blank input
//! is rejected before the geocoder is called, and only the first candidate is
//! used.
//!
//! Errors split into input errors (the address itself is unusable) and
//! transport errors (the lookup failed and may succeed on retry); see
//! [`GeocodeError::is_transport`].

mod error;
mod port;

pub use error::GeocodeError;
pub use port::{GeocodeCandidate, Geocoder, resolve_address};
