//! Fixtures shared by unit, behaviour and downstream crate tests.
//!
//! The seed catalog mirrors a small New York delivery network. It exists for
//! tests and demos only; production hosts always supply their own
//! [`Catalog`]. The module is hidden from the rendered documentation.

use std::cell::RefCell;
use std::collections::BTreeSet;

use crate::{
    Catalog, Facility, FacilityKind, GeoPoint, GeocodeCandidate, GeocodeError, Geocoder, Variant,
};

/// City Hall, Lower Manhattan.
pub const LOWER_MANHATTAN: GeoPoint = GeoPoint::new(40.7128, -74.0060);
/// Times Square, Midtown Manhattan.
pub const MIDTOWN: GeoPoint = GeoPoint::new(40.7580, -73.9855);
/// Crown Heights, Brooklyn.
pub const BROOKLYN: GeoPoint = GeoPoint::new(40.6782, -73.9442);
/// East Williamsburg, Brooklyn.
pub const WILLIAMSBURG: GeoPoint = GeoPoint::new(40.7306, -73.9352);
/// Exchange Place, Jersey City.
pub const JERSEY_CITY: GeoPoint = GeoPoint::new(40.7178, -74.0431);

/// Active warehouse at `point` with capacity 100, no stock and no load.
#[must_use]
pub fn facility_at(id: &str, point: GeoPoint, radius_metres: f64) -> Facility {
    Facility {
        id: id.to_owned(),
        name: format!("Facility {id}"),
        kind: FacilityKind::Warehouse,
        coordinates: point,
        radius_metres,
        is_active: true,
        products: BTreeSet::new(),
        capacity: 100,
        current_load: 0,
        avg_delivery_time_minutes: None,
    }
}

/// Four New York facilities, one of them inactive.
///
/// From [`LOWER_MANHATTAN`] with a standard order the fulfilling facilities
/// rank `wh-midtown` (19 min), `st-williamsburg` (23 min) and `dc-brooklyn`
/// (29 min, overloaded). `hub-jersey` is closest but inactive.
#[must_use]
pub fn seed_facilities() -> Vec<Facility> {
    vec![
        Facility {
            name: "Midtown Warehouse".to_owned(),
            capacity: 200,
            ..facility_at("wh-midtown", MIDTOWN, 8_000.0)
        }
        .with_products(["Coffee Beans", "T-Shirt", "Hoodie"])
        .with_current_load(100)
        .with_avg_delivery_time(35.0),
        Facility {
            name: "Brooklyn Distribution Centre".to_owned(),
            kind: FacilityKind::Distribution,
            capacity: 150,
            ..facility_at("dc-brooklyn", BROOKLYN, 10_000.0)
        }
        .with_products(["Coffee Beans", "Green Tea"])
        .with_current_load(135),
        Facility {
            name: "Williamsburg Store".to_owned(),
            kind: FacilityKind::Store,
            capacity: 40,
            ..facility_at("st-williamsburg", WILLIAMSBURG, 7_000.0)
        }
        .with_products(["T-Shirt"])
        .with_current_load(10),
        Facility {
            name: "Jersey City Hub".to_owned(),
            kind: FacilityKind::Hub,
            capacity: 300,
            ..facility_at("hub-jersey", JERSEY_CITY, 15_000.0)
        }
        .with_products(["Coffee Beans", "Green Tea", "T-Shirt", "Hoodie", "Scarf"])
        .with_active(false),
    ]
}

/// Seed facilities plus the products and variants they reference.
///
/// `Scarf` is only stocked by the inactive hub, so its variant can never be
/// fulfilled.
#[must_use]
pub fn seed_catalog() -> Catalog {
    Catalog::new(seed_facilities())
        .with_products(["Coffee Beans", "Green Tea", "T-Shirt", "Hoodie", "Scarf"])
        .with_variants([
            Variant::new("ts-red-l", "Red / L", "T-Shirt"),
            Variant::new("ts-blue-s", "Blue / S", "T-Shirt"),
            Variant::new("hd-grey-m", "Grey / M", "Hoodie"),
            Variant::new("cb-espresso", "Espresso 1kg", "Coffee Beans"),
            Variant::new("sc-wool", "Wool", "Scarf"),
        ])
}

/// Stub [`Geocoder`] returning a pre-configured response.
///
/// Every address passed to [`Geocoder::geocode`] is recorded so tests can
/// assert whether, and with what, the service was called.
///
/// # Example
///
/// ```
/// use catchment_core::test_support::StubGeocoder;
/// use catchment_core::{GeoPoint, GeocodeCandidate, Geocoder};
///
/// let geocoder = StubGeocoder::with_candidates(vec![GeocodeCandidate::new(
///     GeoPoint::new(40.7128, -74.0060),
///     "City Hall",
/// )]);
/// let found = geocoder.geocode("City Hall").map(|candidates| candidates.len());
/// assert_eq!(found, Ok(1));
/// assert_eq!(geocoder.calls(), ["City Hall"]);
/// ```
#[derive(Debug, Clone)]
pub struct StubGeocoder {
    response: StubResponse,
    calls: RefCell<Vec<String>>,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Candidates(Vec<GeocodeCandidate>),
    Error(GeocodeError),
}

impl StubGeocoder {
    /// Geocoder returning `candidates` for every address.
    #[must_use]
    pub const fn with_candidates(candidates: Vec<GeocodeCandidate>) -> Self {
        Self {
            response: StubResponse::Candidates(candidates),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Geocoder returning a single candidate at `point`.
    #[must_use]
    pub fn at(point: GeoPoint, display_name: &str) -> Self {
        Self::with_candidates(vec![GeocodeCandidate::new(point, display_name)])
    }

    /// Geocoder failing every lookup with `error`.
    #[must_use]
    pub const fn with_error(error: GeocodeError) -> Self {
        Self {
            response: StubResponse::Error(error),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Addresses received so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Geocoder for StubGeocoder {
    fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        self.calls.borrow_mut().push(address.to_owned());
        match &self.response {
            StubResponse::Candidates(candidates) => Ok(candidates.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn seed_catalog_is_valid() {
        let catalog = seed_catalog();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.facilities.len(), 4);
        for variant in &catalog.variants {
            assert!(catalog.products.contains(&variant.product));
        }
    }

    #[rstest]
    fn facility_at_matches_validated_constructor() {
        let built = Facility::new(
            "x",
            "Facility x",
            FacilityKind::Warehouse,
            MIDTOWN,
            1_000.0,
            100,
        )
        .expect("valid facility");
        assert_eq!(facility_at("x", MIDTOWN, 1_000.0), built);
    }

    #[rstest]
    fn stub_error_is_returned() {
        let geocoder = StubGeocoder::with_error(GeocodeError::Parse {
            message: "eof".into(),
        });
        assert!(geocoder.geocode("anywhere").is_err());
        assert_eq!(geocoder.calls(), ["anywhere"]);
    }
}
