//! Per-facility coverage evaluation for a destination point.

use crate::{DeliveryTimeModel, Facility, GeoPoint, SimulationRequest, distance_metres};

/// Outcome of evaluating one facility against a request.
///
/// Results are derived afresh for every request and never persisted.
/// `can_fulfil` holds only when the facility is active, in range and stocks
/// the requested product and variant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageResult {
    /// The evaluated facility.
    pub facility: Facility,
    /// Great-circle distance from the facility to the destination.
    pub distance_metres: f64,
    /// Whether the destination lies within the service radius.
    pub is_in_range: bool,
    /// Estimated delivery time.
    pub delivery_time_minutes: u32,
    /// Whether the requested product is stocked (true when unfiltered).
    pub has_product: bool,
    /// Whether the requested variant is available (true when unfiltered).
    pub has_variant: bool,
    /// Current load as a percentage of capacity.
    pub load_percentage: f64,
    /// Whether the facility can serve the request.
    pub can_fulfil: bool,
}

impl CoverageResult {
    /// Evaluate `facility` for a delivery to `point`.
    #[must_use]
    pub fn evaluate(
        facility: &Facility,
        point: GeoPoint,
        request: &SimulationRequest,
        model: &DeliveryTimeModel,
    ) -> Self {
        let distance = distance_metres(point, facility.coordinates);
        let is_in_range = distance <= facility.radius_metres;
        let has_product = request
            .product_filter()
            .is_none_or(|product| facility.stocks(product));
        let has_variant = request
            .variant
            .as_ref()
            .is_none_or(|variant| facility.stocks(&variant.product));
        let load_percentage = facility.load_percentage();
        let delivery_time_minutes = model.estimate(distance, request.order_type, load_percentage);
        let can_fulfil = facility.is_active && is_in_range && has_product && has_variant;

        Self {
            facility: facility.clone(),
            distance_metres: distance,
            is_in_range,
            delivery_time_minutes,
            has_product,
            has_variant,
            load_percentage,
            can_fulfil,
        }
    }
}

/// Evaluate every facility against `point` using the default delivery model.
///
/// Output order matches `facilities`.
///
/// # Examples
/// ```
/// use catchment_core::{Facility, FacilityKind, GeoPoint, OrderType, SimulationRequest, analyze_coverage};
///
/// # fn main() -> Result<(), catchment_core::FacilityError> {
/// let point = GeoPoint::new(40.7128, -74.0060);
/// let midtown = Facility::new(
///     "wh-1",
///     "Midtown",
///     FacilityKind::Warehouse,
///     GeoPoint::new(40.7580, -73.9855),
///     3_000.0,
///     100,
/// )?;
/// let request = SimulationRequest::new(point, OrderType::Standard);
/// let results = analyze_coverage(point, &[midtown], &request);
/// assert!(!results[0].is_in_range);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn analyze_coverage(
    point: GeoPoint,
    facilities: &[Facility],
    request: &SimulationRequest,
) -> Vec<CoverageResult> {
    analyze_coverage_with(&DeliveryTimeModel::default(), point, facilities, request)
}

/// Evaluate every facility against `point` with an explicit delivery model.
#[must_use]
pub fn analyze_coverage_with(
    model: &DeliveryTimeModel,
    point: GeoPoint,
    facilities: &[Facility],
    request: &SimulationRequest,
) -> Vec<CoverageResult> {
    let results: Vec<CoverageResult> = facilities
        .iter()
        .map(|facility| CoverageResult::evaluate(facility, point, request, model))
        .collect();
    log::debug!(
        "coverage at {point}: {} of {} facilities in range, {} can fulfil",
        results.iter().filter(|result| result.is_in_range).count(),
        results.len(),
        results.iter().filter(|result| result.can_fulfil).count(),
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{LOWER_MANHATTAN, MIDTOWN, facility_at};
    use crate::{OrderType, Variant};
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> SimulationRequest {
        SimulationRequest::new(LOWER_MANHATTAN, OrderType::Standard).with_product("Coffee Beans")
    }

    #[rstest]
    fn out_of_range_facility_cannot_fulfil(request: SimulationRequest) {
        let facility = facility_at("wh-1", MIDTOWN, 3_000.0).with_products(["Coffee Beans"]);
        let result = CoverageResult::evaluate(
            &facility,
            LOWER_MANHATTAN,
            &request,
            &DeliveryTimeModel::default(),
        );
        assert!(!result.is_in_range);
        assert!(result.has_product);
        assert!(!result.can_fulfil);
        assert!((result.distance_metres - 5_314.5).abs() < 1.0);
    }

    #[rstest]
    fn in_range_facility_reports_eta(request: SimulationRequest) {
        let facility = facility_at("wh-1", MIDTOWN, 6_000.0)
            .with_products(["Coffee Beans"])
            .with_current_load(50);
        let result = CoverageResult::evaluate(
            &facility,
            LOWER_MANHATTAN,
            &request,
            &DeliveryTimeModel::default(),
        );
        assert!(result.is_in_range);
        assert!(result.can_fulfil);
        assert_eq!(result.load_percentage, 50.0);
        assert_eq!(result.delivery_time_minutes, 19);
    }

    #[rstest]
    fn radius_boundary_is_inclusive(request: SimulationRequest) {
        let model = DeliveryTimeModel::default();
        let exact = distance_metres(LOWER_MANHATTAN, MIDTOWN);
        let on_boundary = facility_at("wh-1", MIDTOWN, exact).with_products(["Coffee Beans"]);
        let zero_radius = facility_at("wh-2", MIDTOWN, 0.0);

        let boundary = CoverageResult::evaluate(&on_boundary, LOWER_MANHATTAN, &request, &model);
        let collapsed = CoverageResult::evaluate(&zero_radius, LOWER_MANHATTAN, &request, &model);
        assert!(boundary.is_in_range);
        assert!(!collapsed.is_in_range);
    }

    #[rstest]
    fn inactive_facility_cannot_fulfil(request: SimulationRequest) {
        let facility = facility_at("wh-1", MIDTOWN, 10_000.0)
            .with_products(["Coffee Beans"])
            .with_active(false);
        let result = CoverageResult::evaluate(
            &facility,
            LOWER_MANHATTAN,
            &request,
            &DeliveryTimeModel::default(),
        );
        assert!(result.is_in_range);
        assert!(!result.can_fulfil);
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some("any"), true)]
    #[case(Some("Coffee Beans"), true)]
    #[case(Some("Green Tea"), false)]
    fn product_filter_controls_has_product(#[case] product: Option<&str>, #[case] expected: bool) {
        let facility = facility_at("wh-1", MIDTOWN, 10_000.0).with_products(["Coffee Beans"]);
        let mut request = SimulationRequest::new(LOWER_MANHATTAN, OrderType::Standard);
        request.product = product.map(str::to_owned);
        let result = CoverageResult::evaluate(
            &facility,
            LOWER_MANHATTAN,
            &request,
            &DeliveryTimeModel::default(),
        );
        assert_eq!(result.has_product, expected);
        assert_eq!(result.can_fulfil, expected);
    }

    #[rstest]
    fn variant_availability_follows_parent_product() {
        let facility = facility_at("wh-1", MIDTOWN, 10_000.0).with_products(["T-Shirt"]);
        let stocked = SimulationRequest::new(LOWER_MANHATTAN, OrderType::Standard)
            .with_variant(Variant::new("ts-red-l", "Red / L", "T-Shirt"));
        let missing = SimulationRequest::new(LOWER_MANHATTAN, OrderType::Standard)
            .with_variant(Variant::new("hd-grey-m", "Grey / M", "Hoodie"));
        let model = DeliveryTimeModel::default();

        assert!(CoverageResult::evaluate(&facility, LOWER_MANHATTAN, &stocked, &model).has_variant);
        let result = CoverageResult::evaluate(&facility, LOWER_MANHATTAN, &missing, &model);
        assert!(!result.has_variant);
        assert!(!result.can_fulfil);
    }

    #[rstest]
    fn preserves_input_order(request: SimulationRequest) {
        let facilities = vec![
            facility_at("far", GeoPoint::new(41.0, -74.0), 1_000.0),
            facility_at("near", LOWER_MANHATTAN, 1_000.0),
        ];
        let ids: Vec<_> = analyze_coverage(LOWER_MANHATTAN, &facilities, &request)
            .into_iter()
            .map(|result| result.facility.id)
            .collect();
        assert_eq!(ids, ["far", "near"]);
    }

    #[rstest]
    fn empty_facility_list_yields_no_results(request: SimulationRequest) {
        assert!(analyze_coverage(LOWER_MANHATTAN, &[], &request).is_empty());
    }
}
