//! Rank facilities for a request into a best option and alternatives.
//!
//! The engine evaluates coverage for every supplied facility, keeps those
//! able to fulfil the request, and orders them by estimated delivery time.
//! Sorting is stable, so facilities with equal estimates keep the order in
//! which the host supplied them.
//!
//! A request nobody can serve is a normal outcome: the returned
//! [`SimulationResult`] has `success == false` and carries a
//! [`SimulationFailure`] naming the most specific constraint requested.

use std::time::SystemTime;

use thiserror::Error;

use crate::{
    CoverageResult, DeliveryTimeModel, Facility, GeoPoint, SimulationRequest,
    analyze_coverage_with,
};

/// Maximum number of alternatives reported next to the best option.
pub const MAX_ALTERNATIVES: usize = 2;

/// Why a simulation found no fulfilling facility.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "reason", rename_all = "snake_case"))]
pub enum SimulationFailure {
    /// A variant was requested and no active facility in range stocks it.
    #[error("no active facility in range can supply variant '{variant}' of {product}")]
    VariantUnavailable {
        /// Display name of the variant.
        variant: String,
        /// Parent product of the variant.
        product: String,
    },
    /// A product was requested and no active facility in range stocks it.
    #[error("no active facility in range can supply {product}")]
    ProductUnavailable {
        /// Requested product name.
        product: String,
    },
    /// No active facility covers the destination.
    #[error("no active facility covers this location")]
    NoCoverage,
}

impl SimulationFailure {
    /// Pick the failure naming the most specific requested constraint.
    ///
    /// A variant takes precedence over a product; with neither the failure
    /// is a plain lack of coverage.
    #[must_use]
    pub fn for_request(request: &SimulationRequest) -> Self {
        if let Some(variant) = &request.variant {
            return Self::VariantUnavailable {
                variant: variant.name.clone(),
                product: variant.product.clone(),
            };
        }
        request
            .product_filter()
            .map_or(Self::NoCoverage, |product| Self::ProductUnavailable {
                product: product.to_owned(),
            })
    }
}

/// Outcome of a single simulation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    /// When the simulation ran.
    pub timestamp: SystemTime,
    /// The request that was simulated.
    pub request: SimulationRequest,
    /// Whether at least one facility can fulfil the request.
    pub success: bool,
    /// The fulfilling facility with the shortest delivery time.
    pub best_option: Option<CoverageResult>,
    /// Up to [`MAX_ALTERNATIVES`] runners-up, fastest first.
    pub alternatives: Vec<CoverageResult>,
    /// Coverage for every facility, in input order.
    pub all_results: Vec<CoverageResult>,
    /// Why no facility qualified; present only when `success` is false.
    pub failure: Option<SimulationFailure>,
}

impl SimulationResult {
    /// Human-readable failure message, if the run failed.
    #[must_use]
    pub fn failure_message(&self) -> Option<String> {
        self.failure.as_ref().map(ToString::to_string)
    }

    /// Number of facilities able to fulfil the request.
    #[must_use]
    pub fn fulfilling_count(&self) -> usize {
        self.all_results
            .iter()
            .filter(|result| result.can_fulfil)
            .count()
    }
}

/// Runs coverage analysis and ranking with a configurable delivery model.
///
/// # Examples
/// ```
/// use catchment_core::{Facility, FacilityKind, GeoPoint, OrderType, SimulationEngine, SimulationRequest};
///
/// # fn main() -> Result<(), catchment_core::FacilityError> {
/// let destination = GeoPoint::new(40.7128, -74.0060);
/// let facilities = vec![
///     Facility::new("a", "Far", FacilityKind::Store, GeoPoint::new(40.7580, -73.9855), 6_000.0, 10)?,
///     Facility::new("b", "Near", FacilityKind::Store, GeoPoint::new(40.7150, -74.0080), 6_000.0, 10)?,
/// ];
/// let engine = SimulationEngine::new();
/// let result = engine.simulate(&SimulationRequest::new(destination, OrderType::Express), &facilities);
/// assert!(result.success);
/// assert_eq!(result.best_option.map(|best| best.facility.id), Some("b".to_string()));
/// assert_eq!(result.alternatives.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationEngine {
    model: DeliveryTimeModel,
}

impl SimulationEngine {
    /// Construct an engine with the default delivery model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an engine with an explicit delivery model.
    #[must_use]
    pub const fn with_model(model: DeliveryTimeModel) -> Self {
        Self { model }
    }

    /// The delivery model in use.
    #[must_use]
    pub const fn model(&self) -> &DeliveryTimeModel {
        &self.model
    }

    /// Evaluate every facility for a delivery to `point`.
    #[must_use]
    pub fn analyze_coverage(
        &self,
        point: GeoPoint,
        request: &SimulationRequest,
        facilities: &[Facility],
    ) -> Vec<CoverageResult> {
        analyze_coverage_with(&self.model, point, facilities, request)
    }

    /// Simulate `request` against `facilities`, stamped with the current time.
    #[must_use]
    pub fn simulate(&self, request: &SimulationRequest, facilities: &[Facility]) -> SimulationResult {
        self.simulate_at(request, facilities, SystemTime::now())
    }

    /// Simulate `request` against `facilities` with an explicit timestamp.
    #[must_use]
    pub fn simulate_at(
        &self,
        request: &SimulationRequest,
        facilities: &[Facility],
        timestamp: SystemTime,
    ) -> SimulationResult {
        let all_results = self.analyze_coverage(request.point, request, facilities);
        let mut fulfilling: Vec<CoverageResult> = all_results
            .iter()
            .filter(|result| result.can_fulfil)
            .cloned()
            .collect();
        // `sort_by_key` is stable; equal estimates keep input order.
        fulfilling.sort_by_key(|result| result.delivery_time_minutes);

        let mut ranked = fulfilling.into_iter();
        let best_option = ranked.next();
        let alternatives: Vec<CoverageResult> = ranked.take(MAX_ALTERNATIVES).collect();
        let success = best_option.is_some();
        let failure = if success {
            None
        } else {
            Some(SimulationFailure::for_request(request))
        };

        if let Some(best) = &best_option {
            log::info!(
                "simulation at {}: best facility {} in {} min, {} alternative(s)",
                request.point,
                best.facility.id,
                best.delivery_time_minutes,
                alternatives.len(),
            );
        } else if let Some(reason) = &failure {
            log::warn!("simulation at {} failed: {reason}", request.point);
        }

        SimulationResult {
            timestamp,
            request: request.clone(),
            success,
            best_option,
            alternatives,
            all_results,
            failure,
        }
    }
}
