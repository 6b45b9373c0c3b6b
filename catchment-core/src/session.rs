//! A simulation session tying a catalog, engine, history and geocoder together.

use std::num::NonZeroUsize;

use crate::{
    Catalog, CoverageResult, GeoPoint, GeocodeError, Geocoder, SimulationEngine,
    SimulationHistory, SimulationRequest, SimulationResult, resolve_address,
};

/// Stateful front end for hosts running repeated simulations.
///
/// The simulator owns a read-only [`Catalog`] snapshot and records every
/// completed simulation in a bounded [`SimulationHistory`]. Recording
/// methods take `&mut self`, so only one simulation can be in flight per
/// session.
///
/// # Examples
/// ```
/// use catchment_core::{Catalog, GeoPoint, GeocodeCandidate, GeocodeError, Geocoder, OrderType, SimulationRequest, Simulator};
///
/// struct Nowhere;
///
/// impl Geocoder for Nowhere {
///     fn geocode(&self, _address: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
///         Ok(Vec::new())
///     }
/// }
///
/// let mut simulator = Simulator::new(Catalog::default(), Nowhere);
/// let request = SimulationRequest::new(GeoPoint::new(40.7128, -74.0060), OrderType::Standard);
/// let result = simulator.simulate(&request);
/// assert!(!result.success);
/// assert_eq!(simulator.history().len(), 1);
///
/// let err = simulator.simulate_address("Atlantis", &request);
/// assert!(matches!(err, Err(GeocodeError::NotFound { .. })));
/// assert_eq!(simulator.history().len(), 1);
/// ```
#[derive(Debug)]
pub struct Simulator<G> {
    catalog: Catalog,
    engine: SimulationEngine,
    history: SimulationHistory,
    geocoder: G,
}

impl<G: Geocoder> Simulator<G> {
    /// Session over `catalog` with the default engine and history.
    #[must_use]
    pub fn new(catalog: Catalog, geocoder: G) -> Self {
        Self {
            catalog,
            engine: SimulationEngine::default(),
            history: SimulationHistory::default(),
            geocoder,
        }
    }

    /// Replace the engine, e.g. to use a tuned delivery model.
    #[must_use]
    pub fn with_engine(mut self, engine: SimulationEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Replace the history with an empty one of the given capacity.
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.history = SimulationHistory::with_capacity(capacity);
        self
    }

    /// The catalog snapshot in use.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The engine in use.
    #[must_use]
    pub const fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    /// Recent results, newest first.
    #[must_use]
    pub const fn history(&self) -> &SimulationHistory {
        &self.history
    }

    /// Coverage of every catalog facility for a delivery to `point`.
    ///
    /// Nothing is recorded.
    #[must_use]
    pub fn analyze_coverage(
        &self,
        point: GeoPoint,
        request: &SimulationRequest,
    ) -> Vec<CoverageResult> {
        self.engine
            .analyze_coverage(point, request, &self.catalog.facilities)
    }

    /// Simulate `request` and record the result.
    pub fn simulate(&mut self, request: &SimulationRequest) -> SimulationResult {
        let result = self.engine.simulate(request, &self.catalog.facilities);
        self.history.record(result.clone());
        result
    }

    /// Geocode `address`, move `template` there and simulate.
    ///
    /// # Errors
    /// Returns the [`GeocodeError`] from [`resolve_address`]; in that case no
    /// simulation runs and nothing is recorded.
    pub fn simulate_address(
        &mut self,
        address: &str,
        template: &SimulationRequest,
    ) -> Result<SimulationResult, GeocodeError> {
        let candidate = resolve_address(&self.geocoder, address)?;
        log::info!("simulating delivery to {}", candidate.display_name);
        let request = template.clone().at(candidate.point);
        Ok(self.simulate(&request))
    }

    /// Resolve `address` without simulating.
    ///
    /// # Errors
    /// See [`resolve_address`].
    pub fn locate(&self, address: &str) -> Result<GeoPoint, GeocodeError> {
        resolve_address(&self.geocoder, address).map(|candidate| candidate.point)
    }
}
