#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for simulator sessions: history and address lookup.

use std::cell::RefCell;

use catchment_core::test_support::{LOWER_MANHATTAN, StubGeocoder, seed_catalog};
use catchment_core::{
    GeoPoint, GeocodeError, OrderType, SimulationRequest, SimulationResult, Simulator,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Shared state for session scenarios.
#[derive(Default)]
struct SessionWorld {
    simulator: RefCell<Option<Simulator<StubGeocoder>>>,
    submitted: RefCell<Vec<GeoPoint>>,
    outcome: RefCell<Option<Result<SimulationResult, GeocodeError>>>,
}

impl SessionWorld {
    fn install(&self, geocoder: StubGeocoder) {
        self.simulator
            .replace(Some(Simulator::new(seed_catalog(), geocoder)));
    }

    fn with_simulator<T>(&self, action: impl FnOnce(&mut Simulator<StubGeocoder>) -> T) -> T {
        let mut borrowed = self.simulator.borrow_mut();
        let simulator = borrowed.as_mut().expect("simulator should be configured");
        action(simulator)
    }

    fn outcome(&self) -> Result<SimulationResult, GeocodeError> {
        self.outcome
            .borrow()
            .clone()
            .expect("an address simulation should have run")
    }
}

#[fixture]
fn world() -> SessionWorld {
    SessionWorld::default()
}

fn template() -> SimulationRequest {
    SimulationRequest::new(GeoPoint::new(0.0, 0.0), OrderType::Standard)
}

#[given("a simulator over the seed catalog")]
fn given_simulator(world: &SessionWorld) {
    world.install(StubGeocoder::at(LOWER_MANHATTAN, "City Hall, New York"));
}

#[given("a simulator whose geocoder is unreachable")]
fn given_unreachable(world: &SessionWorld) {
    world.install(StubGeocoder::with_error(GeocodeError::Network {
        url: "http://geocoder.invalid/search".to_owned(),
        message: "connection refused".to_owned(),
    }));
}

#[given("a simulator whose geocoder finds nothing")]
fn given_no_match(world: &SessionWorld) {
    world.install(StubGeocoder::with_candidates(Vec::new()));
}

#[when("{count} simulations are run")]
fn when_many(world: &SessionWorld, count: usize) {
    for step in (0_u32..).take(count) {
        let lat = LOWER_MANHATTAN.lat + 0.001 * f64::from(step);
        let point = GeoPoint::new(lat, LOWER_MANHATTAN.lng);
        world.with_simulator(|simulator| simulator.simulate(&template().at(point)));
        world.submitted.borrow_mut().push(point);
    }
}

#[when("a delivery to City Hall is simulated by address")]
fn when_by_address(world: &SessionWorld) {
    let outcome =
        world.with_simulator(|simulator| simulator.simulate_address("City Hall", &template()));
    world.outcome.replace(Some(outcome));
}

#[then("the history holds {count} results")]
fn then_history_len(world: &SessionWorld, count: usize) {
    let len = world.with_simulator(|simulator| simulator.history().len());
    assert_eq!(len, count);
}

#[then("the first simulation has been evicted")]
fn then_first_evicted(world: &SessionWorld) {
    let submitted = world.submitted.borrow();
    let recorded: Vec<GeoPoint> = world.with_simulator(|simulator| {
        simulator
            .history()
            .list()
            .map(|result| result.request.point)
            .collect()
    });
    let expected: Vec<GeoPoint> = submitted.iter().skip(1).rev().copied().collect();
    assert_eq!(recorded, expected);
}

#[then("a transport error is reported")]
fn then_transport_error(world: &SessionWorld) {
    let error = world.outcome().expect_err("geocoding should fail");
    assert!(error.is_transport(), "unexpected error {error}");
}

#[then("the address is reported as not found")]
fn then_not_found(world: &SessionWorld) {
    let error = world.outcome().expect_err("geocoding should fail");
    assert_eq!(
        error,
        GeocodeError::NotFound {
            address: "City Hall".to_owned()
        }
    );
}

#[then("the history is empty")]
fn then_history_empty(world: &SessionWorld) {
    assert!(world.with_simulator(|simulator| simulator.history().is_empty()));
}

#[then("the latest simulation succeeds from {id}")]
fn then_latest_succeeds(world: &SessionWorld, id: String) {
    let latest = world.with_simulator(|simulator| simulator.history().latest().cloned());
    let result = latest.expect("a simulation should be recorded");
    assert_eq!(result.request.point, LOWER_MANHATTAN);
    assert_eq!(
        result.best_option.map(|best| best.facility.id),
        Some(id.trim_matches('"').to_owned())
    );
}

#[scenario(path = "tests/features/session.feature", index = 0)]
fn sixth_simulation_evicts_oldest(world: SessionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/session.feature", index = 1)]
fn geocoding_failure_records_nothing(world: SessionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/session.feature", index = 2)]
fn unmatched_address(world: SessionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/session.feature", index = 3)]
fn resolved_address(world: SessionWorld) {
    let _ = world;
}
