#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for per-facility coverage analysis.

use std::cell::RefCell;

use catchment_core::test_support::{LOWER_MANHATTAN, MIDTOWN, facility_at};
use catchment_core::{CoverageResult, Facility, OrderType, SimulationRequest, analyze_coverage};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Shared state for coverage scenarios.
#[derive(Default)]
struct CoverageWorld {
    warehouse: RefCell<Option<Facility>>,
    result: RefCell<Option<CoverageResult>>,
}

impl CoverageWorld {
    fn update_warehouse(&self, update: impl FnOnce(Facility) -> Facility) {
        let current = self
            .warehouse
            .borrow_mut()
            .take()
            .expect("warehouse should be configured");
        self.warehouse.replace(Some(update(current)));
    }

    fn result(&self) -> CoverageResult {
        self.result
            .borrow()
            .clone()
            .expect("coverage should be analysed")
    }
}

#[fixture]
fn world() -> CoverageWorld {
    CoverageWorld::default()
}

fn product_name(short: &str) -> &'static str {
    match short {
        "coffee" => "Coffee Beans",
        "tea" => "Green Tea",
        other => panic!("unknown product shorthand {other}"),
    }
}

#[given("a Midtown warehouse with a radius of {radius} metres stocking coffee")]
fn given_warehouse(world: &CoverageWorld, radius: f64) {
    let warehouse = facility_at("wh-midtown", MIDTOWN, radius).with_products(["Coffee Beans"]);
    world.warehouse.replace(Some(warehouse));
}

#[given("the warehouse is at half load")]
fn given_half_load(world: &CoverageWorld) {
    world.update_warehouse(|warehouse| warehouse.with_current_load(50));
}

#[given("the warehouse is inactive")]
fn given_inactive(world: &CoverageWorld) {
    world.update_warehouse(|warehouse| warehouse.with_active(false));
}

#[when("coverage is analysed for Lower Manhattan requesting {product}")]
fn when_analysed(world: &CoverageWorld, product: String) {
    let warehouse = world
        .warehouse
        .borrow()
        .clone()
        .expect("warehouse should be configured");
    let request = SimulationRequest::new(LOWER_MANHATTAN, OrderType::Standard)
        .with_product(product_name(product.trim_matches('"')));
    let result = analyze_coverage(LOWER_MANHATTAN, &[warehouse], &request)
        .into_iter()
        .next();
    world.result.replace(result);
}

#[then("the warehouse is out of range")]
fn then_out_of_range(world: &CoverageWorld) {
    let result = world.result();
    assert!(
        !result.is_in_range,
        "{} m should exceed radius {} m",
        result.distance_metres, result.facility.radius_metres
    );
}

#[then("the warehouse is in range")]
fn then_in_range(world: &CoverageWorld) {
    assert!(world.result().is_in_range);
}

#[then("the warehouse can fulfil the request")]
fn then_can_fulfil(world: &CoverageWorld) {
    assert!(world.result().can_fulfil);
}

#[then("the warehouse cannot fulfil the request")]
fn then_cannot_fulfil(world: &CoverageWorld) {
    assert!(!world.result().can_fulfil);
}

#[then("the estimated delivery time is {minutes} minutes")]
fn then_delivery_time(world: &CoverageWorld, minutes: u32) {
    assert_eq!(world.result().delivery_time_minutes, minutes);
}

#[scenario(path = "tests/features/coverage.feature", index = 0)]
fn warehouse_beyond_radius(world: CoverageWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/coverage.feature", index = 1)]
fn warehouse_within_radius(world: CoverageWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/coverage.feature", index = 2)]
fn inactive_warehouse(world: CoverageWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/coverage.feature", index = 3)]
fn missing_product(world: CoverageWorld) {
    let _ = world;
}
