//! Delivery-time estimation from distance, facility load and order urgency.
//!
//! The estimate is a step model:
//!
//! ```text
//! base   = round(distance_km * minutes_per_km)
//! result = round(base * load_factor * order_type_factor)
//! ```
//!
//! The load factor switches from the normal to the overload factor only when
//! the load percentage is strictly above the threshold.

use crate::OrderType;

/// Multipliers applied per [`OrderType`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderTypeFactors {
    /// Factor for [`OrderType::Standard`].
    pub standard: f64,
    /// Factor for [`OrderType::Express`].
    pub express: f64,
    /// Factor for [`OrderType::SameDay`].
    pub same_day: f64,
    /// Factor for [`OrderType::Scheduled`].
    pub scheduled: f64,
}

impl Default for OrderTypeFactors {
    fn default() -> Self {
        Self {
            standard: 1.0,
            express: 0.7,
            same_day: 1.2,
            scheduled: 1.5,
        }
    }
}

impl OrderTypeFactors {
    /// Factor for `order_type`.
    #[must_use]
    pub const fn factor(&self, order_type: OrderType) -> f64 {
        match order_type {
            OrderType::Standard => self.standard,
            OrderType::Express => self.express,
            OrderType::SameDay => self.same_day,
            OrderType::Scheduled => self.scheduled,
        }
    }
}

/// Tunable constants for [`DeliveryTimeModel::estimate`].
///
/// # Examples
/// ```
/// use catchment_core::{DeliveryTimeModel, OrderType};
///
/// let model = DeliveryTimeModel::default();
/// // 10 km at 50 % load: round(30 * 1.2) = 36 minutes.
/// assert_eq!(model.estimate(10_000.0, OrderType::Standard, 50.0), 36);
/// // Above 80 % load the overload factor applies: 30 * 1.5 = 45.
/// assert_eq!(model.estimate(10_000.0, OrderType::Standard, 80.5), 45);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryTimeModel {
    /// Travel minutes per kilometre.
    pub minutes_per_km: f64,
    /// Load percentage above which the overload factor applies.
    pub overload_threshold_percent: f64,
    /// Load factor at or below the threshold.
    pub normal_load_factor: f64,
    /// Load factor above the threshold.
    pub overload_factor: f64,
    /// Per-order-type multipliers.
    pub order_type_factors: OrderTypeFactors,
}

impl Default for DeliveryTimeModel {
    fn default() -> Self {
        Self {
            minutes_per_km: 3.0,
            overload_threshold_percent: 80.0,
            normal_load_factor: 1.2,
            overload_factor: 1.5,
            order_type_factors: OrderTypeFactors::default(),
        }
    }
}

impl DeliveryTimeModel {
    /// Load factor for `load_percentage`.
    #[must_use]
    pub fn load_factor(&self, load_percentage: f64) -> f64 {
        if load_percentage > self.overload_threshold_percent {
            self.overload_factor
        } else {
            self.normal_load_factor
        }
    }

    /// Estimated delivery time in whole minutes.
    ///
    /// Deterministic and infallible. Negative or NaN intermediate values
    /// saturate to zero.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the estimate is a rounded floating-point product saturated into u32"
    )]
    pub fn estimate(&self, distance_metres: f64, order_type: OrderType, load_percentage: f64) -> u32 {
        let base_minutes = (distance_metres / 1000.0 * self.minutes_per_km).round();
        let scaled = base_minutes
            * self.load_factor(load_percentage)
            * self.order_type_factors.factor(order_type);
        scaled.round() as u32
    }
}

/// Estimate delivery minutes with the default [`DeliveryTimeModel`].
///
/// # Examples
/// ```
/// use catchment_core::{OrderType, estimate_delivery_minutes};
///
/// let standard = estimate_delivery_minutes(5_000.0, OrderType::Standard, 40.0);
/// let express = estimate_delivery_minutes(5_000.0, OrderType::Express, 40.0);
/// assert!(express < standard);
/// ```
#[must_use]
pub fn estimate_delivery_minutes(
    distance_metres: f64,
    order_type: OrderType,
    load_percentage: f64,
) -> u32 {
    DeliveryTimeModel::default().estimate(distance_metres, order_type, load_percentage)
}
