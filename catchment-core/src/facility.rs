//! Fulfilment facilities and their service parameters.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::GeoPoint;

/// Broad category of a facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FacilityKind {
    /// Bulk storage site.
    Warehouse,
    /// Regional distribution centre.
    Distribution,
    /// Retail store shipping from its own stock.
    Store,
    /// Cross-docking hub.
    Hub,
}

impl FacilityKind {
    /// Return the kind as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warehouse => "warehouse",
            Self::Distribution => "distribution",
            Self::Store => "store",
            Self::Hub => "hub",
        }
    }
}

impl std::fmt::Display for FacilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A site that can serve deliveries within a circular radius.
///
/// Facilities are supplied wholesale by the host application and are never
/// mutated by the engine. `current_load` may exceed `capacity`; that is
/// treated as overload rather than clamped.
///
/// # Examples
/// ```
/// use catchment_core::{Facility, FacilityKind, GeoPoint};
///
/// # fn main() -> Result<(), catchment_core::FacilityError> {
/// let facility = Facility::new(
///     "wh-1",
///     "Midtown Warehouse",
///     FacilityKind::Warehouse,
///     GeoPoint::new(40.7580, -73.9855),
///     6_000.0,
///     100,
/// )?
/// .with_products(["Coffee Beans"])
/// .with_current_load(50);
/// assert!(facility.stocks("Coffee Beans"));
/// assert_eq!(facility.load_percentage(), 50.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Facility {
    /// Unique identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Facility category.
    pub kind: FacilityKind,
    /// Location of the facility.
    pub coordinates: GeoPoint,
    /// Service radius in metres.
    pub radius_metres: f64,
    /// Whether the facility currently accepts orders.
    pub is_active: bool,
    /// Names of the products stocked here.
    #[cfg_attr(feature = "serde", serde(default))]
    pub products: BTreeSet<String>,
    /// Nominal order capacity; always positive.
    pub capacity: u32,
    /// Orders currently in progress.
    #[cfg_attr(feature = "serde", serde(default))]
    pub current_load: u32,
    /// Historical average delivery time, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub avg_delivery_time_minutes: Option<f64>,
}

/// Errors returned by [`Facility::new`] and [`Facility::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FacilityError {
    /// Capacity was zero.
    #[error("facility {id} must have a positive capacity")]
    ZeroCapacity {
        /// Identifier of the offending facility.
        id: String,
    },
    /// Radius was negative, NaN or infinite.
    #[error("facility {id} has invalid radius {radius_metres}")]
    InvalidRadius {
        /// Identifier of the offending facility.
        id: String,
        /// Radius as supplied.
        radius_metres: f64,
    },
}

impl Facility {
    /// Validate and construct an active facility with no stock and no load.
    ///
    /// # Errors
    /// Returns [`FacilityError`] when `capacity` is zero or `radius_metres`
    /// is negative or non-finite.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: FacilityKind,
        coordinates: GeoPoint,
        radius_metres: f64,
        capacity: u32,
    ) -> Result<Self, FacilityError> {
        let facility = Self {
            id: id.into(),
            name: name.into(),
            kind,
            coordinates,
            radius_metres,
            is_active: true,
            products: BTreeSet::new(),
            capacity,
            current_load: 0,
            avg_delivery_time_minutes: None,
        };
        facility.validate()?;
        Ok(facility)
    }

    /// Check the invariants enforced by [`Facility::new`].
    ///
    /// Useful for facilities decoded from external payloads.
    ///
    /// # Errors
    /// Returns [`FacilityError`] describing the first violation found.
    pub fn validate(&self) -> Result<(), FacilityError> {
        if self.capacity == 0 {
            return Err(FacilityError::ZeroCapacity {
                id: self.id.clone(),
            });
        }
        if !self.radius_metres.is_finite() || self.radius_metres < 0.0 {
            return Err(FacilityError::InvalidRadius {
                id: self.id.clone(),
                radius_metres: self.radius_metres,
            });
        }
        Ok(())
    }

    /// Replace the stocked product names.
    #[must_use]
    pub fn with_products<I, S>(mut self, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.products = products.into_iter().map(Into::into).collect();
        self
    }

    /// Set the number of orders in progress.
    #[must_use]
    pub fn with_current_load(mut self, current_load: u32) -> Self {
        self.current_load = current_load;
        self
    }

    /// Set whether the facility accepts orders.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Record a historical average delivery time.
    #[must_use]
    pub fn with_avg_delivery_time(mut self, minutes: f64) -> Self {
        self.avg_delivery_time_minutes = Some(minutes);
        self
    }

    /// Whether the facility stocks `product`.
    #[must_use]
    pub fn stocks(&self, product: &str) -> bool {
        self.products.contains(product)
    }

    /// Current load as a percentage of capacity.
    ///
    /// Exceeds `100.0` when the facility is overloaded. A zero capacity,
    /// which [`Facility::validate`] rejects, reports `0.0`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "load percentage is a floating-point ratio"
    )]
    pub fn load_percentage(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        100.0 * f64::from(self.current_load) / f64::from(self.capacity)
    }
}
