//! Simulation requests and order urgency classes.

use std::num::NonZeroU32;

use crate::{GeoPoint, Variant};

/// Product name that disables product filtering.
pub const ANY_PRODUCT: &str = "any";

/// Urgency class of an order.
///
/// # Examples
/// ```
/// use catchment_core::OrderType;
///
/// assert_eq!("same_day".parse::<OrderType>(), Ok(OrderType::SameDay));
/// assert_eq!(OrderType::Express.to_string(), "express");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OrderType {
    /// Regular delivery.
    #[default]
    Standard,
    /// Expedited delivery.
    Express,
    /// Delivery on the day of ordering.
    SameDay,
    /// Delivery in a booked slot.
    Scheduled,
}

impl OrderType {
    /// Every order type, in declaration order.
    pub const ALL: [Self; 4] = [Self::Standard, Self::Express, Self::SameDay, Self::Scheduled];

    /// Return the order type as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
            Self::SameDay => "same_day",
            Self::Scheduled => "scheduled",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "standard" => Ok(Self::Standard),
            "express" => Ok(Self::Express),
            "same_day" => Ok(Self::SameDay),
            "scheduled" => Ok(Self::Scheduled),
            _ => Err(format!("unknown order type '{s}'")),
        }
    }
}

/// Parameters for a coverage analysis or simulation.
///
/// # Examples
/// ```
/// use catchment_core::{GeoPoint, OrderType, SimulationRequest, Variant};
///
/// let request = SimulationRequest::new(GeoPoint::new(40.7128, -74.0060), OrderType::Express)
///     .with_product("T-Shirt")
///     .with_variant(Variant::new("ts-red-l", "Red / L", "T-Shirt"));
/// assert_eq!(request.product_filter(), Some("T-Shirt"));
/// assert_eq!(request.quantity.get(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationRequest {
    /// Delivery destination.
    pub point: GeoPoint,
    /// Requested product name; `None` or [`ANY_PRODUCT`] disables the filter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub product: Option<String>,
    /// Requested variant, resolved against the catalog.
    #[cfg_attr(feature = "serde", serde(default))]
    pub variant: Option<Variant>,
    /// Urgency class.
    #[cfg_attr(feature = "serde", serde(default))]
    pub order_type: OrderType,
    /// Number of units ordered.
    #[cfg_attr(feature = "serde", serde(default = "default_quantity"))]
    pub quantity: NonZeroU32,
}

#[cfg(feature = "serde")]
const fn default_quantity() -> NonZeroU32 {
    NonZeroU32::MIN
}

impl SimulationRequest {
    /// Construct a request for a single unit of any product.
    #[must_use]
    pub const fn new(point: GeoPoint, order_type: OrderType) -> Self {
        Self {
            point,
            product: None,
            variant: None,
            order_type,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Restrict the request to a product.
    #[must_use]
    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    /// Restrict the request to a variant.
    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Set the ordered quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: NonZeroU32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Move the request to another destination.
    #[must_use]
    pub fn at(mut self, point: GeoPoint) -> Self {
        self.point = point;
        self
    }

    /// The product name to filter on, if any.
    ///
    /// Returns `None` when no product was given or when it equals
    /// [`ANY_PRODUCT`].
    #[must_use]
    pub fn product_filter(&self) -> Option<&str> {
        self.product
            .as_deref()
            .filter(|product| *product != ANY_PRODUCT)
    }
}
