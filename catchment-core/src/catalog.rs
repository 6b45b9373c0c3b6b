//! Read-only catalog snapshot supplied by the host application.
//!
//! The engine never fetches or caches catalog data itself. Hosts build a
//! [`Catalog`] from whatever source they own and hand it to a
//! [`Simulator`](crate::Simulator) or pass its facilities straight to the
//! [`SimulationEngine`](crate::SimulationEngine).

use std::collections::BTreeSet;

use crate::{Facility, FacilityError};

/// A product variant and the name of the product it belongs to.
///
/// Facility stock is tracked per product name only, so a variant counts as
/// available wherever its parent product is stocked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variant {
    /// Unique variant identifier.
    pub id: String,
    /// Display name, e.g. `"Red / Large"`.
    pub name: String,
    /// Name of the parent product.
    pub product: String,
}

impl Variant {
    /// Construct a variant.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            product: product.into(),
        }
    }
}

/// Facilities, product names and variants known at simulation time.
///
/// # Examples
/// ```
/// use catchment_core::{Catalog, Variant};
///
/// let catalog = Catalog::new(Vec::new())
///     .with_products(["T-Shirt"])
///     .with_variants([Variant::new("v-1", "Red / L", "T-Shirt")]);
/// assert_eq!(catalog.variant("v-1").map(|v| v.product.as_str()), Some("T-Shirt"));
/// assert!(catalog.variant("v-2").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    /// Facilities in the order the host supplied them.
    pub facilities: Vec<Facility>,
    /// Known product names.
    #[cfg_attr(feature = "serde", serde(default))]
    pub products: BTreeSet<String>,
    /// Known variants.
    #[cfg_attr(feature = "serde", serde(default))]
    pub variants: Vec<Variant>,
}

impl Catalog {
    /// Construct a catalog holding only facilities.
    #[must_use]
    pub fn new(facilities: Vec<Facility>) -> Self {
        Self {
            facilities,
            ..Self::default()
        }
    }

    /// Add known product names.
    #[must_use]
    pub fn with_products<I, S>(mut self, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.products.extend(products.into_iter().map(Into::into));
        self
    }

    /// Add known variants.
    #[must_use]
    pub fn with_variants<I>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = Variant>,
    {
        self.variants.extend(variants);
        self
    }

    /// Look up a variant by identifier.
    #[must_use]
    pub fn variant(&self, id: &str) -> Option<&Variant> {
        self.variants.iter().find(|variant| variant.id == id)
    }

    /// Variants belonging to `product`, in catalog order.
    pub fn variants_of<'a>(&'a self, product: &'a str) -> impl Iterator<Item = &'a Variant> + 'a {
        self.variants
            .iter()
            .filter(move |variant| variant.product == product)
    }

    /// Validate every facility in the snapshot.
    ///
    /// # Errors
    /// Returns the first [`FacilityError`] encountered.
    pub fn validate(&self) -> Result<(), FacilityError> {
        self.facilities.iter().try_for_each(Facility::validate)
    }
}
