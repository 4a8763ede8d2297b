//! Products

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use slotmap::new_key_type;
use smallvec::SmallVec;

use crate::tiers::PriceTier;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Opaque product identifier, as issued by the product catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// What kind of product is being sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// A boxed product that is shipped by courier.
    Physical,

    /// A downloadable file.
    Digital,

    /// A training course enrollment.
    Course,
}

impl ProductKind {
    /// Whether the buyer may change the quantity of this kind of product.
    ///
    /// Digital products and courses are always bought once.
    pub const fn quantity_adjustable(self) -> bool {
        matches!(self, ProductKind::Physical)
    }

    /// Whether this kind of product is shipped, making courier charges meaningful.
    pub const fn ships(self) -> bool {
        matches!(self, ProductKind::Physical)
    }

    /// Lower-case label used in listings.
    pub const fn label(self) -> &'static str {
        match self {
            ProductKind::Physical => "physical",
            ProductKind::Digital => "digital",
            ProductKind::Course => "course",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Product
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Catalog identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product image path or URL
    pub image: Option<String>,

    /// Product kind
    pub kind: ProductKind,

    /// List price for a single unit
    pub price: Money<'a, Currency>,

    /// Quantity price breaks, in catalog order
    pub quantity_pricing: SmallVec<[PriceTier<'a>; 4]>,
}
