//! Quantity Price Tiers
//!
//! A price tier maps an inclusive quantity range to a discounted per-unit price
//! and an optional flat courier surcharge. Tiers are kept in catalog order and are
//! not validated: when ranges overlap, the first tier in list order wins.

use rusty_money::{Money, iso::Currency};

/// A quantity price break.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceTier<'a> {
    min_qty: Option<u32>,
    max_qty: Option<u32>,
    price_per_item: Money<'a, Currency>,
    courier_charge: Option<Money<'a, Currency>>,
}

impl<'a> PriceTier<'a> {
    /// Create a new tier covering `min_qty..=max_qty`.
    ///
    /// A missing lower bound means 1, a missing upper bound means unbounded.
    pub fn new(
        min_qty: Option<u32>,
        max_qty: Option<u32>,
        price_per_item: Money<'a, Currency>,
    ) -> Self {
        Self {
            min_qty,
            max_qty,
            price_per_item,
            courier_charge: None,
        }
    }

    /// Set the flat courier charge applied while this tier is active.
    #[must_use]
    pub fn with_courier_charge(mut self, courier_charge: Money<'a, Currency>) -> Self {
        self.courier_charge = Some(courier_charge);
        self
    }

    /// Inclusive lower bound, defaulting to 1.
    pub fn min_qty(&self) -> u32 {
        self.min_qty.unwrap_or(1)
    }

    /// Inclusive upper bound, `None` when unbounded.
    pub fn max_qty(&self) -> Option<u32> {
        self.max_qty
    }

    /// Per-unit price while this tier is active.
    pub fn price_per_item(&self) -> &Money<'a, Currency> {
        &self.price_per_item
    }

    /// Flat courier charge, if the tier defines one.
    pub fn courier_charge(&self) -> Option<&Money<'a, Currency>> {
        self.courier_charge.as_ref()
    }

    /// Whether `quantity` falls inside this tier's range.
    pub fn contains(&self, quantity: u32) -> bool {
        quantity >= self.min_qty() && self.max_qty.is_none_or(|max| quantity <= max)
    }
}

/// Returns the first tier, in list order, whose range contains `quantity`.
pub fn resolve_tier<'t, 'a>(
    tiers: &'t [PriceTier<'a>],
    quantity: u32,
) -> Option<&'t PriceTier<'a>> {
    tiers.iter().find(|tier| tier.contains(quantity))
}

/// Returns the tier with the lowest lower bound strictly above `quantity`.
///
/// Ties on the lower bound go to the earliest tier in list order.
pub fn next_tier<'t, 'a>(
    tiers: &'t [PriceTier<'a>],
    quantity: u32,
) -> Option<&'t PriceTier<'a>> {
    tiers
        .iter()
        .filter(|tier| tier.min_qty() > quantity)
        .min_by_key(|tier| tier.min_qty())
}
