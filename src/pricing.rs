//! Line Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;
use tracing::trace;

use crate::{
    items::LineItem,
    money::{multiply, zero},
    tiers::PriceTier,
};

/// Errors that can occur while pricing a line item.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A minor-unit multiplication overflowed.
    #[error("price calculation overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// The priced breakdown of a single line item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePricing<'a> {
    /// Amount charged for the line, excluding courier charges
    pub final_price: Money<'a, Currency>,

    /// List price times quantity
    pub regular_price: Money<'a, Currency>,

    /// `regular_price - final_price`; negative if a tier is dearer than list price
    pub savings: Money<'a, Currency>,

    /// Flat courier charge for the line
    pub courier_charge: Money<'a, Currency>,

    /// The tier that set the price, if any
    pub applied_tier: Option<PriceTier<'a>>,
}

/// Prices a single line item at its current quantity.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the line total does not fit in minor units.
/// - [`PricingError::Money`]: a tier is priced in a different currency from the list price.
pub fn price_line_item<'a>(item: &LineItem<'a>) -> Result<LinePricing<'a>, PricingError> {
    let quantity = item.quantity();
    let regular_price = multiply(item.unit_price(), quantity)?;

    let Some(tier) = item.resolve_tier().copied() else {
        trace!(item = %item.id(), quantity, "no tier applies, using list price");

        return Ok(LinePricing {
            final_price: regular_price,
            regular_price,
            savings: zero(item.currency()),
            courier_charge: zero(item.currency()),
            applied_tier: None,
        });
    };

    let final_price = multiply(tier.price_per_item(), quantity)?;
    let savings = regular_price.sub(final_price)?;

    let courier_charge = match tier.courier_charge() {
        Some(charge) if item.kind().ships() => *charge,
        _ => zero(item.currency()),
    };

    trace!(
        item = %item.id(),
        quantity,
        min_qty = tier.min_qty(),
        final_price = %final_price,
        "tier applied"
    );

    Ok(LinePricing {
        final_price,
        regular_price,
        savings,
        courier_charge,
        applied_tier: Some(tier),
    })
}
