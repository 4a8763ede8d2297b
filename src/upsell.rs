//! Next-tier upsell hints

use std::fmt;

use rusty_money::{Money, iso::Currency};

use crate::{
    items::LineItem,
    money::format_amount,
    pricing::PricingError,
    tiers::{PriceTier, next_tier},
};

/// How many more units reach the next, cheaper price tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpsellHint<'a> {
    /// Units to add to reach the next tier
    pub items_needed: u32,

    /// Per-unit price in the next tier
    pub next_unit_price: Money<'a, Currency>,

    /// Current effective unit price minus the next tier's unit price
    pub savings_per_item: Money<'a, Currency>,

    /// The next tier
    pub tier: PriceTier<'a>,
}

impl fmt::Display for UpsellHint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} more to reach {}/item",
            self.items_needed,
            format_amount(&self.next_unit_price)
        )?;

        if self.savings_per_item.is_positive() {
            write!(f, ", save {}/item", format_amount(&self.savings_per_item))?;
        }

        Ok(())
    }
}

/// Computes the upsell hint for the next price tier above the item's quantity.
///
/// Returns `None` when there is no higher tier, or when the item's quantity is
/// fixed and can never reach one.
///
/// # Errors
///
/// Returns [`PricingError::Money`] if the next tier is priced in a different currency.
pub fn next_tier_message<'a>(
    item: &LineItem<'a>,
) -> Result<Option<UpsellHint<'a>>, PricingError> {
    if !item.kind().quantity_adjustable() {
        return Ok(None);
    }

    let quantity = item.quantity();

    let Some(tier) = next_tier(item.quantity_pricing(), quantity).copied() else {
        return Ok(None);
    };

    let savings_per_item = item.effective_unit_price().sub(*tier.price_per_item())?;

    Ok(Some(UpsellHint {
        items_needed: tier.min_qty() - quantity,
        next_unit_price: *tier.price_per_item(),
        savings_per_item,
        tier,
    }))
}
