//! Cart Summary
//!
//! Aggregates line pricing across a cart into the totals shown by the cart drawer
//! and the checkout order summary. Courier charges are added on top of the items
//! subtotal; no taxes or other fees are applied here.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::Cart,
    items::LineItem,
    money::zero,
    pricing::{LinePricing, PricingError, price_line_item},
};

/// Errors that can occur while aggregating a cart.
#[derive(Debug, Error, PartialEq)]
pub enum SummaryError {
    /// A line item could not be priced (index, error).
    #[error("failed to price item {0}: {1}")]
    Pricing(usize, PricingError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Totals for a whole cart, with the per-line breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary<'a> {
    /// Sum of line final prices
    pub items_subtotal: Money<'a, Currency>,

    /// Sum of line courier charges
    pub courier_charges: Money<'a, Currency>,

    /// Sum of line savings versus list price
    pub total_savings: Money<'a, Currency>,

    /// `items_subtotal + courier_charges`
    pub total: Money<'a, Currency>,

    /// Per-line pricing, in cart order
    pub lines: SmallVec<[LinePricing<'a>; 8]>,
}

impl<'a> CartSummary<'a> {
    /// Prices every item and sums the results.
    ///
    /// # Errors
    ///
    /// - [`SummaryError::Pricing`]: a line item could not be priced.
    /// - [`SummaryError::Money`]: a line is in a different currency from `currency`.
    pub fn from_items(
        items: &[LineItem<'a>],
        currency: &'a Currency,
    ) -> Result<Self, SummaryError> {
        let mut summary = CartSummary {
            items_subtotal: zero(currency),
            courier_charges: zero(currency),
            total_savings: zero(currency),
            total: zero(currency),
            lines: SmallVec::with_capacity(items.len()),
        };

        for (idx, item) in items.iter().enumerate() {
            let line = price_line_item(item).map_err(|err| SummaryError::Pricing(idx, err))?;

            summary.items_subtotal = summary.items_subtotal.add(line.final_price)?;
            summary.courier_charges = summary.courier_charges.add(line.courier_charge)?;
            summary.total_savings = summary.total_savings.add(line.savings)?;
            summary.lines.push(line);
        }

        summary.total = summary.items_subtotal.add(summary.courier_charges)?;

        debug!(
            lines = summary.lines.len(),
            items_subtotal = %summary.items_subtotal,
            courier_charges = %summary.courier_charges,
            total = %summary.total,
            "cart aggregated"
        );

        Ok(summary)
    }

    /// Sum of list prices across all lines, before any tier pricing.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the lines are in different currencies.
    pub fn regular_subtotal(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.lines
            .iter()
            .try_fold(zero(self.total.currency()), |acc, line| {
                acc.add(line.regular_price)
            })
    }

    /// Savings as a fraction of the regular subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the lines are in different currencies.
    pub fn savings_percent(&self) -> Result<Percentage, MoneyError> {
        let regular = *self.regular_subtotal()?.amount();

        if regular.is_zero() {
            return Ok(Percentage::from(Decimal::ZERO));
        }

        Ok(Percentage::from(*self.total_savings.amount() / regular))
    }

    /// Number of priced lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the summary has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Prices every item in the cart and sums the results.
///
/// Deterministic and free of side effects, so it is safe to call after every
/// cart change.
///
/// # Errors
///
/// Returns a [`SummaryError`] if a line cannot be priced or summed.
pub fn aggregate_cart<'a>(cart: &Cart<'a>) -> Result<CartSummary<'a>, SummaryError> {
    CartSummary::from_items(cart.items(), cart.currency())
}
