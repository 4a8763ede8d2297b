//! Money helpers

use rusty_money::{Money, iso::Currency};

use crate::pricing::PricingError;

/// Returns a zero amount in the given currency.
pub fn zero(currency: &Currency) -> Money<'_, Currency> {
    Money::from_minor(0, currency)
}

/// Multiplies a money amount by a quantity, in minor units.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product does not fit in `i64` minor units.
pub fn multiply<'a>(
    money: &Money<'a, Currency>,
    quantity: u32,
) -> Result<Money<'a, Currency>, PricingError> {
    let minor = money
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, money.currency()))
}

/// Formats an amount compactly with its currency symbol.
///
/// Whole amounts drop the fractional part (`₹420`), anything else keeps two
/// decimal places (`₹12.50`).
pub fn format_amount(money: &Money<'_, Currency>) -> String {
    let currency = money.currency();
    let amount = money.amount().round_dp(currency.exponent);
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let amount = amount.abs();

    if amount.fract().is_zero() {
        format!("{sign}{}{}", currency.symbol, amount.normalize())
    } else {
        format!("{sign}{}{amount:.2}", currency.symbol)
    }
}
