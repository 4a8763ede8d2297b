//! Product Fixtures
//!
//! Field names follow the backend product API (`price`, `quantity_pricing[].min_qty`,
//! `max_qty`, `price_per_item`, `courier_charge`).

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    products::{Product, ProductId, ProductKind},
    tiers::PriceTier,
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Declared catalog currency (e.g., "INR"); every price must use it
    #[serde(default)]
    pub currency: Option<String>,

    /// Map of product key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Product kind
    pub kind: ProductKind,

    /// Product image
    #[serde(default)]
    pub image: Option<String>,

    /// Product price (e.g., "500 INR")
    pub price: String,

    /// Quantity price breaks, in match order
    #[serde(default)]
    pub quantity_pricing: Vec<PriceTierFixture>,
}

/// Price Tier Fixture
#[derive(Debug, Deserialize)]
pub struct PriceTierFixture {
    /// Inclusive lower bound
    #[serde(default)]
    pub min_qty: Option<u32>,

    /// Inclusive upper bound
    #[serde(default)]
    pub max_qty: Option<u32>,

    /// Per-unit price (e.g., "420 INR")
    pub price_per_item: String,

    /// Flat courier charge (e.g., "50 INR")
    #[serde(default)]
    pub courier_charge: Option<String>,
}

impl ProductFixture {
    /// Convert to a catalog product with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if a price cannot be parsed or a tier is priced in a
    /// different currency from the product.
    pub fn try_into_product(self, id: &str) -> Result<Product<'static>, FixtureError> {
        let price = parse_money(&self.price)?;
        let currency = price.currency();

        let quantity_pricing = self
            .quantity_pricing
            .into_iter()
            .map(|tier| tier.try_into_tier(currency))
            .collect::<Result<_, _>>()?;

        Ok(Product {
            id: ProductId::new(id),
            name: self.name,
            image: self.image,
            kind: self.kind,
            price,
            quantity_pricing,
        })
    }
}

impl PriceTierFixture {
    fn try_into_tier(self, currency: &'static Currency) -> Result<PriceTier<'static>, FixtureError> {
        let price_per_item = parse_money_in(&self.price_per_item, currency)?;
        let tier = PriceTier::new(self.min_qty, self.max_qty, price_per_item);

        match self.courier_charge.as_deref() {
            Some(charge) => Ok(tier.with_courier_charge(parse_money_in(charge, currency)?)),
            None => Ok(tier),
        }
    }
}

fn parse_money(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let (minor_units, currency) = parse_price(s)?;

    Ok(Money::from_minor(minor_units, currency))
}

fn parse_money_in(
    s: &str,
    expected: &'static Currency,
) -> Result<Money<'static, Currency>, FixtureError> {
    let money = parse_money(s)?;

    if money.currency() != expected {
        return Err(FixtureError::CurrencyMismatch(
            expected.iso_alpha_code.to_string(),
            money.currency().iso_alpha_code.to_string(),
        ));
    }

    Ok(money)
}

/// Parse price string (e.g., "420 INR") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not a known ISO currency.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = iso::find(currency_code)
        .ok_or_else(|| FixtureError::UnknownCurrency((*currency_code).to_string()))?;

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = 10_i64
        .checked_pow(currency.exponent)
        .and_then(|scale| amount.checked_mul(Decimal::from(scale)))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}
