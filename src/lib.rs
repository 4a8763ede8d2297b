//! Pricebreak
//!
//! Tiered quantity pricing and cart totals for a storefront selling physical
//! tools, digital downloads and training courses.
//!
//! Each [`LineItem`](items::LineItem) may carry quantity price breaks. The active
//! tier sets the unit price and an optional flat courier charge for the line;
//! [`aggregate_cart`](summary::aggregate_cart) sums the lines into the totals shown
//! at checkout, and [`next_tier_message`](upsell::next_tier_message) tells the
//! buyer how many more units reach the next price break.

pub mod cart;
pub mod config;
pub mod fixtures;
pub mod items;
pub mod money;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod summary;
pub mod tiers;
pub mod upsell;
