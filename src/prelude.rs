//! Pricebreak prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    fixtures::{Fixture, FixtureError},
    items::LineItem,
    money::format_amount,
    pricing::{LinePricing, PricingError, price_line_item},
    products::{Product, ProductId, ProductKey, ProductKind},
    receipt::{Receipt, ReceiptError},
    summary::{CartSummary, SummaryError, aggregate_cart},
    tiers::{PriceTier, next_tier, resolve_tier},
    upsell::{UpsellHint, next_tier_message},
};
