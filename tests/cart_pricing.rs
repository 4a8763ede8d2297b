//! Integration tests for tiered line pricing and cart aggregation.
//!
//! The scanner used throughout lists at ₹500 with two price breaks:
//!
//! - 1 to 9 units at ₹500 each
//! - 10 to 49 units at ₹420 each, plus a flat ₹50 courier charge

use rusty_money::{
    Money,
    iso::{Currency, INR},
};
use testresult::TestResult;

use pricebreak::prelude::*;

fn inr(major: i64) -> Money<'static, Currency> {
    Money::from_minor(major * 100, INR)
}

fn scanner(quantity: u32) -> LineItem<'static> {
    LineItem::new("obd-scanner", "OBD-II Scanner", ProductKind::Physical, inr(500))
        .with_tiers([
            PriceTier::new(Some(1), Some(9), inr(500)),
            PriceTier::new(Some(10), Some(49), inr(420)).with_courier_charge(inr(50)),
        ])
        .with_quantity(quantity)
}

#[test]
fn untiered_item_pays_list_price() -> TestResult {
    let item = LineItem::new("cable", "Diagnostic Cable", ProductKind::Physical, inr(500))
        .with_quantity(3);

    let pricing = price_line_item(&item)?;

    assert_eq!(pricing.final_price, inr(1_500));
    assert_eq!(pricing.savings, inr(0));

    Ok(())
}

#[test]
fn bulk_quantity_resolves_second_tier() -> TestResult {
    let item = scanner(10);

    let tier = item.resolve_tier().ok_or("expected a tier")?;
    assert_eq!(tier.min_qty(), 10);

    let pricing = price_line_item(&item)?;

    assert_eq!(pricing.final_price, inr(4_200));
    assert_eq!(pricing.courier_charge, inr(50));
    assert_eq!(pricing.savings, inr(800));

    Ok(())
}

#[test]
fn just_below_bulk_tier_gets_upsell_hint() -> TestResult {
    let item = scanner(9);

    let pricing = price_line_item(&item)?;
    assert_eq!(pricing.final_price, inr(4_500));

    let hint = next_tier_message(&item)?.ok_or("expected an upsell hint")?;
    assert_eq!(hint.to_string(), "1 more to reach ₹420/item, save ₹80/item");

    Ok(())
}

#[test]
fn digital_items_add_no_courier_charge() -> TestResult {
    let manual = LineItem::new("manual", "Service Manual", ProductKind::Digital, inr(300))
        .with_tiers([PriceTier::new(None, None, inr(300)).with_courier_charge(inr(40))]);

    let cart = Cart::with_items([scanner(10), manual], INR)?;
    let summary = aggregate_cart(&cart)?;

    assert_eq!(summary.courier_charges, inr(50));

    Ok(())
}

#[test]
fn every_quantity_uses_the_first_containing_tier() -> TestResult {
    let tiers = [
        PriceTier::new(Some(1), Some(20), inr(480)),
        PriceTier::new(Some(10), Some(30), inr(430)),
        PriceTier::new(Some(40), None, inr(400)),
    ];

    for quantity in 1..=60 {
        let item = LineItem::new("test-lead", "Test Lead", ProductKind::Physical, inr(500))
            .with_tiers(tiers)
            .with_quantity(quantity);

        let expected = tiers
            .iter()
            .find(|tier| tier.contains(quantity))
            .map_or(inr(500), |tier| *tier.price_per_item());

        let pricing = price_line_item(&item)?;

        assert_eq!(
            pricing.final_price.to_minor_units(),
            expected.to_minor_units() * i64::from(quantity),
            "wrong price at quantity {quantity}"
        );
    }

    Ok(())
}

#[test]
fn total_is_items_plus_courier_and_aggregation_is_idempotent() -> TestResult {
    let mut cart = Cart::new(INR);

    cart.add_item(scanner(12))?;
    cart.add_item(LineItem::new(
        "ecu-course",
        "ECU Remapping Course",
        ProductKind::Course,
        inr(12_000),
    ))?;

    let first = aggregate_cart(&cart)?;
    let second = aggregate_cart(&cart)?;

    assert_eq!(first, second);
    assert_eq!(first.total, first.items_subtotal.add(first.courier_charges)?);
    assert_eq!(first.total, inr(12 * 420 + 12_000 + 50));

    Ok(())
}

#[test]
fn quantity_changes_move_between_tiers() -> TestResult {
    let mut cart = Cart::with_items([scanner(9)], INR)?;
    let id = ProductId::from("obd-scanner");

    assert_eq!(aggregate_cart(&cart)?.total, inr(4_500));

    cart.increment(&id)?;
    assert_eq!(aggregate_cart(&cart)?.total, inr(4_250));

    cart.update_quantity(&id, 0)?;
    assert_eq!(aggregate_cart(&cart)?.total, inr(500));

    cart.remove_item(&id)?;
    assert_eq!(aggregate_cart(&cart)?.total, inr(0));

    Ok(())
}
