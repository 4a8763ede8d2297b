//! Receipt
//!
//! Renders a cart and its summary as a terminal table, showing the same figures
//! as the cart drawer and the checkout order summary.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    items::LineItem,
    pricing::{LinePricing, PricingError},
    summary::CartSummary,
    upsell::{UpsellHint, next_tier_message},
};

/// Errors that can occur when rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Error computing an upsell hint.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The summary does not have one line per cart item.
    #[error("summary has {summary} lines but cart has {cart} items")]
    LineCountMismatch {
        /// Lines in the summary
        summary: usize,
        /// Items in the cart
        cart: usize,
    },

    /// IO error
    #[error("IO error")]
    Io,
}

/// A priced cart, ready to be displayed.
#[derive(Debug, Clone)]
pub struct Receipt<'c, 'a> {
    cart: &'c Cart<'a>,
    summary: CartSummary<'a>,
}

impl<'c, 'a> Receipt<'c, 'a> {
    /// Pair a cart with its summary.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::LineCountMismatch`] if the summary was not built from this cart.
    pub fn new(cart: &'c Cart<'a>, summary: CartSummary<'a>) -> Result<Self, ReceiptError> {
        if cart.len() != summary.len() {
            return Err(ReceiptError::LineCountMismatch {
                summary: summary.len(),
                cart: cart.len(),
            });
        }

        Ok(Self { cart, summary })
    }

    /// The summary being displayed.
    pub fn summary(&self) -> &CartSummary<'a> {
        &self.summary
    }

    /// Upsell hints for every line that has one, keyed by line index.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a hint cannot be computed.
    pub fn upsell_hints(&self) -> Result<SmallVec<[(usize, UpsellHint<'a>); 4]>, PricingError> {
        let mut hints = SmallVec::new();

        for (idx, item) in self.cart.iter().enumerate() {
            if let Some(hint) = next_tier_message(item)? {
                hints.push((idx, hint));
            }
        }

        Ok(hints)
    }

    /// Writes the receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        push_receipt_header(&mut builder);

        let mut color_ops: SmallVec<[(usize, usize, Color); 32]> = SmallVec::new();

        for (idx, (item, line)) in self.cart.iter().zip(&self.summary.lines).enumerate() {
            append_item_row(&mut builder, &mut color_ops, idx, item, line);
        }

        write_receipt_table(&mut out, builder, color_ops)?;

        self.write_upsell_hints(&mut out)?;

        write_receipt_summary(&mut out, &self.summary)
    }

    fn write_upsell_hints(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        for (idx, hint) in self.upsell_hints()? {
            let name = self.cart.items().get(idx).map_or("", LineItem::name);

            writeln!(out, " \x1b[33m#{:<3}\x1b[0m {name}: {hint}", idx + 1)
                .map_err(|_err| ReceiptError::Io)?;
        }

        Ok(())
    }
}

fn push_receipt_header(builder: &mut Builder) {
    builder.push_record([
        "",
        "Item",
        "Type",
        "Qty",
        "List Price",
        "Your Price",
        "Line Total",
        "Savings",
        "Courier",
    ]);
}

fn append_item_row(
    builder: &mut Builder,
    color_ops: &mut SmallVec<[(usize, usize, Color); 32]>,
    idx: usize,
    item: &LineItem<'_>,
    line: &LinePricing<'_>,
) {
    // header is row 0
    let row = idx + 1;
    let discounted = !line.savings.is_zero();

    let unit_price = line
        .applied_tier
        .map_or(*item.unit_price(), |tier| *tier.price_per_item());

    builder.push_record([
        format!("#{:<3}", idx + 1),
        item.name().to_string(),
        item.kind().to_string(),
        item.quantity().to_string(),
        format!("{}", item.unit_price()),
        if discounted {
            format!("{unit_price}")
        } else {
            String::new()
        },
        format!("{}", line.final_price),
        savings_cell(&line.savings),
        if line.courier_charge.is_zero() {
            String::new()
        } else {
            format!("{}", line.courier_charge)
        },
    ]);

    color_ops.push((row, 2, color_dark_grey()));

    if discounted {
        color_ops.push((row, 4, color_dark_grey()));
        color_ops.push((row, 5, Color::FG_GREEN));
    }
}

/// Savings are shown as a deduction; a tier priced above list shows as a surcharge.
fn savings_cell(savings: &Money<'_, Currency>) -> String {
    if savings.is_zero() {
        String::new()
    } else if savings.is_positive() {
        format!("-{savings}")
    } else {
        format!("+{}", Money::from_decimal(-*savings.amount(), savings.currency()))
    }
}

fn write_receipt_table(
    out: &mut impl io::Write,
    builder: Builder,
    color_ops: SmallVec<[(usize, usize, Color); 32]>,
) -> Result<(), ReceiptError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..9), Alignment::right());

    for (row, col, color) in color_ops {
        table.modify((row, col), color);
    }

    let table_str = shade_box_drawing(&table.to_string());

    writeln!(out, "\n{table_str}").map_err(|_err| ReceiptError::Io)
}

fn write_receipt_summary(
    out: &mut impl io::Write,
    summary: &CartSummary<'_>,
) -> Result<(), ReceiptError> {
    let savings_percent_points = savings_points(summary.savings_percent()?);

    let rows = [
        (" Items:", format_money(&summary.items_subtotal)),
        (" Courier:", format_money(&summary.courier_charges)),
        (
            " Savings:",
            format!(
                "({savings_percent_points:.2}%) {}  ",
                summary.total_savings
            ),
        ),
        (
            " \x1b[1mTotal:\x1b[0m",
            format!("\x1b[1m{}\x1b[0m  ", summary.total),
        ),
    ];

    let label_width = rows
        .iter()
        .map(|(label, _)| visible_width(label))
        .max()
        .unwrap_or_default();

    let value_width = rows
        .iter()
        .map(|(_, value)| visible_width(value))
        .max()
        .unwrap_or_default();

    for (label, value) in &rows {
        writeln!(
            out,
            "{}  {}",
            pad_start(label, label_width),
            pad_start(value, value_width)
        )
        .map_err(|_err| ReceiptError::Io)?;
    }

    writeln!(out).map_err(|_err| ReceiptError::Io)
}

fn format_money(money: &Money<'_, Currency>) -> String {
    format!("{money}  ")
}

const DARK_GREY: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

/// Savings fraction as percent points, to two places.
fn savings_points(percentage: Percentage) -> Decimal {
    (percentage * Decimal::ONE_HUNDRED).round_dp(2)
}

fn is_box_drawing(ch: char) -> bool {
    ('\u{2500}'..='\u{257F}').contains(&ch)
}

/// Shades each run of box-drawing characters dark grey.
fn shade_box_drawing(table: &str) -> String {
    let mut shaded = String::with_capacity(table.len() + 256);
    let mut rest = table;

    while let Some(start) = rest.find(is_box_drawing) {
        let (plain, tail) = rest.split_at(start);
        let run_len = tail
            .find(|ch: char| !is_box_drawing(ch))
            .unwrap_or(tail.len());
        let (run, after) = tail.split_at(run_len);

        shaded.push_str(plain);
        shaded.push_str(DARK_GREY);
        shaded.push_str(run);
        shaded.push_str(RESET);

        rest = after;
    }

    shaded.push_str(rest);
    shaded
}

/// Terminal width of `s`, skipping ANSI escape sequences.
fn visible_width(s: &str) -> usize {
    let mut chunks = s.split('\x1b');
    let leading = chunks.next().map_or(0, |text| text.chars().count());

    // each later chunk opens with an escape body ending at its first letter
    leading
        + chunks
            .map(|chunk| {
                chunk
                    .split_once(|ch: char| ch.is_ascii_alphabetic())
                    .map_or(0, |(_, text)| text.chars().count())
            })
            .sum::<usize>()
}

/// Left-pads `s` with spaces to `width` visible columns.
fn pad_start(s: &str, width: usize) -> String {
    format!("{}{s}", " ".repeat(width.saturating_sub(visible_width(s))))
}

fn color_dark_grey() -> Color {
    Color::new(DARK_GREY, RESET)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::INR;
    use testresult::TestResult;

    use crate::{products::ProductKind, summary::aggregate_cart, tiers::PriceTier};

    use super::*;

    fn inr(major: i64) -> Money<'static, Currency> {
        Money::from_minor(major * 100, INR)
    }

    fn test_cart() -> Result<Cart<'static>, crate::cart::CartError> {
        Cart::with_items(
            [
                LineItem::new("obd-scanner", "OBD-II Scanner", ProductKind::Physical, inr(500))
                    .with_tiers([
                        PriceTier::new(Some(1), Some(9), inr(500)),
                        PriceTier::new(Some(10), Some(49), inr(420))
                            .with_courier_charge(inr(50)),
                    ])
                    .with_quantity(9),
                LineItem::new("ecu-course", "ECU Remapping Course", ProductKind::Course, inr(12_000)),
            ],
            INR,
        )
    }

    #[test]
    fn write_to_lists_items_and_totals() -> TestResult {
        let cart = test_cart()?;
        let receipt = Receipt::new(&cart, aggregate_cart(&cart)?)?;

        let mut out = Vec::new();
        receipt.write_to(&mut out)?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("OBD-II Scanner"), "missing item name: {text}");
        assert!(text.contains("ECU Remapping Course"), "missing item name: {text}");
        assert!(text.contains("Total:"), "missing total line: {text}");
        assert!(
            text.contains("1 more to reach ₹420/item, save ₹80/item"),
            "missing upsell hint: {text}"
        );

        Ok(())
    }

    #[test]
    fn upsell_hints_are_keyed_by_line() -> TestResult {
        let cart = test_cart()?;
        let receipt = Receipt::new(&cart, aggregate_cart(&cart)?)?;

        let hints = receipt.upsell_hints()?;

        assert_eq!(hints.len(), 1);
        assert_eq!(hints.first().map(|(idx, _)| *idx), Some(0));

        Ok(())
    }

    #[test]
    fn mismatched_summary_is_rejected() -> TestResult {
        let cart = test_cart()?;
        let empty = Cart::new(INR);

        let result = Receipt::new(&cart, aggregate_cart(&empty)?);

        assert!(matches!(
            result,
            Err(ReceiptError::LineCountMismatch { summary: 0, cart: 2 })
        ));

        Ok(())
    }

    #[test]
    fn visible_width_ignores_ansi_sequences() {
        assert_eq!(visible_width("\x1b[1mTotal:\x1b[0m"), 6);
    }

    #[test]
    fn visible_width_counts_text_between_sequences() {
        assert_eq!(visible_width("ab\x1b[33m#1\x1b[0m c"), 6);
        assert_eq!(visible_width("₹420"), 4);
    }

    #[test]
    fn shade_box_drawing_wraps_each_run() {
        assert_eq!(shade_box_drawing("a──b"), "a\x1b[90m──\x1b[0mb");
        assert_eq!(
            shade_box_drawing("╭─x─╮"),
            "\x1b[90m╭─\x1b[0mx\x1b[90m─╮\x1b[0m"
        );
        assert_eq!(shade_box_drawing("plain"), "plain");
    }

    #[test]
    fn pad_start_aligns_on_visible_width() {
        assert_eq!(pad_start("\x1b[1mTotal:\x1b[0m", 8), "  \x1b[1mTotal:\x1b[0m");
        assert_eq!(pad_start("too wide", 3), "too wide");
    }

    #[test]
    fn savings_points_scale_fraction() {
        let points = savings_points(Percentage::from(Decimal::new(125, 3)));

        assert_eq!(points, Decimal::new(1250, 2));
    }

    #[test]
    fn savings_cell_signs_deductions_and_surcharges() {
        assert_eq!(savings_cell(&inr(80)), "-₹80.00");
        assert_eq!(savings_cell(&inr(-100)), "+₹100.00");
        assert_eq!(savings_cell(&inr(0)), "");
    }

    #[test]
    fn dearer_tier_renders_as_surcharge() -> TestResult {
        let cart = Cart::with_items(
            [LineItem::new("jack", "Trolley Jack", ProductKind::Physical, inr(100))
                .with_tiers([PriceTier::new(Some(5), None, inr(120))])
                .with_quantity(5)],
            INR,
        )?;
        let receipt = Receipt::new(&cart, aggregate_cart(&cart)?)?;

        let mut out = Vec::new();
        receipt.write_to(&mut out)?;

        let text = String::from_utf8(out)?;

        assert!(!text.contains("--"), "doubled sign in savings: {text}");
        assert!(text.contains("+₹100.00"), "missing surcharge cell: {text}");

        Ok(())
    }
}
