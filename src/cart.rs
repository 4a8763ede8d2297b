//! Cart
//!
//! The cart is an owned value with a single writer. Every change goes through one
//! of the methods below, and totals are always recomputed from the items with
//! [`aggregate_cart`](crate::summary::aggregate_cart).

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    items::LineItem,
    products::ProductId,
    summary::{CartSummary, SummaryError, aggregate_cart},
};

/// Errors related to cart construction or updates.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// An item's currency differs from the cart currency (index, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// An item was not found in the cart.
    #[error("Item {0} not found")]
    ItemNotFound(ProductId),
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    items: Vec<LineItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new, empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a new cart with the given items.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if there was a currency mismatch error.
    pub fn with_items(
        items: impl IntoIterator<Item = LineItem<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let mut cart = Cart::new(currency);

        for item in items {
            cart.add_item(item)?;
        }

        Ok(cart)
    }

    /// Add an item to the cart.
    ///
    /// A product already in the cart has its quantity increased instead, unless its
    /// quantity is fixed, in which case the cart is left unchanged. Returns whether
    /// the cart changed.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CurrencyMismatch` if the item is priced in another currency.
    pub fn add_item(&mut self, item: LineItem<'a>) -> Result<bool, CartError> {
        let item_currency = item.currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                self.items.len(),
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(existing) = self.items.iter_mut().find(|line| line.id() == item.id()) {
            if !existing.kind().quantity_adjustable() {
                debug!(item = %item.id(), "fixed quantity item already in cart");

                return Ok(false);
            }

            let quantity = existing.quantity().saturating_add(item.quantity());
            let stored = existing.set_quantity(quantity);

            debug!(item = %item.id(), quantity = stored, "merged item into cart");

            return Ok(true);
        }

        debug!(item = %item.id(), quantity = item.quantity(), "added item to cart");

        self.items.push(item);

        Ok(true)
    }

    /// Set the quantity of an item, returning the quantity actually stored.
    ///
    /// Quantities floor at 1; fixed quantity items stay at 1.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if the item is not in the cart.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) -> Result<u32, CartError> {
        let item = self.get_item_mut(id)?;
        let stored = item.set_quantity(quantity);

        debug!(item = %id, requested = quantity, quantity = stored, "updated item quantity");

        Ok(stored)
    }

    /// Increase an item's quantity by one.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if the item is not in the cart.
    pub fn increment(&mut self, id: &ProductId) -> Result<u32, CartError> {
        let quantity = self.get_item(id)?.quantity().saturating_add(1);

        self.update_quantity(id, quantity)
    }

    /// Decrease an item's quantity by one, never going below 1.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if the item is not in the cart.
    pub fn decrement(&mut self, id: &ProductId) -> Result<u32, CartError> {
        let quantity = self.get_item(id)?.quantity().saturating_sub(1);

        self.update_quantity(id, quantity)
    }

    /// Remove an item from the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if the item is not in the cart.
    pub fn remove_item(&mut self, id: &ProductId) -> Result<LineItem<'a>, CartError> {
        let idx = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| CartError::ItemNotFound(id.clone()))?;

        debug!(item = %id, "removed item from cart");

        Ok(self.items.remove(idx))
    }

    /// Remove every item from the cart.
    pub fn clear(&mut self) {
        debug!(items = self.items.len(), "cleared cart");

        self.items.clear();
    }

    /// Get an item from the cart.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::ItemNotFound` if the item is not found.
    pub fn get_item(&self, id: &ProductId) -> Result<&LineItem<'a>, CartError> {
        self.items
            .iter()
            .find(|item| item.id() == id)
            .ok_or_else(|| CartError::ItemNotFound(id.clone()))
    }

    fn get_item_mut(&mut self, id: &ProductId) -> Result<&mut LineItem<'a>, CartError> {
        self.items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| CartError::ItemNotFound(id.clone()))
    }

    /// Calculate the cart totals.
    ///
    /// # Errors
    ///
    /// Returns a `SummaryError` if a line cannot be priced.
    pub fn summary(&self) -> Result<CartSummary<'a>, SummaryError> {
        aggregate_cart(self)
    }

    /// Iterate over the items in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.items.iter()
    }

    /// The items in the cart, in the order they were added.
    pub fn items(&self) -> &[LineItem<'a>] {
        &self.items
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
