//! Line Items

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::{
    products::{Product, ProductId, ProductKind},
    tiers::{PriceTier, resolve_tier},
};

/// One product entry in a cart, with a quantity.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem<'a> {
    id: ProductId,
    name: String,
    image: Option<String>,
    kind: ProductKind,
    unit_price: Money<'a, Currency>,
    quantity: u32,
    quantity_pricing: SmallVec<[PriceTier<'a>; 4]>,
}

impl<'a> LineItem<'a> {
    /// Creates a new line item with quantity 1 and no price tiers.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        kind: ProductKind,
        unit_price: Money<'a, Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: None,
            kind,
            unit_price,
            quantity: 1,
            quantity_pricing: SmallVec::new(),
        }
    }

    /// Creates a line item for a catalog product.
    pub fn from_product(product: &Product<'a>, quantity: u32) -> Self {
        let mut item = Self::new(
            product.id.clone(),
            product.name.clone(),
            product.kind,
            product.price,
        )
        .with_tiers(product.quantity_pricing.iter().copied())
        .with_quantity(quantity);

        item.image.clone_from(&product.image);

        item
    }

    /// Sets the quantity, see [`LineItem::set_quantity`].
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.set_quantity(quantity);
        self
    }

    /// Sets the quantity price tiers, in the order they should be matched.
    #[must_use]
    pub fn with_tiers(mut self, tiers: impl IntoIterator<Item = PriceTier<'a>>) -> Self {
        self.quantity_pricing = tiers.into_iter().collect();
        self
    }

    /// Sets the display image.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Product identifier
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display image
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Product kind
    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    /// List price for a single unit
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Current quantity, always at least 1
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Quantity price tiers
    pub fn quantity_pricing(&self) -> &[PriceTier<'a>] {
        &self.quantity_pricing
    }

    /// Currency of the list price.
    pub fn currency(&self) -> &'a Currency {
        self.unit_price.currency()
    }

    /// Updates the quantity and returns the value actually stored.
    ///
    /// Quantities floor at 1. Products whose quantity is not adjustable stay at 1.
    pub fn set_quantity(&mut self, quantity: u32) -> u32 {
        self.quantity = if self.kind.quantity_adjustable() {
            quantity.max(1)
        } else {
            1
        };

        self.quantity
    }

    /// The tier active at the current quantity, if any.
    pub fn resolve_tier(&self) -> Option<&PriceTier<'a>> {
        resolve_tier(&self.quantity_pricing, self.quantity)
    }

    /// Unit price actually charged at the current quantity.
    pub fn effective_unit_price(&self) -> &Money<'a, Currency> {
        self.resolve_tier()
            .map_or(&self.unit_price, PriceTier::price_per_item)
    }
}
