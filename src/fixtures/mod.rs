//! Fixtures
//!
//! Loads a product catalog and a cart from YAML files laid out as
//! `<base>/products/<set>.yml` and `<base>/carts/<set>.yml`.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::{self, Currency};
use slotmap::SlotMap;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{Cart, CartError},
    fixtures::{carts::CartFixture, products::ProductsFixture},
    items::LineItem,
    products::{Product, ProductKey},
};

pub mod carts;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// No cart lines loaded
    #[error("No cart items loaded")]
    NoItems,

    /// Cart creation error
    #[error("Failed to create cart: {0}")]
    Cart(#[from] CartError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog products with generated keys
    product_meta: SlotMap<ProductKey, Product<'a>>,

    /// String key -> `SlotMap` key mappings for lookups
    product_keys: FxHashMap<String, ProductKey>,

    /// Pre-built cart lines
    items: Vec<LineItem<'a>>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Fixture<'static> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            product_meta: SlotMap::with_key(),
            product_keys: FxHashMap::default(),
            items: Vec::new(),
            currency: None,
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        if let Some(code) = fixture.currency.as_deref() {
            let declared =
                iso::find(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))?;

            self.expect_currency(declared)?;
        }

        for (key, product_fixture) in fixture.products {
            let product = product_fixture.try_into_product(&key)?;

            self.expect_currency(product.price.currency())?;

            let product_key = self.product_meta.insert(product);

            self.product_keys.insert(key, product_key);
        }

        debug!(
            path = %file_path.display(),
            products = self.product_keys.len(),
            "loaded product fixtures"
        );

        Ok(self)
    }

    /// Load cart lines from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if referenced products don't exist.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;

        for line in fixture.items {
            let product = self.product(&line.product)?;
            let item = LineItem::from_product(product, line.quantity);

            self.items.push(item);
        }

        debug!(
            path = %file_path.display(),
            items = self.items.len(),
            "loaded cart fixtures"
        );

        Ok(self)
    }

    /// Load a complete fixture set (products and cart with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture.load_products(name)?.load_cart(name)?;

        Ok(fixture)
    }

    /// Pin the fixture currency on first use, then reject any other.
    fn expect_currency(&mut self, currency: &'static Currency) -> Result<(), FixtureError> {
        match self.currency {
            Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            Some(_) => Ok(()),
            None => {
                self.currency = Some(currency);

                Ok(())
            }
        }
    }
}

impl<'a> Fixture<'a> {
    /// Get a product by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product<'a>, FixtureError> {
        let product_key = self.product_key(key)?;

        self.product_meta
            .get(product_key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get a product key by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product_key(&self, key: &str) -> Result<ProductKey, FixtureError> {
        self.product_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get all cart lines
    pub fn items(&self) -> &[LineItem<'a>] {
        &self.items
    }

    /// Create a cart from the loaded lines
    ///
    /// # Errors
    ///
    /// Returns an error if no products or no lines are loaded, or if cart creation fails.
    pub fn cart(&self) -> Result<Cart<'a>, FixtureError> {
        let currency = self.currency()?;

        if self.items.is_empty() {
            return Err(FixtureError::NoItems);
        }

        Ok(Cart::with_items(self.items.iter().cloned(), currency)?)
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    /// Get the product catalog `SlotMap`
    pub fn product_meta_map(&self) -> &SlotMap<ProductKey, Product<'a>> {
        &self.product_meta
    }
}

impl Default for Fixture<'static> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use rusty_money::iso::INR;
    use testresult::TestResult;

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    const PRODUCTS: &str = r#"
products:
  obd-scanner:
    name: OBD-II Scanner
    kind: physical
    price: "500 INR"
    quantity_pricing:
      - { min_qty: 1, max_qty: 9, price_per_item: "500 INR" }
      - { min_qty: 10, max_qty: 49, price_per_item: "420 INR", courier_charge: "50 INR" }
  wiring-pack:
    name: Wiring Diagram Pack
    kind: digital
    price: "999 INR"
"#;

    #[test]
    fn fixture_loads_products_and_cart() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(dir.path(), "products", "shop", PRODUCTS)?;
        write_fixture(
            dir.path(),
            "carts",
            "shop",
            "items:\n  - { product: obd-scanner, quantity: 10 }\n  - product: wiring-pack\n",
        )?;

        let fixture = Fixture::from_set_in(dir.path(), "shop")?;

        assert_eq!(fixture.product_meta_map().len(), 2);
        assert_eq!(fixture.product("obd-scanner")?.name, "OBD-II Scanner");
        assert_eq!(fixture.items().len(), 2);
        assert_eq!(fixture.currency()?, INR);

        let cart = fixture.cart()?;

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.currency(), INR);

        Ok(())
    }

    #[test]
    fn fixture_cart_unknown_product_returns_error() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(dir.path(), "products", "shop", PRODUCTS)?;
        write_fixture(dir.path(), "carts", "shop", "items:\n  - product: torque-wrench\n")?;

        let result = Fixture::from_set_in(dir.path(), "shop");

        assert!(matches!(result, Err(FixtureError::ProductNotFound(key)) if key == "torque-wrench"));

        Ok(())
    }

    #[test]
    fn fixture_mixed_currencies_return_error() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "products",
            "mixed",
            "products:\n  a: { name: A, kind: physical, price: \"1 INR\" }\n  b: { name: B, kind: physical, price: \"1 USD\" }\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_products("mixed");

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn fixture_declared_currency_must_match_prices() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "products",
            "declared",
            &format!("currency: USD\n{PRODUCTS}"),
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_products("declared");

        assert!(matches!(
            result,
            Err(FixtureError::CurrencyMismatch(expected, found)) if expected == "USD" && found == "INR"
        ));

        Ok(())
    }

    #[test]
    fn fixture_declared_currency_matching_prices_loads() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "products",
            "declared",
            &format!("currency: INR\n{PRODUCTS}"),
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_products("declared")?;

        assert_eq!(fixture.currency()?, INR);
        assert_eq!(fixture.product_meta_map().len(), 2);

        Ok(())
    }

    #[test]
    fn fixture_declared_unknown_currency_returns_error() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "products",
            "declared",
            &format!("currency: ZZZ\n{PRODUCTS}"),
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_products("declared");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ZZZ"));

        Ok(())
    }

    #[test]
    fn fixture_missing_file_returns_io_error() {
        let mut fixture = Fixture::with_base_path("/nonexistent/fixtures");

        assert!(matches!(
            fixture.load_products("shop"),
            Err(FixtureError::Io(_))
        ));
    }

    #[test]
    fn fixture_product_not_found_returns_error() {
        let fixture = Fixture::new();
        let result = fixture.product("nonexistent");

        assert!(matches!(result, Err(FixtureError::ProductNotFound(_))));
    }

    #[test]
    fn fixture_no_currency_returns_error() {
        let fixture = Fixture::new();

        assert!(matches!(fixture.cart(), Err(FixtureError::NoCurrency)));
    }

    #[test]
    fn fixture_no_items_returns_error() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(dir.path(), "products", "shop", PRODUCTS)?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_products("shop")?;

        assert!(matches!(fixture.cart(), Err(FixtureError::NoItems)));

        Ok(())
    }
}
